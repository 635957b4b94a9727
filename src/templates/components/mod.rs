mod marker;
mod popup;

pub use marker::marker_element;
pub use popup::listing_popup;
