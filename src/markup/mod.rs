mod models;
mod reader;

pub use models::RawListing;
pub use reader::{read_listing_markup, ListingMarkup};
