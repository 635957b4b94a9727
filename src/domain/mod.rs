pub mod filter;
pub mod listing;
pub mod logic;
pub mod viewport;

pub use filter::{FilterCriteria, UrlSeed};
pub use listing::{Listing, LngLat};
pub use viewport::Viewport;
