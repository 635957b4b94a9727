pub mod components;

// Re-exports for convenience
pub use components::{listing_popup, marker_element};
