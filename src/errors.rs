// errors.rs
use thiserror::Error;

/// Errors raised while loading listings or keeping the map views in sync.
///
/// Bad coordinates on a single record are not an error: those records are
/// dropped during load. Only an empty store aborts the session.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("No locations found.")]
    NoListings,

    #[error("Listing markup error: {0}")]
    Markup(String),

    #[error("Invalid page URL: {0}")]
    InvalidSeed(#[from] url::ParseError),

    #[error("Invalid trigger on line {line}: {source}")]
    TriggerScript {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown distance units: {0}")]
    UnknownUnits(String),

    #[error("Unknown listing {0}")]
    UnknownListing(String),

    #[error("Listing {0} has no marker in the current view")]
    ListingHidden(String),

    #[error("Trigger received while a recomputation is in progress")]
    Reentrant,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

// Type alias used by the load / sync layers.
pub type MapResult<T> = Result<T, MapError>;
