// store.rs
use crate::domain::Listing;
use crate::markup::RawListing;

/// The authoritative listing set for a session. Built once, never mutated,
/// shared read-only between the resolver and the synchronizer.
#[derive(Debug, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

impl ListingStore {
    /// Parses every raw record and keeps those with a finite position,
    /// preserving their order. Rejected records are dropped without surfacing
    /// an error; an empty result is for the caller to judge.
    pub fn load<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RawListing>,
    {
        let mut listings = Vec::new();

        for raw in records {
            match Listing::from_raw(raw) {
                Ok(listing) => listings.push(listing),
                Err(reason) => {
                    tracing::warn!(id = %raw.id, %reason, "Skipping listing");
                }
            }
        }

        Self { listings }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.id == id)
    }
}
