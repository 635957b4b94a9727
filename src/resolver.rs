// resolver.rs
use crate::domain::{FilterCriteria, Listing, Viewport};

/// Listings that currently pass the viewport and every filter, in store order.
/// Rebuilt on every trigger and dropped once the sinks have consumed it.
pub type VisibleSet<'a> = Vec<&'a Listing>;

/// Selects the listings inside `viewport` that satisfy `criteria`.
///
/// Pure: the same inputs always give the same, identically ordered result.
pub fn resolve<'a>(
    listings: &'a [Listing],
    viewport: &Viewport,
    criteria: &FilterCriteria,
) -> VisibleSet<'a> {
    listings
        .iter()
        .filter(|listing| viewport.contains(listing.position))
        .filter(|listing| criteria.admits(listing))
        .collect()
}
