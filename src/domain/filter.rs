// src/domain/filter.rs

use crate::domain::logic::parse_leading_float;
use crate::domain::Listing;
use crate::errors::MapResult;
use url::{form_urlencoded, Url};

/// Filter values seeded from the page URL (`?category=..&price=..`).
/// Read once at start-up and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlSeed {
    pub category: String,
    pub min_price: f64,
}

impl UrlSeed {
    /// Reads the seed from a full page URL.
    pub fn from_url(page_url: &str) -> MapResult<Self> {
        let url = Url::parse(page_url)?;
        Ok(Self::from_query(url.query().unwrap_or("")))
    }

    /// Reads the seed from a bare query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut category = None;
        let mut price = None;

        // First occurrence wins for repeated keys.
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "category" if category.is_none() => category = Some(value.into_owned()),
                "price" if price.is_none() => price = Some(value.into_owned()),
                _ => {}
            }
        }

        Self {
            category: category.unwrap_or_default(),
            // unparseable or missing -> 0, which never restricts anything.
            // `Infinity` is kept and hides every listing.
            min_price: price
                .as_deref()
                .and_then(parse_leading_float)
                .unwrap_or(0.0),
        }
    }
}

/// The active filter state: the interactive controls plus the URL seed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Category selector; empty means no restriction from this control.
    pub category: String,
    /// Location selector. Recorded and triggers recomputation, but does not
    /// constrain visibility.
    pub location: String,
    /// Minimum-price control.
    pub min_price: f64,
    pub seed: UrlSeed,
}

impl FilterCriteria {
    pub fn with_seed(seed: UrlSeed) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Either category source matching is enough. Only when both sources are
    /// empty is every category accepted.
    pub fn matches_category(&self, category: &str) -> bool {
        let seeded = self.seed.category.as_str();
        let selected = self.category.as_str();

        (seeded.is_empty() && selected.is_empty())
            || (!seeded.is_empty() && category == seeded)
            || (!selected.is_empty() && category == selected)
    }

    /// The listing must clear both minimums at once.
    pub fn admits_price(&self, listing: &Listing) -> bool {
        listing.price_at_least(self.min_price) && listing.price_at_least(self.seed.min_price)
    }

    pub fn admits(&self, listing: &Listing) -> bool {
        self.matches_category(&listing.category) && self.admits_price(listing)
    }
}
