use crate::domain::logic::{parse_coordinate, parse_price};
use crate::markup::RawListing;
use serde::Serialize;

/// A geographic position in degrees, longitude first like the map expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// A typed listing, immutable once it is in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub address: String,

    /// `None` when the price attribute held no number at all. Such a listing
    /// never satisfies a minimum-price constraint.
    pub price: Option<f64>,

    // bath, bed, area, extra
    pub features: [String; 4],
    pub image: String,

    /// Always finite; records without a usable position never become a `Listing`.
    pub position: LngLat,

    pub category: String,
    pub location: String,
}

impl Listing {
    /// Converts a raw markup record into a typed listing.
    /// Fails when either coordinate does not parse to a finite number.
    pub fn from_raw(raw: &RawListing) -> Result<Self, String> {
        let lat = parse_coordinate(&raw.lat)
            .ok_or_else(|| format!("Invalid latitude {:?}", raw.lat))?;
        let lng = parse_coordinate(&raw.lng)
            .ok_or_else(|| format!("Invalid longitude {:?}", raw.lng))?;

        Ok(Listing {
            id: raw.id.clone(),
            name: raw.name.clone(),
            address: raw.address.clone(),
            price: parse_price(&raw.price),
            features: [
                raw.prop1.clone(),
                raw.prop2.clone(),
                raw.prop3.clone(),
                raw.prop4.clone(),
            ],
            image: raw.img.clone(),
            position: LngLat::new(lng, lat),
            category: raw.cat.clone(),
            location: raw.loc.clone(),
        })
    }

    /// Inclusive comparison; a missing price never passes.
    pub fn price_at_least(&self, minimum: f64) -> bool {
        self.price.is_some_and(|price| price >= minimum)
    }
}
