// src/tests/utils.rs
use crate::config::MapConfig;
use crate::domain::UrlSeed;
use crate::markup::{read_listing_markup, ListingMarkup};
use crate::session::{start_headless, HeadlessSession};

/// Three listings around Delhi and New England plus one with a broken
/// latitude that must never load.
pub const LISTING_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <h2 id="display-result"></h2>
  <div id="location-data">
    <div class="location" data-id="villa-1" data-name="Sunrise Villa" data-address="12 Ring Rd"
         data-price="₹5,00,000" data-prop1="2" data-prop2="3" data-prop3="1800 sqft" data-prop4="Garden"
         data-img="/img/villa-1.jpg" data-lat="28.60" data-lng="77.20" data-cat="villa" data-loc="delhi"></div>
    <div class="location" data-id="flat-1" data-name="Metro Flat" data-address="4 Park St"
         data-price="₹3,00,000" data-prop1="1" data-prop2="2" data-prop3="900 sqft" data-prop4=""
         data-img="/img/flat-1.jpg" data-lat="28.65" data-lng="77.25" data-cat="flat" data-loc="delhi"></div>
    <div class="location" data-id="villa-far" data-name="Cape Villa" data-address="1 Shore Ln"
         data-price="$700,000" data-prop1="3" data-prop2="4" data-prop3="2600 sqft" data-prop4="Dock"
         data-img="/img/villa-far.jpg" data-lat="40.0" data-lng="-70.0" data-cat="villa" data-loc="cape"></div>
    <div class="location" data-id="broken" data-name="No Coordinates"
         data-price="100" data-lat="" data-lng="77.22" data-cat="villa" data-loc="delhi"></div>
  </div>
  <div class="property-card" data-id="villa-1"></div>
  <div class="property-card" data-id="flat-1"></div>
  <div class="property-card" data-id="villa-far"></div>
  <div class="property-card" data-id="broken"></div>
</body>
</html>"#;

pub fn listing_page() -> ListingMarkup {
    read_listing_markup(LISTING_PAGE).unwrap_or_else(|e| panic!("fixture markup failed: {e}"))
}

/// A fresh headless session over [`LISTING_PAGE`] with default configuration.
pub fn start_session(seed: UrlSeed) -> HeadlessSession {
    let page = listing_page();
    start_headless(&page.records, page.card_ids, seed, &MapConfig::default())
        .unwrap_or_else(|e| panic!("session failed to start: {e}"))
}
