// reader.rs
use crate::errors::{MapError, MapResult};
use crate::markup::RawListing;
use scraper::{ElementRef, Html, Selector};

const LOCATION_SELECTOR: &str = "#location-data .location";
const CARD_SELECTOR: &str = ".property-card[data-id]";

/// Everything the page hands over at start-up: the raw listing records and
/// the identifiers of the presentation cards, both in document order.
#[derive(Debug, Default)]
pub struct ListingMarkup {
    pub records: Vec<RawListing>,
    pub card_ids: Vec<String>,
}

/// Reads listing records and card identifiers out of the page HTML.
pub fn read_listing_markup(html: &str) -> MapResult<ListingMarkup> {
    let document = Html::parse_document(html);

    let location_selector =
        Selector::parse(LOCATION_SELECTOR).map_err(|e| MapError::Markup(e.to_string()))?;
    let card_selector =
        Selector::parse(CARD_SELECTOR).map_err(|e| MapError::Markup(e.to_string()))?;

    let records: Vec<RawListing> = document
        .select(&location_selector)
        .map(|element| raw_listing(&element))
        .collect();

    let card_ids: Vec<String> = document
        .select(&card_selector)
        .filter_map(|card| card.value().attr("data-id"))
        .map(str::to_string)
        .collect();

    tracing::debug!(
        records = records.len(),
        cards = card_ids.len(),
        "listing markup read"
    );

    Ok(ListingMarkup { records, card_ids })
}

fn raw_listing(element: &ElementRef<'_>) -> RawListing {
    let attr = |name: &str| element.value().attr(name).unwrap_or_default().to_string();

    RawListing {
        id: attr("data-id"),
        name: attr("data-name"),
        address: attr("data-address"),
        price: attr("data-price"),
        prop1: attr("data-prop1"),
        prop2: attr("data-prop2"),
        prop3: attr("data-prop3"),
        prop4: attr("data-prop4"),
        img: attr("data-img"),
        lat: attr("data-lat"),
        lng: attr("data-lng"),
        cat: attr("data-cat"),
        loc: attr("data-loc"),
    }
}
