// session.rs
use crate::config::{CameraConfig, MapConfig};
use crate::domain::{FilterCriteria, UrlSeed};
use crate::errors::{MapError, MapResult};
use crate::geometry::{Geometry, Spherical};
use crate::map::{HeadlessMap, MapSurface};
use crate::markup::RawListing;
use crate::sinks::{CardBoard, CardSink, CountSink, ResultHeading};
use crate::store::ListingStore;
use crate::sync::{SyncConfig, Trigger, ViewSynchronizer};
use std::sync::Arc;

/// The synchronizer wired to the in-memory collaborators.
pub type HeadlessSession = ViewSynchronizer<HeadlessMap, Spherical, CardBoard, ResultHeading>;

/// Loads the listings, builds the map and brings every view in line with the
/// initial camera.
///
/// When no record survives loading the session is over before it starts:
/// `build_map` is never called and [`MapError::NoListings`] is returned.
pub fn start<M, F, G, C, H>(
    records: &[RawListing],
    seed: UrlSeed,
    config: &MapConfig,
    build_map: F,
    geometry: G,
    cards: C,
    heading: H,
) -> MapResult<ViewSynchronizer<M, G, C, H>>
where
    M: MapSurface,
    F: FnOnce(&CameraConfig) -> M,
    G: Geometry,
    C: CardSink,
    H: CountSink,
{
    let store = ListingStore::load(records);

    if store.is_empty() {
        tracing::error!("No locations found.");
        return Err(MapError::NoListings);
    }

    tracing::info!(
        listings = store.len(),
        dropped = records.len() - store.len(),
        seed_category = %seed.category,
        seed_min_price = seed.min_price,
        "🗺️ Listing map session starting"
    );

    let map = build_map(&config.camera);

    let mut sync = ViewSynchronizer::new(
        Arc::new(store),
        FilterCriteria::with_seed(seed),
        SyncConfig {
            boundary: config.boundary,
            focus_zoom: config.focus_zoom,
        },
        map,
        geometry,
        cards,
        heading,
    );
    sync.handle_trigger(Trigger::Load)?;

    Ok(sync)
}

/// [`start`] with the headless map, spherical geometry and in-memory sinks.
pub fn start_headless(
    records: &[RawListing],
    card_ids: Vec<String>,
    seed: UrlSeed,
    config: &MapConfig,
) -> MapResult<HeadlessSession> {
    start(
        records,
        seed,
        config,
        HeadlessMap::new,
        Spherical,
        CardBoard::new(card_ids),
        ResultHeading::default(),
    )
}
