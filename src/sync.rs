// src/sync.rs
// View synchronization.
//
// Every trigger (camera move, zoom, filter change) runs one full pass:
// resolve the visible set, then push it to the cards, the markers, the
// boundary layer and the result heading, in that order. A pass always runs
// to completion before the next trigger is looked at.

use crate::boundary::{
    self, Boundary, BoundaryConfig, BOUNDARY_FILL_COLOR, BOUNDARY_FILL_OPACITY, BOUNDARY_LAYER,
    BOUNDARY_SOURCE,
};
use crate::domain::{FilterCriteria, Listing};
use crate::errors::{MapError, MapResult};
use crate::geometry::Geometry;
use crate::map::{FillLayer, FlyTo, MapEvent, MapSurface, Marker, MarkerId};
use crate::resolver::resolve;
use crate::sinks::{result_count_text, CardSink, CountSink};
use crate::store::ListingStore;
use crate::templates::{listing_popup, marker_element};
use std::collections::HashSet;
use std::sync::Arc;

/// An input event that invalidates the current visible set.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// First pass after the map is constructed.
    Load,
    Move,
    Zoom,
    CategoryChanged(String),
    LocationChanged(String),
    MinPriceChanged(f64),
}

impl Trigger {
    /// Name of the event the trigger is subscribed to.
    pub fn event_name(&self) -> &'static str {
        match self {
            Trigger::Load => "load",
            Trigger::Move => "move",
            Trigger::Zoom => "zoom",
            Trigger::CategoryChanged(_) => "change:category-list",
            Trigger::LocationChanged(_) => "change:location-list",
            Trigger::MinPriceChanged(_) => "change:display-price",
        }
    }
}

impl From<MapEvent> for Trigger {
    fn from(event: MapEvent) -> Self {
        match event {
            MapEvent::Move => Trigger::Move,
            MapEvent::Zoom => Trigger::Zoom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Recomputing,
}

/// What a single pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub trigger: &'static str,
    pub visible: Vec<String>,
    pub count_text: String,
    pub boundary: Option<Boundary>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncConfig {
    pub boundary: BoundaryConfig,
    pub focus_zoom: f64,
}

/// Owns the collaborators and is the only writer of the marker and
/// boundary layers.
pub struct ViewSynchronizer<M, G, C, H> {
    store: Arc<ListingStore>,
    criteria: FilterCriteria,
    config: SyncConfig,
    map: M,
    geometry: G,
    cards: C,
    heading: H,
    placed: Vec<MarkerId>,
    state: SyncState,
}

impl<M, G, C, H> ViewSynchronizer<M, G, C, H>
where
    M: MapSurface,
    G: Geometry,
    C: CardSink,
    H: CountSink,
{
    pub fn new(
        store: Arc<ListingStore>,
        criteria: FilterCriteria,
        config: SyncConfig,
        map: M,
        geometry: G,
        cards: C,
        heading: H,
    ) -> Self {
        Self {
            store,
            criteria,
            config,
            map,
            geometry,
            cards,
            heading,
            placed: Vec::new(),
            state: SyncState::Idle,
        }
    }

    /// Single entry point for every input event.
    pub fn handle_trigger(&mut self, trigger: Trigger) -> MapResult<SyncReport> {
        if self.state != SyncState::Idle {
            return Err(MapError::Reentrant);
        }

        self.state = SyncState::Recomputing;
        self.apply(&trigger);
        let report = self.recompute(trigger.event_name());
        self.state = SyncState::Idle;

        Ok(report)
    }

    /// Feeds camera events from the map, one pass per event.
    pub fn handle_map_events(&mut self, events: Vec<MapEvent>) -> MapResult<Vec<SyncReport>> {
        events
            .into_iter()
            .map(|event| self.handle_trigger(event.into()))
            .collect()
    }

    fn apply(&mut self, trigger: &Trigger) {
        match trigger {
            Trigger::CategoryChanged(category) => self.criteria.category = category.clone(),
            Trigger::LocationChanged(location) => self.criteria.location = location.clone(),
            Trigger::MinPriceChanged(price) => self.criteria.min_price = *price,
            Trigger::Load | Trigger::Move | Trigger::Zoom => {}
        }
    }

    fn recompute(&mut self, trigger: &'static str) -> SyncReport {
        let store = Arc::clone(&self.store);
        let viewport = self.map.bounds();
        let visible = resolve(store.listings(), &viewport, &self.criteria);

        self.update_cards(&visible);
        self.replace_markers(&visible);
        let boundary = boundary::derive(&visible, &self.config.boundary, &self.geometry);
        self.draw_boundary(boundary.as_ref());

        let count_text = result_count_text(visible.len());
        self.heading.set_text(&count_text);

        tracing::debug!(
            trigger,
            visible = visible.len(),
            total = store.len(),
            boundary_vertices = boundary.as_ref().map(|b| b.polygon.vertex_count()),
            "views synchronized"
        );

        SyncReport {
            trigger,
            visible: visible.iter().map(|listing| listing.id.clone()).collect(),
            count_text,
            boundary,
        }
    }

    fn update_cards(&mut self, visible: &[&Listing]) {
        let ids: HashSet<&str> = visible.iter().map(|listing| listing.id.as_str()).collect();

        for card_id in self.cards.card_ids() {
            let shown = ids.contains(card_id.as_str());
            self.cards.set_visible(&card_id, shown);
        }
    }

    /// Every pass removes all markers before placing the new ones, so the map
    /// never shows markers from two different passes.
    fn replace_markers(&mut self, visible: &[&Listing]) {
        for id in self.placed.drain(..) {
            self.map.remove_marker(id);
        }

        for listing in visible {
            let marker = Marker {
                listing_id: listing.id.clone(),
                position: listing.position,
                element_html: marker_element().into_string(),
                popup_html: listing_popup(listing).into_string(),
                on_click: FlyTo {
                    center: listing.position,
                    zoom: self.config.focus_zoom,
                },
            };
            self.placed.push(self.map.add_marker(marker));
        }
    }

    fn draw_boundary(&mut self, boundary: Option<&Boundary>) {
        match boundary {
            None => {
                if self.map.has_source(BOUNDARY_SOURCE) {
                    self.map.remove_fill_layer(BOUNDARY_LAYER, BOUNDARY_SOURCE);
                }
            }
            Some(boundary) if self.map.has_source(BOUNDARY_SOURCE) => {
                self.map
                    .set_source_data(BOUNDARY_SOURCE, boundary.to_geojson());
            }
            Some(boundary) => {
                self.map.add_fill_layer(FillLayer {
                    source: BOUNDARY_SOURCE.to_string(),
                    layer: BOUNDARY_LAYER.to_string(),
                    data: boundary.to_geojson(),
                    fill_color: BOUNDARY_FILL_COLOR.to_string(),
                    fill_opacity: BOUNDARY_FILL_OPACITY,
                });
            }
        }
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Camera changes made through this handle must be fed back with
    /// [`Self::handle_map_events`].
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn cards(&self) -> &C {
        &self.cards
    }

    pub fn heading(&self) -> &H {
        &self.heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LngLat, Viewport};
    use crate::geometry::Spherical;
    use crate::markup::RawListing;
    use crate::sinks::{CardBoard, ResultHeading};
    use serde_json::Value;
    use std::collections::BTreeMap;

    /// Map stub with fixed bounds that records layer operations.
    #[derive(Default)]
    struct StubMap {
        bounds: Option<Viewport>,
        markers: BTreeMap<MarkerId, Marker>,
        next: MarkerId,
        source: Option<Value>,
        log: Vec<&'static str>,
    }

    impl MapSurface for StubMap {
        fn bounds(&self) -> Viewport {
            self.bounds.unwrap_or(Viewport::new(-180.0, 180.0, -90.0, 90.0))
        }

        fn add_marker(&mut self, marker: Marker) -> MarkerId {
            self.next += 1;
            self.markers.insert(self.next, marker);
            self.next
        }

        fn remove_marker(&mut self, id: MarkerId) {
            self.markers.remove(&id);
        }

        fn has_source(&self, _source: &str) -> bool {
            self.source.is_some()
        }

        fn add_fill_layer(&mut self, layer: FillLayer) {
            self.log.push("add");
            self.source = Some(layer.data);
        }

        fn set_source_data(&mut self, _source: &str, data: Value) {
            self.log.push("set");
            self.source = Some(data);
        }

        fn remove_fill_layer(&mut self, _layer: &str, _source: &str) {
            self.log.push("remove");
            self.source = None;
        }
    }

    fn raw(id: &str, lat: &str, lng: &str, cat: &str, price: &str) -> RawListing {
        RawListing {
            id: id.into(),
            name: id.into(),
            lat: lat.into(),
            lng: lng.into(),
            cat: cat.into(),
            price: price.into(),
            ..RawListing::default()
        }
    }

    fn synchronizer(
        bounds: Viewport,
    ) -> ViewSynchronizer<StubMap, Spherical, CardBoard, ResultHeading> {
        let records = vec![
            raw("villa-1", "28.60", "77.20", "villa", "500000"),
            raw("flat-1", "28.65", "77.25", "flat", "300000"),
            raw("villa-far", "40.0", "-70.0", "villa", "700000"),
        ];
        let store = Arc::new(ListingStore::load(&records));

        ViewSynchronizer::new(
            store,
            FilterCriteria::default(),
            SyncConfig {
                boundary: BoundaryConfig::default(),
                focus_zoom: 12.0,
            },
            StubMap {
                bounds: Some(bounds),
                ..StubMap::default()
            },
            Spherical,
            CardBoard::new(["villa-1", "flat-1", "villa-far"]),
            ResultHeading::default(),
        )
    }

    #[test]
    fn pass_updates_every_sink() {
        let mut sync = synchronizer(Viewport::new(77.0, 77.3, 28.5, 28.7));
        let report = sync.handle_trigger(Trigger::Move).unwrap();

        assert_eq!(report.trigger, "move");
        assert_eq!(report.visible, vec!["villa-1", "flat-1"]);
        assert_eq!(report.count_text, "2 Properties Found");
        assert_eq!(sync.heading().text(), "2 Properties Found");
        assert_eq!(sync.cards().visible_ids(), vec!["villa-1", "flat-1"]);
        assert_eq!(sync.map().markers.len(), 2);
        assert!(sync.map().source.is_some());
        assert_eq!(sync.state, SyncState::Idle);
    }

    #[test]
    fn markers_are_replaced_not_accumulated() {
        let mut sync = synchronizer(Viewport::new(77.0, 77.3, 28.5, 28.7));

        sync.handle_trigger(Trigger::Move).unwrap();
        sync.handle_trigger(Trigger::Zoom).unwrap();
        assert_eq!(sync.map().markers.len(), 2);

        sync.handle_trigger(Trigger::CategoryChanged("flat".into()))
            .unwrap();
        let ids: Vec<&str> = sync
            .map()
            .markers
            .values()
            .map(|m| m.listing_id.as_str())
            .collect();
        assert_eq!(ids, vec!["flat-1"]);
    }

    #[test]
    fn marker_carries_popup_and_focus_action() {
        let mut sync = synchronizer(Viewport::new(77.0, 77.3, 28.5, 28.7));
        sync.handle_trigger(Trigger::MinPriceChanged(400000.0))
            .unwrap();

        let marker = sync.map().markers.values().next().unwrap();
        assert_eq!(marker.listing_id, "villa-1");
        assert!(marker.popup_html.contains("Price: 500000"));
        assert!(marker.element_html.contains("custom-marker"));
        assert_eq!(
            marker.on_click,
            FlyTo {
                center: LngLat::new(77.20, 28.60),
                zoom: 12.0
            }
        );
    }

    #[test]
    fn boundary_is_created_then_replaced_then_removed() {
        let mut sync = synchronizer(Viewport::new(77.0, 77.3, 28.5, 28.7));

        sync.handle_trigger(Trigger::Load).unwrap();
        sync.handle_trigger(Trigger::Move).unwrap();
        sync.handle_trigger(Trigger::MinPriceChanged(10_000_000.0))
            .unwrap();
        // nothing left to remove
        sync.handle_trigger(Trigger::Move).unwrap();

        assert_eq!(sync.map().log, vec!["add", "set", "remove"]);
        assert!(sync.map().markers.is_empty());
        assert_eq!(sync.heading().text(), "0 Properties Found");
    }

    #[test]
    fn filter_changes_are_kept_between_passes() {
        let mut sync = synchronizer(Viewport::new(-180.0, 180.0, -90.0, 90.0));

        sync.handle_trigger(Trigger::CategoryChanged("villa".into()))
            .unwrap();
        sync.handle_trigger(Trigger::LocationChanged("delhi".into()))
            .unwrap();
        let report = sync.handle_trigger(Trigger::Move).unwrap();

        assert_eq!(sync.criteria().category, "villa");
        assert_eq!(sync.criteria().location, "delhi");
        assert_eq!(report.visible, vec!["villa-1", "villa-far"]);
    }

    #[test]
    fn single_result_uses_singular_text() {
        let mut sync = synchronizer(Viewport::new(-71.0, -69.0, 39.0, 41.0));
        let report = sync.handle_trigger(Trigger::Move).unwrap();

        assert_eq!(report.count_text, "1 Property Found");
    }

    #[test]
    fn trigger_during_a_pass_is_rejected() {
        let mut sync = synchronizer(Viewport::new(77.0, 77.3, 28.5, 28.7));
        sync.state = SyncState::Recomputing;

        assert!(matches!(
            sync.handle_trigger(Trigger::Move),
            Err(MapError::Reentrant)
        ));
    }

    #[test]
    fn event_names_match_subscriptions() {
        assert_eq!(Trigger::from(MapEvent::Move).event_name(), "move");
        assert_eq!(Trigger::from(MapEvent::Zoom).event_name(), "zoom");
        assert_eq!(
            Trigger::MinPriceChanged(0.0).event_name(),
            "change:display-price"
        );
    }
}
