// src/map.rs
// MapSurface is everything the synchronizer needs from a map: current
// bounds, marker placement and one named polygon layer. HeadlessMap is the
// in-memory Web Mercator implementation used by replay and the tests.

use crate::config::CameraConfig;
use crate::domain::{LngLat, Viewport};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::f64::consts::PI;

pub type MarkerId = u64;

/// Camera move performed when a marker is clicked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTo {
    pub center: LngLat,
    pub zoom: f64,
}

/// A placed marker: where it sits, what it renders and what a click does.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub listing_id: String,
    pub position: LngLat,
    pub element_html: String,
    pub popup_html: String,
    pub on_click: FlyTo,
}

/// A GeoJSON source rendered as a filled polygon layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillLayer {
    pub source: String,
    pub layer: String,
    pub data: Value,
    pub fill_color: String,
    pub fill_opacity: f64,
}

/// Events a map fires when its camera changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    Move,
    Zoom,
}

pub trait MapSurface {
    fn bounds(&self) -> Viewport;

    fn add_marker(&mut self, marker: Marker) -> MarkerId;
    fn remove_marker(&mut self, id: MarkerId);

    fn has_source(&self, source: &str) -> bool;
    fn add_fill_layer(&mut self, layer: FillLayer);
    fn set_source_data(&mut self, source: &str, data: Value);
    /// Removes the layer together with its source.
    fn remove_fill_layer(&mut self, layer: &str, source: &str);
}

// Mapbox renders 512 px tiles.
const TILE_SIZE: f64 = 512.0;
const MAX_LAT: f64 = 85.051_128_779_806_59;

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 22.0;

fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

fn project(point: LngLat, zoom: f64) -> (f64, f64) {
    let ws = world_size(zoom);
    let lat = point.lat.clamp(-MAX_LAT, MAX_LAT).to_radians();

    let x = (point.lng + 180.0) / 360.0 * ws;
    let y = (1.0 - (PI / 4.0 + lat / 2.0).tan().ln() / PI) / 2.0 * ws;
    (x, y)
}

fn unproject(x: f64, y: f64, zoom: f64) -> LngLat {
    let ws = world_size(zoom);

    let lng = x / ws * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / ws)).sinh().atan().to_degrees();
    LngLat::new(lng, lat)
}

/// In-memory map. Tracks the camera, the placed markers and the layers.
#[derive(Debug)]
pub struct HeadlessMap {
    center: LngLat,
    zoom: f64,
    width: f64,
    height: f64,
    bounds: Viewport,
    markers: BTreeMap<MarkerId, Marker>,
    next_marker: MarkerId,
    layers: BTreeMap<String, FillLayer>,
}

impl HeadlessMap {
    pub fn new(camera: &CameraConfig) -> Self {
        let mut map = Self {
            center: camera.center,
            zoom: clamp_zoom(camera.zoom),
            width: camera.width,
            height: camera.height,
            bounds: Viewport::new(0.0, 0.0, 0.0, 0.0),
            markers: BTreeMap::new(),
            next_marker: 1,
            layers: BTreeMap::new(),
        };
        map.bounds = map.projected_bounds();
        map
    }

    fn projected_bounds(&self) -> Viewport {
        let (cx, cy) = project(self.center, self.zoom);
        let north_west = unproject(cx - self.width / 2.0, cy - self.height / 2.0, self.zoom);
        let south_east = unproject(cx + self.width / 2.0, cy + self.height / 2.0, self.zoom);

        Viewport::new(north_west.lng, south_east.lng, south_east.lat, north_west.lat)
    }

    pub fn center(&self) -> LngLat {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan_to(&mut self, center: LngLat) -> Vec<MapEvent> {
        self.center = center;
        self.bounds = self.projected_bounds();
        vec![MapEvent::Move]
    }

    /// Zooming also moves the camera, so both events fire. The zoom is held
    /// within [`MIN_ZOOM`, `MAX_ZOOM`].
    pub fn zoom_to(&mut self, zoom: f64) -> Vec<MapEvent> {
        self.zoom = clamp_zoom(zoom);
        self.bounds = self.projected_bounds();
        vec![MapEvent::Move, MapEvent::Zoom]
    }

    pub fn fly_to(&mut self, target: FlyTo) -> Vec<MapEvent> {
        let zoom = clamp_zoom(target.zoom);
        let zoomed = zoom != self.zoom;
        self.center = target.center;
        self.zoom = zoom;
        self.bounds = self.projected_bounds();

        if zoomed {
            vec![MapEvent::Move, MapEvent::Zoom]
        } else {
            vec![MapEvent::Move]
        }
    }

    /// Shows exactly `bounds`, with swapped edges put back in order. The
    /// camera is re-centred on them and zoomed so the longitude span fills
    /// the canvas width.
    pub fn fit_bounds(&mut self, bounds: Viewport) -> Vec<MapEvent> {
        let bounds = Viewport::new(
            bounds.west.min(bounds.east),
            bounds.west.max(bounds.east),
            bounds.south.min(bounds.north),
            bounds.south.max(bounds.north),
        );
        let span = (bounds.east - bounds.west).max(f64::EPSILON);
        self.zoom = clamp_zoom((self.width * 360.0 / (span * TILE_SIZE)).log2());
        self.center = bounds.center();
        self.bounds = bounds;
        vec![MapEvent::Move, MapEvent::Zoom]
    }

    /// Performs the click action of a placed marker.
    pub fn click(&mut self, id: MarkerId) -> Option<Vec<MapEvent>> {
        let target = self.markers.get(&id)?.on_click;
        Some(self.fly_to(target))
    }

    pub fn marker_for(&self, listing_id: &str) -> Option<MarkerId> {
        self.markers
            .iter()
            .find(|(_, marker)| marker.listing_id == listing_id)
            .map(|(id, _)| *id)
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    pub fn layer(&self, source: &str) -> Option<&FillLayer> {
        self.layers.get(source)
    }
}

impl MapSurface for HeadlessMap {
    fn bounds(&self) -> Viewport {
        self.bounds
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerId {
        let id = self.next_marker;
        self.next_marker += 1;
        self.markers.insert(id, marker);
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }

    fn has_source(&self, source: &str) -> bool {
        self.layers.contains_key(source)
    }

    fn add_fill_layer(&mut self, layer: FillLayer) {
        self.layers.insert(layer.source.clone(), layer);
    }

    fn set_source_data(&mut self, source: &str, data: Value) {
        if let Some(layer) = self.layers.get_mut(source) {
            layer.data = data;
        }
    }

    fn remove_fill_layer(&mut self, layer: &str, source: &str) {
        self.layers.retain(|key, existing| key != source && existing.layer != layer);
    }
}
