// src/geometry.rs
// Geometry collaborator: multi-point centroid and circle tessellation.
//
// The synchronizer only talks to the Geometry trait. Spherical is the
// default implementation and works on a spherical earth.

use crate::domain::LngLat;
use crate::errors::MapError;
use serde_json::{json, Value};
use std::str::FromStr;

/// Mean earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Distance units accepted for the boundary radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Meters,
    Kilometers,
    Miles,
    Degrees,
    Radians,
}

impl Units {
    /// Converts a distance in these units to an angular distance in radians.
    pub fn to_radians(self, distance: f64) -> f64 {
        match self {
            Units::Meters => distance / EARTH_RADIUS_M,
            Units::Kilometers => distance * 1000.0 / EARTH_RADIUS_M,
            Units::Miles => distance * 1609.344 / EARTH_RADIUS_M,
            Units::Degrees => distance.to_radians(),
            Units::Radians => distance,
        }
    }
}

impl FromStr for Units {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meters" | "metres" | "m" => Ok(Units::Meters),
            "kilometers" | "kilometres" | "km" => Ok(Units::Kilometers),
            "miles" | "mi" => Ok(Units::Miles),
            "degrees" | "deg" => Ok(Units::Degrees),
            "radians" | "rad" => Ok(Units::Radians),
            other => Err(MapError::UnknownUnits(other.to_string())),
        }
    }
}

/// A single closed ring: the last position repeats the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    ring: Vec<LngLat>,
}

impl Polygon {
    /// Closes `vertices` into a ring. An empty input stays empty.
    pub fn from_vertices(mut vertices: Vec<LngLat>) -> Self {
        if let Some(first) = vertices.first().copied() {
            vertices.push(first);
        }
        Self { ring: vertices }
    }

    pub fn ring(&self) -> &[LngLat] {
        &self.ring
    }

    /// Distinct vertices, i.e. the ring without its closing position.
    pub fn vertex_count(&self) -> usize {
        self.ring.len().saturating_sub(1)
    }

    /// GeoJSON `Feature` with a `Polygon` geometry, as map sources expect.
    pub fn to_geojson(&self) -> Value {
        let coordinates: Vec<[f64; 2]> = self.ring().iter().map(|p| [p.lng, p.lat]).collect();

        json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [coordinates],
            }
        })
    }
}

pub trait Geometry {
    /// Unweighted centroid of a set of points; `None` for an empty set.
    fn centroid(&self, points: &[LngLat]) -> Option<LngLat>;

    /// A circle of `radius` around `center`, tessellated into `steps` vertices.
    fn circle(&self, center: LngLat, radius: f64, units: Units, steps: usize) -> Polygon;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Spherical;

impl Spherical {
    /// The point reached travelling `distance` radians from `origin` on the
    /// given bearing (degrees clockwise from north).
    pub fn destination(origin: LngLat, distance: f64, bearing: f64) -> LngLat {
        let lng1 = origin.lng.to_radians();
        let lat1 = origin.lat.to_radians();
        let bearing = bearing.to_radians();

        let lat2 = (lat1.sin() * distance.cos() + lat1.cos() * distance.sin() * bearing.cos())
            .asin();
        let lng2 = lng1
            + (bearing.sin() * distance.sin() * lat1.cos())
                .atan2(distance.cos() - lat1.sin() * lat2.sin());

        LngLat::new(lng2.to_degrees(), lat2.to_degrees())
    }
}

impl Geometry for Spherical {
    fn centroid(&self, points: &[LngLat]) -> Option<LngLat> {
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f64;
        let (lng, lat) = points
            .iter()
            .fold((0.0, 0.0), |(lng, lat), p| (lng + p.lng, lat + p.lat));

        Some(LngLat::new(lng / n, lat / n))
    }

    fn circle(&self, center: LngLat, radius: f64, units: Units, steps: usize) -> Polygon {
        let distance = units.to_radians(radius);

        // Counter-clockwise, starting due north.
        let vertices = (0..steps)
            .map(|i| {
                let bearing = (i as f64 * -360.0) / steps as f64;
                Self::destination(center, distance, bearing)
            })
            .collect();

        Polygon::from_vertices(vertices)
    }
}
