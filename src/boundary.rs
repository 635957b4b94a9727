// boundary.rs
use crate::domain::{Listing, LngLat};
use crate::geometry::{Geometry, Polygon, Units};
use serde_json::Value;

/// Map source holding the boundary polygon.
pub const BOUNDARY_SOURCE: &str = "circular-boundary";
/// Fill layer drawing [`BOUNDARY_SOURCE`].
pub const BOUNDARY_LAYER: &str = "circular-boundary-layer";

pub const BOUNDARY_FILL_COLOR: &str = "#0080ff";
pub const BOUNDARY_FILL_OPACITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConfig {
    pub radius: f64,
    pub units: Units,
    /// Tessellation steps; the polygon gets exactly this many vertices.
    pub steps: usize,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            units: Units::Kilometers,
            steps: 50,
        }
    }
}

/// Centroid of the visible listings plus a fixed-radius circle around it.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub center: LngLat,
    pub polygon: Polygon,
}

impl Boundary {
    pub fn to_geojson(&self) -> Value {
        self.polygon.to_geojson()
    }
}

/// Summarises the visible set geographically. `None` means there is nothing
/// to outline and any boundary already on the map should go.
///
/// Deterministic, so an existing map source can simply have its data
/// replaced with the new polygon.
pub fn derive<G>(visible: &[&Listing], config: &BoundaryConfig, geometry: &G) -> Option<Boundary>
where
    G: Geometry + ?Sized,
{
    let points: Vec<LngLat> = visible.iter().map(|listing| listing.position).collect();
    let center = geometry.centroid(&points)?;
    let polygon = geometry.circle(center, config.radius, config.units, config.steps);

    Some(Boundary { center, polygon })
}
