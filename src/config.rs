// config.rs
use crate::boundary::BoundaryConfig;
use crate::domain::LngLat;
use crate::geometry::Units;
use crate::map::{MAX_ZOOM, MIN_ZOOM};
use anyhow::{ensure, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Initial camera and canvas of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub center: LngLat,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            center: LngLat::new(77.209, 28.6139),
            zoom: 8.5,
            width: 1024.0,
            height: 768.0,
        }
    }
}

/// Session configuration. Values can be overridden through environment
/// variables (or a `.env` file).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    pub camera: CameraConfig,
    /// Zoom the camera flies to when a marker is clicked.
    pub focus_zoom: f64,
    pub boundary: BoundaryConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            focus_zoom: 12.0,
            boundary: BoundaryConfig::default(),
        }
    }
}

impl MapConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, falling back to defaults
    /// for keys that are absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let read = |key: &str, default: f64| -> Result<f64> {
            parse_or(&lookup, key, default)
        };

        let camera = CameraConfig {
            center: LngLat::new(
                read("LISTING_MAP_CENTER_LNG", defaults.camera.center.lng)?,
                read("LISTING_MAP_CENTER_LAT", defaults.camera.center.lat)?,
            ),
            zoom: read("LISTING_MAP_ZOOM", defaults.camera.zoom)?,
            width: read("LISTING_MAP_WIDTH", defaults.camera.width)?,
            height: read("LISTING_MAP_HEIGHT", defaults.camera.height)?,
        };
        ensure!(
            camera.width > 0.0 && camera.height > 0.0,
            "LISTING_MAP_WIDTH and LISTING_MAP_HEIGHT must be positive"
        );

        ensure!(
            (MIN_ZOOM..=MAX_ZOOM).contains(&camera.zoom),
            "LISTING_MAP_ZOOM must be between {MIN_ZOOM} and {MAX_ZOOM}"
        );

        let units = match lookup("LISTING_MAP_BOUNDARY_UNITS") {
            Some(raw) => raw
                .parse::<Units>()
                .context("LISTING_MAP_BOUNDARY_UNITS must be a known distance unit")?,
            None => defaults.boundary.units,
        };

        let boundary = BoundaryConfig {
            radius: read("LISTING_MAP_BOUNDARY_RADIUS", defaults.boundary.radius)?,
            units,
            steps: parse_or(&lookup, "LISTING_MAP_BOUNDARY_STEPS", defaults.boundary.steps)?,
        };
        ensure!(
            boundary.steps >= 3,
            "LISTING_MAP_BOUNDARY_STEPS must be at least 3"
        );

        let focus_zoom = read("LISTING_MAP_FOCUS_ZOOM", defaults.focus_zoom)?;
        ensure!(
            (MIN_ZOOM..=MAX_ZOOM).contains(&focus_zoom),
            "LISTING_MAP_FOCUS_ZOOM must be between {MIN_ZOOM} and {MAX_ZOOM}"
        );

        Ok(Self {
            camera,
            focus_zoom,
            boundary,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid number, got {raw:?}")),
        None => Ok(default),
    }
}
