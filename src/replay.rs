// src/replay.rs
// Trigger script replay.
//
// Reads one JSON trigger per line, drives the headless session with it and
// writes one JSON snapshot of every view per line:
//
//   {"event":"fit","west":77.0,"east":77.3,"south":28.5,"north":28.7}
//   {"event":"category","value":"villa"}
//   {"event":"click","listing":"a1"}

use crate::boundary::BOUNDARY_SOURCE;
use crate::domain::{LngLat, Viewport};
use crate::errors::{MapError, MapResult};
use crate::map::{FillLayer, MapSurface};
use crate::session::HeadlessSession;
use crate::sinks::Card;
use crate::sync::{SyncReport, Trigger};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Pan { lng: f64, lat: f64 },
    Zoom { zoom: f64 },
    Fit {
        west: f64,
        east: f64,
        south: f64,
        north: f64,
    },
    Category { value: String },
    Location { value: String },
    Price { value: f64 },
    Click { listing: String },
}

#[derive(Debug, Serialize)]
pub struct MarkerView {
    pub id: String,
    pub category: String,
    pub location: String,
    pub position: LngLat,
    pub element: String,
    pub popup: String,
}

/// State of every view after one script line.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub triggers: Vec<&'static str>,
    pub count_text: String,
    pub visible: Vec<String>,
    pub category: String,
    pub min_price: f64,
    pub center: LngLat,
    pub zoom: f64,
    pub viewport: Viewport,
    pub markers: Vec<MarkerView>,
    pub cards: Vec<Card>,
    pub boundary: Option<FillLayer>,
}

/// Applies one script event and returns the passes it caused.
pub fn apply_event(session: &mut HeadlessSession, event: ScriptEvent) -> MapResult<Vec<SyncReport>> {
    match event {
        ScriptEvent::Pan { lng, lat } => {
            let events = session.map_mut().pan_to(LngLat::new(lng, lat));
            session.handle_map_events(events)
        }
        ScriptEvent::Zoom { zoom } => {
            let events = session.map_mut().zoom_to(zoom);
            session.handle_map_events(events)
        }
        ScriptEvent::Fit {
            west,
            east,
            south,
            north,
        } => {
            let events = session
                .map_mut()
                .fit_bounds(Viewport::new(west, east, south, north));
            session.handle_map_events(events)
        }
        ScriptEvent::Category { value } => {
            Ok(vec![session.handle_trigger(Trigger::CategoryChanged(value))?])
        }
        ScriptEvent::Location { value } => {
            Ok(vec![session.handle_trigger(Trigger::LocationChanged(value))?])
        }
        ScriptEvent::Price { value } => {
            Ok(vec![session.handle_trigger(Trigger::MinPriceChanged(value))?])
        }
        ScriptEvent::Click { listing } => {
            if session.store().get(&listing).is_none() {
                return Err(MapError::UnknownListing(listing));
            }
            let events = session
                .map()
                .marker_for(&listing)
                .and_then(|marker| session.map_mut().click(marker))
                .ok_or(MapError::ListingHidden(listing))?;
            session.handle_map_events(events)
        }
    }
}

pub fn snapshot(session: &HeadlessSession, reports: &[SyncReport]) -> Snapshot {
    let map = session.map();
    let criteria = session.criteria();

    let markers = map
        .markers()
        .map(|marker| {
            let listing = session.store().get(&marker.listing_id);
            MarkerView {
                id: marker.listing_id.clone(),
                category: listing.map(|l| l.category.clone()).unwrap_or_default(),
                location: listing.map(|l| l.location.clone()).unwrap_or_default(),
                position: marker.position,
                element: marker.element_html.clone(),
                popup: marker.popup_html.clone(),
            }
        })
        .collect();

    Snapshot {
        triggers: reports.iter().map(|report| report.trigger).collect(),
        count_text: session.heading().text().to_string(),
        visible: reports
            .last()
            .map(|report| report.visible.clone())
            .unwrap_or_default(),
        category: criteria.category.clone(),
        min_price: criteria.min_price,
        center: map.center(),
        zoom: map.zoom(),
        viewport: map.bounds(),
        markers,
        cards: session.cards().cards().to_vec(),
        boundary: map.layer(BOUNDARY_SOURCE).cloned(),
    }
}

/// Runs every line of `input` and writes the snapshots to `out`.
/// Returns the number of lines applied.
pub fn run_script<R, W>(session: &mut HeadlessSession, input: R, mut out: W) -> MapResult<usize>
where
    R: BufRead,
    W: Write,
{
    let mut applied = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let event: ScriptEvent = serde_json::from_str(&line).map_err(|source| {
            MapError::TriggerScript {
                line: index + 1,
                source,
            }
        })?;
        tracing::debug!(line = index + 1, ?event, "applying trigger");

        let reports = apply_event(session, event)?;
        if let Some(last) = reports.last() {
            tracing::debug!(
                line = index + 1,
                count = %last.count_text,
                center = ?last.boundary.as_ref().map(|b| b.center),
                "line applied"
            );
        }
        serde_json::to_writer(&mut out, &snapshot(session, &reports))?;
        out.write_all(b"\n")?;
        applied += 1;
    }

    out.flush()?;
    Ok(applied)
}
