// src/tests/replay_tests.rs
use crate::domain::UrlSeed;
use crate::errors::MapError;
use crate::replay::{apply_event, run_script, ScriptEvent};
use crate::tests::utils::start_session;
use serde_json::Value;

fn run(script: &str) -> Result<Vec<Value>, MapError> {
    let mut session = start_session(UrlSeed::default());
    let mut out = Vec::new();

    run_script(&mut session, script.as_bytes(), &mut out)?;

    let text = String::from_utf8(out).unwrap();
    Ok(text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect())
}

#[test]
fn one_snapshot_per_line() {
    let snapshots = run(concat!(
        r#"{"event":"fit","west":77.0,"east":77.3,"south":28.5,"north":28.7}"#,
        "\n\n",
        r#"{"event":"category","value":"flat"}"#,
        "\n",
        r#"{"event":"price","value":1000000}"#,
        "\n",
    ))
    .unwrap();

    assert_eq!(snapshots.len(), 3);

    let fit = &snapshots[0];
    assert_eq!(fit["triggers"], serde_json::json!(["move", "zoom"]));
    assert_eq!(fit["count_text"], "2 Properties Found");
    assert_eq!(fit["markers"].as_array().unwrap().len(), 2);
    assert_eq!(fit["boundary"]["data"]["geometry"]["type"], "Polygon");
    assert_eq!(fit["boundary"]["layer"], "circular-boundary-layer");
    assert_eq!(fit["boundary"]["fill_color"], "#0080ff");
    assert_eq!(fit["markers"][0]["category"], "villa");
    assert_eq!(fit["viewport"]["west"], 77.0);

    let flat = &snapshots[1];
    assert_eq!(flat["triggers"], serde_json::json!(["change:category-list"]));
    assert_eq!(flat["visible"], serde_json::json!(["flat-1"]));
    assert_eq!(flat["count_text"], "1 Property Found");
    assert_eq!(flat["cards"][1]["display"], "flex");
    assert_eq!(flat["cards"][0]["display"], "none");

    let none = &snapshots[2];
    assert_eq!(none["count_text"], "0 Properties Found");
    assert!(none["boundary"].is_null());
    assert!(none["markers"].as_array().unwrap().is_empty());
}

#[test]
fn bad_line_reports_its_number() {
    let result = run(concat!(
        r#"{"event":"zoom","zoom":9}"#,
        "\n",
        r#"{"event":"teleport"}"#,
        "\n",
    ));

    match result {
        Err(MapError::TriggerScript { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected a trigger script error, got {other:?}"),
    }
}

#[test]
fn clicking_a_marker_flies_to_the_listing() {
    let mut session = start_session(UrlSeed::default());

    let reports = apply_event(
        &mut session,
        ScriptEvent::Click {
            listing: "villa-1".into(),
        },
    )
    .unwrap();

    let triggers: Vec<&str> = reports.iter().map(|r| r.trigger).collect();
    assert_eq!(triggers, vec!["move", "zoom"]);
    assert_eq!(session.map().zoom(), 12.0);
    assert_eq!(session.map().center().lng, 77.20);
    assert!(reports
        .last()
        .unwrap()
        .visible
        .contains(&"villa-1".to_string()));
}

#[test]
fn clicking_a_hidden_or_unknown_listing_fails() {
    let mut session = start_session(UrlSeed::default());

    let result = apply_event(
        &mut session,
        ScriptEvent::Click {
            listing: "villa-far".into(),
        },
    );
    assert!(matches!(result, Err(MapError::ListingHidden(id)) if id == "villa-far"));

    let result = apply_event(
        &mut session,
        ScriptEvent::Click {
            listing: "nope".into(),
        },
    );
    assert!(matches!(result, Err(MapError::UnknownListing(id)) if id == "nope"));
}

#[test]
fn location_selector_recomputes_without_filtering() {
    let snapshots = run(concat!(r#"{"event":"location","value":"cape"}"#, "\n")).unwrap();

    assert_eq!(
        snapshots[0]["triggers"],
        serde_json::json!(["change:location-list"])
    );
    assert_eq!(snapshots[0]["count_text"], "2 Properties Found");
}

#[test]
fn pan_moves_the_viewport() {
    let snapshots = run(concat!(r#"{"event":"pan","lng":-70.0,"lat":40.0}"#, "\n")).unwrap();

    assert_eq!(snapshots[0]["triggers"], serde_json::json!(["move"]));
    assert_eq!(snapshots[0]["visible"], serde_json::json!(["villa-far"]));
    assert_eq!(snapshots[0]["count_text"], "1 Property Found");
}

#[test]
fn extreme_zoom_keeps_a_usable_viewport() {
    let snapshots = run(concat!(
        r#"{"event":"zoom","zoom":5000}"#,
        "\n",
        r#"{"event":"zoom","zoom":-40}"#,
        "\n",
    ))
    .unwrap();

    assert_eq!(snapshots[0]["zoom"], 22.0);
    assert!(snapshots[0]["viewport"]["west"].is_f64());
    assert!(snapshots[0]["viewport"]["north"].is_f64());

    // the whole world is in view again
    assert_eq!(snapshots[1]["zoom"], 0.0);
    assert_eq!(snapshots[1]["count_text"], "3 Properties Found");
}

#[test]
fn fit_with_swapped_edges_shows_the_same_area() {
    let snapshots = run(concat!(
        r#"{"event":"fit","west":77.3,"east":77.0,"south":28.7,"north":28.5}"#,
        "\n",
    ))
    .unwrap();

    assert_eq!(snapshots[0]["viewport"]["west"], 77.0);
    assert_eq!(snapshots[0]["viewport"]["north"], 28.7);
    assert_eq!(snapshots[0]["count_text"], "2 Properties Found");
}
