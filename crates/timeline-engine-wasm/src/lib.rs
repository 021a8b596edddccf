//! WASM bindings for timeline-engine.
//!
//! Exposes the layout pass, jump anchors and the "now" indicator to a browser
//! host via `wasm-bindgen`. Complex values cross the boundary as JSON strings:
//! the raw submission export goes in, layout JSON comes out.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p timeline-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/timeline_engine_wasm.wasm
//! ```

use serde::Serialize;
use timeline_engine::event::sort_by_submission_time;
use timeline_engine::intake::parse_export;
use timeline_engine::{
    day_anchors, layout, now_position, CivilDateTime, Event, GridConfig, TimelineEntry,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON. Keys are
// snake_case throughout, matching the nested `TimelineEntry` and the CLI.
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct LayoutDto {
    entries: Vec<TimelineEntry>,
    max_column: usize,
    total_width: i64,
    total_days: i64,
    grid_height: i64,
    skipped: Vec<String>,
}

#[derive(Serialize)]
struct NowDto {
    now: String,
    top: Option<i64>,
}

// ---------------------------------------------------------------------------
// Helpers: plain `Result<_, String>` so they can be tested off-wasm
// ---------------------------------------------------------------------------

/// Parse grid settings; an empty or absent string means the defaults.
fn parse_config(config_json: Option<&str>, compact: bool) -> Result<GridConfig, String> {
    let config = match config_json.map(str::trim).filter(|s| !s.is_empty()) {
        Some(json) => serde_json::from_str::<GridConfig>(json)
            .map_err(|e| format!("Invalid grid config JSON: {}", e))?,
        None => GridConfig::default(),
    };
    let config = if compact {
        config.with_compact_columns()
    } else {
        config
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Normalize an export, keeping what parses and describing what doesn't.
fn parse_events(export_json: &str) -> Result<(Vec<Event>, Vec<String>), String> {
    let intakes = parse_export(export_json).map_err(|e| e.to_string())?;
    let mut events = Vec::with_capacity(intakes.len());
    let mut skipped = Vec::new();
    for intake in intakes {
        match intake.event {
            Ok(event) => events.push(event),
            Err(err) => skipped.push(format!("{}: {}", intake.submission_id, err)),
        }
    }
    sort_by_submission_time(&mut events);
    Ok((events, skipped))
}

fn layout_json(export_json: &str, config: &GridConfig) -> Result<String, String> {
    let (events, skipped) = parse_events(export_json)?;
    let timeline = layout(&events, config).map_err(|e| e.to_string())?;
    let dto = LayoutDto {
        entries: timeline.entries(config),
        max_column: timeline.max_column,
        total_width: timeline.total_width,
        total_days: timeline.total_days,
        grid_height: config.grid_height(),
        skipped,
    };
    serde_json::to_string(&dto).map_err(|e| format!("Serialization error: {}", e))
}

fn now_json(now: CivilDateTime, config: &GridConfig) -> Result<String, String> {
    let dto = NowDto {
        now: now.to_string(),
        top: now_position(&now, config),
    };
    serde_json::to_string(&dto).map_err(|e| format!("Serialization error: {}", e))
}

fn to_js(err: String) -> JsValue {
    JsValue::from_str(&err)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Lay out every event in a raw submission export.
///
/// Returns a JSON string `{entries, max_column, total_width, total_days,
/// grid_height, skipped}`. `config_json` is an optional partial `GridConfig`
/// object; `compact` selects the narrow-viewport column metrics.
#[wasm_bindgen(js_name = "layoutExport")]
pub fn layout_export(
    export_json: &str,
    config_json: Option<String>,
    compact: bool,
) -> Result<String, JsValue> {
    let config = parse_config(config_json.as_deref(), compact).map_err(to_js)?;
    layout_json(export_json, &config).map_err(to_js)
}

/// One jump anchor per grid day, flagging the day that contains `now_millis`.
#[wasm_bindgen(js_name = "dayAnchors")]
pub fn day_anchors_at(config_json: Option<String>, now_millis: f64) -> Result<String, JsValue> {
    let config = parse_config(config_json.as_deref(), false).map_err(to_js)?;
    let now = CivilDateTime::from_timestamp_millis(now_millis as i64)
        .map_err(|e| to_js(e.to_string()))?;
    let anchors = day_anchors(&config, now.date());
    serde_json::to_string(&anchors)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Position of the "now" indicator for a JavaScript timestamp (`Date.now()`).
///
/// Returns a JSON string `{now, top}`; `top` is `null` when not shown.
#[wasm_bindgen(js_name = "nowPosition")]
pub fn now_position_at(config_json: Option<String>, now_millis: f64) -> Result<String, JsValue> {
    let config = parse_config(config_json.as_deref(), false).map_err(to_js)?;
    let now = CivilDateTime::from_timestamp_millis(now_millis as i64)
        .map_err(|e| to_js(e.to_string()))?;
    now_json(now, &config).map_err(to_js)
}
