//! REPL command implementations.
//!
//! Each command mutates the shared [`HarnessState`] and reports through
//! stdout; errors come back as strings for the loop to print. Settings
//! mutations notify the controller directly so the cache reacts in the same
//! command, which keeps `stats` output deterministic for scripted sessions.

use std::path::PathBuf;

use gridlight_core::graph::{HostGraph, Point, SegmentId};
use gridlight_overlay::SkiaBackend;
use gridlight_types::Category;

use crate::samples;
use crate::state::HarnessState;

const FRAME_WIDTH: u32 = 800;
const FRAME_HEIGHT: u32 = 600;
const FRAME_MARGIN: f32 = 24.0;

pub async fn activate(state: &mut HarnessState) -> Result<(), String> {
    state.controller.set_active(true);
    println!(
        "active, {} segment(s) highlighted",
        state.controller.cache().len()
    );
    Ok(())
}

pub async fn deactivate(state: &mut HarnessState) -> Result<(), String> {
    state.controller.set_active(false);
    println!("inactive");
    Ok(())
}

/// Insert a sample segment and deliver the created-notification.
pub async fn add(state: &mut HarnessState, kind: &str) -> Result<(), String> {
    let slot = state.next_slot;
    let (facts, geometry) =
        samples::build(kind, slot).ok_or_else(|| format!("unknown kind '{kind}', see `kinds`"))?;
    state.next_slot += 1;

    let id = state.graph.insert(facts, geometry);
    state.controller.on_segment_created(id);

    let highlighted = state
        .controller
        .cache()
        .color_of(id)
        .map(|c| format!("highlighted {c}"))
        .unwrap_or_else(|| "not highlighted".to_string());
    println!("segment {id}: {kind}, {highlighted}");
    Ok(())
}

/// Release a segment and deliver the released-notification.
pub async fn release(state: &mut HarnessState, id: SegmentId) -> Result<(), String> {
    if !state.graph.release(id) {
        return Err(format!("no live segment with id {id}"));
    }
    state.controller.on_segment_released(id);
    println!("segment {id} released");
    Ok(())
}

pub async fn toggle(state: &mut HarnessState, category: &str) -> Result<(), String> {
    let category = parse_category(category)?;
    let settings = state.controller.settings();
    let value = !settings.snapshot().enabled(category);
    settings.set_category_enabled(category, value);
    state.controller.settings_changed();
    println!(
        "{} {}",
        category.name(),
        if value { "on" } else { "off" }
    );
    Ok(())
}

pub async fn hue(state: &mut HarnessState, category: &str, value: f32) -> Result<(), String> {
    let category = parse_category(category)?;
    if !value.is_finite() {
        return Err("hue must be a finite number".to_string());
    }
    state.controller.settings().set_category_hue(category, value);
    state.controller.settings_changed();
    println!("{} hue = {value}", category.name());
    Ok(())
}

pub async fn strength(state: &mut HarnessState, value: f32) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err("strength must be a non-negative number".to_string());
    }
    state.controller.settings().set_strength(value);
    state.controller.settings_changed();
    println!("strength = {value}");
    Ok(())
}

pub async fn width(state: &mut HarnessState, value: f32) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err("width must be a positive number".to_string());
    }
    state.controller.settings().set_width(value);
    state.controller.settings_changed();
    println!("width = {value}");
    Ok(())
}

pub async fn bridges(state: &mut HarnessState, on: bool) -> Result<(), String> {
    state.controller.settings().set_bridges(on);
    state.controller.settings_changed();
    println!("bridges {}", if on { "on" } else { "off" });
    Ok(())
}

pub async fn tunnels(state: &mut HarnessState, on: bool) -> Result<(), String> {
    state.controller.settings().set_tunnels(on);
    state.controller.settings_changed();
    println!("tunnels {}", if on { "on" } else { "off" });
    Ok(())
}

/// Print the current configuration, one knob per line.
pub async fn config(state: &mut HarnessState) -> Result<(), String> {
    let config = state.controller.settings().snapshot();
    println!("strength = {}", config.highlight_strength);
    println!("width    = {}", config.highlight_width);
    println!("bridges  = {}", config.highlight_bridges);
    println!("tunnels  = {}", config.highlight_tunnels);
    for category in Category::ALL {
        println!(
            "{:<16} {:<4} hue {:.2}  {}",
            category.name(),
            if config.enabled(category) { "on" } else { "off" },
            config.hue(category),
            config.color(category),
        );
    }
    Ok(())
}

pub async fn reset(state: &mut HarnessState) -> Result<(), String> {
    state.controller.settings().reset_to_defaults();
    state.controller.settings_changed();
    println!("settings reset to defaults");
    Ok(())
}

pub async fn stats(state: &mut HarnessState) -> Result<(), String> {
    println!(
        "active = {}, live segments = {}, highlighted = {}",
        state.controller.is_active(),
        state.graph.live_count(),
        state.controller.cache().len(),
    );
    Ok(())
}

pub async fn kinds() -> Result<(), String> {
    for kind in samples::KINDS {
        println!("{kind}");
    }
    Ok(())
}

/// Render one frame to a PNG, framed around the live segments.
pub async fn frame(state: &mut HarnessState, out: PathBuf) -> Result<(), String> {
    let (center, scale) = frame_view(state.graph.as_ref());
    let mut backend = SkiaBackend::new(FRAME_WIDTH, FRAME_HEIGHT, center, scale)
        .map_err(|e| e.to_string())?;

    let drawn = state
        .renderer
        .render_frame(&state.controller, state.graph.as_ref(), &mut backend);
    backend.save_png(&out).map_err(|e| e.to_string())?;
    println!("{} ribbon(s) -> {}", drawn, out.display());
    Ok(())
}

fn parse_category(name: &str) -> Result<Category, String> {
    Category::from_name(name).ok_or_else(|| {
        let known: Vec<_> = Category::ALL.iter().map(|c| c.name()).collect();
        format!("unknown category '{name}', expected one of: {}", known.join(", "))
    })
}

/// Fit the live geometry into the frame: center on the bounding box and
/// scale so everything fits with a margin. An empty graph gets a unit view.
fn frame_view(graph: &dyn HostGraph) -> (Point, f32) {
    let mut min = Point::new(f32::MAX, f32::MAX);
    let mut max = Point::new(f32::MIN, f32::MIN);
    let mut any = false;

    for id in 1..graph.capacity() {
        let Some(geometry) = graph.geometry(id) else {
            continue;
        };
        any = true;
        for p in [geometry.start, geometry.end] {
            min.x = min.x.min(p.x - geometry.half_width);
            min.y = min.y.min(p.y - geometry.half_width);
            max.x = max.x.max(p.x + geometry.half_width);
            max.y = max.y.max(p.y + geometry.half_width);
        }
    }
    if !any {
        return (Point::new(0.0, 0.0), 1.0);
    }

    let center = Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0);
    let span_x = (max.x - min.x).max(1.0);
    let span_y = (max.y - min.y).max(1.0);
    let scale = ((FRAME_WIDTH as f32 - 2.0 * FRAME_MARGIN) / span_x)
        .min((FRAME_HEIGHT as f32 - 2.0 * FRAME_MARGIN) / span_y);
    (center, scale)
}
