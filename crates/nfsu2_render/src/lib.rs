use std::fmt::Write as _;

use nfsu2_core::layout::FileLayout;
use nfsu2_core::{CarSlotEntry, Snapshot};
use serde_json::{Map as JsonMap, Value as JsonValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    pub verbose: bool,
}

/// The three-line profile summary, followed by one line per used car when
/// `verbose` is set.
pub fn render_summary_text(snapshot: &Snapshot, options: TextRenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Profile Name: {}", snapshot.profile_name);
    let _ = writeln!(out, "Money: {}", snapshot.money);
    let _ = write!(out, "Car Slots Used: {}", snapshot.car_slots_used);

    if options.verbose {
        for slot in snapshot.slots.iter().filter(|slot| slot.used) {
            let state = slot
                .performance
                .map(|p| p.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let _ = write!(out, "\n  Car {}: {}", slot.index + 1, state);
        }
    }

    out
}

pub fn render_json_full(snapshot: &Snapshot) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert(
        "profile_name".to_string(),
        JsonValue::String(snapshot.profile_name.clone()),
    );
    out.insert("money".to_string(), JsonValue::from(snapshot.money));
    out.insert(
        "car_slots_used".to_string(),
        JsonValue::from(snapshot.car_slots_used),
    );
    out.insert("file_size".to_string(), JsonValue::from(snapshot.file_size));
    out.insert(
        "slots".to_string(),
        JsonValue::Array(snapshot.slots.iter().map(slot_to_json).collect()),
    );
    JsonValue::Object(out)
}

fn slot_to_json(slot: &CarSlotEntry) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("index".to_string(), JsonValue::from(slot.index));
    m.insert("used".to_string(), JsonValue::Bool(slot.used));
    m.insert(
        "performance".to_string(),
        match slot.performance {
            Some(state) => JsonValue::String(state.to_string()),
            None => JsonValue::Null,
        },
    );
    JsonValue::Object(m)
}

pub fn render_layout_json(layout: &FileLayout) -> JsonValue {
    let validation = layout.validate();

    let mut out = JsonMap::new();
    out.insert("file_len".to_string(), JsonValue::from(layout.file_len));
    out.insert(
        "validation_ok".to_string(),
        JsonValue::Bool(validation.is_ok()),
    );
    out.insert(
        "validation_error".to_string(),
        match validation {
            Ok(()) => JsonValue::Null,
            Err(e) => JsonValue::String(e.message),
        },
    );
    out.insert(
        "fields".to_string(),
        JsonValue::Array(
            layout
                .fields
                .iter()
                .map(|field| {
                    let mut m = JsonMap::new();
                    m.insert("id".to_string(), JsonValue::String(field.id.to_string()));
                    m.insert("start".to_string(), JsonValue::from(field.range.start));
                    m.insert("end".to_string(), JsonValue::from(field.range.end));
                    m.insert("len".to_string(), JsonValue::from(field.range.len()));
                    JsonValue::Object(m)
                })
                .collect(),
        ),
    );
    JsonValue::Object(out)
}

pub fn render_layout_text(layout: &FileLayout) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "file_len={:#x}", layout.file_len);
    for field in &layout.fields {
        let _ = writeln!(
            out,
            "{:<18} {:#07x}..{:#07x} ({} bytes)",
            field.id.to_string(),
            field.range.start,
            field.range.end,
            field.range.len()
        );
    }
    match layout.validate() {
        Ok(()) => out.push_str("validation=ok"),
        Err(e) => {
            let _ = write!(out, "validation=failed: {}", e.message);
        }
    }
    out
}
