use nfsu2_core::layout::{CAR_SLOT_SIZE, CAR_SLOTS_OFFSET, PROFILE_NAME_OFFSET};
use nfsu2_core::{PerformanceMode, SaveRecord};
use nfsu2_render::{
    TextRenderOptions, render_json_full, render_layout_json, render_layout_text,
    render_summary_text,
};

const FIXTURE_LEN: usize = 0xE000;

fn fixture_record() -> SaveRecord {
    let mut bytes = vec![0u8; FIXTURE_LEN];
    bytes[..4].copy_from_slice(b"20CM");
    bytes[4..6].copy_from_slice(&(FIXTURE_LEN as u16).to_le_bytes());
    bytes[PROFILE_NAME_OFFSET..PROFILE_NAME_OFFSET + 6].copy_from_slice(b"Nikki\0");
    bytes[CAR_SLOTS_OFFSET] = 0x01;
    bytes[CAR_SLOTS_OFFSET + 3 * CAR_SLOT_SIZE] = 0x01;

    let mut record = SaveRecord::from_bytes(bytes).expect("fixture should load");
    record.set_money(42_000).unwrap();
    record.change_car_performance(3, PerformanceMode::Max).unwrap();
    record
}

#[test]
fn summary_text_matches_classic_format() {
    let snapshot = fixture_record().snapshot().unwrap();
    let text = render_summary_text(&snapshot, TextRenderOptions::default());
    assert_eq!(text, "Profile Name: Nikki\nMoney: 42000\nCar Slots Used: 2");
}

#[test]
fn verbose_summary_lists_used_cars() {
    let snapshot = fixture_record().snapshot().unwrap();
    let text = render_summary_text(&snapshot, TextRenderOptions { verbose: true });
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[3], "  Car 1: Nilled");
    assert_eq!(lines[4], "  Car 4: Maxed");
}

#[test]
fn full_json_uses_fixed_key_order() {
    let snapshot = fixture_record().snapshot().unwrap();
    let value = render_json_full(&snapshot);
    let keys: Vec<&str> = value
        .as_object()
        .expect("json should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec!["profile_name", "money", "car_slots_used", "file_size", "slots"]
    );

    assert_eq!(value["money"], 42_000);
    assert_eq!(value["slots"][0]["performance"], "Nilled");
    assert!(value["slots"][1]["performance"].is_null());
    assert_eq!(value["slots"][3]["used"], true);
    assert_eq!(value["slots"][3]["performance"], "Maxed");
}

#[test]
fn layout_json_reports_fields_and_validation() {
    let layout = fixture_record().layout();
    let value = render_layout_json(&layout);
    assert_eq!(value["file_len"], FIXTURE_LEN);
    assert_eq!(value["validation_ok"], true);
    assert!(value["validation_error"].is_null());

    let fields = value["fields"].as_array().expect("fields should be an array");
    assert_eq!(fields[0]["id"], "magic");
    assert_eq!(fields[0]["len"], 4);
    let money = fields
        .iter()
        .find(|f| f["id"] == "money")
        .expect("money field");
    assert_eq!(money["start"], 0xA16A);
}

#[test]
fn layout_text_flags_short_file() {
    let mut bytes = vec![0u8; 0x100];
    bytes[..4].copy_from_slice(b"20CM");
    bytes[4..6].copy_from_slice(&0x100u16.to_le_bytes());
    let record = SaveRecord::from_bytes(bytes).unwrap();

    let text = render_layout_text(&record.layout());
    assert!(text.starts_with("file_len=0x100"));
    assert!(text.contains("money"));
    assert!(text.lines().last().unwrap().starts_with("validation=failed"));
}
