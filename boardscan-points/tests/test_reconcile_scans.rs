use boardscan_core::{
    Delimiter, HomeAirports, PointsStatus, segment_trips, sort_chronologically,
};
use boardscan_ingest::{LineTokenizer, TokenizerConfig, parse_compact_text};
use boardscan_points::{MatchPolicy, PointsMatcher, load_ledger};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

fn scanned_records() -> Vec<boardscan_core::FlightRecord> {
    let text = std::fs::read_to_string(fixture("scans_2024.txt")).unwrap();
    let tokenizer = LineTokenizer::new(2024, &TokenizerConfig::default()).unwrap();
    tokenizer.tokenize_text(&text)
}

/// One record per non-blank line, in order, with unreadable lines kept as sentinels.
#[test]
fn test_scans_tokenize_one_record_per_line() {
    let records = scanned_records();
    assert_eq!(records.len(), 8);

    assert_eq!(
        records[0].render(Delimiter::Pipe),
        "241222|K|ZQN|AKL|NZ|0628|357"
    );
    assert_eq!(records[1].traveler_code.as_deref(), Some("S"));
    assert_eq!(records[6].calendar_date.to_string(), "241231");
    assert_eq!(
        records[7].render(Delimiter::Pipe),
        "Err|Err|Err|Err|Err|Err|Err"
    );
}

/// Ledger reconciliation against the real fixture: malformed row skipped,
/// matches tolerant of case, zero padding, and a two-day gap.
#[test]
fn test_points_flags_from_fixture_ledger() {
    let load = load_ledger(fixture("points_paid.csv")).unwrap();
    assert_eq!(load.ledger.len(), 4);
    assert_eq!(load.skipped.len(), 1);

    let matcher = PointsMatcher::new(load.ledger, MatchPolicy::default());
    let flags: Vec<PointsStatus> = matcher
        .annotate_all(scanned_records())
        .iter()
        .map(|r| r.points_matched())
        .collect();

    use PointsStatus::{Matched, Unmatched};
    assert_eq!(
        flags,
        vec![Unmatched, Matched, Matched, Unmatched, Matched, Matched, Unmatched, Unmatched]
    );
}

/// Segmentation over scans: fragments away from home are dropped, the
/// Shanghai round trip closes, and the Bangkok leg is left open.
#[test]
fn test_trips_from_scans() {
    let mut records = scanned_records();
    sort_chronologically(&mut records);

    let seg = segment_trips(&records, &HomeAirports::default());
    assert_eq!(seg.trips.len(), 1);
    let trip = &seg.trips[0];
    assert_eq!(trip.route(), "HKG→PVG→HKG");
    assert_eq!(trip.duration_days, Some(5));
    assert_eq!(trip.dwell_days("PVG"), Some(5));

    let open = seg.open_trip.expect("Bangkok trip never returns home");
    assert_eq!(open.start_date.to_string(), "241231");
}

/// Compact exports spanning a new year segment into two trips.
#[test]
fn test_trips_from_compact_rows() {
    let text = std::fs::read_to_string(fixture("trips_compact.txt")).unwrap();
    let mut records = parse_compact_text(&text);
    assert_eq!(records.len(), 8);
    sort_chronologically(&mut records);

    let seg = segment_trips(&records, &HomeAirports::default());
    assert!(seg.open_trip.is_none());
    assert_eq!(seg.trips.len(), 2);

    let first = &seg.trips[0];
    assert_eq!(first.route(), "HKG→PVG→HKG");
    assert_eq!(first.duration_days, Some(6));
    assert_eq!(first.stop_count, 1);

    let second = &seg.trips[1];
    assert_eq!(second.route(), "SZX→NRT→ICN→NRT→HKG");
    assert_eq!(second.duration_days, Some(9));
    assert_eq!(second.stop_count, 2);
    assert_eq!(second.dwell_days("NRT"), Some(7));
    assert_eq!(second.dwell_days("ICN"), Some(2));
}
