//! Text reports for the terminal.

use boardscan_core::{CompactDate, Field, OpenTrip, TravelStats, TripSummary};
use chrono::Month;

fn long_date(date: &Field<CompactDate>) -> String {
    match date.value() {
        Some(d) => d.date().format("%Y-%m-%d").to_string(),
        None => date.to_string(),
    }
}

fn duration(trip: &TripSummary) -> String {
    match trip.duration_days {
        Some(days) => format!("{days} days"),
        None => boardscan_core::SENTINEL.to_string(),
    }
}

fn dwell(trip: &TripSummary) -> String {
    trip.dwell_by_location
        .iter()
        .map(|(code, days)| format!("{code}:{days}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Markdown table, one row per closed trip.
pub fn trips_markdown(trips: &[TripSummary]) -> String {
    let mut s = String::new();
    s.push_str("| Start Date | End Date | Itinerary | Duration | Days at Locations |\n");
    s.push_str("|:-----------|:---------|:----------|:---------|:------------------|\n");
    for t in trips {
        s.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            long_date(&t.start_date),
            long_date(&t.end_date),
            t.route(),
            duration(t),
            dwell(t),
        ));
    }
    s
}

pub fn open_trip_note(open: &OpenTrip) -> String {
    let route = open
        .itinerary
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("→");
    format!(
        "Trip from {} has not returned home: {}",
        long_date(&open.start_date),
        route
    )
}

pub fn stats_report(stats: &TravelStats, top_airports: usize) -> String {
    let mut s = String::new();

    s.push_str("## Airlines\n\n");
    for (code, n) in &stats.airlines {
        s.push_str(&format!("- {code}: {n}\n"));
    }

    s.push_str("\n## Busiest airports\n\n");
    for (code, n) in stats.airports.iter().take(top_airports) {
        s.push_str(&format!("- {code}: {n}\n"));
    }

    s.push_str("\n## Monthly travel frequency\n\n");
    for (month, n) in &stats.monthly {
        let name = u8::try_from(*month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name().to_string())
            .unwrap_or_else(|| month.to_string());
        s.push_str(&format!("- {name}: {n}\n"));
    }
    s
}
