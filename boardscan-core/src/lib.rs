//! boardscan-core: flight record model, date codec, and trip segmentation

pub mod config;
pub mod date_codec;
pub mod field;
pub mod record;
pub mod stats;
pub mod trips;

pub use config::{ConfigError, HomeAirports, validate_year};
pub use date_codec::{CompactDate, day_of_year_to_compact_date, days_between, parse_compact_date};
pub use field::{Field, SENTINEL};
pub use record::{Delimiter, FlightRecord, PointsStatus};
pub use stats::TravelStats;
pub use trips::{
    OpenTrip, Segmentation, TripSegmenter, TripSummary, segment_trips, sort_chronologically,
};
