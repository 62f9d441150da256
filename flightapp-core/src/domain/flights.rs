// flightapp-core/src/domain/flights.rs
//
// The canned queries and the records they produce. The SQL text is a fixed
// contract and must stay byte-for-byte as is.

use serde::Serialize;

/// Total number of rows in `Flights`, in a single `count` column.
pub const FLIGHT_COUNT_QUERY: &str = "SELECT COUNT(*) AS count FROM Flights;";

/// One `(day, count)` row per weekday group.
pub const FLIGHTS_BY_DAY_QUERY: &str = "SELECT w.day_of_week as day, COUNT(*) as count FROM Flights f, Weekdays w WHERE f.day_of_week_id = w.did GROUP BY w.did, w.day_of_week;";

/// `(name, city, delay)` rows, largest summed departure delay first.
pub const DELAY_RANKING_QUERY: &str = "SELECT C.name AS name, F.origin_city AS city, SUM(F.departure_delay) AS delay FROM FLIGHTS AS F, CARRIERS AS C WHERE F.carrier_id = C.cid GROUP BY F.origin_city, C.name, F.origin_city ORDER BY delay DESC;";

/// Zero-based position of the "fifth slowest" row in the delay ranking.
pub const FIFTH_SLOWEST_INDEX: usize = 4;

/// Sentinel printed when the count query fails.
pub const FAILED_COUNT: i64 = -1;

/// Sentinel printed when the delay ranking query fails.
pub const NO_RESULT: &str = "no result";

/// How a NULL day or carrier name is printed.
pub const NULL_TEXT: &str = "null";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub day: String,
    pub count: i64,
}

/// Structured form of the three report sections. `None` marks a failed query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct FlightReport {
    pub total_flights: Option<i64>,
    pub by_day: Option<Vec<DayCount>>,
    pub fifth_slowest_airline: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl FlightReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn count_line(count: i64) -> String {
    format!("Rows in Flights table: {}", count)
}

pub fn day_line(day: &str, count: i64) -> String {
    format!("Flights on {}: {}", day, count)
}

pub fn fifth_slowest_line(name: &str) -> String {
    format!("Fifth slowest airline is: {}", name)
}
