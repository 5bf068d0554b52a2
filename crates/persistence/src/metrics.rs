//! Database metrics collection.

use metrics::histogram;
use std::time::Instant;

/// Records the duration of a named database query.
pub fn record_query_duration(query_name: &str, duration_secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "query" => query_name.to_string()
    )
    .record(duration_secs);
}

/// Times a database operation; the elapsed duration is recorded when
/// `record` is called.
pub struct QueryTimer {
    query_name: String,
    start: Instant,
}

impl QueryTimer {
    /// Create a new timer for the given query name.
    pub fn new(query_name: impl Into<String>) -> Self {
        Self {
            query_name: query_name.into(),
            start: Instant::now(),
        }
    }

    /// Record the elapsed duration to metrics.
    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_query_duration(&self.query_name, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_creation() {
        let timer = QueryTimer::new("load_client");
        assert_eq!(timer.query_name, "load_client");
    }

    #[test]
    fn test_query_timer_records_without_panicking() {
        let timer = QueryTimer::new(String::from("add_client"));
        timer.record();
    }
}
