use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A reporting window over whole calendar days.
///
/// Spans `from` at 00:00:00 through `until` at 23:59:59, both bounds
/// inclusive at second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    from: NaiveDate,
    until: NaiveDate,
}

impl ReportWindow {
    pub fn new(from: NaiveDate, until: NaiveDate) -> Self {
        Self { from, until }
    }

    /// First instant of the window: `from` at 00:00:00.
    pub fn start(&self) -> NaiveDateTime {
        self.from.and_hms_opt(0, 0, 0).expect("midnight is valid")
    }

    /// Last instant of the window: `until` at 23:59:59.
    pub fn end(&self) -> NaiveDateTime {
        self.until
            .and_hms_opt(23, 59, 59)
            .expect("23:59:59 is valid")
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start() <= at && at <= self.end()
    }
}
