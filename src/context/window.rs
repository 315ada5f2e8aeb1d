use chrono::{Local, NaiveDate};
use core::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The `(today, yesterday)` date pair every time-scoped query of a run is evaluated against.
///
/// Computed once at run start and never re-derived, even if the wall clock crosses midnight
/// while the run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingWindow {
    today: NaiveDate,
    yesterday: NaiveDate,
}

impl ReportingWindow {
    /// A window ending at the current local date.
    #[must_use]
    pub fn now() -> Self {
        Self::ending(Local::now().date_naive())
    }

    /// A window ending at `today`.
    #[must_use]
    pub fn ending(today: NaiveDate) -> Self {
        Self {
            today,
            yesterday: today.pred_opt().unwrap_or(NaiveDate::MIN),
        }
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub const fn yesterday(&self) -> NaiveDate {
        self.yesterday
    }

    /// `today` as `YYYY-MM-DD`.
    #[must_use]
    pub fn today_key(&self) -> String {
        self.today.format(DATE_FORMAT).to_string()
    }

    /// `yesterday` as `YYYY-MM-DD`, the key telemetry snapshots are indexed by.
    #[must_use]
    pub fn yesterday_key(&self) -> String {
        self.yesterday.format(DATE_FORMAT).to_string()
    }
}

impl Display for ReportingWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}, {})", self.yesterday_key(), self.today_key())
    }
}
