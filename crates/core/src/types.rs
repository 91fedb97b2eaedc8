/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates carried by fixture records (no time component).
pub type Date = chrono::NaiveDate;
