/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (permit expiry, licence validity) carry no time zone.
pub type Date = chrono::NaiveDate;
