use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Column names in file and prompt order.
pub const COLUMNS: [&str; 12] = [
    "date",
    "sessions",
    "users",
    "pageviews",
    "bounce_rate",
    "pagePath",
    "source",
    "medium",
    "deviceCategory",
    "eventCount",
    "activeUsers",
    "avgSessionDuration",
];

/// One day of website analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsRow {
    #[serde(deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    pub sessions: u64,
    pub users: u64,
    pub pageviews: u64,
    /// Fraction in [0, 1]
    pub bounce_rate: f64,
    #[serde(rename = "pagePath")]
    pub page_path: String,
    pub source: String,
    pub medium: String,
    #[serde(rename = "deviceCategory")]
    pub device_category: String,
    #[serde(rename = "eventCount")]
    pub event_count: u64,
    #[serde(rename = "activeUsers")]
    pub active_users: u64,
    /// Seconds
    #[serde(rename = "avgSessionDuration")]
    pub avg_session_duration: u64,
}

impl AnalyticsRow {
    /// Cell values rendered as text, in `COLUMNS` order.
    pub fn cells(&self) -> [String; 12] {
        [
            self.date.format("%Y-%m-%d").to_string(),
            self.sessions.to_string(),
            self.users.to_string(),
            self.pageviews.to_string(),
            self.bounce_rate.to_string(),
            self.page_path.clone(),
            self.source.clone(),
            self.medium.clone(),
            self.device_category.clone(),
            self.event_count.to_string(),
            self.active_users.to_string(),
            self.avg_session_duration.to_string(),
        ]
    }
}

// Exports written by dataframe tools may carry a midnight timestamp after the date.
fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw
        .trim()
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

/// Read-only table of analytics rows ordered by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<AnalyticsRow>,
}

impl Dataset {
    pub fn new(mut rows: Vec<AnalyticsRow>) -> Self {
        rows.sort_by_key(|r| r.date);
        Self { rows }
    }

    pub fn rows(&self) -> &[AnalyticsRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// First and last day covered, if any rows exist.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.rows.first()?.date, self.rows.last()?.date))
    }
}

/// Numeric columns that can be plotted over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Sessions,
    Users,
    Pageviews,
    BounceRate,
    EventCount,
    ActiveUsers,
}

impl Metric {
    pub fn column(self) -> &'static str {
        match self {
            Metric::Sessions => "sessions",
            Metric::Users => "users",
            Metric::Pageviews => "pageviews",
            Metric::BounceRate => "bounce_rate",
            Metric::EventCount => "eventCount",
            Metric::ActiveUsers => "activeUsers",
        }
    }

    pub fn value(self, row: &AnalyticsRow) -> f64 {
        match self {
            Metric::Sessions => row.sessions as f64,
            Metric::Users => row.users as f64,
            Metric::Pageviews => row.pageviews as f64,
            Metric::BounceRate => row.bounce_rate,
            Metric::EventCount => row.event_count as f64,
            Metric::ActiveUsers => row.active_users as f64,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}
