mod analytics;
mod chart;
mod query;

pub use analytics::{AnalyticsRow, Dataset, Metric, COLUMNS};
pub use chart::{Axis, ChartLayout, ChartSpec, Legend, LineTrace};
pub use query::{LanguageCode, ParsedAnswer, QueryRequest, QueryResponse};
