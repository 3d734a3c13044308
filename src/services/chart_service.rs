use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Axis, ChartLayout, ChartSpec, Dataset, Legend, LineTrace, Metric};

pub const CHART_TITLE: &str = "Trends Over Time";

/// Phrases that make a question a trend question
const TRIGGERS: [&str; 2] = ["trend", "over time"];

/// Keyword rules, evaluated in this order. The output keeps this order, not
/// the order in which the question mentions the metrics.
const METRIC_RULES: [(&str, Metric); 6] = [
    ("sessions", Metric::Sessions),
    ("users", Metric::Users),
    ("pageviews", Metric::Pageviews),
    ("bounce rate", Metric::BounceRate),
    ("event count", Metric::EventCount),
    ("active users", Metric::ActiveUsers),
];

/// Plotted when a trend question names no known metric
pub const DEFAULT_METRICS: [Metric; 3] = [Metric::Sessions, Metric::Users, Metric::Pageviews];

/// True when `keyword` occurs somewhere in `query` outside every occurrence of
/// a longer rule keyword ("users" inside "active users" does not count).
fn mentions(query: &str, keyword: &str) -> bool {
    let longer: Vec<(usize, usize)> = METRIC_RULES
        .iter()
        .filter(|(other, _)| other.len() > keyword.len() && other.contains(keyword))
        .flat_map(|(other, _)| query.match_indices(other).map(|(start, m)| (start, start + m.len())))
        .collect();

    query.match_indices(keyword).any(|(start, m)| {
        let end = start + m.len();
        !longer.iter().any(|&(s, e)| s <= start && end <= e)
    })
}

/// Decide which metrics to chart for a question, or `None` when the question
/// is not about a trend.
pub fn select_metrics(english_query: &str) -> Option<Vec<Metric>> {
    let query = english_query.to_lowercase();
    if !TRIGGERS.iter().any(|t| query.contains(t)) {
        return None;
    }

    let metrics: Vec<Metric> = METRIC_RULES
        .iter()
        .filter(|(keyword, _)| mentions(&query, keyword))
        .map(|(_, metric)| *metric)
        .collect();

    if metrics.is_empty() {
        Some(DEFAULT_METRICS.to_vec())
    } else {
        Some(metrics)
    }
}

/// Line chart with the date on the x axis and one series per metric.
pub fn build_trend_chart(dataset: &Dataset, metrics: &[Metric]) -> ChartSpec {
    let dates: Vec<NaiveDate> = dataset.rows().iter().map(|r| r.date).collect();

    let data = metrics
        .iter()
        .map(|metric| {
            let values = dataset.rows().iter().map(|r| metric.value(r)).collect();
            LineTrace::new(metric.column(), dates.clone(), values)
        })
        .collect();

    ChartSpec {
        data,
        layout: ChartLayout {
            title: CHART_TITLE.into(),
            xaxis: Axis { title: "date".into() },
            yaxis: Axis { title: "Count".into() },
            legend: Legend {
                title: "Metric".into(),
                tracegroupgap: 0,
            },
        },
    }
}

/// Chart for a trend question, `None` for anything else.
pub fn select_chart(english_query: &str, dataset: &Dataset) -> Option<ChartSpec> {
    let metrics = select_metrics(english_query)?;
    debug!("Trend question detected, charting {:?}", metrics);
    Some(build_trend_chart(dataset, &metrics))
}
