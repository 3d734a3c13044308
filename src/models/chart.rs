use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Plotly figure: line traces plus layout. Rendered as-is by the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub data: Vec<LineTrace>,
    pub layout: ChartLayout,
}

impl ChartSpec {
    /// Names of the plotted series, in trace order.
    pub fn series_names(&self) -> Vec<&str> {
        self.data.iter().map(|t| t.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTrace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub mode: String,
    pub name: String,
    pub legendgroup: String,
    pub showlegend: bool,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub hovertemplate: String,
}

impl LineTrace {
    pub fn new(name: &str, x: Vec<NaiveDate>, y: Vec<f64>) -> Self {
        Self {
            trace_type: "scatter".to_string(),
            mode: "lines".to_string(),
            name: name.to_string(),
            legendgroup: name.to_string(),
            showlegend: true,
            x,
            y,
            hovertemplate: format!("Metric={}<br>date=%{{x}}<br>Count=%{{y}}<extra></extra>", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub title: TitleText,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleText {
    pub text: String,
}

impl From<&str> for TitleText {
    fn from(value: &str) -> Self {
        Self { text: value.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: TitleText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: TitleText,
    pub tracegroupgap: u32,
}
