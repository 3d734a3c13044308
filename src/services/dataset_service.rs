use std::f64::consts::PI;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use csv::{ReaderBuilder, Writer};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::{info, warn};

use crate::config::DataSource;
use crate::models::{AnalyticsRow, Dataset};

pub const MOCK_SEED: u64 = 42;
pub const MOCK_DAYS: u32 = 365;

const PAGE_PATHS: [&str; 5] = ["/home", "/product", "/about", "/contact", "/blog"];
const SOURCES: [&str; 5] = ["google", "direct", "facebook", "twitter", "bing"];
const MEDIUMS: [&str; 5] = ["organic", "(none)", "cpc", "referral", "social"];
const DEVICE_CATEGORIES: [&str; 3] = ["desktop", "mobile", "tablet"];

const BASE_SESSIONS: f64 = 1000.0;
const WEEKLY_AMPLITUDE: f64 = 200.0;
const NOISE_STD_DEV: f64 = 100.0;

pub fn mock_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

/// Load a CSV export with a header row into a dataset.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open dataset: {}", path.display()))?;

    let mut rows = Vec::new();
    for (line_num, result) in reader.deserialize::<AnalyticsRow>().enumerate() {
        // header is line 1
        let row = result.with_context(|| {
            format!("Invalid row at line {} of {}", line_num + 2, path.display())
        })?;

        if !(0.0..=1.0).contains(&row.bounce_rate) {
            anyhow::bail!(
                "bounce_rate {} out of range [0, 1] at line {} of {}",
                row.bounce_rate,
                line_num + 2,
                path.display()
            );
        }
        rows.push(row);
    }

    if rows.is_empty() {
        anyhow::bail!("Dataset {} contains no rows", path.display());
    }

    Ok(Dataset::new(rows))
}

pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create dataset file: {}", path.display()))?;
    for row in dataset.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn gaussian(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}

fn pick(rng: &mut StdRng, choices: &[&str]) -> String {
    choices.choose(rng).copied().unwrap_or_default().to_string()
}

/// Deterministic synthetic traffic: a weekly sine wave around 1000 sessions
/// with normally distributed noise, and the other metrics derived from independent draws.
pub fn generate_mock_dataset(seed: u64, start: NaiveDate, days: u32) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let span = 2.0 * PI * f64::from(days) / 7.0;
    let step = if days > 1 { span / f64::from(days - 1) } else { 0.0 };

    let rows = (0..days)
        .map(|i| {
            let weekly = (step * f64::from(i)).sin() * WEEKLY_AMPLITUDE;
            let daily_base = |rng: &mut StdRng| BASE_SESSIONS + weekly + gaussian(rng, 0.0, NOISE_STD_DEV);

            let sessions = daily_base(&mut rng) as i64;
            let users = (daily_base(&mut rng) * rng.random_range(0.8..0.9)) as i64;
            let pageviews = (daily_base(&mut rng) * rng.random_range(2.0..3.0)) as i64;
            let bounce_rate = (rng.random_range(0.25..0.40) * 100.0_f64).round() / 100.0;
            let page_path = pick(&mut rng, &PAGE_PATHS);
            let source = pick(&mut rng, &SOURCES);
            let medium = pick(&mut rng, &MEDIUMS);
            let device_category = pick(&mut rng, &DEVICE_CATEGORIES);
            let event_count = rng.random_range(300..700);
            let active_users = (daily_base(&mut rng) * rng.random_range(0.85..0.95)) as i64;
            let avg_session_duration = rng.random_range(100..200);

            AnalyticsRow {
                date: start + Days::new(u64::from(i)),
                sessions: sessions.max(100) as u64,
                users: users.max(80) as u64,
                pageviews: pageviews.max(200) as u64,
                bounce_rate,
                page_path,
                source,
                medium,
                device_category,
                event_count,
                active_users: active_users.max(80) as u64,
                avg_session_duration,
            }
        })
        .collect();

    Dataset::new(rows)
}

/// Resolve the configured data source into the process-wide dataset.
pub fn load_from_source(source: &DataSource) -> Result<Dataset> {
    match source {
        DataSource::Live { path } => {
            info!("Loading analytics data from {}", path.display());
            load_dataset(path)
        }
        DataSource::Mock { path } if path.exists() => {
            info!("Loading mock analytics data from {}", path.display());
            load_dataset(path)
        }
        DataSource::Mock { path } => {
            info!("Mock data file {} not found, generating {} days", path.display(), MOCK_DAYS);
            let dataset = generate_mock_dataset(MOCK_SEED, mock_start_date(), MOCK_DAYS);
            if let Err(e) = write_dataset(path, &dataset) {
                warn!("Could not save generated mock data: {:#}", e);
            }
            Ok(dataset)
        }
    }
}
