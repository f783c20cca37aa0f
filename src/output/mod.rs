mod csv;
mod json;
mod text;

use crate::wavelet::Image;
use chrono::Utc;
use rolling_stats::Stats;
use serde::Serialize;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Result of a processing operation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputData {
    Signal { samples: Vec<f64> },
    Image(Image),
}

pub struct ProcessingOutput {
    /// Operation that produced the data, e.g. `pan_tompkins`
    pub operation: String,
    pub sampling_frequency: Option<f64>,
    pub data: OutputData,
}

impl ProcessingOutput {
    pub fn signal(operation: impl Into<String>, sampling_frequency: f64, samples: Vec<f64>) -> Self {
        Self {
            operation: operation.into(),
            sampling_frequency: Some(sampling_frequency),
            data: OutputData::Signal { samples },
        }
    }

    pub fn image(operation: impl Into<String>, image: Image) -> Self {
        Self {
            operation: operation.into(),
            sampling_frequency: None,
            data: OutputData::Image(image),
        }
    }

    pub fn values(&self) -> &[f64] {
        match &self.data {
            OutputData::Signal { samples } => samples,
            OutputData::Image(image) => image.as_slice(),
        }
    }

    pub fn summary(&self) -> Option<StatsSummary> {
        StatsSummary::from_values(self.values())
    }
}

/// Summary statistics over every output value
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl StatsSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut stats: Stats<f64> = Stats::new();
        for &v in values {
            stats.update(v);
        }
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

pub trait Formatter {
    fn format(&self, output: &ProcessingOutput) -> String;

    /// Line printed before the formatted output, if any
    fn header(&self, _output: &ProcessingOutput) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
