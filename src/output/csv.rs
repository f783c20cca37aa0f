use super::{Formatter, OutputData, ProcessingOutput};

/// One line per sample (`index,value`) or per image row (comma-separated columns)
///
/// Signals get an `index,value` header; image rows are bare matrix rows.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, output: &ProcessingOutput) -> String {
        match &output.data {
            OutputData::Signal { samples } => samples
                .iter()
                .enumerate()
                .map(|(i, v)| format!("{},{}", i, v))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputData::Image(image) => (0..image.rows())
                .map(|r| {
                    image
                        .row(r)
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn header(&self, output: &ProcessingOutput) -> Option<&'static str> {
        match output.data {
            OutputData::Signal { .. } => Some("index,value"),
            OutputData::Image(_) => None,
        }
    }
}
