use super::{Formatter, OutputData, ProcessingOutput};

/// Human-readable summary; verbose mode appends every value
pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, output: &ProcessingOutput) -> String {
        let shape = match &output.data {
            OutputData::Signal { samples } => format!("{} samples", samples.len()),
            OutputData::Image(image) => format!("{}x{} image", image.rows(), image.cols()),
        };

        let mut text = match output.summary() {
            Some(s) => format!(
                "{}: {} mean: {:.6} std: {:.6} min: {:.6} max: {:.6}",
                output.operation, shape, s.mean, s.std_dev, s.min, s.max
            ),
            None => format!("{}: {}", output.operation, shape),
        };

        if self.verbose {
            match &output.data {
                OutputData::Signal { samples } => {
                    for v in samples {
                        text.push_str(&format!("\n{:.6}", v));
                    }
                }
                OutputData::Image(image) => {
                    for r in 0..image.rows() {
                        let row: Vec<String> = image.row(r).iter().map(|v| format!("{:.6}", v)).collect();
                        text.push('\n');
                        text.push_str(&row.join(" "));
                    }
                }
            }
        }

        text
    }
}
