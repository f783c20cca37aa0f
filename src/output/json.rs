use super::{Formatter, ProcessingOutput, iso8601_timestamp};
use serde_json::json;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, output: &ProcessingOutput) -> String {
        json!({
            "ts": iso8601_timestamp(),
            "operation": output.operation,
            "sampling_frequency": output.sampling_frequency,
            "summary": output.summary(),
            "data": output.data,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_signal() {
        let output = ProcessingOutput::signal("pan_tompkins", 250.0, vec![1.0, 2.0]);
        let value: Value = serde_json::from_str(&JsonFormatter.format(&output)).unwrap();
        assert_eq!(value["operation"], "pan_tompkins");
        assert_eq!(value["sampling_frequency"], 250.0);
        assert_eq!(value["data"]["kind"], "signal");
        assert_eq!(value["data"]["samples"].as_array().unwrap().len(), 2);
        assert_eq!(value["summary"]["count"], 2);
    }
}
