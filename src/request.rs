//! Loosely-typed requests for callers that hold their arguments as JSON.
//!
//! Field types are checked before any processing: a signal that is not an
//! array of numbers, a frequency that is not a number or an order that is not
//! an integer fails with [`DspError::TypeMismatch`]; an `image_size` that does
//! not hold exactly two elements fails with [`DspError::LengthMismatch`].
//!
//! ```
//! use serde_json::json;
//!
//! let response = ecgdsp::request::execute(&json!({
//!     "operation": "bandpass",
//!     "signal": [0.0, 1.0, 0.0, -1.0, 0.0, 1.0],
//!     "sampling_frequency": 250,
//!     "low_cutoff": 0.5,
//!     "high_cutoff": 40,
//!     "filter_order": 1
//! }))
//! .unwrap();
//! assert_eq!(response["output"].as_array().unwrap().len(), 6);
//! ```

use crate::config::PanTompkinsConfig;
use crate::error::{DspError, Result};
use crate::pan_tompkins::pan_tompkins;
use crate::signal_processing::bandpass;
use crate::validation::IMAGE_SIZE_LEN;
use crate::wavelet::{Image, WaveletKind, WaveletRequest, cwt_image};
use serde_json::{Map, Value, json};

/// Operation named by a request's `operation` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Bandpass,
    PanTompkins,
    Wavelet(WaveletKind),
}

impl Operation {
    fn parse(name: &str) -> Result<Self> {
        match name {
            "bandpass" => Ok(Operation::Bandpass),
            "pan_tompkins" => Ok(Operation::PanTompkins),
            "complex_morlet" => Ok(Operation::Wavelet(WaveletKind::ComplexMorlet)),
            "mexican_hat" => Ok(Operation::Wavelet(WaveletKind::MexicanHat)),
            other => Err(DspError::invalid(
                "operation",
                format!("unknown operation {:?}", other),
            )),
        }
    }
}

/// Named arguments of a single request
pub struct Arguments<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Arguments<'a> {
    pub fn new(value: &'a Value) -> Result<Self> {
        value
            .as_object()
            .map(|fields| Self { fields })
            .ok_or(DspError::TypeMismatch {
                name: "request",
                expected: "object",
            })
    }

    fn get(&self, name: &'static str) -> Option<&'a Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    fn required(&self, name: &'static str) -> Result<&'a Value> {
        self.get(name)
            .ok_or_else(|| DspError::invalid(name, "missing required argument"))
    }

    /// Array of numbers
    pub fn signal(&self, name: &'static str) -> Result<Vec<f64>> {
        let mismatch = DspError::TypeMismatch {
            name,
            expected: "array of numbers",
        };
        self.required(name)?
            .as_array()
            .ok_or_else(|| mismatch.clone())?
            .iter()
            .map(|v| v.as_f64().ok_or_else(|| mismatch.clone()))
            .collect()
    }

    /// Any JSON number
    pub fn number(&self, name: &'static str) -> Result<f64> {
        as_number(name, self.required(name)?)
    }

    pub fn number_or(&self, name: &'static str, default: f64) -> Result<f64> {
        self.get(name).map_or(Ok(default), |v| as_number(name, v))
    }

    /// Non-negative JSON integer (`1.0` is rejected like `1.5`)
    pub fn integer(&self, name: &'static str) -> Result<usize> {
        as_integer(name, self.required(name)?)
    }

    pub fn integer_or(&self, name: &'static str, default: usize) -> Result<usize> {
        self.get(name).map_or(Ok(default), |v| as_integer(name, v))
    }

    /// Exactly two integers
    pub fn size_pair_or(&self, name: &'static str, default: [usize; 2]) -> Result<[usize; 2]> {
        let Some(value) = self.get(name) else {
            return Ok(default);
        };
        let items = value.as_array().ok_or(DspError::TypeMismatch {
            name,
            expected: "array of two integers",
        })?;
        if items.len() != IMAGE_SIZE_LEN {
            return Err(DspError::LengthMismatch {
                name,
                expected: IMAGE_SIZE_LEN,
                actual: items.len(),
            });
        }
        Ok([as_integer(name, &items[0])?, as_integer(name, &items[1])?])
    }
}

fn as_number(name: &'static str, value: &Value) -> Result<f64> {
    value.as_f64().ok_or(DspError::TypeMismatch {
        name,
        expected: "number",
    })
}

fn as_integer(name: &'static str, value: &Value) -> Result<usize> {
    value
        .as_u64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or(DspError::TypeMismatch {
            name,
            expected: "non-negative integer",
        })
}

/// Validate and run a JSON request, returning a JSON response
///
/// Signals come back as `{"output": [...]}`; images as
/// `{"rows": R, "cols": C, "output": [[...], ...]}`.
pub fn execute(request: &Value) -> Result<Value> {
    let args = Arguments::new(request)?;
    let operation = match args.required("operation")? {
        Value::String(name) => Operation::parse(name)?,
        _ => {
            return Err(DspError::TypeMismatch {
                name: "operation",
                expected: "string",
            });
        }
    };
    log::debug!("Executing {:?} request", operation);

    match operation {
        Operation::Bandpass => {
            let signal = args.signal("signal")?;
            let fs = args.number("sampling_frequency")?;
            let low = args.number("low_cutoff")?;
            let high = args.number("high_cutoff")?;
            let order = args.integer("filter_order")?;
            let output = bandpass(&signal, fs, low, high, order)?;
            Ok(json!({ "output": output }))
        }
        Operation::PanTompkins => {
            let defaults = PanTompkinsConfig::default();
            let signal = args.signal("signal")?;
            let fs = args.number("sampling_frequency")?;
            let config = PanTompkinsConfig {
                low_cutoff: args.number_or("low_cutoff", defaults.low_cutoff)?,
                high_cutoff: args.number_or("high_cutoff", defaults.high_cutoff)?,
                filter_order: args.integer_or("filter_order", defaults.filter_order)?,
            };
            let output = pan_tompkins(&signal, fs, &config)?;
            Ok(json!({ "output": output }))
        }
        Operation::Wavelet(kind) => {
            let defaults = WaveletRequest::with_defaults(kind);
            let signal = args.signal("signal")?;
            let width = args.integer_or("maximum_width", defaults.maximum_width)?;
            let size = args.size_pair_or(
                "image_size",
                [defaults.image_size.rows, defaults.image_size.cols],
            )?;
            let image = cwt_image(&signal, &WaveletRequest::new(kind, width, &size)?)?;
            Ok(image_response(&image))
        }
    }
}

fn image_response(image: &Image) -> Value {
    json!({
        "rows": image.rows(),
        "cols": image.cols(),
        "output": image.to_rows()
    })
}
