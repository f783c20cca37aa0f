#![allow(dead_code)]

pub mod generate;
pub mod peaks;

pub use generate::{noisy_ecg, square_wave};
pub use peaks::find_peaks;
