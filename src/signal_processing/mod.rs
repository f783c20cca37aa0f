pub mod butterworth;
pub mod filter;
pub mod math;

pub use butterworth::{ButterworthBandpass, MAX_FILTER_ORDER, TransferFunction, bandpass};
pub use filter::{DirectFormFilter, Filter};
pub use math::{convolve_full, differentiate, square};
