pub mod config;
pub mod error;
pub mod output;
pub mod pan_tompkins;
pub mod request;
pub mod signal_processing;
pub mod validation;
pub mod wav;
pub mod wavelet;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{PanTompkinsConfig, ProcessingConfig, SamplingFrequency};
pub use error::{DspError, Result};
pub use pan_tompkins::{PanTompkins, pan_tompkins};
pub use signal_processing::{ButterworthBandpass, bandpass};
pub use wav::{WavSignal, load_wav, save_wav};
pub use wavelet::{
    Image, ImageSize, WaveletKind, WaveletRequest, complex_morlet_image, cwt_image,
    mexican_hat_image,
};
