mod noise;
mod signal;

pub use noise::{
    AdditiveNoiseConfig, BaselineWanderConfig, NoiseConfig, PowerlineConfig, apply_noise,
    signal_power,
};
pub use signal::{SyntheticEcg, sine_wave, square_wave, synthetic_ecg};
