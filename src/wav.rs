use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Mono signal read from a WAV file
#[derive(Debug, Clone)]
pub struct WavSignal {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

/// Read a mono WAV file, scaling integer samples to [-1, 1)
pub fn load_wav<P: AsRef<Path>>(path: P) -> anyhow::Result<WavSignal> {
    let mut reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    if spec.channels != 1 {
        anyhow::bail!("Expected mono WAV file, got {} channels", spec.channels);
    }

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    log::debug!(
        "Loaded {} samples at {} Hz from {}",
        samples.len(),
        spec.sample_rate,
        path.as_ref().display()
    );

    Ok(WavSignal {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Write a mono 32-bit float WAV file
pub fn save_wav<P: AsRef<Path>>(
    path: P,
    samples: &[f64],
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for &sample in samples {
        writer.write_sample(sample as f32)?;
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_wav() {
        let path = std::env::temp_dir().join(format!("ecgdsp_wav_{}.wav", std::process::id()));
        let samples = vec![0.0, 0.5, -0.25, 1.0];

        save_wav(&path, &samples, 360).unwrap();
        let loaded = load_wav(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.sample_rate, 360);
        assert_eq!(loaded.samples, samples);
    }

    #[test]
    fn test_load_rejects_stereo() {
        let path = std::env::temp_dir().join(format!("ecgdsp_stereo_{}.wav", std::process::id()));
        let spec = WavSpec {
            channels: 2,
            sample_rate: 250,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.finalize().unwrap();

        let err = load_wav(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("mono"));
    }
}
