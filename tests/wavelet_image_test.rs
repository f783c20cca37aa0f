mod test_signals;

use ecgdsp::simulation::{sine_wave, synthetic_ecg};
use ecgdsp::{
    DspError, WaveletKind, WaveletRequest, complex_morlet_image, cwt_image, mexican_hat_image,
};

#[test]
fn test_requested_shape_regardless_of_input() {
    let cases: [(usize, usize, [usize; 2]); 4] =
        [(50, 4, [128, 128]), (300, 32, [16, 200]), (1000, 8, [1, 1]), (7, 12, [64, 3])];

    for (len, width, size) in cases {
        let signal = test_signals::square_wave(len, 10);
        let morlet = complex_morlet_image(&signal, width, &size).unwrap();
        let hat = mexican_hat_image(&signal, width, &size).unwrap();
        assert_eq!(morlet.shape(), (size[0], size[1]));
        assert_eq!(hat.shape(), (size[0], size[1]));
    }
}

#[test]
fn test_morlet_non_negative_mexican_hat_signed() {
    let signal = sine_wave(2.0, 250.0, 10.0);

    let morlet = complex_morlet_image(&signal, 64, &[64, 64]).unwrap();
    assert!(morlet.as_slice().iter().all(|&v| v >= 0.0));
    assert!(morlet.max() > 0.0);

    let hat = mexican_hat_image(&signal, 32, &[64, 64]).unwrap();
    assert!(hat.min() < 0.0);
    assert!(hat.max() > 0.0);
}

#[test]
fn test_default_requests_on_ecg() {
    let ecg = synthetic_ecg(4.0, 250.0, 75.0);

    let morlet = cwt_image(&ecg.samples, &WaveletRequest::complex_morlet()).unwrap();
    assert_eq!(morlet.shape(), (128, 128));
    assert!(morlet.as_slice().iter().all(|v| v.is_finite() && *v >= 0.0));

    let hat = cwt_image(&ecg.samples, &WaveletRequest::mexican_hat()).unwrap();
    assert_eq!(hat.shape(), (128, 128));
    assert!(hat.as_slice().iter().all(|v| v.is_finite()));
}

#[test]
fn test_morlet_response_follows_beats() {
    // Columns around an R peak carry more energy than the flat segments between beats
    let ecg = synthetic_ecg(4.0, 250.0, 60.0);
    let image = complex_morlet_image(&ecg.samples, 16, &[16, 1000]).unwrap();

    let column_energy = |c: usize| image.column(c).iter().sum::<f64>();
    for &r in &ecg.r_peaks {
        assert!(
            column_energy(r) > 5.0 * column_energy(r + 125),
            "R peak at {}",
            r
        );
    }
}

#[test]
fn test_image_size_length_errors() {
    let signal = test_signals::square_wave(100, 10);
    for size in [&[][..], &[128][..], &[128, 128, 128][..]] {
        for kind in [WaveletKind::ComplexMorlet, WaveletKind::MexicanHat] {
            let err = WaveletRequest::new(kind, 8, size).unwrap_err();
            assert_eq!(
                err,
                DspError::LengthMismatch {
                    name: "image_size",
                    expected: 2,
                    actual: size.len(),
                }
            );
        }
        assert!(matches!(
            mexican_hat_image(&signal, 8, size),
            Err(DspError::LengthMismatch { .. })
        ));
    }
}

#[test]
fn test_invalid_wavelet_inputs() {
    assert!(complex_morlet_image(&[], 8, &[8, 8]).is_err());
    assert!(complex_morlet_image(&[1.0, 2.0], 0, &[8, 8]).is_err());
    assert!(mexican_hat_image(&[1.0, 2.0], 4, &[0, 8]).is_err());
    assert!(mexican_hat_image(&[1.0, f64::NAN], 4, &[8, 8]).is_err());
}
