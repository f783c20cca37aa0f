use crate::error::{DspError, Result};

/// Common trait for sample-by-sample filters
///
/// Implemented by [`DirectFormFilter`].
pub trait Filter {
    /// Process a single sample through the filter
    fn process(&mut self, sample: f64) -> f64;

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Filter a signal into a newly allocated buffer
    fn process_signal(&mut self, signal: &[f64]) -> Vec<f64> {
        signal.iter().map(|&s| self.process(s)).collect()
    }
}

/// Recursive filter in direct form II transposed
///
/// Runs `a[0]·y[n] = Σ b[k]·x[n-k] − Σ a[k]·y[n-k]` in a single forward pass
/// starting from a zero state. There is no backward pass, so the output
/// carries the filter's phase delay.
#[derive(Debug, Clone)]
pub struct DirectFormFilter {
    b: Vec<f64>,
    a: Vec<f64>,
    state: Vec<f64>,
}

impl DirectFormFilter {
    /// Create a filter from numerator `b` and denominator `a` coefficients
    ///
    /// Both vectors are padded to the same length and normalised by `a[0]`.
    ///
    /// # Errors
    /// Returns `DspError::FilterDesign` if either vector is empty or `a[0]` is zero
    pub fn new(numerator: &[f64], denominator: &[f64]) -> Result<Self> {
        if numerator.is_empty() || denominator.is_empty() {
            return Err(DspError::FilterDesign(
                "empty coefficient vector".to_string(),
            ));
        }
        let a0 = denominator[0];
        if a0 == 0.0 || !a0.is_finite() {
            return Err(DspError::FilterDesign(format!(
                "leading denominator coefficient must be non-zero, got {}",
                a0
            )));
        }

        let n = numerator.len().max(denominator.len());
        let mut b = vec![0.0; n];
        let mut a = vec![0.0; n];
        for (dst, &src) in b.iter_mut().zip(numerator) {
            *dst = src / a0;
        }
        for (dst, &src) in a.iter_mut().zip(denominator) {
            *dst = src / a0;
        }

        Ok(Self {
            b,
            a,
            state: vec![0.0; n - 1],
        })
    }

    /// Clear the internal delay line
    pub fn reset(&mut self) {
        self.state.fill(0.0);
    }
}

impl Filter for DirectFormFilter {
    fn process(&mut self, sample: f64) -> f64 {
        let output = self.b[0] * sample + self.state.first().copied().unwrap_or(0.0);

        let last = self.state.len();
        for i in 0..last {
            let carry = if i + 1 < last { self.state[i + 1] } else { 0.0 };
            self.state[i] = self.b[i + 1] * sample - self.a[i + 1] * output + carry;
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fir_passthrough() {
        let mut filter = DirectFormFilter::new(&[1.0], &[1.0]).unwrap();
        assert_eq!(filter.process_signal(&[1.0, -2.0, 3.0]), vec![1.0, -2.0, 3.0]);
    }

    #[test]
    fn test_fir_moving_sum() {
        let mut filter = DirectFormFilter::new(&[1.0, 1.0], &[1.0]).unwrap();
        assert_eq!(
            filter.process_signal(&[1.0, 2.0, 3.0, 4.0]),
            vec![1.0, 3.0, 5.0, 7.0]
        );
    }

    #[test]
    fn test_one_pole_impulse_response() {
        // y[n] = x[n] + 0.5 y[n-1]
        let mut filter = DirectFormFilter::new(&[1.0], &[1.0, -0.5]).unwrap();
        let out = filter.process_signal(&[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(out, vec![1.0, 0.5, 0.25, 0.125]);
    }

    #[test]
    fn test_normalises_by_leading_denominator() {
        let mut filter = DirectFormFilter::new(&[2.0], &[2.0, -1.0]).unwrap();
        let out = filter.process_signal(&[1.0, 0.0, 0.0]);
        assert_eq!(out, vec![1.0, 0.5, 0.25]);
    }

    #[test]
    fn test_process_buffer_matches_process_signal() {
        let input = [0.3, -1.0, 2.5, 0.0, 4.0];
        let mut a = DirectFormFilter::new(&[0.2, 0.0, -0.2], &[1.0, -0.9, 0.5]).unwrap();
        let mut b = a.clone();

        let expected = a.process_signal(&input);
        let mut buffer = input;
        b.process_buffer(&mut buffer);
        assert_eq!(buffer.to_vec(), expected);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = DirectFormFilter::new(&[1.0], &[1.0, -0.5]).unwrap();
        let first = filter.process_signal(&[1.0, 0.0]);
        filter.reset();
        assert_eq!(filter.process_signal(&[1.0, 0.0]), first);
    }

    #[test]
    fn test_zero_leading_denominator_rejected() {
        assert!(DirectFormFilter::new(&[1.0], &[0.0, 1.0]).is_err());
        assert!(DirectFormFilter::new(&[], &[1.0]).is_err());
    }
}
