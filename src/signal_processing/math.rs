use num_complex::Complex64;

/// Expand a polynomial from its roots
///
/// Returns coefficients in descending powers, leading coefficient 1.
pub fn poly_from_roots(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * root;
        }
        coeffs = next;
    }
    coeffs
}

/// Evaluate a real polynomial (descending powers) at a complex point
pub fn poly_eval(coeffs: &[f64], z: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
}

/// First discrete difference: `out[i] = x[i + 1] - x[i]`
///
/// Output is one sample shorter than the input (empty for fewer than 2 samples).
pub fn differentiate(signal: &[f64]) -> Vec<f64> {
    signal.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Element-wise square
pub fn square(signal: &[f64]) -> Vec<f64> {
    signal.iter().map(|x| x * x).collect()
}

/// Full linear convolution, length `a.len() + b.len() - 1`
pub fn convolve_full(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &h) in b.iter().enumerate() {
            out[i + j] += x * h;
        }
    }
    out
}
