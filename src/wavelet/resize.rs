//! Bilinear image resize with Gaussian anti-aliasing.
//!
//! Pixel centres are aligned (`src = (dst + 0.5) * in / out - 0.5`) and
//! samples that fall outside the image are mirrored about the edge pixel.
//! Axes that shrink are smoothed first with `sigma = (in / out - 1) / 2`.

use super::image::Image;

/// Gaussian kernels are truncated at this many standard deviations.
const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Resize `image` to exactly `rows` x `cols`
pub fn resize(image: &Image, rows: usize, cols: usize) -> Image {
    let row_factor = image.rows() as f64 / rows as f64;
    let col_factor = image.cols() as f64 / cols as f64;

    let mut source = image.clone();
    if row_factor > 1.0 {
        smooth_columns(&mut source, (row_factor - 1.0) / 2.0);
    }
    if col_factor > 1.0 {
        smooth_rows(&mut source, (col_factor - 1.0) / 2.0);
    }

    let row_taps: Vec<LinearTap> = (0..rows)
        .map(|r| LinearTap::new(r, row_factor, image.rows()))
        .collect();
    let col_taps: Vec<LinearTap> = (0..cols)
        .map(|c| LinearTap::new(c, col_factor, image.cols()))
        .collect();

    let mut out = Image::zeros(rows, cols);
    for (r, rt) in row_taps.iter().enumerate() {
        for (c, ct) in col_taps.iter().enumerate() {
            let top = ct.blend(source.get(rt.lo, ct.lo), source.get(rt.lo, ct.hi));
            let bottom = ct.blend(source.get(rt.hi, ct.lo), source.get(rt.hi, ct.hi));
            out.set(r, c, rt.blend(top, bottom));
        }
    }
    out
}

/// Two neighbouring source indices and the weight of the upper one
#[derive(Debug, Clone, Copy)]
struct LinearTap {
    lo: usize,
    hi: usize,
    weight: f64,
}

impl LinearTap {
    fn new(dst: usize, factor: f64, len: usize) -> Self {
        if len == 1 {
            return Self {
                lo: 0,
                hi: 0,
                weight: 0.0,
            };
        }

        let last = (len - 1) as f64;
        let mut x = (dst as f64 + 0.5) * factor - 0.5;
        if x < 0.0 {
            x = -x;
        }
        if x > last {
            x = 2.0 * last - x;
        }

        let lo = (x.floor() as usize).min(len - 1);
        Self {
            lo,
            hi: (lo + 1).min(len - 1),
            weight: x - lo as f64,
        }
    }

    fn blend(&self, lo: f64, hi: f64) -> f64 {
        lo * (1.0 - self.weight) + hi * self.weight
    }
}

/// Reflect an out-of-range index back into `0..len`, edge sample not repeated
fn mirror_index(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let m = i.rem_euclid(period);
    if m < len as isize {
        m as usize
    } else {
        (period - m) as usize
    }
}

/// Normalised Gaussian weights for offsets `-radius..=radius`
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as isize;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|k| (-0.5 * (k * k) as f64 / (sigma * sigma)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

fn smooth_line(line: &[f64], kernel: &[f64]) -> Vec<f64> {
    let radius = (kernel.len() / 2) as isize;
    (0..line.len() as isize)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * line[mirror_index(i + k as isize - radius, line.len())])
                .sum()
        })
        .collect()
}

fn smooth_rows(image: &mut Image, sigma: f64) {
    let kernel = gaussian_kernel(sigma);
    for r in 0..image.rows() {
        let smoothed = smooth_line(image.row(r), &kernel);
        image.row_mut(r).copy_from_slice(&smoothed);
    }
}

fn smooth_columns(image: &mut Image, sigma: f64) {
    let kernel = gaussian_kernel(sigma);
    for c in 0..image.cols() {
        let smoothed = smooth_line(&image.column(c), &kernel);
        for (r, value) in smoothed.into_iter().enumerate() {
            image.set(r, c, value);
        }
    }
}
