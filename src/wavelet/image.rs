use serde::Serialize;

/// Dense row-major 2-D matrix of `f64` values
///
/// Rows are scales (top row = smallest scale) and columns are time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Image {
    /// Build an image from row-major data
    ///
    /// # Panics
    /// Panics if `data.len() != rows * cols`
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), rows * cols, "image data does not match its shape");
        Self { rows, cols, data }
    }

    pub(crate) fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_vec(rows, cols, vec![0.0; rows * cols])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [f64] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// All values in row-major order
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Copy into nested row vectors
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols.max(1)).map(|r| r.to_vec()).collect()
    }

    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Copy of a single column
    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|r| self.get(r, col)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexing() {
        let image = Image::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(image.shape(), (2, 3));
        assert_eq!(image.get(1, 0), 4.0);
        assert_eq!(image.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(image.column(2), vec![3.0, 6.0]);
        assert_eq!(image.to_rows(), vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_min_max() {
        let image = Image::from_vec(1, 3, vec![-1.5, 0.0, 2.0]);
        assert_eq!(image.min(), -1.5);
        assert_eq!(image.max(), 2.0);
    }

    #[test]
    #[should_panic]
    fn test_shape_mismatch_panics() {
        let _ = Image::from_vec(2, 2, vec![0.0; 3]);
    }
}
