//! Dense row-major matrix.  Row `i` is agent `i`, column `j` is activity `j`.

/// `[rows × cols]` matrix stored in one contiguous `Vec`.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Desirability scores.
pub type UtilityMatrix = Matrix<f64>;

/// `true` where the agent performs the activity this tick.
pub type ActionMask = Matrix<bool>;

impl<T: Clone> Matrix<T> {
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self { rows, cols, data: vec![fill; rows * cols] }
    }
}

impl<T> Matrix<T> {
    /// Wrap row-major `data`.
    ///
    /// # Panics
    /// Panics if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), rows * cols, "matrix data does not match shape");
        Self { rows, cols, data }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> &T {
        &self.data[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: T) {
        self.data[r * self.cols + c] = v;
    }

    #[inline]
    pub fn row(&self, r: usize) -> &[T] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, r: usize) -> &mut [T] {
        &mut self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> std::slice::Chunks<'_, T> {
        self.data.chunks(self.cols.max(1))
    }

    /// Mutable row-major backing storage, for row-chunked writers.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl Matrix<bool> {
    /// Number of `true` cells in row `r`.
    pub fn row_count(&self, r: usize) -> usize {
        self.row(r).iter().filter(|&&b| b).count()
    }

    /// Number of `true` cells per column.
    pub fn column_counts(&self) -> Vec<u64> {
        let mut out = vec![0u64; self.cols];
        for row in self.iter_rows() {
            for (c, &b) in row.iter().enumerate() {
                out[c] += b as u64;
            }
        }
        out
    }

    /// Number of `true` cells overall.
    pub fn count_true(&self) -> u64 {
        self.data.iter().filter(|&&b| b).count() as u64
    }
}
