//! Dense square matrix stored in row-major order.

#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    data: Vec<f64>,
    size: usize,
}

impl SquareMatrix {
    pub fn new(size: usize) -> Self {
        Self::filled(size, 0.0)
    }

    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            data: vec![value; size * size],
            size,
        }
    }

    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.size + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.size + col] = value;
    }

    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.size + col] += value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.size..(row + 1) * self.size]
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Resets every entry to zero without reallocating.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
