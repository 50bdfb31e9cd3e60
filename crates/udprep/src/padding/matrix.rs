//! # Padded Matrix

use crate::{
    errors::{UPResult, UdPrepError},
    types::IdType,
};

/// A dense row-major `[rows, cols]` id matrix.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct PaddedMatrix<T: IdType> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: IdType> PaddedMatrix<T> {
    /// Create a matrix filled with the padding id `0`.
    pub fn zeros(
        rows: usize,
        cols: usize,
    ) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Wrap row-major data.
    ///
    /// ## Returns
    /// [`UdPrepError::ShapeMismatch`] unless `data.len() == rows * cols`.
    pub fn from_vec(
        data: Vec<T>,
        rows: usize,
        cols: usize,
    ) -> UPResult<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(UdPrepError::ShapeMismatch(format!(
                "{} values cannot fill a [{rows}, {cols}] matrix",
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The `[rows, cols]` shape.
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    /// The row-major data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the matrix, returning the row-major data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// One row.
    ///
    /// ## Panics
    /// If `row >= self.rows()`.
    pub fn row(
        &self,
        row: usize,
    ) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub(crate) fn row_mut(
        &mut self,
        row: usize,
    ) -> &mut [T] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// One cell, if in bounds.
    pub fn get(
        &self,
        row: usize,
        col: usize,
    ) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Iterate over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(move |r| self.row(r))
    }
}
