//! # Probability Tensor

use crate::errors::{UPResult, UdPrepError};

/// A dense row-major `[rows, max_len, classes]` tensor of class scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTensor {
    data: Vec<f32>,
    shape: [usize; 3],
}

impl ProbabilityTensor {
    /// Wrap row-major scores.
    ///
    /// ## Arguments
    /// * `data` - the scores; `data.len()` must be `rows * max_len * classes`.
    /// * `shape` - `[rows, max_len, classes]`; `classes` must be non-zero.
    pub fn new(
        data: Vec<f32>,
        shape: [usize; 3],
    ) -> UPResult<Self> {
        let [rows, max_len, classes] = shape;
        if classes == 0 {
            return Err(UdPrepError::ShapeMismatch(
                "probability tensor has no classes".to_string(),
            ));
        }
        let expected = rows
            .checked_mul(max_len)
            .and_then(|n| n.checked_mul(classes));
        if expected != Some(data.len()) {
            return Err(UdPrepError::ShapeMismatch(format!(
                "{} scores cannot fill a {shape:?} tensor",
                data.len()
            )));
        }
        Ok(Self { data, shape })
    }

    /// The `[rows, max_len, classes]` shape.
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    /// The padded width.
    pub fn max_len(&self) -> usize {
        self.shape[1]
    }

    /// The number of classes.
    pub fn classes(&self) -> usize {
        self.shape[2]
    }

    /// The row-major scores.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The class scores at one position, if in bounds.
    pub fn probabilities(
        &self,
        row: usize,
        pos: usize,
    ) -> Option<&[f32]> {
        let [rows, max_len, classes] = self.shape;
        if row >= rows || pos >= max_len {
            return None;
        }
        let start = (row * max_len + pos) * classes;
        Some(&self.data[start..start + classes])
    }

    /// Per-position arg-max class ids, over the first `true_lengths[row]` positions of each row.
    ///
    /// Ties go to the lowest class id; `NaN` scores never win.
    ///
    /// ## Returns
    /// [`UdPrepError::ShapeMismatch`] if there is not one length per row,
    /// or a length exceeds `max_len`.
    pub fn argmax(
        &self,
        true_lengths: &[usize],
    ) -> UPResult<Vec<Vec<usize>>> {
        if true_lengths.len() != self.rows() {
            return Err(UdPrepError::ShapeMismatch(format!(
                "{} true lengths for {} tensor rows",
                true_lengths.len(),
                self.rows()
            )));
        }
        true_lengths
            .iter()
            .enumerate()
            .map(|(row, &len)| {
                if len > self.max_len() {
                    return Err(UdPrepError::ShapeMismatch(format!(
                        "row {row}: true length {len} exceeds max_len {}",
                        self.max_len()
                    )));
                }
                Ok((0..len)
                    .filter_map(|pos| self.probabilities(row, pos))
                    .map(argmax)
                    .collect())
            })
            .collect()
    }
}

fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (idx, &score) in scores.iter().enumerate() {
        if score > scores[best] || (scores[best].is_nan() && !score.is_nan()) {
            best = idx;
        }
    }
    best
}
