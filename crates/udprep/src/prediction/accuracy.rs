//! # Tagging Accuracy

use core::fmt;

use crate::{
    errors::{UPResult, UdPrepError},
    padding::PaddedMatrix,
    types::IdType,
};

/// Per-token accuracy over the unpadded positions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Accuracy {
    /// Positions where the predicted tag id equals the gold tag id.
    pub correct: usize,

    /// Positions scored.
    pub total: usize,
}

impl Accuracy {
    /// `correct / total`; `0.0` when nothing was scored.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}/{} ({:.2}%)",
            self.correct,
            self.total,
            self.ratio() * 100.0
        )
    }
}

/// Score predicted tag ids against a gold tag matrix.
///
/// Only the first `true_lengths[row]` positions of each row count.
///
/// ## Arguments
/// * `gold` - the padded gold tag ids.
/// * `predicted` - predicted class ids per row, as from [`crate::prediction::ProbabilityTensor::argmax`].
/// * `true_lengths` - the kept length of each row.
pub fn tag_accuracy<T: IdType>(
    gold: &PaddedMatrix<T>,
    predicted: &[Vec<usize>],
    true_lengths: &[usize],
) -> UPResult<Accuracy> {
    if predicted.len() != gold.rows() || true_lengths.len() != gold.rows() {
        return Err(UdPrepError::ShapeMismatch(format!(
            "{} predicted rows and {} true lengths for {} gold rows",
            predicted.len(),
            true_lengths.len(),
            gold.rows()
        )));
    }

    let mut acc = Accuracy::default();
    for (row, (pred, &len)) in predicted.iter().zip(true_lengths).enumerate() {
        if pred.len() < len || len > gold.cols() {
            return Err(UdPrepError::ShapeMismatch(format!(
                "row {row}: true length {len} exceeds {} predictions / width {}",
                pred.len(),
                gold.cols()
            )));
        }
        acc.total += len;
        acc.correct += gold.row(row)[..len]
            .iter()
            .zip(pred)
            .filter(|&(g, &p)| g.to_usize() == Some(p))
            .count();
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_accuracy() {
        let gold = PaddedMatrix::<u32>::from_vec(vec![6, 8, 16, 0, 6, 8, 0, 0], 2, 4).unwrap();
        let predicted = vec![vec![6, 8, 13], vec![6, 6]];

        let acc = tag_accuracy(&gold, &predicted, &[3, 2]).unwrap();
        assert_eq!(acc, Accuracy { correct: 3, total: 5 });
        assert!((acc.ratio() - 0.6).abs() < 1e-9);
        assert_eq!(acc.to_string(), "3/5 (60.00%)");
    }

    #[test]
    fn test_padding_is_ignored() {
        let gold = PaddedMatrix::<u32>::from_vec(vec![6, 0, 0], 1, 3).unwrap();
        let acc = tag_accuracy(&gold, &[vec![6, 9, 9]], &[1]).unwrap();
        assert_eq!(acc, Accuracy { correct: 1, total: 1 });

        assert_eq!(Accuracy::default().ratio(), 0.0);
    }

    #[test]
    fn test_shape_errors() {
        let gold = PaddedMatrix::<u32>::from_vec(vec![6, 8], 1, 2).unwrap();
        assert!(tag_accuracy(&gold, &[], &[2]).is_err());
        assert!(tag_accuracy(&gold, &[vec![6]], &[2]).is_err());
        assert!(tag_accuracy(&gold, &[vec![6, 8, 0]], &[3]).is_err());
    }
}
