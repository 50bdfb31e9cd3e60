//! # Padder

use crate::{
    encoders::EncodedSentence,
    errors::{UPResult, UdPrepError},
    padding::PaddedMatrix,
    types::IdType,
};

/// The default padded width.
pub const DEFAULT_MAX_LEN: usize = 128;

/// The padding id; fixed.
pub const PAD_ID: usize = 0;

/// The result of [`Padder::pad`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedSequences<T: IdType> {
    /// The `[N, max_len]` matrix.
    pub matrix: PaddedMatrix<T>,

    /// The kept length of each row; at most `max_len`.
    pub true_lengths: Vec<usize>,

    /// Rows whose input was longer than `max_len`, and was truncated.
    pub truncated_rows: usize,
}

/// Padded token and tag matrices for a batch of encoded sentences.
///
/// This is the hand-off to a sequence model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedBatch<T: IdType> {
    /// The `[N, max_len]` token id matrix.
    pub tokens: PaddedMatrix<T>,

    /// The `[N, max_len]` tag id matrix.
    pub tags: PaddedMatrix<T>,

    /// The kept length of each row.
    pub true_lengths: Vec<usize>,

    /// Rows which were truncated to `max_len`.
    pub truncated_rows: usize,
}

impl<T: IdType> PaddedBatch<T> {
    /// The number of rows.
    pub fn len(&self) -> usize {
        self.true_lengths.len()
    }

    /// Is the batch empty?
    pub fn is_empty(&self) -> bool {
        self.true_lengths.is_empty()
    }

    /// The padded width.
    pub fn max_len(&self) -> usize {
        self.tokens.cols()
    }

    /// Total real (non-padding) positions.
    pub fn real_positions(&self) -> usize {
        self.true_lengths.iter().sum()
    }
}

/// Post-pads id sequences to a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padder {
    max_len: usize,
}

impl Default for Padder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEN)
    }
}

impl Padder {
    /// Create a padder for rows of `max_len` columns.
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    /// The padded width.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Sets the padded width.
    pub fn set_max_len(
        &mut self,
        max_len: usize,
    ) {
        self.max_len = max_len;
    }

    /// Sets the padded width.
    pub fn with_max_len(
        mut self,
        max_len: usize,
    ) -> Self {
        self.set_max_len(max_len);
        self
    }

    /// Pad a batch of sequences.
    ///
    /// Sequences shorter than `max_len` are followed by `0`s;
    /// longer sequences keep their first `max_len` ids.
    ///
    /// ## Arguments
    /// * `sequences` - the id sequences, one per row.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, sequences)))]
    pub fn pad<T, S>(
        &self,
        sequences: &[S],
    ) -> PaddedSequences<T>
    where
        T: IdType,
        S: AsRef<[T]>,
    {
        let mut matrix = PaddedMatrix::zeros(sequences.len(), self.max_len);
        let mut true_lengths = Vec::with_capacity(sequences.len());
        let mut truncated_rows = 0;

        for (r, seq) in sequences.iter().enumerate() {
            let seq = seq.as_ref();
            let kept = seq.len().min(self.max_len);
            if kept < seq.len() {
                log::debug!(
                    "row {r}: truncated from {} to {} ids",
                    seq.len(),
                    self.max_len
                );
                truncated_rows += 1;
            }
            matrix.row_mut(r)[..kept].copy_from_slice(&seq[..kept]);
            true_lengths.push(kept);
        }

        if truncated_rows > 0 {
            log::warn!(
                "truncated {truncated_rows} of {} rows to max_len {}",
                sequences.len(),
                self.max_len
            );
        }

        PaddedSequences {
            matrix,
            true_lengths,
            truncated_rows,
        }
    }

    /// Pad the token and tag sequences of encoded sentences.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, batch)))]
    pub fn pad_encoded<T: IdType>(
        &self,
        batch: &[EncodedSentence<T>],
    ) -> PaddedBatch<T> {
        let tokens = self.pad(&batch.iter().map(|e| e.token_ids()).collect::<Vec<_>>());
        let tags = self.pad(&batch.iter().map(|e| e.tag_ids()).collect::<Vec<_>>());
        PaddedBatch {
            tokens: tokens.matrix,
            tags: tags.matrix,
            true_lengths: tokens.true_lengths,
            truncated_rows: tokens.truncated_rows,
        }
    }

    /// Strip the trailing padding from each row.
    ///
    /// ## Arguments
    /// * `matrix` - the padded matrix.
    /// * `true_lengths` - the kept length of each row.
    ///
    /// ## Returns
    /// [`UdPrepError::ShapeMismatch`] if there is not one length per row,
    /// or a length exceeds the row width.
    pub fn unpad<T: IdType>(
        matrix: &PaddedMatrix<T>,
        true_lengths: &[usize],
    ) -> UPResult<Vec<Vec<T>>> {
        if true_lengths.len() != matrix.rows() {
            return Err(UdPrepError::ShapeMismatch(format!(
                "{} true lengths for {} rows",
                true_lengths.len(),
                matrix.rows()
            )));
        }
        matrix
            .iter_rows()
            .zip(true_lengths)
            .enumerate()
            .map(|(r, (row, &len))| {
                row.get(..len).map(<[T]>::to_vec).ok_or_else(|| {
                    UdPrepError::ShapeMismatch(format!(
                        "row {r}: true length {len} exceeds width {}",
                        row.len()
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_post_padding() {
        let padded = Padder::new(5).pad(&[vec![5u32, 9, 2]]);
        assert_eq!(padded.matrix.shape(), [1, 5]);
        assert_eq!(padded.matrix.row(0), &[5, 9, 2, 0, 0]);
        assert_eq!(padded.true_lengths, vec![3]);
        assert_eq!(padded.truncated_rows, 0);

        assert_eq!(
            Padder::unpad(&padded.matrix, &padded.true_lengths).unwrap(),
            vec![vec![5, 9, 2]]
        );
    }

    #[test]
    fn test_truncation() {
        let rows: Vec<Vec<u32>> = vec![vec![1, 2, 3, 4, 5, 6], vec![7, 8, 9], vec![]];
        let padded = Padder::new(3).pad(&rows);

        assert_eq!(padded.matrix.row(0), &[1, 2, 3]);
        assert_eq!(padded.matrix.row(1), &[7, 8, 9]);
        assert_eq!(padded.matrix.row(2), &[0, 0, 0]);
        assert_eq!(padded.true_lengths, vec![3, 3, 0]);
        assert_eq!(padded.truncated_rows, 1);

        assert_eq!(
            Padder::unpad(&padded.matrix, &padded.true_lengths).unwrap(),
            vec![vec![1, 2, 3], vec![7, 8, 9], vec![]]
        );
    }

    #[test]
    fn test_options() {
        assert_eq!(Padder::default().max_len(), DEFAULT_MAX_LEN);
        let mut padder = Padder::default().with_max_len(10);
        assert_eq!(padder.max_len(), 10);
        padder.set_max_len(4);
        assert_eq!(padder.max_len(), 4);
    }

    #[test]
    fn test_unpad_errors() {
        let m = PaddedMatrix::<u32>::from_vec(vec![1, 2, 0, 0], 2, 2).unwrap();
        assert!(matches!(
            Padder::unpad(&m, &[2]),
            Err(UdPrepError::ShapeMismatch(_))
        ));
        assert!(matches!(
            Padder::unpad(&m, &[2, 3]),
            Err(UdPrepError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_pad_encoded() {
        let batch = vec![
            EncodedSentence::<u32>::new(vec![3, 4], vec![6, 8]).unwrap(),
            EncodedSentence::<u32>::new(vec![5, 6, 7, 1], vec![6, 8, 16, 13]).unwrap(),
        ];
        let padded = Padder::new(3).pad_encoded(&batch);

        assert_eq!(padded.len(), 2);
        assert_eq!(padded.max_len(), 3);
        assert_eq!(padded.tokens.row(0), &[3, 4, 0]);
        assert_eq!(padded.tags.row(0), &[6, 8, 0]);
        assert_eq!(padded.tokens.row(1), &[5, 6, 7]);
        assert_eq!(padded.tags.row(1), &[6, 8, 16]);
        assert_eq!(padded.true_lengths, vec![2, 3]);
        assert_eq!(padded.truncated_rows, 1);
        assert_eq!(padded.real_positions(), 5);

        let empty = Padder::default().pad_encoded::<u32>(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.tokens.shape(), [0, DEFAULT_MAX_LEN]);
    }

    proptest! {
        #[test]
        fn unpad_inverts_pad(
            rows in proptest::collection::vec(
                proptest::collection::vec(1u32..1000, 0..=16),
                0..8,
            ),
            extra in 0usize..8,
        ) {
            let padder = Padder::new(16 + extra);
            let padded = padder.pad(&rows);

            prop_assert_eq!(padded.truncated_rows, 0);
            for (r, row) in rows.iter().enumerate() {
                prop_assert!(padded.matrix.row(r)[row.len()..].iter().all(|&v| v == 0));
            }
            prop_assert_eq!(Padder::unpad(&padded.matrix, &padded.true_lengths).unwrap(), rows);
        }
    }
}
