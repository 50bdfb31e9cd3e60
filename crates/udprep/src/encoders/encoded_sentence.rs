//! # Encoded Sentence

use crate::{
    errors::{UPResult, UdPrepError},
    types::IdType,
};

/// Parallel token-id and tag-id sequences for one sentence, before padding.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct EncodedSentence<T: IdType> {
    token_ids: Vec<T>,
    tag_ids: Vec<T>,
}

impl<T: IdType> EncodedSentence<T> {
    /// Create an encoded sentence.
    ///
    /// ## Returns
    /// [`UdPrepError::ShapeMismatch`] if the sequences differ in length.
    pub fn new(
        token_ids: Vec<T>,
        tag_ids: Vec<T>,
    ) -> UPResult<Self> {
        if token_ids.len() != tag_ids.len() {
            return Err(UdPrepError::ShapeMismatch(format!(
                "{} token ids vs {} tag ids",
                token_ids.len(),
                tag_ids.len()
            )));
        }
        Ok(Self { token_ids, tag_ids })
    }

    /// The token ids.
    pub fn token_ids(&self) -> &[T] {
        &self.token_ids
    }

    /// The tag ids.
    pub fn tag_ids(&self) -> &[T] {
        &self.tag_ids
    }

    /// The true (unpadded) length.
    pub fn true_length(&self) -> usize {
        self.token_ids.len()
    }

    /// Consume into `(token_ids, tag_ids)`.
    pub fn into_parts(self) -> (Vec<T>, Vec<T>) {
        (self.token_ids, self.tag_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_must_agree() {
        let enc = EncodedSentence::<u32>::new(vec![3, 4], vec![6, 8]).unwrap();
        assert_eq!(enc.true_length(), 2);
        assert_eq!(enc.token_ids(), &[3, 4]);
        assert_eq!(enc.tag_ids(), &[6, 8]);
        assert_eq!(enc.into_parts(), (vec![3, 4], vec![6, 8]));

        assert!(matches!(
            EncodedSentence::<u32>::new(vec![3], vec![6, 8]),
            Err(UdPrepError::ShapeMismatch(_))
        ));
    }
}
