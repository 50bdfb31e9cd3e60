//! # Parallel Encoder

use core::marker::PhantomData;

use rayon::prelude::*;

use crate::{
    conllu::Sentence,
    encoders::{EncodedSentence, SentenceEncoder},
    errors::UPResult,
    types::IdType,
};

/// Batch-Level Parallel Encoder Wrapper.
///
/// Enables ``rayon`` encoding of batches; output order matches input order.
#[derive(Clone)]
pub struct ParallelRayonEncoder<T: IdType, E: SentenceEncoder<T>> {
    /// Inner encoder.
    pub inner: E,

    _marker: PhantomData<T>,
}

impl<T, E> ParallelRayonEncoder<T, E>
where
    T: IdType,
    E: SentenceEncoder<T>,
{
    /// Create a new parallel encoder.
    ///
    /// ## Arguments
    /// * `inner` - The sentence encoder to wrap.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T, E> SentenceEncoder<T> for ParallelRayonEncoder<T, E>
where
    T: IdType,
    E: SentenceEncoder<T>,
{
    fn encode(
        &self,
        sentence: &Sentence,
    ) -> UPResult<EncodedSentence<T>> {
        self.inner.encode(sentence)
    }

    fn encode_batch(
        &self,
        sentences: &[Sentence],
    ) -> UPResult<Vec<EncodedSentence<T>>> {
        sentences.par_iter().map(|s| self.inner.encode(s)).collect()
    }
}
