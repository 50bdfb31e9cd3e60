//! # Sentence Encoder Trait

use crate::{conllu::Sentence, encoders::EncodedSentence, errors::UPResult, types::IdType};

/// Encodes sentences to id sequences.
///
/// Encoding one sentence never mutates shared state;
/// implementations must be safe to call from many threads.
pub trait SentenceEncoder<T: IdType>: Send + Sync {
    /// Encode one sentence.
    fn encode(
        &self,
        sentence: &Sentence,
    ) -> UPResult<EncodedSentence<T>>;

    /// Encode a batch of sentences.
    ///
    /// The output is in input order; the first error aborts the batch.
    fn encode_batch(
        &self,
        sentences: &[Sentence],
    ) -> UPResult<Vec<EncodedSentence<T>>> {
        sentences.iter().map(|s| self.encode(s)).collect()
    }
}
