//! # Sequence Encoders
//!
//! Sentences are encoded to parallel token-id and tag-id sequences, and decoded back:
//! * [`SequenceEncoder`] pairs a frozen [`crate::vocab::Vocabulary`] with a [`crate::tags::TagSpace`],
//! * [`SentenceEncoder`] is the batch encoding trait,
//! * `ParallelRayonEncoder` encodes batches with ``rayon`` (feature ``rayon``).

pub mod encoded_sentence;
pub mod sentence_encoder;
pub mod sequence_encoder;

#[cfg(feature = "rayon")]
pub mod rayon_encoder;

#[doc(inline)]
pub use encoded_sentence::EncodedSentence;
#[cfg(feature = "rayon")]
#[doc(inline)]
pub use rayon_encoder::ParallelRayonEncoder;
#[doc(inline)]
pub use sentence_encoder::SentenceEncoder;
#[doc(inline)]
pub use sequence_encoder::SequenceEncoder;
