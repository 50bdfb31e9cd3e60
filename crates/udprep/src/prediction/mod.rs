//! # Prediction Decoding
//!
//! The model side of the hand-off: a [`SequenceTagger`] maps a padded
//! token matrix to a `[N, max_len, classes]` [`ProbabilityTensor`];
//! per-position arg-max over the true lengths gives tag ids, which the
//! encoder's tag space decodes back to tag strings.

mod accuracy;
mod tagger;
mod tensor;

#[doc(inline)]
pub use accuracy::{Accuracy, tag_accuracy};
#[doc(inline)]
pub use tagger::{SequenceTagger, decode_predictions, predict_tags, tag_text};
#[doc(inline)]
pub use tensor::ProbabilityTensor;
