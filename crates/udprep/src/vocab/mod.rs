//! # Vocabulary
//!
//! The word form vocabulary is fit on the training split only, then frozen:
//! * [`VocabularyBuilder`] fits a [`Vocabulary`],
//! * [`Vocabulary`] encodes forms to ids, and decodes them back,
//! * [`io`] reads and writes vocabularies as text.

pub mod io;
pub mod vocabulary;

#[doc(inline)]
pub use io::{load_vocabulary_path, read_vocabulary, save_vocabulary_path, write_vocabulary};
#[doc(inline)]
pub use vocabulary::{Vocabulary, VocabularyBuilder, VocabularyOptions};

/// The default out-of-vocabulary sentinel.
pub const DEFAULT_OOV_TOKEN: &str = "<OOV>";

/// The string the padding id `0` decodes to.
pub const PAD_TOKEN: &str = "<PAD>";
