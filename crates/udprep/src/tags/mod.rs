//! # Tag Spaces
//!
//! Tags are mapped to small dense integers; `0` is never a tag id, it is the padding value.
//!
//! * [`UposTag`] is the closed universal part-of-speech set, plus `UNK`.
//! * [`tag_mapper`] maps between tag strings and the fixed [`UposTag`] ids.
//! * [`TagSpace`] is the seam used by the encoders; it is implemented by:
//!   * [`UniversalTagSpace`] - the closed set alone,
//!   * [`ExtendedTagSpace`] - the closed set, plus extra tags fit on a training split.

pub mod tag_mapper;
pub mod tag_space;
pub mod upos;

#[doc(inline)]
pub use tag_mapper::{id_to_tag, tag_to_id};
#[doc(inline)]
pub use tag_space::{ExtendedTagSpace, TagSpace, UniversalTagSpace};
#[doc(inline)]
pub use upos::{TAG_CLASS_COUNT, TAG_COUNT, UNK_TAG_ID, UposTag};
