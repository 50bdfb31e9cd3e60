//! # Tag Mapper
//!
//! String-level mapping for the closed [`UposTag`] set.

use crate::{errors::UPResult, tags::UposTag};

/// Map a tag string to its fixed id.
///
/// ## Returns
/// [`crate::UdPrepError::UnknownTag`] if the tag is not in the closed set;
/// callers decide whether to fall back to [`crate::tags::UNK_TAG_ID`].
pub fn tag_to_id(tag: &str) -> UPResult<usize> {
    UposTag::parse_tag(tag).map(UposTag::id)
}

/// Map a fixed id back to its tag string.
///
/// ## Returns
/// [`crate::UdPrepError::InvalidTagId`] if the id is not bound to a tag.
pub fn id_to_tag(id: usize) -> UPResult<&'static str> {
    UposTag::from_id(id).map(UposTag::as_str)
}
