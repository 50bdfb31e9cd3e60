//! # Tag Space Trait and Implementations

use crate::{
    conllu::Sentence,
    errors::{UPResult, UdPrepError},
    tags::{TAG_COUNT, UNK_TAG_ID, UposTag},
    types::{UPHashMap, hash_map_new},
};

/// A bidirectional mapping between tag strings and tag ids.
///
/// Valid ids are `1..=max_id()`; `0` is reserved for padding.
/// Implementations are frozen after construction and safe to share across threads.
pub trait TagSpace: Send + Sync {
    /// Map a tag string to its id.
    fn tag_to_id(
        &self,
        tag: &str,
    ) -> UPResult<usize>;

    /// Map an id back to its tag string.
    fn id_to_tag(
        &self,
        id: usize,
    ) -> UPResult<&str>;

    /// The largest bound tag id.
    fn max_id(&self) -> usize;

    /// Number of output classes, including the padding class `0`.
    fn class_count(&self) -> usize {
        self.max_id() + 1
    }
}

/// The closed universal tag space.
///
/// In lenient mode (the default) tags outside the closed set map to `UNK`;
/// in strict mode they are [`UdPrepError::UnknownTag`] errors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UniversalTagSpace {
    strict: bool,
}

impl UniversalTagSpace {
    /// Create a lenient universal tag space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a strict universal tag space.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Is this space strict?
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl TagSpace for UniversalTagSpace {
    fn tag_to_id(
        &self,
        tag: &str,
    ) -> UPResult<usize> {
        match UposTag::parse_tag(tag) {
            Ok(t) => Ok(t.id()),
            Err(err) if self.strict => Err(err),
            Err(_) => Ok(UNK_TAG_ID),
        }
    }

    fn id_to_tag(
        &self,
        id: usize,
    ) -> UPResult<&str> {
        UposTag::from_id(id).map(UposTag::as_str)
    }

    fn max_id(&self) -> usize {
        TAG_COUNT
    }
}

/// The universal tag space, extended by the extra tags observed in a training split.
///
/// Universal tags keep their fixed ids; extra tags are assigned
/// `TAG_COUNT + 1 ..` in first-occurrence order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExtendedTagSpace {
    strict: bool,
    extra_tags: Vec<String>,
    extra_index: UPHashMap<String, usize>,
}

impl ExtendedTagSpace {
    /// Build a tag space from the training split.
    ///
    /// Only the training split may be used here; dev/test tags
    /// never extend the space.
    ///
    /// ## Arguments
    /// * `train` - the training sentences.
    pub fn fit<'a, I>(train: I) -> Self
    where
        I: IntoIterator<Item = &'a Sentence>,
    {
        Self::from_extra_tags(
            train
                .into_iter()
                .flat_map(|sentence| sentence.iter().map(|token| token.tag())),
        )
    }

    /// Build a tag space from a sequence of tags.
    ///
    /// Universal tags and repeats are skipped.
    pub fn from_extra_tags<S, I>(tags: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut space = Self {
            strict: false,
            extra_tags: Vec::new(),
            extra_index: hash_map_new(),
        };
        for tag in tags {
            let tag = tag.as_ref();
            if UposTag::parse_tag(tag).is_ok() || space.extra_index.contains_key(tag) {
                continue;
            }
            space.extra_tags.push(tag.to_string());
            space
                .extra_index
                .insert(tag.to_string(), TAG_COUNT + space.extra_tags.len());
        }
        space
    }

    /// Sets strict mode; unseen tags become errors instead of `UNK`.
    pub fn with_strict(
        mut self,
        strict: bool,
    ) -> Self {
        self.strict = strict;
        self
    }

    /// The extra tags, in id order.
    pub fn extra_tags(&self) -> &[String] {
        &self.extra_tags
    }
}

impl TagSpace for ExtendedTagSpace {
    fn tag_to_id(
        &self,
        tag: &str,
    ) -> UPResult<usize> {
        if let Ok(t) = UposTag::parse_tag(tag) {
            return Ok(t.id());
        }
        match self.extra_index.get(tag) {
            Some(&id) => Ok(id),
            None if self.strict => Err(UdPrepError::UnknownTag(tag.to_string())),
            None => Ok(UNK_TAG_ID),
        }
    }

    fn id_to_tag(
        &self,
        id: usize,
    ) -> UPResult<&str> {
        if id <= TAG_COUNT {
            return UposTag::from_id(id).map(UposTag::as_str);
        }
        self.extra_tags
            .get(id - TAG_COUNT - 1)
            .map(String::as_str)
            .ok_or(UdPrepError::InvalidTagId(id))
    }

    fn max_id(&self) -> usize {
        TAG_COUNT + self.extra_tags.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conllu::Token;

    #[test]
    fn test_universal_lenient() {
        let space = UniversalTagSpace::new();
        assert!(!space.is_strict());
        assert_eq!(space.tag_to_id("NOUN").unwrap(), 8);
        assert_eq!(space.tag_to_id("NN").unwrap(), UNK_TAG_ID);
        assert_eq!(space.id_to_tag(8).unwrap(), "NOUN");
        assert_eq!(space.class_count(), 19);
    }

    #[test]
    fn test_universal_strict() {
        let space = UniversalTagSpace::strict();
        assert!(matches!(
            space.tag_to_id("NN"),
            Err(UdPrepError::UnknownTag(t)) if t == "NN"
        ));
        assert!(matches!(
            space.id_to_tag(19),
            Err(UdPrepError::InvalidTagId(19))
        ));
    }

    #[test]
    fn test_extended_fit() {
        let train = vec![
            Sentence::new(vec![
                Token::new("The", "DT"),
                Token::new("cat", "NOUN"),
                Token::new("sat", "VBD"),
            ]),
            Sentence::new(vec![Token::new("A", "DT"), Token::new("!", "SYM")]),
        ];

        let space = ExtendedTagSpace::fit(&train);
        assert_eq!(space.extra_tags(), &["DT".to_string(), "VBD".to_string()]);
        assert_eq!(space.max_id(), 20);
        assert_eq!(space.class_count(), 21);

        assert_eq!(space.tag_to_id("NOUN").unwrap(), 8);
        assert_eq!(space.tag_to_id("DT").unwrap(), 19);
        assert_eq!(space.tag_to_id("VBD").unwrap(), 20);
        assert_eq!(space.tag_to_id("JJ").unwrap(), UNK_TAG_ID);

        assert_eq!(space.id_to_tag(19).unwrap(), "DT");
        assert_eq!(space.id_to_tag(6).unwrap(), "DET");
        assert!(matches!(
            space.id_to_tag(21),
            Err(UdPrepError::InvalidTagId(21))
        ));

        let strict = space.with_strict(true);
        assert!(strict.tag_to_id("JJ").is_err());
    }
}
