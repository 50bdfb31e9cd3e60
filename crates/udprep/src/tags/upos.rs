//! # Universal POS Tags

use strum::IntoEnumIterator;

use crate::errors::{UPResult, UdPrepError};

/// Number of defined tag ids: the universal tags plus `UNK`.
pub const TAG_COUNT: usize = 18;

/// The id of [`UposTag::Unk`].
pub const UNK_TAG_ID: usize = 18;

/// Number of output classes a tagger must produce: the tag ids plus padding `0`.
pub const TAG_CLASS_COUNT: usize = TAG_COUNT + 1;

/// The closed universal part-of-speech tag set.
///
/// Discriminants are the tag ids; they are fixed and data-independent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
#[repr(u8)]
pub enum UposTag {
    /// Adjective.
    Adj = 1,
    /// Adposition.
    Adp = 2,
    /// Adverb.
    Adv = 3,
    /// Auxiliary.
    Aux = 4,
    /// Coordinating conjunction.
    CConj = 5,
    /// Determiner.
    Det = 6,
    /// Interjection.
    Intj = 7,
    /// Noun.
    Noun = 8,
    /// Numeral.
    Num = 9,
    /// Particle.
    Part = 10,
    /// Pronoun.
    Pron = 11,
    /// Proper noun.
    PropN = 12,
    /// Punctuation.
    Punct = 13,
    /// Subordinating conjunction.
    SConj = 14,
    /// Symbol.
    Sym = 15,
    /// Verb.
    Verb = 16,
    /// Other.
    X = 17,
    /// Unknown; the fallback for tags outside the set.
    Unk = 18,
}

impl UposTag {
    /// The fixed id of this tag.
    pub fn id(self) -> usize {
        self as usize
    }

    /// The canonical tag string.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Look up a tag by id.
    ///
    /// ## Returns
    /// [`UdPrepError::InvalidTagId`] for `0` and for ids past [`UNK_TAG_ID`].
    pub fn from_id(id: usize) -> UPResult<Self> {
        let tag = match id {
            1 => Self::Adj,
            2 => Self::Adp,
            3 => Self::Adv,
            4 => Self::Aux,
            5 => Self::CConj,
            6 => Self::Det,
            7 => Self::Intj,
            8 => Self::Noun,
            9 => Self::Num,
            10 => Self::Part,
            11 => Self::Pron,
            12 => Self::PropN,
            13 => Self::Punct,
            14 => Self::SConj,
            15 => Self::Sym,
            16 => Self::Verb,
            17 => Self::X,
            18 => Self::Unk,
            _ => return Err(UdPrepError::InvalidTagId(id)),
        };
        Ok(tag)
    }

    /// Parse a tag string.
    ///
    /// Matching is exact; `"det"` is not `DET`.
    pub fn parse_tag(tag: &str) -> UPResult<Self> {
        tag.parse()
            .map_err(|_| UdPrepError::UnknownTag(tag.to_string()))
    }

    /// Iterate over the universal tags, excluding [`UposTag::Unk`], in id order.
    pub fn universal() -> impl Iterator<Item = Self> {
        Self::iter().filter(|t| *t != Self::Unk)
    }
}
