//! # Token Id Classification

use crate::conllu::MalformedLine;

/// The structural kind of a CoNLL-U record, from its ID column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TokenIdKind {
    /// A syntactic word: `"5"`.
    Word,

    /// A multiword token range: `"5-6"`.
    Multiword,

    /// An empty node: `"5.1"`.
    EmptyNode,
}

/// How strictly record ids are validated.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum MultiwordPolicy {
    /// Ids must be `N`, `N-M` or `N.M` with ascii-digit `N` and `M`.
    ///
    /// Anything else is a malformed line.
    #[default]
    Strict,

    /// Any id containing `-` is a range; else any id containing `.` is an empty node;
    /// everything else is a word.
    Lenient,
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_digit_pair(
    id: &str,
    sep: char,
) -> bool {
    id.split_once(sep)
        .is_some_and(|(a, b)| is_digits(a) && is_digits(b))
}

impl MultiwordPolicy {
    /// Classify a record id.
    ///
    /// ## Returns
    /// The record kind, or [`MalformedLine::InvalidTokenId`] if the id
    /// is rejected under this policy.
    pub fn classify(
        self,
        id: &str,
    ) -> Result<TokenIdKind, MalformedLine> {
        match self {
            Self::Lenient => Ok(if id.contains('-') {
                TokenIdKind::Multiword
            } else if id.contains('.') {
                TokenIdKind::EmptyNode
            } else {
                TokenIdKind::Word
            }),
            Self::Strict => {
                if is_digits(id) {
                    Ok(TokenIdKind::Word)
                } else if is_digit_pair(id, '-') {
                    Ok(TokenIdKind::Multiword)
                } else if is_digit_pair(id, '.') {
                    Ok(TokenIdKind::EmptyNode)
                } else {
                    Err(MalformedLine::InvalidTokenId(id.to_string()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_common_ids() {
        for policy in MultiwordPolicy::iter() {
            assert_eq!(policy.classify("1"), Ok(TokenIdKind::Word));
            assert_eq!(policy.classify("2"), Ok(TokenIdKind::Word));
            assert_eq!(policy.classify("19-20"), Ok(TokenIdKind::Multiword));
            assert_eq!(policy.classify("1-2"), Ok(TokenIdKind::Multiword));
            assert_eq!(policy.classify("10.1"), Ok(TokenIdKind::EmptyNode));
        }
    }

    #[test]
    fn test_strict_rejects() {
        let policy = MultiwordPolicy::Strict;
        for id in ["a-b", "1-", "-2", "1.x", "", "abc", "1-2-3", "1.2.3", " 1"] {
            assert_eq!(
                policy.classify(id),
                Err(MalformedLine::InvalidTokenId(id.to_string())),
                "{id:?}"
            );
        }
    }

    #[test]
    fn test_lenient_accepts() {
        let policy = MultiwordPolicy::Lenient;
        assert_eq!(policy.classify("a-b"), Ok(TokenIdKind::Multiword));
        assert_eq!(policy.classify("1.x"), Ok(TokenIdKind::EmptyNode));
        assert_eq!(policy.classify("1-2.1"), Ok(TokenIdKind::Multiword));
        assert_eq!(policy.classify("abc"), Ok(TokenIdKind::Word));
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(MultiwordPolicy::Strict.to_string(), "strict");
        assert_eq!(
            "lenient".parse::<MultiwordPolicy>().unwrap(),
            MultiwordPolicy::Lenient
        );
    }
}
