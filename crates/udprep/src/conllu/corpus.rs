//! # Token, Sentence and Corpus Types

use std::collections::BTreeMap;

use crate::types::{UPHashMap, hash_map_new};

/// A word form and its tag.
///
/// Tokens produced by the parser have a non-empty form, and a tag which is
/// neither empty nor the `_` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token {
    form: String,
    tag: String,
}

impl Token {
    /// Create a new token.
    pub fn new(
        form: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            form: form.into(),
            tag: tag.into(),
        }
    }

    /// The word form.
    pub fn form(&self) -> &str {
        &self.form
    }

    /// The tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl<F: Into<String>, G: Into<String>> From<(F, G)> for Token {
    fn from((form, tag): (F, G)) -> Self {
        Self::new(form, tag)
    }
}

/// An ordered sequence of tokens, in surface order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    /// Create a new sentence.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// The tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is the sentence empty?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the tokens.
    pub fn iter(&self) -> core::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Iterate over the word forms.
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(Token::form)
    }

    /// Iterate over the tags.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(Token::tag)
    }
}

impl From<Vec<Token>> for Sentence {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl<T: Into<Token>> FromIterator<T> for Sentence {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a Token;
    type IntoIter = core::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Diagnostic context for a kept sentence.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SentenceMetadata {
    /// The 1-based line number of the first line of the sentence block.
    pub line_number: usize,

    /// The `#` comment lines of the block, verbatim.
    pub comments: Vec<String>,
}

/// The kept sentences of one split, in input order.
///
/// `metadata[i]` describes `sentences[i]`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Corpus {
    sentences: Vec<Sentence>,
    metadata: Vec<SentenceMetadata>,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(
        &mut self,
        sentence: Sentence,
        metadata: SentenceMetadata,
    ) {
        self.sentences.push(sentence);
        self.metadata.push(metadata);
    }

    /// The sentences.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// The per-sentence metadata.
    pub fn metadata(&self) -> &[SentenceMetadata] {
        &self.metadata
    }

    /// The number of sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Is the corpus empty?
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Iterate over the sentences.
    pub fn iter(&self) -> core::slice::Iter<'_, Sentence> {
        self.sentences.iter()
    }

    /// Total tokens over all sentences.
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }

    /// Word form frequencies.
    pub fn word_counts(&self) -> UPHashMap<&str, usize> {
        let mut counts = hash_map_new();
        for form in self.sentences.iter().flat_map(Sentence::forms) {
            *counts.entry(form).or_insert(0) += 1;
        }
        counts
    }

    /// Tag frequencies.
    pub fn tag_counts(&self) -> UPHashMap<&str, usize> {
        let mut counts = hash_map_new();
        for tag in self.sentences.iter().flat_map(Sentence::tags) {
            *counts.entry(tag).or_insert(0) += 1;
        }
        counts
    }

    /// Sentence length frequencies, ordered by length.
    pub fn length_distribution(&self) -> BTreeMap<usize, usize> {
        let mut dist = BTreeMap::new();
        for sentence in &self.sentences {
            *dist.entry(sentence.len()).or_insert(0) += 1;
        }
        dist
    }

    /// Split into parallel form and tag sequences.
    pub fn forms_and_tags(&self) -> (Vec<Vec<&str>>, Vec<Vec<&str>>) {
        self.sentences
            .iter()
            .map(|s| {
                (
                    s.forms().collect::<Vec<_>>(),
                    s.tags().collect::<Vec<_>>(),
                )
            })
            .unzip()
    }

    /// Consume the corpus, returning the sentences.
    pub fn into_sentences(self) -> Vec<Sentence> {
        self.sentences
    }
}

impl From<Vec<Sentence>> for Corpus {
    fn from(sentences: Vec<Sentence>) -> Self {
        let metadata = vec![SentenceMetadata::default(); sentences.len()];
        Self {
            sentences,
            metadata,
        }
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Sentence;
    type IntoIter = core::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Corpus {
        vec![
            Sentence::from_iter([("The", "DET"), ("cat", "NOUN")]),
            Sentence::from_iter([("The", "DET"), ("dog", "NOUN"), ("ran", "VERB")]),
            Sentence::from_iter([("Go", "VERB"), ("!", "PUNCT")]),
        ]
        .into()
    }

    #[test]
    fn test_token() {
        let token = Token::new("cat", "NOUN");
        assert_eq!(token.form(), "cat");
        assert_eq!(token.tag(), "NOUN");
        assert_eq!(Token::from(("cat", "NOUN")), token);
    }

    #[test]
    fn test_sentence() {
        let sentence = Sentence::from_iter([("The", "DET"), ("cat", "NOUN")]);
        assert_eq!(sentence.len(), 2);
        assert!(!sentence.is_empty());
        assert_eq!(sentence.forms().collect::<Vec<_>>(), vec!["The", "cat"]);
        assert_eq!(sentence.tags().collect::<Vec<_>>(), vec!["DET", "NOUN"]);
        assert!(Sentence::default().is_empty());
    }

    #[test]
    fn test_corpus_counts() {
        let corpus = sample();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.metadata().len(), 3);
        assert_eq!(corpus.token_count(), 7);

        let words = corpus.word_counts();
        assert_eq!(words.len(), 6);
        assert_eq!(words["The"], 2);

        let tags = corpus.tag_counts();
        assert_eq!(tags["VERB"], 2);
        assert_eq!(tags["PUNCT"], 1);

        let dist: Vec<(usize, usize)> = corpus.length_distribution().into_iter().collect();
        assert_eq!(dist, vec![(2, 2), (3, 1)]);

        let (forms, tags) = corpus.forms_and_tags();
        assert_eq!(forms[2], vec!["Go", "!"]);
        assert_eq!(tags[1], vec!["DET", "NOUN", "VERB"]);
    }
}
