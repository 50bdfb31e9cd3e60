//! # Sequence Encoder

use std::sync::Arc;

use crate::{
    conllu::{Sentence, Token},
    encoders::{EncodedSentence, SentenceEncoder},
    errors::{IdSpace, UPResult, UdPrepError},
    tags::TagSpace,
    types::{IdType, try_id_from_usize},
    vocab::{PAD_TOKEN, Vocabulary},
};

/// Encodes sentences with a frozen [`Vocabulary`] and a [`TagSpace`]; and decodes them back.
///
/// The vocabulary is fit once, on the training split; the same encoder is
/// then applied to every split.
pub struct SequenceEncoder<T: IdType, S: TagSpace + ?Sized = dyn TagSpace> {
    vocab: Arc<Vocabulary<T>>,
    tags: Arc<S>,
}

impl<T: IdType, S: TagSpace + ?Sized> Clone for SequenceEncoder<T, S> {
    fn clone(&self) -> Self {
        Self {
            vocab: self.vocab.clone(),
            tags: self.tags.clone(),
        }
    }
}

impl<T: IdType, S: TagSpace + ?Sized> SequenceEncoder<T, S> {
    /// Create a new encoder.
    ///
    /// ## Arguments
    /// * `vocab` - the frozen word form vocabulary.
    /// * `tags` - the tag space.
    pub fn new(
        vocab: Arc<Vocabulary<T>>,
        tags: Arc<S>,
    ) -> Self {
        Self { vocab, tags }
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &Arc<Vocabulary<T>> {
        &self.vocab
    }

    /// The tag space.
    pub fn tag_space(&self) -> &Arc<S> {
        &self.tags
    }

    /// Encode untagged word forms; for raw text at prediction time.
    pub fn encode_forms<I, F>(
        &self,
        forms: I,
    ) -> Vec<T>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        forms
            .into_iter()
            .map(|form| self.vocab.encode_token(form.as_ref()))
            .collect()
    }

    /// Encode one tag.
    pub fn encode_tag(
        &self,
        tag: &str,
    ) -> UPResult<T> {
        try_id_from_usize(self.tags.tag_to_id(tag)?)
    }

    /// Decode one tag id.
    ///
    /// ## Returns
    /// [`PAD_TOKEN`] for `0`; [`UdPrepError::OutOfRange`] past the tag space.
    pub fn decode_tag_id(
        &self,
        id: usize,
    ) -> UPResult<&str> {
        match id {
            0 => Ok(PAD_TOKEN),
            i if i <= self.tags.max_id() => self.tags.id_to_tag(i),
            _ => Err(UdPrepError::OutOfRange {
                space: IdSpace::Tag,
                id,
                max: self.tags.max_id(),
            }),
        }
    }

    /// Decode the first `true_length` positions of a sentence.
    ///
    /// This is the left inverse of [`SentenceEncoder::encode`] for sentences
    /// whose forms are all in the vocabulary. OOV ids decode to the OOV sentinel.
    ///
    /// ## Returns
    /// [`UdPrepError::ShapeMismatch`] if either sequence is shorter than `true_length`;
    /// [`UdPrepError::OutOfRange`] for any id outside its id space.
    pub fn decode(
        &self,
        token_ids: &[T],
        tag_ids: &[T],
        true_length: usize,
    ) -> UPResult<Sentence> {
        if token_ids.len() < true_length || tag_ids.len() < true_length {
            return Err(UdPrepError::ShapeMismatch(format!(
                "true length {true_length} exceeds {} token ids / {} tag ids",
                token_ids.len(),
                tag_ids.len()
            )));
        }

        token_ids[..true_length]
            .iter()
            .zip(&tag_ids[..true_length])
            .map(|(&token, &tag)| {
                let form = self.vocab.decode_token(token)?;
                let tag = self.decode_tag_id(tag.to_usize().unwrap_or(usize::MAX))?;
                Ok(Token::new(form, tag))
            })
            .collect::<UPResult<Vec<Token>>>()
            .map(Sentence::new)
    }

    /// Decode an [`EncodedSentence`].
    pub fn decode_encoded(
        &self,
        encoded: &EncodedSentence<T>,
    ) -> UPResult<Sentence> {
        self.decode(
            encoded.token_ids(),
            encoded.tag_ids(),
            encoded.true_length(),
        )
    }

    /// Count positions encoded as OOV.
    pub fn count_oov(
        &self,
        encoded: &EncodedSentence<T>,
    ) -> usize {
        let oov = self.vocab.oov_id();
        encoded.token_ids().iter().filter(|&&t| t == oov).count()
    }
}

impl<T: IdType, S: TagSpace + ?Sized> SentenceEncoder<T> for SequenceEncoder<T, S> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, sentence)))]
    fn encode(
        &self,
        sentence: &Sentence,
    ) -> UPResult<EncodedSentence<T>> {
        let token_ids = sentence
            .forms()
            .map(|form| self.vocab.encode_token(form))
            .collect();
        let tag_ids = sentence
            .tags()
            .map(|tag| self.encode_tag(tag))
            .collect::<UPResult<Vec<T>>>()?;
        EncodedSentence::new(token_ids, tag_ids)
    }
}
