//! # Sequence Tagger Seam

use crate::{
    conllu::{Sentence, Token},
    encoders::SequenceEncoder,
    errors::{UPResult, UdPrepError},
    padding::{PaddedBatch, PaddedMatrix, Padder},
    prediction::ProbabilityTensor,
    tags::TagSpace,
    types::IdType,
};

/// A sequence model scoring every tag class at every position.
///
/// Implemented outside this crate, by whatever wraps the trained model.
pub trait SequenceTagger<T: IdType> {
    /// Score a padded `[N, max_len]` token id matrix.
    ///
    /// ## Returns
    /// A `[N, max_len, classes]` tensor, where `classes` is the
    /// tag space class count (including the padding class `0`).
    fn predict(
        &self,
        tokens: &PaddedMatrix<T>,
    ) -> UPResult<ProbabilityTensor>;
}

/// Decode model scores to tag strings over the true lengths.
///
/// ## Returns
/// [`UdPrepError::ShapeMismatch`] if the tensor class count differs
/// from the tag space class count, or the lengths do not fit the tensor.
pub fn decode_predictions<T, S>(
    encoder: &SequenceEncoder<T, S>,
    scores: &ProbabilityTensor,
    true_lengths: &[usize],
) -> UPResult<Vec<Vec<String>>>
where
    T: IdType,
    S: TagSpace + ?Sized,
{
    let class_count = encoder.tag_space().class_count();
    if scores.classes() != class_count {
        return Err(UdPrepError::ShapeMismatch(format!(
            "model scores {} classes; tag space has {class_count}",
            scores.classes()
        )));
    }
    scores
        .argmax(true_lengths)?
        .into_iter()
        .map(|ids| {
            ids.into_iter()
                .map(|id| encoder.decode_tag_id(id).map(str::to_string))
                .collect::<UPResult<Vec<String>>>()
        })
        .collect()
}

/// Run a model over a padded batch, and decode its predictions.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn predict_tags<T, S, M>(
    model: &M,
    encoder: &SequenceEncoder<T, S>,
    batch: &PaddedBatch<T>,
) -> UPResult<Vec<Vec<String>>>
where
    T: IdType,
    S: TagSpace + ?Sized,
    M: SequenceTagger<T> + ?Sized,
{
    let scores = model.predict(&batch.tokens)?;
    if scores.rows() != batch.len() || scores.max_len() != batch.max_len() {
        return Err(UdPrepError::ShapeMismatch(format!(
            "model scores {:?} for a [{}, {}] batch",
            scores.shape(),
            batch.len(),
            batch.max_len()
        )));
    }
    decode_predictions(encoder, &scores, &batch.true_lengths)
}

/// Tag whitespace-tokenized raw text.
///
/// Each text is one sentence; words past the padder's `max_len` are dropped
/// from the result, as the model never sees them.
///
/// ## Arguments
/// * `model` - the tagger.
/// * `encoder` - the fitted encoder.
/// * `padder` - the padder the model was trained with.
/// * `texts` - the raw sentences.
pub fn tag_text<T, S, M, R>(
    model: &M,
    encoder: &SequenceEncoder<T, S>,
    padder: &Padder,
    texts: &[R],
) -> UPResult<Vec<Sentence>>
where
    T: IdType,
    S: TagSpace + ?Sized,
    M: SequenceTagger<T> + ?Sized,
    R: AsRef<str>,
{
    let words: Vec<Vec<&str>> = texts
        .iter()
        .map(|text| text.as_ref().split_whitespace().collect())
        .collect();
    let ids: Vec<Vec<T>> = words
        .iter()
        .map(|ws| encoder.encode_forms(ws))
        .collect();

    let padded = padder.pad(&ids);
    let scores = model.predict(&padded.matrix)?;
    if scores.rows() != ids.len() || scores.max_len() != padder.max_len() {
        return Err(UdPrepError::ShapeMismatch(format!(
            "model scores {:?} for a [{}, {}] batch",
            scores.shape(),
            ids.len(),
            padder.max_len()
        )));
    }
    let tags = decode_predictions(encoder, &scores, &padded.true_lengths)?;

    Ok(words
        .into_iter()
        .zip(tags)
        .map(|(ws, ts)| {
            ws.into_iter()
                .zip(ts)
                .map(|(w, t)| Token::new(w, t))
                .collect()
        })
        .collect())
}
