//! # Parse Statistics and Warnings

use core::fmt;

use crate::conllu::{CONLLU_COLUMNS, Corpus};

/// Why a non-blank, non-comment line was not used as a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedLine {
    /// The line did not split into exactly [`CONLLU_COLUMNS`] tab-separated fields.
    #[error("expected {expected} columns, found {0}", expected = CONLLU_COLUMNS)]
    ColumnCount(usize),

    /// The ID column was rejected by the [`crate::conllu::MultiwordPolicy`].
    #[error("invalid token id {0:?}")]
    InvalidTokenId(String),

    /// The FORM column was empty.
    #[error("empty word form")]
    EmptyForm,

    /// The UPOS column was empty or the `_` placeholder.
    #[error("missing UPOS tag")]
    MissingTag,

    /// The line was not valid UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,
}

/// A recoverable problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// The 1-based line number.
    pub line_number: usize,

    /// What was wrong.
    pub kind: MalformedLine,
}

impl fmt::Display for ParseWarning {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.kind)
    }
}

/// Counters accumulated over one parse.
///
/// These are returned from each parse; there is no shared state between parses.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseStatistics {
    /// The sentence length limit the parse was run with.
    pub max_sentence_length: usize,

    /// Sentences finalized with at least one token.
    pub total_sentences_processed: usize,

    /// Sentences retained in the corpus.
    pub kept_sentences: usize,

    /// Multiword range records removed.
    pub removed_multiword_count: usize,

    /// Empty node records removed.
    pub removed_empty_nodes: usize,

    /// Sentences dropped for exceeding `max_sentence_length`.
    pub removed_long_sentences: usize,

    /// Blocks which ended with no tokens; e.g. only comments or removed records.
    pub dropped_empty_blocks: usize,

    /// Comment lines seen.
    pub comment_lines: usize,

    /// Malformed lines skipped.
    pub malformed_lines: usize,

    /// One warning per malformed line, in line order.
    pub warnings: Vec<ParseWarning>,
}

impl ParseStatistics {
    /// Create empty statistics for the given length limit.
    pub fn new(max_sentence_length: usize) -> Self {
        Self {
            max_sentence_length,
            ..Default::default()
        }
    }

    /// The number of records excluded by structural filtering.
    pub fn removed_records(&self) -> usize {
        self.removed_multiword_count + self.removed_empty_nodes
    }
}

/// Per-split summary of a parse, for inspection before training.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusSummary {
    /// The split name; e.g. `"train"`.
    pub name: String,

    /// The parse counters.
    pub stats: ParseStatistics,

    /// Tokens in kept sentences.
    pub total_tokens: usize,

    /// Distinct word forms in kept sentences.
    pub distinct_forms: usize,

    /// Distinct tags in kept sentences.
    pub distinct_tags: usize,

    /// Shortest kept sentence.
    pub min_length: usize,

    /// Longest kept sentence.
    pub max_length: usize,

    /// Mean kept sentence length.
    pub mean_length: f64,

    /// The most frequent tags, most frequent first.
    pub top_tags: Vec<(String, usize)>,
}

impl CorpusSummary {
    /// The number of tags listed in [`CorpusSummary::top_tags`].
    pub const TOP_TAGS: usize = 10;

    /// Summarize a parsed corpus.
    pub fn new(
        name: impl Into<String>,
        corpus: &Corpus,
        stats: &ParseStatistics,
    ) -> Self {
        let lengths = corpus.iter().map(|s| s.len());
        let total_tokens = corpus.token_count();
        let mean_length = if corpus.is_empty() {
            0.0
        } else {
            total_tokens as f64 / corpus.len() as f64
        };

        let tag_counts = corpus.tag_counts();
        let mut top_tags: Vec<(String, usize)> = tag_counts
            .iter()
            .map(|(tag, &count)| (tag.to_string(), count))
            .collect();
        top_tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_tags.truncate(Self::TOP_TAGS);

        Self {
            name: name.into(),
            stats: stats.clone(),
            total_tokens,
            distinct_forms: corpus.word_counts().len(),
            distinct_tags: tag_counts.len(),
            min_length: lengths.clone().min().unwrap_or(0),
            max_length: lengths.max().unwrap_or(0),
            mean_length,
            top_tags,
        }
    }

    /// Log the summary at `info` level, one line per entry.
    pub fn log(&self) {
        for line in self.to_string().lines() {
            log::info!("{line}");
        }
    }
}

impl fmt::Display for CorpusSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = &self.stats;
        writeln!(f, "[{}] CoNLL-U processing summary", self.name)?;
        writeln!(f, "  sentences processed: {}", s.total_sentences_processed)?;
        writeln!(f, "  sentences kept: {}", s.kept_sentences)?;
        writeln!(
            f,
            "  sentences removed (length > {}): {}",
            s.max_sentence_length, s.removed_long_sentences
        )?;
        writeln!(f, "  empty blocks dropped: {}", s.dropped_empty_blocks)?;
        writeln!(f, "  multiword tokens removed: {}", s.removed_multiword_count)?;
        writeln!(f, "  empty nodes removed: {}", s.removed_empty_nodes)?;
        writeln!(f, "  malformed lines skipped: {}", s.malformed_lines)?;
        writeln!(f, "  total tokens: {}", self.total_tokens)?;
        writeln!(
            f,
            "  sentence length: min {} / mean {:.2} / max {}",
            self.min_length, self.mean_length, self.max_length
        )?;
        writeln!(f, "  distinct forms: {}", self.distinct_forms)?;
        write!(f, "  distinct tags: {}", self.distinct_tags)?;
        for (tag, count) in &self.top_tags {
            write!(f, "\n    {tag}: {count}")?;
        }
        Ok(())
    }
}
