//! # Split Preparation Pipeline
//!
//! Parses the train/dev/test splits, fits the vocabulary (and, optionally,
//! the extended tag space) on the training split only, then encodes and
//! pads every split with the same frozen encoder.
//!
//! ## Example
//! ```rust,no_run
//! use udprep::{DefaultId, pipeline::PipelineOptions};
//!
//! let dataset = PipelineOptions::default()
//!     .with_max_len(64)
//!     .build()
//!     .prepare_splits::<DefaultId, _>("train.conllu", Some("dev.conllu"), Some("test.conllu"))
//!     .unwrap();
//!
//! for split in dataset.splits() {
//!     split.summary.log();
//! }
//! ```

use core::fmt;
use std::{path::Path, sync::Arc};

use crate::{
    conllu::{Corpus, CorpusParser, CorpusSummary, ParseStatistics, ParserOptions, Sentence},
    encoders::{EncodedSentence, SentenceEncoder, SequenceEncoder},
    errors::UPResult,
    padding::{DEFAULT_MAX_LEN, PaddedBatch, Padder},
    tags::{ExtendedTagSpace, TagSpace, UniversalTagSpace},
    types::IdType,
    vocab::{VocabularyBuilder, VocabularyOptions},
};
#[cfg(feature = "rayon")]
use crate::encoders::ParallelRayonEncoder;

/// How tags are mapped to ids.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum TagMode {
    /// The closed universal tag set; other tags map to `UNK`.
    #[default]
    Universal,

    /// The closed universal tag set; other tags are errors.
    Strict,

    /// The universal tag set, extended by the tags of the training split.
    Extended,
}

impl TagMode {
    /// Build the tag space for this mode.
    ///
    /// ## Arguments
    /// * `train` - the training sentences; only read by [`TagMode::Extended`].
    pub fn tag_space<'a, I>(
        self,
        train: I,
    ) -> Arc<dyn TagSpace>
    where
        I: IntoIterator<Item = &'a Sentence>,
    {
        match self {
            TagMode::Universal => Arc::new(UniversalTagSpace::new()),
            TagMode::Strict => Arc::new(UniversalTagSpace::strict()),
            TagMode::Extended => {
                let space = ExtendedTagSpace::fit(train);
                log::info!(
                    "extended tag space: {} extra tags {:?}",
                    space.extra_tags().len(),
                    space.extra_tags()
                );
                Arc::new(space)
            }
        }
    }
}

/// Options for configuring a [`Pipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Options for parsing every split.
    pub parser: ParserOptions,

    /// Options for fitting the vocabulary.
    pub vocab: VocabularyOptions,

    /// The padded width.
    pub max_len: usize,

    /// How tags are mapped to ids.
    pub tag_mode: TagMode,

    /// Encode batches in parallel, when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            parser: ParserOptions::default(),
            vocab: VocabularyOptions::default(),
            max_len: DEFAULT_MAX_LEN,
            tag_mode: TagMode::default(),
            parallel: true,
        }
    }
}

impl PipelineOptions {
    /// Sets the parser options.
    pub fn with_parser(
        mut self,
        parser: ParserOptions,
    ) -> Self {
        self.parser = parser;
        self
    }

    /// Sets the vocabulary options.
    pub fn with_vocab(
        mut self,
        vocab: VocabularyOptions,
    ) -> Self {
        self.vocab = vocab;
        self
    }

    /// Sets the padded width.
    pub fn with_max_len(
        mut self,
        max_len: usize,
    ) -> Self {
        self.max_len = max_len;
        self
    }

    /// Sets the tag mode.
    pub fn with_tag_mode(
        mut self,
        tag_mode: TagMode,
    ) -> Self {
        self.tag_mode = tag_mode;
        self
    }

    /// Sets whether batches are encoded in parallel.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build a [`Pipeline`] with these options.
    pub fn build(self) -> Pipeline {
        Pipeline::new(self)
    }
}

/// A parsed, not yet encoded, split.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSplit {
    /// The split name; e.g. `"train"`.
    pub name: String,

    /// The kept sentences.
    pub corpus: Corpus,

    /// The parse counters.
    pub stats: ParseStatistics,
}

/// Per-split summary; the corpus summary plus encoding counters.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSummary {
    /// The parse summary.
    pub corpus: CorpusSummary,

    /// Tokens encoded as OOV.
    pub oov_tokens: usize,

    /// Rows truncated by the padder.
    pub truncated_rows: usize,
}

impl SplitSummary {
    /// Log the summary at `info` level, one line per entry.
    pub fn log(&self) {
        for line in self.to_string().lines() {
            log::info!("{line}");
        }
    }
}

impl fmt::Display for SplitSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.corpus)?;
        writeln!(f, "  OOV tokens: {}", self.oov_tokens)?;
        write!(f, "  rows truncated by padding: {}", self.truncated_rows)
    }
}

/// One split, parsed, encoded and padded.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSplit<T: IdType> {
    /// The split name.
    pub name: String,

    /// The kept sentences.
    pub corpus: Corpus,

    /// The padded token and tag matrices.
    pub batch: PaddedBatch<T>,

    /// The split summary.
    pub summary: SplitSummary,
}

/// The prepared splits, and the encoder fit on the training split.
#[derive(Clone)]
pub struct PreparedDataset<T: IdType> {
    /// The frozen encoder shared by every split.
    pub encoder: SequenceEncoder<T>,

    /// The padder shared by every split.
    pub padder: Padder,

    /// The training split.
    pub train: PreparedSplit<T>,

    /// The development split.
    pub dev: Option<PreparedSplit<T>>,

    /// The test split.
    pub test: Option<PreparedSplit<T>>,
}

impl<T: IdType> PreparedDataset<T> {
    /// Iterate over the present splits, train first.
    pub fn splits(&self) -> impl Iterator<Item = &PreparedSplit<T>> {
        core::iter::once(&self.train)
            .chain(self.dev.as_ref())
            .chain(self.test.as_ref())
    }
}

/// Prepares CoNLL-U splits for a sequence model.
#[derive(Debug, Default, Clone)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a new pipeline.
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// The pipeline options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    fn parser(&self) -> CorpusParser {
        CorpusParser::new(self.options.parser)
    }

    /// Parse a split from a file.
    pub fn load<P: AsRef<Path>>(
        &self,
        name: &str,
        path: P,
    ) -> UPResult<LoadedSplit> {
        let (corpus, stats) = self.parser().parse_path(path)?;
        Ok(LoadedSplit {
            name: name.to_string(),
            corpus,
            stats,
        })
    }

    /// Parse a split from text.
    pub fn load_str(
        &self,
        name: &str,
        text: &str,
    ) -> UPResult<LoadedSplit> {
        let (corpus, stats) = self.parser().parse_str(text)?;
        Ok(LoadedSplit {
            name: name.to_string(),
            corpus,
            stats,
        })
    }

    /// Fit the encoder on the training split.
    ///
    /// This is the only place a vocabulary or tag space is fit;
    /// dev and test splits are only ever encoded.
    pub fn fit<T: IdType>(
        &self,
        train: &LoadedSplit,
    ) -> UPResult<SequenceEncoder<T>> {
        let vocab = VocabularyBuilder::new(self.options.vocab.clone()).fit(&train.corpus)?;
        let tags = self.options.tag_mode.tag_space(&train.corpus);
        Ok(SequenceEncoder::new(Arc::new(vocab), tags))
    }

    /// Encode and pad a split with a fitted encoder.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(split = %split.name)))]
    pub fn prepare<T: IdType>(
        &self,
        encoder: &SequenceEncoder<T>,
        split: LoadedSplit,
    ) -> UPResult<PreparedSplit<T>> {
        let encoded = self.encode_batch(encoder, split.corpus.sentences())?;
        let batch = Padder::new(self.options.max_len).pad_encoded(&encoded);

        let summary = SplitSummary {
            corpus: CorpusSummary::new(split.name.clone(), &split.corpus, &split.stats),
            oov_tokens: encoded.iter().map(|e| encoder.count_oov(e)).sum(),
            truncated_rows: batch.truncated_rows,
        };
        summary.log();

        Ok(PreparedSplit {
            name: split.name,
            corpus: split.corpus,
            batch,
            summary,
        })
    }

    fn encode_batch<T: IdType>(
        &self,
        encoder: &SequenceEncoder<T>,
        sentences: &[Sentence],
    ) -> UPResult<Vec<EncodedSentence<T>>> {
        #[cfg(feature = "rayon")]
        {
            if self.options.parallel {
                return ParallelRayonEncoder::new(encoder.clone()).encode_batch(sentences);
            }
        }
        encoder.encode_batch(sentences)
    }

    /// Fit on the training split, then prepare every split.
    pub fn prepare_loaded<T: IdType>(
        &self,
        train: LoadedSplit,
        dev: Option<LoadedSplit>,
        test: Option<LoadedSplit>,
    ) -> UPResult<PreparedDataset<T>> {
        let encoder = self.fit(&train)?;
        let train = self.prepare(&encoder, train)?;
        let dev = dev.map(|s| self.prepare(&encoder, s)).transpose()?;
        let test = test.map(|s| self.prepare(&encoder, s)).transpose()?;
        Ok(PreparedDataset {
            encoder,
            padder: Padder::new(self.options.max_len),
            train,
            dev,
            test,
        })
    }

    /// Load, fit and prepare the train/dev/test files.
    ///
    /// ## Returns
    /// [`crate::UdPrepError::Io`] if any file cannot be read.
    pub fn prepare_splits<T, P>(
        &self,
        train: P,
        dev: Option<P>,
        test: Option<P>,
    ) -> UPResult<PreparedDataset<T>>
    where
        T: IdType,
        P: AsRef<Path>,
    {
        let train = self.load("train", train)?;
        let dev = dev.map(|p| self.load("dev", p)).transpose()?;
        let test = test.map(|p| self.load("test", p)).transpose()?;
        self.prepare_loaded(train, dev, test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{UdPrepError, tags::UNK_TAG_ID, types::check_is_send};

    const TRAIN: &str = "\
# sent_id = 1
1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_
2\tcat\tcat\tNOUN\tNN\t_\t3\tnsubj\t_\t_
3\tsleeps\tsleep\tVERB\tVBZ\t_\t0\troot\t_\t_

1\tA\ta\tDET\tDT\t_\t2\tdet\t_\t_
2\tdog\tdog\tNOUN\tNN\t_\t0\troot\t_\t_
";

    const DEV: &str = "\
1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_
2\tbird\tbird\tNOUN\tNN\t_\t0\troot\t_\t_
3\tsings\tsing\tVERB\tVBZ\t_\t2\tacl\t_\t_
";

    #[test]
    fn test_tag_mode_strings() {
        assert_eq!(TagMode::Extended.to_string(), "extended");
        assert_eq!("strict".parse::<TagMode>().unwrap(), TagMode::Strict);
        assert_eq!(TagMode::default(), TagMode::Universal);
    }

    #[test]
    fn test_prepare_loaded() {
        let pipeline = PipelineOptions::default().with_max_len(4).build();
        let train = pipeline.load_str("train", TRAIN).unwrap();
        let dev = pipeline.load_str("dev", DEV).unwrap();

        let dataset = pipeline
            .prepare_loaded::<u32>(train, Some(dev), None)
            .unwrap();
        check_is_send(&dataset.train);

        assert_eq!(dataset.encoder.vocab().forms(), &["The", "cat", "sleeps", "A", "dog"]);
        assert_eq!(dataset.splits().count(), 2);

        let train = &dataset.train;
        assert_eq!(train.batch.tokens.shape(), [2, 4]);
        assert_eq!(train.batch.tokens.row(0), &[1, 2, 3, 0]);
        assert_eq!(train.batch.tags.row(1), &[6, 8, 0, 0]);
        assert_eq!(train.batch.true_lengths, vec![3, 2]);
        assert_eq!(train.summary.oov_tokens, 0);
        assert_eq!(train.corpus.metadata()[0].comments, vec!["# sent_id = 1"]);

        let Some(dev) = &dataset.dev else {
            panic!("missing dev split");
        };
        assert_eq!(dev.batch.tokens.row(0), &[1, 6, 6, 0]);
        assert_eq!(dev.summary.oov_tokens, 2);
        assert_eq!(dev.summary.corpus.name, "dev");
    }

    #[test]
    fn test_serial_matches_parallel() {
        let serial = PipelineOptions::default().with_parallel(false).build();
        let parallel = PipelineOptions::default().with_parallel(true).build();

        let a = serial
            .prepare_loaded::<u32>(serial.load_str("train", TRAIN).unwrap(), None, None)
            .unwrap();
        let b = parallel
            .prepare_loaded::<u32>(parallel.load_str("train", TRAIN).unwrap(), None, None)
            .unwrap();
        assert_eq!(a.train, b.train);
    }

    #[test]
    fn test_tag_modes() {
        let text = "1\tThe\t_\tDET\t_\t_\t_\t_\t_\t_\n2\tcat\t_\tNN\t_\t_\t_\t_\t_\t_\n";

        let universal = PipelineOptions::default().build();
        let ds = universal
            .prepare_loaded::<u32>(universal.load_str("train", text).unwrap(), None, None)
            .unwrap();
        assert_eq!(ds.train.batch.tags.get(0, 1), Some(UNK_TAG_ID as u32));

        let extended = PipelineOptions::default()
            .with_tag_mode(TagMode::Extended)
            .build();
        let ds = extended
            .prepare_loaded::<u32>(extended.load_str("train", text).unwrap(), None, None)
            .unwrap();
        assert_eq!(ds.train.batch.tags.get(0, 1), Some(19));
        assert_eq!(ds.encoder.tag_space().class_count(), 20);

        let strict = PipelineOptions::default()
            .with_tag_mode(TagMode::Strict)
            .build();
        assert!(matches!(
            strict.prepare_loaded::<u32>(strict.load_str("train", text).unwrap(), None, None),
            Err(UdPrepError::UnknownTag(_))
        ));
    }

    #[test]
    fn test_prepare_splits_from_files() {
        tempdir::TempDir::new("udprep_pipeline")
            .and_then(|dir| {
                let train_path = dir.path().join("train.conllu");
                let dev_path = dir.path().join("dev.conllu");
                std::fs::write(&train_path, TRAIN)?;
                std::fs::write(&dev_path, DEV)?;

                let pipeline = PipelineOptions::default().build();
                let ds = pipeline
                    .prepare_splits::<u16, _>(&train_path, Some(&dev_path), None)
                    .unwrap();
                assert_eq!(ds.train.summary.corpus.stats.kept_sentences, 2);
                assert_eq!(ds.dev.as_ref().map(|s| s.corpus.len()), Some(1));
                assert!(ds.test.is_none());

                let missing = dir.path().join("missing.conllu");
                assert!(matches!(
                    pipeline.prepare_splits::<u16, _>(&train_path, None, Some(&missing)),
                    Err(UdPrepError::Io(_))
                ));
                Ok(())
            })
            .unwrap();
    }
}
