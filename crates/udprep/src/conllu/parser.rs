//! # CoNLL-U Corpus Parser

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    conllu::{
        CONLLU_COLUMNS,
        Corpus,
        MalformedLine,
        MultiwordPolicy,
        PLACEHOLDER,
        ParseStatistics,
        ParseWarning,
        Sentence,
        SentenceMetadata,
        Token,
        TokenIdKind,
    },
    errors::{UPResult, UdPrepError},
};

/// The default sentence length limit.
pub const DEFAULT_MAX_SENTENCE_LENGTH: usize = 128;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Options for configuring a [`CorpusParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Sentences with more tokens than this are dropped whole.
    pub max_sentence_length: usize,

    /// How record ids are classified.
    pub multiword_policy: MultiwordPolicy,

    /// Fail on the first malformed line, instead of skipping it with a warning.
    pub fail_on_malformed: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_sentence_length: DEFAULT_MAX_SENTENCE_LENGTH,
            multiword_policy: MultiwordPolicy::default(),
            fail_on_malformed: false,
        }
    }
}

impl ParserOptions {
    /// Sets the sentence length limit.
    pub fn with_max_sentence_length(
        mut self,
        max_sentence_length: usize,
    ) -> Self {
        self.max_sentence_length = max_sentence_length;
        self
    }

    /// Sets the record id policy.
    pub fn with_multiword_policy(
        mut self,
        multiword_policy: MultiwordPolicy,
    ) -> Self {
        self.multiword_policy = multiword_policy;
        self
    }

    /// Sets whether malformed lines are fatal.
    pub fn with_fail_on_malformed(
        mut self,
        fail_on_malformed: bool,
    ) -> Self {
        self.fail_on_malformed = fail_on_malformed;
        self
    }

    /// Build a [`CorpusParser`] with these options.
    pub fn build(self) -> CorpusParser {
        CorpusParser::new(self)
    }
}

/// The lines between two sentence boundaries.
#[derive(Default)]
struct SentenceBlock {
    first_line: usize,
    lines: usize,
    tokens: Vec<Token>,
    comments: Vec<String>,
}

/// Mutable scan state; local to a single parse.
struct ParseState<'a> {
    options: &'a ParserOptions,
    corpus: Corpus,
    stats: ParseStatistics,
    block: SentenceBlock,
}

impl<'a> ParseState<'a> {
    fn new(options: &'a ParserOptions) -> Self {
        Self {
            options,
            corpus: Corpus::new(),
            stats: ParseStatistics::new(options.max_sentence_length),
            block: SentenceBlock::default(),
        }
    }

    fn feed_line(
        &mut self,
        line_number: usize,
        line: &str,
    ) -> UPResult<()> {
        let line = line.trim();
        if line.is_empty() {
            self.finish_block();
            return Ok(());
        }

        if self.block.lines == 0 {
            self.block.first_line = line_number;
        }
        self.block.lines += 1;

        if line.starts_with('#') {
            self.stats.comment_lines += 1;
            self.block.comments.push(line.to_string());
            return Ok(());
        }

        match self.read_record(line) {
            Ok(Some(token)) => self.block.tokens.push(token),
            Ok(None) => {}
            Err(kind) => self.malformed(line_number, line, kind)?,
        }
        Ok(())
    }

    /// Record a line which could not be decoded; it still belongs to the current block.
    fn feed_undecodable(
        &mut self,
        line_number: usize,
        raw: &[u8],
    ) -> UPResult<()> {
        if self.block.lines == 0 {
            self.block.first_line = line_number;
        }
        self.block.lines += 1;
        self.malformed(
            line_number,
            &String::from_utf8_lossy(raw),
            MalformedLine::InvalidUtf8,
        )
    }

    /// Read a token record.
    ///
    /// Returns `None` for records removed by structural filtering.
    fn read_record(
        &mut self,
        line: &str,
    ) -> Result<Option<Token>, MalformedLine> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != CONLLU_COLUMNS {
            return Err(MalformedLine::ColumnCount(fields.len()));
        }
        let (id, form, tag) = (fields[0], fields[1], fields[3]);

        match self.options.multiword_policy.classify(id)? {
            TokenIdKind::Multiword => {
                self.stats.removed_multiword_count += 1;
                return Ok(None);
            }
            TokenIdKind::EmptyNode => {
                self.stats.removed_empty_nodes += 1;
                return Ok(None);
            }
            TokenIdKind::Word => {}
        }

        if form.is_empty() {
            return Err(MalformedLine::EmptyForm);
        }
        if tag.is_empty() || tag == PLACEHOLDER {
            return Err(MalformedLine::MissingTag);
        }
        Ok(Some(Token::new(form, tag)))
    }

    fn malformed(
        &mut self,
        line_number: usize,
        line: &str,
        kind: MalformedLine,
    ) -> UPResult<()> {
        if self.options.fail_on_malformed {
            return Err(UdPrepError::MalformedLine { line_number, kind });
        }
        log::warn!("skipping line {line_number}: {kind}: {line:?}");
        self.stats.malformed_lines += 1;
        self.stats.warnings.push(ParseWarning { line_number, kind });
        Ok(())
    }

    fn finish_block(&mut self) {
        if self.block.lines == 0 {
            return;
        }
        let block = core::mem::take(&mut self.block);

        if block.tokens.is_empty() {
            self.stats.dropped_empty_blocks += 1;
            return;
        }

        self.stats.total_sentences_processed += 1;

        if block.tokens.len() > self.options.max_sentence_length {
            self.stats.removed_long_sentences += 1;
            log::debug!(
                "removed long sentence at line {} with {} tokens",
                block.first_line,
                block.tokens.len()
            );
            return;
        }

        self.stats.kept_sentences += 1;
        self.corpus.push(
            Sentence::new(block.tokens),
            SentenceMetadata {
                line_number: block.first_line,
                comments: block.comments,
            },
        );
    }

    fn finish(mut self) -> (Corpus, ParseStatistics) {
        self.finish_block();
        (self.corpus, self.stats)
    }
}

/// A streaming CoNLL-U parser.
///
/// Each parse builds its own [`Corpus`] and [`ParseStatistics`];
/// the parser itself holds only options and can be reused and shared.
#[derive(Debug, Default, Clone)]
pub struct CorpusParser {
    options: ParserOptions,
}

impl CorpusParser {
    /// Create a new parser.
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// The parser options.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse CoNLL-U text.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn parse_str(
        &self,
        text: &str,
    ) -> UPResult<(Corpus, ParseStatistics)> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut state = ParseState::new(&self.options);
        for (idx, line) in text.lines().enumerate() {
            state.feed_line(idx + 1, line)?;
        }
        Ok(state.finish())
    }

    /// Parse CoNLL-U lines from a reader.
    ///
    /// ## Returns
    /// [`UdPrepError::Io`] if reading fails; no partial result is returned.
    /// A line which is not valid UTF-8 is a malformed line, not an I/O error.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, reader)))]
    pub fn parse_reader<R: BufRead>(
        &self,
        reader: R,
    ) -> UPResult<(Corpus, ParseStatistics)> {
        let mut state = ParseState::new(&self.options);
        for (idx, raw) in reader.split(b'\n').enumerate() {
            let mut raw = raw?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            if idx == 0 && raw.starts_with(UTF8_BOM) {
                raw = raw.split_off(UTF8_BOM.len());
            }
            match String::from_utf8(raw) {
                Ok(line) => state.feed_line(idx + 1, &line)?,
                Err(err) => state.feed_undecodable(idx + 1, err.as_bytes())?,
            }
        }
        Ok(state.finish())
    }

    /// Parse a CoNLL-U file.
    ///
    /// The file is closed before this returns, on every path.
    pub fn parse_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> UPResult<(Corpus, ParseStatistics)> {
        let path = path.as_ref();
        log::info!("loading CoNLL-U file: {}", path.display());

        let file = File::open(path).inspect_err(|err| {
            log::error!("failed to open {}: {err}", path.display());
        })?;
        self.parse_reader(BufReader::new(file))
    }
}

/// Parse CoNLL-U text with default options and the given sentence length limit.
pub fn parse(
    raw_text: &str,
    max_sentence_length: usize,
) -> UPResult<(Corpus, ParseStatistics)> {
    ParserOptions::default()
        .with_max_sentence_length(max_sentence_length)
        .build()
        .parse_str(raw_text)
}
