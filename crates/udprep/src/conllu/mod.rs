//! # CoNLL-U Corpus Ingestion
//!
//! CoNLL-U is a tab-separated format with one token record per line,
//! `#` comment lines, and a blank line between sentences:
//!
//! ```text
//! # text = The cat.
//! 1	The	the	DET	DT	_	2	det	_	_
//! 2	cat	cat	NOUN	NN	_	0	root	_	SpaceAfter=No
//! 3	.	.	PUNCT	.	_	2	punct	_	_
//! ```
//!
//! Only the ID, FORM and UPOS columns are consumed.
//!
//! * [`CorpusParser`] scans the text and rebuilds sentences,
//! * [`TokenIdKind`] drives multiword-range and empty-node filtering,
//! * [`Corpus`] and [`ParseStatistics`] are the parse results.

pub mod corpus;
pub mod parser;
pub mod statistics;
pub mod token_id;

#[doc(inline)]
pub use corpus::{Corpus, Sentence, SentenceMetadata, Token};
#[doc(inline)]
pub use parser::{CorpusParser, ParserOptions, parse};
#[doc(inline)]
pub use statistics::{CorpusSummary, MalformedLine, ParseStatistics, ParseWarning};
#[doc(inline)]
pub use token_id::{MultiwordPolicy, TokenIdKind};

/// The number of tab-separated columns in a CoNLL-U token record.
pub const CONLLU_COLUMNS: usize = 10;

/// The CoNLL-U placeholder for an unspecified field.
pub const PLACEHOLDER: &str = "_";
