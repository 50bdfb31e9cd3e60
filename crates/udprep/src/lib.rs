//! # `udprep` CoNLL-U Preparation for Sequence Taggers
//!
//! This crate turns Universal Dependencies CoNLL-U treebanks into the
//! fixed-width integer matrices a part-of-speech sequence model trains on;
//! and decodes the model's per-position scores back into tags.
//!
//! See:
//! * [`conllu`] to parse CoNLL-U text into a [`conllu::Corpus`].
//! * [`tags`] for the universal tag set and tag id spaces.
//! * [`vocab`] to fit, save and load word form vocabularies.
//! * [`encoders`] to encode sentences into id sequences, and back.
//! * [`padding`] to pad id sequences into matrices.
//! * [`prediction`] to decode model scores, and measure accuracy.
//! * [`pipeline`] to prepare train/dev/test splits in one call.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash``
//!
//! This swaps all `HashMap`/`HashSet` implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::UPHash{*}`` type alias machinery.
//!
//! #### feature: ``foldhash``
//!
//! This swaps all `HashMap`/`HashSet` implementations for ``foldhash``.
//! If both are enabled, ``ahash`` wins.
//!
//! #### feature: ``rayon``
//!
//! This enables `encoders::ParallelRayonEncoder`, which encodes batches
//! of sentences in parallel; output order always matches input order.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! ## Preparing Splits
//!
//! ```rust
//! use udprep::pipeline::PipelineOptions;
//!
//! let train = "\
//! 1\tThe\tthe\tDET\t_\t_\t2\tdet\t_\t_
//! 2\tcat\tcat\tNOUN\t_\t_\t0\troot\t_\t_
//! ";
//!
//! let pipeline = PipelineOptions::default().with_max_len(4).build();
//! let train = pipeline.load_str("train", train).unwrap();
//! let dataset = pipeline.prepare_loaded::<u32>(train, None, None).unwrap();
//!
//! assert_eq!(dataset.train.batch.tokens.row(0), &[1, 2, 0, 0]);
//! assert_eq!(dataset.train.batch.tags.row(0), &[6, 8, 0, 0]);
//! assert_eq!(dataset.train.batch.true_lengths, vec![2]);
//! ```
#![warn(missing_docs, unused)]

pub mod conllu;
pub mod encoders;
pub mod errors;
pub mod padding;
pub mod pipeline;
pub mod prediction;
pub mod tags;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{UPResult, UdPrepError};
#[doc(inline)]
pub use types::{DefaultId, IdType};
