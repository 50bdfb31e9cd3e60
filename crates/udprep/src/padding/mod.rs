//! # Post-Padding
//!
//! Variable-length id sequences are packed into fixed-width
//! [`PaddedMatrix`] rows of `max_len` columns:
//! * content is left-aligned; padding (`0`) is only ever appended;
//! * longer sequences keep their first `max_len` ids, and are counted;
//! * the true (kept) length of every row is returned alongside the matrix.
//!
//! ## Example
//! ```rust
//! use udprep::padding::Padder;
//!
//! let padded = Padder::new(5).pad(&[vec![5u32, 9, 2]]);
//! assert_eq!(padded.matrix.row(0), &[5, 9, 2, 0, 0]);
//! assert_eq!(padded.true_lengths, vec![3]);
//!
//! let rows = Padder::unpad(&padded.matrix, &padded.true_lengths).unwrap();
//! assert_eq!(rows, vec![vec![5, 9, 2]]);
//! ```

mod matrix;
mod padder;

#[doc(inline)]
pub use matrix::PaddedMatrix;
#[doc(inline)]
pub use padder::{DEFAULT_MAX_LEN, PAD_ID, PaddedBatch, PaddedSequences, Padder};
