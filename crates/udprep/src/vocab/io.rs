//! # Vocabulary IO
//!
//! The text format is one entry per line, in id order starting at `1`;
//! the last line is the OOV sentinel:
//!
//! ```text
//! the
//! cat
//! <OOV>
//! ```
//!
//! CoNLL-U forms never contain line breaks, so no escaping is needed.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    errors::{UPResult, UdPrepError},
    types::IdType,
    vocab::Vocabulary,
};

/// Write a [`Vocabulary`] to a [`Write`] writer.
pub fn write_vocabulary<T, W>(
    vocab: &Vocabulary<T>,
    writer: &mut W,
) -> UPResult<()>
where
    T: IdType,
    W: Write,
{
    for form in vocab.forms() {
        writeln!(writer, "{form}")?;
    }
    writeln!(writer, "{}", vocab.oov_token())?;
    writer.flush()?;
    Ok(())
}

/// Read a [`Vocabulary`] from a [`BufRead`] stream.
///
/// ## Returns
/// [`UdPrepError::EmptyVocabulary`] if the stream holds no lines;
/// [`UdPrepError::VocabConflict`] on empty or repeated forms.
pub fn read_vocabulary<T, R>(reader: R) -> UPResult<Vocabulary<T>>
where
    T: IdType,
    R: BufRead,
{
    let mut lines = reader.lines().collect::<Result<Vec<String>, _>>()?;
    let oov_token = lines.pop().ok_or(UdPrepError::EmptyVocabulary)?;
    Vocabulary::try_from_ordered_forms(lines, oov_token)
}

/// Save a [`Vocabulary`] to a file.
///
/// ## Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_vocabulary_path<T, P>(
    vocab: &Vocabulary<T>,
    path: P,
) -> UPResult<()>
where
    T: IdType,
    P: AsRef<Path>,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_vocabulary(vocab, &mut writer)
}

/// Load a [`Vocabulary`] from a file.
///
/// ## Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_vocabulary_path<T, P>(path: P) -> UPResult<Vocabulary<T>>
where
    T: IdType,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    read_vocabulary(reader)
}
