//! # Word Form Vocabulary

use crate::{
    conllu::Sentence,
    errors::{IdSpace, UPResult, UdPrepError},
    types::{IdType, UPHashMap, hash_map_with_capacity, try_id_from_usize},
    vocab::{DEFAULT_OOV_TOKEN, PAD_TOKEN},
};

/// A frozen word form vocabulary.
///
/// ## Id layout
/// * `0` - padding; decodes to [`PAD_TOKEN`].
/// * `1..=n` - the `n` known forms, in first-occurrence order.
/// * `n + 1` - the out-of-vocabulary id; decodes to the OOV sentinel.
///
/// `vocab_size() == n + 1`, so every id in `1..=vocab_size()` maps to exactly one entry.
///
/// There are no mutating methods; build one with [`VocabularyBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary<T: IdType> {
    forms: Vec<String>,
    index: UPHashMap<String, T>,
    oov_token: String,
    oov_id: T,
}

impl<T: IdType> Vocabulary<T> {
    /// Build a vocabulary from forms, keeping the first occurrence of each.
    ///
    /// ## Arguments
    /// * `forms` - the forms, in id order; repeats are skipped.
    /// * `oov_token` - the OOV sentinel string.
    ///
    /// ## Returns
    /// [`UdPrepError::VocabSizeOverflow`] if the vocab does not fit in `T`;
    /// [`UdPrepError::VocabConflict`] if a form equals the OOV sentinel.
    pub fn from_forms<I, S>(
        forms: I,
        oov_token: impl Into<String>,
    ) -> UPResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let forms = forms.into_iter();
        let mut index: UPHashMap<String, T> = hash_map_with_capacity(forms.size_hint().0);
        let mut ordered = Vec::new();
        for form in forms {
            let form = form.as_ref();
            if index.contains_key(form) {
                continue;
            }
            ordered.push(form.to_string());
            index.insert(form.to_string(), try_id_from_usize(ordered.len())?);
        }
        Self::init(ordered, index, oov_token.into())
    }

    /// Build a vocabulary from forms which must be exactly in id order.
    ///
    /// ## Returns
    /// [`UdPrepError::VocabConflict`] on an empty or repeated form,
    /// or a form equal to the OOV sentinel.
    pub fn try_from_ordered_forms<I, S>(
        forms: I,
        oov_token: impl Into<String>,
    ) -> UPResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index: UPHashMap<String, T> = UPHashMap::default();
        let mut ordered = Vec::new();
        for form in forms {
            let form: String = form.into();
            if form.is_empty() {
                return Err(UdPrepError::VocabConflict(format!(
                    "empty form at id {}",
                    ordered.len() + 1
                )));
            }
            if index.contains_key(&form) {
                return Err(UdPrepError::VocabConflict(format!(
                    "repeated form {form:?} at id {}",
                    ordered.len() + 1
                )));
            }
            index.insert(form.clone(), try_id_from_usize(ordered.len() + 1)?);
            ordered.push(form);
        }
        Self::init(ordered, index, oov_token.into())
    }

    fn init(
        forms: Vec<String>,
        index: UPHashMap<String, T>,
        oov_token: String,
    ) -> UPResult<Self> {
        if let Some(&id) = index.get(&oov_token) {
            return Err(UdPrepError::VocabConflict(format!(
                "form at id {} collides with the OOV sentinel {oov_token:?}",
                id.to_usize().unwrap_or(usize::MAX)
            )));
        }
        let oov_id = try_id_from_usize(forms.len() + 1)?;
        Ok(Self {
            forms,
            index,
            oov_token,
            oov_id,
        })
    }

    /// The number of ids in `1..=vocab_size()`; the known forms plus OOV.
    ///
    /// Does not count the padding id `0`.
    pub fn vocab_size(&self) -> usize {
        self.forms.len() + 1
    }

    /// The number of known forms.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Is the vocabulary free of known forms?
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// The OOV id.
    pub fn oov_id(&self) -> T {
        self.oov_id
    }

    /// The OOV sentinel string.
    pub fn oov_token(&self) -> &str {
        &self.oov_token
    }

    /// The known forms, in id order starting at `1`.
    pub fn forms(&self) -> &[String] {
        &self.forms
    }

    /// Is the form known?
    pub fn contains(
        &self,
        form: &str,
    ) -> bool {
        self.index.contains_key(form)
    }

    /// Look up a known form.
    pub fn lookup(
        &self,
        form: &str,
    ) -> Option<T> {
        self.index.get(form).copied()
    }

    /// Encode a form; unknown forms map to [`Vocabulary::oov_id`].
    pub fn encode_token(
        &self,
        form: &str,
    ) -> T {
        self.lookup(form).unwrap_or(self.oov_id)
    }

    /// Decode an id.
    ///
    /// ## Returns
    /// [`PAD_TOKEN`] for `0`, the OOV sentinel for [`Vocabulary::oov_id`],
    /// and [`UdPrepError::OutOfRange`] past `vocab_size()`.
    pub fn decode_token(
        &self,
        id: T,
    ) -> UPResult<&str> {
        let idx = id.to_usize().unwrap_or(usize::MAX);
        match idx {
            0 => Ok(PAD_TOKEN),
            i if i <= self.forms.len() => Ok(self.forms[i - 1].as_str()),
            i if i == self.vocab_size() => Ok(self.oov_token.as_str()),
            _ => Err(UdPrepError::OutOfRange {
                space: IdSpace::Token,
                id: idx,
                max: self.vocab_size(),
            }),
        }
    }

    /// Iterate over `(id, form)` for the known forms, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (T, &str)> {
        self.forms
            .iter()
            .map(move |form| (self.index[form.as_str()], form.as_str()))
    }
}

/// Options for configuring a [`VocabularyBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyOptions {
    /// The OOV sentinel string.
    pub oov_token: String,
}

impl Default for VocabularyOptions {
    fn default() -> Self {
        Self {
            oov_token: DEFAULT_OOV_TOKEN.to_string(),
        }
    }
}

impl VocabularyOptions {
    /// Sets the OOV sentinel string.
    pub fn with_oov_token(
        mut self,
        oov_token: impl Into<String>,
    ) -> Self {
        self.oov_token = oov_token.into();
        self
    }

    /// Build a [`VocabularyBuilder`] with these options.
    pub fn build(self) -> VocabularyBuilder {
        VocabularyBuilder::new(self)
    }
}

/// Fits a [`Vocabulary`] on a training split.
///
/// Fitting is the only way to add forms; the result is frozen,
/// and is passed by reference to every encode call for every split.
#[derive(Debug, Default, Clone)]
pub struct VocabularyBuilder {
    options: VocabularyOptions,
}

impl VocabularyBuilder {
    /// Create a new builder.
    pub fn new(options: VocabularyOptions) -> Self {
        Self { options }
    }

    /// The builder options.
    pub fn options(&self) -> &VocabularyOptions {
        &self.options
    }

    /// Fit a vocabulary on the training sentences.
    ///
    /// Ids are assigned in first-occurrence order.
    ///
    /// ## Returns
    /// [`UdPrepError::VocabConflict`] if a training form equals the OOV sentinel;
    /// pick another sentinel with [`VocabularyOptions::with_oov_token`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, train)))]
    pub fn fit<'a, T, I>(
        &self,
        train: I,
    ) -> UPResult<Vocabulary<T>>
    where
        T: IdType,
        I: IntoIterator<Item = &'a Sentence>,
    {
        let vocab = Vocabulary::from_forms(
            train.into_iter().flat_map(Sentence::forms),
            self.options.oov_token.clone(),
        )?;
        log::info!(
            "fitted vocabulary: {} forms, vocab size {}",
            vocab.len(),
            vocab.vocab_size()
        );
        Ok(vocab)
    }
}
