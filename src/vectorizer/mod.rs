pub mod config;
pub mod corpus;
pub mod embed;
pub mod serde;
pub mod term;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::vectorizer::{
    config::EmbedderConfig,
    corpus::Corpus,
    serde::TFIDFData,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
};

/// Dense embedding vector
pub type Embedding = Vec<f32>;

/// Fitted vocabulary and IDF weights.
///
/// Immutable once built. The position of a term in `vocab` is its vector index,
/// and `idf[i]` is the weight of the term at position `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FittedState {
    /// term -> index (position)
    vocab: IndexSet<Box<str>>,
    /// idf by index
    idf: Vec<f64>,
    /// number of documents the state was fitted on
    doc_num: u64,
}

impl FittedState {
    /// Unfit state, dimension 0
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build vocabulary and IDF from corpus statistics.
    /// Indices follow the corpus term order (first seen, document then token).
    pub fn from_corpus<E>(corpus: &Corpus) -> Self
    where
        E: TFIDFEngine,
    {
        let vocab: IndexSet<Box<str>> = corpus.iter().map(|(term, _)| Box::<str>::from(term)).collect();
        let idf = E::idf_vec(corpus);
        debug_assert_eq!(vocab.len(), idf.len());
        Self {
            vocab,
            idf,
            doc_num: corpus.doc_num(),
        }
    }

    /// Caller guarantees `vocab.len() == idf.len()`
    pub(crate) fn from_parts(vocab: IndexSet<Box<str>>, idf: Vec<f64>, doc_num: u64) -> Self {
        debug_assert_eq!(vocab.len(), idf.len());
        Self { vocab, idf, doc_num }
    }

    /// Vector length, equal to the vocabulary size
    #[inline]
    pub fn dimension(&self) -> usize {
        self.vocab.len()
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        !self.vocab.is_empty()
    }

    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocab.get_index_of(term)
    }

    #[inline]
    pub fn idf_of(&self, term: &str) -> Option<f64> {
        self.index_of(term).map(|idx| self.idf[idx])
    }

    #[inline]
    pub fn term_at(&self, index: usize) -> Option<&str> {
        self.vocab.get_index(index).map(|t| t.as_ref())
    }

    /// Iterate `(term, index, idf)` in index order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, f64)> {
        self.vocab
            .iter()
            .zip(self.idf.iter())
            .enumerate()
            .map(|(idx, (term, &idf))| (term.as_ref(), idx, idf))
    }
}

/// TF-IDF embedding model.
///
/// Holds the fitted vocabulary and IDF table and turns text into
/// L2-normalized dense vectors of length `dimension()`.
///
/// `fit` builds a complete new `FittedState` before publishing it, so concurrent
/// readers see either the old state or the new one.
/// Encoding works on an `Arc` snapshot and holds no lock while computing.
///
/// `TFIDFEmbedder<E>` is generic over the weighting engine:
/// - `E`: TF-IDF calculation engine (default `DefaultTFIDFEngine`)
#[derive(Debug)]
pub struct TFIDFEmbedder<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    state: RwLock<Arc<FittedState>>,
    config: EmbedderConfig,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Default for TFIDFEmbedder<E>
where
    E: TFIDFEngine,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for TFIDFEmbedder<E>
where
    E: TFIDFEngine,
{
    fn clone(&self) -> Self {
        Self {
            state: RwLock::new(self.snapshot()),
            config: self.config,
            _marker: PhantomData,
        }
    }
}

impl<E> TFIDFEmbedder<E>
where
    E: TFIDFEngine,
{
    /// Create an unfit model
    pub fn new() -> Self {
        Self::with_config(EmbedderConfig::default())
    }

    pub fn with_config(config: EmbedderConfig) -> Self {
        Self {
            state: RwLock::new(Arc::new(FittedState::empty())),
            config,
            _marker: PhantomData,
        }
    }

    /// Create a model and fit it on `corpus`.
    /// An empty corpus leaves the model unfit.
    pub fn from_corpus<T>(corpus: &[T]) -> Self
    where
        T: AsRef<str> + Sync,
    {
        let embedder = Self::new();
        if !corpus.is_empty() {
            embedder.fit(corpus);
        }
        embedder
    }

    /// Restore a model from persisted state without refitting
    pub fn from_data(data: TFIDFData) -> Result<Self> {
        let state = data.into_state()?;
        debug!(dim = state.dimension(), "restored fitted state");
        let embedder = Self::new();
        embedder.publish(state);
        Ok(embedder)
    }

    /// Export the current state
    pub fn to_data(&self) -> TFIDFData {
        TFIDFData::from(self.snapshot().as_ref())
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    /// Current published state
    #[inline]
    pub fn snapshot(&self) -> Arc<FittedState> {
        self.state.read().clone()
    }

    fn publish(&self, state: FittedState) {
        *self.state.write() = Arc::new(state);
    }
}

impl<E> TFIDFEmbedder<E>
where
    E: TFIDFEngine,
{
    /// Build vocabulary and IDF from `corpus`, replacing any previous state.
    ///
    /// # Arguments
    /// * `corpus` - raw documents; their order fixes the vocabulary indices
    pub fn fit<T>(&self, corpus: &[T])
    where
        T: AsRef<str> + Sync,
    {
        info!(doc_num = corpus.len(), "building vocabulary");
        let parallel = self.config.is_parallel(corpus.len());
        let stats = Corpus::from_documents(corpus, parallel);
        let state = FittedState::from_corpus::<E>(&stats);
        info!(vocab_size = state.dimension(), "vocabulary built");
        self.publish(state);
    }

    /// Embed each text independently.
    ///
    /// # Returns
    /// * `Vec<Embedding>` - one vector per input, same order
    pub fn embed_documents<T>(&self, texts: &[T]) -> Vec<Embedding>
    where
        T: AsRef<str> + Sync,
    {
        let state = self.snapshot();
        if self.config.is_parallel(texts.len()) {
            texts
                .par_iter()
                .map(|text| state.embed::<E>(text.as_ref()))
                .collect()
        } else {
            texts
                .iter()
                .map(|text| state.embed::<E>(text.as_ref()))
                .collect()
        }
    }

    /// Embed a single query text
    pub fn embed_query(&self, text: &str) -> Embedding {
        self.snapshot().embed::<E>(text)
    }

    /// Vector length, 0 when unfit
    #[inline]
    pub fn dimension(&self) -> usize {
        self.state.read().dimension()
    }

    #[inline]
    pub fn vocabulary_size(&self) -> usize {
        self.dimension()
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.state.read().doc_num()
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.state.read().is_fitted()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.state.read().index_of(term)
    }

    pub fn idf_of(&self, term: &str) -> Option<f64> {
        self.state.read().idf_of(term)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.index_of(term).is_some()
    }
}
