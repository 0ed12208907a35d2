//! This crate is a TF-IDF embedding engine.
//! It fits a vocabulary and IDF weights on a corpus, then turns any text into
//! a fixed-dimension, L2-normalized dense vector for similarity retrieval.

pub mod error;
pub mod utils;
pub mod vectorizer;

/// TF-IDF Embedder
/// The top-level struct of this crate.
/// It builds the vocabulary and IDF table from a corpus (`fit`) and embeds
/// texts into dense vectors (`embed_query`, `embed_documents`).
///
/// Internally, it holds:
/// - The fitted vocabulary (term -> vector index)
/// - The IDF weight of every vocabulary term
/// - The number of documents fitted on
///
/// `TFIDFEmbedder<E>` has one generic parameter:
/// - `E`: TF-IDF calculation engine (e.g., DefaultTFIDFEngine)
///
/// # Thread Safety
/// `fit` publishes a completely built state in one step.
/// Embedding reads an immutable snapshot, so any number of threads may embed
/// while another one refits.
///
/// # Examples
/// ```
/// use tfidf_embedding::TFIDFEmbedder;
///
/// let embedder: TFIDFEmbedder = TFIDFEmbedder::from_corpus(&["cat dog", "dog fish", "cat cat fish"]);
/// assert_eq!(embedder.dimension(), 3);
/// assert_eq!(embedder.embed_query("cat"), vec![1.0, 0.0, 0.0]);
/// assert_eq!(embedder.embed_query("zebra"), vec![0.0, 0.0, 0.0]);
/// ```
pub use vectorizer::TFIDFEmbedder;

/// Fitted state
/// The immutable vocabulary + IDF snapshot an embedder publishes.
pub use vectorizer::FittedState;

/// Dense vector type produced by the embedder
pub use vectorizer::Embedding;

/// Embedder Trait
/// The interface retrieval layers program against.
pub use vectorizer::embed::Embedder;

/// TF-IDF Embedder Data Structure for Serialization
/// Vocabulary, IDF table and dimension: everything needed to restore
/// a model without refitting.
///
/// # Serialization
/// Supported, via serde. CBOR and JSON helpers are provided.
///
/// # Deserialization
/// Supported. `TFIDFEmbedder::from_data` validates before accepting.
pub use vectorizer::serde::TFIDFData;

/// Corpus statistics
/// Document count and per-term document frequency, in first-seen term order.
pub use vectorizer::corpus::Corpus;

/// Term Frequency structure
/// Occurrence counts of the terms of one text.
pub use vectorizer::term::TermFrequency;

/// Tokenizer
/// Lowercase alphanumeric runs, in occurrence order.
pub use vectorizer::token::{tokenize, Tokens};

/// TF IDF Calculation Engine Trait
/// By implementing this trait, you can plug different weighting strategies
/// into `TFIDFEmbedder<E>`.
/// `DefaultTFIDFEngine` uses smoothed idf `ln((N + 1) / (df + 1)) + 1`
/// and max-normalized tf `count / max_count`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Embedder configuration
pub use vectorizer::config::EmbedderConfig;

/// Errors raised when restoring or persisting fitted state
pub use error::StateError;
