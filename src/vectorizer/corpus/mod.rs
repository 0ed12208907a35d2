use indexmap::IndexMap;
use rayon::prelude::*;

use crate::vectorizer::term::TermFrequency;

/// Document-frequency statistics of a corpus.
/// It does not store document text; it only manages:
/// - The number of documents
/// - The number of documents in which each term appears
///
/// Terms are kept in first-seen order (document then token),
/// which is the order vocabulary indices are assigned in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    /// document count
    doc_num: u64,
    /// term -> number of documents containing it
    term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Add one document's distinct terms to the corpus.
    /// Callers pass each term once per document.
    pub fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            let term = term.as_ref();
            if let Some(count) = self.term_counts.get_mut(term) {
                *count += 1;
            } else {
                self.term_counts.insert(term.into(), 1);
            }
        }
    }

    /// Scan raw documents into a corpus.
    ///
    /// With `parallel` the per-document tokenization runs on the rayon pool;
    /// accumulation always happens in document order so the term order is the same either way.
    ///
    /// # Arguments
    /// * `docs` - raw documents
    /// * `parallel` - tokenize on the rayon pool
    pub fn from_documents<T>(docs: &[T], parallel: bool) -> Self
    where
        T: AsRef<str> + Sync,
    {
        let mut corpus = Corpus::new();
        if parallel {
            let freqs: Vec<TermFrequency> = docs
                .par_iter()
                .map(|doc| TermFrequency::from_text(doc.as_ref()))
                .collect();
            for freq in &freqs {
                corpus.add_set(&freq.term_set_ref_str());
            }
        } else {
            for doc in docs {
                let freq = TermFrequency::from_text(doc.as_ref());
                corpus.add_set(&freq.term_set_ref_str());
            }
        }
        corpus
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Get the document frequency of a term
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).map_or(0, |count| *count)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// Iterate terms with their document frequency in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_counts.iter().map(|(t, &c)| (t.as_ref(), c))
    }
}
