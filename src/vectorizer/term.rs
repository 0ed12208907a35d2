use indexmap::IndexMap;

use crate::vectorizer::token::Tokens;

/// TermFrequency struct
/// Manages the occurrence counts of the terms of one text.
/// Terms are kept in first-seen order.
///
/// # Examples
/// ```
/// use tfidf_embedding::vectorizer::term::TermFrequency;
/// let term_freq = TermFrequency::from_text("term1 term2 term1");
///
/// assert_eq!(term_freq.term_count("term1"), 2);
/// assert_eq!(term_freq.most_frequent_term_count(), 2);
/// assert_eq!(term_freq.term_set_ref_str(), vec!["term1", "term2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    term_count: IndexMap<String, u64>,
}

impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
        }
    }

    /// Count the terms of a raw text
    ///
    /// # Arguments
    /// * `text` - raw text, tokenized on the fly
    pub fn from_text(text: &str) -> Self {
        let mut tf = TermFrequency::new();
        for term in Tokens::new(text) {
            *tf.term_count.entry(term).or_insert(0) += 1;
        }
        tf
    }
}

/// Implementation for retrieving information from TermFrequency
impl TermFrequency {
    /// Iterate over terms and their counts in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count
            .iter()
            .map(|(term, &count)| (term.as_str(), count))
    }

    /// Distinct terms in first-seen order
    #[inline]
    pub fn term_set_ref_str(&self) -> Vec<&str> {
        self.term_count.keys().map(|t| t.as_str()).collect()
    }

    /// Get the occurrence count for a specific term
    ///
    /// # Returns
    /// * `u64` - 0 when the term never occurred
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Get the count of the most frequent term
    ///
    /// # Returns
    /// * `u64` - 0 when empty
    #[inline]
    pub fn most_frequent_term_count(&self) -> u64 {
        self.term_count.values().copied().max().unwrap_or(0)
    }
}
