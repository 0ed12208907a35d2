use std::iter::FusedIterator;

/// Lazy term iterator over one text.
/// The text is lowercased up front, then every byte outside `[a-z0-9]`
/// acts as a separator. Empty runs are skipped.
///
/// Occurrence order and duplicates are preserved.
///
/// # Examples
/// ```
/// use tfidf_embedding::vectorizer::token::Tokens;
/// let terms: Vec<String> = Tokens::new("Hello, TF-IDF world!").collect();
/// assert_eq!(terms, vec!["hello", "tf", "idf", "world"]);
/// ```
#[derive(Debug, Clone)]
pub struct Tokens {
    lowered: String,
    pos: usize,
}

impl Tokens {
    /// Create a new term iterator
    ///
    /// # Arguments
    /// * `text` - raw input text
    #[inline]
    pub fn new(text: &str) -> Self {
        Self {
            lowered: text.to_lowercase(),
            pos: 0,
        }
    }
}

/// ASCII bytes never occur inside a multi-byte UTF-8 sequence,
/// so cutting at these boundaries always lands on a char boundary.
#[inline(always)]
fn is_term_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit()
}

impl Iterator for Tokens {
    type Item = String;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.lowered.as_bytes();
        while self.pos < bytes.len() && !is_term_byte(bytes[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }
        let start = self.pos;
        while self.pos < bytes.len() && is_term_byte(bytes[self.pos]) {
            self.pos += 1;
        }
        Some(self.lowered[start..self.pos].to_string())
    }
}

impl FusedIterator for Tokens {}

/// Normalize text into its ordered term sequence
///
/// # Arguments
/// * `text` - raw input text
///
/// # Returns
/// * `Vec<String>` - terms in occurrence order, duplicates kept
#[inline]
pub fn tokenize(text: &str) -> Vec<String> {
    Tokens::new(text).collect()
}
