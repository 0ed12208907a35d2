use crate::vectorizer::corpus::Corpus;

/// TF-IDF weighting strategy.
/// `TFIDFEmbedder<E>` calls into this for every weight it computes,
/// so a different scheme can be plugged in without touching fit or encode.
pub trait TFIDFEngine {
    /// IDF of one term
    /// # Arguments
    /// * `doc_num` - total number of documents in the corpus
    /// * `doc_freq` - number of documents containing the term
    fn idf_calc(doc_num: u64, doc_freq: u64) -> f64;

    /// TF of one term inside one text
    /// # Arguments
    /// * `count` - raw occurrence count of the term
    /// * `max_count` - occurrence count of the most frequent term of the text
    fn tf_calc(count: u64, max_count: u64) -> f64;

    /// IDF vector in corpus term order
    fn idf_vec(corpus: &Corpus) -> Vec<f64> {
        let doc_num = corpus.doc_num();
        corpus
            .iter()
            .map(|(_, doc_freq)| Self::idf_calc(doc_num, doc_freq))
            .collect()
    }
}

/// Default engine
/// - idf: `ln((N + 1) / (df + 1)) + 1`, strictly positive for every term
/// - tf: `count / max_count`, in `(0.0, 1.0]`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        ((doc_num as f64 + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0
    }

    #[inline]
    fn tf_calc(count: u64, max_count: u64) -> f64 {
        if count == 0 || max_count == 0 {
            return 0.0;
        }
        count as f64 / max_count as f64
    }
}
