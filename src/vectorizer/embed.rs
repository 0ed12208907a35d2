use crate::utils::math::dense::normalize;
use crate::vectorizer::{
    term::TermFrequency,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    Embedding, FittedState, TFIDFEmbedder,
};

/// Text to dense vector interface consumed by retrieval layers.
pub trait Embedder {
    /// Length of every vector this embedder produces
    fn dimension(&self) -> usize;

    fn embed_query(&self, text: &str) -> Embedding;

    /// One vector per text, same order
    fn embed_documents(&self, texts: &[&str]) -> Vec<Embedding> {
        texts.iter().map(|text| self.embed_query(text)).collect()
    }
}

impl FittedState {
    /// Encode one text against this state.
    ///
    /// TF is the raw count divided by the text's max count, multiplied by the term's IDF.
    /// Terms outside the vocabulary are ignored. The result is L2-normalized,
    /// or all zero when the text shares no term with the vocabulary.
    ///
    /// # Returns
    /// * `Embedding` - length `dimension()`, empty when unfit
    pub fn embed<E>(&self, text: &str) -> Embedding
    where
        E: TFIDFEngine,
    {
        let dim = self.dimension();
        let mut vec = vec![0.0f32; dim];
        if dim == 0 {
            return vec;
        }

        let freq = TermFrequency::from_text(text);
        let max_count = freq.most_frequent_term_count();
        if max_count == 0 {
            return vec;
        }

        let (indices, mut weights): (Vec<usize>, Vec<f64>) = freq
            .iter()
            .filter_map(|(term, count)| {
                self.index_of(term)
                    .map(|idx| (idx, E::tf_calc(count, max_count) * self.idf[idx]))
            })
            .unzip();

        // computed in f64, stored as f32
        if normalize(&mut weights) > 0.0 {
            for (idx, weight) in indices.into_iter().zip(weights) {
                vec[idx] = weight as f32;
            }
        }
        vec
    }
}

impl<E> Embedder for TFIDFEmbedder<E>
where
    E: TFIDFEngine,
{
    fn dimension(&self) -> usize {
        TFIDFEmbedder::dimension(self)
    }

    fn embed_query(&self, text: &str) -> Embedding {
        TFIDFEmbedder::embed_query(self, text)
    }

    fn embed_documents(&self, texts: &[&str]) -> Vec<Embedding> {
        TFIDFEmbedder::embed_documents(self, texts)
    }
}

/// Shortcut for a state encoded with the default engine
impl Embedder for FittedState {
    fn dimension(&self) -> usize {
        FittedState::dimension(self)
    }

    fn embed_query(&self, text: &str) -> Embedding {
        self.embed::<DefaultTFIDFEngine>(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::dense::{cosine_similarity, l2_norm};
    use crate::vectorizer::corpus::Corpus;

    fn state(docs: &[&str]) -> FittedState {
        FittedState::from_corpus::<DefaultTFIDFEngine>(&Corpus::from_documents(docs, false))
    }

    #[test]
    fn unfit_state_embeds_to_empty() {
        let state = FittedState::empty();
        assert!(state.embed::<DefaultTFIDFEngine>("cat").is_empty());
    }

    #[test]
    fn rare_terms_outweigh_common_terms() {
        let state = state(&["common rare", "common", "common"]);
        let v = state.embed::<DefaultTFIDFEngine>("common rare");
        let common = state.index_of("common").unwrap();
        let rare = state.index_of("rare").unwrap();
        assert!(v[rare] > v[common]);
        assert!((l2_norm(&v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unknown_terms_do_not_change_known_weights() {
        let state = state(&["cat dog", "dog fish", "cat cat fish"]);
        let plain = state.embed::<DefaultTFIDFEngine>("cat dog");
        let noisy = state.embed::<DefaultTFIDFEngine>("cat zebra dog");
        assert_eq!(plain, noisy);
    }

    #[test]
    fn unknown_term_can_still_set_max_count() {
        // zebra dominates tf, so cat is scaled by 1/3 but normalization restores unit length
        let state = state(&["cat dog", "dog fish"]);
        let v = state.embed::<DefaultTFIDFEngine>("zebra zebra zebra cat");
        assert_eq!(v[state.index_of("cat").unwrap()], 1.0);
    }

    #[test]
    fn similar_texts_score_higher() {
        let state = state(&[
            "rust is a systems programming language",
            "python is a scripting language",
            "cats are small furry animals",
        ]);
        let query = state.embed_query("systems programming in rust");
        let rust = state.embed_query("rust systems language");
        let cats = state.embed_query("furry cats");
        assert!(cosine_similarity(&query, &rust) > cosine_similarity(&query, &cats));
        assert_eq!(cosine_similarity(&query, &cats), 0.0);
    }

    #[test]
    fn trait_batch_default_matches_query() {
        let state = state(&["a b", "b c"]);
        let batch = Embedder::embed_documents(&state, &["a", "c", "zzz"]);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0], state.embed_query("a"));
        assert_eq!(batch[2], vec![0.0; 3]);
    }
}
