//! Fit a small corpus, embed it, and rank the documents against a query.
//!
//! cargo run --example basic -- "fast cat"

use tfidf_embedding::utils::math::dense::cosine_similarity;
use tfidf_embedding::TFIDFEmbedder;

fn main() {
    let docs = [
        "The cat sat on the mat.",
        "Dogs and cats are common pets.",
        "A fast brown fox jumps over the lazy dog.",
        "Fish swim in the sea.",
        "The quick cat chased a fast mouse.",
    ];

    let embedder: TFIDFEmbedder = TFIDFEmbedder::new();
    embedder.fit(&docs);
    println!("vocabulary: {} terms, {} documents", embedder.dimension(), embedder.doc_num());

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "fast cat".to_string());
    let query_vec = embedder.embed_query(&query);
    let doc_vecs = embedder.embed_documents(&docs);

    let mut ranked: Vec<(f32, &str)> = doc_vecs
        .iter()
        .zip(docs.iter())
        .map(|(vec, doc)| (cosine_similarity(&query_vec, vec), *doc))
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    println!("query: {query:?}");
    for (score, doc) in ranked {
        println!("{score:.4}  {doc}");
    }
}
