use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::marker::PhantomData;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::de::{Error as DeError, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{Result, StateError};
use crate::vectorizer::FittedState;

/// Serializable form of a fitted model.
/// Vocabulary, IDF table and dimension are the complete state;
/// `doc_num` is informational and defaults to 0 when absent.
///
/// Use `TFIDFEmbedder::from_data` to turn it back into a model.
/// Restoring validates the data and never accepts a half-consistent state.
/// A term repeated inside `vocab` or `idf` fails deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TFIDFData {
    /// term -> vector index
    #[serde(deserialize_with = "deserialize_unique_map")]
    pub vocab: IndexMap<String, usize>,
    /// term -> idf weight
    #[serde(deserialize_with = "deserialize_unique_map")]
    pub idf: IndexMap<String, f64>,
    /// vector length
    pub dim: usize,
    #[serde(default)]
    pub doc_num: u64,
}

/// Map deserializer that errors on a repeated key instead of keeping the last value
fn deserialize_unique_map<'de, D, V>(deserializer: D) -> std::result::Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct UniqueMapVisitor<V>(PhantomData<V>);

    impl<'de, V> Visitor<'de> for UniqueMapVisitor<V>
    where
        V: Deserialize<'de>,
    {
        type Value = IndexMap<String, V>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map with unique string keys")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            // size hints come from the input, cap the preallocation
            let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0).min(4096));
            while let Some((key, value)) = access.next_entry::<String, V>()? {
                if map.contains_key(&key) {
                    return Err(DeError::custom(format_args!("duplicate key {key:?}")));
                }
                map.insert(key, value);
            }
            Ok(map)
        }
    }

    deserializer.deserialize_map(UniqueMapVisitor(PhantomData))
}

impl From<&FittedState> for TFIDFData {
    fn from(state: &FittedState) -> Self {
        let mut vocab = IndexMap::with_capacity(state.dimension());
        let mut idf = IndexMap::with_capacity(state.dimension());
        for (term, idx, weight) in state.iter() {
            vocab.insert(term.to_string(), idx);
            idf.insert(term.to_string(), weight);
        }
        Self {
            vocab,
            idf,
            dim: state.dimension(),
            doc_num: state.doc_num(),
        }
    }
}

impl TFIDFData {
    /// Validate and convert into a `FittedState`.
    ///
    /// Checks that `dim` equals the vocabulary size, that the indices form
    /// a bijection onto `[0, dim)`, and that the IDF table covers exactly
    /// the vocabulary with finite weights.
    pub fn into_state(self) -> Result<FittedState> {
        let dim = self.vocab.len();
        if self.dim != dim {
            return Err(StateError::dimension_mismatch(self.dim, dim));
        }

        let mut slots: Vec<Option<(&str, f64)>> = vec![None; dim];
        for (term, &index) in &self.vocab {
            if index >= dim {
                return Err(StateError::IndexOutOfRange {
                    term: term.clone(),
                    index,
                    dim,
                });
            }
            let weight = *self
                .idf
                .get(term)
                .ok_or_else(|| StateError::MissingIdf(term.clone()))?;
            if !weight.is_finite() {
                return Err(StateError::InvalidIdf {
                    term: term.clone(),
                    weight,
                });
            }
            if let Some((first, _)) = slots[index] {
                return Err(StateError::DuplicateIndex {
                    index,
                    first: first.to_string(),
                    second: term.clone(),
                });
            }
            slots[index] = Some((term.as_str(), weight));
        }
        if let Some(extra) = self.idf.keys().find(|t| !self.vocab.contains_key(*t)) {
            return Err(StateError::UnknownIdfTerm(extra.clone()));
        }

        // every slot is filled: dim distinct indices below dim
        let mut vocab = IndexSet::with_capacity(dim);
        let mut idf = Vec::with_capacity(dim);
        for (term, weight) in slots.into_iter().flatten() {
            vocab.insert(Box::<str>::from(term));
            idf.push(weight);
        }
        Ok(FittedState::from_parts(vocab, idf, self.doc_num))
    }

    /// Write as CBOR
    pub fn to_cbor_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_cbor::to_writer(writer, self)?;
        Ok(())
    }

    /// Read from CBOR
    pub fn from_cbor_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_cbor::from_reader(reader)?)
    }

    /// Write as JSON
    pub fn to_json_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Read from JSON
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save_cbor<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_cbor_writer(&mut writer)?;
        writer.flush()?;
        debug!(path = %path.display(), dim = self.dim, "saved model (cbor)");
        Ok(())
    }

    pub fn load_cbor<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = Self::from_cbor_reader(BufReader::new(File::open(path)?))?;
        debug!(path = %path.display(), dim = data.dim, "loaded model (cbor)");
        Ok(data)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_json_writer(&mut writer)?;
        writer.flush()?;
        debug!(path = %path.display(), dim = self.dim, "saved model (json)");
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = Self::from_json_reader(BufReader::new(File::open(path)?))?;
        debug!(path = %path.display(), dim = data.dim, "loaded model (json)");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::{corpus::Corpus, tfidf::DefaultTFIDFEngine};

    fn sample() -> TFIDFData {
        let corpus = Corpus::from_documents(&["cat dog", "dog fish", "cat cat fish"], false);
        TFIDFData::from(&FittedState::from_corpus::<DefaultTFIDFEngine>(&corpus))
    }

    #[test]
    fn export_contains_full_state() {
        let data = sample();
        assert_eq!(data.dim, 3);
        assert_eq!(data.doc_num, 3);
        assert_eq!(data.vocab.get("dog"), Some(&1));
        assert_eq!(data.idf.len(), 3);
    }

    #[test]
    fn cbor_roundtrip_restores_same_state() {
        let data = sample();
        let mut buf = Vec::new();
        data.to_cbor_writer(&mut buf).unwrap();
        let de = TFIDFData::from_cbor_reader(buf.as_slice()).unwrap();
        assert_eq!(de, data);
        let corpus = Corpus::from_documents(&["cat dog", "dog fish", "cat cat fish"], false);
        assert_eq!(
            de.into_state().unwrap(),
            FittedState::from_corpus::<DefaultTFIDFEngine>(&corpus)
        );
    }

    #[test]
    fn json_accepts_hand_written_state_in_any_key_order() {
        let json = r#"{
            "vocab": {"fish": 2, "cat": 0, "dog": 1},
            "idf": {"dog": 1.5, "fish": 2.0, "cat": 1.0},
            "dim": 3
        }"#;
        let state = TFIDFData::from_json_reader(json.as_bytes())
            .unwrap()
            .into_state()
            .unwrap();
        assert_eq!(state.term_at(0), Some("cat"));
        assert_eq!(state.term_at(2), Some("fish"));
        assert_eq!(state.idf_of("dog"), Some(1.5));
        assert_eq!(state.doc_num(), 0);
    }

    #[test]
    fn empty_state_roundtrips() {
        let data = TFIDFData::from(&FittedState::empty());
        assert_eq!(data.dim, 0);
        let state = data.into_state().unwrap();
        assert_eq!(state.dimension(), 0);
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let mut data = sample();
        data.dim = 4;
        assert!(matches!(
            data.into_state(),
            Err(StateError::DimensionMismatch { declared: 4, vocab_size: 3 })
        ));
    }

    #[test]
    fn rejects_index_out_of_range() {
        let mut data = sample();
        data.vocab.insert("fish".to_string(), 3);
        assert!(matches!(
            data.into_state(),
            Err(StateError::IndexOutOfRange { index: 3, dim: 3, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_index() {
        let mut data = sample();
        data.vocab.insert("fish".to_string(), 0);
        assert!(matches!(
            data.into_state(),
            Err(StateError::DuplicateIndex { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_missing_and_unknown_idf() {
        let mut data = sample();
        data.idf.shift_remove("cat");
        assert!(matches!(data.into_state(), Err(StateError::MissingIdf(t)) if t == "cat"));

        let mut data = sample();
        data.idf.insert("zebra".to_string(), 1.0);
        assert!(matches!(data.into_state(), Err(StateError::UnknownIdfTerm(t)) if t == "zebra"));
    }

    #[test]
    fn rejects_non_finite_idf() {
        let mut data = sample();
        data.idf.insert("dog".to_string(), f64::NAN);
        assert!(matches!(data.into_state(), Err(StateError::InvalidIdf { .. })));
    }

    #[test]
    fn accepts_zero_and_negative_idf() {
        let mut data = sample();
        data.idf.insert("dog".to_string(), 0.0);
        data.idf.insert("fish".to_string(), -0.5);
        let state = data.into_state().unwrap();
        assert_eq!(state.idf_of("dog"), Some(0.0));
        assert_eq!(state.idf_of("fish"), Some(-0.5));
    }

    #[test]
    fn rejects_repeated_term_in_json() {
        let dup_vocab = r#"{
            "vocab": {"cat": 0, "dog": 1, "cat": 1},
            "idf": {"cat": 1.0, "dog": 1.0},
            "dim": 2
        }"#;
        assert!(matches!(
            TFIDFData::from_json_reader(dup_vocab.as_bytes()),
            Err(StateError::Json(_))
        ));

        let dup_idf = r#"{
            "vocab": {"cat": 0, "dog": 1},
            "idf": {"cat": 1.0, "dog": 1.0, "dog": 2.0},
            "dim": 2
        }"#;
        assert!(matches!(
            TFIDFData::from_json_reader(dup_idf.as_bytes()),
            Err(StateError::Json(_))
        ));
    }

    #[test]
    fn rejects_repeated_term_in_cbor() {
        // hand-built CBOR: {"vocab": {"cat": 0, "cat": 0}, "idf": {"cat": 1.0}, "dim": 1}
        let mut bad = vec![0xa3];
        bad.extend_from_slice(&[0x65, b'v', b'o', b'c', b'a', b'b']);
        bad.extend_from_slice(&[0xa2, 0x63, b'c', b'a', b't', 0x00, 0x63, b'c', b'a', b't', 0x00]);
        bad.extend_from_slice(&[0x63, b'i', b'd', b'f']);
        bad.extend_from_slice(&[0xa1, 0x63, b'c', b'a', b't', 0xf9, 0x3c, 0x00]);
        bad.extend_from_slice(&[0x63, b'd', b'i', b'm', 0x01]);
        assert!(matches!(
            TFIDFData::from_cbor_reader(bad.as_slice()),
            Err(StateError::Cbor(_))
        ));
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(matches!(
            TFIDFData::from_cbor_reader(&b"\xff\x00garbage"[..]),
            Err(StateError::Cbor(_))
        ));
        assert!(matches!(
            TFIDFData::from_json_reader(&b"{not json"[..]),
            Err(StateError::Json(_))
        ));
    }

    #[test]
    fn file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("tfidf-embedding-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let data = sample();

        let cbor = dir.join("model.cbor");
        data.save_cbor(&cbor).unwrap();
        assert_eq!(TFIDFData::load_cbor(&cbor).unwrap(), data);

        let json = dir.join("model.json");
        data.save_json(&json).unwrap();
        assert_eq!(TFIDFData::load_json(&json).unwrap(), data);

        assert!(matches!(
            TFIDFData::load_cbor(dir.join("missing.cbor")),
            Err(StateError::Io(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
