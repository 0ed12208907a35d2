/// Runtime knobs of `TFIDFEmbedder`.
/// None of them change the produced vectors, only how they are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedderConfig {
    /// Batches (fit corpora and `embed_documents` inputs) at least this long
    /// are processed on the rayon pool. 0 forces parallel, `usize::MAX` disables it.
    pub parallel_threshold: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
        }
    }
}

impl EmbedderConfig {
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Never use the rayon pool
    pub fn sequential(self) -> Self {
        self.with_parallel_threshold(usize::MAX)
    }

    #[inline]
    pub(crate) fn is_parallel(&self, batch_len: usize) -> bool {
        batch_len >= self.parallel_threshold
    }
}
