use std::sync::atomic::{AtomicUsize, Ordering};

/// Third-party embed processing hook. Views call `process` after a render
/// that introduced embeds which have not been processed yet.
pub trait EmbedRenderer: Send + Sync {
    fn process(&self);
}

/// Records embed processing requests in the log
#[derive(Debug, Default)]
pub struct TracingEmbedRenderer {
    processed: AtomicUsize,
}

impl TracingEmbedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of processing requests seen so far
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }
}

impl EmbedRenderer for TracingEmbedRenderer {
    fn process(&self) {
        let count = self.processed.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Embed processing requested ({} so far)", count);
    }
}
