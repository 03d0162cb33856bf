use std::sync::Arc;

use crate::consts::DEFAULT_MAX_CONTENT_BYTES;
use crate::parse::{CommandClassifier, MarkerClassifier};

/// Tunables shared by every extraction.
#[derive(Debug, Clone)]
pub struct Options {
    /// Content beyond this many bytes is dropped (at a safe boundary) before
    /// parsing.
    pub max_content_bytes: usize,
    pub classifier: Arc<dyn CommandClassifier>,
}
impl Options {
    pub fn with_max_content_bytes(mut self, max_content_bytes: usize) -> Self {
        self.max_content_bytes = max_content_bytes;
        self
    }

    pub fn with_classifier(mut self, classifier: impl CommandClassifier + 'static) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }
}
impl Default for Options {
    fn default() -> Self {
        Self {
            max_content_bytes: DEFAULT_MAX_CONTENT_BYTES,
            classifier: Arc::new(MarkerClassifier::default()),
        }
    }
}
