//! Shared state handed to every gateway handler.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::defaults;
use crate::relay::RelayService;
use crate::time::SystemClock;

use super::files::UploadPolicy;

/// Gateway state: the relay service, upload limits and the page to serve.
///
/// Cloning is cheap; everything is behind an [`Arc`].
#[derive(Debug)]
pub struct GatewayState<H, C = SystemClock> {
    relay: Arc<RelayService<H, C>>,
    policy: UploadPolicy,
    index_file: Arc<PathBuf>,
}

impl<H, C> Clone for GatewayState<H, C> {
    fn clone(&self) -> Self {
        Self {
            relay: Arc::clone(&self.relay),
            policy: self.policy,
            index_file: Arc::clone(&self.index_file),
        }
    }
}

impl<H, C> GatewayState<H, C> {
    /// Creates gateway state serving the default chat page.
    #[must_use]
    pub fn new(relay: RelayService<H, C>, policy: UploadPolicy) -> Self {
        Self {
            relay: Arc::new(relay),
            policy,
            index_file: Arc::new(PathBuf::from(defaults::INDEX_FILE)),
        }
    }

    /// Sets the HTML file served at `/`.
    #[must_use]
    pub fn with_index_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_file = Arc::new(path.into());
        self
    }

    /// Returns the relay service.
    #[must_use]
    pub fn relay(&self) -> &RelayService<H, C> {
        &self.relay
    }

    /// Returns the upload limits.
    #[must_use]
    pub const fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Returns the path of the chat page.
    #[must_use]
    pub fn index_file(&self) -> &Path {
        &self.index_file
    }
}
