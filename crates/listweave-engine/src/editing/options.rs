use serde::{Deserialize, Serialize};

/// How the projection is brought up to date after a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchStrategy {
    /// Re-project only the top-level list forests the batch touched.
    #[default]
    Incremental,
    /// Rebuild the whole projection after every batch.
    Rebuild,
}

/// Tunables of a [`ListDocument`](super::ListDocument).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub strategy: PatchStrategy,
    /// Compare every incremental patch against a full rebuild.
    pub verify_patches: bool,
}

impl EngineOptions {
    pub fn rebuild() -> Self {
        Self {
            strategy: PatchStrategy::Rebuild,
            ..Self::default()
        }
    }

    pub fn verified() -> Self {
        Self {
            verify_patches: true,
            ..Self::default()
        }
    }
}
