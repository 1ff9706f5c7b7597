use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Closet Muse.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum MuseError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Generation pipeline ─────────────────────────────────────────────
    #[error("generation: {0}")]
    Generation(#[from] GenerationError),

    // ── Wardrobe persistence ────────────────────────────────────────────
    #[error("wardrobe: {0}")]
    Store(#[from] StoreError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("failed to write config: {0}")]
    Write(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Generation pipeline errors ─────────────────────────────────────────────

/// Failure of the stage-1 plan generation. This is the only error that may
/// abort a pipeline run; the caller keeps the submitted profile and returns
/// to an editable state.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("stylist request failed: {0}")]
    Api(#[source] anyhow::Error),

    #[error("stylist response violated the plan contract: {0}")]
    Schema(String),
}

// ─── Wardrobe persistence errors ────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    /// The slot refused the write because the serialized collection exceeds
    /// its size quota. Recoverable once by stripping the newest image.
    #[error("wardrobe slot rejected the write: size quota exceeded")]
    QuotaExceeded,

    /// The repaired write failed as well. The in-memory mutation stands, but
    /// new looks are at risk of not surviving a restart.
    #[error("wardrobe storage is full; delete saved looks to make room")]
    Unrecoverable,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialize: {0}")]
    Serde(#[from] serde_json::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, MuseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_schema_displays_detail() {
        let err = MuseError::Generation(GenerationError::Schema(
            "section \"The Shoes\" carries 1 option(s), expected exactly 2".into(),
        ));
        assert!(err.to_string().contains("The Shoes"));
        assert!(err.to_string().contains("exactly 2"));
    }

    #[test]
    fn store_quota_displays_correctly() {
        let err = MuseError::Store(StoreError::QuotaExceeded);
        assert!(err.to_string().contains("quota"));
    }

    #[test]
    fn store_unrecoverable_mentions_deleting_looks() {
        let err = MuseError::Store(StoreError::Unrecoverable);
        assert!(err.to_string().contains("delete saved looks"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let muse_err: MuseError = anyhow_err.into();
        assert!(muse_err.to_string().contains("something went wrong"));
    }
}
