// ── Stage implementations ───────────────────────────────────────────────────
pub mod plan;
pub mod visual;

// ── Orchestration ───────────────────────────────────────────────────────────
pub mod pipeline;

pub use pipeline::LookPipeline;
