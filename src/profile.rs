use serde::{Deserialize, Serialize};
use strum::Display;

/// User-supplied styling request and physical/budget context.
///
/// All stats are opaque strings; no numeric parsing happens anywhere in the
/// pipeline; the generator receives them verbatim. A profile is immutable
/// once submitted for a generation call: editing a saved look's request
/// produces a new `Profile`, never mutates the one attached to a prior
/// result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub height: String,
    pub weight: String,
    pub sizes: String,
    pub vibe: String,
    pub celebrity_inspo: String,
    pub budget: Budget,
    pub preferred_brands: String,
    /// The user's specific request. Highest-priority signal for the
    /// generator; everything else only constrains it.
    pub description: String,
    pub notes: String,
}

/// Fixed budget bands. The display text is exactly what the generator sees
/// and what gets persisted alongside a saved look.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Budget {
    #[strum(serialize = "Budget-Friendly (<$150 total)")]
    #[serde(rename = "Budget-Friendly (<$150 total)")]
    BudgetFriendly,

    #[default]
    #[strum(serialize = "Mid-Range ($150 - $500)")]
    #[serde(rename = "Mid-Range ($150 - $500)")]
    MidRange,

    #[strum(serialize = "Premium ($500 - $1500)")]
    #[serde(rename = "Premium ($500 - $1500)")]
    Premium,

    #[strum(serialize = "Luxury ($1500+)")]
    #[serde(rename = "Luxury ($1500+)")]
    Luxury,
}

impl Budget {
    pub const ALL: [Budget; 4] = [
        Budget::BudgetFriendly,
        Budget::MidRange,
        Budget::Premium,
        Budget::Luxury,
    ];
}

/// Vibe shortcuts offered by the form; appended to the free-text vibe field.
pub const VIBE_PRESETS: [&str; 8] = [
    "Minimalist Chic",
    "Dark Academia",
    "Y2K Streetwear",
    "Old Money Aesthetic",
    "Bohemian Luxe",
    "Corporate Baddie",
    "Avant-Garde",
    "Cozy Scandi",
];
