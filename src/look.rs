//! Data model for generated looks.
//!
//! The serde (camelCase) field names are the wire contract: they are exactly
//! the fields the plan generator's response schema requires, and the format
//! saved looks persist in.

use crate::profile::Profile;
use serde::{Deserialize, Serialize};

/// One purchasable item option inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub item_name: String,
    pub description: String,
    pub brand: String,
    /// Free text ("$45 - $60"), never parsed to currency.
    pub price_estimate: String,
    /// Keywords the generator used to build the link.
    pub search_query: String,
    /// Direct brand search URL. Syntactic validity is enforced; targeting
    /// the brand's own search endpoint is best-effort per the instruction
    /// contract, not checked.
    pub item_link: String,
    pub is_affiliate: bool,
}

/// A named outfit category ("The Dress", "The Shoes") with exactly two
/// purchasable options. The count is validated after decoding, not assumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookSection {
    pub category_name: String,
    pub curation_reason: String,
    pub options: Vec<ClothingItem>,
}

/// Makeup recommendation. All fields required, no defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeupLook {
    pub style_name: String,
    pub eyes: String,
    pub lips: String,
    pub face: String,
    pub tips: String,
}

/// Inline image payload: base64 data plus mime type, embedded directly in
/// the persisted record rather than referenced externally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookImage {
    pub mime_type: String,
    pub data: String,
}

/// The structured result of stage-1 generation, before any image is
/// attached. The originating profile is attached after a successful decode
/// so the user can re-edit and regenerate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub title: String,
    pub description: String,
    pub occasion: String,
    pub sections: Vec<LookSection>,
    pub makeup: MakeupLook,
    #[serde(skip)]
    pub profile: Option<Profile>,
}

/// The complete pipeline output: plan plus optional image. Immutable after
/// creation except for `id`/`saved_at` (assigned at save time) and `image`
/// (which the wardrobe's degradation path may strip).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledLook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    pub title: String,
    pub description: String,
    pub occasion: String,
    pub sections: Vec<LookSection>,
    pub makeup: MakeupLook,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<LookImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl StyledLook {
    /// Merge a completed plan and an optional visual into the final look.
    pub fn from_plan(plan: Plan, image: Option<LookImage>) -> Self {
        Self {
            id: None,
            saved_at: None,
            title: plan.title,
            description: plan.description,
            occasion: plan.occasion,
            sections: plan.sections,
            makeup: plan.makeup,
            image,
            profile: plan.profile,
        }
    }

    /// A clone with the image payload (and its mime type) removed. Used by
    /// the wardrobe's quota repair.
    pub fn without_image(&self) -> Self {
        Self {
            image: None,
            ..self.clone()
        }
    }
}
