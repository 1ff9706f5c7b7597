//! Stage 1: structured plan generation.
//!
//! Builds the system instruction and user content for one `generateContent`
//! call, constrains the response to the plan schema, and validates the
//! decoded plan before anyone downstream sees it. No retries: a failed call
//! surfaces immediately and the caller keeps the submitted profile.

use crate::catalog;
use crate::error::GenerationError;
use crate::gemini::GeminiClient;
use crate::look::Plan;
use crate::profile::Profile;
use serde_json::{Value, json};
use url::Url;

/// Non-negotiable generation rules. The user's free-text description is the
/// single highest-priority signal; stats and budget constrain but never
/// override it.
pub fn system_instruction(profile: &Profile) -> String {
    format!(
        "You are 'Closet Muse', a world-class personal stylist.\n\
         \n\
         Your goal is to create a complete outfit based on the user's request.\n\
         \n\
         CRITICAL INSTRUCTIONS:\n\
         1. GOLDEN RULE: The User's Description (\"{description}\") is the SINGLE MOST \
         IMPORTANT input. Search and curate looks that match this description as closely as possible.\n\
         2. Break the outfit down into KEY PIECES (Sections), e.g., \"The Dress\", \"The Shoes\", \"Accessories\".\n\
         3. For EACH key piece, provide exactly 2 DISTINCT OPTIONS.\n\
            - These options must be REALISTIC and likely to exist in current collections (Staples, Seasonal Trends).\n\
            - MIX UP THE BRANDS.\n\
            - ACTIVELY USE mass-market brands like Target, Uniqlo, Express, H&M, Zara, Banana Republic, and Aerie, \
         especially if the budget matches.\n\
            - Prioritize these partner brands if they fit: {partners}.\n\
         4. If you choose a partner brand, mark 'isAffiliate' as true.\n\
         5. Be specific with item names (e.g., \"H&M Oversized Wool Blend Blazer\" vs \"Blazer\").\n\
         6. Consider stats: Height {height}, Weight {weight}, Sizes {sizes}.\n\
         7. Respect Budget: {budget}.\n\
         \n\
         {linking_rules}\n\
         \n\
         Output strictly in JSON format matching the schema provided.",
        description = profile.description,
        partners = catalog::PARTNER_BRANDS.join(", "),
        height = profile.height,
        weight = profile.weight,
        sizes = profile.sizes,
        budget = profile.budget,
        linking_rules = catalog::linking_rules(),
    )
}

pub fn user_content(profile: &Profile) -> String {
    format!(
        "User Profile Details:\n\
         User Request/Description: {description}\n\
         Vibe/Style: {vibe}\n\
         Celebrity Inspo: {celebrity_inspo}\n\
         Height: {height}\n\
         Weight: {weight}\n\
         Sizes: {sizes}\n\
         Budget: {budget}\n\
         Preferred Brands: {preferred_brands}\n\
         \n\
         Create a cohesive styled look with 2 distinct purchasing options for each piece. \
         Ensure brand variety (Target, Uniqlo, Express, H&M, etc).",
        description = profile.description,
        vibe = profile.vibe,
        celebrity_inspo = profile.celebrity_inspo,
        height = profile.height,
        weight = profile.weight,
        sizes = profile.sizes,
        budget = profile.budget,
        preferred_brands = profile.preferred_brands,
    )
}

/// The response schema sent with the request. Every field is required; the
/// decode step rejects responses that omit any of them.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "A catchy high-fashion name for this look" },
            "description": { "type": "STRING", "description": "A detailed editorial description of why this works" },
            "occasion": { "type": "STRING", "description": "Where to wear this" },
            "sections": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "categoryName": { "type": "STRING", "description": "e.g. 'The Structural Blazer'" },
                        "curationReason": { "type": "STRING", "description": "Why this piece is essential for the look" },
                        "options": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "itemName": { "type": "STRING" },
                                    "description": { "type": "STRING" },
                                    "brand": { "type": "STRING" },
                                    "priceEstimate": { "type": "STRING" },
                                    "searchQuery": { "type": "STRING", "description": "Keywords used for the link" },
                                    "itemLink": { "type": "STRING", "description": "Direct Brand Website Search URL" },
                                    "isAffiliate": { "type": "BOOLEAN" }
                                },
                                "required": ["itemName", "description", "brand", "priceEstimate",
                                             "searchQuery", "itemLink", "isAffiliate"]
                            }
                        }
                    },
                    "required": ["categoryName", "curationReason", "options"]
                }
            },
            "makeup": {
                "type": "OBJECT",
                "properties": {
                    "styleName": { "type": "STRING" },
                    "eyes": { "type": "STRING" },
                    "lips": { "type": "STRING" },
                    "face": { "type": "STRING" },
                    "tips": { "type": "STRING" }
                },
                "required": ["styleName", "eyes", "lips", "face", "tips"]
            }
        },
        "required": ["title", "description", "occasion", "sections", "makeup"]
    })
}

/// Reject decoded plans that violate the contract. No silent coercion: a
/// section with the wrong option count or an unparseable link is a schema
/// violation, same as a missing field.
pub fn validate(plan: &Plan) -> Result<(), GenerationError> {
    fn required(field: &str, value: &str) -> Result<(), GenerationError> {
        if value.trim().is_empty() {
            return Err(GenerationError::Schema(format!("empty field: {field}")));
        }
        Ok(())
    }

    required("title", &plan.title)?;
    required("description", &plan.description)?;
    required("occasion", &plan.occasion)?;
    required("makeup.styleName", &plan.makeup.style_name)?;
    required("makeup.eyes", &plan.makeup.eyes)?;
    required("makeup.lips", &plan.makeup.lips)?;
    required("makeup.face", &plan.makeup.face)?;
    required("makeup.tips", &plan.makeup.tips)?;

    if plan.sections.is_empty() {
        return Err(GenerationError::Schema("plan has no sections".into()));
    }

    for section in &plan.sections {
        if section.options.len() != 2 {
            return Err(GenerationError::Schema(format!(
                "section \"{}\" carries {} option(s), expected exactly 2",
                section.category_name,
                section.options.len()
            )));
        }
        for option in &section.options {
            if Url::parse(&option.item_link).is_err() {
                return Err(GenerationError::Schema(format!(
                    "item \"{}\" has an invalid link: {}",
                    option.item_name, option.item_link
                )));
            }
        }
    }

    Ok(())
}

/// One outbound call, schema-constrained, validated, profile attached.
pub async fn generate_plan(
    client: &GeminiClient,
    model: &str,
    profile: &Profile,
    temperature: f64,
) -> Result<Plan, GenerationError> {
    let text = client
        .generate_structured(
            model,
            &system_instruction(profile),
            &user_content(profile),
            response_schema(),
            temperature,
        )
        .await
        .map_err(GenerationError::Api)?;

    let mut plan: Plan =
        serde_json::from_str(&text).map_err(|e| GenerationError::Schema(e.to_string()))?;
    validate(&plan)?;

    // Attach the originating profile so the look can be re-edited later.
    plan.profile = Some(profile.clone());

    Ok(plan)
}
