//! Stage 2: best-effort look visualization.
//!
//! Image synthesis is the least reliable and least essential part of the
//! result, so this stage has no failure channel at all: every error is
//! absorbed here and mapped to "no image". The pipeline stays useful
//! without one.

use crate::gemini::GeminiClient;
use crate::look::{LookImage, Plan};
use crate::profile::Profile;

const ASPECT_RATIO: &str = "3:4";

/// The user's description is the primary constraint; the plan's first
/// option per section supplies concrete wardrobe cues.
pub fn visual_prompt(plan: &Plan, profile: &Profile) -> String {
    let wardrobe_cues = plan
        .sections
        .iter()
        .filter_map(|section| section.options.first())
        .map(|option| option.item_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Fashion photography, full body shot.\n\
         Subject: A model wearing an outfit matching this specific user request: \"{description}\".\n\
         \n\
         Key wardrobe items to visualize: {wardrobe_cues}.\n\
         \n\
         Style: {title}.\n\
         Vibe: {vibe}.\n\
         Aesthetic: High-fashion, photorealistic, studio lighting, neutral background, editorial quality.",
        description = profile.description,
        title = plan.title,
        vibe = profile.vibe,
    )
}

/// Never signals failure to the caller.
pub async fn generate_visual(
    client: &GeminiClient,
    model: &str,
    plan: &Plan,
    profile: &Profile,
    temperature: f64,
) -> Option<LookImage> {
    let prompt = visual_prompt(plan, profile);

    match client
        .generate_image(model, &prompt, ASPECT_RATIO, temperature)
        .await
    {
        Ok(image) => image,
        Err(err) => {
            tracing::warn!("image generation failed, proceeding with text only: {err:#}");
            None
        }
    }
}
