//! Sequences the two generation stages into one atomic result.

use super::{plan, visual};
use crate::config::Config;
use crate::error::GenerationError;
use crate::gemini::GeminiClient;
use crate::look::StyledLook;
use crate::profile::Profile;

const TEMPERATURE: f64 = 0.7;

/// Orchestrates plan generation then visualization. Owns the produced look
/// until it is returned; afterwards the caller owns display and the
/// wardrobe owns any persisted copy independently.
pub struct LookPipeline {
    client: GeminiClient,
    plan_model: String,
    image_model: String,
}

impl LookPipeline {
    pub fn new(client: GeminiClient, plan_model: String, image_model: String) -> Self {
        Self {
            client,
            plan_model,
            image_model,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = GeminiClient::new(
            config.resolved_api_key().as_deref(),
            config.gemini.timeout_secs,
        );
        Self::new(
            client,
            config.gemini.plan_model.clone(),
            config.gemini.image_model.clone(),
        )
    }

    /// Fails only if the plan stage fails. The visual stage runs strictly
    /// after it (the prompt needs the plan's content) and can only withhold
    /// the image, never the look. A successful result always carries a
    /// non-empty title, description, occasion, sections and makeup.
    pub async fn produce_look(&self, profile: &Profile) -> Result<StyledLook, GenerationError> {
        let plan =
            plan::generate_plan(&self.client, &self.plan_model, profile, TEMPERATURE).await?;
        tracing::info!(title = %plan.title, sections = plan.sections.len(), "plan generated");

        let image =
            visual::generate_visual(&self.client, &self.image_model, &plan, profile, TEMPERATURE)
                .await;
        if image.is_none() {
            tracing::info!("look proceeds without a visual");
        }

        Ok(StyledLook::from_plan(plan, image))
    }
}
