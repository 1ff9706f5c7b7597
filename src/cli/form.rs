//! Interactive profile form. Pure presentation: collects the fields the
//! pipeline needs and never interprets them.

use crate::profile::{Budget, Profile, VIBE_PRESETS};
use anyhow::{Context, Result};
use dialoguer::{FuzzySelect, Input, Select};

const SKIP_PRESET: &str = "(skip)";

pub fn collect_profile() -> Result<Profile> {
    let description: String = Input::new()
        .with_prompt("What are you looking for? (The Request)")
        .interact_text()
        .context("read request description")?;

    let height: String = optional_input("Height (e.g. 5'7)")?;
    let weight: String = optional_input("Weight (e.g. 140 lbs)")?;
    let sizes: String = optional_input("Sizes (e.g. US 6, Medium)")?;

    let mut vibe: String = optional_input("The Vibe (e.g. minimal, colorful, rockstar gf)")?;
    if let Some(preset) = pick_vibe_preset()? {
        if vibe.is_empty() {
            vibe = preset.to_string();
        } else {
            vibe = format!("{vibe}, {preset}");
        }
    }

    let budget_labels: Vec<String> = Budget::ALL.iter().map(ToString::to_string).collect();
    let budget_index = Select::new()
        .with_prompt("Budget")
        .items(&budget_labels)
        .default(1)
        .interact()
        .context("read budget")?;

    let preferred_brands: String = optional_input("Preferred Brands (e.g. Target, Zara, Express)")?;
    let celebrity_inspo: String = optional_input("Celebrity Inspo")?;
    let notes: String = optional_input("Notes")?;

    Ok(Profile {
        name: String::new(),
        height,
        weight,
        sizes,
        vibe,
        celebrity_inspo,
        budget: Budget::ALL[budget_index],
        preferred_brands,
        description,
        notes,
    })
}

fn optional_input(prompt: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .with_context(|| format!("read {prompt}"))
}

fn pick_vibe_preset() -> Result<Option<&'static str>> {
    let mut items = vec![SKIP_PRESET];
    items.extend(VIBE_PRESETS);

    let picked = FuzzySelect::new()
        .with_prompt("Add a vibe preset?")
        .items(&items)
        .default(0)
        .interact()
        .context("read vibe preset")?;

    Ok((picked > 0).then(|| items[picked]))
}
