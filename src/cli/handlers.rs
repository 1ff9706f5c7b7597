use super::commands::{Cli, Commands, WardrobeCommands};
use crate::config::Config;
use crate::error::StoreError;
use crate::look::StyledLook;
use crate::profile::Profile;
use crate::share;
use crate::stylist::LookPipeline;
use crate::wardrobe::{FileSlot, Wardrobe};
use anyhow::{Context, Result, bail};
use base64::Engine;
use console::style;
use std::path::PathBuf;

const SITE_URL: &str = "https://myclosetmuse.com";

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Generate { profile, save } => generate(&config, profile, save).await,
        Commands::Wardrobe { command } => match command {
            WardrobeCommands::List => list(&config),
            WardrobeCommands::Show { id } => show(&config, &id),
            WardrobeCommands::Delete { id } => delete(&config, &id),
            WardrobeCommands::ExportImage { id, out } => export_image(&config, &id, out),
        },
        Commands::Share { id } => share_look(&config, &id),
    }
}

fn open_wardrobe(config: &Config) -> Wardrobe {
    Wardrobe::open(Box::new(FileSlot::new(
        config.wardrobe_path(),
        config.wardrobe.max_bytes,
    )))
}

// ── Generate ──────────────────────────────────────────────────────

async fn generate(
    config: &Config,
    profile_file: Option<PathBuf>,
    save_immediately: bool,
) -> Result<()> {
    let profile: Profile = match profile_file {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("read profile {}", path.display()))?;
            toml::from_str(&raw).context("parse profile file")?
        }
        None => super::form::collect_profile()?,
    };

    println!("\n{}", style("CURATING YOUR COLLECTION...").dim());

    let pipeline = LookPipeline::from_config(config);
    let look = match pipeline.produce_look(&profile).await {
        Ok(look) => look,
        Err(err) => {
            // The submitted profile survives the failure; point the user
            // at an editable copy instead of making them retype.
            let retry_path = keep_profile_for_retry(config, &profile);
            eprintln!(
                "{} {err}",
                style("Something went wrong with the stylist AI.").red()
            );
            if let Some(path) = retry_path {
                eprintln!(
                    "Your request was kept. Edit and retry with: closetmuse generate --profile {}",
                    path.display()
                );
            }
            bail!("look generation failed");
        }
    };

    render_look(&look);

    let mut wardrobe = open_wardrobe(config);
    if wardrobe.is_saved(&look) {
        println!("{}", style("Already saved to your wardrobe.").dim());
        return Ok(());
    }

    let wants_save = save_immediately
        || dialoguer::Confirm::new()
            .with_prompt("Save to wardrobe?")
            .default(true)
            .interact()
            .unwrap_or(false);

    if wants_save {
        match wardrobe.save(&look) {
            Ok(id) => println!("{} ({id})", style("Saved to wardrobe.").green()),
            Err(StoreError::Unrecoverable) => eprintln!(
                "{}",
                style(
                    "Storage is completely full. Please delete some old looks to save new ones."
                )
                .red()
            ),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn keep_profile_for_retry(config: &Config, profile: &Profile) -> Option<PathBuf> {
    let path = config.workspace_dir.join("last_profile.toml");
    std::fs::create_dir_all(&config.workspace_dir).ok()?;
    let serialized = toml::to_string_pretty(profile).ok()?;
    std::fs::write(&path, serialized).ok()?;
    Some(path)
}

// ── Wardrobe ──────────────────────────────────────────────────────

fn list(config: &Config) -> Result<()> {
    let wardrobe = open_wardrobe(config);
    if wardrobe.looks().is_empty() {
        println!("Your wardrobe is empty. Save your favorite generated looks here.");
        return Ok(());
    }

    for look in wardrobe.looks() {
        let id = look.id.as_deref().unwrap_or("-");
        let date = look.saved_at.as_deref().unwrap_or("-");
        let visual = if look.image.is_some() { "visual" } else { "no preview" };
        println!(
            "{}  {}  {}  [{}]",
            style(id).dim(),
            style(&look.title).bold(),
            style(date).dim(),
            visual,
        );
        println!("    {}", style(&look.occasion).italic());
    }
    Ok(())
}

fn show(config: &Config, id: &str) -> Result<()> {
    let wardrobe = open_wardrobe(config);
    let Some(look) = wardrobe.get(id) else {
        bail!("no saved look with id {id}");
    };
    render_look(look);
    Ok(())
}

fn delete(config: &Config, id: &str) -> Result<()> {
    let mut wardrobe = open_wardrobe(config);
    if wardrobe.delete(id)? {
        println!("Deleted {id}.");
    } else {
        println!("No saved look with id {id}.");
    }
    Ok(())
}

fn export_image(config: &Config, id: &str, out: Option<PathBuf>) -> Result<()> {
    let wardrobe = open_wardrobe(config);
    let Some(look) = wardrobe.get(id) else {
        bail!("no saved look with id {id}");
    };
    let Some(image) = &look.image else {
        bail!("look {id} has no visualization (it may have been stripped to free storage)");
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&image.data)
        .context("decode image payload")?;

    let extension = match image.mime_type.as_str() {
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "jpg",
    };
    let path = out.unwrap_or_else(|| PathBuf::from(format!("{id}.{extension}")));
    std::fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    println!("Exported visualization to {}.", path.display());
    Ok(())
}

// ── Share ─────────────────────────────────────────────────────────

fn share_look(config: &Config, id: &str) -> Result<()> {
    let wardrobe = open_wardrobe(config);
    let Some(look) = wardrobe.get(id) else {
        bail!("no saved look with id {id}");
    };

    let text = format!("{}\n\nStyled by MyClosetMuse.com", look.description);
    match share::detect() {
        Some(target) => {
            tracing::debug!(variant = target.name(), "sharing look");
            target.share(&look.title, &text, SITE_URL);
            println!("Shared \"{}\".", look.title);
        }
        None => println!("Share this link: {SITE_URL}"),
    }
    Ok(())
}

// ── Rendering ─────────────────────────────────────────────────────

fn render_look(look: &StyledLook) {
    println!();
    println!("{}", style(&look.title).bold().underlined());
    println!("{}", look.description);
    println!("{}", style(&look.occasion).italic().dim());

    if look.image.is_some() {
        println!(
            "{}",
            style("An AI visualization is attached (wardrobe export-image to view).").dim()
        );
    }

    for section in &look.sections {
        println!();
        println!(
            "{}  {}",
            style(&section.category_name).bold(),
            style(&section.curation_reason).dim()
        );
        for option in &section.options {
            let partner = if option.is_affiliate { "  [Partner]" } else { "" };
            println!(
                "  - {} by {} ({}){partner}",
                style(&option.item_name).bold(),
                option.brand,
                option.price_estimate,
            );
            if !option.description.is_empty() {
                println!("    {}", option.description);
            }
            println!("    {}", style(&option.item_link).underlined().dim());
        }
    }

    println!();
    println!("{}", style("The Beauty Edit").bold());
    println!("  The Look: {}", look.makeup.style_name);
    println!("  Eyes:     {}", look.makeup.eyes);
    println!("  Lips:     {}", look.makeup.lips);
    println!("  Face:     {}", look.makeup.face);
    println!("  Pro Tip:  \"{}\"", look.makeup.tips);
    println!();
}
