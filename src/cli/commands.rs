use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `Closet Muse` - your personal AI stylist with a persistent wardrobe.
#[derive(Parser, Debug)]
#[command(name = "closetmuse")]
#[command(author = "theonlyhennygod")]
#[command(version = "0.1.0")]
#[command(about = "Curated by intelligence. Defined by you.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a styled look from your request
    Generate {
        /// Profile TOML file (skips the interactive form)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Save the result to the wardrobe without asking
        #[arg(long)]
        save: bool,
    },

    /// Browse and manage saved looks
    Wardrobe {
        #[command(subcommand)]
        command: WardrobeCommands,
    },

    /// Share a saved look
    Share {
        /// Identifier of the saved look
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum WardrobeCommands {
    /// List saved looks, newest first
    List,

    /// Print a saved look in full
    Show { id: String },

    /// Delete a saved look
    Delete { id: String },

    /// Decode a saved look's visualization to an image file
    ExportImage {
        id: String,

        /// Output path (defaults to <id>.<ext> from the mime type)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
