#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod look;
pub mod profile;
pub mod share;
pub mod stylist;
pub mod wardrobe;

pub use config::Config;
pub use error::{GenerationError, MuseError, Result, StoreError};
pub use look::{ClothingItem, LookImage, LookSection, MakeupLook, Plan, StyledLook};
pub use profile::{Budget, Profile};
pub use stylist::LookPipeline;
pub use wardrobe::Wardrobe;
