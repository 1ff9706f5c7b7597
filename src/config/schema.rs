use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workspace directory - computed from home, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub wardrobe: WardrobeConfig,
}

// ── Gemini ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; falls back to GEMINI_API_KEY / GOOGLE_API_KEY env vars.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_plan_model")]
    pub plan_model: String,

    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Total request timeout per outbound call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_plan_model() -> String {
    "gemini-2.5-flash".into()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".into()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            plan_model: default_plan_model(),
            image_model: default_image_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ── Wardrobe ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardrobeConfig {
    /// Directory holding the wardrobe slot; defaults to the workspace dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Size budget for the serialized collection, in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_max_bytes() -> usize {
    5 * 1024 * 1024
}

impl Default for WardrobeConfig {
    fn default() -> Self {
        Self {
            dir: None,
            max_bytes: default_max_bytes(),
        }
    }
}

// ── Load / save ───────────────────────────────────────────────────

const WARDROBE_SLOT_FILE: &str = "wardrobe.json";

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
        let workspace_dir = home.join(".closetmuse");
        let config_path = workspace_dir.join("config.toml");

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.workspace_dir = workspace_dir;
            config.config_path = config_path;
            return Ok(config);
        }

        Ok(Self {
            workspace_dir,
            config_path,
            gemini: GeminiConfig::default(),
            wardrobe: WardrobeConfig::default(),
        })
    }

    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.workspace_dir).context("Failed to create workspace dir")?;
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    /// Config key first, then the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.gemini
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
    }

    /// Path of the single durable slot holding the saved-look collection.
    pub fn wardrobe_path(&self) -> PathBuf {
        self.wardrobe
            .dir
            .clone()
            .unwrap_or_else(|| self.workspace_dir.clone())
            .join(WARDROBE_SLOT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &std::path::Path) -> Config {
        Config {
            workspace_dir: dir.to_path_buf(),
            config_path: dir.join("config.toml"),
            gemini: GeminiConfig::default(),
            wardrobe: WardrobeConfig::default(),
        }
    }

    #[test]
    fn defaults_are_sensible() {
        let config = GeminiConfig::default();
        assert_eq!(config.plan_model, "gemini-2.5-flash");
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(WardrobeConfig::default().max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str(
            "[gemini]\n\
             api_key = \"test-key\"\n",
        )
        .unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.gemini.plan_model, "gemini-2.5-flash");
        assert_eq!(config.wardrobe.max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn wardrobe_path_defaults_to_workspace_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = test_config(tmp.path());
        assert_eq!(config.wardrobe_path(), tmp.path().join("wardrobe.json"));
    }

    #[test]
    fn wardrobe_path_honours_override_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = test_config(tmp.path());
        config.wardrobe.dir = Some(tmp.path().join("elsewhere"));
        assert_eq!(
            config.wardrobe_path(),
            tmp.path().join("elsewhere").join("wardrobe.json")
        );
    }

    #[test]
    fn save_writes_config_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = test_config(tmp.path());
        config.gemini.api_key = Some("k".into());
        config.save().unwrap();

        let contents = fs::read_to_string(config.config_path).unwrap();
        assert!(contents.contains("[gemini]"));
        assert!(contents.contains("api_key"));
    }
}
