//! User preferences.
//!
//! Each preference is an independently keyed scalar record: one small file
//! per key under the data directory. Keys are read once at startup with
//! hard-coded defaults; writes are fire-and-forget per key, with no
//! envelope or versioning.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::storage::{default_data_dir, StorageError};

/// AI assistant provider choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    OpenAi,
    Anthropic,
    Gemini,
    Grok,
    Ollama,
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiProvider::OpenAi => write!(f, "openai"),
            AiProvider::Anthropic => write!(f, "anthropic"),
            AiProvider::Gemini => write!(f, "gemini"),
            AiProvider::Grok => write!(f, "grok"),
            AiProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(AiProvider::OpenAi),
            "anthropic" => Ok(AiProvider::Anthropic),
            "gemini" => Ok(AiProvider::Gemini),
            "grok" => Ok(AiProvider::Grok),
            "ollama" => Ok(AiProvider::Ollama),
            other => Err(format!("Unknown provider: {}", other)),
        }
    }
}

/// UI theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// Editor font size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFontSize {
    Small,
    Medium,
    Large,
}

impl fmt::Display for EditorFontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorFontSize::Small => write!(f, "small"),
            EditorFontSize::Medium => write!(f, "medium"),
            EditorFontSize::Large => write!(f, "large"),
        }
    }
}

impl FromStr for EditorFontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(EditorFontSize::Small),
            "medium" => Ok(EditorFontSize::Medium),
            "large" => Ok(EditorFontSize::Large),
            other => Err(format!("Unknown font size: {}", other)),
        }
    }
}

/// Editor line spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorLineSpacing {
    Compact,
    Normal,
    Relaxed,
}

impl fmt::Display for EditorLineSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorLineSpacing::Compact => write!(f, "compact"),
            EditorLineSpacing::Normal => write!(f, "normal"),
            EditorLineSpacing::Relaxed => write!(f, "relaxed"),
        }
    }
}

impl FromStr for EditorLineSpacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(EditorLineSpacing::Compact),
            "normal" => Ok(EditorLineSpacing::Normal),
            "relaxed" => Ok(EditorLineSpacing::Relaxed),
            other => Err(format!("Unknown line spacing: {}", other)),
        }
    }
}

/// The full preference set, with the hard-coded defaults applied for any
/// key that has never been written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub ai_provider: AiProvider,
    pub theme: Theme,
    pub editor_font_size: EditorFontSize,
    pub editor_line_spacing: EditorLineSpacing,
    pub autosave_enabled: bool,
    pub autosave_interval_seconds: u32,
    pub default_template_id: Option<String>,
    pub export_include_metadata: bool,
    pub export_file_name_pattern: String,
    pub enable_mcp_integration: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            ai_provider: AiProvider::OpenAi,
            theme: Theme::Light,
            editor_font_size: EditorFontSize::Medium,
            editor_line_spacing: EditorLineSpacing::Normal,
            autosave_enabled: true,
            autosave_interval_seconds: 30,
            default_template_id: None,
            export_include_metadata: true,
            export_file_name_pattern: "{name}.md".to_string(),
            enable_mcp_integration: false,
        }
    }
}

impl Preferences {
    /// Reads every preference key once, falling back to the defaults for
    /// missing or unparseable values
    pub fn load(store: &PreferenceStore) -> Self {
        let defaults = Self::default();
        Self {
            ai_provider: store.read_parsed("ai_provider", defaults.ai_provider),
            theme: store.read_parsed("theme", defaults.theme),
            editor_font_size: store.read_parsed("editor_font_size", defaults.editor_font_size),
            editor_line_spacing: store
                .read_parsed("editor_line_spacing", defaults.editor_line_spacing),
            autosave_enabled: store.read_parsed("autosave_enabled", defaults.autosave_enabled),
            autosave_interval_seconds: store.read_parsed(
                "autosave_interval_seconds",
                defaults.autosave_interval_seconds,
            ),
            default_template_id: store.read("default_template_id"),
            export_include_metadata: store
                .read_parsed("export_include_metadata", defaults.export_include_metadata),
            export_file_name_pattern: store
                .read("export_file_name_pattern")
                .unwrap_or(defaults.export_file_name_pattern),
            enable_mcp_integration: store
                .read_parsed("enable_mcp_integration", defaults.enable_mcp_integration),
        }
    }
}

/// Per-key preference records on disk
pub struct PreferenceStore {
    dir: PathBuf,
}

impl PreferenceStore {
    /// Creates a store writing per-key files under the given directory
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Creates a store at the default location, `<data dir>/prefs`
    pub fn default_location() -> Result<Self, StorageError> {
        Ok(Self::new(default_data_dir()?.join("prefs")))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Reads the raw value for a key, or `None` when it was never written
    pub fn read(&self, key: &str) -> Option<String> {
        let value = fs::read_to_string(self.key_path(key)).ok()?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn read_parsed<T: FromStr>(&self, key: &str, default: T) -> T {
        self.read(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Writes a key's value. Fire-and-forget: failures are logged and
    /// never propagated
    pub fn write(&self, key: &str, value: &str) {
        let result = fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(self.key_path(key), value));
        if let Err(err) = result {
            log::warn!("Failed to write preference '{}': {}", key, err);
        }
    }

    /// Removes a key, reverting it to its default on the next load
    pub fn remove(&self, key: &str) {
        let path = self.key_path(key);
        if path.exists() {
            if let Err(err) = fs::remove_file(&path) {
                log::warn!("Failed to remove preference '{}': {}", key, err);
            }
        }
    }

    pub fn set_ai_provider(&self, value: AiProvider) {
        self.write("ai_provider", &value.to_string());
    }

    pub fn set_theme(&self, value: Theme) {
        self.write("theme", &value.to_string());
    }

    pub fn set_editor_font_size(&self, value: EditorFontSize) {
        self.write("editor_font_size", &value.to_string());
    }

    pub fn set_editor_line_spacing(&self, value: EditorLineSpacing) {
        self.write("editor_line_spacing", &value.to_string());
    }

    pub fn set_autosave_enabled(&self, value: bool) {
        self.write("autosave_enabled", &value.to_string());
    }

    pub fn set_autosave_interval_seconds(&self, value: u32) {
        self.write("autosave_interval_seconds", &value.to_string());
    }

    pub fn set_default_template_id(&self, value: Option<&str>) {
        match value {
            Some(id) => self.write("default_template_id", id),
            None => self.remove("default_template_id"),
        }
    }

    pub fn set_export_include_metadata(&self, value: bool) {
        self.write("export_include_metadata", &value.to_string());
    }

    pub fn set_export_file_name_pattern(&self, value: &str) {
        self.write("export_file_name_pattern", value);
    }

    pub fn set_enable_mcp_integration(&self, value: bool) {
        self.write("enable_mcp_integration", &value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_nothing_written() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs"));

        let prefs = Preferences::load(&store);
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.ai_provider, AiProvider::OpenAi);
        assert!(prefs.autosave_enabled);
        assert_eq!(prefs.autosave_interval_seconds, 30);
        assert_eq!(prefs.export_file_name_pattern, "{name}.md");
    }

    #[test]
    fn test_each_key_round_trips_independently() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs"));

        store.set_theme(Theme::Dark);
        store.set_autosave_interval_seconds(120);
        store.set_default_template_id(Some("api-template"));

        let prefs = Preferences::load(&store);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.autosave_interval_seconds, 120);
        assert_eq!(prefs.default_template_id.as_deref(), Some("api-template"));

        // Keys that were never written keep their defaults
        assert_eq!(prefs.ai_provider, AiProvider::OpenAi);
        assert_eq!(prefs.editor_font_size, EditorFontSize::Medium);
    }

    #[test]
    fn test_unparseable_value_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs"));

        store.write("theme", "solarized");
        store.write("autosave_interval_seconds", "soon");

        let prefs = Preferences::load(&store);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.autosave_interval_seconds, 30);
    }

    #[test]
    fn test_removing_default_template_reverts_it() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs"));

        store.set_default_template_id(Some("web-app-template"));
        assert_eq!(
            Preferences::load(&store).default_template_id.as_deref(),
            Some("web-app-template")
        );

        store.set_default_template_id(None);
        assert_eq!(Preferences::load(&store).default_template_id, None);
    }
}
