//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root and is sparse: stock defaults describe the Versavio Tech
//! site, and the user file overrides only what it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Versavio Tech"
//! base_url = "https://www.versaviotech.com"   # no trailing slash
//! default_og_image = "/assets/og-default.png" # relative paths resolve against base_url
//! logo = "/assets/new_logo.png"
//! description = "AI Solutions, SAP Integration, and Enterprise Software Development"
//! author = "Versavio Tech"
//! locale = "en_US"
//!
//! [organization]
//! telephone = "+92-322-0220670"
//! email = "info@versaviotech.com"
//! contact_type = "sales"
//! same_as = ["https://www.linkedin.com/company/versavio-tech/"]
//!
//! [reveal]
//! offset = 20.0                    # hidden-state translate distance (px)
//! duration = 0.8                   # seconds
//! easing = [0.19, 1.0, 0.22, 1.0]  # cubic-bezier control points
//! root_margin = 100.0              # early trigger distance for below-fold blocks (px)
//!
//! [theme]
//! background = "#0f0814"
//! surface = "#1a0f22"
//! text = "#f5eef8"
//! text_muted = "#b9a3c4"
//! accent = "#9d41be"
//!
//! [processing]
//! max_processes = 4                # omit for auto = CPU cores
//! ```
//!
//! The config is loaded once at startup and passed by reference everywhere
//! after that; nothing mutates it. Unknown keys are rejected to catch typos
//! early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity: name, base URL, share image.
    pub site: SiteIdentity,
    /// Facts published in the Organization structured-data record.
    pub organization: OrganizationConfig,
    /// Reveal animation timing.
    pub reveal: RevealSettings,
    /// Colors injected as CSS custom properties.
    pub theme: ThemeConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        let base = &self.site.base_url;
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if base.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must not end with '/'".into(),
            ));
        }
        if !(self.reveal.duration > 0.0) {
            return Err(ConfigError::Validation(
                "reveal.duration must be greater than 0".into(),
            ));
        }
        if !(self.reveal.offset >= 0.0) || !(self.reveal.root_margin >= 0.0) {
            return Err(ConfigError::Validation(
                "reveal.offset and reveal.root_margin must be non-negative".into(),
            ));
        }
        let [x1, _, x2, _] = self.reveal.easing;
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(ConfigError::Validation(
                "reveal.easing x control points must be within 0-1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve a site-relative URL (`/assets/x.png`) against the base URL.
    /// Absolute URLs pass through unchanged.
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with('/') && !url.starts_with("//") {
            format!("{}{}", self.site.base_url, url)
        } else {
            url.to_string()
        }
    }
}

/// Site identity used by the metadata composer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteIdentity {
    /// Brand name appended to page titles.
    pub name: String,
    /// Absolute origin, without trailing slash.
    pub base_url: String,
    /// Share image used when a page supplies none.
    pub default_og_image: String,
    /// Logo published in the Organization record.
    pub logo: String,
    /// One-line organization description.
    pub description: String,
    /// Value of the `author` and `publisher` meta tags.
    pub author: String,
    /// Open Graph locale.
    pub locale: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            name: "Versavio Tech".to_string(),
            base_url: "https://www.versaviotech.com".to_string(),
            default_og_image: "/assets/og-default.png".to_string(),
            logo: "/assets/new_logo.png".to_string(),
            description: "AI Solutions, SAP Integration, and Enterprise Software Development"
                .to_string(),
            author: "Versavio Tech".to_string(),
            locale: "en_US".to_string(),
        }
    }
}

/// Contact facts for the Organization record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrganizationConfig {
    pub telephone: String,
    pub email: String,
    /// schema.org `contactType` of the contact point.
    pub contact_type: String,
    /// Social profile URLs (`sameAs`).
    pub same_as: Vec<String>,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            telephone: "+92-322-0220670".to_string(),
            email: "info@versaviotech.com".to_string(),
            contact_type: "sales".to_string(),
            same_as: vec!["https://www.linkedin.com/company/versavio-tech/".to_string()],
        }
    }
}

/// Reveal animation parameters shared by every block on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealSettings {
    /// Translate distance of the hidden state, in CSS pixels.
    pub offset: f64,
    /// Transition duration in seconds.
    pub duration: f64,
    /// Cubic-bezier control points `[x1, y1, x2, y2]`.
    pub easing: [f64; 4],
    /// How far before entering the viewport a below-fold block triggers.
    pub root_margin: f64,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            offset: 20.0,
            duration: 0.8,
            easing: [0.19, 1.0, 0.22, 1.0],
            root_margin: 100.0,
        }
    }
}

/// Theme colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub background: String,
    /// Card and panel background.
    pub surface: String,
    pub text: String,
    /// Secondary text (breadcrumbs, dates, captions).
    pub text_muted: String,
    /// Brand color, also published as `theme-color`.
    pub accent: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#0f0814".to_string(),
            surface: "#1a0f22".to_string(),
            text: "#f5eef8".to_string(),
            text_muted: "#b9a3c4".to_string(),
            accent: "#9d41be".to_string(),
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from the content root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the content root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Versavio Site Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Brand name. Appended to page titles as "<title> | <name>" unless the
# title already contains it.
name = "Versavio Tech"

# Absolute origin used for canonical URLs, sitemap entries, and JSON-LD.
# Must not end with a slash.
base_url = "https://www.versaviotech.com"

# Share image for pages that do not set one. Paths starting with "/" are
# resolved against base_url.
default_og_image = "/assets/og-default.png"

logo = "/assets/new_logo.png"
description = "AI Solutions, SAP Integration, and Enterprise Software Development"
author = "Versavio Tech"
locale = "en_US"

# ---------------------------------------------------------------------------
# Organization facts (schema.org Organization record on every page)
# ---------------------------------------------------------------------------
[organization]
telephone = "+92-322-0220670"
email = "info@versaviotech.com"
contact_type = "sales"
same_as = ["https://www.linkedin.com/company/versavio-tech/"]

# ---------------------------------------------------------------------------
# Reveal animation
# ---------------------------------------------------------------------------
# Content is never hidden: the hidden state only offsets the block.
[reveal]
offset = 20.0
duration = 0.8
easing = [0.19, 1.0, 0.22, 1.0]
# Below-fold blocks trigger this many pixels before entering the viewport.
root_margin = 100.0

# ---------------------------------------------------------------------------
# Theme colors
# ---------------------------------------------------------------------------
[theme]
background = "#0f0814"
surface = "#1a0f22"
text = "#f5eef8"
text_muted = "#b9a3c4"
accent = "#9d41be"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from theme and reveal config.
pub fn generate_theme_css(theme: &ThemeConfig, reveal: &RevealSettings) -> String {
    let [x1, y1, x2, y2] = reveal.easing;
    format!(
        r#":root {{
    --color-bg: {background};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --reveal-duration: {duration}s;
    --reveal-easing: cubic-bezier({x1}, {y1}, {x2}, {y2});
}}"#,
        background = theme.background,
        surface = theme.surface,
        text = theme.text,
        text_muted = theme.text_muted,
        accent = theme.accent,
        duration = reveal.duration,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_describes_versavio() {
        let config = SiteConfig::default();
        assert_eq!(config.site.name, "Versavio Tech");
        assert_eq!(config.site.base_url, "https://www.versaviotech.com");
        assert_eq!(config.organization.contact_type, "sales");
    }

    #[test]
    fn default_config_is_valid() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn default_reveal_settings() {
        let reveal = RevealSettings::default();
        assert_eq!(reveal.offset, 20.0);
        assert_eq!(reveal.duration, 0.8);
        assert_eq!(reveal.easing, [0.19, 1.0, 0.22, 1.0]);
        assert_eq!(reveal.root_margin, 100.0);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[site]
name = "Acme"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.name, "Acme");
        // Unspecified fields in the same table keep their defaults
        assert_eq!(config.site.locale, "en_US");
        assert_eq!(config.reveal.duration, 0.8);
    }

    #[test]
    fn absolute_url_resolves_relative_paths() {
        let config = SiteConfig::default();
        assert_eq!(
            config.absolute_url("/assets/a.png"),
            "https://www.versaviotech.com/assets/a.png"
        );
        assert_eq!(
            config.absolute_url("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(config.absolute_url("//cdn.example.com/a.png"), "//cdn.example.com/a.png");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.name, "Versavio Tech");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[reveal]
offset = 32.0

[theme]
accent = "#123456"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.reveal.offset, 32.0);
        assert_eq!(config.theme.accent, "#123456");
        assert_eq!(config.reveal.duration, 0.8);
        assert_eq!(config.theme.background, "#0f0814");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[site]\nnmae = \"typo\"\n",
        )
        .unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[colours]\nbg = \"#000\"\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn trailing_slash_base_url_rejected() {
        let mut config = SiteConfig::default();
        config.site.base_url = "https://www.versaviotech.com/".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn non_http_base_url_rejected() {
        let mut config = SiteConfig::default();
        config.site.base_url = "www.versaviotech.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_site_name_rejected() {
        let mut config = SiteConfig::default();
        config.site.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_duration_rejected() {
        let mut config = SiteConfig::default();
        config.reveal.duration = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_offset_rejected() {
        let mut config = SiteConfig::default();
        config.reveal.offset = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn easing_x_out_of_range_rejected() {
        let mut config = SiteConfig::default();
        config.reveal.easing = [1.5, 0.0, 0.5, 1.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn easing_y_may_overshoot() {
        let mut config = SiteConfig::default();
        config.reveal.easing = [0.3, -0.5, 0.7, 1.6];
        assert!(config.validate().is_ok());
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str("[site]\nname = \"A\"\nlocale = \"en_US\"").unwrap();
        let overlay: toml::Value = toml::from_str("[site]\nname = \"B\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["site"]["name"].as_str(), Some("B"));
        assert_eq!(merged["site"]["locale"].as_str(), Some("en_US"));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str("same_as = [\"a\", \"b\"]").unwrap();
        let overlay: toml::Value = toml::from_str("same_as = [\"c\"]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["same_as"].as_array().map(|a| a.len()), Some(1));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site.name, defaults.site.name);
        assert_eq!(config.reveal, defaults.reveal);
        assert_eq!(config.organization.same_as, defaults.organization.same_as);
    }

    // =========================================================================
    // CSS generation
    // =========================================================================

    #[test]
    fn theme_css_includes_colors_and_reveal_timing() {
        let css = generate_theme_css(&ThemeConfig::default(), &RevealSettings::default());
        assert!(css.contains("--color-accent: #9d41be"));
        assert!(css.contains("--reveal-duration: 0.8s"));
        assert!(css.contains("cubic-bezier(0.19, 1, 0.22, 1)"));
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_is_clamped_to_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }
}
