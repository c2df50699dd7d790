use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use crate::settings::{self, Settings, ValidationError};

// ---------------------------------------------------------------------------
// ConfigFile — deserialized from TOML (all fields optional)
// ---------------------------------------------------------------------------

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub theme: Option<String>,
    pub clock_text_position: Option<String>,
    pub font_size: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub seconds_indicator_line_width: Option<f64>,
    pub manifest_base: Option<String>,
    pub link_base: Option<String>,
    #[serde(default)]
    pub viewer: ViewerConfigFile,
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ViewerConfigFile {
    pub tick_ms: Option<u64>,
}

// ---------------------------------------------------------------------------
// Config — resolved (all fields concrete, settings validated)
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    /// Directory or URL the per-theme manifests live under.
    pub manifest_base: String,
    /// Page URL prefixed to share tokens; empty prints bare `#token`.
    pub link_base: String,
    pub viewer: ViewerConfig,
}

#[derive(Debug)]
pub struct ViewerConfig {
    pub tick: Duration,
}

impl ConfigFile {
    /// Merge CLI values (overwrites non-None fields).
    pub fn merge_cli(&mut self, overrides: CliOverrides) {
        if let Some(ref v) = overrides.theme {
            debug!("config: CLI override theme={v}");
            self.theme = overrides.theme;
        }
        if let Some(ref v) = overrides.clock_text_position {
            debug!("config: CLI override clock_text_position={v}");
            self.clock_text_position = overrides.clock_text_position;
        }
        if let Some(v) = overrides.font_size {
            debug!("config: CLI override font_size={v}");
            self.font_size = overrides.font_size;
        }
        if let Some(v) = overrides.letter_spacing {
            debug!("config: CLI override letter_spacing={v}");
            self.letter_spacing = overrides.letter_spacing;
        }
        if let Some(v) = overrides.seconds_indicator_line_width {
            debug!("config: CLI override seconds_indicator_line_width={v}");
            self.seconds_indicator_line_width = overrides.seconds_indicator_line_width;
        }
        if let Some(ref v) = overrides.manifest_base {
            debug!("config: CLI override manifest_base={v}");
            self.manifest_base = overrides.manifest_base;
        }
    }

    /// Resolve to a Config: missing fields take their defaults, present
    /// settings fields pass through schema validation (whole-or-nothing).
    pub fn resolve(self) -> Result<Config, ValidationError> {
        let mut raw = serde_json::Map::new();
        if let Some(v) = self.theme {
            raw.insert("theme".into(), v.into());
        }
        if let Some(v) = self.clock_text_position {
            raw.insert("clockTextPosition".into(), v.into());
        }
        if let Some(v) = self.font_size {
            raw.insert("fontSize".into(), v.into());
        }
        if let Some(v) = self.letter_spacing {
            raw.insert("letterSpacing".into(), v.into());
        }
        if let Some(v) = self.seconds_indicator_line_width {
            raw.insert("secondsIndicatorLineWidth".into(), v.into());
        }
        let settings = settings::validate(&Value::Object(raw))?;

        let config = Config {
            settings,
            manifest_base: self.manifest_base.unwrap_or_else(|| "theme".into()),
            link_base: self.link_base.unwrap_or_default(),
            viewer: ViewerConfig {
                tick: Duration::from_millis(self.viewer.tick_ms.unwrap_or(100)),
            },
        };
        info!(
            "config: resolved theme={}, position={:?}, font_size={}, \
             letter_spacing={}, seconds_width={}, manifest_base={}, tick={}ms",
            config.settings.theme.as_str(),
            config.settings.clock_text_position,
            config.settings.font_size,
            config.settings.letter_spacing,
            config.settings.seconds_indicator_line_width,
            config.manifest_base,
            config.viewer.tick.as_millis(),
        );
        Ok(config)
    }
}

/// CLI-provided overrides, kept separate so they can be re-applied.
#[derive(Default, Clone)]
pub struct CliOverrides {
    pub theme: Option<String>,
    pub clock_text_position: Option<String>,
    pub font_size: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub seconds_indicator_line_width: Option<f64>,
    pub manifest_base: Option<String>,
}

/// Resolve the XDG config path for pizza-clock.
fn config_path() -> Option<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(config_dir.join("pizza-clock").join("config.toml"))
}

/// Load config file. Returns `ConfigFile::default()` if no file exists.
/// Returns an error if the file exists but cannot be parsed.
pub fn load_config() -> anyhow::Result<ConfigFile> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            info!("config: no HOME or XDG_CONFIG_HOME set, using defaults");
            return Ok(ConfigFile::default());
        }
    };
    debug!("config: looking for {}", path.display());
    match std::fs::read_to_string(&path) {
        Ok(text) => {
            info!("config: loaded from {}", path.display());
            let cfg: ConfigFile = toml::from_str(&text)
                .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("config: {} not found, using defaults", path.display());
            Ok(ConfigFile::default())
        }
        Err(e) => Err(anyhow::anyhow!("failed to read {}: {e}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ClockTextPosition, Theme};

    #[test]
    fn empty_toml() {
        let cfg: ConfigFile = toml::from_str("").unwrap();
        let resolved = cfg.resolve().unwrap();
        assert_eq!(resolved.settings, Settings::default());
        assert_eq!(resolved.manifest_base, "theme");
        assert_eq!(resolved.link_base, "");
        assert_eq!(resolved.viewer.tick, Duration::from_millis(100));
    }

    #[test]
    fn partial_toml() {
        let text = r#"
            theme = "circular"
            font_size = 48.0
            [viewer]
            tick_ms = 250
        "#;
        let cfg: ConfigFile = toml::from_str(text).unwrap();
        let resolved = cfg.resolve().unwrap();
        assert_eq!(resolved.settings.theme, Theme::Circular);
        assert_eq!(resolved.settings.font_size, 48.0);
        // Defaults for unspecified fields
        assert_eq!(
            resolved.settings.clock_text_position,
            ClockTextPosition::CircularBottomRight
        );
        assert_eq!(resolved.settings.letter_spacing, 5.0);
        assert_eq!(resolved.viewer.tick, Duration::from_millis(250));
    }

    #[test]
    fn invalid_toml() {
        let text = "this is not valid toml [[[";
        let result = toml::from_str::<ConfigFile>(text);
        assert!(result.is_err());
    }

    #[test]
    fn out_of_range_config_value_fails_resolution() {
        let cfg: ConfigFile = toml::from_str("font_size = 200.0").unwrap();
        let err = cfg.resolve().unwrap_err();
        assert_eq!(err.field, "fontSize");
    }

    #[test]
    fn cli_overrides() {
        let mut cfg: ConfigFile = toml::from_str("font_size = 40.0").unwrap();
        cfg.merge_cli(CliOverrides {
            theme: Some("circular".into()),
            font_size: Some(60.0),
            ..Default::default()
        });
        let resolved = cfg.resolve().unwrap();
        assert_eq!(resolved.settings.theme, Theme::Circular);
        assert_eq!(resolved.settings.font_size, 60.0); // CLI wins
        assert_eq!(resolved.settings.letter_spacing, 5.0); // default
    }
}
