use crate::error::{FolioError, Result};
use crate::page::CellMetrics;
use crate::reveal::{RootMargin, VisibilityOptions};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RcConfig {
    pub hero_interval_ms: u64,
    pub about_interval_ms: u64,
    pub reveal_threshold: f64,
    pub reveal_bottom_inset_px: f64,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    pub smooth_scroll: bool,
    pub smooth_scroll_ms: u64,
    pub mouse: bool,
    pub asset_dir: Option<PathBuf>,
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            hero_interval_ms: 30,
            about_interval_ms: 20,
            reveal_threshold: 0.3,
            reveal_bottom_inset_px: 100.0,
            cell_width_px: 10.0,
            cell_height_px: 20.0,
            smooth_scroll: true,
            smooth_scroll_ms: 400,
            mouse: true,
            asset_dir: None,
        }
    }
}

impl RcConfig {
    pub fn hero_interval(&self) -> Duration {
        Duration::from_millis(self.hero_interval_ms)
    }

    pub fn about_interval(&self) -> Duration {
        Duration::from_millis(self.about_interval_ms)
    }

    pub fn smooth_scroll_duration(&self) -> Duration {
        Duration::from_millis(self.smooth_scroll_ms)
    }

    pub fn visibility_options(&self) -> VisibilityOptions {
        VisibilityOptions {
            threshold: self.reveal_threshold,
            root_margin: RootMargin::bottom_inset(self.reveal_bottom_inset_px),
        }
    }

    pub fn cell_metrics(&self) -> CellMetrics {
        CellMetrics {
            width_px: self.cell_width_px,
            height_px: self.cell_height_px,
        }
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .foliorc in:
    /// 1. Current directory
    /// 2. Home directory (~/.foliorc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(".foliorc");
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(".foliorc");
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load the searched-for RC file, falling back to defaults.
    pub fn load_config() -> RcConfig {
        let mut config = RcConfig::default();

        if let Some(rc_path) = Self::get_rc_path() {
            match fs::read_to_string(&rc_path) {
                Ok(content) => {
                    debug!(path = %rc_path.display(), "loading rc file");
                    Self::parse_config_content(&content, &mut config);
                }
                Err(err) => {
                    // an unreadable rc file in a search location is not fatal
                    warn!(path = %rc_path.display(), %err, "skipping unreadable rc file");
                }
            }
        }

        config
    }

    /// Load an explicitly requested RC file. Unlike the search, a missing
    /// file here is an error.
    pub fn load_from(path: &Path) -> Result<RcConfig> {
        let content = fs::read_to_string(path).map_err(|source| FolioError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = RcConfig::default();
        Self::parse_config_content(&content, &mut config);
        Ok(config)
    }

    /// Parse the content of an RC file
    pub fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    fn parse_config_line(line: &str, config: &mut RcConfig) {
        // Remove inline comments
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();

        // "set" is optional: `set smooth_scroll`, `set nomouse`, `set key=value`
        let setting = line.strip_prefix("set ").map_or(line, str::trim);

        if let Some((key, value)) = setting.split_once('=') {
            Self::apply_setting(key.trim(), value.trim(), config);
        } else if let Some(flag) = setting.strip_prefix("no") {
            Self::apply_flag(flag, false, config);
        } else {
            Self::apply_flag(setting, true, config);
        }
    }

    fn apply_flag(name: &str, on: bool, config: &mut RcConfig) {
        match name {
            "smooth_scroll" | "smoothscroll" => config.smooth_scroll = on,
            "mouse" => config.mouse = on,
            _ => warn!(setting = name, "unknown rc flag ignored"),
        }
    }

    fn apply_setting(key: &str, value: &str, config: &mut RcConfig) {
        let applied = match key {
            "hero_interval_ms" => Self::parse_in_range(value, 1..=1000).map(|v| config.hero_interval_ms = v),
            "about_interval_ms" => Self::parse_in_range(value, 1..=1000).map(|v| config.about_interval_ms = v),
            "reveal_threshold" => Self::parse_fraction(value, 0.0, 1.0).map(|v| config.reveal_threshold = v),
            "reveal_bottom_inset_px" => {
                Self::parse_fraction(value, 0.0, 2000.0).map(|v| config.reveal_bottom_inset_px = v)
            }
            "cell_width_px" => Self::parse_fraction(value, 1.0, 200.0).map(|v| config.cell_width_px = v),
            "cell_height_px" => Self::parse_fraction(value, 1.0, 200.0).map(|v| config.cell_height_px = v),
            "smooth_scroll_ms" => Self::parse_in_range(value, 0..=5000).map(|v| config.smooth_scroll_ms = v),
            "smooth_scroll" | "smoothscroll" => Self::parse_bool(value).map(|v| config.smooth_scroll = v),
            "mouse" => Self::parse_bool(value).map(|v| config.mouse = v),
            "asset_dir" if !value.is_empty() => {
                config.asset_dir = Some(PathBuf::from(value));
                Some(())
            }
            _ => {
                warn!(key, "unknown rc setting ignored");
                return;
            }
        };

        if applied.is_none() {
            warn!(key, value, "invalid rc value ignored");
        }
    }

    fn parse_in_range(value: &str, range: std::ops::RangeInclusive<u64>) -> Option<u64> {
        value.parse::<u64>().ok().filter(|v| range.contains(v))
    }

    fn parse_fraction(value: &str, min: f64, max: f64) -> Option<f64> {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= min && *v <= max)
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    /// Generate a sample RC file content
    pub fn generate_sample_rc() -> String {
        r#"# folio configuration file (.foliorc)
# Lines starting with # or " are comments

# Typewriter speed, one character per interval
hero_interval_ms=30
about_interval_ms=20

# Reveal when this fraction of the text is above the inset line
reveal_threshold=0.3
reveal_bottom_inset_px=100

# Pixel size of one terminal cell, used for the reveal geometry
cell_width_px=10
cell_height_px=20

# Navigation
set smooth_scroll       # or: set nosmooth_scroll
smooth_scroll_ms=400
set mouse               # or: set nomouse

# Where to look for mine.jpeg
# asset_dir=/home/me/portfolio/public
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_vim_style_config() {
        let mut config = RcConfig::default();
        let content = r#"
            set nosmooth_scroll
            set nomouse
            set hero_interval_ms=45
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert!(!config.smooth_scroll);
        assert!(!config.mouse);
        assert_eq!(config.hero_interval_ms, 45);
        assert_eq!(config.about_interval_ms, 20);
    }

    #[test]
    fn test_parse_key_value_config() {
        let mut config = RcConfig::default();
        let content = r#"
            about_interval_ms=12
            reveal_threshold=0.5
            reveal_bottom_inset_px=40
            cell_height_px=16
            smooth_scroll=no
            asset_dir=/srv/portfolio
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert_eq!(config.about_interval_ms, 12);
        assert_eq!(config.hero_interval_ms, 30);
        assert_eq!(config.reveal_threshold, 0.5);
        assert_eq!(config.reveal_bottom_inset_px, 40.0);
        assert_eq!(config.cell_height_px, 16.0);
        assert!(!config.smooth_scroll);
        assert_eq!(config.asset_dir, Some(PathBuf::from("/srv/portfolio")));
    }

    #[test]
    fn test_parse_mixed_config_with_comments() {
        let mut config = RcConfig::default();
        let content = r#"
            # This is a comment
            set nomouse            # Disable mouse capture
            " This is also a comment

            smooth_scroll_ms=250   # Faster scrolling
            # hero_interval_ms=99  # This is commented out
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert!(!config.mouse);
        assert_eq!(config.smooth_scroll_ms, 250);
        assert_eq!(config.hero_interval_ms, 30);
    }

    #[test]
    fn test_invalid_values_ignored() {
        let mut config = RcConfig::default();
        let content = r#"
            hero_interval_ms=0       # Invalid: too small
            about_interval_ms=5000   # Invalid: too large
            reveal_threshold=1.5     # Invalid: above 1
            reveal_threshold=NaN     # Invalid: not finite
            cell_width_px=wide       # Invalid: not a number
            mouse=maybe              # Invalid: not a bool
            unknown_setting=value    # Unknown setting
            set sparkles             # Unknown flag
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert_eq!(config, RcConfig::default());
    }

    #[test]
    fn test_sample_rc_parses_to_defaults() {
        let mut config = RcConfig::default();
        RcLoader::parse_config_content(&RcLoader::generate_sample_rc(), &mut config);
        assert_eq!(config, RcConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hero_interval_ms=50").unwrap();
        writeln!(file, "set nomouse").unwrap();

        let config = RcLoader::load_from(file.path()).unwrap();
        assert_eq!(config.hero_interval(), Duration::from_millis(50));
        assert_eq!(config.about_interval(), Duration::from_millis(20));
        assert!(!config.mouse);
    }

    #[test]
    fn test_load_from_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.foliorc");
        assert!(matches!(
            RcLoader::load_from(&missing),
            Err(FolioError::Config { .. })
        ));
    }

    #[test]
    fn test_visibility_options_from_config() {
        let options = RcConfig::default().visibility_options();
        assert_eq!(options, VisibilityOptions::default());
    }
}
