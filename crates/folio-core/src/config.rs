use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Ordered page sections, `home` first
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            navigation: NavigationConfig::default(),
            scroll: ScrollConfig::default(),
            ui: UiConfig::default(),
            sections: default_sections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Location of the long-scroll page; its path is the canonical base path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Data directory path (log files)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Section detection and navigation tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Nav bar height used when the sticky bar cannot be measured
    #[serde(default = "default_nav_height")]
    pub nav_height_fallback_px: f64,
    /// Distance below the nav bar where a section's top edge activates it
    #[serde(default = "default_activation_band")]
    pub activation_band_px: f64,
    /// Distance below the nav bar a section's bottom edge must stay beyond
    #[serde(default = "default_deactivation_offset")]
    pub deactivation_offset_px: f64,
    /// Fraction of the header height within which `home` always wins
    #[serde(default = "default_home_hysteresis")]
    pub home_hysteresis: f64,
    /// Delay before the initial hash navigation runs
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    /// Targets closer than this are treated as already reached
    #[serde(default = "default_arrival_epsilon")]
    pub arrival_epsilon_px: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            nav_height_fallback_px: default_nav_height(),
            activation_band_px: default_activation_band(),
            deactivation_offset_px: default_deactivation_offset(),
            home_hysteresis: default_home_hysteresis(),
            settle_delay_ms: default_settle_delay(),
            arrival_epsilon_px: default_arrival_epsilon(),
        }
    }
}

/// Easing curve used by the smooth-scroll animator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the animation
    None,
    Linear,
    /// Cubic ease-out
    Cubic,
    /// Cubic ease-in-out
    #[default]
    CubicInOut,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// Smooth scrolling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate programmatic navigation (false jumps straight to the target)
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default)]
    pub easing: EasingType,
    /// Shortest animation, applied to short hops
    #[serde(default = "default_min_duration")]
    pub min_duration_ms: u64,
    /// Longest animation, applied to long hops
    #[serde(default = "default_max_duration")]
    pub max_duration_ms: u64,
    /// Duration contributed by each pixel of travel
    #[serde(default = "default_ms_per_px")]
    pub ms_per_px: f64,
    /// Frame rate the host should tick at while animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            easing: EasingType::default(),
            min_duration_ms: default_min_duration(),
            max_duration_ms: default_max_duration(),
            ms_per_px: default_ms_per_px(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Page pixels represented by one terminal row
    #[serde(default = "default_px_per_row")]
    pub px_per_row: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            px_per_row: default_px_per_row(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub label: String,
}

impl SectionConfig {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

fn default_sections() -> Vec<SectionConfig> {
    [
        ("home", "Home"),
        ("about", "About"),
        ("experience", "Experience"),
        ("skills", "Skills"),
        ("certifications", "Certifications"),
        ("testimonials", "Testimonials"),
        ("articles", "Articles"),
        ("contact", "Contact"),
    ]
    .into_iter()
    .map(|(id, label)| SectionConfig::new(id, label))
    .collect()
}

fn default_base_url() -> String {
    "http://localhost:3000/".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_nav_height() -> f64 {
    80.0
}

fn default_activation_band() -> f64 {
    100.0
}

fn default_deactivation_offset() -> f64 {
    200.0
}

fn default_home_hysteresis() -> f64 {
    0.5
}

fn default_settle_delay() -> u64 {
    300
}

fn default_arrival_epsilon() -> f64 {
    10.0
}

fn default_min_duration() -> u64 {
    600
}

fn default_max_duration() -> u64 {
    1400
}

fn default_ms_per_px() -> f64 {
    1.0
}

fn default_animation_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

fn default_px_per_row() -> u16 {
    20
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaulting when it is absent
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file written by the terminal host
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }
}
