use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use urania::ephemeris::ZodiacType;
use urania::rendering::{Color, VisualConfig};
use urania::{HouseSystem, Language};

/// Relative locations tried for `configs/urania.toml`, from the workspace
/// root and from a crate directory.
pub const CONFIG_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Debug, Clone)]
pub struct UraniaSettings {
    /// Swiss Ephemeris data directory; `None` defers to `SWISS_EPHEMERIS_PATH`
    pub ephemeris_path: Option<PathBuf>,
    pub zodiac: ZodiacType,
    pub default_house_system: HouseSystem,
    pub prefer_dst: bool,
    pub language: Language,
    pub visual: VisualConfig,
}

impl Default for UraniaSettings {
    fn default() -> Self {
        Self {
            ephemeris_path: None,
            zodiac: ZodiacType::Tropical,
            default_house_system: HouseSystem::Placidus,
            prefer_dst: true,
            language: Language::English,
            visual: VisualConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartToml {
    #[serde(default)]
    size: Option<f32>,
    #[serde(default)]
    margin: Option<f32>,
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    stroke_color: Option<String>,
    #[serde(default)]
    text_color: Option<String>,
    #[serde(default)]
    sign_tints: Option<[String; 2]>,
    #[serde(default)]
    font_family: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris_path: Option<PathBuf>,
    #[serde(default)]
    zodiac: ZodiacType,
    #[serde(default = "default_house_system")]
    default_house_system: String,
    #[serde(default = "default_prefer_dst")]
    prefer_dst: bool,
    #[serde(default = "default_language")]
    language: String,
    #[serde(default)]
    chart: ChartToml,
}

fn default_house_system() -> String {
    "P".to_string()
}

fn default_prefer_dst() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

fn parse_color(field: &str, value: &str) -> anyhow::Result<Color> {
    Color::from_hex(value)
        .ok_or_else(|| anyhow::anyhow!("chart.{field} is not a hex colour: {value:?}"))
}

fn visual_config(chart: ChartToml) -> anyhow::Result<VisualConfig> {
    let mut visual = VisualConfig::default();
    if let Some(size) = chart.size {
        visual.size = size;
    }
    if let Some(margin) = chart.margin {
        visual.margin = margin;
    }
    if let Some(c) = chart.background_color {
        visual.background_color = parse_color("background_color", &c)?;
    }
    if let Some(c) = chart.stroke_color {
        visual.stroke_color = parse_color("stroke_color", &c)?;
    }
    if let Some(c) = chart.text_color {
        visual.text_color = parse_color("text_color", &c)?;
    }
    if let Some([even, odd]) = chart.sign_tints {
        visual.sign_tints = [
            parse_color("sign_tints", &even)?,
            parse_color("sign_tints", &odd)?,
        ];
    }
    if let Some(font_family) = chart.font_family {
        visual.font_family = font_family;
    }
    if !(visual.size > 2.0 * visual.margin) {
        anyhow::bail!(
            "chart.size {} must be larger than twice chart.margin {}",
            visual.size,
            visual.margin
        );
    }
    Ok(visual)
}

/// Parse settings from TOML text.
pub fn parse_settings(text: &str) -> anyhow::Result<UraniaSettings> {
    let root: RootConfigToml = toml::from_str(text)?;
    let RootConfigToml {
        ephemeris_path,
        zodiac,
        default_house_system,
        prefer_dst,
        language,
        chart,
    } = root;

    let default_house_system = default_house_system
        .parse::<HouseSystem>()
        .map_err(|e| anyhow::anyhow!("default_house_system: {e}"))?;
    let language = language
        .parse::<Language>()
        .map_err(|e| anyhow::anyhow!("language: {e}"))?;

    Ok(UraniaSettings {
        ephemeris_path,
        zodiac,
        default_house_system,
        prefer_dst,
        language,
        visual: visual_config(chart)?,
    })
}

/// Load settings from an explicit file. The file must exist.
pub fn load_settings_from(path: &Path) -> anyhow::Result<UraniaSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_settings(&text)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {e}", path.display()))
}

/// Load `configs/urania.toml` from the first of [`CONFIG_PATHS`] that exists,
/// falling back to defaults when none does.
pub fn load_settings() -> anyhow::Result<UraniaSettings> {
    for p in &CONFIG_PATHS {
        let path = Path::new(p);
        if path.exists() {
            log::info!("Loading settings from {}", path.display());
            return load_settings_from(path);
        }
    }
    log::debug!("No urania.toml found in {:?}; using defaults", CONFIG_PATHS);
    Ok(UraniaSettings::default())
}
