use crate::error::BadgeError;
use image::Rgba;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUT_DIR: &str = "./outputs";
pub const DEFAULT_H_SCALE: f32 = 67.340_067;
pub const DEFAULT_V_SCALE: f32 = 67.333_336;
pub const CONFIG_FILE_NAME: &str = "badger.toml";

const DEFAULT_MAX_FONT_SIZE: u32 = 68;
const DEFAULT_MIN_FONT_SIZE: u32 = 50;
const DEFAULT_LINE_SPACING: u32 = 15;
const DEFAULT_AFFILIATION_FONT_SIZE: u32 = 50;
const DEFAULT_AFFILIATION_HEIGHT: u32 = 50;
const DEFAULT_TEXT_COLOR: [u8; 4] = [0, 0, 0, 255];

/// Optional overrides read from `badger.toml`.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub out: Option<PathBuf>,
    pub h_scale: Option<f32>,
    pub v_scale: Option<f32>,
    pub max_font_size: Option<u32>,
    pub min_font_size: Option<u32>,
    pub line_spacing: Option<u32>,
    pub affiliation_font_size: Option<u32>,
    pub affiliation_height: Option<u32>,
    pub text_color: Option<[u8; 4]>,
}

/// A missing file yields the defaults; a malformed one is an error.
pub fn load_app_config(path: &Path) -> Result<AppConfig, BadgeError> {
    let config_content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(e.into()),
    };
    let config: AppConfig = toml::from_str(&config_content)?;
    Ok(config)
}

/// Everything a run needs, after CLI, config file and defaults are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub roster: PathBuf,
    pub template: PathBuf,
    pub font: PathBuf,
    pub out: PathBuf,
    pub h_scale: f32,
    pub v_scale: f32,
    pub max_font_size: u32,
    pub min_font_size: u32,
    pub line_spacing: u32,
    pub affiliation_font_size: u32,
    pub affiliation_height: u32,
    pub text_color: Rgba<u8>,
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Default)]
pub struct Overrides {
    pub out: Option<PathBuf>,
    pub h_scale: Option<f32>,
    pub v_scale: Option<f32>,
}

impl Settings {
    #[cfg(test)]
    pub fn new(roster: PathBuf, template: PathBuf, font: PathBuf) -> Settings {
        Settings::resolve(roster, template, font, Overrides::default(), AppConfig::default())
    }

    pub fn resolve(
        roster: PathBuf,
        template: PathBuf,
        font: PathBuf,
        cli: Overrides,
        config: AppConfig,
    ) -> Settings {
        Settings {
            roster,
            template,
            font,
            out: cli
                .out
                .or(config.out)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            h_scale: cli.h_scale.or(config.h_scale).unwrap_or(DEFAULT_H_SCALE),
            v_scale: cli.v_scale.or(config.v_scale).unwrap_or(DEFAULT_V_SCALE),
            max_font_size: config.max_font_size.unwrap_or(DEFAULT_MAX_FONT_SIZE),
            min_font_size: config.min_font_size.unwrap_or(DEFAULT_MIN_FONT_SIZE),
            line_spacing: config.line_spacing.unwrap_or(DEFAULT_LINE_SPACING),
            affiliation_font_size: config
                .affiliation_font_size
                .unwrap_or(DEFAULT_AFFILIATION_FONT_SIZE),
            affiliation_height: config.affiliation_height.unwrap_or(DEFAULT_AFFILIATION_HEIGHT),
            text_color: Rgba(config.text_color.unwrap_or(DEFAULT_TEXT_COLOR)),
        }
    }
}
