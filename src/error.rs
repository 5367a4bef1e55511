use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BadgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to read roster: {0}")]
    Roster(#[from] PolarsError),
    #[error("Roster is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Failed to load font {path:?}: {reason}")]
    FontLoad { path: PathBuf, reason: String },
    #[error("Text '{0}' does not fit its box even at size 1")]
    NoFit(String),
    #[error("Invalid config file: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Invalid rectangle: {0}")]
    InvalidRect(String),
}
