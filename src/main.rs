mod batch;
mod config;
mod error;
mod face;
mod fitter;
mod renderer;
mod roster;
mod sheet;

use clap::Parser;
use config::{CONFIG_FILE_NAME, Overrides, Settings, load_app_config};
use error::BadgeError;
use log::{error, info, warn};
use std::path::PathBuf;

// --- Command-Line Arguments ---
#[derive(Parser, Debug)]
#[clap(author, version, about = "PLλTO Badger: prints six name badges per template sheet from a CSV roster.")]
struct Args {
    #[clap(help = "CSV with 'Name' and 'Affiliation' columns; all other columns are ignored.")]
    csv: PathBuf,
    #[clap(help = "Template image holding six badge cards on one A4 sheet.")]
    template: PathBuf,
    #[clap(help = "TTF/OTF font used for names and affiliations.")]
    font: PathBuf,
    #[clap(long, help = "Output folder, emptied before the run [default: ./outputs]")]
    out: Option<PathBuf>,
    #[clap(long, help = "Pixels per horizontal grid cell [default: 67.34006734]")]
    h_scale: Option<f32>,
    #[clap(long, help = "Pixels per vertical grid cell [default: 67.333333333]")]
    v_scale: Option<f32>,
    #[clap(short, long, default_value = CONFIG_FILE_NAME, help = "TOML file with layout overrides.")]
    config: PathBuf,
}

fn main() -> Result<(), BadgeError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let app_config = load_app_config(&args.config)?;
    let settings = Settings::resolve(
        args.csv,
        args.template,
        args.font,
        Overrides {
            out: args.out,
            h_scale: args.h_scale,
            v_scale: args.v_scale,
        },
        app_config,
    );

    let report = match batch::run(&settings) {
        Ok(report) => report,
        Err(e) => {
            error!("Run aborted: {}", e);
            return Err(e);
        }
    };

    info!(
        "Wrote {} sheet(s) to {:?}",
        report.sheets.len(),
        settings.out
    );
    if !report.flagged.is_empty() {
        warn!("Rows to check by hand: {:?}", report.flagged);
    }
    for (row, reason) in &report.failed {
        warn!("Row {} was not printed: {}", row, reason);
    }
    for (path, reason) in &report.clear_failures {
        warn!("Stale entry {:?} was not removed: {}", path, reason);
    }
    Ok(())
}
