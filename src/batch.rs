use crate::config::Settings;
use crate::error::BadgeError;
use crate::face::FontCache;
use crate::fitter::{fit, fit_line};
use crate::renderer::{Renderer, place_affiliation};
use crate::roster::{Record, groups, read_roster};
use crate::sheet::{SheetSlot, sheet_slots};
use image::RgbaImage;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct RunReport {
    pub sheets: Vec<PathBuf>,
    /// Rows rendered below the minimum size or spilling out of their box.
    pub flagged: Vec<usize>,
    /// Rows left off their sheet, with the reason.
    pub failed: Vec<(usize, String)>,
    pub clear_failures: Vec<(PathBuf, String)>,
}

/// Creates `dir` if needed and deletes everything inside it. Entries that
/// cannot be removed are logged and returned; they do not stop the pass.
pub fn clear_output_dir(dir: &Path) -> Result<Vec<(PathBuf, String)>, BadgeError> {
    clear_output_dir_with(dir, remove_entry)
}

fn remove_entry(path: &Path) -> std::io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) => Err(e),
    }
}

fn clear_output_dir_with<F>(dir: &Path, remove: F) -> Result<Vec<(PathBuf, String)>, BadgeError>
where
    F: Fn(&Path) -> std::io::Result<()>,
{
    fs::create_dir_all(dir)?;

    let mut failures = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!("Failed to read entry in {:?}: {}", dir, e);
                failures.push((dir.to_path_buf(), e.to_string()));
                continue;
            }
        };
        if let Err(e) = remove(&path) {
            warn!("Failed to delete {:?}: {}", path, e);
            failures.push((path, e.to_string()));
        }
    }
    Ok(failures)
}

pub fn sheet_file_name(first_row: usize, last_row: usize) -> String {
    format!("generated-{}-{}.png", first_row, last_row)
}

/// Fits and draws one record into its card slot. Both layouts are computed
/// before anything is drawn. Returns whether the record needs a second look.
pub fn place_record(
    renderer: &mut Renderer,
    canvas: &mut RgbaImage,
    slot: &SheetSlot,
    record: &Record,
    settings: &Settings,
) -> Result<bool, BadgeError> {
    let face = renderer.face(&settings.font)?;
    let spacing = settings.line_spacing;

    let name = fit(
        face.as_ref(),
        &record.name,
        slot.name,
        settings.max_font_size,
        settings.min_font_size,
        spacing,
    );
    let affiliation_rect = place_affiliation(
        slot.name,
        slot.affiliation,
        name.block_height(spacing),
        spacing,
        settings.affiliation_height,
    );
    let (affiliation_size, affiliation_fits) = match fit_line(
        face.as_ref(),
        &record.affiliation,
        affiliation_rect,
        settings.affiliation_font_size,
    ) {
        Ok(size) => (size, true),
        Err(e) => {
            warn!("Row {}: {}", record.row, e);
            (1, false)
        }
    };
    debug!(
        "Row {}: name {:?} at {}px, affiliation at {}px",
        record.row, name.lines, name.font_size, affiliation_size
    );

    renderer.render_lines(canvas, slot.name, &settings.font, &name, spacing)?;
    renderer.render_text(
        canvas,
        affiliation_rect,
        &settings.font,
        affiliation_size,
        &record.affiliation,
    )?;

    let min_size = settings.min_font_size.min(settings.max_font_size);
    Ok(name.overflow || name.font_size < min_size || !affiliation_fits)
}

pub fn run(settings: &Settings) -> Result<RunReport, BadgeError> {
    let mut renderer = Renderer::new(FontCache::new(), settings.text_color);
    render_sheets(settings, &mut renderer)
}

/// Validates every shared input, then clears the output folder and writes one
/// sheet per six records. A short last group leaves its remaining cards blank.
pub fn render_sheets(settings: &Settings, renderer: &mut Renderer) -> Result<RunReport, BadgeError> {
    let slots = sheet_slots(settings.h_scale, settings.v_scale).ok_or_else(|| {
        BadgeError::InvalidRect(format!(
            "scales must be positive, got {} x {}",
            settings.h_scale, settings.v_scale
        ))
    })?;
    let records = read_roster(&settings.roster)?;
    let template = image::open(&settings.template)?.to_rgba8();
    renderer.face(&settings.font)?;

    let clear_failures = clear_output_dir(&settings.out)?;
    let mut report = RunReport {
        clear_failures,
        ..RunReport::default()
    };

    for group in groups(&records) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let mut canvas = template.clone();
        for (slot, record) in slots.iter().zip(group) {
            match place_record(renderer, &mut canvas, slot, record, settings) {
                Ok(true) => {
                    warn!("Row {} ({}) did not fit comfortably", record.row, record.name);
                    report.flagged.push(record.row);
                }
                Ok(false) => {}
                Err(e) => {
                    warn!("Skipping row {} ({}): {}", record.row, record.name, e);
                    report.failed.push((record.row, e.to_string()));
                }
            }
        }

        let path = settings.out.join(sheet_file_name(first.row, last.row));
        canvas.save(&path)?;
        info!("Saved {:?}", path);
        report.sheets.push(path);
    }

    Ok(report)
}
