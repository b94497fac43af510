/*!
 * Cue sheet reading.
 *
 * Cue sheets are CSV exports of subtitle tables with a `Time` column,
 * a `Subtitle` column and an optional `Machine Translation` column.
 * Reading normalizes every row into a SubtitleCue; timing synthesis
 * and rendering never see the tabular form.
 */

use anyhow::{Context, Result};
use std::path::Path;

use crate::errors::AppError;
use crate::subtitles::timing::{self, SubtitleCue};

const TIME_COLUMN: &str = "Time";
const SUBTITLE_COLUMN: &str = "Subtitle";
const TRANSLATION_COLUMN: &str = "Machine Translation";

/// A parsed cue sheet. `has_translations` records whether the optional
/// translation column was present, which decides whether a secondary
/// SRT file gets written.
#[derive(Debug, Clone)]
pub struct CueSheet {
    pub cues: Vec<SubtitleCue>,
    pub has_translations: bool,
}

/// Read one cue sheet file.
///
/// Missing required columns or a malformed timestamp fail the whole
/// file; blank timestamps are normal and leave the cue untimed.
pub fn read_cue_sheet(path: &Path) -> Result<CueSheet> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open cue sheet: {}", path.display()))?;

    let headers = reader
        .headers()
        .map_err(|err| {
            AppError::format(format!("Not a cue sheet: \"{}\" ({})", path.display(), err))
        })?
        .clone();
    let time_index = require_column(&headers, TIME_COLUMN, path)?;
    let subtitle_index = require_column(&headers, SUBTITLE_COLUMN, path)?;
    let translation_index = headers.iter().position(|header| header == TRANSLATION_COLUMN);

    let mut cues = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|err| {
            AppError::format(format!(
                "Malformed row {} in \"{}\": {}",
                index + 1,
                path.display(),
                err
            ))
        })?;

        let start_ms = timing::parse_time(record.get(time_index).unwrap_or("")).map_err(|err| {
            AppError::format(format!("{} (row {} in \"{}\")", err, index + 1, path.display()))
        })?;
        let primary_text = record.get(subtitle_index).unwrap_or("").to_string();
        let secondary_text =
            translation_index.map(|column| record.get(column).unwrap_or("").to_string());

        cues.push(SubtitleCue {
            start_ms,
            primary_text,
            secondary_text,
        });
    }

    Ok(CueSheet {
        cues,
        has_translations: translation_index.is_some(),
    })
}

fn require_column(headers: &csv::StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| {
            AppError::format(format!(
                "Cue sheet \"{}\" is missing the \"{}\" column",
                path.display(),
                column
            ))
            .into()
        })
}
