use log::{debug, info, warn};

use firm_positioning::builder::{Builder, LoadSummary, RawRow};
use firm_positioning::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use text_diff::print_diff;

use crate::args::Args;
use crate::session::config_reader::*;

pub mod config_reader;
pub mod export;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;

/// The firm table read when nothing else is given.
pub const DEFAULT_INPUT: &str = "firms.csv";

/// The notes exported when the session does not provide any.
pub const DEFAULT_NOTES: &str = "Core Prompt: List Indian boutique consulting firms serving SMEs and score them (1–10) on Offering_Nature, Value_Proposition, SME_Focus.

Follow-ups:
1) Suggest a 2×2 competitor map and quadrant meanings.
2) Identify white spaces and two differentiators for a new entrant.";

#[derive(Debug, Snafu)]
pub enum MapError {
    #[snafu(display("Error opening session file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing session file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error writing the CSV export"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Error flushing the CSV export"))]
    Flush { source: std::io::Error },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file has no worksheet or no header row"))]
    EmptyExcel {},
    #[snafu(display("No worksheet named {name:?} in the Excel file"))]
    MissingWorksheet { name: String },
    #[snafu(display("Unexpected cell at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Unknown input type {provider:?} (expected csv or xlsx)"))]
    UnknownProvider { provider: String },
    #[snafu(display("The firm table cannot be loaded"))]
    InvalidTable { source: LoadError },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading reference file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type MapResult<T> = Result<T, MapError>;

/// What happened to the edits of a session.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct EditSummary {
    pub applied: usize,
    pub rejected: usize,
}

fn score_from_js(
    field: ScoreField,
    value: &Option<serde_json::Value>,
) -> Result<i64, ValidationError> {
    match value {
        None => Ok(Score::DEFAULT.value() as i64),
        Some(js) => {
            let text = read_js_score(js).ok_or_else(|| ValidationError::NotAnInteger {
                field,
                value: js.to_string(),
            })?;
            Score::parse(field, &text).map(|s| s.value() as i64)
        }
    }
}

fn apply_edit(roster: &mut Roster, edit: &EditOp) -> Result<(), String> {
    match edit {
        EditOp::Add {
            firm,
            offering_nature,
            value_proposition,
            sme_focus,
        } => {
            let draft = FirmDraft {
                name: firm.clone(),
                offering_nature: score_from_js(ScoreField::OfferingNature, offering_nature)
                    .map_err(|e| e.to_string())?,
                value_proposition: score_from_js(ScoreField::ValueProposition, value_proposition)
                    .map_err(|e| e.to_string())?,
                sme_focus: score_from_js(ScoreField::SmeFocus, sme_focus)
                    .map_err(|e| e.to_string())?,
            };
            let id = roster.add(draft).map_err(|e| e.to_string())?;
            info!("Added firm {:?} as {}", firm, id);
        }
        EditOp::Update { id, field, value } => {
            let update = match read_edit_field(field) {
                Some(EditField::Name) => match value {
                    serde_json::Value::String(s) => FirmUpdate::Name(s.clone()),
                    _ => return Err(format!("a firm name must be a string, not {}", value)),
                },
                Some(EditField::Score(sf)) => {
                    let v = score_from_js(sf, &Some(value.clone())).map_err(|e| e.to_string())?;
                    FirmUpdate::Score(sf, v)
                }
                None => return Err(format!("unknown field {:?}", field)),
            };
            roster
                .update(FirmId(*id), update)
                .map_err(|e| e.to_string())?;
        }
        EditOp::Delete { id } => {
            // Deleting a firm that is not there is not an error.
            if roster.delete(FirmId(*id)).is_none() {
                debug!("apply_edit: no firm {} to delete", FirmId(*id));
            }
        }
        EditOp::DeleteByName { firm } => {
            let removed = roster.delete_by_name(firm);
            info!("Removed {} firm(s) named {:?}", removed, firm);
        }
        EditOp::Reset => roster.reset(),
    }
    Ok(())
}

/// Replays the edits of a session, in order.
///
/// An edit that cannot be applied is reported and skipped, it leaves the roster
/// unchanged and the following edits are still applied.
pub fn apply_edits(roster: &mut Roster, edits: &[EditOp]) -> EditSummary {
    let mut summary = EditSummary::default();
    for (idx, edit) in edits.iter().enumerate() {
        match apply_edit(roster, edit) {
            Ok(()) => summary.applied += 1,
            Err(msg) => {
                warn!("Edit #{} {:?} rejected: {}", idx + 1, edit, msg);
                summary.rejected += 1;
            }
        }
    }
    info!(
        "Edits: {} applied, {} rejected, {} firms in the roster",
        summary.applied,
        summary.rejected,
        roster.len()
    );
    summary
}

/// Builds the roster out of the rows of a table. Nothing is built if one row is invalid.
pub fn build_roster(rows: &[(usize, RawRow)]) -> MapResult<(Roster, LoadSummary)> {
    let mut builder = Builder::new();
    for (lineno, row) in rows.iter() {
        builder.add_row(*lineno, row).context(InvalidTableSnafu {})?;
    }
    builder.build().context(InvalidTableSnafu {})
}

fn read_firm_table(
    path: &str,
    provider: &str,
    worksheet: Option<&str>,
) -> MapResult<Vec<(usize, RawRow)>> {
    info!("Attempting to read firm table {:?} ({})", path, provider);
    match provider {
        "csv" => io_csv::read_csv_firms(path),
        "xlsx" => io_excel::read_excel_firms(path, worksheet),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

// Relative paths of the session file are resolved against its directory.
fn resolve(root: &Path, p: &str) -> String {
    root.join(p).display().to_string()
}

pub fn run_session(args: &Args) -> MapResult<()> {
    let (config, root) = match &args.config {
        Some(config_path) => {
            let config = read_session_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root)
        }
        None => (SessionConfig::default(), Default::default()),
    };
    info!("config: {:?}", config);

    // The command line takes precedence over the session file.
    let input_path = match (&args.input, &config.source) {
        (Some(p), _) => p.clone(),
        (None, Some(src)) => resolve(&root, &src.file_path),
        (None, None) => resolve(&root, DEFAULT_INPUT),
    };
    let provider: String = args
        .input_type
        .clone()
        .or_else(|| config.source.as_ref().and_then(|s| s.provider.clone()))
        .unwrap_or_else(|| io_common::guess_provider(&input_path).to_string());
    let worksheet: Option<String> = args
        .worksheet
        .clone()
        .or_else(|| config.source.as_ref().and_then(|s| s.worksheet_name.clone()));

    let rows = read_firm_table(&input_path, &provider, worksheet.as_deref())?;
    let (mut roster, load) = build_roster(&rows)?;
    if !load.skipped_rows.is_empty() {
        warn!(
            "{} row(s) without a firm name were skipped: lines {:?}",
            load.skipped_rows.len(),
            load.skipped_rows
        );
    }

    let edits = apply_edits(&mut roster, &config.edits);

    let source_name = io_common::simplify_file_name(&input_path);
    let report_js = export::build_report_js(&source_name, &roster, &load, &edits);
    let pretty_report = match serde_json::to_string_pretty(&report_js) {
        Ok(s) => s,
        Err(e) => whatever!("Cannot format the report: {}", e),
    };
    let report_path = args.out.clone().or_else(|| {
        config
            .output_settings
            .report_path
            .as_ref()
            .map(|p| resolve(&root, p))
    });
    export::write_output(report_path.as_deref().unwrap_or("stdout"), &pretty_report)?;

    let annexure = export::annexure_to_string(&roster)?;
    let export_path = args.export.clone().or_else(|| {
        config
            .output_settings
            .export_path
            .as_ref()
            .map(|p| resolve(&root, p))
    });
    if let Some(p) = export_path {
        export::write_output(&p, &annexure)?;
    }

    let notes_path = args.notes_out.clone().or_else(|| {
        config
            .output_settings
            .notes_path
            .as_ref()
            .map(|p| resolve(&root, p))
    });
    if let Some(p) = notes_path {
        let notes = config.notes.as_deref().unwrap_or(DEFAULT_NOTES);
        export::write_output(&p, notes)?;
    }

    // The reference export, if provided for comparison
    if let Some(reference_p) = &args.reference {
        let reference =
            fs::read_to_string(reference_p).context(OpeningReferenceSnafu { path: reference_p })?;
        if reference != annexure {
            warn!("Found differences with the reference export");
            print_diff(reference.as_str(), annexure.as_str(), "\n");
            whatever!("Difference detected between the CSV export and the reference export")
        }
        info!("The CSV export matches {:?}", reference_p);
    }

    Ok(())
}
