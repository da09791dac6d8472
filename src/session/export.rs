// Primitives for writing the outputs of a session.

use std::io;

use serde_json::json;
use serde_json::Value as JSValue;

use crate::session::{io_common::FIRM_COLUMN, *};

pub const EXPLANATION_COLUMN: &str = "AI_Explanation";
pub const SCORE_COLUMN: &str = "White_Space_Score";
pub const INTERPRETATION_COLUMN: &str = "WS_Interpretation";

/// Writes the roster in CSV with the derived columns appended after the raw ones.
pub fn write_annexure<W: io::Write>(output: W, roster: &Roster) -> MapResult<()> {
    let mut wtr = csv::Writer::from_writer(output);
    wtr.write_record([
        FIRM_COLUMN,
        ScoreField::OfferingNature.column_name(),
        ScoreField::ValueProposition.column_name(),
        ScoreField::SmeFocus.column_name(),
        EXPLANATION_COLUMN,
        SCORE_COLUMN,
        INTERPRETATION_COLUMN,
    ])
    .context(CsvWriteSnafu {})?;
    for a in analyze_roster(roster) {
        wtr.write_record([
            a.name,
            a.offering_nature.to_string(),
            a.value_proposition.to_string(),
            a.sme_focus.to_string(),
            a.narrative,
            a.white_space_score.to_string(),
            a.opportunity_label.to_string(),
        ])
        .context(CsvWriteSnafu {})?;
    }
    wtr.flush().context(FlushSnafu {})?;
    Ok(())
}

pub fn annexure_to_string(roster: &Roster) -> MapResult<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_annexure(&mut buf, roster)?;
    match String::from_utf8(buf) {
        Ok(s) => Ok(s),
        Err(e) => whatever!("the CSV export is not valid UTF-8: {}", e),
    }
}

fn analysis_to_json(a: &FirmAnalysis) -> JSValue {
    json!({
        "id": a.id.0,
        "firm": a.name,
        "offeringNature": a.offering_nature.value(),
        "valueProposition": a.value_proposition.value(),
        "smeFocus": a.sme_focus.value(),
        "explanation": a.narrative,
        "whiteSpaceScore": a.white_space_score.value(),
        "interpretation": a.opportunity_label.as_str(),
    })
}

/// Assembles the JSON report: the firms, the white-space ranking, the positioning
/// map and the differentiators.
pub fn build_report_js(
    source_name: &str,
    roster: &Roster,
    load: &LoadSummary,
    edits: &EditSummary,
) -> JSValue {
    let firms: Vec<JSValue> = analyze_roster(roster).iter().map(analysis_to_json).collect();

    let ranking: Vec<JSValue> = white_space_ranking(roster)
        .iter()
        .enumerate()
        .map(|(idx, a)| {
            json!({
                "rank": idx + 1,
                "id": a.id.0,
                "firm": a.name,
                "whiteSpaceScore": a.white_space_score.value(),
                "interpretation": a.opportunity_label.as_str(),
            })
        })
        .collect();

    let map: Vec<JSValue> = positioning_map(roster)
        .iter()
        .map(|p| {
            json!({
                "id": p.id.0,
                "firm": p.name,
                "x": p.x,
                "y": p.y,
                "size": p.size,
                "hover": p.hover,
            })
        })
        .collect();

    let differentiators: Vec<&str> = match recommend(roster.firms()) {
        Ok(ds) => ds.iter().map(|d| d.text()).collect(),
        Err(e) => {
            warn!("No differentiator: {}", e);
            Vec::new()
        }
    };

    json!({
        "source": source_name,
        "firms": firms,
        "ranking": ranking,
        "map": map,
        "differentiators": differentiators,
        "skippedRows": load.skipped_rows,
        "appliedEdits": edits.applied,
        "rejectedEdits": edits.rejected,
    })
}

/// Writes some text to a file, or to the standard output for `stdout`.
pub fn write_output(path: &str, contents: &str) -> MapResult<()> {
    if path == "stdout" {
        println!("{}", contents);
        return Ok(());
    }
    info!("Writing {} bytes to {:?}", contents.len(), path);
    fs::write(path, contents).context(WritingOutputSnafu { path })
}
