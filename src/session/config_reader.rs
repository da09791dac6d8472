use crate::session::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    /// `csv` or `xlsx`. Guessed from the extension when missing.
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "reportPath")]
    pub report_path: Option<String>,
    #[serde(rename = "exportPath")]
    pub export_path: Option<String>,
    #[serde(rename = "notesPath")]
    pub notes_path: Option<String>,
}

/// One edit of the roster, as written in the session file.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum EditOp {
    #[serde(rename = "add")]
    Add {
        firm: String,
        #[serde(rename = "offeringNature")]
        offering_nature: Option<JSValue>,
        #[serde(rename = "valueProposition")]
        value_proposition: Option<JSValue>,
        #[serde(rename = "smeFocus")]
        sme_focus: Option<JSValue>,
    },
    #[serde(rename = "update")]
    Update {
        id: u32,
        field: String,
        value: JSValue,
    },
    #[serde(rename = "delete")]
    Delete { id: u32 },
    #[serde(rename = "deleteByName")]
    DeleteByName { firm: String },
    #[serde(rename = "reset")]
    Reset,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub source: Option<FileSource>,
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(default)]
    pub edits: Vec<EditOp>,
    pub notes: Option<String>,
}

pub fn read_session_config(path: &str) -> MapResult<SessionConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let config: SessionConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(config)
}

/// The text of a score given in JSON, either as a number or as a string.
pub fn read_js_score(x: &JSValue) -> Option<String> {
    match x {
        JSValue::Number(n) => Some(n.to_string()),
        JSValue::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum EditField {
    Name,
    Score(ScoreField),
}

/// The field targeted by an update. Both the JSON names and the column names are accepted.
pub fn read_edit_field(name: &str) -> Option<EditField> {
    match name {
        "firm" | "name" | "Firm" => Some(EditField::Name),
        "offeringNature" | "Offering_Nature" => Some(EditField::Score(ScoreField::OfferingNature)),
        "valueProposition" | "Value_Proposition" => {
            Some(EditField::Score(ScoreField::ValueProposition))
        }
        "smeFocus" | "SME_Focus" => Some(EditField::Score(ScoreField::SmeFocus)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_session() {
        let js = json!({
            "source": {"provider": "csv", "filePath": "firms.csv"},
            "outputSettings": {"exportPath": "firms_clean.csv"},
            "edits": [
                {"op": "add", "firm": "Gamma", "offeringNature": 6, "smeFocus": "8"},
                {"op": "update", "id": 1, "field": "smeFocus", "value": 9},
                {"op": "delete", "id": 2},
                {"op": "deleteByName", "firm": "Beta"},
                {"op": "reset"}
            ],
            "notes": "hello"
        });
        let config: SessionConfig = serde_json::from_value(js).unwrap();
        assert_eq!(
            config.source.unwrap().file_path,
            "firms.csv".to_string()
        );
        assert_eq!(
            config.output_settings.export_path,
            Some("firms_clean.csv".to_string())
        );
        assert_eq!(config.output_settings.notes_path, None);
        assert_eq!(config.edits.len(), 5);
        assert_eq!(
            config.edits[0],
            EditOp::Add {
                firm: "Gamma".to_string(),
                offering_nature: Some(json!(6)),
                value_proposition: None,
                sme_focus: Some(json!("8")),
            }
        );
        assert_eq!(config.edits[4], EditOp::Reset);
    }

    #[test]
    fn empty_session() {
        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn scores_and_fields() {
        assert_eq!(read_js_score(&json!(7)), Some("7".to_string()));
        assert_eq!(read_js_score(&json!("7")), Some("7".to_string()));
        assert_eq!(read_js_score(&json!(null)), None);
        assert_eq!(read_edit_field("Firm"), Some(EditField::Name));
        assert_eq!(
            read_edit_field("SME_Focus"),
            Some(EditField::Score(ScoreField::SmeFocus))
        );
        assert_eq!(read_edit_field("size"), None);
    }
}
