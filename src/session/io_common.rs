use std::path::Path;

use crate::session::*;

/// The position of the firm columns in the header of a table.
/// A column that is not in the header is `None`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FirmColumns {
    pub name: Option<usize>,
    pub offering_nature: Option<usize>,
    pub value_proposition: Option<usize>,
    pub sme_focus: Option<usize>,
}

pub const FIRM_COLUMN: &str = "Firm";

impl FirmColumns {
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> FirmColumns {
        let find = |name: &str| header.iter().position(|h| h.as_ref().trim() == name);
        let cols = FirmColumns {
            name: find(FIRM_COLUMN),
            offering_nature: find(ScoreField::OfferingNature.column_name()),
            value_proposition: find(ScoreField::ValueProposition.column_name()),
            sme_focus: find(ScoreField::SmeFocus.column_name()),
        };
        if cols.name.is_none() {
            warn!("Column {} is missing, all the firm names are empty", FIRM_COLUMN);
        }
        for (field, idx) in [
            (ScoreField::OfferingNature, cols.offering_nature),
            (ScoreField::ValueProposition, cols.value_proposition),
            (ScoreField::SmeFocus, cols.sme_focus),
        ] {
            if idx.is_none() {
                warn!(
                    "Column {} is missing, using the default score {}",
                    field,
                    Score::DEFAULT
                );
            }
        }
        debug!("from_header: {:?} -> {:?}", header.len(), cols);
        cols
    }

    /// Picks the firm cells of a row. A cell beyond the end of a short row counts as empty.
    pub fn raw_row(&self, cells: &[String]) -> RawRow {
        let pick = |idx: Option<usize>| idx.map(|i| cells.get(i).cloned().unwrap_or_default());
        RawRow {
            name: pick(self.name),
            offering_nature: pick(self.offering_nature),
            value_proposition: pick(self.value_proposition),
            sme_focus: pick(self.sme_focus),
        }
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The provider to use when none is given: Excel files by extension, CSV otherwise.
pub fn guess_provider(path: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("xlsx") | Some("xlsm") => "xlsx",
        _ => "csv",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_in_any_order() {
        let cols = FirmColumns::from_header(&["SME_Focus", "Notes", " Firm ", "Offering_Nature"]);
        assert_eq!(cols.name, Some(2));
        assert_eq!(cols.offering_nature, Some(3));
        assert_eq!(cols.value_proposition, None);
        assert_eq!(cols.sme_focus, Some(0));

        let row = cols.raw_row(&["8".to_string(), "x".to_string(), "Alpha".to_string()]);
        assert_eq!(
            row,
            RawRow {
                name: Some("Alpha".to_string()),
                offering_nature: Some("".to_string()),
                value_proposition: None,
                sme_focus: Some("8".to_string()),
            }
        );
    }

    #[test]
    fn providers() {
        assert_eq!(guess_provider("data/firms.XLSX"), "xlsx");
        assert_eq!(guess_provider("firms.csv"), "csv");
        assert_eq!(guess_provider("firms"), "csv");
        assert_eq!(simplify_file_name("/tmp/data/firms.csv"), "firms.csv");
    }
}
