use log::{debug, warn};

pub use crate::config::*;
use crate::roster::Roster;

/// A row of a firm table as read from a file, before any check.
///
/// A `None` cell means that the column is missing from the table. Missing names
/// default to the empty string, missing scores to [`Score::DEFAULT`].
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawRow {
    pub name: Option<String>,
    pub offering_nature: Option<String>,
    pub value_proposition: Option<String>,
    pub sme_focus: Option<String>,
}

impl RawRow {
    fn cell(&self, field: ScoreField) -> Option<&String> {
        match field {
            ScoreField::OfferingNature => self.offering_nature.as_ref(),
            ScoreField::ValueProposition => self.value_proposition.as_ref(),
            ScoreField::SmeFocus => self.sme_focus.as_ref(),
        }
    }
}

/// Statistics on a load.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct LoadSummary {
    pub loaded_rows: usize,
    /// The line numbers of the rows dropped because they had no firm name.
    pub skipped_rows: Vec<usize>,
}

/// A builder for turning the rows of a firm table into a roster.
///
/// ```
/// use firm_positioning::builder::{Builder, RawRow};
/// # use firm_positioning::LoadError;
///
/// let mut builder = Builder::new();
/// builder.add_row(2, &RawRow {
///     name: Some("Alpha".to_string()),
///     offering_nature: Some("9".to_string()),
///     value_proposition: Some("9.0".to_string()),
///     // Missing column: defaults to 5
///     sme_focus: None,
/// })?;
/// let (roster, summary) = builder.build()?;
/// assert_eq!(roster.firms()[0].sme_focus.value(), 5);
/// assert_eq!(summary.loaded_rows, 1);
///
/// # Ok::<(), LoadError>(())
/// ```
pub struct Builder {
    pub(crate) _drafts: Vec<FirmDraft>,
    pub(crate) _summary: LoadSummary,
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _drafts: Vec::new(),
            _summary: LoadSummary::default(),
        }
    }

    /// Adds one row of the table.
    ///
    /// `lineno` is only used for the messages. A row with an empty name is
    /// skipped. A row with a score that is not an integer in [1, 10] fails the
    /// whole load: the builder should then be dropped.
    pub fn add_row(&mut self, lineno: usize, row: &RawRow) -> Result<(), LoadError> {
        let name = row.name.clone().unwrap_or_default();
        if name.trim().is_empty() {
            warn!("add_row: line {}: no firm name, skipping row {:?}", lineno, row);
            self._summary.skipped_rows.push(lineno);
            return Ok(());
        }
        let mut scores: Vec<i64> = Vec::new();
        for field in ScoreField::ALL {
            let score = match row.cell(field) {
                Some(s) if !s.trim().is_empty() => Score::parse(field, s)
                    .map_err(|error| LoadError::InvalidRow { lineno, error })?,
                _ => Score::DEFAULT,
            };
            scores.push(score.value() as i64);
        }
        let draft = FirmDraft {
            name,
            offering_nature: scores[0],
            value_proposition: scores[1],
            sme_focus: scores[2],
        };
        debug!("add_row: line {}: {:?}", lineno, draft);
        self._drafts.push(draft);
        self._summary.loaded_rows += 1;
        Ok(())
    }

    pub fn build(self) -> Result<(Roster, LoadSummary), LoadError> {
        let roster = Roster::from_drafts(&self._drafts)?;
        Ok((roster, self._summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, on: &str, vp: &str, sme: &str) -> RawRow {
        RawRow {
            name: Some(name.to_string()),
            offering_nature: Some(on.to_string()),
            value_proposition: Some(vp.to_string()),
            sme_focus: Some(sme.to_string()),
        }
    }

    #[test]
    fn missing_columns_are_backfilled() {
        let mut b = Builder::new();
        b.add_row(
            2,
            &RawRow {
                name: Some("Alpha".to_string()),
                ..RawRow::default()
            },
        )
        .unwrap();
        b.add_row(3, &row("Beta", "", "7", " ")).unwrap();
        let (roster, summary) = b.build().unwrap();
        let scores: Vec<(u8, u8, u8)> = roster
            .firms()
            .iter()
            .map(|f| {
                (
                    f.offering_nature.value(),
                    f.value_proposition.value(),
                    f.sme_focus.value(),
                )
            })
            .collect();
        assert_eq!(scores, vec![(5, 5, 5), (5, 7, 5)]);
        assert_eq!(summary.loaded_rows, 2);
    }

    #[test]
    fn rows_without_name_are_skipped() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut b = Builder::new();
        b.add_row(2, &row("", "1", "2", "3")).unwrap();
        b.add_row(3, &RawRow::default()).unwrap();
        b.add_row(4, &row("Gamma", "1", "2", "3")).unwrap();
        let (roster, summary) = b.build().unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(summary.skipped_rows, vec![2, 3]);
    }

    #[test]
    fn bad_scores_fail_the_load() {
        let mut b = Builder::new();
        b.add_row(2, &row("Alpha", "9", "9", "9")).unwrap();
        assert_eq!(
            b.add_row(3, &row("Beta", "7.5", "2", "2")),
            Err(LoadError::InvalidRow {
                lineno: 3,
                error: ValidationError::NotAnInteger {
                    field: ScoreField::OfferingNature,
                    value: "7.5".to_string()
                }
            })
        );
        assert_eq!(
            b.add_row(4, &row("Beta", "2", "2", "11")),
            Err(LoadError::InvalidRow {
                lineno: 4,
                error: ValidationError::ScoreOutOfRange {
                    field: ScoreField::SmeFocus,
                    value: 11
                }
            })
        );
        assert_eq!(
            b.add_row(5, &row("Beta", "2", "high", "1")),
            Err(LoadError::InvalidRow {
                lineno: 5,
                error: ValidationError::NotAnInteger {
                    field: ScoreField::ValueProposition,
                    value: "high".to_string()
                }
            })
        );
    }
}
