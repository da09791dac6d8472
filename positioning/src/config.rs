// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The three scored axes of a firm.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ScoreField {
    /// 1 = purely functional / specialist, 10 = fully holistic / end-to-end.
    OfferingNature,
    /// 1 = cost-efficiency oriented, 10 = innovation-led.
    ValueProposition,
    /// 1 = minimal SME orientation, 10 = maximal.
    SmeFocus,
}

impl ScoreField {
    pub const ALL: [ScoreField; 3] = [
        ScoreField::OfferingNature,
        ScoreField::ValueProposition,
        ScoreField::SmeFocus,
    ];

    /// The name of the column holding this score in the firm tables.
    pub fn column_name(&self) -> &'static str {
        match self {
            ScoreField::OfferingNature => "Offering_Nature",
            ScoreField::ValueProposition => "Value_Proposition",
            ScoreField::SmeFocus => "SME_Focus",
        }
    }
}

impl Display for ScoreField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// An integer score, always within [1, 10].
///
/// Out-of-range values are rejected at construction, they are never clamped.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;
    /// The value used when a score column is missing from a loaded table.
    pub const DEFAULT: Score = Score(5);

    pub fn new(field: ScoreField, value: i64) -> Result<Score, ValidationError> {
        if value < Score::MIN as i64 || value > Score::MAX as i64 {
            return Err(ValidationError::ScoreOutOfRange { field, value });
        }
        Ok(Score(value as u8))
    }

    /// Parses an integer-like cell: `7`, ` 7 ` and `7.0` are accepted, `7.5` is not.
    pub fn parse(field: ScoreField, text: &str) -> Result<Score, ValidationError> {
        let trimmed = text.trim();
        let value: i64 = match trimmed.parse::<i64>() {
            Ok(x) => x,
            Err(_) => match trimmed.parse::<f64>() {
                Ok(f) if f.is_finite() && f.fract() == 0.0 => f as i64,
                _ => {
                    return Err(ValidationError::NotAnInteger {
                        field,
                        value: text.to_string(),
                    })
                }
            },
        };
        Score::new(field, value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<Score> for f64 {
    fn from(s: Score) -> f64 {
        s.0 as f64
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable synthetic identifier of a firm inside a roster.
///
/// Identifiers are issued by the roster when a firm is committed and are never
/// reused, so that edits keep targeting the same firm after renames.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct FirmId(pub u32);

impl Display for FirmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A firm that has been proposed but not committed yet.
///
/// Nothing is checked at this stage: the roster validates drafts when they are added.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FirmDraft {
    pub name: String,
    pub offering_nature: i64,
    pub value_proposition: i64,
    pub sme_focus: i64,
}

impl FirmDraft {
    pub fn new(name: &str, offering_nature: i64, value_proposition: i64, sme_focus: i64) -> Self {
        FirmDraft {
            name: name.to_string(),
            offering_nature,
            value_proposition,
            sme_focus,
        }
    }
}

/// A firm committed to a roster.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Firm {
    pub id: FirmId,
    pub name: String,
    pub offering_nature: Score,
    pub value_proposition: Score,
    pub sme_focus: Score,
}

impl Firm {
    pub fn score(&self, field: ScoreField) -> Score {
        match field {
            ScoreField::OfferingNature => self.offering_nature,
            ScoreField::ValueProposition => self.value_proposition,
            ScoreField::SmeFocus => self.sme_focus,
        }
    }
}

/// An in-place edit of a single field of a committed firm.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum FirmUpdate {
    Name(String),
    Score(ScoreField, i64),
}

// ******** Output data structures *********

/// Qualitative intensity of a score.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Bucket {
    Low,
    Mid,
    Moderate,
    High,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::High => "high",
            Bucket::Moderate => "moderate",
            Bucket::Mid => "mid",
            Bucket::Low => "low",
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A white-space score, held in tenths.
///
/// With integer inputs the formula only produces multiples of 0.1, so storing
/// tenths keeps the thresholds and the exported values exact.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct WhiteSpaceScore(pub(crate) i32);

impl WhiteSpaceScore {
    pub fn tenths(&self) -> i32 {
        self.0
    }

    pub fn value(&self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl Display for WhiteSpaceScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum OpportunityLabel {
    VeryHigh,
    High,
    Moderate,
    Low,
}

impl OpportunityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityLabel::VeryHigh => "Very high opportunity",
            OpportunityLabel::High => "High opportunity",
            OpportunityLabel::Moderate => "Moderate",
            OpportunityLabel::Low => "Low",
        }
    }
}

impl Display for OpportunityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fixed strategic suggestions.
///
/// The first two are the alternatives of the pricing rule, the last two the
/// alternatives of the packaging rule.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Differentiator {
    OutcomeLinkedPricing,
    SmeStrategyStudio,
    HolisticTransformationBundles,
    SectorPlaybooks,
}

impl Differentiator {
    pub fn text(&self) -> &'static str {
        match self {
            Differentiator::OutcomeLinkedPricing => {
                "Implementation-linked pricing for SMEs (tie fees to measurable outcomes)."
            }
            Differentiator::SmeStrategyStudio => {
                "AI-Enabled SME Strategy Studio (diagnostics dashboard + simulations)."
            }
            Differentiator::HolisticTransformationBundles => {
                "Holistic transformation packages for Tier-2/Tier-3 SMEs."
            }
            Differentiator::SectorPlaybooks => {
                "Sector playbooks with KPI blueprints for fast rollout."
            }
        }
    }
}

impl Display for Differentiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Everything a presentation layer needs to know about one firm.
/// All the derived fields are recomputed from the raw scores.
#[derive(PartialEq, Debug, Clone)]
pub struct FirmAnalysis {
    pub id: FirmId,
    pub name: String,
    pub offering_nature: Score,
    pub value_proposition: Score,
    pub sme_focus: Score,
    pub narrative: String,
    pub white_space_score: WhiteSpaceScore,
    pub opportunity_label: OpportunityLabel,
}

/// One marker of the positioning map.
#[derive(PartialEq, Debug, Clone)]
pub struct MapPoint {
    pub id: FirmId,
    pub name: String,
    /// Nature of offering (functional -> holistic)
    pub x: u8,
    /// Value proposition (cost -> innovation)
    pub y: u8,
    /// SME focus, drives the marker size and colour.
    pub size: u8,
    pub hover: String,
}

// ********* Errors **********

/// A firm or a field that cannot be committed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ValidationError {
    EmptyName,
    ScoreOutOfRange { field: ScoreField, value: i64 },
    NotAnInteger { field: ScoreField, value: String },
}

impl Error for ValidationError {}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "the firm name may not be empty"),
            ValidationError::ScoreOutOfRange { field, value } => write!(
                f,
                "{} must be between {} and {}, but it was {}",
                field,
                Score::MIN,
                Score::MAX,
                value
            ),
            ValidationError::NotAnInteger { field, value } => {
                write!(f, "{} must be an integer, but it was {:?}", field, value)
            }
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RosterError {
    UnknownFirm(FirmId),
    Invalid(ValidationError),
}

impl Error for RosterError {}

impl Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::UnknownFirm(id) => write!(f, "no firm with id {} in the roster", id),
            RosterError::Invalid(e) => write!(f, "invalid edit: {}", e),
        }
    }
}

impl From<ValidationError> for RosterError {
    fn from(e: ValidationError) -> Self {
        RosterError::Invalid(e)
    }
}

/// A source that cannot be turned into a roster. Nothing is built in that case.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum LoadError {
    /// `lineno` follows the spreadsheet convention: the header is line 1.
    InvalidRow {
        lineno: usize,
        error: ValidationError,
    },
}

impl Error for LoadError {}

impl Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::InvalidRow { lineno, error } => write!(f, "line {}: {}", lineno, error),
        }
    }
}

/// Errors that prevent an aggregate analysis from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AnalysisError {
    EmptyRoster,
}

impl Error for AnalysisError {}

impl Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::EmptyRoster => {
                write!(f, "the roster is empty, no differentiator can be suggested")
            }
        }
    }
}
