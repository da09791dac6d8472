use log::{debug, info};

use crate::config::*;

/// The editable, ordered collection of firms of a session.
///
/// The roster is a plain value owned by the caller. It remembers the firms it
/// was created with so that all the edits can be discarded with [`Roster::reset`].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Roster {
    firms: Vec<Firm>,
    source: Vec<Firm>,
    next_id: u32,
}

fn validate(draft: &FirmDraft) -> Result<(Score, Score, Score), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok((
        Score::new(ScoreField::OfferingNature, draft.offering_nature)?,
        Score::new(ScoreField::ValueProposition, draft.value_proposition)?,
        Score::new(ScoreField::SmeFocus, draft.sme_focus)?,
    ))
}

impl Default for Roster {
    fn default() -> Self {
        Roster::new()
    }
}

impl Roster {
    pub fn new() -> Roster {
        Roster {
            firms: Vec::new(),
            source: Vec::new(),
            next_id: 1,
        }
    }

    /// Builds a roster out of a source of firms.
    ///
    /// Either all the drafts are valid and committed, or nothing is built.
    /// The line numbers in the errors count the header as line 1.
    pub fn from_drafts(drafts: &[FirmDraft]) -> Result<Roster, LoadError> {
        let mut roster = Roster::new();
        for (idx, draft) in drafts.iter().enumerate() {
            roster
                .add(draft.clone())
                .map_err(|error| LoadError::InvalidRow {
                    lineno: idx + 2,
                    error,
                })?;
        }
        roster.source = roster.firms.clone();
        info!("Roster created with {} firms", roster.firms.len());
        Ok(roster)
    }

    /// Commits a proposed firm. On failure the roster is left unchanged.
    pub fn add(&mut self, draft: FirmDraft) -> Result<FirmId, ValidationError> {
        let (offering_nature, value_proposition, sme_focus) = validate(&draft)?;
        let id = FirmId(self.next_id);
        self.next_id += 1;
        debug!("add: {} {:?}", id, draft);
        self.firms.push(Firm {
            id,
            name: draft.name,
            offering_nature,
            value_proposition,
            sme_focus,
        });
        Ok(id)
    }

    /// Removes the firm with the given id, if it is present.
    pub fn delete(&mut self, id: FirmId) -> Option<Firm> {
        let pos = self.firms.iter().position(|f| f.id == id)?;
        debug!("delete: {}", id);
        Some(self.firms.remove(pos))
    }

    /// Removes every firm carrying this name and returns how many were removed.
    ///
    /// Names are not unique: all the matching firms go. Use [`Roster::delete`] to
    /// target a single firm.
    pub fn delete_by_name(&mut self, name: &str) -> usize {
        let before = self.firms.len();
        self.firms.retain(|f| f.name != name);
        let removed = before - self.firms.len();
        debug!("delete_by_name: {:?} removed {}", name, removed);
        removed
    }

    /// Edits one field of a committed firm in place.
    pub fn update(&mut self, id: FirmId, update: FirmUpdate) -> Result<(), RosterError> {
        let firm = self
            .firms
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(RosterError::UnknownFirm(id))?;
        match update {
            FirmUpdate::Name(name) => {
                if name.trim().is_empty() {
                    return Err(ValidationError::EmptyName.into());
                }
                firm.name = name;
            }
            FirmUpdate::Score(field, value) => {
                let score = Score::new(field, value)?;
                match field {
                    ScoreField::OfferingNature => firm.offering_nature = score,
                    ScoreField::ValueProposition => firm.value_proposition = score,
                    ScoreField::SmeFocus => firm.sme_focus = score,
                }
            }
        }
        debug!("update: {:?}", firm);
        Ok(())
    }

    /// Discards all the edits and goes back to the firms of the source.
    ///
    /// The source firms keep their original ids. Ids issued to firms added since
    /// then are not handed out again.
    pub fn reset(&mut self) {
        info!(
            "Resetting the roster: {} firms -> {} firms",
            self.firms.len(),
            self.source.len()
        );
        self.firms = self.source.clone();
    }

    pub fn firms(&self) -> &[Firm] {
        &self.firms
    }

    pub fn get(&self, id: FirmId) -> Option<&Firm> {
        self.firms.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.firms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.firms.is_empty()
    }
}
