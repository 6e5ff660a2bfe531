//! Party adapters — who gets credited for a win.
//!
//! Sires are horses referenced by the winner's `sire_id`; jockeys and trainers
//! are separate records attached to the winning entry. Each adapter turns a
//! [`Win`] into a uniform [`PartyKey`] so the rest of the pipeline never
//! branches on party type.

use super::race_book::RaceBook;
use super::SourceError;
use crate::domain::{Entry, Horse, PartyKey, PartyType, Race, Running};

/// One won running, resolved against the race book.
#[derive(Debug, Clone, Copy)]
pub struct Win<'a> {
    pub running: &'a Running,
    pub race: &'a Race,
    pub winner: &'a Horse,
    /// The winner's entry in this running, if one was recorded.
    pub entry: Option<&'a Entry>,
}

pub trait PartyAdapter: Send + Sync {
    fn party_type(&self) -> PartyType;

    /// The party credited with `win`, or `None` if nobody of this type is
    /// attached to it (an unrecorded sire, a missing entry).
    fn credit(&self, book: &RaceBook, win: &Win<'_>) -> Result<Option<PartyKey>, SourceError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SireAdapter;

#[derive(Debug, Clone, Copy, Default)]
pub struct JockeyAdapter;

#[derive(Debug, Clone, Copy, Default)]
pub struct TrainerAdapter;

impl PartyAdapter for SireAdapter {
    fn party_type(&self) -> PartyType {
        PartyType::Sires
    }

    fn credit(&self, book: &RaceBook, win: &Win<'_>) -> Result<Option<PartyKey>, SourceError> {
        let Some(sire_id) = win.winner.sire_id else {
            return Ok(None);
        };
        let sire = book.horse(sire_id).ok_or_else(|| {
            SourceError::Inconsistent(format!("{} has unknown sire {sire_id}", win.winner.id))
        })?;
        Ok(Some(PartyKey::named(sire.name.clone())))
    }
}

impl PartyAdapter for JockeyAdapter {
    fn party_type(&self) -> PartyType {
        PartyType::Jockeys
    }

    fn credit(&self, book: &RaceBook, win: &Win<'_>) -> Result<Option<PartyKey>, SourceError> {
        let Some(jockey_id) = win.entry.and_then(|e| e.jockey_id) else {
            return Ok(None);
        };
        let jockey = book.jockey(jockey_id).ok_or_else(|| {
            SourceError::Inconsistent(format!("{} rode by unknown {jockey_id}", win.running.id))
        })?;
        Ok(Some(PartyKey::person(
            jockey.first_name.clone(),
            jockey.last_name.clone(),
        )))
    }
}

impl PartyAdapter for TrainerAdapter {
    fn party_type(&self) -> PartyType {
        PartyType::Trainers
    }

    fn credit(&self, book: &RaceBook, win: &Win<'_>) -> Result<Option<PartyKey>, SourceError> {
        let Some(trainer_id) = win.entry.and_then(|e| e.trainer_id) else {
            return Ok(None);
        };
        let trainer = book.trainer(trainer_id).ok_or_else(|| {
            SourceError::Inconsistent(format!(
                "{} trained by unknown {trainer_id}",
                win.running.id
            ))
        })?;
        Ok(Some(PartyKey::person(
            trainer.first_name.clone(),
            trainer.last_name.clone(),
        )))
    }
}

static SIRES: SireAdapter = SireAdapter;
static JOCKEYS: JockeyAdapter = JockeyAdapter;
static TRAINERS: TrainerAdapter = TrainerAdapter;

/// The adapter for a party type.
pub fn adapter_for(party: PartyType) -> &'static dyn PartyAdapter {
    match party {
        PartyType::Sires => &SIRES,
        PartyType::Jockeys => &JOCKEYS,
        PartyType::Trainers => &TRAINERS,
    }
}
