//! In-memory race book — a [`FactSource`] over horses, people, races,
//! runnings and entries held in process.
//!
//! A win is a running with a recorded winner. The party credited for it is
//! resolved through the party's [`PartyAdapter`]. Rows are grouped by the
//! resolved [`PartyKey`] and returned descending by win count, ties in the
//! order the party first won.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::adapter::{adapter_for, Win};
use super::{FactSource, SourceError};
use crate::catalog::SlicePredicate;
use crate::domain::{
    Entry, Horse, HorseId, Jockey, JockeyId, PartyKey, PartyType, Race, RaceId, RawWinRow,
    Running, RunningId, Trainer, TrainerId,
};

/// Plain table dump of a race book, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceBookSnapshot {
    #[serde(default)]
    pub horses: Vec<Horse>,
    #[serde(default)]
    pub jockeys: Vec<Jockey>,
    #[serde(default)]
    pub trainers: Vec<Trainer>,
    #[serde(default)]
    pub races: Vec<Race>,
    #[serde(default)]
    pub runnings: Vec<Running>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Indexed, read-only race book.
#[derive(Debug, Clone)]
pub struct RaceBook {
    tables: RaceBookSnapshot,
    horses: HashMap<HorseId, usize>,
    jockeys: HashMap<JockeyId, usize>,
    trainers: HashMap<TrainerId, usize>,
    races: HashMap<RaceId, usize>,
    entries: HashMap<(RunningId, HorseId), usize>,
}

impl RaceBook {
    pub fn new(tables: RaceBookSnapshot) -> Self {
        let horses = index_by(&tables.horses, |h| h.id);
        let jockeys = index_by(&tables.jockeys, |j| j.id);
        let trainers = index_by(&tables.trainers, |t| t.id);
        let races = index_by(&tables.races, |r| r.id);
        let entries = index_by(&tables.entries, |e| (e.running_id, e.horse_id));
        Self {
            tables,
            horses,
            jockeys,
            trainers,
            races,
            entries,
        }
    }

    /// Parse a JSON table dump.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let tables: RaceBookSnapshot = serde_json::from_str(json)?;
        Ok(Self::new(tables))
    }

    pub fn snapshot(&self) -> &RaceBookSnapshot {
        &self.tables
    }

    pub fn horse(&self, id: HorseId) -> Option<&Horse> {
        self.horses.get(&id).map(|&i| &self.tables.horses[i])
    }

    pub fn jockey(&self, id: JockeyId) -> Option<&Jockey> {
        self.jockeys.get(&id).map(|&i| &self.tables.jockeys[i])
    }

    pub fn trainer(&self, id: TrainerId) -> Option<&Trainer> {
        self.trainers.get(&id).map(|&i| &self.tables.trainers[i])
    }

    pub fn race(&self, id: RaceId) -> Option<&Race> {
        self.races.get(&id).map(|&i| &self.tables.races[i])
    }

    pub fn entry(&self, running: RunningId, horse: HorseId) -> Option<&Entry> {
        self.entries
            .get(&(running, horse))
            .map(|&i| &self.tables.entries[i])
    }

    /// Every won running, resolved against its race, winning horse and
    /// winning entry. A dangling race or winner id is an error for every
    /// party type.
    fn wins(&self) -> impl Iterator<Item = Result<Win<'_>, SourceError>> {
        self.tables.runnings.iter().filter_map(move |running| {
            let winner_id = running.winner_id?;
            Some(self.resolve_win(running, winner_id))
        })
    }

    fn resolve_win<'a>(
        &'a self,
        running: &'a Running,
        winner_id: HorseId,
    ) -> Result<Win<'a>, SourceError> {
        let race = self.race(running.race_id).ok_or_else(|| {
            SourceError::Inconsistent(format!(
                "{} refers to unknown {}",
                running.id, running.race_id
            ))
        })?;
        let winner = self.horse(winner_id).ok_or_else(|| {
            SourceError::Inconsistent(format!("{} won by unknown {winner_id}", running.id))
        })?;
        Ok(Win {
            running,
            race,
            winner,
            entry: self.entry(running.id, winner_id),
        })
    }
}

impl FactSource for RaceBook {
    fn name(&self) -> &str {
        "race-book"
    }

    fn query(
        &self,
        party: PartyType,
        predicate: &SlicePredicate,
    ) -> Result<Vec<RawWinRow>, SourceError> {
        let adapter = adapter_for(party);
        let mut rows: Vec<RawWinRow> = Vec::new();
        let mut position: HashMap<PartyKey, usize> = HashMap::new();

        for win in self.wins() {
            let win = win?;
            if !matches_race(predicate, win.race) {
                continue;
            }
            let Some(identity) = adapter.credit(self, &win)? else {
                continue;
            };
            match position.get(&identity) {
                Some(&i) => rows[i].wins += 1,
                None => {
                    position.insert(identity.clone(), rows.len());
                    rows.push(RawWinRow::new(identity, 1));
                }
            }
        }

        // Stable: equal counts keep first-win order.
        rows.sort_by(|a, b| b.wins.cmp(&a.wins));
        Ok(rows)
    }

    fn count_runnings(&self) -> Result<u64, SourceError> {
        Ok(self.tables.runnings.len() as u64)
    }
}

fn matches_race(predicate: &SlicePredicate, race: &Race) -> bool {
    match predicate {
        SlicePredicate::All => true,
        SlicePredicate::SurfaceIs { surface } => race.surface == *surface,
        SlicePredicate::RaceTypeIn { codes } => codes.iter().any(|c| *c == race.race_type),
        SlicePredicate::Distance { class } => class.contains(race.distance),
    }
}

fn index_by<T, K, F>(rows: &[T], key: F) -> HashMap<K, usize>
where
    K: std::hash::Hash + Eq,
    F: Fn(&T) -> K,
{
    rows.iter().enumerate().map(|(i, row)| (key(row), i)).collect()
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DistanceClass;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 4, 13).unwrap()
    }

    fn horse(id: u32, name: &str, sire: Option<u32>) -> Horse {
        Horse {
            id: HorseId(id),
            name: name.into(),
            sire_id: sire.map(HorseId),
        }
    }

    fn race(id: u32, race_type: &str, distance: f64, surface: &str) -> Race {
        Race {
            id: RaceId(id),
            race_type: race_type.into(),
            distance,
            surface: surface.into(),
            name: None,
        }
    }

    fn running(id: u32, race: u32, winner: Option<u32>) -> Running {
        Running {
            id: RunningId(id),
            race_id: RaceId(race),
            date: date(),
            winner_id: winner.map(HorseId),
        }
    }

    fn entry(running: u32, horse: u32, jockey: u32, trainer: u32) -> Entry {
        Entry {
            horse_id: HorseId(horse),
            running_id: RunningId(running),
            jockey_id: Some(JockeyId(jockey)),
            trainer_id: Some(TrainerId(trainer)),
        }
    }

    /// Two sires, three runners, four runnings (one unwon).
    fn sample_book() -> RaceBook {
        RaceBook::new(RaceBookSnapshot {
            horses: vec![
                horse(1, "Tapit", None),
                horse(2, "Medaglia d'Oro", None),
                horse(10, "Runner A", Some(1)),
                horse(11, "Runner B", Some(2)),
                horse(12, "Runner C", Some(1)),
            ],
            jockeys: vec![
                Jockey {
                    id: JockeyId(1),
                    first_name: "Irad".into(),
                    last_name: "Ortiz".into(),
                },
                Jockey {
                    id: JockeyId(2),
                    first_name: "Joel".into(),
                    last_name: "Rosario".into(),
                },
            ],
            trainers: vec![Trainer {
                id: TrainerId(1),
                first_name: "Todd".into(),
                last_name: "Pletcher".into(),
            }],
            races: vec![
                race(1, "MSW", 6.0, "Turf"),
                race(2, "STK", 9.0, "Polytrack"),
                race(3, "MCL", 7.0, "Dirt"),
            ],
            runnings: vec![
                running(100, 1, Some(10)),
                running(101, 2, Some(11)),
                running(102, 3, Some(12)),
                running(103, 3, None),
            ],
            entries: vec![
                entry(100, 10, 1, 1),
                entry(101, 11, 2, 1),
                entry(102, 12, 1, 1),
            ],
        })
    }

    #[test]
    fn sires_all_time() {
        let rows = sample_book()
            .query(PartyType::Sires, &SlicePredicate::All)
            .unwrap();
        assert_eq!(
            rows,
            vec![
                RawWinRow::new(PartyKey::named("Tapit"), 2),
                RawWinRow::new(PartyKey::named("Medaglia d'Oro"), 1),
            ]
        );
    }

    #[test]
    fn jockeys_by_surface() {
        let rows = sample_book()
            .query(PartyType::Jockeys, &SlicePredicate::surface_is("Turf"))
            .unwrap();
        assert_eq!(rows, vec![RawWinRow::new(PartyKey::person("Irad", "Ortiz"), 1)]);
    }

    #[test]
    fn trainers_by_race_type_membership() {
        let rows = sample_book()
            .query(
                PartyType::Trainers,
                &SlicePredicate::race_type_in(["MSW", "MCL"]),
            )
            .unwrap();
        assert_eq!(
            rows,
            vec![RawWinRow::new(PartyKey::person("Todd", "Pletcher"), 2)]
        );
    }

    #[test]
    fn distance_cutoff_puts_seven_furlongs_in_sprints() {
        let book = sample_book();
        let sprint = book
            .query(PartyType::Sires, &SlicePredicate::distance(DistanceClass::Sprint))
            .unwrap();
        let route = book
            .query(PartyType::Sires, &SlicePredicate::distance(DistanceClass::Route))
            .unwrap();
        assert_eq!(sprint, vec![RawWinRow::new(PartyKey::named("Tapit"), 2)]);
        assert_eq!(
            route,
            vec![RawWinRow::new(PartyKey::named("Medaglia d'Oro"), 1)]
        );
    }

    #[test]
    fn no_matching_wins_gives_empty_rows() {
        let rows = sample_book()
            .query(PartyType::Jockeys, &SlicePredicate::race_type_in(["ALW"]))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn ties_keep_first_win_order() {
        let rows = sample_book()
            .query(PartyType::Jockeys, &SlicePredicate::distance(DistanceClass::Route))
            .unwrap();
        assert_eq!(rows.len(), 1);

        let rows = sample_book()
            .query(PartyType::Sires, &SlicePredicate::race_type_in(["MSW", "STK"]))
            .unwrap();
        let names: Vec<String> = rows.iter().map(|r| r.identity.to_string()).collect();
        assert_eq!(names, vec!["Tapit", "Medaglia d'Oro"]);
    }

    #[test]
    fn winner_without_sire_is_not_credited() {
        let mut tables = sample_book().snapshot().clone();
        tables.horses[2].sire_id = None;
        let rows = RaceBook::new(tables)
            .query(PartyType::Sires, &SlicePredicate::All)
            .unwrap();
        let total: i64 = rows.iter().map(|r| r.wins).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn unknown_race_is_inconsistent() {
        let mut tables = sample_book().snapshot().clone();
        tables.runnings.push(running(200, 99, Some(10)));
        let err = RaceBook::new(tables)
            .query(PartyType::Sires, &SlicePredicate::All)
            .unwrap_err();
        assert!(matches!(err, SourceError::Inconsistent(_)));
    }

    #[test]
    fn unknown_winner_is_inconsistent_for_every_party() {
        let mut tables = sample_book().snapshot().clone();
        tables.runnings.push(running(200, 1, Some(999)));
        tables.entries.push(entry(200, 999, 1, 1));
        let book = RaceBook::new(tables);
        for party in PartyType::ALL {
            let err = book.query(party, &SlicePredicate::All).unwrap_err();
            assert!(
                matches!(&err, SourceError::Inconsistent(msg) if msg.contains("horse#999")),
                "{party}: {err}"
            );
        }
    }

    #[test]
    fn count_runnings_includes_unwon() {
        assert_eq!(sample_book().count_runnings().unwrap(), 4);
    }

    #[test]
    fn from_json_snapshot() {
        let json = r#"{
            "horses": [
                {"id": 1, "name": "Tapit"},
                {"id": 2, "name": "Runner", "sire_id": 1}
            ],
            "races": [{"id": 1, "type": "ALW", "distance": 8.5, "surface": "Turf"}],
            "runnings": [{"id": 1, "race_id": 1, "date": "2013-04-13", "winner_id": 2}],
            "entries": [{"horse_id": 2, "running_id": 1}]
        }"#;
        let book = RaceBook::from_json(json).unwrap();
        let rows = book.query(PartyType::Sires, &SlicePredicate::All).unwrap();
        assert_eq!(rows, vec![RawWinRow::new(PartyKey::named("Tapit"), 1)]);
        let rows = book.query(PartyType::Jockeys, &SlicePredicate::All).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn from_json_rejects_garbage() {
        let err = RaceBook::from_json("{not json").unwrap_err();
        assert!(matches!(err, SourceError::Snapshot(_)));
    }
}
