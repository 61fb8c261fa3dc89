use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{SimError, SimResult};

pub mod loader;

pub use loader::{load_teams, load_teams_from_reader};

/// FIFA confederation a team qualifies through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confederation {
    Afc,
    Caf,
    Concacaf,
    Conmebol,
    Ofc,
    Uefa,
}

impl Confederation {
    pub const ALL: [Confederation; 6] = [
        Confederation::Afc,
        Confederation::Caf,
        Confederation::Concacaf,
        Confederation::Conmebol,
        Confederation::Ofc,
        Confederation::Uefa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Confederation::Afc => "AFC",
            Confederation::Caf => "CAF",
            Confederation::Concacaf => "CONCACAF",
            Confederation::Conmebol => "CONMEBOL",
            Confederation::Ofc => "OFC",
            Confederation::Uefa => "UEFA",
        }
    }
}

impl fmt::Display for Confederation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confederation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AFC" => Ok(Confederation::Afc),
            "CAF" => Ok(Confederation::Caf),
            "CONCACAF" => Ok(Confederation::Concacaf),
            "CONMEBOL" => Ok(Confederation::Conmebol),
            "OFC" => Ok(Confederation::Ofc),
            "UEFA" => Ok(Confederation::Uefa),
            other => Err(format!("unknown confederation '{}'", other)),
        }
    }
}

/// A national team's reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Strength rating (0–99)
    pub rating: f64,
    /// Home advantage on a 0–10 scale
    pub home_advantage: f64,
    pub confederation: Confederation,
    /// World ranking, lower is stronger
    pub ranking: u32,
}

/// Read-only team lookup shared by every trial.
///
/// Built once before simulation starts; the engine only ever borrows it, so a
/// single book can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct TeamBook {
    teams: HashMap<String, Team>,
}

impl TeamBook {
    pub fn new(teams: Vec<Team>) -> SimResult<Self> {
        let mut map = HashMap::with_capacity(teams.len());
        for team in teams {
            if map.contains_key(&team.name) {
                return Err(SimError::DuplicateTeam { name: team.name });
            }
            map.insert(team.name.clone(), team);
        }
        Ok(TeamBook { teams: map })
    }

    pub fn get(&self, name: &str) -> SimResult<&Team> {
        self.teams
            .get(name)
            .ok_or_else(|| SimError::unknown_team(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Members of `conf`, strongest ranking first. Ties on ranking fall back to
    /// name so the order never depends on hash iteration.
    pub fn members(&self, conf: Confederation) -> Vec<String> {
        self.members_excluding(conf, &[])
    }

    pub fn members_excluding(&self, conf: Confederation, excluded: &[String]) -> Vec<String> {
        self.ranked(|t| t.confederation == conf && !excluded.contains(&t.name))
    }

    /// Every team in the book, strongest ranking first.
    pub fn all_by_ranking(&self) -> Vec<String> {
        self.ranked(|_| true)
    }

    fn ranked<F: Fn(&Team) -> bool>(&self, keep: F) -> Vec<String> {
        let mut teams: Vec<&Team> = self.teams.values().filter(|t| keep(t)).collect();
        teams.sort_by(|a, b| a.ranking.cmp(&b.ranking).then_with(|| a.name.cmp(&b.name)));
        teams.into_iter().map(|t| t.name.clone()).collect()
    }

    /// Book in which `team` plays in `conf`.
    ///
    /// The lowest-ranked member of `conf` moves to `team`'s old confederation,
    /// keeping every confederation's size (and therefore every bracket shape)
    /// unchanged.
    pub fn reassign(&self, team: &str, conf: Confederation) -> SimResult<TeamBook> {
        let moving = self.get(team)?;
        let from = moving.confederation;
        if from == conf {
            return Ok(self.clone());
        }
        let swapped = self
            .members(conf)
            .pop()
            .ok_or_else(|| SimError::insufficient(format!("{} reassignment", conf), 1, 0))?;

        let mut book = self.clone();
        if let Some(t) = book.teams.get_mut(&swapped) {
            t.confederation = from;
        }
        if let Some(t) = book.teams.get_mut(team) {
            t.confederation = conf;
        }
        Ok(book)
    }
}
