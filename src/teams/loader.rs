use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use super::{Confederation, Team, TeamBook};

/// One row of the team data file.
///
/// Expected header: `Team,Rating,Home,Confederation,Ranking`.
#[derive(Debug, Deserialize)]
struct TeamRecord {
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "Rating")]
    rating: f64,
    #[serde(rename = "Home")]
    home: f64,
    #[serde(rename = "Confederation")]
    confederation: String,
    #[serde(rename = "Ranking")]
    ranking: u32,
}

impl TeamRecord {
    fn into_team(self) -> Result<Team> {
        let confederation = self
            .confederation
            .parse::<Confederation>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Bad confederation for {}", self.team))?;
        if !(0.0..=99.0).contains(&self.rating) {
            anyhow::bail!("Rating for {} must be within 0–99, got {}", self.team, self.rating);
        }
        if !(0.0..=10.0).contains(&self.home) {
            anyhow::bail!("Home advantage for {} must be within 0–10, got {}", self.team, self.home);
        }
        Ok(Team {
            name: self.team.trim().to_string(),
            rating: self.rating,
            home_advantage: self.home,
            confederation,
            ranking: self.ranking,
        })
    }
}

/// Load the team book from a CSV file.
pub fn load_teams(path: impl AsRef<Path>) -> Result<TeamBook> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open team data {}", path.display()))?;
    let book = load_teams_from_reader(file)
        .with_context(|| format!("Failed to load team data {}", path.display()))?;
    debug!("Loaded {} teams from {}", book.len(), path.display());
    Ok(book)
}

pub fn load_teams_from_reader<R: Read>(reader: R) -> Result<TeamBook> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut teams = Vec::new();
    for (line, record) in rdr.deserialize::<TeamRecord>().enumerate() {
        // +2: header row and 1-based numbering
        let record = record.with_context(|| format!("Malformed team row {}", line + 2))?;
        teams.push(record.into_team()?);
    }
    Ok(TeamBook::new(teams)?)
}
