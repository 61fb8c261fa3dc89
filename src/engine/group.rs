use std::collections::HashSet;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::teams::{Team, TeamBook};

use super::match_model::{simulate_match, MatchOutcome};
use super::random::RandomSource;

const POINTS_WIN: u32 = 3;
const POINTS_DRAW: u32 = 1;

/// Round-robin format for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundRobin {
    /// Home and away: each pair meets twice, each side hosting once.
    Double,
    /// Each pair meets once at a neutral venue.
    Single,
}

impl RoundRobin {
    pub fn matches_per_team(&self, group_size: usize) -> usize {
        let opponents = group_size.saturating_sub(1);
        match self {
            RoundRobin::Double => 2 * opponents,
            RoundRobin::Single => opponents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub points: u32,
}

impl StandingRow {
    fn new(team: &str) -> Self {
        StandingRow {
            team: team.to_string(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            points: 0,
        }
    }

    fn record_win(&mut self) {
        self.played += 1;
        self.won += 1;
        self.points += POINTS_WIN;
    }

    fn record_draw(&mut self) {
        self.played += 1;
        self.drawn += 1;
        self.points += POINTS_DRAW;
    }

    fn record_loss(&mut self) {
        self.played += 1;
        self.lost += 1;
    }
}

/// Final group table, best first. Level teams are in random order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    rows: Vec<StandingRow>,
}

impl Standings {
    pub fn rows(&self) -> &[StandingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at 1-indexed `place`.
    pub fn at_place(&self, place: usize) -> Option<&StandingRow> {
        place.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.team.as_str())
    }

    /// 1-indexed finishing position of `team`.
    pub fn position_of(&self, team: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.team == team).map(|i| i + 1)
    }

    pub fn total_points(&self) -> u32 {
        self.rows.iter().map(|r| r.points).sum()
    }

    /// Number of matches played in the group (each counted once).
    pub fn matches_played(&self) -> u32 {
        self.rows.iter().map(|r| r.played).sum::<u32>() / 2
    }
}

/// Shuffle, then stable-sort descending by `score`.
///
/// The shuffle is the tie-break: equal scores keep the random relative order
/// it produced, everything else is ordered deterministically.
pub(crate) fn rank_by<T, R, F>(items: &mut [T], score: F, rng: &mut R)
where
    R: RandomSource,
    F: Fn(&T) -> i64,
{
    rng.shuffle(items);
    items.sort_by_key(|item| std::cmp::Reverse(score(item)));
}

fn resolve_members<'b>(book: &'b TeamBook, teams: &[String]) -> SimResult<Vec<&'b Team>> {
    let mut seen = HashSet::with_capacity(teams.len());
    for name in teams {
        if !seen.insert(name.as_str()) {
            return Err(SimError::malformed(format!("{} appears twice in one group", name)));
        }
    }
    teams.iter().map(|name| book.get(name)).collect()
}

fn record(rows: &mut [StandingRow], home: usize, away: usize, outcome: MatchOutcome) {
    match outcome {
        MatchOutcome::HomeWin => {
            rows[home].record_win();
            rows[away].record_loss();
        }
        MatchOutcome::AwayWin => {
            rows[home].record_loss();
            rows[away].record_win();
        }
        MatchOutcome::Draw => {
            rows[home].record_draw();
            rows[away].record_draw();
        }
    }
}

/// Play every fixture of a group and rank the table.
pub fn play_round_robin<R: RandomSource>(
    book: &TeamBook,
    teams: &[String],
    format: RoundRobin,
    rng: &mut R,
) -> SimResult<Standings> {
    let members = resolve_members(book, teams)?;
    let mut rows: Vec<StandingRow> = members.iter().map(|t| StandingRow::new(&t.name)).collect();
    let n = members.len();

    match format {
        RoundRobin::Double => {
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let (home, away) = (members[i], members[j]);
                    let outcome =
                        simulate_match(home.rating, away.rating, home.home_advantage, rng);
                    record(&mut rows, i, j, outcome);
                }
            }
        }
        RoundRobin::Single => {
            for i in 0..n {
                for j in (i + 1)..n {
                    let outcome = simulate_match(members[i].rating, members[j].rating, 0.0, rng);
                    record(&mut rows, i, j, outcome);
                }
            }
        }
    }

    rank_by(&mut rows, |r| r.points as i64, rng);
    debug!(
        "Group table: {}",
        rows.iter()
            .map(|r| format!("{} {}", r.team, r.points))
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(Standings { rows })
}

/// Play a whole group stage, one table per group, in group order.
pub fn play_group_stage<R: RandomSource>(
    book: &TeamBook,
    groups: &[Vec<String>],
    format: RoundRobin,
    rng: &mut R,
) -> SimResult<Vec<Standings>> {
    groups
        .iter()
        .map(|group| play_round_robin(book, group, format, rng))
        .collect()
}

#[cfg(test)]
pub(crate) fn standings_from(rows: &[(&str, u32)]) -> Standings {
    Standings {
        rows: rows
            .iter()
            .map(|(team, points)| StandingRow {
                points: *points,
                ..StandingRow::new(team)
            })
            .collect(),
    }
}
