use serde::Serialize;
use tracing::warn;

use crate::engine::{
    draw_groups, extract_place, placement_teams, resolve_single_leg, resolve_two_legs,
    sort_by_ranking, split_into_pots, Group, Normalization, RandomSource, Standings,
};
use crate::error::{SimError, SimResult};
use crate::teams::{Confederation, TeamBook};

/// Teams a qualifying path sends to the World Cup and to the
/// inter-confederation playoff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathOutcome {
    pub qualified: Vec<String>,
    pub playoff: Vec<String>,
}

/// Contract every confederation's qualifying path implements.
pub trait QualifyingPath {
    fn confederation(&self) -> Confederation;

    /// Fewest entrants the bracket can be built from.
    fn min_entrants(&self) -> usize;

    /// Run the whole path once. `entrants` are the confederation's
    /// participating teams (hosts already removed).
    fn simulate<R: RandomSource>(
        &self,
        book: &TeamBook,
        entrants: &[String],
        rng: &mut R,
    ) -> SimResult<PathOutcome>;

    /// Ranking-sorted entrants, trimmed to `max` when the bracket has a fixed
    /// shape. Fails when there are too few to fill the bracket.
    fn seed_entrants(
        &self,
        book: &TeamBook,
        entrants: &[String],
        max: Option<usize>,
    ) -> SimResult<Vec<String>> {
        if entrants.len() < self.min_entrants() {
            return Err(SimError::insufficient(
                format!("{} qualifying", self.confederation()),
                self.min_entrants(),
                entrants.len(),
            ));
        }
        let mut ranked = sort_by_ranking(book, entrants)?;
        if let Some(max) = max {
            if ranked.len() > max {
                warn!(
                    "{} bracket takes {} teams, ignoring the lowest-ranked {}",
                    self.confederation(),
                    max,
                    ranked.len() - max
                );
                ranked.truncate(max);
            }
        }
        Ok(ranked)
    }
}

/// Rank `teams`, cut them into pots of `num_groups` and draw `num_groups`
/// groups.
pub(crate) fn seeded_draw<R: RandomSource>(
    book: &TeamBook,
    teams: &[String],
    num_groups: usize,
    rng: &mut R,
) -> SimResult<Vec<Group>> {
    let ranked = sort_by_ranking(book, teams)?;
    let pots = split_into_pots(&ranked, num_groups)?;
    draw_groups(&pots, num_groups, rng)
}

/// Teams finishing `place` across all groups, best first.
pub(crate) fn placed<R: RandomSource>(
    tables: &[Standings],
    place: usize,
    rng: &mut R,
) -> SimResult<Vec<String>> {
    Ok(placement_teams(&extract_place(
        tables,
        place,
        Normalization::Uneven,
        rng,
    )?))
}

/// Finishing order of one group.
pub(crate) fn table_order(table: &Standings) -> Vec<String> {
    table.teams().map(String::from).collect()
}

pub(crate) fn take<'a>(teams: &'a [String], count: usize, stage: &str) -> SimResult<&'a [String]> {
    teams
        .get(..count)
        .ok_or_else(|| SimError::insufficient(stage, count, teams.len()))
}

/// Winner of a single neutral-venue match between `a` and `b`.
pub(crate) fn single_tie<R: RandomSource>(
    book: &TeamBook,
    a: &str,
    b: &str,
    rng: &mut R,
) -> SimResult<String> {
    resolve_single_leg(book, &[(a.to_string(), b.to_string())], rng)?
        .pop()
        .ok_or_else(|| SimError::malformed("tie produced no winner"))
}

/// Winner of a home-and-away tie between `a` and `b`.
pub(crate) fn two_leg_tie<R: RandomSource>(
    book: &TeamBook,
    a: &str,
    b: &str,
    rng: &mut R,
) -> SimResult<String> {
    resolve_two_legs(book, &[(a.to_string(), b.to_string())], rng)?
        .pop()
        .ok_or_else(|| SimError::malformed("tie produced no winner"))
}

/// The side of a finished tie that did not win it.
pub(crate) fn loser_of(a: &str, b: &str, winner: &str) -> String {
    if winner == a {
        b.to_string()
    } else {
        a.to_string()
    }
}
