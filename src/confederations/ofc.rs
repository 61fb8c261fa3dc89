use tracing::debug;

use crate::engine::{play_group_stage, RandomSource, RoundRobin};
use crate::error::SimResult;
use crate::teams::{Confederation, TeamBook};

use super::path::{
    loser_of, seeded_draw, single_tie, table_order, take, PathOutcome, QualifyingPath,
};

const ENTRANTS: usize = 11;
const FIRST_ROUND_BYES: usize = 7;
const GROUPS: usize = 2;

/// Oceania: a four-team preliminary knockout, two single round-robin groups
/// of four, then semi-finals and a final. The winner qualifies and the
/// runner-up goes to the inter-confederation playoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ofc;

impl QualifyingPath for Ofc {
    fn confederation(&self) -> Confederation {
        Confederation::Ofc
    }

    fn min_entrants(&self) -> usize {
        ENTRANTS
    }

    fn simulate<R: RandomSource>(
        &self,
        book: &TeamBook,
        entrants: &[String],
        rng: &mut R,
    ) -> SimResult<PathOutcome> {
        let ranked = self.seed_entrants(book, entrants, Some(ENTRANTS))?;

        let semi1 = single_tie(book, &ranked[7], &ranked[10], rng)?;
        let semi2 = single_tie(book, &ranked[8], &ranked[9], rng)?;
        let preliminary = single_tie(book, &semi1, &semi2, rng)?;
        debug!("OFC R1: {} advances", preliminary);

        let mut second_round = ranked[..FIRST_ROUND_BYES].to_vec();
        second_round.push(preliminary);
        let groups = seeded_draw(book, &second_round, GROUPS, rng)?;
        let tables = play_group_stage(book, &groups, RoundRobin::Single, rng)?;
        let group_a = table_order(&tables[0]);
        let group_b = table_order(&tables[1]);
        let group_a = take(&group_a, 2, "OFC semi-finals")?;
        let group_b = take(&group_b, 2, "OFC semi-finals")?;

        let finalist1 = single_tie(book, &group_a[0], &group_b[1], rng)?;
        let finalist2 = single_tie(book, &group_b[0], &group_a[1], rng)?;
        let winner = single_tie(book, &finalist1, &finalist2, rng)?;
        let runner_up = loser_of(&finalist1, &finalist2, &winner);
        debug!("OFC: {} qualifies, {} to the playoff", winner, runner_up);

        Ok(PathOutcome {
            qualified: vec![winner],
            playoff: vec![runner_up],
        })
    }
}
