use tracing::debug;

use crate::engine::{play_group_stage, RandomSource, RoundRobin};
use crate::error::SimResult;
use crate::teams::{Confederation, TeamBook};

use super::path::{placed, seeded_draw, take, two_leg_tie, PathOutcome, QualifyingPath};

const ENTRANTS: usize = 32;
/// Teams that skip the first round.
const FIRST_ROUND_BYES: usize = 28;
const SECOND_ROUND_GROUPS: usize = 6;
const THIRD_ROUND_GROUPS: usize = 3;
const PLAYOFF_SLOTS: usize = 2;

/// North and Central America and the Caribbean, hosts excluded.
///
/// The four lowest-ranked entrants play two-legged ties into a round of six
/// single round-robin groups. The top two of each group move on to three
/// home-and-away groups, whose winners qualify. The two best runners-up go to
/// the inter-confederation playoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct Concacaf;

impl QualifyingPath for Concacaf {
    fn confederation(&self) -> Confederation {
        Confederation::Concacaf
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

        // 29th v 32nd, 30th v 31st
        let mut second_round = ranked[..FIRST_ROUND_BYES].to_vec();
        second_round.push(two_leg_tie(book, &ranked[28], &ranked[31], rng)?);
        second_round.push(two_leg_tie(book, &ranked[29], &ranked[30], rng)?);
        debug!(
            "CONCACAF R1: {:?} advance",
            &second_round[FIRST_ROUND_BYES..]
        );

        let groups = seeded_draw(book, &second_round, SECOND_ROUND_GROUPS, rng)?;
        let tables = play_group_stage(book, &groups, RoundRobin::Single, rng)?;
        let mut third_round = placed(&tables, 1, rng)?;
        third_round.extend(placed(&tables, 2, rng)?);
        debug!("CONCACAF R2: {:?} advance", third_round);

        let groups = seeded_draw(book, &third_round, THIRD_ROUND_GROUPS, rng)?;
        let tables = play_group_stage(book, &groups, RoundRobin::Double, rng)?;
        let qualified = placed(&tables, 1, rng)?;
        let runners_up = placed(&tables, 2, rng)?;
        let playoff = take(&runners_up, PLAYOFF_SLOTS, "CONCACAF playoff")?.to_vec();
        debug!("CONCACAF: {:?} qualify, {:?} to the playoff", qualified, playoff);

        Ok(PathOutcome { qualified, playoff })
    }
}
