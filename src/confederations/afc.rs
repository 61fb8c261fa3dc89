use tracing::debug;

use crate::engine::{play_group_stage, RandomSource, RoundRobin};
use crate::error::SimResult;
use crate::teams::{Confederation, TeamBook};

use super::path::{placed, seeded_draw, take, two_leg_tie, PathOutcome, QualifyingPath};

const ENTRANTS: usize = 46;
const FIRST_ROUND_BYES: usize = 26;
const SECOND_ROUND_GROUPS: usize = 9;
const THIRD_ROUND_GROUPS: usize = 3;
const FOURTH_ROUND_GROUPS: usize = 2;

/// Asia, in five rounds:
///
/// 1. ranks 27-36 drawn against ranks 37-46, home and away;
/// 2. nine home-and-away groups of four, top two advance;
/// 3. three home-and-away groups of six, top two qualify;
/// 4. thirds and fourths in two single round-robin groups, winners qualify;
/// 5. the fourth-round runners-up play off for the inter-confederation slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Afc;

impl QualifyingPath for Afc {
    fn confederation(&self) -> Confederation {
        Confederation::Afc
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

        let mut upper = ranked[FIRST_ROUND_BYES..36].to_vec();
        let mut lower = ranked[36..ENTRANTS].to_vec();
        rng.shuffle(&mut upper);
        rng.shuffle(&mut lower);
        let mut second_round = ranked[..FIRST_ROUND_BYES].to_vec();
        for (home, away) in upper.iter().zip(&lower) {
            second_round.push(two_leg_tie(book, home, away, rng)?);
        }
        debug!("AFC R1: {:?} advance", &second_round[FIRST_ROUND_BYES..]);

        let groups = seeded_draw(book, &second_round, SECOND_ROUND_GROUPS, rng)?;
        let tables = play_group_stage(book, &groups, RoundRobin::Double, rng)?;
        let mut third_round = placed(&tables, 1, rng)?;
        third_round.extend(placed(&tables, 2, rng)?);
        debug!("AFC R2: {:?} advance", third_round);

        let groups = seeded_draw(book, &third_round, THIRD_ROUND_GROUPS, rng)?;
        let tables = play_group_stage(book, &groups, RoundRobin::Double, rng)?;
        let mut qualified = placed(&tables, 1, rng)?;
        qualified.extend(placed(&tables, 2, rng)?);
        let mut fourth_round = placed(&tables, 3, rng)?;
        fourth_round.extend(placed(&tables, 4, rng)?);
        debug!("AFC R3: {:?} qualify, {:?} to R4", qualified, fourth_round);

        let groups = seeded_draw(book, &fourth_round, FOURTH_ROUND_GROUPS, rng)?;
        let tables = play_group_stage(book, &groups, RoundRobin::Single, rng)?;
        qualified.extend(placed(&tables, 1, rng)?);
        let runners_up = placed(&tables, 2, rng)?;
        let runners_up = take(&runners_up, 2, "AFC fifth round")?;

        let playoff = two_leg_tie(book, &runners_up[0], &runners_up[1], rng)?;
        debug!("AFC R5: {} advances to the inter-confederation playoff", playoff);

        Ok(PathOutcome {
            qualified,
            playoff: vec![playoff],
        })
    }
}
