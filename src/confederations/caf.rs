use tracing::debug;

use crate::engine::{play_group_stage, RandomSource, RoundRobin};
use crate::error::SimResult;
use crate::teams::{Confederation, TeamBook};

use super::path::{placed, seeded_draw, single_tie, take, PathOutcome, QualifyingPath};

const GROUPS: usize = 9;
const PLAYOFF_SEMIFINALISTS: usize = 4;

/// Africa: nine seeded groups, winners qualify. The four best runners-up
/// play a single-leg knockout for the inter-confederation playoff spot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Caf;

impl QualifyingPath for Caf {
    fn confederation(&self) -> Confederation {
        Confederation::Caf
    }

    fn min_entrants(&self) -> usize {
        2 * GROUPS
    }

    fn simulate<R: RandomSource>(
        &self,
        book: &TeamBook,
        entrants: &[String],
        rng: &mut R,
    ) -> SimResult<PathOutcome> {
        let teams = self.seed_entrants(book, entrants, None)?;
        let groups = seeded_draw(book, &teams, GROUPS, rng)?;
        let tables = play_group_stage(book, &groups, RoundRobin::Double, rng)?;

        let qualified = placed(&tables, 1, rng)?;
        let runners_up = placed(&tables, 2, rng)?;
        let seeds = take(&runners_up, PLAYOFF_SEMIFINALISTS, "CAF playoff")?;
        debug!("CAF: {:?} qualify, {:?} enter the playoff", qualified, seeds);

        // 1st v 4th, 2nd v 3rd
        let semi1 = single_tie(book, &seeds[0], &seeds[3], rng)?;
        let semi2 = single_tie(book, &seeds[1], &seeds[2], rng)?;
        let winner = single_tie(book, &semi1, &semi2, rng)?;
        debug!("CAF: {} advances to the inter-confederation playoff", winner);

        Ok(PathOutcome {
            qualified,
            playoff: vec![winner],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimRng;
    use crate::testing::book_of;

    #[test]
    fn nine_winners_and_one_playoff_team() {
        let book = book_of(Confederation::Caf, 54);
        let entrants = book.members(Confederation::Caf);
        let mut rng = SimRng::seeded(54);
        for _ in 0..10 {
            let out = Caf.simulate(&book, &entrants, &mut rng).unwrap();
            assert_eq!(out.qualified.len(), 9);
            assert_eq!(out.playoff.len(), 1);
            assert!(!out.qualified.contains(&out.playoff[0]));
            let mut unique = out.qualified.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 9);
        }
    }

    #[test]
    fn top_seed_usually_qualifies() {
        let book = book_of(Confederation::Caf, 54);
        let entrants = book.members(Confederation::Caf);
        let mut rng = SimRng::seeded(7);
        let top = (0..200)
            .filter(|_| {
                Caf.simulate(&book, &entrants, &mut rng)
                    .unwrap()
                    .qualified
                    .contains(&"CAF-01".to_string())
            })
            .count();
        assert!(top > 120, "CAF-01 qualified {} of 200", top);
    }

    #[test]
    fn minimum_field_still_runs() {
        let book = book_of(Confederation::Caf, 18);
        let entrants = book.members(Confederation::Caf);
        let out = Caf.simulate(&book, &entrants, &mut SimRng::seeded(3)).unwrap();
        assert_eq!(out.qualified.len(), 9);
    }
}
