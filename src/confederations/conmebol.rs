use tracing::debug;

use crate::engine::{play_round_robin, RandomSource, RoundRobin};
use crate::error::SimResult;
use crate::teams::{Confederation, TeamBook};

use super::path::{table_order, PathOutcome, QualifyingPath};

const DIRECT_SLOTS: usize = 6;

/// South America: one home-and-away league of every member. The top six
/// qualify, seventh goes to the inter-confederation playoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct Conmebol;

impl QualifyingPath for Conmebol {
    fn confederation(&self) -> Confederation {
        Confederation::Conmebol
    }

    fn min_entrants(&self) -> usize {
        DIRECT_SLOTS + 1
    }

    fn simulate<R: RandomSource>(
        &self,
        book: &TeamBook,
        entrants: &[String],
        rng: &mut R,
    ) -> SimResult<PathOutcome> {
        let teams = self.seed_entrants(book, entrants, None)?;
        let table = play_round_robin(book, &teams, RoundRobin::Double, rng)?;
        let mut order = table_order(&table);
        let playoff = order.split_off(DIRECT_SLOTS);
        let outcome = PathOutcome {
            qualified: order,
            playoff: playoff.into_iter().take(1).collect(),
        };
        debug!(
            "CONMEBOL: {:?} qualify, {:?} to the playoff",
            outcome.qualified, outcome.playoff
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimRng;
    use crate::error::SimError;
    use crate::testing::book_of;

    #[test]
    fn six_qualify_and_seventh_plays_off() {
        let book = book_of(Confederation::Conmebol, 10);
        let entrants = book.members(Confederation::Conmebol);
        let mut rng = SimRng::seeded(10);
        for _ in 0..20 {
            let out = Conmebol.simulate(&book, &entrants, &mut rng).unwrap();
            assert_eq!(out.qualified.len(), 6);
            assert_eq!(out.playoff.len(), 1);
            assert!(!out.qualified.contains(&out.playoff[0]));
            assert!(out.qualified.iter().all(|t| entrants.contains(t)));
        }
    }

    #[test]
    fn too_few_entrants() {
        let book = book_of(Confederation::Conmebol, 6);
        let entrants = book.members(Confederation::Conmebol);
        let err = Conmebol
            .simulate(&book, &entrants, &mut SimRng::seeded(0))
            .unwrap_err();
        assert!(matches!(err, SimError::InsufficientTeams { needed: 7, available: 6, .. }));
    }
}
