use tracing::debug;

use crate::engine::{play_group_stage, sort_by_ranking, RandomSource, RoundRobin};
use crate::error::SimResult;
use crate::teams::{Confederation, TeamBook};

use super::path::{placed, seeded_draw, single_tie, take, PathOutcome, QualifyingPath};

const GROUPS: usize = 12;
/// Playoff paths, one qualifier each. The best runners-up get a bye per path.
const PLAYOFF_PATHS: usize = 4;

/// Europe: twelve seeded groups, winners qualify. Runners-up contest four
/// playoff paths of three teams; every path winner qualifies too.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uefa;

/// One playoff path: `seed` waits for the winner of `semi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayoffPath {
    pub seed: String,
    pub semi: (String, String),
}

impl Uefa {
    /// Draw the playoff paths from the ranked runners-up.
    ///
    /// The top runners-up (by adjusted group points) get the byes; the rest are
    /// re-seeded by world ranking into two pots that meet in the semi-finals.
    pub fn draw_playoff_paths<R: RandomSource>(
        &self,
        book: &TeamBook,
        runners_up: &[String],
        rng: &mut R,
    ) -> SimResult<Vec<PlayoffPath>> {
        let field = take(runners_up, 3 * PLAYOFF_PATHS, "UEFA playoff")?;
        let mut byes = field[..PLAYOFF_PATHS].to_vec();
        let seeded = sort_by_ranking(book, &field[PLAYOFF_PATHS..])?;
        let (pot_a, pot_b) = seeded.split_at(PLAYOFF_PATHS);
        let (mut pot_a, mut pot_b) = (pot_a.to_vec(), pot_b.to_vec());
        rng.shuffle(&mut byes);
        rng.shuffle(&mut pot_a);
        rng.shuffle(&mut pot_b);

        Ok(byes
            .into_iter()
            .zip(pot_a.into_iter().zip(pot_b))
            .map(|(seed, semi)| PlayoffPath { seed, semi })
            .collect())
    }
}

impl QualifyingPath for Uefa {
    fn confederation(&self) -> Confederation {
        Confederation::Uefa
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

        let mut qualified = placed(&tables, 1, rng)?;
        let runners_up = placed(&tables, 2, rng)?;
        debug!("UEFA: group winners {:?}", qualified);

        for path in self.draw_playoff_paths(book, &runners_up, rng)? {
            let (a, b) = &path.semi;
            let finalist = single_tie(book, a, b, rng)?;
            let winner = single_tie(book, &path.seed, &finalist, rng)?;
            debug!(
                "UEFA playoff path {} / {} v {}: {} qualifies",
                path.seed, a, b, winner
            );
            qualified.push(winner);
        }

        Ok(PathOutcome {
            qualified,
            playoff: Vec::new(),
        })
    }
}
