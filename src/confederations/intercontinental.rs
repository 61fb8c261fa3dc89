use tracing::debug;

use crate::engine::{sort_by_ranking, RandomSource};
use crate::error::{SimError, SimResult};
use crate::teams::{Confederation, TeamBook};

use super::path::single_tie;

pub const ENTRANTS: usize = 6;
const PATH_SIZE: usize = 3;

/// The six-team inter-confederation playoff. The two best-ranked entrants
/// seed one path each and wait for the winner of that path's semi-final.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntercontinentalPlayoff;

impl IntercontinentalPlayoff {
    /// Split the entrants into two paths of three, seed first.
    ///
    /// Unseeded teams avoid sharing a path with their own confederation while
    /// the draw allows it.
    pub fn draw_paths<R: RandomSource>(
        &self,
        book: &TeamBook,
        entrants: &[String],
        rng: &mut R,
    ) -> SimResult<[Vec<String>; 2]> {
        if entrants.len() != ENTRANTS {
            return Err(SimError::insufficient(
                "inter-confederation playoff",
                ENTRANTS,
                entrants.len(),
            ));
        }
        let ranked = sort_by_ranking(book, entrants)?;
        let mut path1 = vec![ranked[0].clone()];
        let mut path2 = vec![ranked[1].clone()];
        let mut unseeded = ranked[2..].to_vec();
        rng.shuffle(&mut unseeded);

        for team in unseeded {
            let conf = book.get(&team)?.confederation;
            if path1.len() < PATH_SIZE && !has_member_of(book, &path1, conf)? {
                path1.push(team);
            } else if path2.len() < PATH_SIZE && !has_member_of(book, &path2, conf)? {
                path2.push(team);
            } else if path1.len() == PATH_SIZE && path2.len() < PATH_SIZE {
                let displaced = std::mem::replace(&mut path1[PATH_SIZE - 1], team);
                path2.push(displaced);
            } else if path1.len() < PATH_SIZE {
                path1.push(team);
            } else {
                path2.push(team);
            }
        }
        Ok([path1, path2])
    }

    /// Play both paths and return their winners.
    pub fn simulate<R: RandomSource>(
        &self,
        book: &TeamBook,
        entrants: &[String],
        rng: &mut R,
    ) -> SimResult<Vec<String>> {
        let mut qualified = Vec::with_capacity(2);
        for path in self.draw_paths(book, entrants, rng)? {
            let finalist = single_tie(book, &path[1], &path[2], rng)?;
            let winner = single_tie(book, &path[0], &finalist, rng)?;
            debug!("Playoff path {:?}: {} qualifies", path, winner);
            qualified.push(winner);
        }
        Ok(qualified)
    }
}

fn has_member_of(book: &TeamBook, path: &[String], conf: Confederation) -> SimResult<bool> {
    for team in path {
        if book.get(team)?.confederation == conf {
            return Ok(true);
        }
    }
    Ok(false)
}
