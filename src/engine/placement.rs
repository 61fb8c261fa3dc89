use crate::error::{SimError, SimResult};

use super::group::{rank_by, Standings};
use super::random::RandomSource;

/// Points deducted from teams in groups larger than the smallest one: two
/// wins' worth, approximating the extra fixtures against a bottom side.
const UNEVEN_GROUP_DEDUCTION: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Deduct points in larger groups so teams compare across uneven groups
    Uneven,
    /// Compare raw points
    Raw,
}

/// The team finishing in a given place of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub team: String,
    /// Index of the group in the input list
    pub group: usize,
    /// Points after any uneven-group adjustment
    pub points: i32,
}

/// Take the `place`-th team (1-indexed) of every group and rank them
/// against each other.
///
/// Ranking is by adjusted points, ties broken at random.
pub fn extract_place<R: RandomSource>(
    standings: &[Standings],
    place: usize,
    normalization: Normalization,
    rng: &mut R,
) -> SimResult<Vec<Placement>> {
    let smallest = standings
        .iter()
        .map(Standings::len)
        .min()
        .ok_or_else(|| SimError::insufficient("placement extraction", 1, 0))?;
    if place == 0 || place > smallest {
        return Err(SimError::insufficient(
            format!("place {} extraction", place),
            place.max(1),
            smallest,
        ));
    }

    let mut placements: Vec<Placement> = standings
        .iter()
        .enumerate()
        .filter_map(|(group, table)| {
            let row = table.at_place(place)?;
            let mut points = row.points as i32;
            if normalization == Normalization::Uneven && table.len() > smallest {
                points -= UNEVEN_GROUP_DEDUCTION;
            }
            Some(Placement {
                team: row.team.clone(),
                group,
                points,
            })
        })
        .collect();

    rank_by(&mut placements, |p| p.points as i64, rng);
    Ok(placements)
}

pub fn placement_teams(placements: &[Placement]) -> Vec<String> {
    placements.iter().map(|p| p.team.clone()).collect()
}
