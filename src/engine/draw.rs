use std::collections::HashMap;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::teams::TeamBook;

use super::random::RandomSource;

/// One seeding tier of a draw.
pub type Pot = Vec<String>;
/// Teams drawn together, at most one from each pot.
pub type Group = Vec<String>;

/// Sort team names by world ranking, strongest first (stable on equal ranks).
pub fn sort_by_ranking(book: &TeamBook, teams: &[String]) -> SimResult<Vec<String>> {
    let mut ranked = teams
        .iter()
        .map(|name| Ok((book.get(name)?.ranking, name.clone())))
        .collect::<SimResult<Vec<_>>>()?;
    ranked.sort_by_key(|(ranking, _)| *ranking);
    Ok(ranked.into_iter().map(|(_, name)| name).collect())
}

/// Cut a ranked list into consecutive pots of `pot_size`. A short remainder
/// becomes the last pot.
pub fn split_into_pots(ranked: &[String], pot_size: usize) -> SimResult<Vec<Pot>> {
    if pot_size == 0 {
        return Err(SimError::malformed("pot size must be at least 1"));
    }
    Ok(ranked.chunks(pot_size).map(|chunk| chunk.to_vec()).collect())
}

/// Seeded group draw.
///
/// Each pot is shuffled independently, then group `i` takes the `i`-th team of
/// every pot that has one. A short last pot therefore only reaches the first
/// groups.
pub fn draw_groups<R: RandomSource>(
    pots: &[Pot],
    num_groups: usize,
    rng: &mut R,
) -> SimResult<Vec<Group>> {
    if num_groups == 0 {
        return Err(SimError::malformed("a draw needs at least one group"));
    }
    if let Some((idx, pot)) = pots.iter().enumerate().find(|(_, p)| p.len() > num_groups) {
        return Err(SimError::malformed(format!(
            "pot {} holds {} teams for {} groups",
            idx + 1,
            pot.len(),
            num_groups
        )));
    }

    let mut shuffled = pots.to_vec();
    for pot in shuffled.iter_mut() {
        rng.shuffle(pot);
    }

    let groups: Vec<Group> = (0..num_groups)
        .map(|i| shuffled.iter().filter_map(|pot| pot.get(i).cloned()).collect())
        .collect();

    check_one_per_pot(pots, &groups)?;
    for (i, group) in groups.iter().enumerate() {
        debug!("Group {}: {}", group_label(i), group.join(", "));
    }
    Ok(groups)
}

/// Every group must hold at most one team from each pot.
pub fn check_one_per_pot(pots: &[Pot], groups: &[Group]) -> SimResult<()> {
    let pot_of: HashMap<&str, usize> = pots
        .iter()
        .enumerate()
        .flat_map(|(p, pot)| pot.iter().map(move |t| (t.as_str(), p)))
        .collect();
    for (g, group) in groups.iter().enumerate() {
        let mut used = vec![false; pots.len()];
        for team in group {
            let p = *pot_of
                .get(team.as_str())
                .ok_or_else(|| SimError::malformed(format!("{} is not in any pot", team)))?;
            if used[p] {
                return Err(SimError::malformed(format!(
                    "group {} holds two teams from pot {}",
                    group_label(g),
                    p + 1
                )));
            }
            used[p] = true;
        }
    }
    Ok(())
}

/// "A", "B", ... for the first 26 groups, then numbers.
pub fn group_label(index: usize) -> String {
    if index < 26 {
        ((b'A' + index as u8) as char).to_string()
    } else {
        (index + 1).to_string()
    }
}
