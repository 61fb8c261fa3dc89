//! Fixtures shared by the unit tests.

use crate::teams::{Confederation, Team, TeamBook};

pub fn team(name: &str, rating: f64, home: f64, conf: Confederation, ranking: u32) -> Team {
    Team {
        name: name.to_string(),
        rating,
        home_advantage: home,
        confederation: conf,
        ranking,
    }
}

/// `count` synthetic teams named `{CONF}-{nn}`, ratings falling from 95 in
/// even steps and rankings starting at `first_ranking`.
pub fn synthetic_confederation(conf: Confederation, count: usize, first_ranking: u32) -> Vec<Team> {
    let step = if count > 1 { 85.0 / (count - 1) as f64 } else { 0.0 };
    (0..count)
        .map(|i| {
            team(
                &format!("{}-{:02}", conf, i + 1),
                95.0 - step * i as f64,
                5.0,
                conf,
                first_ranking + i as u32,
            )
        })
        .collect()
}

pub fn book_of(conf: Confederation, count: usize) -> TeamBook {
    TeamBook::new(synthetic_confederation(conf, count, 1)).unwrap()
}

/// A full 211-team world with confederation sizes matching the 2026 cycle.
/// CONCACAF includes the three hosts (Canada, USA, Mexico) as its top teams.
pub fn world_book() -> TeamBook {
    let mut teams = Vec::new();
    let sizes = [
        (Confederation::Afc, 46),
        (Confederation::Caf, 54),
        (Confederation::Conmebol, 10),
        (Confederation::Ofc, 11),
        (Confederation::Uefa, 54),
    ];
    let mut ranking = 1;
    for (conf, count) in sizes {
        teams.extend(synthetic_confederation(conf, count, ranking));
        ranking += count as u32;
    }
    for (i, host) in ["Canada", "USA", "Mexico"].iter().enumerate() {
        teams.push(team(host, 80.0, 6.0, Confederation::Concacaf, ranking + i as u32));
    }
    ranking += 3;
    teams.extend(synthetic_confederation(Confederation::Concacaf, 32, ranking));
    TeamBook::new(teams).unwrap()
}

pub fn names(teams: &[&str]) -> Vec<String> {
    teams.iter().map(|t| t.to_string()).collect()
}
