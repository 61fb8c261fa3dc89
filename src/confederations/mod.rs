pub mod afc;
pub mod caf;
pub mod concacaf;
pub mod conmebol;
pub mod intercontinental;
pub mod ofc;
pub mod path;
pub mod uefa;

pub use afc::Afc;
pub use caf::Caf;
pub use concacaf::Concacaf;
pub use conmebol::Conmebol;
pub use intercontinental::IntercontinentalPlayoff;
pub use ofc::Ofc;
pub use path::{PathOutcome, QualifyingPath};
pub use uefa::Uefa;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::engine::RandomSource;
use crate::error::{SimError, SimResult};
use crate::teams::{Confederation, TeamBook};

/// Order the paths are played in a full tournament.
const PATH_ORDER: [Confederation; 6] = [
    Confederation::Concacaf,
    Confederation::Conmebol,
    Confederation::Uefa,
    Confederation::Caf,
    Confederation::Afc,
    Confederation::Ofc,
];

pub const DEFAULT_HOSTS: [&str; 3] = ["Canada", "USA", "Mexico"];

/// Run one confederation's qualifying path on `entrants`.
pub fn run_confederation<R: RandomSource>(
    conf: Confederation,
    book: &TeamBook,
    entrants: &[String],
    rng: &mut R,
) -> SimResult<PathOutcome> {
    match conf {
        Confederation::Afc => Afc.simulate(book, entrants, rng),
        Confederation::Caf => Caf.simulate(book, entrants, rng),
        Confederation::Concacaf => Concacaf.simulate(book, entrants, rng),
        Confederation::Conmebol => Conmebol.simulate(book, entrants, rng),
        Confederation::Ofc => Ofc.simulate(book, entrants, rng),
        Confederation::Uefa => Uefa.simulate(book, entrants, rng),
    }
}

// ── Full tournament ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorldCupOutcome {
    /// Hosts, then every path's qualifiers, then the playoff winners.
    pub qualified: Vec<String>,
    /// The six teams that contested the inter-confederation playoff.
    pub playoff: Vec<String>,
}

impl From<WorldCupOutcome> for PathOutcome {
    fn from(outcome: WorldCupOutcome) -> Self {
        PathOutcome {
            qualified: outcome.qualified,
            playoff: outcome.playoff,
        }
    }
}

/// Every confederation's qualifying path plus the inter-confederation
/// playoff. Hosts qualify automatically and sit out their confederation's
/// path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldCup {
    pub hosts: Vec<String>,
}

impl Default for WorldCup {
    fn default() -> Self {
        WorldCup::new(DEFAULT_HOSTS.iter().map(|h| h.to_string()).collect())
    }
}

impl WorldCup {
    pub fn new(hosts: Vec<String>) -> Self {
        WorldCup { hosts }
    }

    /// Fails on a host missing from the book or listed twice.
    pub fn validate_hosts(&self, book: &TeamBook) -> SimResult<()> {
        for (i, host) in self.hosts.iter().enumerate() {
            book.get(host)?;
            if self.hosts[..i].contains(host) {
                return Err(SimError::malformed(format!("host '{}' listed twice", host)));
            }
        }
        Ok(())
    }

    pub fn simulate<R: RandomSource>(
        &self,
        book: &TeamBook,
        rng: &mut R,
    ) -> SimResult<WorldCupOutcome> {
        self.validate_hosts(book)?;
        let mut qualified = self.hosts.clone();
        let mut playoff = Vec::new();

        for conf in PATH_ORDER {
            let entrants = book.members_excluding(conf, &self.hosts);
            let outcome = run_confederation(conf, book, &entrants, rng)?;
            qualified.extend(outcome.qualified);
            playoff.extend(outcome.playoff);
        }

        let winners = IntercontinentalPlayoff.simulate(book, &playoff, rng)?;
        debug!("Inter-confederation playoff: {:?} qualify", winners);
        qualified.extend(winners);

        Ok(WorldCupOutcome { qualified, playoff })
    }
}

// ── Scope ───────────────────────────────────────────────────────────────────

/// Which part of qualifying a trial plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Only(Confederation),
}

impl Scope {
    pub fn simulate<R: RandomSource>(
        &self,
        book: &TeamBook,
        world_cup: &WorldCup,
        rng: &mut R,
    ) -> SimResult<PathOutcome> {
        match self {
            Scope::All => world_cup.simulate(book, rng).map(PathOutcome::from),
            Scope::Only(conf) => {
                let entrants = book.members_excluding(*conf, &world_cup.hosts);
                run_confederation(*conf, book, &entrants, rng)
            }
        }
    }

    /// Teams that can appear in this scope's results, by ranking.
    pub fn members(&self, book: &TeamBook, hosts: &[String]) -> Vec<String> {
        match self {
            Scope::All => book.all_by_ranking(),
            Scope::Only(conf) => book.members_excluding(*conf, hosts),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => f.write_str("all"),
            Scope::Only(conf) => write!(f, "{}", conf),
        }
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Scope::All)
        } else {
            s.parse().map(Scope::Only)
        }
    }
}
