use clap::Parser;

use wcq_sim::{Confederation, Scope, TeamBook};

/// Monte Carlo World Cup qualifying simulator
#[derive(Parser, Debug, Clone)]
#[command(name = "wcq-sim", version, about)]
pub struct Config {
    /// Team reference CSV (Team,Rating,Home,Confederation,Ranking)
    #[arg(long, env = "TEAMS_CSV", default_value = "teams.csv")]
    pub teams: String,

    /// Number of independent trials
    #[arg(long, env = "TRIALS", default_value = "1000")]
    pub trials: u32,

    /// Base seed; drawn at random when omitted and printed with the results
    #[arg(long, env = "SEED")]
    pub seed: Option<u64>,

    /// "all" for the full tournament, or one confederation (afc, caf, ...)
    #[arg(long, env = "SCOPE", default_value = "all")]
    pub scope: Scope,

    /// Host nations, comma separated. Hosts qualify automatically.
    #[arg(
        long,
        env = "HOSTS",
        value_delimiter = ',',
        default_value = "Canada,USA,Mexico"
    )]
    pub hosts: Vec<String>,

    /// Move a team to another confederation, e.g. "Australia:OFC"
    #[arg(long, env = "REASSIGN")]
    pub reassign: Option<String>,

    /// Team whose odds are logged after the run
    #[arg(long, env = "FOCUS")]
    pub focus: Option<String>,

    /// Only print the first N rows of the table
    #[arg(long)]
    pub top: Option<usize>,

    /// Run trials on one thread
    #[arg(long, env = "SEQUENTIAL", default_value = "false")]
    pub sequential: bool,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.trials == 0 {
            anyhow::bail!("trials must be at least 1");
        }
        if self.hosts.iter().any(|h| h.trim().is_empty()) {
            anyhow::bail!("hosts must not contain empty names");
        }
        if self.top == Some(0) {
            anyhow::bail!("top must be at least 1");
        }
        self.reassignment()?;
        Ok(())
    }

    /// `--reassign TEAM:CONF` split into its parts.
    pub fn reassignment(&self) -> anyhow::Result<Option<(String, Confederation)>> {
        let Some(value) = &self.reassign else {
            return Ok(None);
        };
        let Some((team, conf)) = value.rsplit_once(':') else {
            anyhow::bail!("reassign must look like TEAM:CONF, got '{}'", value);
        };
        let team = team.trim();
        if team.is_empty() {
            anyhow::bail!("reassign is missing a team name: '{}'", value);
        }
        let conf = conf.parse::<Confederation>().map_err(anyhow::Error::msg)?;
        Ok(Some((team.to_string(), conf)))
    }

    /// Checks against the loaded book that can't happen at parse time.
    pub fn check_focus(&self, book: &TeamBook) -> anyhow::Result<()> {
        if let Some(focus) = &self.focus {
            if !book.contains(focus) {
                anyhow::bail!("focus team '{}' is not in {}", focus, self.teams);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("wcq-sim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.trials, 1000);
        assert_eq!(config.scope, Scope::All);
        assert_eq!(config.hosts, vec!["Canada", "USA", "Mexico"]);
        assert!(!config.sequential);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn scope_and_hosts_parse() {
        let config = parse(&["--scope", "uefa", "--hosts", "Qatar"]);
        assert_eq!(config.scope, Scope::Only(Confederation::Uefa));
        assert_eq!(config.hosts, vec!["Qatar"]);
        assert!(Config::try_parse_from(["wcq-sim", "--scope", "fifa"]).is_err());
    }

    #[test]
    fn zero_trials_rejected() {
        assert!(parse(&["--trials", "0"]).validate().is_err());
    }

    #[test]
    fn reassign_parses_team_and_confederation() {
        let config = parse(&["--reassign", "Australia:ofc"]);
        assert_eq!(
            config.reassignment().unwrap(),
            Some(("Australia".to_string(), Confederation::Ofc))
        );
        assert_eq!(parse(&[]).reassignment().unwrap(), None);
    }

    #[test]
    fn malformed_reassign_rejected() {
        assert!(parse(&["--reassign", "Australia"]).validate().is_err());
        assert!(parse(&["--reassign", "Australia:FIFA"]).validate().is_err());
        assert!(parse(&["--reassign", ":OFC"]).validate().is_err());
    }

    #[test]
    fn unknown_focus_rejected() {
        let book = wcq_sim::teams::load_teams_from_reader(
            "Team,Rating,Home,Confederation,Ranking\nFiji,30,4,OFC,150\n".as_bytes(),
        )
        .unwrap();
        assert!(parse(&["--focus", "Fiji"]).check_focus(&book).is_ok());
        assert!(parse(&["--focus", "Tahiti"]).check_focus(&book).is_err());
    }
}
