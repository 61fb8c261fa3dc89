use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::SimResult;
use crate::teams::{Confederation, TeamBook};

use super::Tally;

/// Per-team qualification odds over a finished batch
#[derive(Debug, Clone, Serialize)]
pub struct QualificationReport {
    pub generated_at: DateTime<Utc>,
    /// Seed the batch was run from; replaying it reproduces the report
    pub seed: u64,
    pub trials: u32,
    pub failed: u32,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub team: String,
    pub confederation: Confederation,
    pub ranking: u32,
    /// Trials in which the team qualified
    pub qualified: u32,
    /// Trials in which the team reached the inter-confederation playoff
    pub playoff: u32,
    /// Share of successful trials (0.0–1.0)
    pub qualify_probability: f64,
    pub playoff_probability: f64,
}

impl QualificationReport {
    /// One row per team in `members`, most frequent qualifiers first.
    pub fn build(
        book: &TeamBook,
        members: &[String],
        tally: &Tally,
        seed: u64,
    ) -> SimResult<QualificationReport> {
        let successful = tally.successful();
        let share = |n: u32| {
            if successful == 0 {
                0.0
            } else {
                n as f64 / successful as f64
            }
        };

        let mut rows = Vec::with_capacity(members.len());
        for name in members {
            let team = book.get(name)?;
            let qualified = tally.qualified_count(name);
            let playoff = tally.playoff_count(name);
            rows.push(ReportRow {
                team: team.name.clone(),
                confederation: team.confederation,
                ranking: team.ranking,
                qualified,
                playoff,
                qualify_probability: share(qualified),
                playoff_probability: share(playoff),
            });
        }
        rows.sort_by(|a, b| {
            b.qualified
                .cmp(&a.qualified)
                .then(b.playoff.cmp(&a.playoff))
                .then(a.ranking.cmp(&b.ranking))
                .then_with(|| a.team.cmp(&b.team))
        });

        Ok(QualificationReport {
            generated_at: Utc::now(),
            seed,
            trials: tally.trials,
            failed: tally.failed,
            rows,
        })
    }

    pub fn row(&self, team: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.team == team)
    }

    /// Plain-text table of the first `limit` rows (all rows when `None`).
    pub fn render_table(&self, limit: Option<usize>) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} trials, seed {}, {} failed, generated {}\n",
            self.trials,
            self.seed,
            self.failed,
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out.push_str(&format!(
            "{:<4} {:<28} {:<9} {:>5} {:>9} {:>9}\n",
            "#", "Team", "Conf", "Rank", "Qualify", "Playoff"
        ));
        let shown = limit.unwrap_or(self.rows.len());
        for (i, row) in self.rows.iter().take(shown).enumerate() {
            out.push_str(&format!(
                "{:<4} {:<28} {:<9} {:>5} {:>8.1}% {:>8.1}%\n",
                i + 1,
                row.team,
                row.confederation.as_str(),
                row.ranking,
                row.qualify_probability * 100.0,
                row.playoff_probability * 100.0
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confederations::PathOutcome;
    use crate::testing::{names, team};
    use approx::assert_relative_eq;

    fn book() -> TeamBook {
        TeamBook::new(vec![
            team("Japan", 80.0, 5.0, Confederation::Afc, 15),
            team("Iran", 78.0, 6.0, Confederation::Afc, 20),
            team("Guam", 10.0, 2.0, Confederation::Afc, 200),
        ])
        .unwrap()
    }

    fn tally() -> Tally {
        let mut tally = Tally::default();
        tally.record(&PathOutcome {
            qualified: names(&["Iran"]),
            playoff: names(&["Japan"]),
        });
        tally.record(&PathOutcome {
            qualified: names(&["Japan"]),
            playoff: names(&["Iran"]),
        });
        tally.record(&PathOutcome {
            qualified: names(&["Japan"]),
            playoff: vec![],
        });
        tally.record_failure();
        tally
    }

    #[test]
    fn rows_sorted_by_counts_then_ranking() {
        let book = book();
        let members = book.all_by_ranking();
        let report = QualificationReport::build(&book, &members, &tally(), 9).unwrap();
        let order: Vec<&str> = report.rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(order, vec!["Japan", "Iran", "Guam"]);
        assert_eq!(report.trials, 4);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn probabilities_use_successful_trials() {
        let book = book();
        let members = book.all_by_ranking();
        let report = QualificationReport::build(&book, &members, &tally(), 9).unwrap();
        let japan = report.row("Japan").unwrap();
        assert_relative_eq!(japan.qualify_probability, 2.0 / 3.0);
        assert_relative_eq!(japan.playoff_probability, 1.0 / 3.0);
        assert_relative_eq!(report.row("Guam").unwrap().qualify_probability, 0.0);
        assert!(report.row("Fiji").is_none());
    }

    #[test]
    fn empty_tally_reports_zero() {
        let book = book();
        let report =
            QualificationReport::build(&book, &names(&["Guam"]), &Tally::default(), 0).unwrap();
        assert_eq!(report.rows[0].qualify_probability, 0.0);
    }

    #[test]
    fn unknown_member_fails() {
        let book = book();
        assert!(QualificationReport::build(&book, &names(&["Fiji"]), &tally(), 0).is_err());
    }

    #[test]
    fn table_and_json_render() {
        let book = book();
        let members = book.all_by_ranking();
        let report = QualificationReport::build(&book, &members, &tally(), 9).unwrap();
        let table = report.render_table(Some(2));
        assert!(table.contains("Japan"));
        assert!(table.contains("66.7%"));
        assert!(!table.contains("Guam"));
        assert_eq!(table.lines().count(), 4);
        assert!(table.lines().nth(1).unwrap().starts_with("#"));
        assert!(table.lines().nth(2).unwrap().starts_with("1"));

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seed"], 9);
        assert_eq!(json["rows"][0]["team"], "Japan");
        assert_eq!(json["rows"][0]["confederation"], "AFC");
    }
}
