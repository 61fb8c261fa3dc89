use thiserror::Error;

/// Failures raised by the simulation core.
///
/// None of these are transient: they are contract violations in the input
/// (bad team data, a bracket asking for more teams than it was given) and
/// abort the trial they occur in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("Unknown team: {name}")]
    UnknownTeam { name: String },

    #[error("Duplicate team in reference data: {name}")]
    DuplicateTeam { name: String },

    #[error("Malformed pot or group: {reason}")]
    MalformedPot { reason: String },

    #[error("Insufficient teams for {stage}: needed {needed}, got {available}")]
    InsufficientTeams {
        stage: String,
        needed: usize,
        available: usize,
    },
}

impl SimError {
    pub fn unknown_team(name: &str) -> Self {
        SimError::UnknownTeam {
            name: name.to_string(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        SimError::MalformedPot {
            reason: reason.into(),
        }
    }

    pub fn insufficient(stage: impl Into<String>, needed: usize, available: usize) -> Self {
        SimError::InsufficientTeams {
            stage: stage.into(),
            needed,
            available,
        }
    }
}

pub type SimResult<T> = std::result::Result<T, SimError>;
