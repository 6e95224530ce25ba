use std::fmt;
use std::io;

/// Fatal errors while running a simulation. None of these are retried.
#[derive(Debug)]
pub enum SimulationError {
    /// The OS entropy source could not seed the generator.
    Entropy(getrandom::Error),
    Serialize(serde_json::Error),
    Io(io::Error),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entropy(err) => write!(f, "failed to gather entropy: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize summary: {err}"),
            Self::Io(err) => write!(f, "failed to write output: {err}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Entropy(_) => None,
            Self::Serialize(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

impl From<io::Error> for SimulationError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
