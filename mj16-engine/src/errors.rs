use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MahjongError {
    /// Discard or claim index outside the concealed tiles
    InvalidIndex { index: usize, len: usize },
    /// Submission that the current phase or seat does not accept
    IllegalAction { message: String },
    /// Draw attempted on an exhausted wall
    EmptyWall,
    /// Tile notation parse error
    Parse { input: String, message: String },
    /// Event log serialization failure
    Serialization { message: String },
    /// Tile conservation check failed
    InvariantViolation { message: String },
}

impl MahjongError {
    pub fn illegal(message: impl Into<String>) -> Self {
        MahjongError::IllegalAction {
            message: message.into(),
        }
    }
}

impl fmt::Display for MahjongError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MahjongError::InvalidIndex { index, len } => {
                write!(f, "Invalid index {} (hand holds {} tiles)", index, len)
            }
            MahjongError::IllegalAction { message } => {
                write!(f, "Illegal action: {}", message)
            }
            MahjongError::EmptyWall => write!(f, "Wall is empty"),
            MahjongError::Parse { input, message } => {
                write!(f, "Parse error on '{}': {}", input, message)
            }
            MahjongError::Serialization { message } => {
                write!(f, "Serialization error: {}", message)
            }
            MahjongError::InvariantViolation { message } => {
                write!(f, "Invariant violated: {}", message)
            }
        }
    }
}

impl std::error::Error for MahjongError {}

impl From<serde_json::Error> for MahjongError {
    fn from(err: serde_json::Error) -> Self {
        MahjongError::Serialization {
            message: err.to_string(),
        }
    }
}

pub type MahjongResult<T> = Result<T, MahjongError>;
