use std::fmt;

/// Result type for gridworld operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Main error type for the gridworld crate
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Invalid parameter value (hyperparameters, sizes, probabilities)
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// Coordinate lying outside the grid
    InvalidCoordinate {
        x: i32,
        y: i32,
        size: usize,
    },

    /// Malformed trap specification
    InvalidTrapSpec(String),

    /// State index not derivable from a coordinate of the grid
    StateOutOfRange {
        state: usize,
        n_states: usize,
    },

    /// Invalid action index
    InvalidAction {
        action: usize,
        max_actions: usize,
    },

    /// IO errors (file operations)
    IoError(String),

    /// Serialization/deserialization errors
    SerializationError(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            GridError::InvalidCoordinate { x, y, size } => {
                write!(f, "Coordinate ({},{}) lies outside a {}x{} grid", x, y, size, size)
            }
            GridError::InvalidTrapSpec(msg) => write!(f, "Invalid trap specification: {}", msg),
            GridError::StateOutOfRange { state, n_states } => {
                write!(f, "State {} out of range: must be less than {}", state, n_states)
            }
            GridError::InvalidAction { action, max_actions } => {
                write!(f, "Invalid action {}: must be less than {}", action, max_actions)
            }
            GridError::IoError(msg) => write!(f, "IO error: {}", msg),
            GridError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for GridError {}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        GridError::IoError(err.to_string())
    }
}

impl From<bincode::Error> for GridError {
    fn from(err: bincode::Error) -> Self {
        GridError::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::SerializationError(err.to_string())
    }
}

impl GridError {
    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        GridError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error stems from an invalid construction parameter
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GridError::InvalidParameter { .. }
                | GridError::InvalidCoordinate { .. }
                | GridError::InvalidTrapSpec(_)
        )
    }
}
