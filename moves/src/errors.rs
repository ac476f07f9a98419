use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Errors produced while storing or restoring move data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum MoveError {
    Io(String),
    Serialization(String),
}

impl Error for MoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MoveError::Io(ref msg) => write!(f, "IO error: {}", msg),
            MoveError::Serialization(ref msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}
