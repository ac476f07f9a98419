use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Errors raised outside the solvers themselves: configuration problems,
/// socket transport failures and malformed visualization packets. Solver
/// reachability problems are reported through the result error flags
/// instead, because a partially reachable pose still carries usable angles.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum StewartError {
    ConfigError(String),
    SocketError(String),
    PacketParseError(String),
}

impl Error for StewartError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl fmt::Display for StewartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StewartError::ConfigError(ref msg) => write!(f, "Configuration error: {}", msg),
            StewartError::SocketError(ref msg) => write!(f, "Socket error: {}", msg),
            StewartError::PacketParseError(ref msg) => write!(f, "Packet parse error: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_wrapped_message() {
        let error = StewartError::PacketParseError("bad magic".to_string());
        assert_eq!(error.to_string(), "Packet parse error: bad magic");

        let error = StewartError::SocketError("address in use".to_string());
        assert!(error.to_string().starts_with("Socket error:"));
    }
}
