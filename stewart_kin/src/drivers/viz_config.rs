use serde::{Deserialize, Serialize};
use std::net::ToSocketAddrs;

use crate::packets::VIZ_PORT;

/// ```rust,ignore
/// // Create a new configuration with a DNS name or IP address
/// let config = VizConfig::new("example.com".to_string(), 9001, 30);
/// let config = VizConfig::new("127.0.0.1".to_string(), 9001, 30);
///
/// // Validate the configuration
/// if let Err(e) = config.validate() {
///     println!("Configuration error: {}", e);
///     return;
/// }
///
/// // Resolve the address to a socket address string
/// match config.resolve() {
///     Ok(resolved_address) => {
///         println!("Resolved address: {}", resolved_address);
///         // Now you can bind a UDP socket and start sending poses
///     }
///     Err(e) => {
///         println!("Failed to resolve address: {}", e);
///     }
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VizConfig {
    pub addr: String,
    pub port: u32,
    pub channel_capacity: usize,
}

impl VizConfig {
    pub fn new(addr: String, port: u32, channel_capacity: usize) -> Self {
        Self {
            addr,
            port,
            channel_capacity,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.addr.is_empty() {
            return Err("Address cannot be empty.".to_string());
        }
        if self.port == 0 || self.port > u16::MAX as u32 {
            return Err("Port number must fit in 16 bits and be greater than 0.".to_string());
        }
        if self.channel_capacity == 0 {
            return Err("Channel capacity must be greater than 0.".to_string());
        }
        Ok(())
    }

    /// Generates an endpoint string from the address and port.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }

    /// Resolves the address to a socket address if possible.
    ///
    /// Returns the resolved address as a `String`, or an error message if it cannot be resolved.
    pub fn resolve(&self) -> Result<String, String> {
        resolve_address(&self.addr, self.port)
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1".to_string(),
            port: VIZ_PORT as u32,
            channel_capacity: 30,
        }
    }
}

/// Resolves a DNS name or IP address to a socket address.
///
/// Returns the resolved address as a `String`, or an error message if it cannot be resolved.
fn resolve_address(addr: &str, port: u32) -> Result<String, String> {
    let address_with_port = format!("{}:{}", addr, port);
    match address_with_port.to_socket_addrs() {
        Ok(mut iter) => match iter.next() {
            Some(socket_addr) => Ok(socket_addr.to_string()),
            None => Err("Could not resolve address".to_string()),
        },
        Err(_) => Err("Invalid address format".to_string()),
    }
}
