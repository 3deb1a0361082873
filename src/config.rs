// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client configuration.

use std::time::Duration;

/// Configuration for a Modbus-TCP connection to an S21 unit.
///
/// This is a simple configuration struct that holds connection parameters.
/// The socket itself is opened lazily on the first poll or command.
///
/// # Examples
///
/// ```
/// use bls21::ClientConfig;
/// use std::time::Duration;
///
/// // Simple configuration
/// let config = ClientConfig::new("10.0.0.5");
///
/// // With all options
/// let config = ClientConfig::new("10.0.0.5")
///     .with_port(1502)
///     .with_unit_id(2)
///     .with_timeout(Duration::from_secs(3));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    host: String,
    port: u16,
    unit_id: u8,
    timeout: Duration,
}

impl ClientConfig {
    /// Default Modbus-TCP port.
    pub const DEFAULT_PORT: u16 = 502;
    /// Default Modbus unit identifier.
    pub const DEFAULT_UNIT_ID: u8 = 1;
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a new configuration for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the ventilation unit
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            unit_id: Self::DEFAULT_UNIT_ID,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets a custom Modbus unit identifier.
    #[must_use]
    pub fn with_unit_id(mut self, unit_id: u8) -> Self {
        self.unit_id = unit_id;
        self
    }

    /// Sets the per-request timeout.
    ///
    /// The timeout bounds the whole transaction: connecting (when the
    /// socket is not yet open), writing the request, and reading the
    /// response.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the Modbus unit identifier.
    #[must_use]
    pub fn unit_id(&self) -> u8 {
        self.unit_id
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = ClientConfig::new("10.0.0.5");
        assert_eq!(config.host(), "10.0.0.5");
        assert_eq!(config.port(), 502);
        assert_eq!(config.unit_id(), 1);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn config_builder_chain() {
        let config = ClientConfig::new("10.0.0.5")
            .with_port(1502)
            .with_unit_id(7)
            .with_timeout(Duration::from_millis(250));

        assert_eq!(config.port(), 1502);
        assert_eq!(config.unit_id(), 7);
        assert_eq!(config.timeout(), Duration::from_millis(250));
    }
}
