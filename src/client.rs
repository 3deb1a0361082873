// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for a single S21 unit.

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::config::ClientConfig;
use crate::device::DeviceSnapshot;
use crate::error::{Error, Result, ValueError};
use crate::protocol::registers;
use crate::transport::Connection;
use crate::types::{FanSpeed, HvacMode};

/// Client for one Blauberg S21 ventilation unit.
///
/// The client owns the Modbus-TCP connection and a cache of the last
/// successfully polled [`DeviceSnapshot`]. All transport operations are
/// serialized internally, so the client can be shared (e.g. behind an
/// `Arc`) between a periodic poller and command callers.
///
/// Commands never re-poll implicitly: after a successful setter the
/// cached snapshot still shows the pre-command state until the next
/// [`poll`](S21Client::poll).
///
/// # Examples
///
/// ```no_run
/// use bls21::{FanSpeed, HvacMode, S21Client};
///
/// #[tokio::main]
/// async fn main() -> bls21::Result<()> {
///     let client = S21Client::new("10.0.0.5", 502);
///
///     let device = client.poll().await?;
///     println!("current temperature: {} °C", device.current_temperature);
///
///     client.set_hvac_mode(HvacMode::Cool).await?;
///     client.set_fan_mode(FanSpeed::level(2)?).await?;
///     client.set_temperature(22).await?;
///
///     // Observe the effect of the writes.
///     client.poll().await?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct S21Client {
    connection: Mutex<Connection>,
    device: RwLock<Option<DeviceSnapshot>>,
}

impl S21Client {
    /// Creates a client for the unit at `host:port`.
    ///
    /// No I/O happens here; the connection opens on the first poll or
    /// command.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::with_config(ClientConfig::new(host).with_port(port))
    }

    /// Creates a client from an explicit configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            connection: Mutex::new(Connection::new(config)),
            device: RwLock::new(None),
        }
    }

    /// Returns the last successfully polled snapshot, if any.
    ///
    /// This is a synchronous read of the cache; it never touches the
    /// network. `None` until the first successful poll.
    #[must_use]
    pub fn device(&self) -> Option<DeviceSnapshot> {
        self.device.read().clone()
    }

    /// Polls the unit and replaces the cached snapshot.
    ///
    /// Reads the whole climate register block in one transaction and
    /// decodes it into a fresh snapshot. On any failure the previous
    /// snapshot is retained with its availability flipped to `false`,
    /// and the connection is closed so the next poll reconnects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] on transport loss, timeout, or a
    /// malformed response (callers may retry by polling again later),
    /// and [`Error::UnsupportedDevice`] if the device-type register is
    /// not a known S21 family value.
    pub async fn poll(&self) -> Result<DeviceSnapshot> {
        let mut connection = self.connection.lock().await;
        let result = match connection
            .read_holding_registers(registers::POLL_BASE, registers::POLL_COUNT)
            .await
        {
            Err(err) => Err(Error::Connection(err)),
            Ok(block) => match registers::decode_snapshot(&block) {
                Ok(snapshot) => Ok(snapshot),
                Err(err) => {
                    // A well-framed response with nonsense registers is
                    // still a malformed response; start over cleanly.
                    connection.close();
                    Err(err)
                }
            },
        };
        drop(connection);

        match result {
            Ok(snapshot) => {
                *self.device.write() = Some(snapshot.clone());
                Ok(snapshot)
            }
            Err(err) => {
                self.mark_unavailable(&err);
                Err(err)
            }
        }
    }

    /// Sets the operating mode.
    ///
    /// Validated against the supported-mode set of the last snapshot
    /// when one exists; with no snapshot yet the write is sent and the
    /// device arbitrates. The effect is only observable via a
    /// subsequent [`poll`](S21Client::poll).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`] if the mode is not supported, or
    /// [`Error::Connection`] on transport failure or when the device
    /// rejects the write with a Modbus exception.
    pub async fn set_hvac_mode(&self, mode: HvacMode) -> Result<()> {
        if let Some(device) = self.device() {
            if !device.hvac_modes.contains(&mode) {
                return Err(ValueError::UnsupportedMode(mode).into());
            }
        }

        tracing::debug!(%mode, "Setting HVAC mode");
        self.write_register(registers::REG_HVAC_MODE, mode.to_register())
            .await
    }

    /// Sets the fan speed.
    ///
    /// [`FanSpeed::CUSTOM`] is accepted only when the last snapshot
    /// reports continuous-speed capability (max fan level other than
    /// 3); discrete levels are checked against the reported maximum.
    /// With no snapshot yet the write is sent unchecked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`] if the speed fails validation, or
    /// [`Error::Connection`] on transport failure or device rejection.
    pub async fn set_fan_mode(&self, speed: FanSpeed) -> Result<()> {
        if let Some(device) = self.device() {
            if speed.is_custom() {
                if !device.supports_custom_fan_speed() {
                    return Err(ValueError::CustomSpeedUnsupported.into());
                }
            } else if speed.value() > device.max_fan_level {
                return Err(ValueError::FanSpeedOutOfRange {
                    max: device.max_fan_level,
                    actual: speed.value(),
                }
                .into());
            }
        }

        tracing::debug!(speed = %speed, "Setting fan speed");
        self.write_register(registers::REG_FAN_MODE, speed.to_register())
            .await
    }

    /// Sets the target temperature in whole °C.
    ///
    /// The device enforces its own min/max; out-of-range values may be
    /// clamped or rejected by firmware, so no range check is done here
    /// beyond the integer conversion the signature implies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] on transport failure or device
    /// rejection.
    pub async fn set_temperature(&self, celsius: i16) -> Result<()> {
        tracing::debug!(celsius, "Setting target temperature");
        self.write_register(
            registers::REG_TARGET_TEMPERATURE,
            u16::from_be_bytes(celsius.to_be_bytes()),
        )
        .await
    }

    /// Performs one single-register write transaction.
    ///
    /// Setters do not retry and do not touch the cached snapshot.
    async fn write_register(&self, address: u16, value: u16) -> Result<()> {
        let mut connection = self.connection.lock().await;
        connection
            .write_single_register(address, value)
            .await
            .map_err(Error::Connection)
    }

    /// Flips the cached snapshot to unavailable after a failed poll.
    ///
    /// The snapshot data itself is retained; only availability changes,
    /// and the replacement is still a whole-value swap.
    fn mark_unavailable(&self, err: &Error) {
        let mut guard = self.device.write();
        if let Some(snapshot) = guard.as_ref() {
            if snapshot.available {
                tracing::warn!(error = %err, "Poll failed, marking device unavailable");
                let mut stale = snapshot.clone();
                stale.available = false;
                *guard = Some(stale);
                return;
            }
        }
        tracing::warn!(error = %err, "Poll failed");
    }
}
