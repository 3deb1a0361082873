// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{FanSpeed, HvacAction, HvacMode};

/// Immutable state of an S21 unit captured by one successful poll.
///
/// A snapshot is only ever replaced wholesale: the client swaps in a new
/// one after a fully decoded poll response and never merges fields from
/// different polls. A failed poll leaves the last snapshot in place with
/// `available` flipped to `false`.
///
/// # Examples
///
/// ```no_run
/// use bls21::S21Client;
///
/// # async fn example() -> bls21::Result<()> {
/// let client = S21Client::new("10.0.0.5", 502);
/// client.poll().await?;
///
/// if let Some(device) = client.device() {
///     println!("{} is set to {}", device.name, device.hvac_mode);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// Whether the unit was reachable at the last poll attempt.
    pub available: bool,
    /// Human-readable device name.
    pub name: String,
    /// Stable identifier derived from the unit's serial number.
    pub unique_id: String,
    /// Device manufacturer.
    pub manufacturer: String,
    /// Device model.
    pub model: String,
    /// Firmware version as reported by the unit.
    pub sw_version: String,
    /// Current air temperature in °C (0.1 °C resolution).
    pub current_temperature: f32,
    /// Target temperature in whole °C.
    pub target_temperature: i16,
    /// Step between selectable target temperatures, in °C.
    pub target_temperature_step: f32,
    /// Lowest selectable target temperature in °C.
    pub min_temp: i16,
    /// Highest selectable target temperature in °C.
    pub max_temp: i16,
    /// Current relative humidity in percent.
    pub current_humidity: u8,
    /// Resolution of reported temperatures, in °C.
    pub precision: f32,
    /// Requested operating mode.
    pub hvac_mode: HvacMode,
    /// Activity the unit currently reports.
    pub hvac_action: HvacAction,
    /// Operating modes the unit supports.
    pub hvac_modes: Vec<HvacMode>,
    /// Current fan speed.
    pub fan_mode: FanSpeed,
    /// Fan speeds the unit supports.
    pub fan_modes: Vec<FanSpeed>,
    /// Highest discrete fan level. 3 means a named low/medium/high unit;
    /// anything else means continuous-speed capability.
    pub max_fan_level: u8,
    /// Whether boost ventilation is currently active.
    pub is_boosting: bool,
    /// When this snapshot was captured.
    pub polled_at: DateTime<Utc>,
}

impl DeviceSnapshot {
    /// Returns true if the unit accepts the custom fan speed sentinel.
    #[must_use]
    pub fn supports_custom_fan_speed(&self) -> bool {
        self.max_fan_level != 3
    }

    /// Returns the user-facing label of the current fan speed.
    #[must_use]
    pub fn fan_mode_label(&self) -> String {
        self.fan_mode.label(self.max_fan_level)
    }
}
