// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HVAC mode and action enums with their register codecs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// User-requested operating mode of the unit.
///
/// This is the value written to (and read back from) the mode register.
/// It is distinct from [`HvacAction`], which is what the unit reports it
/// is currently doing.
///
/// # Examples
///
/// ```
/// use bls21::HvacMode;
///
/// let mode = HvacMode::from_register(2).unwrap();
/// assert_eq!(mode, HvacMode::Cool);
/// assert_eq!(mode.to_register(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HvacMode {
    /// Unit is switched off.
    Off,
    /// Heating mode.
    Heat,
    /// Cooling mode.
    Cool,
    /// Automatic mode; the unit picks heating or cooling itself.
    Auto,
    /// Ventilation only, no heat exchange.
    FanOnly,
}

impl HvacMode {
    /// All modes an S21 unit supports.
    pub const ALL: [Self; 5] = [Self::Off, Self::Heat, Self::Cool, Self::Auto, Self::FanOnly];

    /// Encodes this mode as its raw register value.
    #[must_use]
    pub const fn to_register(self) -> u16 {
        match self {
            Self::Off => 0,
            Self::Heat => 1,
            Self::Cool => 2,
            Self::Auto => 3,
            Self::FanOnly => 4,
        }
    }

    /// Decodes a raw register value into a mode.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidEnumValue` for values outside 0-4.
    pub const fn from_register(raw: u16) -> Result<Self, ProtocolError> {
        match raw {
            0 => Ok(Self::Off),
            1 => Ok(Self::Heat),
            2 => Ok(Self::Cool),
            3 => Ok(Self::Auto),
            4 => Ok(Self::FanOnly),
            value => Err(ProtocolError::InvalidEnumValue {
                field: "HVAC mode",
                value,
            }),
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Heat => "heat",
            Self::Cool => "cool",
            Self::Auto => "auto",
            Self::FanOnly => "fan_only",
        };
        f.write_str(name)
    }
}

/// Activity the unit currently reports, distinct from the requested mode.
///
/// A unit in [`HvacMode::Auto`] may report any action depending on what
/// it decided to do; a unit in [`HvacMode::Heat`] that has reached its
/// target reports [`HvacAction::Idle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HvacAction {
    /// Unit is switched off.
    Off,
    /// Unit is on but not moving air or exchanging heat.
    Idle,
    /// Actively heating.
    Heating,
    /// Actively cooling.
    Cooling,
    /// Moving air without heat exchange.
    Fan,
}

impl HvacAction {
    /// Encodes this action as its raw register value.
    #[must_use]
    pub const fn to_register(self) -> u16 {
        match self {
            Self::Off => 0,
            Self::Idle => 1,
            Self::Heating => 2,
            Self::Cooling => 3,
            Self::Fan => 4,
        }
    }

    /// Decodes a raw register value into an action.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidEnumValue` for values outside 0-4.
    pub const fn from_register(raw: u16) -> Result<Self, ProtocolError> {
        match raw {
            0 => Ok(Self::Off),
            1 => Ok(Self::Idle),
            2 => Ok(Self::Heating),
            3 => Ok(Self::Cooling),
            4 => Ok(Self::Fan),
            value => Err(ProtocolError::InvalidEnumValue {
                field: "HVAC action",
                value,
            }),
        }
    }
}

impl fmt::Display for HvacAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Idle => "idle",
            Self::Heating => "heating",
            Self::Cooling => "cooling",
            Self::Fan => "fan",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_register_codec_is_a_bijection() {
        for mode in HvacMode::ALL {
            assert_eq!(HvacMode::from_register(mode.to_register()).unwrap(), mode);
        }
    }

    #[test]
    fn mode_rejects_unknown_register_values() {
        let err = HvacMode::from_register(5).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::InvalidEnumValue {
                field: "HVAC mode",
                value: 5,
            }
        );
        assert!(HvacMode::from_register(0xFFFF).is_err());
    }

    #[test]
    fn action_register_codec_is_a_bijection() {
        for raw in 0..=4 {
            let action = HvacAction::from_register(raw).unwrap();
            assert_eq!(action.to_register(), raw);
        }
    }

    #[test]
    fn action_rejects_unknown_register_values() {
        assert!(HvacAction::from_register(5).is_err());
    }

    #[test]
    fn mode_display() {
        assert_eq!(HvacMode::FanOnly.to_string(), "fan_only");
        assert_eq!(HvacAction::Heating.to_string(), "heating");
    }
}
