// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed type.
//!
//! S21 units come in two flavors: three-level units whose fan runs at
//! low/medium/high, and continuous units that accept any discrete level
//! up to their reported maximum plus a "custom" sentinel (255) meaning
//! the speed is driven by the unit's own continuous control.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ValueError};

/// Raw register value of the custom-speed sentinel.
const CUSTOM_RAW: u8 = 255;

/// Fan level on which a three-level unit maps names onto levels.
const THREE_LEVEL_MAX: u8 = 3;

/// A fan speed: a discrete level starting at 1, or the custom sentinel.
///
/// # Examples
///
/// ```
/// use bls21::FanSpeed;
///
/// let medium = FanSpeed::level(2).unwrap();
/// assert_eq!(medium.value(), 2);
/// assert_eq!(medium.label(3), "medium");
/// assert_eq!(medium.label(8), "2");
///
/// assert!(FanSpeed::CUSTOM.is_custom());
/// assert!(FanSpeed::level(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FanSpeed(u8);

impl FanSpeed {
    /// The custom/continuous speed sentinel (raw value 255).
    pub const CUSTOM: Self = Self(CUSTOM_RAW);

    /// Creates a discrete fan level.
    ///
    /// Whether the level is within the device's supported range is only
    /// known from the last polled snapshot; that check happens in the
    /// client when the command is sent.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidFanSpeed` for 0 and for the reserved
    /// sentinel value 255 (use [`FanSpeed::CUSTOM`] for that).
    pub const fn level(value: u8) -> Result<Self, ValueError> {
        match value {
            0 | CUSTOM_RAW => Err(ValueError::InvalidFanSpeed(value)),
            _ => Ok(Self(value)),
        }
    }

    /// Returns the raw value (1-254, or 255 for custom).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns true if this is the custom-speed sentinel.
    #[must_use]
    pub const fn is_custom(self) -> bool {
        self.0 == CUSTOM_RAW
    }

    /// Encodes this speed as its raw register value.
    #[must_use]
    pub const fn to_register(self) -> u16 {
        self.0 as u16
    }

    /// Decodes a raw register value into a fan speed.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidEnumValue` for 0 or values above
    /// 255; the device never reports those.
    #[allow(clippy::cast_possible_truncation)] // range-checked before the cast
    pub const fn from_register(raw: u16) -> Result<Self, ProtocolError> {
        match raw {
            1..=255 => Ok(Self(raw as u8)),
            value => Err(ProtocolError::InvalidEnumValue {
                field: "fan speed",
                value,
            }),
        }
    }

    /// Returns the user-facing label for this speed.
    ///
    /// Three-level units name their levels; continuous units expose the
    /// raw number. The custom sentinel is always labelled `custom`.
    #[must_use]
    pub fn label(self, max_fan_level: u8) -> String {
        if self.is_custom() {
            return "custom".to_string();
        }
        if max_fan_level == THREE_LEVEL_MAX {
            match self.0 {
                1 => return "low".to_string(),
                2 => return "medium".to_string(),
                3 => return "high".to_string(),
                _ => {}
            }
        }
        self.0.to_string()
    }

    /// Returns the supported speed set for a unit with the given maximum
    /// fan level.
    ///
    /// Three-level units support exactly low/medium/high; any other
    /// maximum indicates continuous capability, which adds the custom
    /// sentinel on top of the discrete levels.
    #[must_use]
    pub fn supported(max_fan_level: u8) -> Vec<Self> {
        let mut speeds: Vec<Self> = (1..=max_fan_level.min(254)).map(Self).collect();
        if max_fan_level != THREE_LEVEL_MAX {
            speeds.push(Self::CUSTOM);
        }
        speeds
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_custom() {
            f.write_str("custom")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl TryFrom<u8> for FanSpeed {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value == CUSTOM_RAW {
            Ok(Self::CUSTOM)
        } else {
            Self::level(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_rejects_zero_and_sentinel() {
        assert_eq!(
            FanSpeed::level(0).unwrap_err(),
            ValueError::InvalidFanSpeed(0)
        );
        assert_eq!(
            FanSpeed::level(255).unwrap_err(),
            ValueError::InvalidFanSpeed(255)
        );
    }

    #[test]
    fn try_from_accepts_sentinel() {
        assert_eq!(FanSpeed::try_from(255).unwrap(), FanSpeed::CUSTOM);
        assert_eq!(FanSpeed::try_from(2).unwrap().value(), 2);
        assert!(FanSpeed::try_from(0).is_err());
    }

    #[test]
    fn register_codec_roundtrip() {
        for raw in [1u16, 2, 3, 17, 254, 255] {
            let speed = FanSpeed::from_register(raw).unwrap();
            assert_eq!(speed.to_register(), raw);
        }
        assert!(FanSpeed::from_register(0).is_err());
        assert!(FanSpeed::from_register(256).is_err());
    }

    #[test]
    fn three_level_labels() {
        assert_eq!(FanSpeed::level(1).unwrap().label(3), "low");
        assert_eq!(FanSpeed::level(2).unwrap().label(3), "medium");
        assert_eq!(FanSpeed::level(3).unwrap().label(3), "high");
        assert_eq!(FanSpeed::CUSTOM.label(3), "custom");
    }

    #[test]
    fn continuous_labels_are_numeric() {
        assert_eq!(FanSpeed::level(2).unwrap().label(8), "2");
        assert_eq!(FanSpeed::level(8).unwrap().label(8), "8");
        assert_eq!(FanSpeed::CUSTOM.label(8), "custom");
    }

    #[test]
    fn supported_set_three_level() {
        let speeds = FanSpeed::supported(3);
        assert_eq!(speeds.len(), 3);
        assert!(!speeds.contains(&FanSpeed::CUSTOM));
    }

    #[test]
    fn supported_set_continuous_includes_custom() {
        let speeds = FanSpeed::supported(8);
        assert_eq!(speeds.len(), 9);
        assert!(speeds.contains(&FanSpeed::CUSTOM));
        assert_eq!(speeds[0].value(), 1);
        assert_eq!(speeds[7].value(), 8);
    }

    #[test]
    fn display() {
        assert_eq!(FanSpeed::level(5).unwrap().to_string(), "5");
        assert_eq!(FanSpeed::CUSTOM.to_string(), "custom");
    }
}
