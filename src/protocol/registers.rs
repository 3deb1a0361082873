// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The S21 holding-register map.
//!
//! One poll reads the whole climate-relevant block (registers 0-15) in a
//! single transaction; commands write single registers inside it.
//! Temperatures that need sub-degree resolution are fixed-point in
//! tenths of a degree.

use chrono::Utc;

use crate::device::DeviceSnapshot;
use crate::error::Error;
use crate::types::{FanSpeed, HvacAction, HvacMode};

/// First register of the polled block.
pub const POLL_BASE: u16 = 0;

/// Number of registers in the polled block.
pub const POLL_COUNT: u16 = 16;

/// Device type / family identifier.
pub const REG_DEVICE_TYPE: u16 = 0;
/// Firmware version, major part.
pub const REG_FIRMWARE_MAJOR: u16 = 1;
/// Firmware version, minor part.
pub const REG_FIRMWARE_MINOR: u16 = 2;
/// Requested HVAC mode; write target for mode commands.
pub const REG_HVAC_MODE: u16 = 3;
/// Reported HVAC action (read-only).
pub const REG_HVAC_ACTION: u16 = 4;
/// Current fan speed; write target for fan commands.
pub const REG_FAN_MODE: u16 = 5;
/// Highest discrete fan level.
pub const REG_MAX_FAN_LEVEL: u16 = 6;
/// Target temperature in whole °C; write target for temperature commands.
pub const REG_TARGET_TEMPERATURE: u16 = 7;
/// Current temperature in tenths of °C (signed).
pub const REG_CURRENT_TEMPERATURE: u16 = 8;
/// Current relative humidity in percent.
pub const REG_CURRENT_HUMIDITY: u16 = 9;
/// Boost ventilation flag.
pub const REG_BOOST: u16 = 10;
/// Lowest selectable target temperature in whole °C.
pub const REG_MIN_TEMPERATURE: u16 = 11;
/// Highest selectable target temperature in whole °C.
pub const REG_MAX_TEMPERATURE: u16 = 12;
/// Target temperature step in tenths of °C.
pub const REG_TEMPERATURE_STEP: u16 = 13;
/// Serial number, high word.
pub const REG_SERIAL_HIGH: u16 = 14;
/// Serial number, low word.
pub const REG_SERIAL_LOW: u16 = 15;

/// Device-type register value of the S21 family.
pub const DEVICE_TYPE_S21: u16 = 0x0001;

/// Resolution of reported temperatures, in °C.
const TEMPERATURE_PRECISION: f32 = 0.1;

const MANUFACTURER: &str = "Blauberg Ventilatoren";
const MODEL: &str = "S21";
const NAME: &str = "Blauberg S21";

/// Reads a register out of the polled block by absolute address.
fn reg(registers: &[u16], address: u16) -> u16 {
    registers[usize::from(address - POLL_BASE)]
}

#[allow(clippy::cast_possible_wrap)] // registers carry signed values as two's complement
const fn as_i16(raw: u16) -> i16 {
    raw as i16
}

#[allow(clippy::cast_possible_truncation)]
const fn low_byte(raw: u16) -> u8 {
    raw as u8
}

/// Decodes a polled register block into a fresh snapshot.
///
/// The block must be exactly [`POLL_COUNT`] registers starting at
/// [`POLL_BASE`]; the transport guarantees that before calling in here.
///
/// # Errors
///
/// Returns `Error::UnsupportedDevice` if the device-type register is not
/// a known S21 family value, or a protocol error (as a connection error)
/// if an enum register carries an unknown value.
///
/// # Panics
///
/// Panics if `registers` is shorter than [`POLL_COUNT`].
pub fn decode_snapshot(registers: &[u16]) -> Result<DeviceSnapshot, Error> {
    assert!(registers.len() >= usize::from(POLL_COUNT));

    let device_type = reg(registers, REG_DEVICE_TYPE);
    if device_type != DEVICE_TYPE_S21 {
        return Err(Error::UnsupportedDevice { device_type });
    }

    let hvac_mode = HvacMode::from_register(reg(registers, REG_HVAC_MODE))?;
    let hvac_action = HvacAction::from_register(reg(registers, REG_HVAC_ACTION))?;
    let fan_mode = FanSpeed::from_register(reg(registers, REG_FAN_MODE))?;
    let max_fan_level = low_byte(reg(registers, REG_MAX_FAN_LEVEL));

    let serial = (u32::from(reg(registers, REG_SERIAL_HIGH)) << 16)
        | u32::from(reg(registers, REG_SERIAL_LOW));

    Ok(DeviceSnapshot {
        available: true,
        name: NAME.to_string(),
        unique_id: format!("bls21-{serial:08x}"),
        manufacturer: MANUFACTURER.to_string(),
        model: MODEL.to_string(),
        sw_version: format!(
            "{}.{}",
            reg(registers, REG_FIRMWARE_MAJOR),
            reg(registers, REG_FIRMWARE_MINOR)
        ),
        current_temperature: f32::from(as_i16(reg(registers, REG_CURRENT_TEMPERATURE)))
            * TEMPERATURE_PRECISION,
        target_temperature: as_i16(reg(registers, REG_TARGET_TEMPERATURE)),
        target_temperature_step: f32::from(as_i16(reg(registers, REG_TEMPERATURE_STEP)))
            * TEMPERATURE_PRECISION,
        min_temp: as_i16(reg(registers, REG_MIN_TEMPERATURE)),
        max_temp: as_i16(reg(registers, REG_MAX_TEMPERATURE)),
        current_humidity: low_byte(reg(registers, REG_CURRENT_HUMIDITY)),
        precision: TEMPERATURE_PRECISION,
        hvac_mode,
        hvac_action,
        hvac_modes: HvacMode::ALL.to_vec(),
        fan_mode,
        fan_modes: FanSpeed::supported(max_fan_level),
        max_fan_level,
        is_boosting: reg(registers, REG_BOOST) != 0,
        polled_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A healthy three-level unit: cooling towards 22 °C, fan on medium.
    fn sample_block() -> [u16; 16] {
        let mut block = [0u16; 16];
        block[usize::from(REG_DEVICE_TYPE)] = DEVICE_TYPE_S21;
        block[usize::from(REG_FIRMWARE_MAJOR)] = 2;
        block[usize::from(REG_FIRMWARE_MINOR)] = 14;
        block[usize::from(REG_HVAC_MODE)] = HvacMode::Cool.to_register();
        block[usize::from(REG_HVAC_ACTION)] = HvacAction::Cooling.to_register();
        block[usize::from(REG_FAN_MODE)] = 2;
        block[usize::from(REG_MAX_FAN_LEVEL)] = 3;
        block[usize::from(REG_TARGET_TEMPERATURE)] = 22;
        block[usize::from(REG_CURRENT_TEMPERATURE)] = 245;
        block[usize::from(REG_CURRENT_HUMIDITY)] = 47;
        block[usize::from(REG_BOOST)] = 0;
        block[usize::from(REG_MIN_TEMPERATURE)] = 15;
        block[usize::from(REG_MAX_TEMPERATURE)] = 30;
        block[usize::from(REG_TEMPERATURE_STEP)] = 10;
        block[usize::from(REG_SERIAL_HIGH)] = 0x00AB;
        block[usize::from(REG_SERIAL_LOW)] = 0xCDEF;
        block
    }

    #[test]
    fn decodes_full_snapshot() {
        let snapshot = decode_snapshot(&sample_block()).unwrap();

        assert!(snapshot.available);
        assert_eq!(snapshot.name, "Blauberg S21");
        assert_eq!(snapshot.unique_id, "bls21-00abcdef");
        assert_eq!(snapshot.manufacturer, "Blauberg Ventilatoren");
        assert_eq!(snapshot.model, "S21");
        assert_eq!(snapshot.sw_version, "2.14");
        assert_eq!(snapshot.hvac_mode, HvacMode::Cool);
        assert_eq!(snapshot.hvac_action, HvacAction::Cooling);
        assert_eq!(snapshot.fan_mode.value(), 2);
        assert_eq!(snapshot.fan_mode_label(), "medium");
        assert_eq!(snapshot.target_temperature, 22);
        assert!((snapshot.current_temperature - 24.5).abs() < f32::EPSILON);
        assert!((snapshot.target_temperature_step - 1.0).abs() < f32::EPSILON);
        assert_eq!(snapshot.current_humidity, 47);
        assert_eq!(snapshot.min_temp, 15);
        assert_eq!(snapshot.max_temp, 30);
        assert!(!snapshot.is_boosting);
        assert!(!snapshot.supports_custom_fan_speed());
        assert_eq!(snapshot.hvac_modes.len(), 5);
        assert_eq!(snapshot.fan_modes.len(), 3);
    }

    #[test]
    fn negative_current_temperature() {
        let mut block = sample_block();
        // -7.5 °C as two's complement tenths.
        block[usize::from(REG_CURRENT_TEMPERATURE)] = u16::from_be_bytes((-75i16).to_be_bytes());
        let snapshot = decode_snapshot(&block).unwrap();
        assert!((snapshot.current_temperature - (-7.5)).abs() < f32::EPSILON);
    }

    #[test]
    fn continuous_unit_gets_custom_speed() {
        let mut block = sample_block();
        block[usize::from(REG_MAX_FAN_LEVEL)] = 8;
        block[usize::from(REG_FAN_MODE)] = 255;

        let snapshot = decode_snapshot(&block).unwrap();
        assert!(snapshot.supports_custom_fan_speed());
        assert!(snapshot.fan_mode.is_custom());
        assert_eq!(snapshot.fan_mode_label(), "custom");
        assert_eq!(snapshot.fan_modes.len(), 9);
    }

    #[test]
    fn unknown_device_type_is_unsupported() {
        let mut block = sample_block();
        block[usize::from(REG_DEVICE_TYPE)] = 0x7777;

        let err = decode_snapshot(&block).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedDevice { device_type: 0x7777 }
        ));
    }

    #[test]
    fn unknown_mode_register_is_a_protocol_error() {
        let mut block = sample_block();
        block[usize::from(REG_HVAC_MODE)] = 9;

        let err = decode_snapshot(&block).unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
    }

    #[test]
    fn boost_flag() {
        let mut block = sample_block();
        block[usize::from(REG_BOOST)] = 1;
        assert!(decode_snapshot(&block).unwrap().is_boosting);
    }
}
