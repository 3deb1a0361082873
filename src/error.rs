// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `bls21` library.
//!
//! This module provides the error hierarchy for handling failures across
//! the library: transport/connectivity failures, Modbus protocol decode
//! failures, device-identity mismatches, and client-side value validation.

use thiserror::Error;

use crate::protocol::pdu::ExceptionCode;
use crate::types::HvacMode;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when
/// communicating with a Blauberg S21 unit.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport or protocol failure. Recoverable: the connection is torn
    /// down and recreated lazily, so callers may simply poll again later.
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// The device-type register did not match a known S21 device family.
    ///
    /// Fatal to setup and not retryable: the host at this address is
    /// speaking Modbus but is not a device this library can drive.
    #[error("unsupported device type {device_type:#06x}")]
    UnsupportedDevice {
        /// Raw value read from the device-type register.
        device_type: u16,
    },

    /// Error occurred during client-side value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

impl From<ProtocolError> for Error {
    fn from(err: ProtocolError) -> Self {
        Self::Connection(ConnectionError::Protocol(err))
    }
}

/// Errors related to the TCP transport and request/response exchange.
///
/// All variants are recoverable from the caller's point of view: the
/// client closes the socket and the next operation reconnects.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Socket-level failure (refused, reset, closed mid-response).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No response arrived within the configured timeout.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The response arrived but could not be decoded.
    ///
    /// Kept as a distinct variant so protocol-level failures are logged
    /// apart from plain transport loss, even though callers treat both
    /// the same way.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Errors related to decoding Modbus-TCP frames and PDUs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The frame ended before the advertised length was read.
    #[error("truncated frame: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Number of bytes the frame header promised.
        expected: usize,
        /// Number of bytes actually present.
        actual: usize,
    },

    /// The MBAP protocol identifier was not zero.
    #[error("invalid protocol identifier {0:#06x}")]
    InvalidProtocolId(u16),

    /// The MBAP length field was outside the legal range.
    #[error("invalid frame length {0}")]
    InvalidLength(u16),

    /// The response transaction identifier did not match the request.
    ///
    /// The response is discarded and the socket closed, as it may belong
    /// to an abandoned earlier transaction.
    #[error("transaction id mismatch: sent {sent}, received {received}")]
    TransactionMismatch {
        /// Transaction identifier of the outstanding request.
        sent: u16,
        /// Transaction identifier carried by the response.
        received: u16,
    },

    /// The response function code did not match the request.
    #[error("unexpected function code {actual:#04x}, expected {expected:#04x}")]
    UnexpectedFunction {
        /// Function code of the request.
        expected: u8,
        /// Function code carried by the response.
        actual: u8,
    },

    /// A write response did not echo the written address and value.
    #[error("write response did not echo the request")]
    EchoMismatch,

    /// The device answered with a Modbus exception response.
    #[error("device rejected function {function:#04x}: {code}")]
    Exception {
        /// Function code of the rejected request.
        function: u8,
        /// Exception code reported by the device.
        code: ExceptionCode,
    },

    /// A register held a raw value outside the domain of its enum.
    #[error("invalid {field} value {value}")]
    InvalidEnumValue {
        /// Name of the register/field being decoded.
        field: &'static str,
        /// The raw register value.
        value: u16,
    },
}

/// Errors related to client-side value validation.
///
/// These errors are produced before any bytes hit the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A fan speed of 0 was given; levels start at 1.
    #[error("fan speed {0} is not a valid level (1-254) or the custom sentinel 255")]
    InvalidFanSpeed(u8),

    /// A discrete fan level above the device's maximum was given.
    #[error("fan speed {actual} is out of range [1, {max}]")]
    FanSpeedOutOfRange {
        /// Maximum fan level reported by the device.
        max: u8,
        /// The level that was requested.
        actual: u8,
    },

    /// The custom fan speed sentinel was used on a three-level unit.
    #[error("custom fan speed is not supported by this device")]
    CustomSpeedUnsupported,

    /// The requested HVAC mode is not in the device's supported set.
    #[error("HVAC mode {0} is not supported by this device")]
    UnsupportedMode(HvacMode),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
