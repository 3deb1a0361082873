// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PDU codec for the function codes the S21 uses.
//!
//! The climate surface only ever needs two transactions: one block read
//! of the holding registers (FC 0x03) per poll, and one single-register
//! write (FC 0x06) per command. Exception responses (function code with
//! bit 7 set) are decoded for both.

use std::fmt;

use crate::error::ProtocolError;

/// Function code: read holding registers.
pub const FC_READ_HOLDING_REGISTERS: u8 = 0x03;

/// Function code: write single register.
pub const FC_WRITE_SINGLE_REGISTER: u8 = 0x06;

/// Bit set on the function code of an exception response.
const EXCEPTION_BIT: u8 = 0x80;

/// Modbus exception code reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionCode {
    /// Function code not supported by the device.
    IllegalFunction,
    /// Register address out of range.
    IllegalDataAddress,
    /// Register value rejected.
    IllegalDataValue,
    /// Unrecoverable device-side failure.
    ServerDeviceFailure,
    /// Device is busy processing a long-running command.
    ServerDeviceBusy,
    /// Any other code; preserved as-is.
    Unknown(u8),
}

impl ExceptionCode {
    /// Decodes a raw exception code byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0x01 => Self::IllegalFunction,
            0x02 => Self::IllegalDataAddress,
            0x03 => Self::IllegalDataValue,
            0x04 => Self::ServerDeviceFailure,
            0x06 => Self::ServerDeviceBusy,
            other => Self::Unknown(other),
        }
    }

    /// Encodes this exception code as its raw byte.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::IllegalFunction => 0x01,
            Self::IllegalDataAddress => 0x02,
            Self::IllegalDataValue => 0x03,
            Self::ServerDeviceFailure => 0x04,
            Self::ServerDeviceBusy => 0x06,
            Self::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalFunction => f.write_str("illegal function"),
            Self::IllegalDataAddress => f.write_str("illegal data address"),
            Self::IllegalDataValue => f.write_str("illegal data value"),
            Self::ServerDeviceFailure => f.write_str("server device failure"),
            Self::ServerDeviceBusy => f.write_str("server device busy"),
            Self::Unknown(raw) => write!(f, "exception code {raw:#04x}"),
        }
    }
}

/// Encodes a read-holding-registers request PDU.
#[must_use]
pub fn encode_read_holding(address: u16, count: u16) -> Vec<u8> {
    let mut pdu = Vec::with_capacity(5);
    pdu.push(FC_READ_HOLDING_REGISTERS);
    pdu.extend_from_slice(&address.to_be_bytes());
    pdu.extend_from_slice(&count.to_be_bytes());
    pdu
}

/// Decodes a read-holding-registers response PDU into register values.
///
/// # Errors
///
/// Returns a `ProtocolError` if the PDU is an exception response, carries
/// the wrong function code, or its byte count does not match `count`.
pub fn decode_read_holding(pdu: &[u8], count: u16) -> Result<Vec<u16>, ProtocolError> {
    check_function(pdu, FC_READ_HOLDING_REGISTERS)?;

    let expected_bytes = usize::from(count) * 2;
    if pdu.len() != expected_bytes + 2 || usize::from(pdu[1]) != expected_bytes {
        return Err(ProtocolError::Truncated {
            expected: expected_bytes + 2,
            actual: pdu.len(),
        });
    }

    let registers = pdu[2..]
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    Ok(registers)
}

/// Encodes a write-single-register request PDU.
#[must_use]
pub fn encode_write_single(address: u16, value: u16) -> Vec<u8> {
    let mut pdu = Vec::with_capacity(5);
    pdu.push(FC_WRITE_SINGLE_REGISTER);
    pdu.extend_from_slice(&address.to_be_bytes());
    pdu.extend_from_slice(&value.to_be_bytes());
    pdu
}

/// Decodes a write-single-register response PDU.
///
/// The device echoes the request; anything else is a protocol error.
///
/// # Errors
///
/// Returns a `ProtocolError` if the PDU is an exception response, carries
/// the wrong function code, or does not echo the written address/value.
pub fn decode_write_single(pdu: &[u8], address: u16, value: u16) -> Result<(), ProtocolError> {
    check_function(pdu, FC_WRITE_SINGLE_REGISTER)?;

    if pdu.len() != 5 {
        return Err(ProtocolError::Truncated {
            expected: 5,
            actual: pdu.len(),
        });
    }

    let echoed_address = u16::from_be_bytes([pdu[1], pdu[2]]);
    let echoed_value = u16::from_be_bytes([pdu[3], pdu[4]]);
    if echoed_address != address || echoed_value != value {
        return Err(ProtocolError::EchoMismatch);
    }
    Ok(())
}

/// Validates the leading function code, decoding exception responses.
fn check_function(pdu: &[u8], expected: u8) -> Result<(), ProtocolError> {
    let Some(&function) = pdu.first() else {
        return Err(ProtocolError::Truncated {
            expected: 1,
            actual: 0,
        });
    };

    if function == expected | EXCEPTION_BIT {
        let code = pdu.get(1).copied().map_or(
            ProtocolError::Truncated {
                expected: 2,
                actual: pdu.len(),
            },
            |raw| ProtocolError::Exception {
                function: expected,
                code: ExceptionCode::from_u8(raw),
            },
        );
        return Err(code);
    }

    if function != expected {
        return Err(ProtocolError::UnexpectedFunction {
            expected,
            actual: function,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_request_wire_bytes() {
        assert_eq!(
            encode_read_holding(0x0000, 0x0010),
            vec![0x03, 0x00, 0x00, 0x00, 0x10]
        );
    }

    #[test]
    fn read_response_decodes_registers() {
        let pdu = [0x03, 0x04, 0x00, 0x0B, 0x00, 0x16];
        let registers = decode_read_holding(&pdu, 2).unwrap();
        assert_eq!(registers, vec![11, 22]);
    }

    #[test]
    fn read_response_wrong_byte_count() {
        let pdu = [0x03, 0x04, 0x00, 0x0B, 0x00, 0x16];
        let err = decode_read_holding(&pdu, 3).unwrap_err();
        assert!(matches!(err, ProtocolError::Truncated { .. }));
    }

    #[test]
    fn read_response_exception() {
        let pdu = [0x83, 0x02];
        let err = decode_read_holding(&pdu, 2).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::Exception {
                function: 0x03,
                code: ExceptionCode::IllegalDataAddress,
            }
        );
    }

    #[test]
    fn write_request_wire_bytes() {
        assert_eq!(
            encode_write_single(0x0003, 0x0002),
            vec![0x06, 0x00, 0x03, 0x00, 0x02]
        );
    }

    #[test]
    fn write_response_echo_accepted() {
        let pdu = [0x06, 0x00, 0x03, 0x00, 0x02];
        assert!(decode_write_single(&pdu, 3, 2).is_ok());
    }

    #[test]
    fn write_response_bad_echo_rejected() {
        let pdu = [0x06, 0x00, 0x03, 0x00, 0x07];
        assert!(decode_write_single(&pdu, 3, 2).is_err());
    }

    #[test]
    fn write_response_exception() {
        let pdu = [0x86, 0x03];
        let err = decode_write_single(&pdu, 3, 2).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::Exception {
                function: 0x06,
                code: ExceptionCode::IllegalDataValue,
            }
        );
    }

    #[test]
    fn wrong_function_code() {
        let pdu = [0x04, 0x02, 0x00, 0x01];
        let err = decode_read_holding(&pdu, 1).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::UnexpectedFunction {
                expected: 0x03,
                actual: 0x04,
            }
        );
    }

    #[test]
    fn exception_code_table() {
        for raw in [0x01, 0x02, 0x03, 0x04, 0x06] {
            assert_eq!(ExceptionCode::from_u8(raw).as_u8(), raw);
        }
        assert_eq!(ExceptionCode::from_u8(0x11), ExceptionCode::Unknown(0x11));
    }
}
