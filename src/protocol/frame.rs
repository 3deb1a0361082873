// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MBAP header and Modbus-TCP frame codec.
//!
//! Every request and response on the wire is an MBAP header followed by
//! a PDU. The header carries the transaction identifier used to match a
//! response to its outstanding request.

use crate::error::ProtocolError;

/// Length of the MBAP header in bytes.
pub const MBAP_HEADER_LEN: usize = 7;

/// Maximum legal PDU length (Modbus application protocol limit).
pub const MAX_PDU_LEN: usize = 253;

/// The MBAP (Modbus Application Protocol) header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MbapHeader {
    /// Transaction identifier; echoed back by the device.
    pub transaction_id: u16,
    /// Protocol identifier; always 0 for Modbus.
    pub protocol_id: u16,
    /// Remaining byte count: unit-id byte plus PDU length.
    pub length: u16,
    /// Unit (slave) identifier.
    pub unit_id: u8,
}

impl MbapHeader {
    /// Encodes the header into its 7-byte wire form.
    #[must_use]
    pub fn encode(&self) -> [u8; MBAP_HEADER_LEN] {
        let mut bytes = [0u8; MBAP_HEADER_LEN];
        bytes[0..2].copy_from_slice(&self.transaction_id.to_be_bytes());
        bytes[2..4].copy_from_slice(&self.protocol_id.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.length.to_be_bytes());
        bytes[6] = self.unit_id;
        bytes
    }

    /// Decodes a 7-byte wire header.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidProtocolId` for a non-zero protocol
    /// identifier and `ProtocolError::InvalidLength` for a length outside
    /// `1..=MAX_PDU_LEN + 1`.
    pub fn decode(bytes: &[u8; MBAP_HEADER_LEN]) -> Result<Self, ProtocolError> {
        let transaction_id = u16::from_be_bytes([bytes[0], bytes[1]]);
        let protocol_id = u16::from_be_bytes([bytes[2], bytes[3]]);
        let length = u16::from_be_bytes([bytes[4], bytes[5]]);
        let unit_id = bytes[6];

        if protocol_id != 0 {
            return Err(ProtocolError::InvalidProtocolId(protocol_id));
        }
        // length counts the unit-id byte, so a bare header has length 1.
        if length < 2 || usize::from(length) > MAX_PDU_LEN + 1 {
            return Err(ProtocolError::InvalidLength(length));
        }

        Ok(Self {
            transaction_id,
            protocol_id,
            length,
            unit_id,
        })
    }

    /// Returns the PDU byte count that follows this header on the wire.
    #[must_use]
    pub fn pdu_len(&self) -> usize {
        usize::from(self.length) - 1
    }
}

/// Encodes a full frame (header plus PDU) for the given transaction.
///
/// # Panics
///
/// Panics if `pdu` exceeds [`MAX_PDU_LEN`]; all PDUs this library builds
/// are a handful of bytes.
#[must_use]
pub fn encode_frame(transaction_id: u16, unit_id: u8, pdu: &[u8]) -> Vec<u8> {
    assert!(pdu.len() <= MAX_PDU_LEN, "PDU too long for one frame");
    // Bounded by MAX_PDU_LEN + 1, always fits in u16.
    #[allow(clippy::cast_possible_truncation)]
    let length = (pdu.len() + 1) as u16;

    let header = MbapHeader {
        transaction_id,
        protocol_id: 0,
        length,
        unit_id,
    };

    let mut frame = Vec::with_capacity(MBAP_HEADER_LEN + pdu.len());
    frame.extend_from_slice(&header.encode());
    frame.extend_from_slice(pdu);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_roundtrip() {
        let frame = encode_frame(0x0102, 1, &[0x03, 0x00, 0x00, 0x00, 0x10]);
        assert_eq!(frame.len(), MBAP_HEADER_LEN + 5);

        let mut header_bytes = [0u8; MBAP_HEADER_LEN];
        header_bytes.copy_from_slice(&frame[..MBAP_HEADER_LEN]);
        let header = MbapHeader::decode(&header_bytes).unwrap();

        assert_eq!(
            header,
            MbapHeader {
                transaction_id: 0x0102,
                protocol_id: 0,
                length: 6,
                unit_id: 1,
            }
        );
        assert_eq!(header.pdu_len(), 5);
        assert_eq!(&frame[MBAP_HEADER_LEN..], &[0x03, 0x00, 0x00, 0x00, 0x10]);
    }

    #[test]
    fn known_wire_bytes() {
        // Read 16 holding registers at address 0, transaction 1, unit 1.
        let frame = encode_frame(1, 1, &[0x03, 0x00, 0x00, 0x00, 0x10]);
        assert_eq!(
            frame,
            vec![0x00, 0x01, 0x00, 0x00, 0x00, 0x06, 0x01, 0x03, 0x00, 0x00, 0x00, 0x10]
        );
    }

    #[test]
    fn rejects_non_zero_protocol_id() {
        let bytes = [0x00, 0x01, 0x00, 0x01, 0x00, 0x06, 0x01];
        assert_eq!(
            MbapHeader::decode(&bytes).unwrap_err(),
            ProtocolError::InvalidProtocolId(1)
        );
    }

    #[test]
    fn rejects_bad_lengths() {
        let empty = [0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x01];
        assert_eq!(
            MbapHeader::decode(&empty).unwrap_err(),
            ProtocolError::InvalidLength(1)
        );

        let oversized = [0x00, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01];
        assert_eq!(
            MbapHeader::decode(&oversized).unwrap_err(),
            ProtocolError::InvalidLength(256)
        );
    }
}
