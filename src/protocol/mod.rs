// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Modbus-TCP protocol codec for the S21.
//!
//! This module provides the wire-level building blocks the transport and
//! client are made of:
//!
//! - [`frame`]: MBAP header and frame encode/decode
//! - [`pdu`]: request/response PDUs for the two function codes the S21
//!   needs (read holding registers, write single register) plus Modbus
//!   exception responses
//! - [`registers`]: the S21 register map and the decode of a polled
//!   register block into a [`DeviceSnapshot`](crate::DeviceSnapshot)

pub mod frame;
pub mod pdu;
pub mod registers;
