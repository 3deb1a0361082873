// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Domain types for S21 climate state.
//!
//! This module provides the typed representations of the values the unit
//! exchanges over Modbus registers: operating modes, reported actions,
//! and fan speeds. Wire codecs are exhaustive in both directions; an
//! unknown raw register value is a protocol error, never a silent
//! fallthrough.

mod fan;
mod hvac;

pub use fan::FanSpeed;
pub use hvac::{HvacAction, HvacMode};
