// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `bls21` - A Rust client for Blauberg S21 ventilation units.
//!
//! This library speaks Modbus-TCP to a single S21 unit: it polls the
//! climate-relevant register block into an immutable [`DeviceSnapshot`]
//! and writes operating mode, fan speed, and target temperature.
//!
//! # Model
//!
//! - **Polling**: [`S21Client::poll`] reads the whole register block in
//!   one transaction and replaces the cached snapshot atomically. A
//!   failed poll keeps the old snapshot and marks it unavailable.
//! - **Commands**: setters are single-register writes. They never retry
//!   and never re-poll; issue a poll afterwards to observe the effect.
//! - **Connection**: opened lazily, kept across polls, torn down on any
//!   transport or protocol failure and recreated by the next operation.
//! - **Concurrency**: one request in flight at a time, enforced by an
//!   internal mutex; the client is safe to share behind an `Arc`.
//!
//! # Quick Start
//!
//! ```no_run
//! use bls21::{HvacMode, S21Client};
//!
//! #[tokio::main]
//! async fn main() -> bls21::Result<()> {
//!     let client = S21Client::new("192.168.1.30", 502);
//!
//!     // First poll also verifies the device family; a foreign Modbus
//!     // device fails with Error::UnsupportedDevice.
//!     let device = client.poll().await?;
//!     println!(
//!         "{} ({}): {} °C, fan {}",
//!         device.name,
//!         device.sw_version,
//!         device.current_temperature,
//!         device.fan_mode_label(),
//!     );
//!
//!     client.set_hvac_mode(HvacMode::Auto).await?;
//!     client.poll().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Custom configuration
//!
//! ```no_run
//! use bls21::{ClientConfig, S21Client};
//! use std::time::Duration;
//!
//! let config = ClientConfig::new("192.168.1.30")
//!     .with_port(1502)
//!     .with_timeout(Duration::from_secs(2));
//! let client = S21Client::with_config(config);
//! ```

mod client;
mod config;
mod device;
pub mod error;
pub mod protocol;
mod transport;
pub mod types;

pub use client::S21Client;
pub use config::ClientConfig;
pub use device::DeviceSnapshot;
pub use error::{ConnectionError, Error, ProtocolError, Result, ValueError};
pub use types::{FanSpeed, HvacAction, HvacMode};
