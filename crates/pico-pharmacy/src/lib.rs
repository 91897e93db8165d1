// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock pharmacy data for the Pico dashboard.
//!
//! A fixed inventory, a randomized sales history generated at startup,
//! the aggregates the dashboard shows, and a simulated supplier that the
//! chat assistant's ordering tool talks to.

pub mod dashboard;
pub mod fixtures;
pub mod provider;
pub mod sales;
pub mod supplier;

pub use provider::{PharmacyDataProvider, PharmacySnapshot};
pub use supplier::SimulatedSupplier;
