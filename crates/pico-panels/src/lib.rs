// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Panel controllers for the Pico pharmacy assistant.
//!
//! Each panel turns a form into a prompt, asks the content gateway for an
//! answer in the mode the panel needs, and keeps the saved report that
//! came out of it:
//!
//! - [`prompts`]: prompt templates and response schemas
//! - [`generate`]: one generation per panel submit
//! - [`controller`]: active report, edits, deletes, stale-result guard
//! - [`customer`] and [`dashboard`]: the customer and dashboard extras

pub mod controller;
pub mod customer;
pub mod dashboard;
pub mod generate;
pub mod prompts;
pub mod render;

pub use controller::{DELETE_CONFIRMATION, PanelController, RequestToken, SubmitOutcome};
pub use dashboard::{DashboardSummary, GREETING_FALLBACK, greeting};
pub use generate::{PanelRequest, generate};
pub use prompts::WorkReportFacts;
