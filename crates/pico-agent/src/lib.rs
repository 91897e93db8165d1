// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content generation and chat for the Pico pharmacy assistant.
//!
//! - [`gateway`]: the single point of contact with the completion and
//!   image services (plain, structured, grounded, and image modes)
//! - [`tools`]: actions the chat assistant may request
//! - [`session`]: the multi-turn chat session with its bounded tool loop

pub mod gateway;
pub mod session;
pub mod tools;

pub use gateway::{ContentGateway, GroundedAnswer, history_to_turns, load_system_instruction};
pub use session::{CHAT_GREETING, ChatSession, SessionEvent, SessionState, TurnOutcome};
pub use tools::{PlaceOrderTool, Tool, ToolOutput, ToolRegistry};
