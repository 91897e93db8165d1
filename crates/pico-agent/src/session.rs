// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multi-turn chat session with a bounded tool loop.
//!
//! A session moves Idle -> AwaitingCompletion -> (AwaitingToolResult ->
//! AwaitingCompletion)* -> Idle for every user turn. It keeps two histories:
//! the visible transcript, and the turns actually exchanged with the
//! service. They differ when an attachment's wrapped prompt is sent in
//! place of the short placeholder shown to the user.

use std::sync::Arc;

use pico_core::error::{
    CHAT_APOLOGY, FILE_READ_FAILURE_NOTICE, PicoError, TOOL_LIMIT_NOTICE, UNSUPPORTED_FILE_NOTICE,
};
use pico_core::types::{ChatMessage, FunctionResponse, MessageId, Turn, TurnPart, TurnRole};
use strum::Display;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::gateway::ContentGateway;
use crate::tools::ToolRegistry;

/// First message of every transcript. Never sent to the service.
pub const CHAT_GREETING: &str = "안녕하세요, 약사님! 저는 약사님의 AI 비서 피코입니다. 무엇이든 물어보세요. 약국 운영에 관한 파일을 첨부하여 저를 학습시킬 수도 있습니다.";

/// States of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    Idle,
    AwaitingCompletion,
    AwaitingToolResult,
}

/// Transcript changes, for a UI that renders while a turn is in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    MessageAppended(ChatMessage),
    MessageRemoved(MessageId),
    StateChanged(SessionState),
}

/// How a user turn ended.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The assistant answered; the reply is the last transcript message.
    Replied { text: String },
    /// The model kept requesting tools past the cap; the turn was dropped.
    ToolLimitReached { iterations: usize },
    /// Input was refused before any service call.
    Rejected { reason: PicoError },
    /// The service call failed; an apology was appended.
    Failed { error: PicoError },
}

/// One long-lived conversation with the completion service.
pub struct ChatSession {
    gateway: Arc<ContentGateway>,
    tools: Arc<ToolRegistry>,
    max_tool_iterations: usize,
    accepted_mime_types: Vec<String>,
    state: SessionState,
    transcript: Vec<ChatMessage>,
    turns: Vec<Turn>,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl ChatSession {
    pub fn new(
        gateway: Arc<ContentGateway>,
        tools: Arc<ToolRegistry>,
        max_tool_iterations: usize,
        accepted_mime_types: Vec<String>,
    ) -> Self {
        Self {
            gateway,
            tools,
            max_tool_iterations,
            accepted_mime_types,
            state: SessionState::Idle,
            transcript: vec![ChatMessage::assistant(CHAT_GREETING)],
            turns: Vec::new(),
            events: None,
        }
    }

    /// Builds a session from the `[chat]` config section.
    pub fn from_config(
        gateway: Arc<ContentGateway>,
        tools: Arc<ToolRegistry>,
        config: &pico_config::model::ChatConfig,
    ) -> Self {
        Self::new(
            gateway,
            tools,
            config.max_tool_iterations,
            config.accepted_mime_types.clone(),
        )
    }

    /// Starts publishing [`SessionEvent`]s. Replaces any earlier subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The visible transcript, greeting first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Turns exchanged with the service so far.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Sends a user message.
    pub async fn send_message(&mut self, text: &str) -> TurnOutcome {
        self.submit(text, text).await
    }

    /// Attaches a file for analysis.
    ///
    /// Only the configured MIME types are accepted, and the bytes must be
    /// UTF-8. Refusals never contact the service.
    pub async fn attach_file(&mut self, file_name: &str, mime_type: &str, bytes: &[u8]) -> TurnOutcome {
        if !self.accepted_mime_types.iter().any(|m| m == mime_type) {
            info!(file_name, mime_type, "rejecting attachment");
            self.append(ChatMessage::user(format!("'{file_name}' 파일 첨부")));
            self.append(ChatMessage::assistant(UNSUPPORTED_FILE_NOTICE));
            return TurnOutcome::Rejected {
                reason: PicoError::UnsupportedFile {
                    file_name: file_name.to_string(),
                    mime_type: mime_type.to_string(),
                },
            };
        }

        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(file_name, error = %e, "attachment is not valid UTF-8");
                self.append(ChatMessage::assistant(FILE_READ_FAILURE_NOTICE));
                return TurnOutcome::Rejected {
                    reason: PicoError::Validation(format!("'{file_name}' is not valid UTF-8: {e}")),
                };
            }
        };

        let visible = format!("'{file_name}' 파일의 데이터를 분석하고 실행 가능한 제안을 해주세요.");
        self.submit(&visible, &analysis_prompt(file_name, text)).await
    }

    /// Runs one user turn. `visible` goes to the transcript, `prompt` to the
    /// service.
    async fn submit(&mut self, visible: &str, prompt: &str) -> TurnOutcome {
        self.append(ChatMessage::user(visible));
        self.set_state(SessionState::AwaitingCompletion);

        let declarations = self.tools.declarations();
        let mut pending = self.turns.clone();
        pending.push(Turn::user_text(prompt));
        let mut iterations = 0;

        loop {
            let response = match self
                .gateway
                .converse(pending.clone(), declarations.clone())
                .await
            {
                Ok(response) => response,
                Err(error) => {
                    warn!(error = %error, iterations, "chat turn failed");
                    self.append(ChatMessage::assistant(CHAT_APOLOGY));
                    self.set_state(SessionState::Idle);
                    return TurnOutcome::Failed { error };
                }
            };

            if response.function_calls.is_empty() {
                pending.push(Turn::model_text(response.text.clone()));
                self.turns = pending;
                self.append(ChatMessage::assistant(response.text.clone()));
                self.set_state(SessionState::Idle);
                return TurnOutcome::Replied {
                    text: response.text,
                };
            }

            if iterations >= self.max_tool_iterations {
                warn!(iterations, "maximum tool iterations reached, aborting turn");
                self.append(ChatMessage::assistant(TOOL_LIMIT_NOTICE));
                self.set_state(SessionState::Idle);
                return TurnOutcome::ToolLimitReached { iterations };
            }
            iterations += 1;

            let names = response
                .function_calls
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let note = ChatMessage::assistant(format!(
                "잠시만요, 요청하신 작업을 처리하고 있어요... (항목: {names})"
            ));
            let note_id = note.id.clone();
            self.append(note);
            self.set_state(SessionState::AwaitingToolResult);

            let mut call_parts = Vec::new();
            if !response.text.is_empty() {
                call_parts.push(TurnPart::Text(response.text.clone()));
            }
            let mut response_parts = Vec::new();
            for call in response.function_calls {
                info!(tool = %call.name, iteration = iterations, "executing tool call");
                let output = self.tools.dispatch(&call.name, call.args.clone()).await;
                debug!(tool = %call.name, is_error = output.is_error, "tool call finished");
                response_parts.push(TurnPart::FunctionResponse(FunctionResponse {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    response: output.to_response(),
                }));
                call_parts.push(TurnPart::FunctionCall(call));
            }

            self.remove(&note_id);
            pending.push(Turn {
                role: TurnRole::Model,
                parts: call_parts,
            });
            pending.push(Turn {
                role: TurnRole::User,
                parts: response_parts,
            });
            self.set_state(SessionState::AwaitingCompletion);
        }
    }

    fn append(&mut self, message: ChatMessage) {
        self.emit(SessionEvent::MessageAppended(message.clone()));
        self.transcript.push(message);
    }

    fn remove(&mut self, id: &MessageId) {
        self.transcript.retain(|m| &m.id != id);
        self.emit(SessionEvent::MessageRemoved(id.clone()));
    }

    fn set_state(&mut self, state: SessionState) {
        if self.state != state {
            debug!(from = %self.state, to = %state, "session state change");
            self.state = state;
            self.emit(SessionEvent::StateChanged(state));
        }
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(tx) = &self.events {
            // A dropped receiver just means nobody is watching.
            let _ = tx.send(event);
        }
    }
}

/// Wraps an attachment's text in the analysis instruction.
pub fn analysis_prompt(file_name: &str, text: &str) -> String {
    format!(
        "\n[시스템 메시지: 약사님이 '{file_name}' 파일을 첨부했습니다. 이 파일의 내용을 전문가로서 분석하고, 데이터에 기반한 핵심 요약과 약국 운영에 도움이 될 구체적인 실행 방안을 제안해주세요. 파일 내용이 데이터가 아닌 일반 텍스트 정보라면, 해당 내용을 학습하고 잘 기억했다고 확인시켜주세요.]\n--- 파일 내용 시작 ---\n{text}\n--- 파일 내용 끝 ---\n"
    )
}
