#[cfg(test)]
#[path = "conversation_store_test.rs"]
mod tests;

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::domain::models::BackendBox;
use crate::domain::models::BackendError;
use crate::domain::models::Message;
use crate::domain::models::Role;

pub const CHAT_FALLBACK_REPLY: &str = "Error: no AI response.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    Sending,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChatOutcome {
    /// The assistant answered and its reply was appended.
    Replied(Message),
    /// A response arrived without a usable reply, the fallback was appended.
    Fallback(Message),
    /// The request never completed. Nothing was appended.
    Failed(String),
    /// Blank input, nothing happened.
    Empty,
    /// A message for this conversation is already in flight.
    Busy,
    /// The conversation was reset while the request was in flight.
    Discarded,
}

struct Transcript {
    state: ConversationState,
    messages: Vec<Message>,
    generation: u64,
}

impl Transcript {
    fn push(&mut self, role: Role, content: &str) -> Option<Message> {
        if content.trim().is_empty() {
            return None;
        }

        let message = Message::new(role, content);
        self.messages.push(message.clone());
        return Some(message);
    }

    fn push_fallback(&mut self) -> Message {
        let message = Message::new(Role::Assistant, CHAT_FALLBACK_REPLY);
        self.messages.push(message.clone());
        return message;
    }

    fn outgoing(&self) -> Vec<Message> {
        return self
            .messages
            .iter()
            .filter(|message| return message.is_sendable())
            .cloned()
            .collect();
    }
}

/// Ordered chat transcript for a single conversation, plus the single-flight
/// exchange with the chat endpoint.
pub struct ConversationStore {
    backend: BackendBox,
    transcript: Mutex<Transcript>,
}

impl ConversationStore {
    pub fn new(backend: BackendBox) -> ConversationStore {
        return ConversationStore {
            backend,
            transcript: Mutex::new(Transcript {
                state: ConversationState::Idle,
                messages: vec![],
                generation: 0,
            }),
        };
    }

    fn lock(&self) -> MutexGuard<'_, Transcript> {
        return self
            .transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Appends a message. Blank content is ignored and `false` is returned.
    pub fn append(&self, role: Role, content: &str) -> bool {
        return self.lock().push(role, content).is_some();
    }

    pub fn history(&self) -> Vec<Message> {
        return self.lock().messages.clone();
    }

    /// The sequence handed to the backend: only entries that carry both a
    /// role and content.
    pub fn outgoing_history(&self) -> Vec<Message> {
        return self.lock().outgoing();
    }

    pub fn state(&self) -> ConversationState {
        return self.lock().state;
    }

    /// Clears the transcript. A reply still in flight is dropped on arrival.
    pub fn reset(&self) {
        let mut transcript = self.lock();
        transcript.messages.clear();
        transcript.state = ConversationState::Idle;
        transcript.generation += 1;
    }

    pub async fn send(&self, text: &str) -> ChatOutcome {
        let (history, generation) = {
            let mut transcript = self.lock();
            if text.trim().is_empty() {
                return ChatOutcome::Empty;
            }
            if transcript.state == ConversationState::Sending {
                tracing::debug!("Chat message dropped, a request is already in flight");
                return ChatOutcome::Busy;
            }

            transcript.push(Role::User, text);
            transcript.state = ConversationState::Sending;
            (transcript.outgoing(), transcript.generation)
        };

        tracing::debug!(history_len = history.len(), "Sending chat message");
        let res = self.backend.chat(text, &history).await;

        let mut transcript = self.lock();
        if transcript.generation != generation {
            tracing::debug!("Conversation was reset, discarding chat response");
            return ChatOutcome::Discarded;
        }
        transcript.state = ConversationState::Idle;

        match res {
            Ok(Some(reply)) if !reply.trim().is_empty() => {
                let message = Message::new(Role::Assistant, &reply);
                transcript.messages.push(message.clone());
                return ChatOutcome::Replied(message);
            }
            Ok(_) => {
                tracing::warn!("Chat response carried no reply");
                return ChatOutcome::Fallback(transcript.push_fallback());
            }
            Err(err @ BackendError::Status { .. }) => {
                tracing::error!(error = ?err, "Chat request was rejected by the backend");
                return ChatOutcome::Fallback(transcript.push_fallback());
            }
            Err(err) => {
                tracing::error!(error = ?err, "Chat request failed");
                return ChatOutcome::Failed(err.to_string());
            }
        }
    }
}
