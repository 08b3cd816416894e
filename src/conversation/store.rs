use std::{fmt, str::FromStr};

use anyhow::anyhow;

use super::{IdSource, Message, MessageId, UuidV7Ids};

/// What an edit does when the new text matches the old one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TruncatePolicy {
    /// Every confirmed edit drops the messages after the edited one.
    Always,
    /// Edits that leave the trimmed text as it was touch nothing.
    #[default]
    OnlyIfChanged,
}

impl FromStr for TruncatePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "always" => Ok(Self::Always),
            "only_if_changed" => Ok(Self::OnlyIfChanged),
            other => Err(anyhow!("unknown truncate policy {other:?}, expected always or only_if_changed")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyInput,
    UnknownId,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rejection::EmptyInput => f.write_str("empty input"),
            Rejection::UnknownId => f.write_str("unknown id"),
        }
    }
}

/// Result of a mutation request. Only `Applied` changes state.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Valid request that was already satisfied.
    Unchanged,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

#[derive(Debug, Clone)]
pub struct ConversationStore<I = UuidV7Ids> {
    transcript: Vec<Message>,
    policy: TruncatePolicy,
    ids: I,
}

impl ConversationStore {
    pub fn new(policy: TruncatePolicy) -> Self {
        Self::with_ids(policy, UuidV7Ids)
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(TruncatePolicy::default())
    }
}

impl<I: IdSource> ConversationStore<I> {
    pub fn with_ids(policy: TruncatePolicy, ids: I) -> Self {
        Self {
            transcript: Vec::new(),
            policy,
            ids,
        }
    }

    pub fn policy(&self) -> TruncatePolicy {
        self.policy
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.transcript.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    /// Appends a message authored by the local user. Text is stored trimmed.
    pub fn append(&mut self, text: &str) -> Outcome {
        let text = text.trim();
        if text.is_empty() {
            return Outcome::Rejected(Rejection::EmptyInput);
        }

        let id = self.ids.next_id();
        self.transcript.push(Message {
            id,
            text: text.to_owned(),
            sent: true,
        });
        Outcome::Applied
    }

    /// Replaces the text of message `id` and drops everything after it.
    pub fn edit_and_truncate(&mut self, id: MessageId, new_text: &str) -> Outcome {
        let Some(index) = self.transcript.iter().position(|m| m.id == id) else {
            return Outcome::Rejected(Rejection::UnknownId);
        };

        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Outcome::Rejected(Rejection::EmptyInput);
        }

        if self.policy == TruncatePolicy::OnlyIfChanged && self.transcript[index].text == new_text {
            return Outcome::Unchanged;
        }

        self.transcript[index].text = new_text.to_owned();
        self.transcript.truncate(index + 1);
        Outcome::Applied
    }
}
