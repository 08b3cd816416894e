//! UI state that is not part of a transcript.
//!
//! [`ViewState`] is a plain value. Every change goes through
//! [`ViewState::apply`], which hands back the next state, so a page is always
//! rendered from a `(transcript, view state)` pair and nothing else.

pub mod render;

use std::str::FromStr;

use anyhow::anyhow;
use serde::Deserialize;
use uuid::Uuid;

use crate::conversation::{Message, MessageId};

/// How an edit in progress gets confirmed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EditConfirmation {
    /// Enter confirms, Shift+Enter inserts a newline.
    #[default]
    OnEnter,
    /// Only the explicit confirm button does.
    OnButtonConfirm,
}

impl EditConfirmation {
    pub fn confirms(&self, trigger: ConfirmTrigger) -> bool {
        match (self, trigger) {
            (EditConfirmation::OnEnter, ConfirmTrigger::Enter) => true,
            (EditConfirmation::OnButtonConfirm, ConfirmTrigger::Button) => true,
            _ => false,
        }
    }
}

impl FromStr for EditConfirmation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "on_enter" => Ok(Self::OnEnter),
            "on_button" | "on_button_confirm" => Ok(Self::OnButtonConfirm),
            other => Err(anyhow!("unknown edit confirmation {other:?}, expected on_enter or on_button")),
        }
    }
}

/// What the user did to submit the editor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmTrigger {
    Enter,
    Button,
    /// Any other submission, e.g. a draft autosave.
    #[default]
    Draft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCursor {
    pub chat: Uuid,
    pub message: MessageId,
    pub draft: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageMode<'a> {
    Display,
    Editing { draft: &'a str },
}

#[derive(Debug, Clone)]
pub enum ViewAction {
    Hover(MessageId),
    Unhover,
    /// Opens the editor on a message, seeding the draft with its text.
    /// Received messages cannot be edited.
    StartEdit { chat: Uuid, message: Message },
    Draft(String),
    /// Leaves the editor, after a confirm or a cancel.
    CloseEditor,
    ToggleSidebar,
    ToggleChatMenu(Uuid),
    CloseChatMenu,
    ToggleUserMenu,
    /// A chat went away; drop anything pointing into it.
    ForgetChat(Uuid),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub hovered: Option<MessageId>,
    pub editing: Option<EditCursor>,
    pub sidebar_collapsed: bool,
    pub chat_menu: Option<Uuid>,
    pub user_menu_open: bool,
}

impl ViewState {
    pub fn apply(self, action: ViewAction) -> ViewState {
        use ViewAction::*;
        match action {
            Hover(id) => ViewState { hovered: Some(id), ..self },
            Unhover => ViewState { hovered: None, ..self },
            StartEdit { message, .. } if !message.sent => self,
            StartEdit { chat, message } => ViewState {
                editing: Some(EditCursor {
                    chat,
                    message: message.id,
                    draft: message.text,
                }),
                ..self
            },
            Draft(draft) => match self.editing {
                Some(cursor) => ViewState {
                    editing: Some(EditCursor { draft, ..cursor }),
                    ..self
                },
                None => ViewState { editing: None, ..self },
            },
            CloseEditor => ViewState { editing: None, ..self },
            ToggleSidebar => ViewState {
                sidebar_collapsed: !self.sidebar_collapsed,
                chat_menu: None,
                ..self
            },
            ToggleChatMenu(chat) => ViewState {
                chat_menu: if self.chat_menu == Some(chat) { None } else { Some(chat) },
                user_menu_open: false,
                ..self
            },
            CloseChatMenu => ViewState { chat_menu: None, ..self },
            ToggleUserMenu => ViewState {
                user_menu_open: !self.user_menu_open,
                chat_menu: None,
                ..self
            },
            ForgetChat(chat) => ViewState {
                editing: self.editing.filter(|cursor| cursor.chat != chat),
                chat_menu: self.chat_menu.filter(|open| *open != chat),
                ..self
            },
        }
    }

    pub fn mode_of(&self, chat: Uuid, message: MessageId) -> MessageMode<'_> {
        match &self.editing {
            Some(cursor) if cursor.chat == chat && cursor.message == message => MessageMode::Editing {
                draft: &cursor.draft,
            },
            _ => MessageMode::Display,
        }
    }

    pub fn is_hovered(&self, message: MessageId) -> bool {
        self.hovered == Some(message)
    }
}
