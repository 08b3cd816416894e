use uuid::Uuid;

use crate::{
    conversation::{ConversationStore, MessageId, Outcome, Rejection, TruncatePolicy},
    view::{ConfirmTrigger, EditConfirmation, ViewAction, ViewState},
};

pub const DEFAULT_CHAT_NAME: &str = "New chat";

#[derive(Debug, Clone)]
pub struct Chat {
    pub id: Uuid,
    pub name: String,
    pub store: ConversationStore,
}

/// Everything one signed-in user sees: their chats, which one is open, and
/// the view state. It is the only writer of each chat's store.
#[derive(Debug, Clone)]
pub struct Workspace {
    chats: Vec<Chat>,
    active: Option<Uuid>,
    view: ViewState,
    policy: TruncatePolicy,
}

impl Workspace {
    pub fn new(policy: TruncatePolicy) -> Self {
        Self {
            chats: Vec::new(),
            active: None,
            view: ViewState::default(),
            policy,
        }
    }

    /// Most recently created first.
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn chat(&self, id: Uuid) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == id)
    }

    fn chat_mut(&mut self, id: Uuid) -> Option<&mut Chat> {
        self.chats.iter_mut().find(|c| c.id == id)
    }

    pub fn active(&self) -> Option<&Chat> {
        self.active.and_then(|id| self.chat(id))
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn dispatch(&mut self, action: ViewAction) {
        self.view = std::mem::take(&mut self.view).apply(action);
    }

    /// Creates a chat and makes it the active one.
    pub fn new_chat(&mut self, name: &str) -> Uuid {
        let name = match name.trim() {
            "" => DEFAULT_CHAT_NAME,
            name => name,
        };
        let id = Uuid::now_v7();
        self.chats.insert(0, Chat {
            id,
            name: name.to_owned(),
            store: ConversationStore::new(self.policy),
        });
        self.active = Some(id);
        id
    }

    pub fn select(&mut self, id: Uuid) -> Outcome {
        if self.chat(id).is_none() {
            return Outcome::Rejected(Rejection::UnknownId);
        }
        if self.active == Some(id) {
            return Outcome::Unchanged;
        }
        self.active = Some(id);
        self.dispatch(ViewAction::Unhover);
        Outcome::Applied
    }

    pub fn rename(&mut self, id: Uuid, name: &str) -> Outcome {
        let name = name.trim();
        let Some(chat) = self.chat_mut(id) else {
            return Outcome::Rejected(Rejection::UnknownId);
        };
        if name.is_empty() {
            return Outcome::Rejected(Rejection::EmptyInput);
        }
        if chat.name == name {
            return Outcome::Unchanged;
        }
        chat.name = name.to_owned();
        self.dispatch(ViewAction::CloseChatMenu);
        Outcome::Applied
    }

    /// Removes a chat. If it was active, the chat listed after it (or else
    /// the one before) becomes active.
    pub fn delete(&mut self, id: Uuid) -> Outcome {
        let Some(index) = self.chats.iter().position(|c| c.id == id) else {
            return Outcome::Rejected(Rejection::UnknownId);
        };
        self.chats.remove(index);

        if self.active == Some(id) {
            let next = index.min(self.chats.len().saturating_sub(1));
            self.active = self.chats.get(next).map(|c| c.id);
        }
        self.dispatch(ViewAction::ForgetChat(id));
        Outcome::Applied
    }

    /// Chats whose name contains `query`, ignoring case. A blank query matches all.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Chat> + use<'a> {
        let query = query.trim().to_lowercase();
        self.chats
            .iter()
            .filter(move |c| query.is_empty() || c.name.to_lowercase().contains(&query))
    }

    pub fn send(&mut self, chat: Uuid, text: &str) -> Outcome {
        match self.chat_mut(chat) {
            Some(chat) => chat.store.append(text),
            None => Outcome::Rejected(Rejection::UnknownId),
        }
    }

    pub fn hover(&mut self, chat: Uuid, message: MessageId) -> Outcome {
        if self.chat(chat).and_then(|c| c.store.get(message)).is_none() {
            return Outcome::Rejected(Rejection::UnknownId);
        }
        self.dispatch(ViewAction::Hover(message));
        Outcome::Applied
    }

    pub fn start_edit(&mut self, chat: Uuid, message: MessageId) -> Outcome {
        let Some(target) = self.chat(chat).and_then(|c| c.store.get(message)).cloned() else {
            return Outcome::Rejected(Rejection::UnknownId);
        };
        if !target.sent {
            return Outcome::Rejected(Rejection::UnknownId);
        }
        self.dispatch(ViewAction::StartEdit { chat, message: target });
        Outcome::Applied
    }

    /// Records the draft and, if `trigger` is one `confirmation` accepts,
    /// commits it and closes the editor. `None` means still editing.
    ///
    /// A submit naming a chat other than the one under edit is rejected and
    /// leaves the editor alone.
    pub fn submit_edit(
        &mut self,
        chat: Uuid,
        draft: String,
        trigger: ConfirmTrigger,
        confirmation: EditConfirmation,
    ) -> Option<Outcome> {
        let cursor = self.view.editing.clone()?;
        if cursor.chat != chat {
            return Some(Outcome::Rejected(Rejection::UnknownId));
        }
        self.dispatch(ViewAction::Draft(draft.clone()));
        if !confirmation.confirms(trigger) {
            return None;
        }

        let outcome = match self.chat_mut(cursor.chat) {
            Some(chat) => chat.store.edit_and_truncate(cursor.message, &draft),
            None => Outcome::Rejected(Rejection::UnknownId),
        };
        // A blank draft keeps the editor open so it can be fixed.
        if outcome != Outcome::Rejected(Rejection::EmptyInput) {
            self.dispatch(ViewAction::CloseEditor);
        }
        Some(outcome)
    }

    pub fn cancel_edit(&mut self) {
        self.dispatch(ViewAction::CloseEditor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MessageMode;

    fn texts(workspace: &Workspace, chat: Uuid) -> Vec<String> {
        workspace
            .chat(chat)
            .map(|c| c.store.transcript().iter().map(|m| m.text.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn new_chat_becomes_active_and_listed_first() {
        let mut workspace = Workspace::new(TruncatePolicy::OnlyIfChanged);
        let first = workspace.new_chat("");
        let second = workspace.new_chat("Azure ML project");

        assert_eq!(workspace.active().map(|c| c.id), Some(second));
        let names: Vec<_> = workspace.chats().iter().map(|c| (c.id, c.name.as_str())).collect();
        assert_eq!(names, [(second, "Azure ML project"), (first, DEFAULT_CHAT_NAME)]);
    }

    #[test]
    fn select_rename_and_search() {
        let mut workspace = Workspace::new(TruncatePolicy::OnlyIfChanged);
        let meeting = workspace.new_chat("Team meeting");
        let _react = workspace.new_chat("Frontend React");

        assert_eq!(workspace.select(meeting), Outcome::Applied);
        assert_eq!(workspace.select(meeting), Outcome::Unchanged);
        assert_eq!(workspace.select(Uuid::nil()), Outcome::Rejected(Rejection::UnknownId));

        assert_eq!(workspace.rename(meeting, "  "), Outcome::Rejected(Rejection::EmptyInput));
        assert_eq!(workspace.rename(meeting, "Weekly sync"), Outcome::Applied);
        assert_eq!(workspace.rename(meeting, "Weekly sync"), Outcome::Unchanged);

        let hits: Vec<_> = workspace.search("SYNC").map(|c| c.id).collect();
        assert_eq!(hits, [meeting]);
        assert_eq!(workspace.search(" ").count(), 2);
        assert_eq!(workspace.search("openshift").count(), 0);
    }

    #[test]
    fn deleting_active_chat_moves_to_neighbour() {
        let mut workspace = Workspace::new(TruncatePolicy::OnlyIfChanged);
        let a = workspace.new_chat("a");
        let b = workspace.new_chat("b");
        let c = workspace.new_chat("c");
        // listed c, b, a
        assert_eq!(workspace.select(b), Outcome::Applied);

        assert_eq!(workspace.delete(b), Outcome::Applied);
        assert_eq!(workspace.active().map(|chat| chat.id), Some(a));

        assert_eq!(workspace.delete(a), Outcome::Applied);
        assert_eq!(workspace.active().map(|chat| chat.id), Some(c));

        assert_eq!(workspace.delete(c), Outcome::Applied);
        assert!(workspace.active().is_none());
        assert_eq!(workspace.delete(c), Outcome::Rejected(Rejection::UnknownId));
    }

    #[test]
    fn edit_flow_truncates_on_enter() {
        let mut workspace = Workspace::new(TruncatePolicy::OnlyIfChanged);
        let chat = workspace.new_chat("");
        assert!(workspace.send(chat, "hello").is_applied());
        assert!(workspace.send(chat, "world").is_applied());
        let first = workspace.chat(chat).unwrap().store.transcript()[0].id;

        assert_eq!(workspace.start_edit(chat, first), Outcome::Applied);
        assert_eq!(workspace.view().mode_of(chat, first), MessageMode::Editing { draft: "hello" });

        // Button is not how this workspace confirms; the draft is kept.
        let kept = workspace.submit_edit(chat, "hi".into(), ConfirmTrigger::Button, EditConfirmation::OnEnter);
        assert_eq!(kept, None);
        assert_eq!(workspace.view().mode_of(chat, first), MessageMode::Editing { draft: "hi" });
        assert_eq!(texts(&workspace, chat), ["hello", "world"]);

        let done = workspace.submit_edit(chat, "hi".into(), ConfirmTrigger::Enter, EditConfirmation::OnEnter);
        assert_eq!(done, Some(Outcome::Applied));
        assert_eq!(workspace.view().mode_of(chat, first), MessageMode::Display);
        assert_eq!(texts(&workspace, chat), ["hi"]);
    }

    #[test]
    fn cancel_discards_draft() {
        let mut workspace = Workspace::new(TruncatePolicy::Always);
        let chat = workspace.new_chat("");
        let _ = workspace.send(chat, "one");
        let _ = workspace.send(chat, "two");
        let first = workspace.chat(chat).unwrap().store.transcript()[0].id;

        let _ = workspace.start_edit(chat, first);
        let _ = workspace.submit_edit(chat, "uno".into(), ConfirmTrigger::Draft, EditConfirmation::OnButtonConfirm);
        workspace.cancel_edit();

        assert_eq!(workspace.view().editing, None);
        assert_eq!(texts(&workspace, chat), ["one", "two"]);
    }

    #[test]
    fn blank_confirm_keeps_editor_open() {
        let mut workspace = Workspace::new(TruncatePolicy::Always);
        let chat = workspace.new_chat("");
        let _ = workspace.send(chat, "one");
        let first = workspace.chat(chat).unwrap().store.transcript()[0].id;

        let _ = workspace.start_edit(chat, first);
        let outcome = workspace.submit_edit(chat, "  ".into(), ConfirmTrigger::Button, EditConfirmation::OnButtonConfirm);
        assert_eq!(outcome, Some(Outcome::Rejected(Rejection::EmptyInput)));
        assert!(workspace.view().editing.is_some());
    }

    #[test]
    fn submit_without_editor_does_nothing() {
        let mut workspace = Workspace::new(TruncatePolicy::Always);
        let chat = workspace.new_chat("");
        assert_eq!(
            workspace.submit_edit(chat, "x".into(), ConfirmTrigger::Enter, EditConfirmation::OnEnter),
            None
        );
    }

    #[test]
    fn submit_for_another_chat_is_rejected() {
        let mut workspace = Workspace::new(TruncatePolicy::Always);
        let edited = workspace.new_chat("edited");
        let _ = workspace.send(edited, "one");
        let _ = workspace.send(edited, "two");
        let other = workspace.new_chat("other");
        let first = workspace.chat(edited).unwrap().store.transcript()[0].id;
        let _ = workspace.start_edit(edited, first);

        let outcome = workspace.submit_edit(other, "uno".into(), ConfirmTrigger::Enter, EditConfirmation::OnEnter);
        assert_eq!(outcome, Some(Outcome::Rejected(Rejection::UnknownId)));
        assert_eq!(texts(&workspace, edited), ["one", "two"]);
        assert_eq!(workspace.view().mode_of(edited, first), MessageMode::Editing { draft: "one" });
    }

    #[test]
    fn deleting_chat_under_edit_closes_editor() {
        let mut workspace = Workspace::new(TruncatePolicy::Always);
        let chat = workspace.new_chat("");
        let _ = workspace.send(chat, "one");
        let first = workspace.chat(chat).unwrap().store.transcript()[0].id;
        let _ = workspace.start_edit(chat, first);

        let _ = workspace.delete(chat);
        assert_eq!(workspace.view().editing, None);
    }

    #[test]
    fn hover_needs_a_real_message() {
        let mut workspace = Workspace::new(TruncatePolicy::Always);
        let chat = workspace.new_chat("");
        let _ = workspace.send(chat, "one");
        let first = workspace.chat(chat).unwrap().store.transcript()[0].id;

        assert_eq!(workspace.hover(chat, MessageId(Uuid::nil())), Outcome::Rejected(Rejection::UnknownId));
        assert_eq!(workspace.hover(chat, first), Outcome::Applied);
        assert!(workspace.view().is_hovered(first));
    }
}
