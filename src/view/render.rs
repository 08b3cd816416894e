//! HTML for the chat page. Every function here is pure: same workspace and
//! view state in, same markup out.

use uuid::Uuid;

use crate::{
    auth::Identity,
    chats::{Chat, Workspace},
    conversation::Message,
    include_res, markdown_to_html,
    res::escape_html,
};

use super::{EditConfirmation, MessageMode, ViewState};

pub fn chat_page(
    workspace: &Workspace,
    chat: &Chat,
    identity: &Identity,
    query: &str,
    confirmation: EditConfirmation,
) -> String {
    let messages = transcript(chat.id, chat.store.transcript(), workspace.view(), confirmation);

    include_res!(str, "/pages/chat.html")
        .replace("{sidebar}", &sidebar(workspace, chat.id, identity, query))
        .replace("{messages}", &messages)
        .replace("{chat_id}", &chat.id.to_string())
        .replace("{chat_name}", &escape_html(&chat.name))
}

pub fn transcript(chat: Uuid, messages: &[Message], view: &ViewState, confirmation: EditConfirmation) -> String {
    messages
        .iter()
        .map(|msg| match view.mode_of(chat, msg.id) {
            MessageMode::Display => message(chat, msg, view.is_hovered(msg.id)),
            MessageMode::Editing { draft } => message_editing(chat, msg, draft, confirmation),
        })
        .collect()
}

fn message(chat: Uuid, msg: &Message, hovered: bool) -> String {
    let edit_button = if msg.sent {
        format!(
            r#"<form method="post" action="/c/{chat}/m/{}/edit"><button type="submit" class="edit" aria-label="Edit">Edit</button></form>"#,
            msg.id
        )
    } else {
        String::new()
    };

    include_res!(str, "/pages/message.html")
        .replace("{side}", if msg.sent { "sent" } else { "received" })
        .replace("{hovered}", if hovered { "hovered" } else { "" })
        .replace("{edit_button}", &edit_button)
        .replace("{chat_id}", &chat.to_string())
        .replace("{id}", &msg.id.to_string())
        .replace("{raw}", &escape_html(&msg.text))
        .replace("{content}", &markdown_to_html(&msg.text))
}

/// The form carries exactly one `trigger` field: the hidden one the Enter
/// handler rewrites, or the confirm button when it is the submitter.
fn message_editing(chat: Uuid, msg: &Message, draft: &str, confirmation: EditConfirmation) -> String {
    let (trigger_field, on_keydown, confirm_button) = match confirmation {
        EditConfirmation::OnEnter => (
            r#"<input type="hidden" name="trigger" value="draft">"#,
            r#"onkeydown="if (event.key === 'Enter' && !event.shiftKey) { event.preventDefault(); this.form.trigger.value = 'enter'; this.form.submit(); }""#,
            "",
        ),
        EditConfirmation::OnButtonConfirm => (
            "",
            "",
            r#"<button type="submit" name="trigger" value="button" class="confirm">Confirm</button>"#,
        ),
    };

    include_res!(str, "/pages/message_editing.html")
        .replace("{trigger_field}", trigger_field)
        .replace("{on_keydown}", on_keydown)
        .replace("{confirm_button}", confirm_button)
        .replace("{chat_id}", &chat.to_string())
        .replace("{id}", &msg.id.to_string())
        .replace("{draft}", &escape_html(draft))
}

pub fn sidebar(workspace: &Workspace, active: Uuid, identity: &Identity, query: &str) -> String {
    let view = workspace.view();

    let chat_items: String = workspace
        .search(query)
        .map(|chat| {
            let menu = if view.chat_menu == Some(chat.id) {
                include_res!(str, "/pages/chat_menu.html")
                    .replace("{id}", &chat.id.to_string())
                    .replace("{name}", &escape_html(&chat.name))
            } else {
                String::new()
            };

            include_res!(str, "/pages/chat_item.html")
                .replace("{active}", if chat.id == active { "active" } else { "" })
                .replace("{menu}", &menu)
                .replace("{id}", &chat.id.to_string())
                .replace("{name}", &escape_html(&chat.name))
        })
        .collect();

    let initials = escape_html(&identity.initials());
    let display_name = escape_html(&identity.display_name());
    let account = escape_html(identity.account.as_deref().unwrap_or_default());

    let user_menu = if view.user_menu_open {
        include_res!(str, "/pages/user_menu.html")
            .replace("{initials}", &initials)
            .replace("{display_name}", &display_name)
            .replace("{account}", &account)
            .replace("{username}", &escape_html(identity.email.as_deref().unwrap_or(&identity.user_id)))
    } else {
        String::new()
    };

    include_res!(str, "/pages/sidebar.html")
        .replace("{collapsed}", if view.sidebar_collapsed { "collapsed" } else { "" })
        .replace("{active_id}", &active.to_string())
        .replace("{chat_items}", &chat_items)
        .replace("{user_menu}", &user_menu)
        .replace("{initials}", &initials)
        .replace("{display_name}", &display_name)
        .replace("{account}", &account)
        .replace("{query}", &escape_html(query))
}
