//! Display lines for a help-desk thread: `[<sender> | <dd Mon yyyy HH:MM>] <body>`.

use helpdesk_core::{Message, SenderType};

const TIME_FORMAT: &str = "%d %b %Y %H:%M";

/// Guests are shown as `Guest <username>`, staff by username.
pub fn sender_label(message: &Message) -> String {
    match message.sender_type {
        SenderType::Guest => format!("Guest {}", message.sender_username),
        SenderType::Staff => message.sender_username.clone(),
    }
}

pub fn format_line(message: &Message) -> String {
    format!(
        "[{} | {}] {}",
        sender_label(message),
        message.created_at.format(TIME_FORMAT),
        message.body
    )
}

pub fn format_transcript(messages: &[Message]) -> Vec<String> {
    messages.iter().map(format_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use helpdesk_core::{ConversationKey, NewMessage, RoleGroup};

    #[test]
    fn test_format_line() {
        let key = ConversationKey::new("g1", "101", RoleGroup::Receptionist);
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 10, 30, 0).unwrap();

        let guest = NewMessage::from_guest(key.clone(), "need towels").into_message(1, at);
        let staff = NewMessage::from_staff(key, "r1", "on the way").into_message(2, at);

        assert_eq!(
            format_transcript(&[guest, staff]),
            vec![
                "[Guest g1 | 19 Oct 2026 10:30] need towels".to_string(),
                "[r1 | 19 Oct 2026 10:30] on the way".to_string(),
            ]
        );
    }
}
