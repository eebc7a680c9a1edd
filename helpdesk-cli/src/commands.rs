//! Command dispatch: runs one parsed command against the help desk services and returns the
//! lines to print.

use helpdesk::{format_transcript, reselect, HelpdeskComponents, HelpdeskError};
use helpdesk_core::{ConversationKey, ConversationSummary};
use tracing::debug;

use crate::cli::{Cli, Commands};

type Result<T> = std::result::Result<T, HelpdeskError>;

pub async fn run(cli: &Cli, components: &HelpdeskComponents) -> Result<Vec<String>> {
    let principal = cli.principal()?;
    debug!(user = %principal.username, roles = ?principal.roles, "Running command");

    match &cli.command {
        Commands::Send { room, to, body } => {
            let sent = components
                .conversations
                .send_as_guest(&principal, room, to, body)
                .await?;
            Ok(vec![format!("Sent message #{} to {}", sent.id, sent.key)])
        }
        Commands::Reply { key, body } => {
            let key = key.to_key()?;
            let sent = components
                .conversations
                .reply_as_staff(&principal, &key, body)
                .await?;
            Ok(vec![format!("Sent reply #{} to {}", sent.id, sent.key)])
        }
        Commands::Thread { key } => {
            let key = key.to_key()?;
            let thread = components
                .conversations
                .open_conversation(&principal, &key)
                .await?;
            if thread.is_empty() {
                return Ok(vec![format!("No messages yet for {}", key)]);
            }
            Ok(format_transcript(&thread))
        }
        Commands::MarkRead { key } => {
            let key = key.to_key()?;
            components
                .conversations
                .mark_read_as_staff(&principal, &key)
                .await?;
            Ok(vec![format!("Marked {} as read", key)])
        }
        Commands::Inbox {
            selected_room,
            selected_guest,
            selected_role,
        } => {
            let previous = match (selected_room, selected_guest, selected_role) {
                (Some(room), Some(guest), Some(role)) => {
                    Some(ConversationKey::parse(guest, room, role)?)
                }
                _ => None,
            };
            let rows = components.summaries.inbox_for(&principal).await?;
            Ok(render_inbox(&rows, reselect(previous.as_ref(), &rows).as_ref()))
        }
        Commands::Reachable => {
            let groups = principal.reachable_role_groups();
            if groups.is_empty() {
                return Ok(vec!["No help desk inboxes".to_string()]);
            }
            Ok(groups.iter().map(|group| group.to_string()).collect())
        }
    }
}

/// One line per thread, `>` marking the selected one.
pub fn render_inbox(
    rows: &[ConversationSummary],
    selected: Option<&ConversationKey>,
) -> Vec<String> {
    if rows.is_empty() {
        return vec!["Inbox is empty".to_string()];
    }
    rows.iter()
        .map(|row| {
            let marker = if Some(&row.key) == selected { ">" } else { " " };
            format!(
                "{} Room {} | {} | {} | unread {} | {}",
                marker,
                row.key.room_number,
                row.guest_display_name,
                row.key.recipient_role,
                row.unread_count,
                row.last_message_at.format("%d %b %Y %H:%M")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use clap::Parser;
    use helpdesk::{HelpdeskConfig, StoreType};
    use helpdesk_core::RoleGroup;
    use std::sync::Arc;
    use storage::InMemoryMessageStore;

    fn components() -> HelpdeskComponents {
        let config = HelpdeskConfig {
            database_url: "sqlite::memory:".to_string(),
            log_file: "logs/helpdesk.log".to_string(),
            store_type: StoreType::Memory,
            rooms: vec!["101".to_string(), "102".to_string()],
            guest_names: "g1@101=Alice Moreau".to_string(),
        };
        HelpdeskComponents::with_store(Arc::new(InMemoryMessageStore::new()), &config)
    }

    async fn exec(components: &HelpdeskComponents, args: &[&str]) -> Result<Vec<String>> {
        let cli = Cli::try_parse_from(std::iter::once("helpdesk").chain(args.iter().copied()))
            .unwrap();
        run(&cli, components).await
    }

    #[tokio::test]
    async fn test_guest_send_then_staff_inbox_and_reply() {
        let components = components();

        let sent = exec(
            &components,
            &["--user", "g1", "--roles", "GUEST", "send", "--room", "101", "--to", "RECEPTIONIST", "need towels"],
        )
        .await
        .unwrap();
        assert_eq!(sent, vec!["Sent message #1 to room 101 / g1 / RECEPTIONIST"]);

        let inbox = exec(&components, &["--user", "r1", "--roles", "RECEPTIONIST", "inbox"])
            .await
            .unwrap();
        assert_eq!(inbox.len(), 1);
        assert!(inbox[0].starts_with("> Room 101 | Alice Moreau | RECEPTIONIST | unread 1"));

        let thread_key = ["--room", "101", "--guest", "g1", "--role", "RECEPTIONIST"];
        let mut args = vec!["--user", "r1", "--roles", "RECEPTIONIST", "thread"];
        args.extend(thread_key);
        let thread = exec(&components, &args).await.unwrap();
        assert_eq!(thread.len(), 1);
        assert!(thread[0].starts_with("[Guest g1 | "));
        assert!(thread[0].ends_with("] need towels"));

        let inbox = exec(&components, &["--user", "r1", "--roles", "RECEPTIONIST", "inbox"])
            .await
            .unwrap();
        assert!(inbox[0].contains("unread 0"));

        let mut args = vec!["--user", "r1", "--roles", "RECEPTIONIST", "reply"];
        args.extend(thread_key);
        args.push("on the way");
        let reply = exec(&components, &args).await.unwrap();
        assert_eq!(reply, vec!["Sent reply #2 to room 101 / g1 / RECEPTIONIST"]);
    }

    #[tokio::test]
    async fn test_errors_carry_user_messages() {
        let components = components();

        let err = exec(
            &components,
            &["--user", "g1", "--roles", "GUEST", "send", "--room", "404", "--to", "MANAGER", "hi"],
        )
        .await
        .unwrap_err();
        assert_eq!(err.user_message(), "Room not found");

        let err = exec(
            &components,
            &[
                "--user", "r1", "--roles", "RECEPTIONIST", "mark-read", "--room", "101", "--guest",
                "g1", "--role", "ADMIN",
            ],
        )
        .await
        .unwrap_err();
        assert_eq!(err.user_message(), "ADMIN conversations are not in your inbox");
    }

    #[tokio::test]
    async fn test_output_lines_are_command_results_only() {
        let components = components();
        exec(
            &components,
            &["--user", "g1", "--roles", "GUEST", "send", "--room", "101", "--to", "MANAGER", "late checkout?"],
        )
        .await
        .unwrap();

        let empty = exec(&components, &["--user", "r1", "--roles", "RECEPTIONIST", "inbox"])
            .await
            .unwrap();
        assert_eq!(empty, vec!["Inbox is empty"]);

        let inbox = exec(&components, &["--user", "m1", "--roles", "MANAGER", "inbox"])
            .await
            .unwrap();
        assert_eq!(inbox.len(), 1);
        for line in &inbox {
            assert!(line.starts_with("> Room 101 | Alice Moreau | MANAGER | unread 1"));
            assert!(!line.contains("INFO") && !line.contains("close time.busy"));
            assert!(!line.contains('\u{1b}'));
        }
    }

    #[tokio::test]
    async fn test_reachable_lists_groups() {
        let components = components();
        let groups = exec(&components, &["--user", "m1", "--roles", "manager,receptionist", "reachable"])
            .await
            .unwrap();
        assert_eq!(groups, vec!["RECEPTIONIST", "MANAGER"]);

        let none = exec(&components, &["--user", "h1", "--roles", "HOUSEKEEPING", "reachable"])
            .await
            .unwrap();
        assert_eq!(none, vec!["No help desk inboxes"]);
    }

    #[test]
    fn test_render_inbox_marks_selection() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 10, 30, 0).unwrap();
        let row = |guest: &str, room: &str| ConversationSummary {
            key: ConversationKey::new(guest, room, RoleGroup::Manager),
            guest_display_name: guest.to_string(),
            last_message_at: at,
            unread_count: 2,
        };
        let rows = vec![row("g1", "101"), row("g2", "102")];

        let lines = render_inbox(&rows, Some(&rows[1].key));
        assert_eq!(lines[0], "  Room 101 | g1 | MANAGER | unread 2 | 19 Oct 2026 10:30");
        assert_eq!(lines[1], "> Room 102 | g2 | MANAGER | unread 2 | 19 Oct 2026 10:30");
        assert_eq!(render_inbox(&[], None), vec!["Inbox is empty"]);
    }
}
