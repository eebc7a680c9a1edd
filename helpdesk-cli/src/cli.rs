//! CLI parser: global identity flags plus one subcommand per help desk operation.

use clap::{Args, Parser, Subcommand};
use helpdesk::HelpdeskError;
use helpdesk_core::{ConversationKey, Principal};

#[derive(Parser, Debug)]
#[command(name = "helpdesk")]
#[command(about = "Hotel help desk: guest messages to staff role groups", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Acting username.
    #[arg(long, global = true, default_value = "")]
    pub user: String,

    /// Comma-separated roles of the acting user, e.g. `GUEST` or `RECEPTIONIST,MANAGER`.
    #[arg(long, global = true, value_delimiter = ',')]
    pub roles: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Identifies one thread: guest, room and addressed role group.
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    #[arg(long)]
    pub room: String,
    #[arg(long)]
    pub guest: String,
    #[arg(long)]
    pub role: String,
}

impl KeyArgs {
    pub fn to_key(&self) -> Result<ConversationKey, HelpdeskError> {
        Ok(ConversationKey::parse(&self.guest, &self.room, &self.role)?)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Guest sends a message to a staff role group.
    Send {
        #[arg(long)]
        room: String,
        /// RECEPTIONIST, MANAGER or ADMIN
        #[arg(long)]
        to: String,
        body: String,
    },
    /// Staff reply into a guest's thread.
    Reply {
        #[command(flatten)]
        key: KeyArgs,
        body: String,
    },
    /// Show a thread. Staff viewing a thread marks it read.
    Thread {
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Mark a thread's guest messages as read.
    MarkRead {
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Staff inbox for the acting user's roles.
    Inbox {
        #[arg(long)]
        selected_room: Option<String>,
        #[arg(long)]
        selected_guest: Option<String>,
        #[arg(long)]
        selected_role: Option<String>,
    },
    /// Role groups whose threads the acting user can see.
    Reachable,
}

impl Cli {
    /// Principal from `--user` and `--roles`.
    pub fn principal(&self) -> Result<Principal, HelpdeskError> {
        Ok(Principal::from_role_names(&self.user, &self.roles)?)
    }
}
