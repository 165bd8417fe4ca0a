//! Checklist of self-reported social tasks.

use serde::{Deserialize, Serialize};
use std::fmt;

const X_PROFILE_URL: &str = "https://x.com/bullybullsonsol";
const DISCORD_INVITE_URL: &str = "https://discord.gg/bullsbully";

/// A social task a participant reports having completed.
///
/// Completion is never verified against the social platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Task {
    /// Follow the project account on X
    Twitter,
    /// Turn on post notifications
    Notifications,
    /// Join the Discord server
    Discord,
    /// Like the pinned post
    TwitterLike,
    /// Retweet the pinned post
    TwitterRetweet,
}

impl Task {
    /// Every task, in display order.
    pub const ALL: [Task; 5] = [
        Task::Twitter,
        Task::Notifications,
        Task::Discord,
        Task::TwitterLike,
        Task::TwitterRetweet,
    ];

    /// Key under which the task is reported in `requirements`.
    pub fn key(&self) -> &'static str {
        match self {
            Task::Twitter => "twitter",
            Task::Notifications => "notifications",
            Task::Discord => "discord",
            Task::TwitterLike => "twitterLike",
            Task::TwitterRetweet => "twitterRetweet",
        }
    }

    /// Checklist label.
    pub fn label(&self) -> &'static str {
        match self {
            Task::Twitter => "Follow on Twitter",
            Task::Notifications => "Turn On Notifications",
            Task::Discord => "Join Discord",
            Task::TwitterLike => "Like Pinned Tweet",
            Task::TwitterRetweet => "Retweet Pinned Tweet",
        }
    }

    /// External page the user is sent to when activating the task.
    pub fn link(&self) -> &'static str {
        match self {
            Task::Discord => DISCORD_INVITE_URL,
            _ => X_PROFILE_URL,
        }
    }

    /// Whether the task is done on X rather than Discord.
    pub fn is_twitter(&self) -> bool {
        !matches!(self, Task::Discord)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
