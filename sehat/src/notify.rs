//! User-facing notices and navigation requests produced by the flows.
//!
//! Flows never print or navigate themselves; they push a [`Notification`] and
//! set a [`Route`] for the shell to act on.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

pub const CONNECTIVITY_ERROR: &str = "Error connecting to the server";
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warn, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Warn => "warn",
            NoticeLevel::Error => "error",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

/// Pages a flow can ask the shell to move to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Route {
    Login,
    Profile,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Profile => "/profile",
        }
    }
}

/// Toast queue; the shell drains it after each update.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: VecDeque<Notification>,
}

impl Notifier {
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(level = ?notification.level, message = %notification.message, "notify");
        self.queue.push_back(notification);
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }
}
