use std::collections::VecDeque;

use crate::api::ApiError;

const EVENT_LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

/// Navigation triggers handed to the presentation collaborator. The console
/// itself never acts on these beyond publishing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    SessionMessages(String),
    SpacePages(String),
}

/// Everything the console wants to surface: failures that used to be ad hoc
/// log lines, parse errors, and navigation requests.
#[derive(Debug, Clone)]
pub enum ConsoleEvent {
    ApiFailure {
        operation: &'static str,
        error: ApiError,
    },
    InvalidJson {
        workflow: &'static str,
    },
    Navigate(NavTarget),
}

/// A rendered event, kept for the status bar and the event history.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Bounded log of recent console events. Failures land here instead of being
/// swallowed, and are mirrored to `tracing` for offline diagnosis.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: VecDeque<Notice>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: ConsoleEvent) {
        let notice = match &event {
            ConsoleEvent::ApiFailure { operation, error } => {
                tracing::error!(operation, %error, "resource api call failed");
                Notice {
                    level: NoticeLevel::Error,
                    message: format!("{operation} failed: {error}"),
                }
            }
            ConsoleEvent::InvalidJson { workflow } => {
                tracing::warn!(workflow, "configs buffer is not valid json");
                Notice {
                    level: NoticeLevel::Warn,
                    message: "invalid JSON in configs buffer".to_string(),
                }
            }
            ConsoleEvent::Navigate(target) => {
                tracing::info!(?target, "navigation requested");
                let message = match target {
                    NavTarget::SessionMessages(id) => format!("open messages for session {id}"),
                    NavTarget::SpacePages(id) => format!("open pages for space {id}"),
                };
                Notice {
                    level: NoticeLevel::Info,
                    message,
                }
            }
        };
        if self.entries.len() == EVENT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(notice);
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.entries.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_and_exposes_latest() {
        let mut log = EventLog::new();
        assert!(log.latest().is_none());
        log.publish(ConsoleEvent::InvalidJson { workflow: "create" });
        log.publish(ConsoleEvent::ApiFailure {
            operation: "delete session",
            error: ApiError::Backend {
                code: 7,
                message: "not found".into(),
            },
        });
        let latest = log.latest().unwrap();
        assert_eq!(latest.level, NoticeLevel::Error);
        assert!(latest.message.contains("delete session"));
        assert_eq!(log.entries.len(), 2);
    }

    #[test]
    fn log_is_bounded() {
        let mut log = EventLog::new();
        for _ in 0..(EVENT_LOG_CAPACITY + 10) {
            log.publish(ConsoleEvent::InvalidJson { workflow: "create" });
        }
        assert_eq!(log.entries.len(), EVENT_LOG_CAPACITY);
    }
}
