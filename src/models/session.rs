use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A session record. `space_id` is absent while the session is not connected
/// to any space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub configs: Value,
    #[serde(default)]
    pub space_id: Option<String>,
}

impl Session {
    pub fn is_connected(&self) -> bool {
        self.space_id.is_some()
    }

    /// Label shown in the space column.
    pub fn space_label(&self) -> &str {
        self.space_id.as_deref().unwrap_or("not connected")
    }

    pub fn created_string(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_label_falls_back_when_unconnected() {
        let session = Session {
            id: "sess-1".into(),
            created_at: Utc::now(),
            configs: Value::Null,
            space_id: None,
        };
        assert_eq!(session.space_label(), "not connected");
        assert!(!session.is_connected());
    }
}
