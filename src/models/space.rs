use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A space record as the backend reports it. The console keeps a read-only
/// cached copy; the id is server-assigned and immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub configs: Value,
}

impl Space {
    pub fn created_string(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}
