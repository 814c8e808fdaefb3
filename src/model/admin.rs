use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Admin {
    pub id: u64,
    pub admin_id: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: Option<DateTime<Utc>>,
}
