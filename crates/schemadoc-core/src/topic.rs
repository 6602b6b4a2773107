//! Topic — the data-stream identifier attached to a source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  #[serde(default)]
  pub topic_id:     Option<i64>,
  pub name:         String,
  #[serde(default)]
  pub contains_pii: bool,
  #[serde(default, deserialize_with = "timestamp::optional")]
  pub created_at:   Option<DateTime<Utc>>,
  #[serde(default, deserialize_with = "timestamp::optional")]
  pub updated_at:   Option<DateTime<Utc>>,
}
