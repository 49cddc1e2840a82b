use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub region_parent: Option<String>,
    pub timezone_based: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Canonical location category produced by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Country,
    Region,
    Worldwide,
    Timezone,
}

impl LocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Country => "country",
            LocationKind::Region => "region",
            LocationKind::Worldwide => "worldwide",
            LocationKind::Timezone => "timezone",
        }
    }
}

/// One normalized location, before it is resolved against the locations table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub name: String,
    pub kind: LocationKind,
    pub region_parent: Option<String>,
    pub timezone_based: bool,
}

impl LocationEntry {
    pub fn worldwide() -> Self {
        Self {
            name: "Worldwide".to_string(),
            kind: LocationKind::Worldwide,
            region_parent: None,
            timezone_based: false,
        }
    }
}
