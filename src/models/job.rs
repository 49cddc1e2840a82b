use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobListing {
    pub id: Uuid,
    pub external_id: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub title: String,
    pub company: String,
    pub slug: Option<String>,
    pub company_logo: Option<String>,
    pub description: String,
    pub location: Option<String>,
    pub remote: bool,
    pub job_type: String,
    pub domain: Option<String>,
    pub salary_range: Option<String>,
    pub apply_url: String,
    pub tags: Option<Json<Vec<String>>>,
    pub categories: Option<Json<Vec<String>>>,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Column list shared by every job_listings SELECT.
pub const JOB_COLUMNS: &str = "id, external_id, source, source_url, title, company, slug, \
     company_logo, description, location, remote, job_type, domain, salary_range, apply_url, \
     tags, categories, featured, published_at, created_at, updated_at";

impl JobListing {
    pub fn tags(&self) -> &[String] {
        self.tags.as_ref().map(|t| t.0.as_slice()).unwrap_or(&[])
    }
}
