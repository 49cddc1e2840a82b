use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employment type after normalization. Sources report free text
/// ("Full-Time", "freelance", "temporary"); everything folds into
/// these three buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
        }
    }

    /// Map a source-provided employment type string onto the canonical enum.
    pub fn from_source(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("part-time") || lower.contains("part time") {
            return JobType::PartTime;
        }
        if lower.contains("contract") || lower.contains("freelance") || lower.contains("temporary")
        {
            return JobType::Contract;
        }
        JobType::FullTime
    }
}

/// The unified record shape every source adapter produces. Source-specific
/// payload structs never leave their adapter; this is what crosses into the
/// orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub external_id: Option<String>,
    pub source: String,
    pub source_url: Option<String>,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub description: String,
    pub location: Option<String>,
    pub remote: bool,
    pub job_type: JobType,
    pub domain: Option<String>,
    pub categories: Vec<String>,
    pub salary_range: Option<String>,
    pub apply_url: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub published_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_maps_synonyms() {
        assert_eq!(JobType::from_source("Full-Time"), JobType::FullTime);
        assert_eq!(JobType::from_source("part time"), JobType::PartTime);
        assert_eq!(JobType::from_source("Part-Time"), JobType::PartTime);
        assert_eq!(JobType::from_source("contract"), JobType::Contract);
        assert_eq!(JobType::from_source("Freelance"), JobType::Contract);
        assert_eq!(JobType::from_source("temporary"), JobType::Contract);
        assert_eq!(JobType::from_source(""), JobType::FullTime);
        assert_eq!(JobType::from_source("internship"), JobType::FullTime);
    }
}
