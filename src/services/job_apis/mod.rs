pub mod ai_jobs_net;
pub mod himalayas;
pub mod jobicy;
pub mod remotive;
pub mod themuse;

use crate::error::Result;
use crate::models::job_record::JobRecord;
use crate::services::relevance;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// One external job feed. Adapters own their payload schemas and hand the
/// orchestrator canonical records only.
#[async_trait]
pub trait JobSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch and transform the source's current postings. A failing source
    /// returns Err; the orchestrator records it and moves on.
    async fn fetch(&self) -> Result<Vec<JobRecord>>;
}

/// External ids arrive as numbers or strings depending on the feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExternalId {
    Int(i64),
    Str(String),
}

impl ExternalId {
    pub fn into_string(self) -> String {
        match self {
            ExternalId::Int(n) => n.to_string(),
            ExternalId::Str(s) => s,
        }
    }
}

/// Parse a source-provided publication date, falling back to now. Feeds use a
/// mix of RFC 3339 and bare date/datetime strings.
pub(crate) fn parse_published(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return Utc::now();
    };
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return naive.and_utc();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return naive.and_utc();
        }
    }

    Utc::now()
}

/// Guess a company logo from the company name via Clearbit.
pub(crate) fn clearbit_logo(company: &str) -> String {
    let domain = company.to_lowercase().replace(' ', "");
    format!("https://logo.clearbit.com/{}.com", domain)
}

/// Drop duplicate tags, keeping first occurrences in order.
pub(crate) fn dedup_tags(tags: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    tags.retain(|tag| seen.insert(tag.clone()));
}

/// Append every keyword found in title+description that is not already in the
/// tag list. Acronym keywords match on word boundaries.
pub(crate) fn scan_keywords(title: &str, description: &str, keywords: &[&str], tags: &mut Vec<String>) {
    let text = format!("{} {}", title, description).to_lowercase();
    for &keyword in keywords {
        if relevance::keyword_in_text(&text, keyword) && !tags.iter().any(|t| t == keyword) {
            tags.push(keyword.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_date_shapes() {
        assert_eq!(
            parse_published(Some("2026-01-15T09:30:00+00:00")).to_rfc3339(),
            "2026-01-15T09:30:00+00:00"
        );
        let bare = parse_published(Some("2026-01-15 09:30:00"));
        assert_eq!(bare.to_rfc3339(), "2026-01-15T09:30:00+00:00");
        let date_only = parse_published(Some("2026-01-15"));
        assert_eq!(date_only.to_rfc3339(), "2026-01-15T00:00:00+00:00");
    }

    #[test]
    fn unparseable_dates_fall_back_to_now() {
        let before = Utc::now();
        let parsed = parse_published(Some("next Tuesday"));
        assert!(parsed >= before);
        let missing = parse_published(None);
        assert!(missing >= before);
    }

    #[test]
    fn clearbit_logo_drops_spaces() {
        assert_eq!(
            clearbit_logo("Acme Robotics"),
            "https://logo.clearbit.com/acmerobotics.com"
        );
    }

    #[test]
    fn keyword_scan_merges_without_duplicates() {
        let mut tags = vec!["Python".to_string()];
        scan_keywords(
            "ML Engineer",
            "PyTorch and Python experience",
            &["ML", "PyTorch", "Python", "React"],
            &mut tags,
        );
        assert_eq!(tags, vec!["Python", "ML", "PyTorch"]);
    }

    #[test]
    fn keyword_scan_respects_acronym_boundaries() {
        let mut tags = Vec::new();
        scan_keywords(
            "Domain specialist",
            "Maintain mainframes",
            &["AI", "ML"],
            &mut tags,
        );
        assert!(tags.is_empty());
    }
}
