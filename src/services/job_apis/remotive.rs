use crate::error::{Error, Result};
use crate::models::job_record::{JobRecord, JobType};
use crate::services::job_apis::{clearbit_logo, dedup_tags, parse_published, scan_keywords, ExternalId, JobSource};
use crate::services::{job_domain, relevance, text_cleaner};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

const API_URL: &str = "https://remotive.com/api/remote-jobs";
const SOURCE_NAME: &str = "remotive";

const TAG_KEYWORDS: &[&str] = &[
    "AI", "ML", "Machine Learning", "Deep Learning", "NLP", "Computer Vision",
    "LLM", "GPT", "PyTorch", "TensorFlow", "Python", "React", "Node.js",
    "TypeScript", "JavaScript", "Data Science", "Backend", "Frontend",
];

#[derive(Debug, Deserialize)]
struct RemotiveResponse {
    #[serde(default)]
    jobs: Vec<RemotiveJob>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemotiveJob {
    id: Option<ExternalId>,
    url: Option<String>,
    title: Option<String>,
    company_name: Option<String>,
    company_logo: Option<String>,
    category: Option<String>,
    job_type: Option<String>,
    candidate_required_location: Option<String>,
    salary: Option<String>,
    description: Option<String>,
    publication_date: Option<String>,
    tags: Vec<String>,
}

pub struct RemotiveSource {
    client: Client,
}

impl RemotiveSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn transform(&self, job: RemotiveJob) -> JobRecord {
        let title = text_cleaner::clean_text(job.title.as_deref().unwrap_or("Untitled Position"));
        let company =
            text_cleaner::clean_text(job.company_name.as_deref().unwrap_or("Unknown Company"));
        let location = job
            .candidate_required_location
            .as_deref()
            .map(text_cleaner::clean_text)
            .unwrap_or_else(|| "Remote".to_string());
        let description = text_cleaner::clean_description(job.description.as_deref().unwrap_or(""));

        let mut tags = job.tags.clone();
        if let Some(category) = &job.category {
            tags.push(category.clone());
        }
        dedup_tags(&mut tags);
        scan_keywords(&title, &description, TAG_KEYWORDS, &mut tags);

        let company_logo = job
            .company_logo
            .clone()
            .or_else(|| Some(clearbit_logo(&company)));
        let apply_url = job.url.clone().unwrap_or_else(|| "#".to_string());

        JobRecord {
            external_id: job.id.map(ExternalId::into_string),
            source: SOURCE_NAME.to_string(),
            source_url: job.url,
            title: title.clone(),
            company,
            company_logo,
            description: description.clone(),
            location: Some(location),
            // The board only lists remote positions.
            remote: true,
            job_type: JobType::from_source(job.job_type.as_deref().unwrap_or_default()),
            domain: Some(job_domain::detect_domain(&title, Some(&description)).to_string()),
            categories: Vec::new(),
            salary_range: job.salary.as_deref().map(text_cleaner::clean_text),
            apply_url,
            tags: text_cleaner::clean_tags(&tags),
            featured: false,
            published_at: parse_published(job.publication_date.as_deref()),
        }
    }
}

#[async_trait]
impl JobSource for RemotiveSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self) -> Result<Vec<JobRecord>> {
        let response = self
            .client
            .get(API_URL)
            .query(&[("category", "software-dev"), ("limit", "100")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::SourceUnavailable(format!(
                "remotive returned status {}",
                response.status()
            )));
        }

        let payload: RemotiveResponse = response.json().await?;
        let total = payload.jobs.len();

        let jobs: Vec<JobRecord> = payload
            .jobs
            .into_iter()
            .filter(|job| !job.company_name.as_deref().unwrap_or_default().is_empty())
            .map(|job| self.transform(job))
            .filter(|record| relevance::is_relevant(&record.title, &record.description))
            .collect();

        info!(
            total,
            relevant = jobs.len(),
            filtered_out = total - jobs.len(),
            "Remotive jobs filtered"
        );

        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> RemotiveJob {
        serde_json::from_str(
            r#"{
                "id": 12345,
                "url": "https://remotive.com/remote-jobs/software-dev/llm-engineer-12345",
                "title": "LLM Engineer",
                "company_name": "Acme AI",
                "company_logo": "https://remotive.com/logo.png",
                "category": "Software Development",
                "job_type": "full_time",
                "publication_date": "2026-01-10T08:00:00",
                "candidate_required_location": "Worldwide",
                "salary": "$150k&nbsp;&ndash;&nbsp;$180k",
                "description": "<p>Build <b>LLM</b> pipelines</p><ul><li>PyTorch</li></ul>",
                "tags": ["python", "llm"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn transforms_payload_into_canonical_record() {
        let source = RemotiveSource::new(Client::new());
        let record = source.transform(sample_job());

        assert_eq!(record.external_id.as_deref(), Some("12345"));
        assert_eq!(record.source, "remotive");
        assert_eq!(record.title, "LLM Engineer");
        assert_eq!(record.company, "Acme AI");
        assert!(record.remote);
        assert_eq!(record.job_type, JobType::FullTime);
        assert_eq!(record.domain.as_deref(), Some("data-analysis"));
        assert_eq!(record.description, "Build LLM pipelines\n\n\u{2022} PyTorch");
        assert_eq!(record.salary_range.as_deref(), Some("$150k \u{2013} $180k"));
        assert!(record.tags.iter().any(|t| t == "LLM"));
        assert!(record.tags.iter().any(|t| t == "PyTorch"));
        assert_eq!(record.published_at.to_rfc3339(), "2026-01-10T08:00:00+00:00");
    }

    #[test]
    fn missing_fields_get_defaults() {
        let source = RemotiveSource::new(Client::new());
        let record = source.transform(RemotiveJob::default());

        assert_eq!(record.external_id, None);
        assert_eq!(record.title, "Untitled Position");
        assert_eq!(record.company, "Unknown Company");
        assert_eq!(record.location.as_deref(), Some("Remote"));
        assert_eq!(record.apply_url, "#");
        assert_eq!(
            record.company_logo.as_deref(),
            Some("https://logo.clearbit.com/unknowncompany.com")
        );
    }
}
