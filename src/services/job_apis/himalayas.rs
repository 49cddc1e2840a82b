use crate::error::{Error, Result};
use crate::models::job_record::{JobRecord, JobType};
use crate::services::job_apis::{clearbit_logo, dedup_tags, parse_published, scan_keywords, ExternalId, JobSource};
use crate::services::{relevance, remote_detection, text_cleaner};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

const API_URL: &str = "https://himalayas.app/jobs/api";
const SOURCE_NAME: &str = "himalayas";
const PAGE_LIMIT: usize = 20;
const MAX_JOBS: usize = 100;
// Inter-request pause; the API rate limits aggressive clients.
const REQUEST_DELAY: Duration = Duration::from_millis(500);

const TAG_KEYWORDS: &[&str] = &[
    "AI", "ML", "Machine Learning", "Deep Learning", "NLP", "Computer Vision",
    "LLM", "GPT", "PyTorch", "TensorFlow", "Python", "React", "Node.js",
    "TypeScript", "JavaScript", "Data Science", "Backend", "Frontend", "DevOps",
];

#[derive(Debug, Deserialize)]
struct HimalayasResponse {
    #[serde(default)]
    jobs: Vec<HimalayasJob>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HimalayasJob {
    id: Option<ExternalId>,
    url: Option<String>,
    title: Option<String>,
    company: HimalayasCompany,
    description: Option<String>,
    location: Option<String>,
    geo_restriction: Option<String>,
    #[serde(rename = "type")]
    employment_type: Option<String>,
    salary: Option<String>,
    salary_min: Option<i64>,
    salary_max: Option<i64>,
    salary_currency: Option<String>,
    tags: Vec<String>,
    skills: Vec<String>,
    category: Option<String>,
    published_at: Option<String>,
    created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HimalayasCompany {
    name: Option<String>,
    logo: Option<String>,
}

pub struct HimalayasSource {
    client: Client,
}

impl HimalayasSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn extract_location(job: &HimalayasJob) -> Option<String> {
        let parts: Vec<&str> = [job.location.as_deref(), job.geo_restriction.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            return Some("Remote".to_string());
        }
        Some(parts.join(", "))
    }

    fn extract_salary(job: &HimalayasJob) -> Option<String> {
        if let Some(salary) = &job.salary {
            return Some(text_cleaner::clean_text(salary));
        }
        if let (Some(min), Some(max)) = (job.salary_min, job.salary_max) {
            let currency = job.salary_currency.as_deref().unwrap_or("$");
            return Some(format!("{currency}{min}k - {currency}{max}k"));
        }
        None
    }

    fn transform(&self, job: HimalayasJob) -> JobRecord {
        let title = text_cleaner::clean_text(job.title.as_deref().unwrap_or("Untitled Position"));
        let company =
            text_cleaner::clean_text(job.company.name.as_deref().unwrap_or("Unknown Company"));
        let location = Self::extract_location(&job).map(|l| text_cleaner::clean_text(&l));
        let description = text_cleaner::clean_description(job.description.as_deref().unwrap_or(""));

        let mut tags = job.tags.clone();
        tags.extend(job.skills.iter().cloned());
        if let Some(category) = &job.category {
            tags.push(category.clone());
        }
        dedup_tags(&mut tags);
        scan_keywords(&title, &description, TAG_KEYWORDS, &mut tags);

        let salary_range = Self::extract_salary(&job);
        let company_logo = job
            .company
            .logo
            .clone()
            .or_else(|| Some(clearbit_logo(&company)));
        let apply_url = job.url.clone().unwrap_or_else(|| "#".to_string());
        let published = job.published_at.as_deref().or(job.created_at.as_deref());

        JobRecord {
            external_id: job.id.map(ExternalId::into_string),
            source: SOURCE_NAME.to_string(),
            source_url: job.url,
            title: title.clone(),
            company,
            company_logo,
            description: description.clone(),
            remote: remote_detection::is_remote(location.as_deref(), Some(&description)),
            location,
            job_type: JobType::from_source(job.employment_type.as_deref().unwrap_or_default()),
            // The feed carries no usable domain signal.
            domain: None,
            categories: Vec::new(),
            salary_range,
            apply_url,
            tags: text_cleaner::clean_tags(&tags),
            featured: false,
            published_at: parse_published(published),
        }
    }
}

#[async_trait]
impl JobSource for HimalayasSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self) -> Result<Vec<JobRecord>> {
        let mut all_jobs = Vec::new();
        let mut offset = 0usize;

        while all_jobs.len() < MAX_JOBS {
            let response = self
                .client
                .get(API_URL)
                .query(&[("limit", PAGE_LIMIT.to_string()), ("offset", offset.to_string())])
                .send()
                .await?;

            if !response.status().is_success() {
                error!(status = %response.status(), offset, "Himalayas API error");
                if offset == 0 {
                    return Err(Error::SourceUnavailable(format!(
                        "himalayas returned status {}",
                        response.status()
                    )));
                }
                break;
            }

            let payload: HimalayasResponse = response.json().await?;
            if payload.jobs.is_empty() {
                break;
            }
            let page_size = payload.jobs.len();

            for job in payload.jobs {
                let record = self.transform(job);
                if relevance::is_relevant(&record.title, &record.description) {
                    all_jobs.push(record);
                }
            }

            if page_size < PAGE_LIMIT {
                break;
            }
            offset += PAGE_LIMIT;

            tokio::time::sleep(REQUEST_DELAY).await;
        }

        info!(relevant = all_jobs.len(), "Himalayas jobs filtered");
        Ok(all_jobs)
    }
}
