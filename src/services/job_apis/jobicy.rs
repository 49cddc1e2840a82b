use crate::error::{Error, Result};
use crate::models::job_record::{JobRecord, JobType};
use crate::services::job_apis::{parse_published, ExternalId, JobSource};
use crate::services::{relevance, text_cleaner};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

const API_URL: &str = "https://jobicy.com/api/v2/remote-jobs";
const SOURCE_NAME: &str = "jobicy";

#[derive(Debug, Deserialize)]
struct JobicyResponse {
    #[serde(default)]
    jobs: Vec<JobicyJob>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct JobicyJob {
    id: Option<ExternalId>,
    url: Option<String>,
    job_title: Option<String>,
    company_name: Option<String>,
    company_logo: Option<String>,
    job_description: Option<String>,
    job_excerpt: Option<String>,
    job_geo: Option<String>,
    job_type: Vec<String>,
    job_industry: Vec<String>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    salary_currency: Option<String>,
    salary_period: Option<String>,
    pub_date: Option<String>,
}

pub struct JobicySource {
    client: Client,
    count: u32,
    geo: Option<String>,
}

impl JobicySource {
    pub fn new(client: Client, count: u32, geo: Option<String>) -> Self {
        Self { client, count, geo }
    }

    fn extract_salary(job: &JobicyJob) -> Option<String> {
        let (min, max) = (job.salary_min?, job.salary_max?);
        let currency = job.salary_currency.as_deref().unwrap_or("USD");
        let period = job.salary_period.as_deref().unwrap_or("yearly");
        Some(format!("{} - {} {} / {}", min as i64, max as i64, currency, period))
    }

    fn transform(&self, job: JobicyJob) -> JobRecord {
        let title = text_cleaner::clean_text(job.job_title.as_deref().unwrap_or("Untitled Position"));
        let company =
            text_cleaner::clean_text(job.company_name.as_deref().unwrap_or("Unknown Company"));
        let location = job
            .job_geo
            .as_deref()
            .map(text_cleaner::clean_text)
            .unwrap_or_else(|| "Remote".to_string());
        let description = text_cleaner::clean_description(
            job.job_description
                .as_deref()
                .or(job.job_excerpt.as_deref())
                .unwrap_or(""),
        );

        let remote = location.to_lowercase().contains("remote")
            || title.to_lowercase().contains("remote");
        let job_type = job
            .job_type
            .first()
            .map(|t| JobType::from_source(t))
            .unwrap_or(JobType::FullTime);
        let categories = relevance::detect_categories(&title, &description);
        let salary_range = Self::extract_salary(&job);
        let apply_url = job.url.clone().unwrap_or_else(|| "#".to_string());

        JobRecord {
            external_id: job.id.map(ExternalId::into_string),
            source: SOURCE_NAME.to_string(),
            source_url: job.url,
            title,
            company,
            company_logo: job.company_logo,
            description,
            location: Some(location),
            remote,
            job_type,
            domain: None,
            categories,
            salary_range,
            apply_url,
            tags: text_cleaner::clean_tags(&job.job_industry),
            featured: false,
            published_at: parse_published(job.pub_date.as_deref()),
        }
    }
}

#[async_trait]
impl JobSource for JobicySource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self) -> Result<Vec<JobRecord>> {
        let mut query: Vec<(&str, String)> = vec![("count", self.count.to_string())];
        if let Some(geo) = &self.geo {
            query.push(("geo", geo.clone()));
        }

        let response = self.client.get(API_URL).query(&query).send().await?;

        if !response.status().is_success() {
            return Err(Error::SourceUnavailable(format!(
                "jobicy returned status {}",
                response.status()
            )));
        }

        let payload: JobicyResponse = response.json().await?;
        let total = payload.jobs.len();

        let mut jobs = Vec::new();
        for job in payload.jobs {
            if job.company_name.as_deref().unwrap_or_default().is_empty() {
                continue;
            }
            // Filter on the full text the feed provides, excerpt included.
            let filter_text = format!(
                "{} {}",
                job.job_description.as_deref().unwrap_or_default(),
                job.job_excerpt.as_deref().unwrap_or_default()
            );
            if !relevance::is_relevant(job.job_title.as_deref().unwrap_or_default(), &filter_text) {
                continue;
            }
            jobs.push(self.transform(job));
        }

        info!(
            total,
            relevant = jobs.len(),
            filtered_out = total - jobs.len(),
            "Jobicy jobs filtered"
        );

        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> JobicyJob {
        serde_json::from_str(
            r#"{
                "id": 555,
                "url": "https://jobicy.com/jobs/genai-engineer",
                "jobTitle": "GenAI Engineer",
                "companyName": "Jobica",
                "companyLogo": "https://jobicy.com/logo.png",
                "jobDescription": "<p>Ship generative AI features.</p>",
                "jobExcerpt": "Generative AI role",
                "jobGeo": "Europe",
                "jobType": ["freelance"],
                "jobIndustry": ["Software &amp; IT"],
                "salaryMin": 90000,
                "salaryMax": 120000,
                "salaryCurrency": "EUR",
                "salaryPeriod": "yearly",
                "pubDate": "2026-02-20 07:15:00"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn transforms_payload_into_canonical_record() {
        let source = JobicySource::new(Client::new(), 100, None);
        let record = source.transform(sample_job());

        assert_eq!(record.external_id.as_deref(), Some("555"));
        assert_eq!(record.source, "jobicy");
        assert_eq!(record.title, "GenAI Engineer");
        assert_eq!(record.location.as_deref(), Some("Europe"));
        assert!(!record.remote);
        assert_eq!(record.job_type, JobType::Contract);
        assert_eq!(record.categories, vec!["genai"]);
        assert_eq!(record.salary_range.as_deref(), Some("90000 - 120000 EUR / yearly"));
        assert_eq!(record.tags, vec!["Software & IT"]);
        assert_eq!(record.published_at.to_rfc3339(), "2026-02-20T07:15:00+00:00");
    }

    #[test]
    fn missing_geo_defaults_to_remote_and_marks_remote() {
        let mut job = sample_job();
        job.job_geo = None;
        let source = JobicySource::new(Client::new(), 100, None);
        let record = source.transform(job);
        assert_eq!(record.location.as_deref(), Some("Remote"));
        assert!(record.remote);
    }

    #[test]
    fn salary_requires_both_bounds() {
        let mut job = sample_job();
        job.salary_max = None;
        let source = JobicySource::new(Client::new(), 100, None);
        let record = source.transform(job);
        assert_eq!(record.salary_range, None);
    }
}
