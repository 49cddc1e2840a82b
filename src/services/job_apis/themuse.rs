use crate::error::{Error, Result};
use crate::models::job_record::{JobRecord, JobType};
use crate::services::job_apis::{clearbit_logo, dedup_tags, parse_published, scan_keywords, ExternalId, JobSource};
use crate::services::{job_domain, relevance, remote_detection, text_cleaner};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

const API_URL: &str = "https://www.themuse.com/api/public/jobs";
const SOURCE_NAME: &str = "themuse";
const MAX_PAGES: u32 = 5;

const TAG_KEYWORDS: &[&str] = &[
    "AI", "ML", "Machine Learning", "Deep Learning", "NLP", "Computer Vision",
    "LLM", "GPT", "PyTorch", "TensorFlow", "Python", "Data Science",
    "Data Engineering", "Analytics", "Big Data", "SQL",
];

#[derive(Debug, Deserialize)]
struct MuseResponse {
    #[serde(default)]
    results: Vec<MuseJob>,
    #[serde(default)]
    page_count: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MuseJob {
    id: Option<ExternalId>,
    name: Option<String>,
    contents: Option<String>,
    #[serde(rename = "type")]
    employment_type: Option<String>,
    publication_date: Option<String>,
    company: MuseCompany,
    locations: Vec<MuseNamed>,
    categories: Vec<MuseNamed>,
    levels: Vec<MuseNamed>,
    refs: MuseRefs,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MuseCompany {
    name: Option<String>,
    refs: MuseCompanyRefs,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MuseCompanyRefs {
    logo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MuseNamed {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MuseRefs {
    landing_page: Option<String>,
}

pub struct TheMuseSource {
    client: Client,
}

impl TheMuseSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn transform(&self, job: MuseJob) -> JobRecord {
        let title = text_cleaner::clean_text(job.name.as_deref().unwrap_or("Untitled Position"));
        let company =
            text_cleaner::clean_text(job.company.name.as_deref().unwrap_or("Unknown Company"));
        let location = job
            .locations
            .first()
            .and_then(|l| l.name.as_deref())
            .map(text_cleaner::clean_text)
            .unwrap_or_else(|| "Remote".to_string());
        let description = match job.contents.as_deref() {
            Some(contents) if !contents.is_empty() => text_cleaner::clean_description(contents),
            _ => "No description available.".to_string(),
        };

        let mut tags: Vec<String> = job
            .categories
            .iter()
            .chain(job.levels.iter())
            .filter_map(|named| named.name.clone())
            .collect();
        dedup_tags(&mut tags);
        scan_keywords(&title, &description, TAG_KEYWORDS, &mut tags);

        let company_logo = job
            .company
            .refs
            .logo
            .clone()
            .or_else(|| Some(clearbit_logo(&company)));
        let apply_url = job.refs.landing_page.clone().unwrap_or_else(|| "#".to_string());

        let categories = relevance::detect_categories(&title, &description);

        JobRecord {
            external_id: job.id.map(ExternalId::into_string),
            source: SOURCE_NAME.to_string(),
            source_url: job.refs.landing_page,
            title: title.clone(),
            company,
            company_logo,
            description: description.clone(),
            location: Some(location.clone()),
            remote: remote_detection::is_remote(Some(&location), Some(&description)),
            job_type: JobType::from_source(job.employment_type.as_deref().unwrap_or_default()),
            domain: Some(job_domain::detect_domain(&title, Some(&description)).to_string()),
            categories,
            // The API exposes no salary information.
            salary_range: None,
            apply_url,
            tags: text_cleaner::clean_tags(&tags),
            featured: false,
            published_at: parse_published(job.publication_date.as_deref()),
        }
    }
}

#[async_trait]
impl JobSource for TheMuseSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self) -> Result<Vec<JobRecord>> {
        let mut all_jobs = Vec::new();

        for page in 0..MAX_PAGES {
            let page_param = page.to_string();
            let response = self
                .client
                .get(API_URL)
                .query(&[("category", "Data Science"), ("page", page_param.as_str())])
                .send()
                .await?;

            if !response.status().is_success() {
                error!(status = %response.status(), page, "TheMuse API error");
                if page == 0 {
                    return Err(Error::SourceUnavailable(format!(
                        "themuse returned status {}",
                        response.status()
                    )));
                }
                break;
            }

            let payload: MuseResponse = response.json().await?;
            if payload.results.is_empty() {
                break;
            }

            for job in payload.results {
                if job.company.name.as_deref().unwrap_or_default().is_empty() {
                    continue;
                }
                let record = self.transform(job);
                if relevance::is_relevant(&record.title, &record.description) {
                    all_jobs.push(record);
                }
            }

            if payload.page_count <= page + 1 {
                break;
            }
        }

        info!(relevant = all_jobs.len(), "TheMuse jobs filtered");
        Ok(all_jobs)
    }
}
