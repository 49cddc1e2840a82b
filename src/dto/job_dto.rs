use crate::models::job::JobListing;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    pub search: Option<String>,
    pub company: Option<String>,
    pub zone: Option<String>,
    pub country: Option<String>,
    pub remote_type: Option<String>,
    pub job_type: Option<String>,
    pub specialization: Option<String>,
    pub tag: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub items: Vec<JobListing>,
    pub featured: Vec<JobListing>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    pub job: JobListing,
    pub similar: Vec<JobListing>,
}

#[derive(Debug, Serialize)]
pub struct CompanyRow {
    pub company: String,
    pub company_logo: Option<String>,
    pub jobs_count: i64,
}

#[derive(Debug, Serialize)]
pub struct CountryOption {
    pub name: String,
    pub flag: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub companies: Vec<String>,
    pub zones: Vec<String>,
    pub countries: Vec<CountryOption>,
    pub job_types: Vec<String>,
    pub specializations: Vec<SpecializationOption>,
    pub domains: Vec<SpecializationOption>,
}

#[derive(Debug, Serialize)]
pub struct SpecializationOption {
    pub slug: &'static str,
    pub label: &'static str,
}
