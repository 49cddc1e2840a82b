use crate::dto::job_dto::{
    CountryOption, FiltersResponse, JobDetailResponse, JobListQuery, JobListResponse,
    SpecializationOption,
};
use crate::error::{Error, Result};
use crate::services::{job_domain, relevance};
use crate::utils::country_flags;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};

pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<JobListResponse>> {
    let list = state.job_query_service.list(query).await?;
    let featured = state.job_query_service.featured(3).await?;

    Ok(Json(JobListResponse {
        items: list.items,
        featured,
        total: list.total,
        page: list.page,
        per_page: list.per_page,
        total_pages: list.total_pages,
    }))
}

pub async fn get_job(
    State(state): State<AppState>,
    Path((company_slug, slug)): Path<(String, String)>,
) -> Result<Json<JobDetailResponse>> {
    let job = state
        .job_query_service
        .find_published(&company_slug, &slug)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No job {}/{}", company_slug, slug)))?;

    let similar = state.job_query_service.similar_jobs(&job, 5).await?;

    Ok(Json(JobDetailResponse { job, similar }))
}

pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<crate::dto::job_dto::CompanyRow>>> {
    let companies = state.job_query_service.companies().await?;
    Ok(Json(companies))
}

pub async fn list_filters(State(state): State<AppState>) -> Result<Json<FiltersResponse>> {
    let companies = state.job_query_service.distinct_companies().await?;
    let zones = state.job_query_service.zones().await?;
    let countries = state
        .job_query_service
        .countries()
        .await?
        .into_iter()
        .map(|name| CountryOption {
            flag: country_flags::flag_for(&name),
            name,
        })
        .collect();
    let job_types = state.job_query_service.distinct_job_types().await?;
    let specializations = relevance::category_labels()
        .iter()
        .map(|&(slug, label)| SpecializationOption { slug, label })
        .collect();
    let domains = job_domain::domains()
        .iter()
        .map(|&(slug, label)| SpecializationOption { slug, label })
        .collect();

    Ok(Json(FiltersResponse {
        companies,
        zones,
        countries,
        job_types,
        specializations,
        domains,
    }))
}
