use crate::dto::job_dto::{CompanyRow, JobListQuery};
use crate::error::Result;
use crate::models::job::{JobListing, JOB_COLUMNS};
use crate::services::slug::slugify;
use serde_json::json;
use sqlx::{PgPool, Row};

const PUBLISHED: &str = "published_at IS NOT NULL AND published_at <= NOW()";

pub struct JobList {
    pub items: Vec<JobListing>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

enum Arg {
    Text(String),
    Jsonb(serde_json::Value),
}

/// Read side of the store: published listings with filters, detail lookup,
/// similar jobs and the company aggregate. Nothing here writes.
#[derive(Clone)]
pub struct JobQueryService {
    pool: PgPool,
}

impl JobQueryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(50).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut filters = vec![PUBLISHED.to_string()];
        let mut args: Vec<Arg> = Vec::new();

        if let Some(search) = query.search.filter(|s| !s.is_empty()) {
            let first = args.len() + 1;
            filters.push(format!(
                "(title ILIKE ${} OR company ILIKE ${} OR description ILIKE ${})",
                first,
                first + 1,
                first + 2
            ));
            let pattern = format!("%{}%", search);
            args.push(Arg::Text(pattern.clone()));
            args.push(Arg::Text(pattern.clone()));
            args.push(Arg::Text(pattern));
        }
        if let Some(company) = query.company.filter(|s| !s.is_empty()) {
            filters.push(format!("company = ${}", args.len() + 1));
            args.push(Arg::Text(company));
        }
        if let Some(zone) = query.zone.filter(|s| !s.is_empty()) {
            let idx = args.len() + 1;
            filters.push(format!(
                "EXISTS (SELECT 1 FROM job_location jl JOIN locations l ON l.id = jl.location_id \
                 WHERE jl.job_id = job_listings.id AND (l.name = ${idx} OR l.region_parent = ${idx}))"
            ));
            args.push(Arg::Text(zone));
        }
        if let Some(country) = query.country.filter(|s| !s.is_empty()) {
            let idx = args.len() + 1;
            filters.push(format!(
                "EXISTS (SELECT 1 FROM job_location jl JOIN locations l ON l.id = jl.location_id \
                 WHERE jl.job_id = job_listings.id AND l.name = ${idx} AND l.type = 'country')"
            ));
            args.push(Arg::Text(country));
        }
        match query.remote_type.as_deref() {
            Some("remote") => filters.push("remote = TRUE".to_string()),
            Some("on-site") => filters.push("remote = FALSE".to_string()),
            // "all" or absent: no filter
            _ => {}
        }
        if let Some(job_type) = query.job_type.filter(|s| !s.is_empty()) {
            filters.push(format!("job_type = ${}", args.len() + 1));
            args.push(Arg::Text(job_type));
        }
        if let Some(category) = query.specialization.filter(|s| !s.is_empty()) {
            filters.push(format!("categories @> ${}", args.len() + 1));
            args.push(Arg::Jsonb(json!([category])));
        }
        if let Some(tag) = query.tag.filter(|s| !s.is_empty()) {
            filters.push(format!("tags @> ${}", args.len() + 1));
            args.push(Arg::Jsonb(json!([tag])));
        }

        let where_clause = format!("WHERE {}", filters.join(" AND "));

        let items_query = format!(
            "SELECT {} FROM job_listings {} ORDER BY published_at DESC LIMIT ${} OFFSET ${}",
            JOB_COLUMNS,
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!("SELECT COUNT(*) FROM job_listings {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, JobListing>(&items_query);
        for arg in &args {
            items_statement = match arg {
                Arg::Text(value) => items_statement.bind(value),
                Arg::Jsonb(value) => items_statement.bind(value),
            };
        }
        items_statement = items_statement.bind(per_page).bind(offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for arg in &args {
            total_statement = match arg {
                Arg::Text(value) => total_statement.bind(value),
                Arg::Jsonb(value) => total_statement.bind(value),
            };
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(JobList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    pub async fn featured(&self, limit: i64) -> Result<Vec<JobListing>> {
        let query = format!(
            "SELECT {} FROM job_listings WHERE {} AND featured = TRUE \
             ORDER BY published_at DESC LIMIT $1",
            JOB_COLUMNS, PUBLISHED
        );
        let items = sqlx::query_as::<_, JobListing>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Look up a published job by its company slug and job slug. The company
    /// part is matched by slugifying stored company names, so the same job
    /// slug may exist under different companies.
    pub async fn find_published(&self, company_slug: &str, slug: &str) -> Result<Option<JobListing>> {
        let query = format!(
            "SELECT {} FROM job_listings WHERE {} AND slug = $1",
            JOB_COLUMNS, PUBLISHED
        );
        let candidates = sqlx::query_as::<_, JobListing>(&query)
            .bind(slug)
            .fetch_all(&self.pool)
            .await?;

        Ok(candidates
            .into_iter()
            .find(|job| slugify(&job.company) == company_slug))
    }

    /// Up to `limit` related jobs: first postings sharing a tag, then the
    /// same company, then simply the most recent.
    pub async fn similar_jobs(&self, job: &JobListing, limit: i64) -> Result<Vec<JobListing>> {
        let tags = job.tags();
        if !tags.is_empty() {
            let mut conditions = Vec::with_capacity(tags.len());
            for i in 0..tags.len() {
                conditions.push(format!("tags @> ${}", i + 2));
            }
            let query = format!(
                "SELECT {} FROM job_listings WHERE {} AND id != $1 AND ({}) \
                 ORDER BY published_at DESC LIMIT {}",
                JOB_COLUMNS,
                PUBLISHED,
                conditions.join(" OR "),
                limit
            );
            let mut statement = sqlx::query_as::<_, JobListing>(&query).bind(job.id);
            for tag in tags {
                statement = statement.bind(json!([tag]));
            }
            let by_tags = statement.fetch_all(&self.pool).await?;
            if !by_tags.is_empty() {
                return Ok(by_tags);
            }
        }

        let query = format!(
            "SELECT {} FROM job_listings WHERE {} AND id != $1 AND company = $2 \
             ORDER BY published_at DESC LIMIT $3",
            JOB_COLUMNS, PUBLISHED
        );
        let same_company = sqlx::query_as::<_, JobListing>(&query)
            .bind(job.id)
            .bind(&job.company)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        if !same_company.is_empty() {
            return Ok(same_company);
        }

        let query = format!(
            "SELECT {} FROM job_listings WHERE {} AND id != $1 \
             ORDER BY published_at DESC LIMIT $2",
            JOB_COLUMNS, PUBLISHED
        );
        let recent = sqlx::query_as::<_, JobListing>(&query)
            .bind(job.id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(recent)
    }

    /// Companies with their logo and published-listing count, busiest first.
    pub async fn companies(&self) -> Result<Vec<CompanyRow>> {
        let query = format!(
            "SELECT company, MAX(company_logo) AS company_logo, COUNT(*) AS jobs_count \
             FROM job_listings WHERE {} GROUP BY company ORDER BY jobs_count DESC",
            PUBLISHED
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|row| {
                Ok(CompanyRow {
                    company: row.try_get("company")?,
                    company_logo: row.try_get("company_logo")?,
                    jobs_count: row.try_get("jobs_count")?,
                })
            })
            .collect()
    }

    pub async fn distinct_companies(&self) -> Result<Vec<String>> {
        let query = format!(
            "SELECT DISTINCT company FROM job_listings WHERE {} ORDER BY company",
            PUBLISHED
        );
        let companies = sqlx::query_scalar::<_, String>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    pub async fn distinct_job_types(&self) -> Result<Vec<String>> {
        let query = format!(
            "SELECT DISTINCT job_type FROM job_listings WHERE {} ORDER BY job_type",
            PUBLISHED
        );
        let job_types = sqlx::query_scalar::<_, String>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(job_types)
    }

    /// Zone filter options: regions, Worldwide and timezone pseudo-locations.
    pub async fn zones(&self) -> Result<Vec<String>> {
        let zones = sqlx::query_scalar::<_, String>(
            "SELECT name FROM locations WHERE type IN ('region', 'worldwide', 'timezone') ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(zones)
    }

    pub async fn countries(&self) -> Result<Vec<String>> {
        let countries = sqlx::query_scalar::<_, String>(
            "SELECT name FROM locations WHERE type = 'country' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(countries)
    }
}
