use crate::config::get_config;
use crate::error::Result;
use crate::models::job_record::JobRecord;
use crate::services::job_apis::{
    ai_jobs_net::AiJobsNetSource, himalayas::HimalayasSource, jobicy::JobicySource,
    remotive::RemotiveSource, themuse::TheMuseSource, JobSource,
};
use crate::services::location_service::LocationService;
use crate::services::slug::SlugAssigner;
use reqwest::Client;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct SourceStats {
    pub source: String,
    pub imported: u64,
    pub updated: u64,
    pub skipped: u64,
    pub error: Option<String>,
}

impl SourceStats {
    fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            imported: 0,
            updated: 0,
            skipped: 0,
            error: None,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    pub sources: Vec<SourceStats>,
    pub total_imported: u64,
    pub total_updated: u64,
    pub total_skipped: u64,
}

impl ImportStats {
    fn push(&mut self, entry: SourceStats) {
        self.total_imported += entry.imported;
        self.total_updated += entry.updated;
        self.total_skipped += entry.skipped;
        self.sources.push(entry);
    }
}

enum UpsertOutcome {
    Created(Uuid),
    Updated(Uuid),
}

impl UpsertOutcome {
    fn id(&self) -> Uuid {
        match self {
            UpsertOutcome::Created(id) | UpsertOutcome::Updated(id) => *id,
        }
    }
}

/// Runs every registered source and upserts the results. Upsert keys, slug
/// assignment and location sync live here, not in the adapters.
#[derive(Clone)]
pub struct ImportService {
    pool: PgPool,
    locations: LocationService,
    slugs: SlugAssigner,
    sources: Arc<Vec<Arc<dyn JobSource>>>,
    run_lock: Arc<Mutex<()>>,
}

impl ImportService {
    pub fn new(pool: PgPool, client: Client) -> Self {
        let config = get_config();
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(AiJobsNetSource),
            Arc::new(RemotiveSource::new(client.clone())),
            Arc::new(TheMuseSource::new(client.clone())),
            Arc::new(HimalayasSource::new(client.clone())),
            Arc::new(JobicySource::new(
                client,
                config.jobicy_count,
                config.jobicy_geo.clone(),
            )),
        ];
        Self::with_sources(pool, sources)
    }

    /// Build against an explicit source registry. Tests use this to inject
    /// static or failing sources.
    pub fn with_sources(pool: PgPool, sources: Vec<Arc<dyn JobSource>>) -> Self {
        Self {
            locations: LocationService::new(pool.clone()),
            slugs: SlugAssigner::new(pool.clone()),
            pool,
            sources: Arc::new(sources),
            run_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Run one full import across all sources. Per-source and per-record
    /// failures are contained; the run itself always completes.
    pub async fn run_import(&self) -> ImportStats {
        // Only one run at a time; overlapping triggers queue up here.
        let _guard = self.run_lock.lock().await;

        let mut stats = ImportStats::default();

        for source in self.sources.iter() {
            let name = source.name();
            info!(source = name, "Starting import");
            let mut entry = SourceStats::new(name);

            match source.fetch().await {
                Ok(records) => {
                    for record in records {
                        match self.import_record(&record).await {
                            Ok(UpsertOutcome::Created(_)) => entry.imported += 1,
                            Ok(UpsertOutcome::Updated(_)) => entry.updated += 1,
                            Err(e) => {
                                entry.skipped += 1;
                                warn!(
                                    source = name,
                                    title = %record.title,
                                    error = %e,
                                    "Failed to import job"
                                );
                            }
                        }
                    }
                    info!(
                        source = name,
                        imported = entry.imported,
                        updated = entry.updated,
                        skipped = entry.skipped,
                        "Completed import"
                    );
                }
                Err(e) => {
                    error!(source = name, error = %e, "Failed to fetch jobs");
                    entry.error = Some(e.to_string());
                }
            }

            stats.push(entry);
        }

        info!(
            total_imported = stats.total_imported,
            total_updated = stats.total_updated,
            total_skipped = stats.total_skipped,
            "Job import completed"
        );

        stats
    }

    async fn import_record(&self, record: &JobRecord) -> Result<UpsertOutcome> {
        let outcome = self.upsert_job(record).await?;
        self.locations
            .sync_job_locations(outcome.id(), record.location.as_deref())
            .await?;
        Ok(outcome)
    }

    /// Two-branch identity lookup: (external_id, source) when the source
    /// assigned an id, apply_url otherwise. Hit updates in place, miss inserts.
    async fn upsert_job(&self, record: &JobRecord) -> Result<UpsertOutcome> {
        let existing: Option<(Uuid, Option<String>, String)> = match record.external_id.as_deref() {
            Some(external_id) if !external_id.is_empty() => {
                sqlx::query_as(
                    "SELECT id, slug, title FROM job_listings WHERE external_id = $1 AND source = $2",
                )
                .bind(external_id)
                .bind(&record.source)
                .fetch_optional(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as("SELECT id, slug, title FROM job_listings WHERE apply_url = $1")
                    .bind(&record.apply_url)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };

        match existing {
            Some((id, slug, title)) => {
                let slug = match slug.filter(|s| !s.is_empty()) {
                    Some(existing_slug) => existing_slug,
                    // Backfill only: a row without a slug gets one when the
                    // title changes under it.
                    None if title != record.title => {
                        self.slugs.generate(&record.title, &record.company).await?
                    }
                    None => String::new(),
                };
                self.update_job(id, record, &slug).await?;
                Ok(UpsertOutcome::Updated(id))
            }
            None => {
                let slug = self.slugs.generate(&record.title, &record.company).await?;
                let id = self.insert_job(record, &slug).await?;
                Ok(UpsertOutcome::Created(id))
            }
        }
    }

    async fn insert_job(&self, record: &JobRecord, slug: &str) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO job_listings (
                external_id, source, source_url, title, company, slug, company_logo,
                description, location, remote, job_type, domain, salary_range,
                apply_url, tags, categories, featured, published_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7,
                $8, $9, $10, $11, $12, $13,
                $14, $15, $16, $17, $18
            )
            RETURNING id
            "#,
        )
        .bind(&record.external_id)
        .bind(&record.source)
        .bind(&record.source_url)
        .bind(&record.title)
        .bind(&record.company)
        .bind(slug)
        .bind(&record.company_logo)
        .bind(&record.description)
        .bind(&record.location)
        .bind(record.remote)
        .bind(record.job_type.as_str())
        .bind(&record.domain)
        .bind(&record.salary_range)
        .bind(&record.apply_url)
        .bind(Json(&record.tags))
        .bind(Json(&record.categories))
        .bind(record.featured)
        .bind(record.published_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_job(&self, id: Uuid, record: &JobRecord, slug: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE job_listings SET
                external_id = $2,
                source = $3,
                source_url = $4,
                title = $5,
                company = $6,
                slug = $7,
                company_logo = $8,
                description = $9,
                location = $10,
                remote = $11,
                job_type = $12,
                domain = $13,
                salary_range = $14,
                apply_url = $15,
                tags = $16,
                categories = $17,
                featured = $18,
                published_at = $19,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&record.external_id)
        .bind(&record.source)
        .bind(&record.source_url)
        .bind(&record.title)
        .bind(&record.company)
        .bind(slug)
        .bind(&record.company_logo)
        .bind(&record.description)
        .bind(&record.location)
        .bind(record.remote)
        .bind(record.job_type.as_str())
        .bind(&record.domain)
        .bind(&record.salary_range)
        .bind(&record.apply_url)
        .bind(Json(&record.tags))
        .bind(Json(&record.categories))
        .bind(record.featured)
        .bind(record.published_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
