use aijobs_backend::error::{Error, Result};
use aijobs_backend::models::job_record::{JobRecord, JobType};
use aijobs_backend::services::import_service::ImportService;
use aijobs_backend::services::job_apis::JobSource;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Connect to the test database, or None when DATABASE_URL is not configured
/// (these tests are skipped in that case).
async fn test_pool() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url).await.expect("connect test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    Some(pool)
}

async fn cleanup(pool: &PgPool, source: &str) {
    sqlx::query("DELETE FROM job_listings WHERE source = $1")
        .bind(source)
        .execute(pool)
        .await
        .expect("cleanup");
}

struct StaticSource {
    name: &'static str,
    records: Vec<JobRecord>,
}

#[async_trait]
impl JobSource for StaticSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self) -> Result<Vec<JobRecord>> {
        Ok(self.records.clone())
    }
}

struct FailingSource;

#[async_trait]
impl JobSource for FailingSource {
    fn name(&self) -> &'static str {
        "failing-source"
    }

    async fn fetch(&self) -> Result<Vec<JobRecord>> {
        Err(Error::SourceUnavailable("connection refused".to_string()))
    }
}

fn record(source: &str, external_id: Option<&str>, title: &str, apply_url: &str) -> JobRecord {
    // Company is derived from the source name so parallel tests never share a
    // slug scope.
    JobRecord {
        external_id: external_id.map(str::to_string),
        source: source.to_string(),
        source_url: Some(apply_url.to_string()),
        title: title.to_string(),
        company: format!("Acme {}", source),
        company_logo: None,
        description: "Build and ship LLM products.".to_string(),
        location: Some("France, Germany".to_string()),
        remote: true,
        job_type: JobType::FullTime,
        domain: Some("data-analysis".to_string()),
        categories: vec!["llm_engineering".to_string()],
        salary_range: None,
        apply_url: apply_url.to_string(),
        tags: vec!["LLM".to_string(), "Python".to_string()],
        featured: false,
        published_at: Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap(),
    }
}

async fn count_for_source(pool: &PgPool, source: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM job_listings WHERE source = $1")
        .bind(source)
        .fetch_one(pool)
        .await
        .expect("count")
}

async fn job_row(pool: &PgPool, source: &str, external_id: &str) -> (Uuid, String, Option<String>) {
    sqlx::query_as(
        "SELECT id, title, slug FROM job_listings WHERE source = $1 AND external_id = $2",
    )
    .bind(source)
    .bind(external_id)
    .fetch_one(pool)
    .await
    .expect("job row")
}

#[tokio::test]
async fn reimport_updates_in_place_and_keeps_id_and_slug() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let source = "test-reimport";
    cleanup(&pool, source).await;

    let first = ImportService::with_sources(
        pool.clone(),
        vec![Arc::new(StaticSource {
            name: "test-reimport",
            records: vec![record(source, Some("123"), "LLM Engineer", "https://acme.test/llm")],
        })],
    );
    let stats = first.run_import().await;
    assert_eq!(stats.total_imported, 1);
    assert_eq!(stats.total_updated, 0);

    let (id, title, slug) = job_row(&pool, source, "123").await;
    assert_eq!(title, "LLM Engineer");
    assert_eq!(slug.as_deref(), Some("llm-engineer"));

    // Same payload again: no new rows, everything counted as an update.
    let stats = first.run_import().await;
    assert_eq!(stats.total_imported, 0);
    assert_eq!(stats.total_updated, 1);
    assert_eq!(count_for_source(&pool, source).await, 1);

    // Changed title on the same key updates the row but not id or slug.
    let renamed = ImportService::with_sources(
        pool.clone(),
        vec![Arc::new(StaticSource {
            name: "test-reimport",
            records: vec![record(
                source,
                Some("123"),
                "Senior LLM Engineer",
                "https://acme.test/llm",
            )],
        })],
    );
    renamed.run_import().await;

    assert_eq!(count_for_source(&pool, source).await, 1);
    let (id_after, title_after, slug_after) = job_row(&pool, source, "123").await;
    assert_eq!(id_after, id);
    assert_eq!(title_after, "Senior LLM Engineer");
    assert_eq!(slug_after.as_deref(), Some("llm-engineer"));

    cleanup(&pool, source).await;
}

#[tokio::test]
async fn records_without_external_id_upsert_by_apply_url() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let source = "test-apply-url";
    cleanup(&pool, source).await;

    let service = ImportService::with_sources(
        pool.clone(),
        vec![Arc::new(StaticSource {
            name: "test-apply-url",
            records: vec![record(source, None, "Prompt Engineer", "https://acme.test/prompt")],
        })],
    );

    let stats = service.run_import().await;
    assert_eq!(stats.total_imported, 1);
    let stats = service.run_import().await;
    assert_eq!(stats.total_imported, 0);
    assert_eq!(stats.total_updated, 1);
    assert_eq!(count_for_source(&pool, source).await, 1);

    cleanup(&pool, source).await;
}

#[tokio::test]
async fn failing_source_does_not_block_the_others() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let source = "test-isolation";
    cleanup(&pool, source).await;

    let service = ImportService::with_sources(
        pool.clone(),
        vec![
            Arc::new(FailingSource),
            Arc::new(StaticSource {
                name: "test-isolation",
                records: vec![record(source, Some("1"), "ML Engineer", "https://acme.test/ml")],
            }),
        ],
    );

    let stats = service.run_import().await;
    assert_eq!(stats.sources.len(), 2);

    let failing = &stats.sources[0];
    assert_eq!(failing.source, "failing-source");
    assert_eq!(failing.imported, 0);
    assert!(failing.error.as_deref().unwrap_or_default().contains("connection refused"));

    let healthy = &stats.sources[1];
    assert_eq!(healthy.imported, 1);
    assert_eq!(healthy.error, None);
    assert_eq!(count_for_source(&pool, source).await, 1);

    cleanup(&pool, source).await;
}

#[tokio::test]
async fn slug_collisions_get_numeric_suffixes_per_company() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let source = "test-slugs";
    cleanup(&pool, source).await;

    let service = ImportService::with_sources(
        pool.clone(),
        vec![Arc::new(StaticSource {
            name: "test-slugs",
            records: vec![
                record(source, Some("a"), "ML Engineer", "https://acme.test/a"),
                record(source, Some("b"), "ML Engineer", "https://acme.test/b"),
            ],
        })],
    );
    let stats = service.run_import().await;
    assert_eq!(stats.total_imported, 2);

    let (_, _, slug_a) = job_row(&pool, source, "a").await;
    let (_, _, slug_b) = job_row(&pool, source, "b").await;
    assert_eq!(slug_a.as_deref(), Some("ml-engineer"));
    assert_eq!(slug_b.as_deref(), Some("ml-engineer-2"));

    cleanup(&pool, source).await;
}

#[tokio::test]
async fn location_sync_replaces_previous_associations() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let source = "test-locations";
    cleanup(&pool, source).await;

    let european = ImportService::with_sources(
        pool.clone(),
        vec![Arc::new(StaticSource {
            name: "test-locations",
            records: vec![record(source, Some("77"), "NLP Engineer", "https://acme.test/nlp")],
        })],
    );
    european.run_import().await;

    let (id, _, _) = job_row(&pool, source, "77").await;
    let mut names = location_names(&pool, id).await;
    names.sort();
    assert_eq!(names, vec!["France", "Germany"]);

    // Re-import the same key with a vague location: the old links must go.
    let mut remote_record = record(source, Some("77"), "NLP Engineer", "https://acme.test/nlp");
    remote_record.location = Some("Remote".to_string());
    let worldwide = ImportService::with_sources(
        pool.clone(),
        vec![Arc::new(StaticSource {
            name: "test-locations",
            records: vec![remote_record],
        })],
    );
    worldwide.run_import().await;

    let names = location_names(&pool, id).await;
    assert_eq!(names, vec!["Worldwide"]);

    cleanup(&pool, source).await;
}

async fn location_names(pool: &PgPool, job_id: Uuid) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT l.name FROM locations l JOIN job_location jl ON jl.location_id = l.id \
         WHERE jl.job_id = $1",
    )
    .bind(job_id)
    .fetch_all(pool)
    .await
    .expect("location names")
}
