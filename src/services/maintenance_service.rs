use crate::error::Result;
use crate::services::location_service::LocationService;
use crate::services::slug::SlugAssigner;
use crate::services::{job_domain, relevance, remote_detection};
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MaintenanceStats {
    pub processed: u64,
    pub changed: u64,
    pub failed: u64,
}

/// One-off repair operations over already-imported rows. Each mirrors a
/// pipeline component so stored data can be re-derived after a table or
/// keyword change.
#[derive(Clone)]
pub struct MaintenanceService {
    pool: PgPool,
    locations: LocationService,
    slugs: SlugAssigner,
}

impl MaintenanceService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            locations: LocationService::new(pool.clone()),
            slugs: SlugAssigner::new(pool.clone()),
            pool,
        }
    }

    /// Re-run location normalization and sync for every job from its stored
    /// raw location string.
    pub async fn renormalize_locations(&self) -> Result<MaintenanceStats> {
        let rows: Vec<(Uuid, Option<String>)> =
            sqlx::query_as("SELECT id, location FROM job_listings")
                .fetch_all(&self.pool)
                .await?;

        let mut stats = MaintenanceStats::default();
        for (id, location) in rows {
            stats.processed += 1;
            match self
                .locations
                .sync_job_locations(id, location.as_deref())
                .await
            {
                Ok(()) => stats.changed += 1,
                Err(e) => {
                    stats.failed += 1;
                    warn!(job_id = %id, error = %e, "Failed to renormalize locations");
                }
            }
        }

        info!(
            processed = stats.processed,
            failed = stats.failed,
            "Location renormalization finished"
        );
        Ok(stats)
    }

    /// Re-run remote detection over stored location + description and update
    /// rows whose flag changed.
    pub async fn refresh_remote_flags(&self) -> Result<MaintenanceStats> {
        let rows: Vec<(Uuid, Option<String>, String, bool)> =
            sqlx::query_as("SELECT id, location, description, remote FROM job_listings")
                .fetch_all(&self.pool)
                .await?;

        let mut stats = MaintenanceStats::default();
        for (id, location, description, remote) in rows {
            stats.processed += 1;
            let detected = remote_detection::is_remote(location.as_deref(), Some(&description));
            if detected != remote {
                sqlx::query("UPDATE job_listings SET remote = $2, updated_at = NOW() WHERE id = $1")
                    .bind(id)
                    .bind(detected)
                    .execute(&self.pool)
                    .await?;
                stats.changed += 1;
            }
        }

        info!(changed = stats.changed, "Remote flags refreshed");
        Ok(stats)
    }

    /// Assign slugs to rows that never got one.
    pub async fn backfill_slugs(&self) -> Result<MaintenanceStats> {
        let rows: Vec<(Uuid, String, String)> = sqlx::query_as(
            "SELECT id, title, company FROM job_listings WHERE slug IS NULL OR slug = ''",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut stats = MaintenanceStats::default();
        for (id, title, company) in rows {
            stats.processed += 1;
            let slug = self.slugs.generate(&title, &company).await?;
            sqlx::query("UPDATE job_listings SET slug = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(&slug)
                .execute(&self.pool)
                .await?;
            stats.changed += 1;
        }

        info!(changed = stats.changed, "Slugs backfilled");
        Ok(stats)
    }

    /// Re-run domain detection and update rows whose domain changed.
    pub async fn refresh_domains(&self) -> Result<MaintenanceStats> {
        let rows: Vec<(Uuid, String, String, Option<String>)> =
            sqlx::query_as("SELECT id, title, description, domain FROM job_listings")
                .fetch_all(&self.pool)
                .await?;

        let mut stats = MaintenanceStats::default();
        for (id, title, description, domain) in rows {
            stats.processed += 1;
            let detected = job_domain::detect_domain(&title, Some(&description));
            if domain.as_deref() != Some(detected) {
                sqlx::query("UPDATE job_listings SET domain = $2, updated_at = NOW() WHERE id = $1")
                    .bind(id)
                    .bind(detected)
                    .execute(&self.pool)
                    .await?;
                stats.changed += 1;
            }
        }

        info!(changed = stats.changed, "Domains refreshed");
        Ok(stats)
    }

    /// Delete rows that no longer pass the relevance classifier. Used after
    /// keyword table tightening.
    pub async fn prune_irrelevant(&self) -> Result<MaintenanceStats> {
        let rows: Vec<(Uuid, String, String)> =
            sqlx::query_as("SELECT id, title, description FROM job_listings")
                .fetch_all(&self.pool)
                .await?;

        let mut stats = MaintenanceStats::default();
        for (id, title, description) in rows {
            stats.processed += 1;
            if !relevance::is_relevant(&title, &description) {
                sqlx::query("DELETE FROM job_listings WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
                stats.changed += 1;
            }
        }

        info!(deleted = stats.changed, "Irrelevant jobs pruned");
        Ok(stats)
    }
}
