use crate::error::Result;
use crate::models::location::{Location, LocationEntry};
use crate::services::location_normalizer;
use sqlx::PgPool;
use uuid::Uuid;

/// Resolves normalized location entries against the locations table and keeps
/// the job/location join in sync.
#[derive(Clone)]
pub struct LocationService {
    pool: PgPool,
}

impl LocationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find or create a row per entry; ids come back in input order.
    /// Locations are never deleted here.
    pub async fn get_or_create(&self, entries: &[LocationEntry]) -> Result<Vec<Uuid>> {
        let mut ids = Vec::with_capacity(entries.len());

        for entry in entries {
            let existing = sqlx::query_as::<_, Location>(
                "SELECT id, name, type, region_parent, timezone_based, created_at, updated_at \
                 FROM locations WHERE name = $1",
            )
            .bind(&entry.name)
            .fetch_optional(&self.pool)
            .await?;

            let id = match existing {
                Some(location) => location.id,
                None => {
                    sqlx::query_scalar::<_, Uuid>(
                        r#"
                        INSERT INTO locations (name, type, region_parent, timezone_based)
                        VALUES ($1, $2, $3, $4)
                        RETURNING id
                        "#,
                    )
                    .bind(&entry.name)
                    .bind(entry.kind.as_str())
                    .bind(&entry.region_parent)
                    .bind(entry.timezone_based)
                    .fetch_one(&self.pool)
                    .await?
                }
            };

            ids.push(id);
        }

        Ok(ids)
    }

    /// Replace the job's location set from its raw location string. Previous
    /// associations are removed, not merged.
    pub async fn sync_job_locations(&self, job_id: Uuid, raw_location: Option<&str>) -> Result<()> {
        let entries = location_normalizer::normalize(raw_location);
        let location_ids = self.get_or_create(&entries).await?;

        sqlx::query("DELETE FROM job_location WHERE job_id = $1")
            .bind(job_id)
            .execute(&self.pool)
            .await?;

        for location_id in location_ids {
            sqlx::query(
                r#"
                INSERT INTO job_location (job_id, location_id)
                VALUES ($1, $2)
                ON CONFLICT (job_id, location_id) DO NOTHING
                "#,
            )
            .bind(job_id)
            .bind(location_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}
