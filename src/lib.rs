pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    import_service::ImportService, job_query_service::JobQueryService,
    maintenance_service::MaintenanceService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub import_service: ImportService,
    pub job_query_service: JobQueryService,
    pub maintenance_service: MaintenanceService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();

        let import_service = ImportService::new(pool.clone(), http_client);
        let job_query_service = JobQueryService::new(pool.clone());
        let maintenance_service = MaintenanceService::new(pool.clone());

        Self {
            pool,
            import_service,
            job_query_service,
            maintenance_service,
        }
    }
}
