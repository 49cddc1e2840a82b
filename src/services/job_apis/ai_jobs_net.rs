use crate::error::Result;
use crate::models::job_record::JobRecord;
use crate::services::job_apis::JobSource;
use async_trait::async_trait;
use tracing::info;

const SOURCE_NAME: &str = "ai-jobs.net";

/// Disabled source. The ai-jobs.net API was discontinued and its endpoint now
/// redirects to an HTML page, so the adapter contributes nothing; it stays
/// registered so the fan-out and statistics keep one row per known source.
pub struct AiJobsNetSource;

#[async_trait]
impl JobSource for AiJobsNetSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self) -> Result<Vec<JobRecord>> {
        info!("ai-jobs.net API is currently unavailable (upstream serves an HTML page)");
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_source_yields_no_records() {
        let source = AiJobsNetSource;
        assert_eq!(source.name(), "ai-jobs.net");
        assert!(source.fetch().await.unwrap().is_empty());
    }
}
