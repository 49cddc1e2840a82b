pub mod import_service;
pub mod job_apis;
pub mod job_domain;
pub mod job_query_service;
pub mod location_normalizer;
pub mod location_service;
pub mod maintenance_service;
pub mod relevance;
pub mod remote_detection;
pub mod slug;
pub mod text_cleaner;
