/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Random quotes and quote game flows.
pub mod quote_service;
/// Game store connection supervision and degraded mode.
pub mod storage_supervisor;
