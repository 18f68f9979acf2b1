//! Content-rewriting collaborator seam
//!
//! AI-backed rewriting lives behind this trait so the optimizer never
//! depends on a concrete service. Any failure mode is recoverable: the
//! optimizer falls back to deterministic keyword injection.

use crate::model::{JobRecord, ResumeRecord};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("rewrite service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("rewrite service rate limited")]
    RateLimited,

    #[error("rewrite service returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("rewrite call timed out")]
    Timeout,
}

#[async_trait]
pub trait ContentRewriter: Send + Sync {
    /// Produce a content-enhanced copy of the resume targeted at the job.
    /// Implementations own their retries, rate limiting, and caching.
    async fn rewrite(
        &self,
        resume: &ResumeRecord,
        job: &JobRecord,
    ) -> Result<ResumeRecord, RewriteError>;

    /// Short identifier used in logs and the improvements list
    fn name(&self) -> &str;
}
