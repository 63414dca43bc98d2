//! Share-link pages reachable without a session.
//!
//! Customers and clients receive links carrying a job identifier in the query
//! string. Presence of the expected parameters is the only check; nothing is
//! looked up or verified. A missing parameter renders a static "invalid
//! access" page and goes no further.

#[cfg(test)]
#[path = "share_test.rs"]
mod tests;

use std::collections::HashMap;

use serde::Serialize;

use crate::route::Route;

pub const CUSTOMER_JOB_PARAM: &str = "jobId";
pub const CUSTOMER_MOBILE_PARAM: &str = "mobile";
pub const CLIENT_JOB_PARAM: &str = "jobID";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    #[error("missing query parameter `{0}`")]
    MissingParam(&'static str),
    #[error("{0:?} is not a share-link page")]
    NotShared(Route),
}

/// Parameters a share-link page was opened with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShareAccess {
    Customer { job_id: String, mobile: String },
    Client { job_id: String },
}

impl ShareAccess {
    #[must_use]
    pub fn job_id(&self) -> &str {
        match self {
            Self::Customer { job_id, .. } | Self::Client { job_id } => job_id,
        }
    }
}

fn required(query: &HashMap<String, String>, name: &'static str) -> Result<String, ShareError> {
    query
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or(ShareError::MissingParam(name))
}

/// Check that `query` carries what the share page for `route` expects.
///
/// # Errors
///
/// [`ShareError::MissingParam`] names the first absent or blank parameter;
/// [`ShareError::NotShared`] is returned for routes that are not share pages.
pub fn check(route: Route, query: &HashMap<String, String>) -> Result<ShareAccess, ShareError> {
    match route {
        Route::CustomerView => Ok(ShareAccess::Customer {
            job_id: required(query, CUSTOMER_JOB_PARAM)?,
            mobile: required(query, CUSTOMER_MOBILE_PARAM)?,
        }),
        Route::ClientView => Ok(ShareAccess::Client { job_id: required(query, CLIENT_JOB_PARAM)? }),
        other => Err(ShareError::NotShared(other)),
    }
}
