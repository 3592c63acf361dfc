use serde::Deserialize;
use tracing::debug;

use crate::data::record::{Role, UserRecord};
use crate::error::FetchError;

/// Shape of one user object on the public demo endpoint
#[derive(Debug, Clone, Deserialize)]
struct RemoteUser {
    id: i64,
    name: String,
    email: String,
}

/// Blocking client for the remote demo users endpoint. Failures are
/// surfaced as `FetchError`; the caller decides what to do with the
/// previously loaded records.
#[derive(Clone)]
pub struct UsersApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl UsersApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        let response = self
            .client
            .get(format!("{}/users", self.base_url))
            .send()?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let remote: Vec<RemoteUser> = response.json()?;
        debug!(count = remote.len(), "fetched users from remote source");
        Ok(remote.into_iter().map(map_remote_user).collect())
    }

    /// Mirror a locally created record to the remote service. The
    /// store never waits on this; a failure is reported and the local
    /// state stands.
    pub fn create_user(&self, record: &UserRecord) -> Result<(), FetchError> {
        let response = self
            .client
            .post(format!("{}/users", self.base_url))
            .json(&serde_json::json!({
                "name": record.name,
                "email": record.email,
            }))
            .send()?;
        self.check_status(response)
    }

    /// Mirror a local update to the remote service
    pub fn update_user(&self, record: &UserRecord) -> Result<(), FetchError> {
        let response = self
            .client
            .put(format!("{}/users/{}", self.base_url, record.id))
            .json(&serde_json::json!({
                "id": record.id,
                "name": record.name,
                "email": record.email,
            }))
            .send()?;
        self.check_status(response)
    }

    /// Mirror a local delete to the remote service
    pub fn delete_user(&self, id: i64) -> Result<(), FetchError> {
        let response = self
            .client
            .delete(format!("{}/users/{}", self.base_url, id))
            .send()?;
        self.check_status(response)
    }

    fn check_status(&self, response: reqwest::blocking::Response) -> Result<(), FetchError> {
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(())
    }
}

/// The demo endpoint has no role column, so roles are derived from the
/// id range the same way the dashboard seeds them
fn map_remote_user(user: RemoteUser) -> UserRecord {
    let role = match user.id {
        ..=3 => Role::Admin,
        4..=7 => Role::User,
        _ => Role::Guest,
    };
    UserRecord::new(user.id, user.name, user.email, role)
}
