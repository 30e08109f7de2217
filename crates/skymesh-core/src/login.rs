//! Trades account credentials for a mesh auth key.

use reqwest::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::{Result, SkymeshError};

pub const DEFAULT_LOGIN_ENDPOINT: &str = "https://sky-tailscale.sky1218.com/api/logIn";

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    account: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct KeyResponse {
    key: String,
}

#[derive(Debug, Clone)]
pub struct LoginClient {
    endpoint: String,
    client: Client,
}

impl LoginClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    /// POSTs the credentials and returns the issued key. Anything but a 200
    /// is a rejection.
    pub async fn request_key(&self, account: &str, password: &str) -> Result<String> {
        log::info!("requesting auth key for {}", account);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&Credentials { account, password })
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            log::warn!("login endpoint answered {}", status);
            return Err(SkymeshError::LoginRejected(status.as_u16()));
        }

        let body: KeyResponse = response.json().await?;
        Ok(body.key)
    }
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
