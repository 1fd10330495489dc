use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, time::Duration};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for an AWS Secrets Manager compatible endpoint.
///
/// Speaks the `x-amz-json-1.1` target protocol: every operation is a `POST`
/// to the endpoint root with the operation name in the `X-Amz-Target` header.
#[derive(Debug, Clone)]
pub struct SecretsClient {
    endpoint: String,
    http: reqwest::Client,
}

/// Secret metadata from `DescribeSecret`: confirms the secret exists and
/// carries its staging labels. Consumed, not branched on further.
#[derive(Debug, Deserialize)]
pub struct SecretMetadata {
    #[serde(rename = "ARN")]
    pub arn: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "VersionIdsToStages", default)]
    pub version_ids_to_stages: HashMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct GetSecretValueResponse {
    #[serde(rename = "SecretString")]
    secret_string: Option<String>,
}

impl SecretsClient {
    /// Build a client for the given endpoint address.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed
    pub fn new(endpoint: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for the secret store")?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Fetch secret metadata, verifying the secret exists and is staged.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable, responds with a non-2xx
    /// status, or the response body does not deserialize
    pub async fn describe_secret(&self, secret_id: &str) -> Result<SecretMetadata> {
        self.call("secretsmanager.DescribeSecret", secret_id).await
    }

    /// Fetch the `SecretString` payload for the given secret.
    ///
    /// # Errors
    ///
    /// Same transport contract as [`Self::describe_secret`]; additionally
    /// fails when the secret carries no string payload
    pub async fn get_secret_string(&self, secret_id: &str) -> Result<String> {
        let value: GetSecretValueResponse = self
            .call("secretsmanager.GetSecretValue", secret_id)
            .await?;

        value
            .secret_string
            .with_context(|| format!("Secret '{secret_id}' has no SecretString payload"))
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        target: &str,
        secret_id: &str,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.endpoint.as_str())
            .header("X-Amz-Target", target)
            .header("Content-Type", "application/x-amz-json-1.1")
            .json(&serde_json::json!({ "SecretId": secret_id }))
            .send()
            .await
            .with_context(|| format!("Failed to reach secret store at {}", self.endpoint))?
            .error_for_status()
            .with_context(|| format!("Secret store rejected {target} for '{secret_id}'"))?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode {target} response"))
    }
}
