use super::Action;
use crate::{
    probe::{self, ProbeStatus},
    secrets::{CredentialRecord, SecretsClient},
};
use anyhow::Result;
use tracing::debug;

/// Fetch the credential secret, validate it and probe the database.
///
/// # Errors
///
/// Returns an error if the secret store is unreachable or the payload fails
/// validation; these are fatal input errors surfaced before any connection
/// attempt
pub async fn execute(action: Action) -> Result<ProbeStatus> {
    let Action::Probe {
        secret_id,
        endpoint,
    } = action;

    let client = SecretsClient::new(&endpoint)?;

    // Make sure the secret exists and its versions are staged correctly
    let metadata = client.describe_secret(&secret_id).await?;
    debug!(
        "probing secret '{}' ({} staged versions)",
        metadata.name.as_deref().unwrap_or(&secret_id),
        metadata.version_ids_to_stages.len()
    );

    let payload = client.get_secret_string(&secret_id).await?;
    let record = CredentialRecord::from_json(&payload)?;
    debug!(
        use_ssl = record.ssl.use_ssl,
        allow_fallback = record.ssl.allow_fallback,
        "resolved transport policy"
    );

    Ok(probe::run(&record).await)
}
