use crate::secrets::CredentialRecord;
use crate::ssl::SslDecision;
use sqlx::{
    ConnectOptions, Connection,
    mysql::{MySqlConnectOptions, MySqlConnection, MySqlSslMode},
};
use std::error::Error;
use std::fmt;
use std::time::Duration;
use tracing::{error, info};

/// Trusted root bundle used to verify server certificates on encrypted sessions.
pub const CA_BUNDLE_PATH: &str = "/etc/pki/tls/cert.pem";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Coarse classification of one connectivity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Working,
    NotWorking,
}

impl ProbeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Working => "Connection to the DB is working.",
            Self::NotWorking => "Connection to the DB is not working.",
        }
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attempt one authenticated session and classify the outcome.
///
/// Session acquisition failures are logged and reduced to
/// [`ProbeStatus::NotWorking`]; nothing propagates to the caller.
#[must_use]
pub async fn run(record: &CredentialRecord) -> ProbeStatus {
    let Some(mut conn) = connect_and_authenticate(record, record.ssl).await else {
        return ProbeStatus::NotWorking;
    };

    // A session only counts if it can still serve a basic round trip.
    let status = if conn.ping().await.is_ok() {
        ProbeStatus::Working
    } else {
        ProbeStatus::NotWorking
    };

    // Close gracefully to avoid "Connection reset by peer" noise in server logs
    let _ = conn.close().await;

    status
}

/// One connection attempt honoring the resolved transport policy.
///
/// `decision.allow_fallback` is policy only: the probe performs a single
/// attempt with the primary mode and leaves any plaintext retry to the caller.
async fn connect_and_authenticate(
    record: &CredentialRecord,
    decision: SslDecision,
) -> Option<MySqlConnection> {
    let mut options = MySqlConnectOptions::new()
        .host(&record.host)
        .port(record.port)
        .username(&record.username)
        .password(&record.password);

    if let Some(dbname) = &record.dbname {
        options = options.database(dbname);
    }

    options = if decision.use_ssl {
        // VerifyIdentity checks the chain against the CA bundle and the
        // hostname identity against the certificate
        options
            .ssl_mode(MySqlSslMode::VerifyIdentity)
            .ssl_ca(CA_BUNDLE_PATH)
    } else {
        options.ssl_mode(MySqlSslMode::Disabled)
    };

    match tokio::time::timeout(CONNECT_TIMEOUT, options.connect()).await {
        Ok(Ok(conn)) => {
            info!(
                "Successfully established {} connection as user '{}' with host: '{}'",
                if decision.use_ssl { "SSL/TLS" } else { "non SSL/TLS" },
                record.username,
                record.host
            );
            Some(conn)
        }
        Ok(Err(err)) => {
            if is_hostname_mismatch(&err) {
                error!(
                    "Hostname verification failed when establishing SSL/TLS handshake with host: {}",
                    record.host
                );
            } else {
                error!("Failed to establish connection with host '{}': {err}", record.host);
            }
            None
        }
        Err(_) => {
            error!(
                "Connection attempt to host '{}' timed out after {}s",
                record.host,
                CONNECT_TIMEOUT.as_secs()
            );
            None
        }
    }
}

/// Check the full error chain for the certificate hostname mismatch signature.
fn is_hostname_mismatch(err: &sqlx::Error) -> bool {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    // rustls reports NotValidForName, openssl-backed clients report a
    // verify failure with an IP address mismatch
    text.contains("NotValidForName")
        || text.contains("IP address mismatch")
        || text.contains("certificate verify failed")
}
