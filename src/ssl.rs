use serde_json::Value;

/// Transport policy resolved from the `ssl` field of a credential record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SslDecision {
    /// Attempt an encrypted session with certificate and hostname verification.
    pub use_ssl: bool,
    /// Policy permits a second, unencrypted attempt if the encrypted one fails.
    pub allow_fallback: bool,
}

/// Resolve the loosely-typed `ssl` field into a strict transport policy.
///
/// Precedence:
/// - field absent: attempt SSL/TLS, fallback permitted
/// - boolean: use exactly the requested mode, no fallback
/// - string `"true"`/`"false"` (case-insensitive): as the boolean, no fallback
/// - any other string or type: treated as invalid, same as absent
///
/// Total over every JSON shape, never fails.
#[must_use]
pub fn resolve(ssl: Option<&Value>) -> SslDecision {
    match ssl {
        None => SslDecision {
            use_ssl: true,
            allow_fallback: true,
        },
        Some(Value::Bool(requested)) => SslDecision {
            use_ssl: *requested,
            allow_fallback: false,
        },
        Some(Value::String(raw)) => match raw.to_lowercase().as_str() {
            "true" => SslDecision {
                use_ssl: true,
                allow_fallback: false,
            },
            "false" => SslDecision {
                use_ssl: false,
                allow_fallback: false,
            },
            _ => SslDecision {
                use_ssl: true,
                allow_fallback: true,
            },
        },
        Some(_) => SslDecision {
            use_ssl: true,
            allow_fallback: true,
        },
    }
}
