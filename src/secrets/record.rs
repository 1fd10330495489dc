use crate::ssl::{self, SslDecision};
use serde_json::{Map, Value};
use thiserror::Error;

/// Default `MySQL` port when the record has no `port` key.
pub const DEFAULT_PORT: u16 = 3306;

/// Fatal input errors: a record failing any of these is rejected before
/// any connection attempt.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("secret payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("secret payload is not a JSON object")]
    NotAnObject,

    #[error("Database engine must be set to 'mysql' in order to use this probe")]
    UnsupportedEngine,

    #[error("{0} key is missing from secret JSON")]
    MissingField(&'static str),

    #[error("{0} key in secret JSON has an unusable value")]
    InvalidField(&'static str),
}

/// Validated credential set retrieved from the secret store.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub host: String,
    pub username: String,
    pub password: String,
    pub port: u16,
    pub dbname: Option<String>,
    /// Transport policy resolved once from the raw `ssl` field.
    pub ssl: SslDecision,
}

impl CredentialRecord {
    /// Parse and validate a `SecretString` payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a JSON object, a required key is
    /// missing, the engine is not `mysql`, or a present key holds an unusable
    /// value
    pub fn from_json(payload: &str) -> Result<Self, RecordError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_value(&value)
    }

    /// Validate an already-parsed secret payload.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::from_json`]
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let dict = value.as_object().ok_or(RecordError::NotAnObject)?;

        match dict.get("engine") {
            Some(Value::String(engine)) if engine == "mysql" => {}
            _ => return Err(RecordError::UnsupportedEngine),
        }

        Ok(Self {
            host: required_str(dict, "host")?,
            username: required_str(dict, "username")?,
            password: required_str(dict, "password")?,
            port: parse_port(dict.get("port"))?,
            dbname: match dict.get("dbname") {
                None => None,
                Some(Value::String(dbname)) => Some(dbname.clone()),
                Some(_) => return Err(RecordError::InvalidField("dbname")),
            },
            ssl: ssl::resolve(dict.get("ssl")),
        })
    }
}

fn required_str(dict: &Map<String, Value>, key: &'static str) -> Result<String, RecordError> {
    match dict.get(key) {
        Some(Value::String(raw)) => Ok(raw.clone()),
        Some(_) => Err(RecordError::InvalidField(key)),
        None => Err(RecordError::MissingField(key)),
    }
}

/// Accept integer-like values: a JSON number or a numeric string.
fn parse_port(port: Option<&Value>) -> Result<u16, RecordError> {
    match port {
        None => Ok(DEFAULT_PORT),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|raw| u16::try_from(raw).ok())
            .ok_or(RecordError::InvalidField("port")),
        Some(Value::String(raw)) => raw
            .parse::<u16>()
            .map_err(|_| RecordError::InvalidField("port")),
        Some(_) => Err(RecordError::InvalidField("port")),
    }
}
