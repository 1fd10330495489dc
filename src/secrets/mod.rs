pub mod client;
pub mod record;

pub use client::{SecretMetadata, SecretsClient};
pub use record::{CredentialRecord, RecordError};
