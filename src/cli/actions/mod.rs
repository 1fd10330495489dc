mod run;

use crate::probe::ProbeStatus;

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Probe { secret_id: String, endpoint: String },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the secret cannot be fetched or fails validation;
    /// connection-level failures are reported through the returned status,
    /// never as an error
    pub async fn execute(self) -> anyhow::Result<ProbeStatus> {
        run::execute(self).await
    }
}
