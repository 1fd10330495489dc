use crate::cli::actions::Action;
use anyhow::{Context, Result};
use clap::ArgMatches;

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if required parameters are missing
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    let secret_id = matches
        .get_one::<String>("secret-id")
        .context("secret id is required")?
        .clone();

    let endpoint = matches
        .get_one::<String>("endpoint")
        .context("secret store endpoint is required")?
        .clone();

    Ok(Action::Probe {
        secret_id,
        endpoint,
    })
}
