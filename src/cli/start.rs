use super::{commands, dispatch};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Main orchestrator - Pure orchestration with no business logic
///
/// Five-step data flow:
/// 1. Parse: Extract CLI arguments
/// 2. Initialize Telemetry: Set up structured logging
/// 3. Dispatch: Convert `ArgMatches` into typed Action enum
/// 4. Execute: Run the action's business logic
/// 5. Report: Print the probe classification
///
/// # Errors
///
/// Returns an error if any step in the flow fails
pub async fn start() -> Result<()> {
    // 1. Parse: Extract CLI arguments
    let matches = commands::new().get_matches();

    // 2. Initialize Telemetry: INFO by default, RUST_LOG overrides
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    // 3. Dispatch: Convert ArgMatches into typed Action enum
    let action = dispatch::dispatch(&matches)?;

    // 4. Execute: Run the action's business logic
    let status = action.execute().await?;

    // 5. Report: the two literal outcome strings are the invocation contract
    println!("{status}");

    Ok(())
}
