//! On-demand connectivity probe: fetch stored `MySQL` credentials from a
//! secret store and verify they can still open an authenticated session.

pub mod cli;
pub mod probe;
pub mod secrets;
pub mod ssl;
