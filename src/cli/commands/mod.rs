use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Pure clap command definitions with zero business logic
#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("secret-id")
                .env("DBPROBE_SECRET_ID")
                .help("Identifier (name or ARN) of the credential secret to probe")
                .long("secret-id")
                .short('s')
                .required(true),
        )
        .arg(
            Arg::new("endpoint")
                .env("DBPROBE_SECRETS_ENDPOINT")
                .help("Secret store endpoint, e.g. https://secretsmanager.us-east-1.amazonaws.com")
                .long("endpoint")
                .short('e')
                .required(true),
        )
}
