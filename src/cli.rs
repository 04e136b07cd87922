use clap::{ArgGroup, CommandFactory, FromArgMatches, Parser};

/// Shared flags of both probe binaries. Every flag is optional; with none the
/// probe runs its full fixed sequence.
#[derive(Parser, Debug, Clone, Default)]
#[command(group(ArgGroup::new("timeout_switch").args(["timeout", "no_timeout"]).multiple(false)))]
pub struct Cli {
    /// Seconds before an external command is abandoned (0 disables).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Wait for external commands indefinitely.
    #[arg(long = "no-timeout")]
    pub no_timeout: bool,

    /// Listing tool to run instead of `lv2ls`.
    #[arg(long, value_name = "PROGRAM")]
    pub lv2ls: Option<String>,

    /// Introspection tool to run instead of `lv2info`.
    #[arg(long, value_name = "PROGRAM")]
    pub lv2info: Option<String>,

    /// Disable coloured output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    /// Parse process arguments under the given binary name and description.
    pub fn parse_for(name: &'static str, about: &'static str) -> Self {
        let matches = <Self as CommandFactory>::command()
            .name(name)
            .about(about)
            .version(env!("CARGO_PKG_VERSION"))
            .get_matches();
        <Self as FromArgMatches>::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }
}
