use std::path::PathBuf;

use clap::{
    ArgAction, Args, ColorChoice, Parser, Subcommand, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use kal_ipc::OsFamily;
use kal_ui::app_dirs;

/// Version banner with the directories the binary reads from.
fn long_version() -> &'static str {
    let describe = |dir: anyhow::Result<PathBuf>| match dir {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("kal-ui {}\n", env!("CARGO_PKG_VERSION"));
    details.push_str(&format!("config directory: {}\n", describe(app_dirs::get_config_dir())));
    details.push_str(&format!("data directory: {}\n", describe(app_dirs::get_data_dir())));
    details.push_str(&format!("cache directory: {}\n", describe(app_dirs::get_cache_dir())));

    Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

/// Command-line arguments accepted by the `kal-ui` binary.
#[derive(Parser, Debug)]
#[command(
    name = "kal-ui",
    version,
    long_version = long_version(),
    about = "Launcher front-end: render result lists and replay UI sessions",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "KAL_UI_CONFIG",
        action = ArgAction::Append,
        global = true,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        global = true,
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        long,
        value_enum,
        global = true,
        help = "Platform family used for protocol URLs (default: this build's)"
    )]
    pub(crate) os: Option<OsArg>,
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        global = true,
        help = "Log filter when KAL_LOG is unset (default: warn)"
    )]
    pub(crate) log_level: Option<String>,
    #[arg(
        short = 'p',
        long = "print-config",
        global = true,
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[command(subcommand)]
    pub(crate) command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CliCommand {
    /// Print the launcher page for a JSON list of results.
    Render(RenderArgs),
    /// Drive a session from a JSON-lines script.
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    #[arg(short, long, value_name = "FILE", help = "JSON array of result items")]
    pub(crate) results: PathBuf,
    #[arg(short, long, value_name = "TEXT", help = "Text shown in the input (default: empty)")]
    pub(crate) query: Option<String>,
    #[arg(
        short,
        long,
        value_name = "N",
        help = "Selected row, wrapping past the end (default: 0)"
    )]
    pub(crate) selected: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    #[arg(short, long, value_name = "FILE", help = "JSON-lines script to replay")]
    pub(crate) script: PathBuf,
    #[arg(
        long,
        value_name = "PROGRAM",
        help = "Host program to talk to over stdio (default: journal commands to stdout)"
    )]
    pub(crate) host: Option<String>,
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "ARGS",
        help = "Arguments passed to the host program"
    )]
    pub(crate) host_args: Vec<String>,
    #[arg(
        long = "render-final",
        help = "Print the rendered page after the script ends (default: disabled)"
    )]
    pub(crate) render_final: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OsArg {
    Windows,
    Unix,
}

impl From<OsArg> for OsFamily {
    fn from(value: OsArg) -> Self {
        match value {
            OsArg::Windows => OsFamily::Windows,
            OsArg::Unix => OsFamily::Unix,
        }
    }
}
