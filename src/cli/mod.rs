mod args;
mod output;

pub(crate) use args::{CliArgs, CliCommand, RenderArgs, ReplayArgs, parse_cli};
pub(crate) use output::{print_help, read_results};
