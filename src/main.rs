mod cli;
mod replay;
mod settings;

use std::io;

use anyhow::Result;
use cli::{CliCommand, RenderArgs, parse_cli, print_help, read_results};
use kal_ui::bridge::JournalBridge;
use kal_ui::{Direction, Session, logging};
use settings::ResolvedConfig;

fn main() -> Result<()> {
    let cli = parse_cli();
    let resolved = settings::load(&cli)?;
    logging::initialize(resolved.log_level.as_deref());

    if cli.print_config {
        resolved.print_summary();
    }

    match &cli.command {
        Some(CliCommand::Render(args)) => render(args, resolved),
        Some(CliCommand::Replay(args)) => replay::run(args, resolved),
        None if cli.print_config => Ok(()),
        None => print_help(),
    }
}

/// Print the page for a fixed result list. Nothing is sent anywhere.
fn render(args: &RenderArgs, settings: ResolvedConfig) -> Result<()> {
    let items = read_results(&args.results)?;
    let mut session = Session::new(JournalBridge::new(io::sink()), settings.bootstrap, settings.os);

    if let Some(query) = &args.query {
        session.input(query.as_str())?;
    }
    let controller = session.controller_mut();
    controller.on_results_pushed(items);
    let len = controller.results().len();
    if len > 0 {
        for _ in 0..args.selected.unwrap_or(0) % len {
            controller.on_navigate(Direction::Next);
        }
    }
    session.take_effects();

    println!("{}", session.render());
    Ok(())
}
