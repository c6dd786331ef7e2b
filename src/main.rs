use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal;
use spinning_cube::{
    animation::Animation,
    cli::{Args, Backend},
    tui::{sink::AnsiSink, ui::TuiSink},
};
use tracing::{debug, info};

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level)
        .init();

    // Queried every run, but only sizes the canvas with `--fit-terminal`
    let terminal_size = terminal::size().ok();
    debug!(?terminal_size, "Queried terminal size");

    let render = args
        .render_config(terminal_size)
        .context("Invalid render settings")?;
    let animation = args
        .animation_config()
        .context("Invalid animation settings")?;
    let mut animation = Animation::new(&render, animation).context("Could not set up animation")?;

    let bold = !args.no_bold;
    let frames = match args.backend {
        Backend::Ansi => animation.run(&mut AnsiSink::stdout(bold))?,
        Backend::Tui => animation.run(&mut TuiSink::new(bold)?)?,
    };
    info!(frames, "Done");
    Ok(())
}
