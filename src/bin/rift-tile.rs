use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process;
use std::thread;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rift_tile::actor::menu_bar::Menu;
use rift_tile::actor::reactor::{self, Event, Reactor, Record, mirror_event};
use rift_tile::actor::{self};
use rift_tile::common::config::{Config, config_file};
use rift_tile::common::log;
use rift_tile::sys::geometry::Rect;
use rift_tile::sys::headless::HeadlessWindowServer;
use rift_tile::sys::window_server::WindowServer;
use tracing::{error, info};

#[derive(Parser)]
struct Cli {
    /// Path to configuration file to use (overrides default).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Record reactor events to the specified file path. Overwrites the file if
    /// exists.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Screen size used when driving the headless window server, as WIDTHxHEIGHT.
    #[arg(long, default_value = "1440x900", value_parser = parse_screen)]
    screen: Rect,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the configuration file and list any problems.
    Validate,
    /// Replay a recording made with --record and print the resulting layout.
    Replay { file: PathBuf },
}

fn parse_screen(s: &str) -> Result<Rect, String> {
    let (w, h) = s.split_once('x').ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    if w <= 0.0 || h <= 0.0 {
        return Err("screen size must be positive".into());
    }
    Ok(Rect::from_xywh(0.0, 0.0, w, h))
}

fn main() {
    let opt = Cli::parse();
    let config_path = opt.config.clone().unwrap_or_else(config_file);

    if let Some(Commands::Validate) = &opt.command {
        process::exit(validate(&config_path));
    }

    log::init_logging();

    let result = match &opt.command {
        Some(Commands::Replay { file }) => replay(file),
        _ => run(&opt, &config_path),
    };
    if let Err(err) = result {
        error!("{err:#}");
        eprintln!("rift-tile: {err:#}");
        process::exit(1);
    }
}

fn validate(config_path: &Path) -> i32 {
    let config = match Config::read_or_default(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err:#}");
            return 1;
        }
    };
    let issues = config.validate();
    if issues.is_empty() {
        println!("Config validation passed");
        return 0;
    }
    eprintln!("Config validation failed:");
    for issue in issues {
        eprintln!("  - {issue}");
    }
    1
}

fn replay(file: &Path) -> anyhow::Result<()> {
    let reactor = reactor::replay(file)?;
    print_state(&reactor);
    Ok(())
}

/// Drives the reactor from RON events read line by line on stdin, mirroring
/// each into a headless window server.
fn run(opt: &Cli, config_path: &Path) -> anyhow::Result<()> {
    let config = Config::load(config_path)?;
    let record = Record::new(opt.record.as_deref())?;
    let server = HeadlessWindowServer::new(opt.screen);

    let (menu_tx, menu_rx) = actor::channel();
    let menu_thread = thread::Builder::new()
        .name("menu".into())
        .spawn(move || Menu::new(menu_rx).run())
        .context("spawning menu thread")?;

    let (tx, rx) = actor::channel();
    let reactor_thread = thread::Builder::new()
        .name("reactor".into())
        .spawn(move || {
            Reactor::new(config, server, record).with_menu(menu_tx).run(rx, mirror_event)
        })
        .context("spawning reactor thread")?;

    tx.send(Event::Start);
    for (idx, line) in std::io::stdin().lock().lines().enumerate() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        match ron::de::from_str::<Event>(&line) {
            Ok(event) => tx.send(event),
            Err(err) => error!(line = idx + 1, "Ignoring malformed event: {err}"),
        }
    }
    drop(tx);

    let reactor = reactor_thread.join().map_err(|_| anyhow::anyhow!("reactor thread panicked"))?;
    print_state(&reactor);
    // The menu actor stops once the reactor's sender is gone.
    drop(reactor);
    let label = menu_thread.join().map_err(|_| anyhow::anyhow!("menu thread panicked"))?;
    info!(?label, "Event stream closed");
    Ok(())
}

fn print_state(reactor: &Reactor<HeadlessWindowServer>) {
    println!("{}", reactor.layout_engine().serialize_to_string());
    for wid in reactor.server().windows() {
        if let Some(frame) = reactor.server().frame(wid) {
            println!("{wid}: {frame:?}");
        }
    }
}
