#![allow(clippy::collapsible_if)]

mod cli;
mod config;
mod control;
mod editor;
mod enumerate;
mod plugin;
mod session;
mod tui;

use std::io::Write;
use std::time::SystemTime;

use clap::Parser;
use cli::{Cli, Command, EnumerateTarget, PluginArgs};
use editor::{LinkedModelGroupsView, MainWindow};
use session::Session;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.clone().or_else(config::default_path) {
        Some(path) => config::load(&path)?,
        None => config::Config::default(),
    };
    config::init(config);

    match cli.command {
        Command::Enumerate(target) => {
            env_logger::init();
            match target {
                EnumerateTarget::Plugins => enumerate::plugins(),
                EnumerateTarget::Builtins => enumerate::builtins(),
            }
        }
        Command::Describe(args) => {
            env_logger::init();
            describe(args)
        }
        Command::Edit(args) => edit(args),
    }
}

fn runtime() -> plugin::Runtime {
    #[cfg(feature = "lv2")]
    let runtime = plugin::Runtime::with_lv2();
    #[cfg(not(feature = "lv2"))]
    let runtime = plugin::Runtime::default();
    runtime
}

fn describe(args: PluginArgs) -> anyhow::Result<()> {
    let session = Session::new(args.plugin, args.columns, args.channels, runtime());
    let opened = session.open()?;
    let view = editor::view::build(MainWindow::handle(), &opened.base, &opened.plugin.metadata, &session.options);

    let descriptor = &opened.plugin.descriptor;
    println!("{}", descriptor.name);
    println!("  URI:           {}", descriptor.uri);
    println!(
        "  Audio:         {} in, {} out",
        descriptor.audio_inputs(),
        descriptor.audio_outputs()
    );
    println!("  Native GUI:    {}", if descriptor.has_gui { "yes" } else { "no" });
    println!(
        "  Grid:          {} column(s), {} processor(s)",
        view.grid().columns(),
        view.group_count()
    );
    let buttons: Vec<String> = view
        .buttons()
        .iter()
        .map(|b| if b.is_checkable() { format!("{} (toggle)", b.text()) } else { b.text().to_string() })
        .collect();
    if buttons.is_empty() {
        println!("  Buttons:       (none)");
    } else {
        println!("  Buttons:       {}", buttons.join(", "));
    }
    match view.help_text() {
        Some(text) => println!("  Help:          {text}"),
        None => println!("  Help:          (none)"),
    }
    if view.global_link_led().is_some() {
        println!("  Link channels: available");
    }

    for index in 0..view.group_count() {
        let Some(group) = view.group_view(index) else {
            continue;
        };
        println!("  Processor {index} ({} column(s)):", group.columns());
        if group.is_empty() {
            println!("    (no controls)");
        }
        for (i, entry) in group.controls().iter().enumerate() {
            let (row, col) = group.position(i);
            let control = entry.control();
            print!(
                "    [{row},{col}] {:<8} {:<16} {:<20} = {}",
                control.kind().to_string(),
                entry.key(),
                entry.name(),
                control.display_value()
            );
            if entry.linked() {
                print!(" [linked]");
            }
            let tip = control.top_widget().tool_tip();
            if !tip.is_empty() {
                print!("  ({tip})");
            }
            println!();
        }
    }
    Ok(())
}

/// Custom logger that writes to stderr with \r\n line endings for raw mode.
struct RawModeLogger;

impl log::Log for RawModeLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let now = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .unwrap_or_default();
            let secs = now.as_secs() % 86400; // time of day
            let h = secs / 3600;
            let m = (secs % 3600) / 60;
            let s = secs % 60;
            let ms = now.subsec_millis();
            let _ = write!(
                std::io::stderr(),
                "[{h:02}:{m:02}:{s:02}.{ms:03} {}] {}\r\n",
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static RAW_MODE_LOGGER: RawModeLogger = RawModeLogger;

fn edit(args: PluginArgs) -> anyhow::Result<()> {
    // Set up raw mode logger early so plugin loading messages are visible
    log::set_logger(&RAW_MODE_LOGGER).ok();
    log::set_max_level(
        std::env::var("RUST_LOG")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
    );

    let session = Session::new(args.plugin, args.columns, args.channels, runtime());
    // Fail before touching the terminal if the plugin cannot be opened.
    let opened = session.open()?;
    log::info!("Editing {}. q or Ctrl+C to quit.", opened.plugin.descriptor.name);
    tui::run(session, opened)
}
