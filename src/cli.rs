use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lv2view", about = "Terminal editor for LV2 plugin controls")]
pub struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/lv2view/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List available plugins
    #[command(subcommand)]
    Enumerate(EnumerateTarget),
    /// Print the editor layout of a plugin (controls, tooltips, help text)
    Describe(PluginArgs),
    /// Open the interactive editor for a plugin
    Edit(PluginArgs),
}

#[derive(Subcommand)]
pub enum EnumerateTarget {
    /// List installed LV2 plugins
    Plugins,
    /// List built-in demo plugins
    Builtins,
}

#[derive(clap::Args)]
pub struct PluginArgs {
    /// Plugin source (lv2:<URI>, bundle path, bundle name, or builtin:<name>)
    pub plugin: String,

    /// Grid column count (default from config)
    #[arg(long)]
    pub columns: Option<usize>,

    /// Host audio channels; a mono plugin gets one processor per channel
    #[arg(long)]
    pub channels: Option<usize>,
}
