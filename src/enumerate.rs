use crate::plugin::PluginInfo;
use crate::plugin::builtin;
#[cfg(feature = "lv2")]
use crate::plugin::lv2;

fn print_plugins(plugins: &[PluginInfo], id_label: &str) {
    if plugins.is_empty() {
        println!("  (none found)");
    }
    for p in plugins {
        let gui = if p.has_gui { " [gui]" } else { "" };
        println!("  {}{gui}", p.name);
        println!("          {id_label:<9}{}", p.id);
        if !p.path.is_empty() {
            println!("          Path:    {}", p.path);
        }
        println!("          Controls: {}", p.control_inputs);
    }
}

pub fn builtins() -> anyhow::Result<()> {
    println!("=== Built-in Plugins ===");
    print_plugins(&builtin::enumerate_plugins(), "ID:");
    Ok(())
}

pub fn plugins() -> anyhow::Result<()> {
    println!("=== LV2 Plugins ===");
    #[cfg(feature = "lv2")]
    print_plugins(&lv2::enumerate_plugins(), "URI:");
    #[cfg(not(feature = "lv2"))]
    println!("  (LV2 support not enabled)");
    Ok(())
}
