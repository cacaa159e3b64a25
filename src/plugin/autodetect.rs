use std::path::{Path, PathBuf};

use super::PluginType;

/// Resolve a plugin source string into a plugin type and normalized source.
///
/// Supported formats:
///   - `builtin:<name>`         — built-in plugin description
///   - `lv2:<URI>`              — explicit LV2 URI
///   - `path/to/foo.lv2`        — LV2 bundle path
///   - `http://…` / `urn:…`     — auto-detected as LV2 URI
///   - `foo`                    — bundle `foo.lv2` inside one of `search_dirs`
pub fn resolve(source: &str, search_dirs: &[PathBuf]) -> anyhow::Result<(PluginType, String)> {
    if source.starts_with("builtin:") {
        return Ok((PluginType::Builtin, source.to_string()));
    }

    #[cfg(feature = "lv2")]
    {
        if source.starts_with("lv2:") {
            return Ok((PluginType::Lv2, source.to_string()));
        }

        if source.ends_with(".lv2") || source.ends_with(".lv2/") {
            return Ok((PluginType::Lv2, source.to_string()));
        }

        if source.starts_with("http://") || source.starts_with("https://") || source.starts_with("urn:") {
            return Ok((PluginType::Lv2, format!("lv2:{source}")));
        }

        if let Some(bundle) = locate_bundle(source, search_dirs) {
            return Ok((PluginType::Lv2, bundle.to_string_lossy().to_string()));
        }
    }
    #[cfg(not(feature = "lv2"))]
    let _ = search_dirs;

    anyhow::bail!(
        "Unknown plugin source: {source}\n\
         Expected one of:\n  \
           builtin:<name>         (built-in plugin)\n  \
           lv2:<URI>              (explicit LV2)\n  \
           http://…               (LV2 URI)\n  \
           /path/to/plugin.lv2\n  \
           <name>                 (bundle <name>.lv2 in a configured lv2 path)\n\
         Run `lv2view enumerate plugins` to list available plugins."
    )
}

/// Find `<name>.lv2` in the first directory that contains it.
pub fn locate_bundle(name: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    if name.is_empty() || name.contains(['/', '\\']) {
        return None;
    }
    search_dirs
        .iter()
        .map(|dir| dir.join(format!("{name}.lv2")))
        .find(|candidate| Path::new(candidate).is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_prefix() {
        let (ty, src) = resolve("builtin:amp", &[]).unwrap();
        assert_eq!(ty, PluginType::Builtin);
        assert_eq!(src, "builtin:amp");
    }

    #[cfg(feature = "lv2")]
    #[test]
    fn explicit_lv2_prefix() {
        let (ty, src) = resolve("lv2:http://calf.sourceforge.net/plugins/Filter", &[]).unwrap();
        assert_eq!(ty, PluginType::Lv2);
        assert_eq!(src, "lv2:http://calf.sourceforge.net/plugins/Filter");
    }

    #[cfg(feature = "lv2")]
    #[test]
    fn lv2_bundle_path() {
        let (ty, src) = resolve("/usr/lib/lv2/amp.lv2", &[]).unwrap();
        assert_eq!(ty, PluginType::Lv2);
        assert_eq!(src, "/usr/lib/lv2/amp.lv2");
    }

    #[cfg(feature = "lv2")]
    #[test]
    fn lv2_bundle_path_trailing_slash() {
        let (ty, src) = resolve("/usr/lib/lv2/amp.lv2/", &[]).unwrap();
        assert_eq!(ty, PluginType::Lv2);
        assert_eq!(src, "/usr/lib/lv2/amp.lv2/");
    }

    #[cfg(feature = "lv2")]
    #[test]
    fn bare_http_uri() {
        let (ty, src) = resolve("http://lv2plug.in/plugins/eg-amp", &[]).unwrap();
        assert_eq!(ty, PluginType::Lv2);
        assert_eq!(src, "lv2:http://lv2plug.in/plugins/eg-amp");
    }

    #[cfg(feature = "lv2")]
    #[test]
    fn bare_urn() {
        let (ty, src) = resolve("urn:lv2:some-plugin", &[]).unwrap();
        assert_eq!(ty, PluginType::Lv2);
        assert_eq!(src, "lv2:urn:lv2:some-plugin");
    }

    #[cfg(feature = "lv2")]
    #[test]
    fn bare_name_found_in_search_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("reverb.lv2")).unwrap();
        let dirs = vec![PathBuf::from("/nonexistent"), dir.path().to_path_buf()];
        let (ty, src) = resolve("reverb", &dirs).unwrap();
        assert_eq!(ty, PluginType::Lv2);
        assert_eq!(PathBuf::from(src), dir.path().join("reverb.lv2"));
    }

    #[test]
    fn locate_bundle_rejects_paths() {
        let dir = tempfile::tempdir().unwrap();
        assert!(locate_bundle("a/b", &[dir.path().to_path_buf()]).is_none());
        assert!(locate_bundle("", &[dir.path().to_path_buf()]).is_none());
    }

    #[test]
    fn unknown_format() {
        assert!(resolve("something-without-a-bundle", &[]).is_err());
    }
}
