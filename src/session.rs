use crate::control::ControlBase;
use crate::editor::ViewOptions;
use crate::plugin::{self, LoadedPlugin};

/// Everything needed to (re)open a plugin in the editor.
pub struct Session {
    pub source: String,
    /// Host channel count used to size the control base.
    pub channels: usize,
    pub options: ViewOptions,
    pub runtime: plugin::Runtime,
}

/// A loaded plugin with its control base.
pub struct Opened {
    pub plugin: LoadedPlugin,
    pub base: ControlBase,
}

impl Session {
    pub fn new(source: String, columns: Option<usize>, channels: Option<usize>, runtime: plugin::Runtime) -> Self {
        let editor = crate::config::editor();
        let mut options = ViewOptions::from(editor);
        if let Some(columns) = columns {
            options.columns = columns;
        }
        Self {
            source,
            channels: channels.unwrap_or(editor.host_channels),
            options,
            runtime,
        }
    }

    /// Load the plugin and build its control base, checking that the grid
    /// can be split evenly between the processors.
    pub fn open(&self) -> anyhow::Result<Opened> {
        if self.options.columns == 0 {
            anyhow::bail!("Grid column count must be at least 1");
        }
        let plugin = plugin::load(&self.source, &self.runtime)?;
        let n = ControlBase::processor_count_for(&plugin.descriptor, self.channels);
        if self.options.columns % n != 0 {
            anyhow::bail!(
                "{} columns cannot be split between {n} processors; use a multiple of {n}",
                self.options.columns
            );
        }
        let base = ControlBase::new(plugin.descriptor.clone(), n);
        Ok(Opened { plugin, base })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(source: &str, columns: usize, channels: usize) -> Session {
        Session::new(source.into(), Some(columns), Some(channels), plugin::Runtime::default())
    }

    #[test]
    fn mono_builtin_gets_one_processor_per_channel() {
        let opened = session("builtin:amp", 6, 2).open().unwrap();
        assert_eq!(opened.base.controls().len(), 2);
        assert_eq!(opened.plugin.descriptor.uri, "builtin:amp");
    }

    #[test]
    fn uneven_columns_are_rejected() {
        let err = session("builtin:amp", 5, 2).open().err().unwrap();
        assert!(err.to_string().contains("cannot be split between 2 processors"));
    }

    #[test]
    fn zero_columns_are_rejected() {
        assert!(session("builtin:eq", 0, 2).open().is_err());
    }

    #[test]
    fn unknown_source_is_an_error() {
        assert!(session("builtin:nope", 6, 2).open().is_err());
    }
}
