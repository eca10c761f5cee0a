// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument source for the `argv` layer.

use crate::domain::{Layer, LayerStore, ProcessSnapshot, Result};
use crate::ports::ConfigSource;

/// Configuration source adapter for command-line arguments.
///
/// Supported argument formats:
/// - `--key=value`: long form with equals sign
/// - `--key value`: long form with space-separated value
/// - `-k value`: short form with space-separated value
/// - `--key -5`: a negative number is taken as the value
/// - `--flag`: a flag with no value is `true`
/// - `--no-flag`: negated flag, `flag` is `false`
/// - `--`: everything after it is positional and ignored
///
/// Values are kept as strings; the typed accessors on `ConfigValue` convert
/// them. When a key repeats, the last occurrence wins.
///
/// # Examples
///
/// ```rust
/// use configue::adapters::CommandLineAdapter;
/// use configue::ports::ConfigSource;
///
/// let adapter = CommandLineAdapter::from_args(vec!["--when=later", "--verbose"]);
/// let store = adapter.load().unwrap();
/// assert_eq!(store.get("when").unwrap().as_str(), Some("later"));
/// assert!(store.get("verbose").unwrap().as_bool("verbose").unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineAdapter {
    /// Parsed configuration values
    values: LayerStore,
}

impl CommandLineAdapter {
    /// Creates an adapter with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `args` (program name already removed).
    pub fn from_args<S: AsRef<str>>(args: Vec<S>) -> Self {
        let mut adapter = Self::new();
        adapter.parse_args(&args);
        adapter
    }

    /// Parses the arguments held by a process snapshot.
    pub fn from_snapshot(snapshot: &ProcessSnapshot) -> Self {
        Self::from_args(snapshot.args().to_vec())
    }

    /// Stores a flag that has no explicit value.
    fn set_flag(&mut self, name: &str) {
        match name.strip_prefix("no-") {
            Some(negated) if !negated.is_empty() => {
                self.values.set(negated, false);
            }
            _ => {
                self.values.set(name, true);
            }
        }
    }

    /// Parses command-line arguments and populates the values map.
    fn parse_args<S: AsRef<str>>(&mut self, args: &[S]) {
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_ref();

            if arg == "--" {
                break;
            }

            // --key=value
            if let Some((key, value)) = arg.strip_prefix("--").and_then(|s| s.split_once('=')) {
                if !key.is_empty() {
                    self.values.set(key, value);
                }
                i += 1;
                continue;
            }

            // --key value | --flag, and -k value | -k
            let name = match arg.strip_prefix("--") {
                Some(long) => long,
                None if arg.starts_with('-') && arg.len() == 2 => &arg[1..],
                None => {
                    i += 1;
                    continue;
                }
            };
            if name.is_empty() || name.starts_with('-') {
                i += 1;
                continue;
            }

            match args.get(i + 1).map(|next| next.as_ref()) {
                Some(next) if !next.starts_with('-') || is_negative_number(next) => {
                    self.values.set(name, next);
                    i += 2;
                }
                _ => {
                    self.set_flag(name);
                    i += 1;
                }
            }
        }

        tracing::debug!("Parsed {} command-line configuration values", self.values.len());
    }
}

/// `-5`, `-0.25` and the like are values, not flags.
fn is_negative_number(arg: &str) -> bool {
    arg.strip_prefix('-')
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit() || c == '.'))
        && arg.parse::<f64>().is_ok()
}

impl ConfigSource for CommandLineAdapter {
    fn layer(&self) -> Layer {
        Layer::Argv
    }

    fn load(&self) -> Result<LayerStore> {
        Ok(self.values.clone())
    }
}
