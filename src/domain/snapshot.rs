// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snapshot of the process inputs read by the `argv` and `env` layers.

use std::env;

/// Command-line arguments and environment variables captured at one instant.
///
/// Registration reads the process exactly once through this type; later
/// changes to the real arguments or environment are never observed. Tests
/// and embedders build snapshots by hand instead of touching global state.
///
/// # Examples
///
/// ```
/// use configue::domain::ProcessSnapshot;
///
/// let snapshot = ProcessSnapshot::new()
///     .with_arg("--who=YO")
///     .with_var("who", "NO");
/// assert_eq!(snapshot.args(), ["--who=YO".to_string()]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessSnapshot {
    args: Vec<String>,
    vars: Vec<(String, String)>,
}

impl ProcessSnapshot {
    /// Creates an empty snapshot: no arguments, no variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current process arguments (without the program name) and
    /// environment. Variables that are not valid unicode are skipped.
    pub fn capture() -> Self {
        let args: Vec<String> = env::args_os()
            .skip(1)
            .filter_map(|arg| arg.into_string().ok())
            .collect();
        let vars: Vec<(String, String)> = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();

        tracing::debug!(
            "Captured process snapshot: {} arguments, {} environment variables",
            args.len(),
            vars.len()
        );

        Self { args, vars }
    }

    /// Builds a snapshot from explicit arguments and variables.
    pub fn from_parts<A, V, K, S>(args: A, vars: V) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        V: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Appends one command-line argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends one environment variable.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push((key.into(), value.into()));
        self
    }

    /// The captured arguments, program name excluded.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The captured environment variables, in capture order.
    pub fn vars(&self) -> &[(String, String)] {
        &self.vars
    }
}
