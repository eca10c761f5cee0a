// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration options: which files to load, which layers to skip, and the
//! post-load hooks to run on each layer.
//!
//! Options are built in code with [`ConfigOptions::builder`] or read from a
//! dynamic document with [`ConfigOptions::from_value`]. Only three top-level
//! keys exist: `files`, `disable` and `postHooks`.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Layer, LayerStore, Result};
use crate::ports::ConfigParser;
use directories::ProjectDirs;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A function that mutates a layer's store right after the layer loads.
pub type PostHook = Arc<dyn Fn(&mut LayerStore) + Send + Sync>;

/// The parser to use for one file.
#[derive(Clone)]
pub enum FileFormat {
    /// A format name such as `"json"` or `"yaml"`, resolved by the file loader.
    Named(String),
    /// An explicit parser.
    Parser(Arc<dyn ConfigParser>),
}

impl FileFormat {
    /// Refers to a registered format by name.
    pub fn named(name: impl Into<String>) -> Self {
        FileFormat::Named(name.into())
    }

    /// Uses `parser` for this file regardless of its extension.
    pub fn parser(parser: impl ConfigParser + 'static) -> Self {
        FileFormat::Parser(Arc::new(parser))
    }
}

impl fmt::Debug for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Named(name) => f.debug_tuple("Named").field(name).finish(),
            FileFormat::Parser(parser) => f
                .debug_tuple("Parser")
                .field(&parser.format_name())
                .finish(),
        }
    }
}

/// One configuration file to load.
///
/// # Examples
///
/// ```
/// use configue::domain::{FileDescriptor, FileFormat};
///
/// let json = FileDescriptor::new("config/app.json");
/// let yaml = FileDescriptor::new("config/app.conf").with_format(FileFormat::named("yaml"));
/// assert!(json.format().is_none());
/// assert!(yaml.format().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct FileDescriptor {
    file: PathBuf,
    format: Option<FileFormat>,
}

impl FileDescriptor {
    /// Describes `file`; its parser will be inferred from the extension.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            format: None,
        }
    }

    /// Describes `filename` inside the OS-appropriate configuration directory
    /// for the given application (e.g. `~/.config/myapp` on Linux).
    pub fn in_config_dir(qualifier: &str, app_name: &str, filename: &str) -> Result<Self> {
        let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            ConfigError::options_shape(format!(
                "Failed to determine the configuration directory for '{}'",
                app_name
            ))
        })?;

        Ok(Self::new(proj_dirs.config_dir().join(filename)))
    }

    /// Sets an explicit format, overriding extension inference.
    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// The path of the file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The explicit format, if any.
    pub fn format(&self) -> Option<&FileFormat> {
        self.format.as_ref()
    }
}

/// Layers to skip entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisableSet {
    /// Skip command-line arguments
    pub argv: bool,
    /// Skip environment variables
    pub env: bool,
    /// Skip configuration files
    pub files: bool,
    /// Skip the defaults layer
    pub defaults: bool,
}

impl DisableSet {
    /// Returns `true` if `layer` is disabled.
    pub fn is_disabled(&self, layer: Layer) -> bool {
        match layer {
            Layer::Argv => self.argv,
            Layer::Env => self.env,
            Layer::Files => self.files,
            Layer::Defaults => self.defaults,
        }
    }

    /// Marks `layer` as disabled.
    pub fn disable(&mut self, layer: Layer) {
        match layer {
            Layer::Argv => self.argv = true,
            Layer::Env => self.env = true,
            Layer::Files => self.files = true,
            Layer::Defaults => self.defaults = true,
        }
    }
}

/// Options for one registration.
///
/// Hooks are keyed by layer *name* as the caller wrote it; names are checked
/// at registration so that a typo fails loudly instead of never running.
#[derive(Clone, Default)]
pub struct ConfigOptions {
    files: Vec<FileDescriptor>,
    disable: DisableSet,
    post_hooks: Vec<(String, Vec<PostHook>)>,
    // Leading `defaults` hooks that were added by `ConfigOptionsBuilder::defaults`.
    default_seeds: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawOptions {
    #[serde(default)]
    files: Vec<RawFileDescriptor>,
    #[serde(default)]
    disable: DisableSet,
    #[serde(default)]
    post_hooks: Option<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFileDescriptor {
    file: Option<PathBuf>,
    format: Option<String>,
}

impl ConfigOptions {
    /// Starts building options in code.
    pub fn builder() -> ConfigOptionsBuilder {
        ConfigOptionsBuilder::default()
    }

    /// Reads options from a dynamic document.
    ///
    /// `null` means "no options". Unknown keys, a file entry without `file`,
    /// or any value of the wrong type is an `OptionsShape` error. `postHooks`
    /// is a known key, but hooks are code and must be attached through the
    /// builder, so a document that carries it is rejected too.
    ///
    /// # Examples
    ///
    /// ```
    /// use configue::domain::ConfigOptions;
    /// use serde_json::json;
    ///
    /// let options = ConfigOptions::from_value(json!({
    ///     "files": [{ "file": "config.json" }],
    ///     "disable": { "argv": true }
    /// }))
    /// .unwrap();
    /// assert_eq!(options.files().len(), 1);
    ///
    /// assert!(ConfigOptions::from_value(json!({ "this": "is-junk" })).is_err());
    /// ```
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        if !value.is_object() {
            return Err(ConfigError::options_shape(format!(
                "options must be an object, got {}",
                value
            )));
        }

        let raw: RawOptions = serde_json::from_value(value)
            .map_err(|e| ConfigError::options_shape(e.to_string()))?;

        if raw.post_hooks.is_some() {
            return Err(ConfigError::options_shape(
                "postHooks holds functions and cannot be read from a document; \
                 attach hooks with ConfigOptionsBuilder::post_hook",
            ));
        }

        let mut files = Vec::with_capacity(raw.files.len());
        for (index, entry) in raw.files.into_iter().enumerate() {
            let file = entry.file.ok_or_else(|| {
                ConfigError::options_shape(format!("files[{}] is missing its 'file' field", index))
            })?;
            let mut descriptor = FileDescriptor::new(file);
            if let Some(format) = entry.format {
                descriptor = descriptor.with_format(FileFormat::Named(format));
            }
            files.push(descriptor);
        }

        Ok(Self {
            files,
            disable: raw.disable,
            post_hooks: Vec::new(),
            default_seeds: 0,
        })
    }

    /// Reads options from JSON text. See [`ConfigOptions::from_value`].
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| ConfigError::options_shape(format!("options are not valid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Reopens these options for further building, e.g. to add hooks to
    /// options read from a document.
    pub fn into_builder(self) -> ConfigOptionsBuilder {
        ConfigOptionsBuilder { options: self }
    }

    /// Files to load, in merge order.
    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    /// Layers to skip.
    pub fn disable(&self) -> &DisableSet {
        &self.disable
    }

    /// Hooks grouped by the layer name the caller used, in declaration order.
    pub fn post_hooks(&self) -> impl Iterator<Item = (&str, &[PostHook])> {
        self.post_hooks
            .iter()
            .map(|(name, hooks)| (name.as_str(), hooks.as_slice()))
    }

    /// Checks the shape of the options: every file descriptor names a file
    /// and every hook targets one of the four layers.
    pub fn validate(&self) -> Result<()> {
        for (index, descriptor) in self.files.iter().enumerate() {
            if descriptor.file.as_os_str().is_empty() {
                return Err(ConfigError::options_shape(format!(
                    "files[{}] is missing its 'file' field",
                    index
                )));
            }
        }

        for (name, _) in &self.post_hooks {
            name.parse::<Layer>()?;
        }

        Ok(())
    }

    fn hooks_entry(&mut self, layer: &str) -> &mut Vec<PostHook> {
        let position = match self.post_hooks.iter().position(|(name, _)| name == layer) {
            Some(position) => position,
            None => {
                self.post_hooks.push((layer.to_string(), Vec::new()));
                self.post_hooks.len() - 1
            }
        };
        &mut self.post_hooks[position].1
    }
}

impl fmt::Debug for ConfigOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks: Vec<(&str, usize)> = self
            .post_hooks
            .iter()
            .map(|(name, hooks)| (name.as_str(), hooks.len()))
            .collect();
        f.debug_struct("ConfigOptions")
            .field("files", &self.files)
            .field("disable", &self.disable)
            .field("post_hooks", &hooks)
            .finish()
    }
}

/// Builder for [`ConfigOptions`].
///
/// # Examples
///
/// ```
/// use configue::domain::{ConfigOptions, Layer};
///
/// let options = ConfigOptions::builder()
///     .file("config.json")
///     .disable(Layer::Argv)
///     .post_hook("env", |store| {
///         store.set("who", "ME FIRST!");
///     })
///     .defaults([("port", 8080)])
///     .build();
///
/// assert!(options.disable().argv);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigOptionsBuilder {
    options: ConfigOptions,
}

impl ConfigOptionsBuilder {
    /// Appends a file whose parser is inferred from its extension.
    pub fn file(self, file: impl Into<PathBuf>) -> Self {
        self.file_descriptor(FileDescriptor::new(file))
    }

    /// Appends a file descriptor.
    pub fn file_descriptor(mut self, descriptor: FileDescriptor) -> Self {
        self.options.files.push(descriptor);
        self
    }

    /// Skips `layer` entirely.
    pub fn disable(mut self, layer: Layer) -> Self {
        self.options.disable.disable(layer);
        self
    }

    /// Replaces the whole disable set.
    pub fn disable_set(mut self, disable: DisableSet) -> Self {
        self.options.disable = disable;
        self
    }

    /// Appends a hook to the named layer. Repeated calls for the same layer
    /// run in call order.
    pub fn post_hook<F>(mut self, layer: impl AsRef<str>, hook: F) -> Self
    where
        F: Fn(&mut LayerStore) + Send + Sync + 'static,
    {
        self.options.hooks_entry(layer.as_ref()).push(Arc::new(hook));
        self
    }

    /// Appends a sequence of hooks to the named layer, preserving their order.
    pub fn post_hooks<I>(mut self, layer: impl AsRef<str>, hooks: I) -> Self
    where
        I: IntoIterator<Item = PostHook>,
    {
        self.options.hooks_entry(layer.as_ref()).extend(hooks);
        self
    }

    /// Seeds the `defaults` layer with static values.
    ///
    /// The values are written by a hook that runs before any hook added
    /// with `post_hook`, so those hooks can read and adjust them. Repeated
    /// calls seed in call order, so a later call wins on shared keys.
    pub fn defaults<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ConfigKey>,
        V: Into<ConfigValue>,
    {
        let seeded: LayerStore = values.into_iter().collect();
        let hook: PostHook = Arc::new(move |store: &mut LayerStore| store.merge(seeded.clone()));
        let position = self.options.default_seeds;
        self.options
            .hooks_entry(Layer::Defaults.as_str())
            .insert(position, hook);
        self.options.default_seeds += 1;
        self
    }

    /// Finishes building. Validation happens at registration.
    pub fn build(self) -> ConfigOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_null_is_empty() {
        let options = ConfigOptions::from_value(serde_json::Value::Null).unwrap();
        assert!(options.files().is_empty());
        assert_eq!(*options.disable(), DisableSet::default());
    }

    #[test]
    fn test_from_value_rejects_unknown_key() {
        let err = ConfigOptions::from_value(json!({ "this": "is-junk" })).unwrap_err();
        assert!(matches!(err, ConfigError::OptionsShape { .. }));
        assert!(err.to_string().contains("this"));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = ConfigOptions::from_value(json!(["files"])).unwrap_err();
        assert!(matches!(err, ConfigError::OptionsShape { .. }));
    }

    #[test]
    fn test_from_value_missing_file_field() {
        let err = ConfigOptions::from_value(json!({ "files": [{ "format": "json" }] })).unwrap_err();
        assert!(err.to_string().contains("files[0]"));
    }

    #[test]
    fn test_from_value_rejects_unknown_layer_in_disable() {
        let err = ConfigOptions::from_value(json!({ "disable": { "argz": true } })).unwrap_err();
        assert!(matches!(err, ConfigError::OptionsShape { .. }));
    }

    #[test]
    fn test_from_value_rejects_post_hooks_document() {
        let err = ConfigOptions::from_value(json!({ "postHooks": { "env": "fn" } })).unwrap_err();
        assert!(err.to_string().contains("postHooks"));
    }

    #[test]
    fn test_from_value_full() {
        let options = ConfigOptions::from_value(json!({
            "files": [
                { "file": "a.json" },
                { "file": "b.conf", "format": "yaml" }
            ],
            "disable": { "argv": true, "defaults": true }
        }))
        .unwrap();

        assert_eq!(options.files()[0].file(), Path::new("a.json"));
        assert!(matches!(
            options.files()[1].format(),
            Some(FileFormat::Named(name)) if name == "yaml"
        ));
        assert!(options.disable().argv);
        assert!(!options.disable().env);
        assert!(options.disable().defaults);
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(ConfigOptions::from_json_str("{ not json").is_err());
        assert!(ConfigOptions::from_json_str("{}").is_ok());
    }

    #[test]
    fn test_validate_empty_file_path() {
        let options = ConfigOptions::builder().file("").build();
        assert!(matches!(
            options.validate().unwrap_err(),
            ConfigError::OptionsShape { .. }
        ));
    }

    #[test]
    fn test_validate_unknown_hook_layer() {
        let options = ConfigOptions::builder().post_hook("evn", |_| {}).build();
        assert!(matches!(
            options.validate().unwrap_err(),
            ConfigError::HookTarget { .. }
        ));
    }

    #[test]
    fn test_hooks_accumulate_per_layer_in_order() {
        let options = ConfigOptions::builder()
            .post_hook("env", |_| {})
            .post_hook("argv", |_| {})
            .post_hook(Layer::Env, |_| {})
            .build();

        let grouped: Vec<(&str, usize)> = options
            .post_hooks()
            .map(|(name, hooks)| (name, hooks.len()))
            .collect();
        assert_eq!(grouped, vec![("env", 2), ("argv", 1)]);
    }

    #[test]
    fn test_defaults_hook_runs_first() {
        let options = ConfigOptions::builder()
            .post_hook("defaults", |store| {
                let port = store.get("port").and_then(|v| v.as_i64("port").ok()).unwrap_or(0);
                store.set("port", port + 1);
            })
            .defaults([("port", 8080)])
            .build();

        let (_, hooks) = options.post_hooks().next().unwrap();
        let mut store = LayerStore::new();
        for hook in hooks {
            hook(&mut store);
        }
        assert_eq!(store.get("port"), Some(&ConfigValue::from(8081)));
    }

    #[test]
    fn test_repeated_defaults_later_call_wins() {
        let options = ConfigOptions::builder()
            .post_hook("defaults", |store| {
                let port = store.get("port").and_then(|v| v.as_i64("port").ok()).unwrap_or(0);
                store.set("port", port + 1);
            })
            .defaults([("port", 1), ("host", 7)])
            .defaults([("port", 2)])
            .build();

        let (_, hooks) = options.post_hooks().next().unwrap();
        assert_eq!(hooks.len(), 3);
        let mut store = LayerStore::new();
        for hook in hooks {
            hook(&mut store);
        }
        assert_eq!(store.get("port"), Some(&ConfigValue::from(3)));
        assert_eq!(store.get("host"), Some(&ConfigValue::from(7)));
    }

    #[test]
    fn test_into_builder_adds_hooks_to_document_options() {
        let options = ConfigOptions::from_value(json!({ "disable": { "env": true } }))
            .unwrap()
            .into_builder()
            .post_hook("argv", |_| {})
            .build();
        assert!(options.disable().env);
        assert_eq!(options.post_hooks().count(), 1);
    }

    #[test]
    fn test_disable_set_round_trip() {
        let mut set = DisableSet::default();
        for layer in Layer::PRECEDENCE {
            assert!(!set.is_disabled(layer));
            set.disable(layer);
            assert!(set.is_disabled(layer));
        }
    }

    #[test]
    fn test_in_config_dir_uses_filename() {
        if let Ok(descriptor) = FileDescriptor::in_config_dir("org.example", "configue-test", "app.json") {
            assert!(descriptor.file().ends_with("app.json"));
        }
    }

    #[test]
    fn test_debug_hides_hook_bodies() {
        let options = ConfigOptions::builder().post_hook("env", |_| {}).build();
        let rendered = format!("{:?}", options);
        assert!(rendered.contains("(\"env\", 1)"));
    }
}
