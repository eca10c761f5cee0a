// SPDX-License-Identifier: MIT OR Apache-2.0

//! File loading for the `files` layer.
//!
//! Files are read in the order the caller listed them and merged key by key,
//! so a later file overrides an earlier one. Each file's parser is either
//! given explicitly or inferred from the file extension.

use crate::adapters::JsonParser;
use crate::domain::{ConfigError, FileDescriptor, FileFormat, Layer, LayerStore, Result};
use crate::ports::{ConfigParser, ConfigSource};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Maximum allowed size for a configuration file (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Parsers indexed by the extensions and format names they handle.
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn ConfigParser>>,
}

impl ParserRegistry {
    /// An empty registry. Most callers want [`ParserRegistry::builtin`].
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// JSON, plus YAML when the `yaml` feature is enabled.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(JsonParser::new()));
        #[cfg(feature = "yaml")]
        registry.register(Arc::new(crate::adapters::YamlParser::new()));
        registry
    }

    /// Registers `parser` under each of its extensions, replacing any parser
    /// previously registered for them.
    pub fn register(&mut self, parser: Arc<dyn ConfigParser>) {
        for extension in parser.supported_extensions() {
            self.parsers
                .insert(extension.to_ascii_lowercase(), Arc::clone(&parser));
        }
    }

    /// Looks up a parser by format name or extension, case-insensitively.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn ConfigParser>> {
        self.parsers.get(&name.to_ascii_lowercase()).cloned()
    }

    /// Infers the parser for `path` from its extension.
    pub fn for_path(&self, path: &Path) -> Option<Arc<dyn ConfigParser>> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.resolve(ext))
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

/// Reads and merges configuration files.
///
/// # Examples
///
/// ```rust,no_run
/// use configue::adapters::FileLoader;
/// use configue::domain::FileDescriptor;
///
/// let loader = FileLoader::new();
/// let merged = loader
///     .load(&[
///         FileDescriptor::new("config/base.json"),
///         FileDescriptor::new("config/local.json"),
///     ])
///     .unwrap();
/// ```
#[derive(Clone, Debug, Default)]
pub struct FileLoader {
    registry: ParserRegistry,
}

impl FileLoader {
    /// Creates a loader with the built-in parsers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader over an explicit registry.
    pub fn with_registry(registry: ParserRegistry) -> Self {
        Self { registry }
    }

    /// Adds a parser, making its extensions and format name resolvable.
    pub fn register_parser(&mut self, parser: Arc<dyn ConfigParser>) {
        self.registry.register(parser);
    }

    /// The parsers this loader can resolve.
    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Loads every file in order; keys from later files win.
    pub fn load(&self, files: &[FileDescriptor]) -> Result<LayerStore> {
        let mut merged = LayerStore::new();
        for descriptor in files {
            let store = self.load_file(descriptor)?;
            merged.merge(store);
        }
        Ok(merged)
    }

    /// Loads a single file.
    pub fn load_file(&self, descriptor: &FileDescriptor) -> Result<LayerStore> {
        let path = descriptor.file();
        let parser = self.parser_for(descriptor)?;
        let content = read_config_file(path)?;

        let parsed = parser.parse(&content).map_err(|e| ConfigError::FileLoad {
            path: path.to_path_buf(),
            message: format!("malformed {} content", parser.format_name()),
            source: Some(Box::new(e)),
        })?;

        tracing::debug!(
            "Loaded {} keys from '{}' as {}",
            parsed.len(),
            path.display(),
            parser.format_name()
        );

        Ok(parsed.into_iter().collect())
    }

    fn parser_for(&self, descriptor: &FileDescriptor) -> Result<Arc<dyn ConfigParser>> {
        let path = descriptor.file();
        match descriptor.format() {
            Some(FileFormat::Parser(parser)) => Ok(Arc::clone(parser)),
            Some(FileFormat::Named(name)) => self.registry.resolve(name).ok_or_else(|| {
                ConfigError::file_load(
                    path,
                    format!(
                        "unknown format '{}' (known: {})",
                        name,
                        self.registry.extensions().join(", ")
                    ),
                )
            }),
            None => self.registry.for_path(path).ok_or_else(|| {
                ConfigError::file_load(
                    path,
                    format!(
                        "cannot infer a parser from the file extension (known: {})",
                        self.registry.extensions().join(", ")
                    ),
                )
            }),
        }
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    let io_error = |message: &str, e: std::io::Error| ConfigError::FileLoad {
        path: path.to_path_buf(),
        message: message.to_string(),
        source: Some(Box::new(e)),
    };

    // Check file size before reading to prevent DoS via large files
    let metadata = fs::metadata(path).map_err(|e| io_error("file is missing or inaccessible", e))?;

    if !metadata.is_file() {
        return Err(ConfigError::file_load(path, "not a regular file"));
    }

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::file_load(
            path,
            format!(
                "file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        ));
    }

    fs::read_to_string(path).map_err(|e| io_error("failed to read file", e))
}

/// The natural source of the `files` layer.
#[derive(Debug)]
pub struct FilesAdapter<'a> {
    loader: &'a FileLoader,
    files: &'a [FileDescriptor],
}

impl<'a> FilesAdapter<'a> {
    /// Creates a source that loads `files` with `loader`.
    pub fn new(loader: &'a FileLoader, files: &'a [FileDescriptor]) -> Self {
        Self { loader, files }
    }
}

impl ConfigSource for FilesAdapter<'_> {
    fn layer(&self) -> Layer {
        Layer::Files
    }

    fn load(&self) -> Result<LayerStore> {
        self.loader.load(self.files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigValue;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    struct UpperParser;

    impl ConfigParser for UpperParser {
        fn parse(&self, content: &str) -> Result<HashMap<String, ConfigValue>> {
            Ok(content
                .lines()
                .filter_map(|line| line.split_once(':'))
                .map(|(k, v)| (k.trim().to_string(), ConfigValue::from(v.trim().to_uppercase())))
                .collect())
        }

        fn supported_extensions(&self) -> &[&str] {
            &["upper"]
        }
    }

    #[test]
    fn test_builtin_registry_has_json() {
        let registry = ParserRegistry::builtin();
        assert!(registry.resolve("json").is_some());
        assert!(registry.resolve("JSON").is_some());
        assert!(registry.for_path(Path::new("conf/app.json")).is_some());
        assert!(registry.for_path(Path::new("conf/app")).is_none());
    }

    #[test]
    #[cfg(feature = "yaml")]
    fn test_builtin_registry_has_yaml() {
        let registry = ParserRegistry::builtin();
        assert!(registry.for_path(Path::new("app.yml")).is_some());
        assert!(registry.resolve("yaml").is_some());
    }

    #[test]
    fn test_load_json_file() {
        let file = temp_file(".json", r#"{"key": "json-config"}"#);
        let store = FileLoader::new()
            .load(&[FileDescriptor::new(file.path())])
            .unwrap();
        assert_eq!(store.get("key"), Some(&ConfigValue::from("json-config")));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let file = temp_file(".JSON", r#"{"key": 1}"#);
        let store = FileLoader::new()
            .load(&[FileDescriptor::new(file.path())])
            .unwrap();
        assert_eq!(store.get("key"), Some(&ConfigValue::from(1)));
    }

    #[test]
    fn test_later_file_wins() {
        let first = temp_file(".json", r#"{"key": "first", "a": 1}"#);
        let second = temp_file(".json", r#"{"key": "second", "b": 2}"#);

        let store = FileLoader::new()
            .load(&[
                FileDescriptor::new(first.path()),
                FileDescriptor::new(second.path()),
            ])
            .unwrap();

        assert_eq!(store.get("key"), Some(&ConfigValue::from("second")));
        assert_eq!(store.get("a"), Some(&ConfigValue::from(1)));
        assert_eq!(store.get("b"), Some(&ConfigValue::from(2)));
    }

    #[test]
    fn test_explicit_parser_wins_over_extension() {
        let file = temp_file(".json", "key: shout");
        let descriptor = FileDescriptor::new(file.path()).with_format(FileFormat::parser(UpperParser));
        let store = FileLoader::new().load(&[descriptor]).unwrap();
        assert_eq!(store.get("key"), Some(&ConfigValue::from("SHOUT")));
    }

    #[test]
    fn test_named_format() {
        let file = temp_file(".conf", r#"{"key": "named"}"#);
        let descriptor = FileDescriptor::new(file.path()).with_format(FileFormat::named("json"));
        let store = FileLoader::new().load(&[descriptor]).unwrap();
        assert_eq!(store.get("key"), Some(&ConfigValue::from("named")));
    }

    #[test]
    fn test_unknown_named_format() {
        let file = temp_file(".conf", "{}");
        let descriptor = FileDescriptor::new(file.path()).with_format(FileFormat::named("toml"));
        let err = FileLoader::new().load(&[descriptor]).unwrap_err();
        assert!(matches!(err, ConfigError::FileLoad { .. }));
        assert!(err.to_string().contains("toml"));
    }

    #[test]
    fn test_registered_parser_is_inferred() {
        let file = temp_file(".upper", "who: me");
        let mut loader = FileLoader::new();
        loader.register_parser(Arc::new(UpperParser));
        let store = loader.load(&[FileDescriptor::new(file.path())]).unwrap();
        assert_eq!(store.get("who"), Some(&ConfigValue::from("ME")));
    }

    #[test]
    fn test_no_parser_for_extension() {
        let file = temp_file(".ini", "key=value");
        let err = FileLoader::with_registry(ParserRegistry::builtin())
            .load(&[FileDescriptor::new(file.path())])
            .unwrap_err();
        match err {
            ConfigError::FileLoad { path, .. } => assert_eq!(path, file.path()),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = FileLoader::new()
            .load(&[FileDescriptor::new("/nonexistent/path/to/config.json")])
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/path/to/config.json"));
    }

    #[test]
    fn test_malformed_file_names_path() {
        let file = temp_file(".json", "{ not json");
        let err = FileLoader::new()
            .load(&[FileDescriptor::new(file.path())])
            .unwrap_err();
        match err {
            ConfigError::FileLoad { path, source, .. } => {
                assert_eq!(path, file.path());
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_failure_in_second_file_aborts() {
        let good = temp_file(".json", r#"{"key": 1}"#);
        let err = FileLoader::new()
            .load(&[
                FileDescriptor::new(good.path()),
                FileDescriptor::new("/nonexistent/second.json"),
            ])
            .unwrap_err();
        assert!(err.to_string().contains("second.json"));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested.json");
        fs::create_dir(&path).unwrap();
        let err = FileLoader::new().load(&[FileDescriptor::new(&path)]).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }

    #[test]
    fn test_files_adapter_layer() {
        let loader = FileLoader::new();
        let adapter = FilesAdapter::new(&loader, &[]);
        assert_eq!(adapter.layer(), Layer::Files);
        assert!(adapter.load().unwrap().is_empty());
    }

    #[test]
    fn test_registry_debug_lists_extensions() {
        let rendered = format!("{:?}", ParserRegistry::builtin());
        assert!(rendered.contains("json"));
    }
}
