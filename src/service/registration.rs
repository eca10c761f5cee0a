// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration: options in, a shared lookup handle out.

use crate::adapters::FileLoader;
use crate::domain::{ConfigLookup, ConfigOptions, ConfigValue, Layer, ProcessSnapshot, Result};
use crate::ports::{ConfigParser, RequestDecorator, RequestScope, ServerHost};
use crate::service::{HookRunner, LayeredResolver, SourceLayerSet};
use std::fmt;
use std::sync::Arc;

/// Handle to one resolved configuration.
///
/// Cloning is cheap: every clone points at the same resolver, which is what
/// the server and each request receive.
#[derive(Clone)]
pub struct Configue {
    resolver: Arc<LayeredResolver>,
}

impl Configue {
    /// Wraps a resolver in a handle.
    pub fn new(resolver: LayeredResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    /// The resolver behind this handle.
    pub fn resolver(&self) -> &LayeredResolver {
        &self.resolver
    }

    /// Enabled layers, highest precedence first.
    pub fn layers(&self) -> Vec<Layer> {
        self.resolver.layers()
    }

    /// Returns `true` if both handles share the same resolver.
    pub fn ptr_eq(&self, other: &Configue) -> bool {
        Arc::ptr_eq(&self.resolver, &other.resolver)
    }

    /// An owned lookup function over this handle, for hosts that want a
    /// plain closure instead of the handle type.
    pub fn lookup_fn(&self) -> impl Fn(&str) -> Option<ConfigValue> + Send + Sync + 'static {
        let resolver = Arc::clone(&self.resolver);
        move |key: &str| resolver.get(key).cloned()
    }
}

impl ConfigLookup for Configue {
    fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.resolver.get(key)
    }

    fn source_of(&self, key: &str) -> Option<Layer> {
        self.resolver.source_of(key)
    }
}

impl fmt::Debug for Configue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configue")
            .field("layers", &self.resolver.layers())
            .finish()
    }
}

/// Builds a [`Configue`] from options.
///
/// The process arguments and environment are captured once, when
/// [`Registration::register`] runs, unless a snapshot was supplied.
///
/// # Examples
///
/// ```rust
/// use configue::domain::{ConfigLookup, ConfigOptions, ProcessSnapshot};
/// use configue::service::Registration;
///
/// let snapshot = ProcessSnapshot::new()
///     .with_arg("--when=later")
///     .with_var("who", "me");
///
/// let config = Registration::with_snapshot(snapshot)
///     .register(
///         ConfigOptions::builder()
///             .post_hook("argv", |store| {
///                 store.set("when", "NOW");
///             })
///             .build(),
///     )
///     .unwrap();
///
/// assert_eq!(config.get("when").unwrap().as_str(), Some("NOW"));
/// assert_eq!(config.get("who").unwrap().as_str(), Some("me"));
/// ```
#[derive(Debug, Default)]
pub struct Registration {
    snapshot: Option<ProcessSnapshot>,
    loader: FileLoader,
}

impl Registration {
    /// Registration against the real process arguments and environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registration against an explicit snapshot instead of the process.
    pub fn with_snapshot(snapshot: ProcessSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            loader: FileLoader::new(),
        }
    }

    /// Makes an extra file format available, by extension and format name.
    pub fn with_parser(mut self, parser: impl ConfigParser + 'static) -> Self {
        self.loader.register_parser(Arc::new(parser));
        self
    }

    /// Validates `options`, loads every enabled layer and runs the hooks.
    ///
    /// Any failure aborts the whole registration; no handle is produced.
    pub fn register(self, options: ConfigOptions) -> Result<Configue> {
        options.validate()?;
        let hooks = HookRunner::from_options(&options)?;

        let snapshot = self.snapshot.unwrap_or_else(ProcessSnapshot::capture);
        let layers = SourceLayerSet::build(&options, &snapshot, &self.loader, &hooks)?;
        let config = Configue::new(LayeredResolver::new(layers));

        let enabled: Vec<&str> = config.layers().into_iter().map(Layer::as_str).collect();
        tracing::info!("Configuration registered with layers [{}]", enabled.join(", "));

        Ok(config)
    }

    /// Registers and exposes the handle on `host`: once on the server, and
    /// on every request through a decorator.
    ///
    /// Nothing is attached to the host if registration fails.
    pub fn register_on<H: ServerHost>(self, host: &mut H, options: ConfigOptions) -> Result<Configue> {
        let config = self.register(options)?;

        host.decorate_server(config.clone());

        host.decorate_requests(attach_to_requests(config.clone()));

        Ok(config)
    }
}

fn attach_to_requests<R: RequestScope + 'static>(config: Configue) -> RequestDecorator<R> {
    Box::new(move |request: &mut R| request.attach_config(config.clone()))
}

/// Registers `options` against the current process.
///
/// Shorthand for `Registration::new().register(options)`.
pub fn register(options: ConfigOptions) -> Result<Configue> {
    Registration::new().register(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigError, LayerStore};
    use std::collections::HashMap;

    #[derive(Default)]
    struct Request {
        config: Option<Configue>,
    }

    impl RequestScope for Request {
        fn attach_config(&mut self, config: Configue) {
            self.config = Some(config);
        }
    }

    #[derive(Default)]
    struct Server {
        config: Option<Configue>,
        decorators: Vec<RequestDecorator<Request>>,
    }

    impl ServerHost for Server {
        type Request = Request;

        fn decorate_server(&mut self, config: Configue) {
            self.config = Some(config);
        }

        fn decorate_requests(&mut self, decorator: RequestDecorator<Request>) {
            self.decorators.push(decorator);
        }
    }

    struct KeyValueParser;

    impl ConfigParser for KeyValueParser {
        fn parse(&self, content: &str) -> Result<HashMap<String, ConfigValue>> {
            Ok(content
                .lines()
                .filter_map(|line| line.split_once('='))
                .map(|(k, v)| (k.to_string(), ConfigValue::from(v)))
                .collect())
        }

        fn supported_extensions(&self) -> &[&str] {
            &["kv"]
        }
    }

    #[test]
    fn test_register_empty_options() {
        let config = Registration::with_snapshot(ProcessSnapshot::new())
            .register(ConfigOptions::default())
            .unwrap();
        assert_eq!(config.layers(), Layer::PRECEDENCE.to_vec());
        assert!(!config.has("who"));
    }

    #[test]
    fn test_register_validates_before_loading() {
        let options = ConfigOptions::builder()
            .file("/nonexistent/config.json")
            .post_hook("nope", |_| {})
            .build();
        let err = Registration::with_snapshot(ProcessSnapshot::new())
            .register(options)
            .unwrap_err();
        assert!(matches!(err, ConfigError::HookTarget { .. }));
    }

    #[test]
    fn test_register_on_shares_one_resolver() {
        let mut server = Server::default();
        let config = Registration::with_snapshot(ProcessSnapshot::new().with_var("who", "me"))
            .register_on(&mut server, ConfigOptions::default())
            .unwrap();

        let server_config = server.config.clone().unwrap();
        assert!(server_config.ptr_eq(&config));

        let mut first = Request::default();
        let mut second = Request::default();
        for decorate in &server.decorators {
            decorate(&mut first);
            decorate(&mut second);
        }
        let first = first.config.unwrap();
        assert!(first.ptr_eq(&server_config));
        assert!(second.config.unwrap().ptr_eq(&first));
        assert_eq!(first.get("who"), Some(&ConfigValue::from("me")));
    }

    #[test]
    fn test_register_on_failure_attaches_nothing() {
        let mut server = Server::default();
        let options = ConfigOptions::builder()
            .file("/nonexistent/config.json")
            .build();
        assert!(Registration::with_snapshot(ProcessSnapshot::new())
            .register_on(&mut server, options)
            .is_err());
        assert!(server.config.is_none());
        assert!(server.decorators.is_empty());
    }

    #[test]
    fn test_with_parser() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.kv");
        std::fs::write(&path, "who=kv").unwrap();

        let config = Registration::with_snapshot(ProcessSnapshot::new())
            .with_parser(KeyValueParser)
            .register(ConfigOptions::builder().file(&path).build())
            .unwrap();
        assert_eq!(config.get("who"), Some(&ConfigValue::from("kv")));
        assert_eq!(config.source_of("who"), Some(Layer::Files));
    }

    #[test]
    fn test_lookup_fn_outlives_handle() {
        let lookup = {
            let config = Registration::with_snapshot(ProcessSnapshot::new().with_var("k", "v"))
                .register(ConfigOptions::default())
                .unwrap();
            config.lookup_fn()
        };
        assert_eq!(lookup("k"), Some(ConfigValue::from("v")));
        assert_eq!(lookup("missing"), None);
    }

    #[test]
    fn test_handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Configue>();
    }

    #[test]
    fn test_debug_lists_layers() {
        let config = Configue::new(LayeredResolver::new(SourceLayerSet::from_stores(vec![(
            Layer::Env,
            LayerStore::new(),
        )])));
        assert!(format!("{:?}", config).contains("Env"));
    }
}
