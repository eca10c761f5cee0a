// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests: a minimal server host and
//! on-disk configuration files.

use configue::ports::{RequestDecorator, RequestScope, ServerHost};
use configue::service::Configue;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// A request that can carry the configuration handle.
#[derive(Default)]
pub struct MockRequest {
    /// Path the request was made to.
    #[allow(dead_code)]
    pub path: String,
    /// Handle attached by the decorator.
    pub config: Option<Configue>,
}

impl RequestScope for MockRequest {
    fn attach_config(&mut self, config: Configue) {
        self.config = Some(config);
    }
}

/// A server that records the handle and runs its decorators on each
/// injected request.
#[derive(Default)]
pub struct MockServer {
    /// Server-scoped handle.
    pub config: Option<Configue>,
    decorators: Vec<RequestDecorator<MockRequest>>,
}

impl MockServer {
    /// Simulates an inbound request to `path`.
    #[allow(dead_code)]
    pub fn inject(&self, path: &str) -> MockRequest {
        let mut request = MockRequest {
            path: path.to_string(),
            config: None,
        };
        for decorate in &self.decorators {
            decorate(&mut request);
        }
        request
    }

    /// Number of request decorators installed.
    #[allow(dead_code)]
    pub fn decorator_count(&self) -> usize {
        self.decorators.len()
    }
}

impl ServerHost for MockServer {
    type Request = MockRequest;

    fn decorate_server(&mut self, config: Configue) {
        self.config = Some(config);
    }

    fn decorate_requests(&mut self, decorator: RequestDecorator<MockRequest>) {
        self.decorators.push(decorator);
    }
}

/// Writes `content` to a temporary file ending in `suffix`.
#[allow(dead_code)]
pub fn config_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

/// `{"key": "json-config"}` as a `.json` file.
#[allow(dead_code)]
pub fn json_config() -> NamedTempFile {
    config_file(".json", r#"{"key": "json-config"}"#)
}

/// `key: yaml-config` as a `.yaml` file.
#[allow(dead_code)]
pub fn yaml_config() -> NamedTempFile {
    config_file(".yaml", "key: yaml-config\n")
}
