// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boundary to the request-handling server that hosts the configuration.
//!
//! The crate knows nothing about routing, middleware or wire protocols. A host
//! only has to accept the resolved handle once at server scope and run a
//! decorator on each inbound request.

use crate::service::Configue;

/// Decorator the host runs on every inbound request.
pub type RequestDecorator<R> = Box<dyn Fn(&mut R) + Send + Sync>;

/// A request object that can carry the configuration handle.
pub trait RequestScope {
    /// Stores the handle on the request.
    fn attach_config(&mut self, config: Configue);
}

/// A server that exposes configuration to itself and to its requests.
///
/// # Examples
///
/// ```rust
/// use configue::ports::{RequestDecorator, RequestScope, ServerHost};
/// use configue::service::{Configue, Registration};
/// use configue::domain::ProcessSnapshot;
///
/// #[derive(Default)]
/// struct Request {
///     config: Option<Configue>,
/// }
///
/// impl RequestScope for Request {
///     fn attach_config(&mut self, config: Configue) {
///         self.config = Some(config);
///     }
/// }
///
/// #[derive(Default)]
/// struct Server {
///     config: Option<Configue>,
///     decorators: Vec<RequestDecorator<Request>>,
/// }
///
/// impl ServerHost for Server {
///     type Request = Request;
///
///     fn decorate_server(&mut self, config: Configue) {
///         self.config = Some(config);
///     }
///
///     fn decorate_requests(&mut self, decorator: RequestDecorator<Request>) {
///         self.decorators.push(decorator);
///     }
/// }
///
/// let mut server = Server::default();
/// Registration::with_snapshot(ProcessSnapshot::new())
///     .register_on(&mut server, Default::default())
///     .unwrap();
///
/// let mut request = Request::default();
/// for decorate in &server.decorators {
///     decorate(&mut request);
/// }
/// assert!(request.config.is_some());
/// ```
pub trait ServerHost {
    /// The host's request type.
    type Request: RequestScope + 'static;

    /// Exposes the handle on the long-lived server object.
    fn decorate_server(&mut self, config: Configue);

    /// Installs a decorator to run on every inbound request.
    fn decorate_requests(&mut self, decorator: RequestDecorator<Self::Request>);
}
