// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registers configuration on a toy server and reads it from requests.
//!
//! Run with:
//!
//! ```text
//! cargo run --example server_registration -- --who=YO
//! ```

use configue::prelude::*;
use configue::ports::RequestDecorator;
use std::io::Write;

#[derive(Default)]
struct Request {
    path: String,
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

impl Server {
    fn handle(&self, path: &str) -> String {
        let mut request = Request {
            path: path.to_string(),
            config: None,
        };
        for decorate in &self.decorators {
            decorate(&mut request);
        }

        let who = request
            .config
            .as_ref()
            .and_then(|config| config.get("who"))
            .map(ToString::to_string)
            .unwrap_or_else(|| "nobody".to_string());
        format!("{} -> hello from {}", request.path, who)
    }
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

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    write!(file, r#"{{"server": {{"port": 8080}}, "who": "config file"}}"#)?;

    let options = ConfigOptions::builder()
        .file(file.path())
        .defaults([("server.workers", 4)])
        .post_hook("env", |store| {
            if let Some(port) = store.remove("PORT") {
                store.set("server.port", port);
            }
        })
        .build();

    let mut server = Server::default();
    Registration::new().register_on(&mut server, options)?;

    if let Some(config) = &server.config {
        for key in ["server.port", "server.workers", "who"] {
            match (config.get(key), config.source_of(key)) {
                (Some(value), Some(layer)) => println!("{:<16} = {:<14} ({})", key, value, layer),
                _ => println!("{:<16} undefined", key),
            }
        }
        let port = config
            .get("server.port")
            .map(|value| value.as_u32("server.port"))
            .transpose()?;
        println!("listening on port {:?}", port);
    }

    println!("{}", server.handle("/"));
    println!("{}", server.handle("/status"));

    Ok(())
}
