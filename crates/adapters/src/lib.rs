//! Protocol adapters for the fixture responder
//!
//! This crate bridges the socket-free [`fixture_protocol::Responder`] to
//! HTTP: it binds the listening socket, maps responder outcomes to status
//! codes and renders the startup banner.

pub mod http_server;

pub use http_server::{
    banner, route_table, router, router_with_diagnostics, BoundServer, DiagnosticSink, HttpServer,
    ServerConfig, ServerError,
};
