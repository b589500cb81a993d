//! oasrpc - generate RPC clients, servers and protobuf definitions from
//! OpenAPI documents that follow the `/v<N>/<subject>.<method>` convention.
//!
//! The crate is layered the usual way:
//!
//! - [`config`] resolves flags, settings and the module manifest into a
//!   [`config::Config`],
//! - [`generation`] holds the pipeline (extraction, naming, list
//!   classification, render model, artifact table, orchestrator) and its ports,
//! - [`infrastructure`] implements the ports (file loader, tera renderer,
//!   formatters, filesystem writers),
//! - [`application`] wires them into the `generate` and `validate` use cases.
#![deny(unsafe_code)]

pub mod application;
pub mod config;
pub mod generation;
pub mod infrastructure;
