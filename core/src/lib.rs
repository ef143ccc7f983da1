//! Client core for a remote to-do list.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern); a `Transport`
//! performs the round trip. `TodoListController` keeps a local copy of the
//! list in sync with the server, one request per user action.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and unit tests need no server.
//! - The server's record always replaces the local one; nothing is applied
//!   optimistically.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod http;
pub mod transport;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use controller::{EditDraft, Intent, ItemMode, NewTodoDraft, Outcome, Phase, TodoListController};
pub use error::FetchFailure;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{NewTodo, TodoId, TodoItem, TodoPatch};
