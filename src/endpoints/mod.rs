//! Typed wrappers for the backend's REST endpoints.
//!
//! Each submodule adds methods to [`MincaClient`](crate::MincaClient).  Path
//! parameters are percent-encoded as single segments.

mod auth;
mod chat;
mod customer_chat;
mod hubspot;
mod knowledge_base;
