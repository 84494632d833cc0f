//! paineis web server.
//!
//! Serves the management dashboards behind the OAuth2 login flow: the
//! authentication routes, the session-gated page dispatch, and the
//! navigation surface consumed by the dashboard front end.

pub mod auth;
pub mod config;
pub mod nav;
pub mod pages;
