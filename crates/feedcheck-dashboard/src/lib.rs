//! FeedCheck Dashboard
//!
//! HTTP dashboard and command line front end for the feedback analyzer.
//! Each browser session owns its own review store; the models are shared.

pub mod cli;
pub mod config;
pub mod models;
pub mod server;
pub mod state;

pub use cli::*;
pub use config::DashboardConfig;
pub use models::*;
pub use server::*;
pub use state::*;
