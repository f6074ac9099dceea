//! Server assembly: configuration, shared process state, the
//! Leader-Follower accept pool, the per-connection request loop, and
//! startup/shutdown lifecycle (C8, C9, C10).

pub mod config;
pub mod connection;
pub mod context;
pub mod leader_follower;
pub mod lifecycle;

pub use config::ServerConfig;
pub use context::ServerContext;
pub use lifecycle::run;
