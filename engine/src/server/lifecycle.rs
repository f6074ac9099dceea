//! Server lifecycle (§4.10): bind, start the pipeline, run the
//! Leader-Follower pool until `SHUTDOWN`, then tear everything down.

use std::sync::Arc;

use tracing::{error, info};

use crate::server::config::ServerConfig;
use crate::server::context::ServerContext;
use crate::server::leader_follower;

/// Run the server to completion. Returns the process exit code: `0` on a
/// clean `SHUTDOWN`, `1` if the listening socket could not be created.
pub fn run(config: ServerConfig) -> i32 {
    let ctx = match ServerContext::bind(config) {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => {
            error!(error = %e, "failed to start server");
            return 1;
        }
    };

    ctx.pipeline.start();
    leader_follower::run(Arc::clone(&ctx));
    ctx.pipeline.stop();

    info!("server stopped");
    0
}
