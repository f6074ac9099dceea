//! Leader-Follower accept pool (§4.9): a fixed worker count shares one
//! listening socket with exactly one worker inside `accept()` at a time.

use std::io::ErrorKind;
use std::sync::Arc;
use std::thread;

use tracing::{info_span, warn};

use crate::server::connection;
use crate::server::context::ServerContext;

/// Spawn `ctx.config.workers` LF workers and block until every one of them
/// returns (which happens only after shutdown).
pub fn run(ctx: Arc<ServerContext>) {
    let mut handles = Vec::with_capacity(ctx.config.workers);
    for id in 0..ctx.config.workers {
        let worker_ctx = Arc::clone(&ctx);
        handles.push(
            thread::Builder::new()
                .name(format!("lf-worker-{id}"))
                .spawn(move || worker_loop(worker_ctx))
                .expect("failed to spawn LF worker thread"),
        );
    }
    for handle in handles {
        let _ = handle.join();
    }
}

fn worker_loop(ctx: Arc<ServerContext>) {
    loop {
        if !become_leader(&ctx) {
            return;
        }

        let accepted = ctx.listener.accept();
        resign_leadership(&ctx);

        match accepted {
            Ok((stream, peer)) => {
                if ctx.is_shutting_down() {
                    // The accepted connection is our own shutdown self-connect ping.
                    continue;
                }
                let span = info_span!("connection", peer = %peer);
                let _enter = span.enter();
                connection::handle(&ctx, stream);
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                if ctx.is_shutting_down() {
                    return;
                }
                warn!(error = %e, "accept failed, worker exiting");
                return;
            }
        }
    }
}

/// Wait until no one else holds leadership, then claim it. Returns `false`
/// if the server is shutting down instead.
fn become_leader(ctx: &ServerContext) -> bool {
    let mut state = ctx.leader_lock.lock().unwrap();
    while state.has_leader && !state.shutdown {
        state = ctx.leader_cv.wait(state).unwrap();
    }
    if state.shutdown {
        return false;
    }
    state.has_leader = true;
    true
}

fn resign_leadership(ctx: &ServerContext) {
    let mut state = ctx.leader_lock.lock().unwrap();
    state.has_leader = false;
    drop(state);
    ctx.leader_cv.notify_one();
}
