//! Process-wide server state: the listening socket, the pipeline, and the
//! Leader-Follower leader-election flags, bundled into one value instead of
//! true globals (spec's own recommendation — "encapsulate them in a server
//! context value and pass it explicitly").

use std::net::{Ipv4Addr, SocketAddr, TcpListener};
use std::sync::{Condvar, Mutex};

use socket2::{Domain, Socket, Type};
use tracing::info;

use crate::error::ServerError;
use crate::pipeline::Pipeline;
use crate::server::config::ServerConfig;

const LISTEN_BACKLOG: i32 = 64;

/// The two booleans the Leader-Follower pool coordinates on, guarded by
/// `ServerContext::leader_lock`.
#[derive(Debug, Default)]
pub struct LeaderState {
    pub has_leader: bool,
    pub shutdown: bool,
}

pub struct ServerContext {
    pub listener: TcpListener,
    pub pipeline: Pipeline,
    pub leader_lock: Mutex<LeaderState>,
    pub leader_cv: Condvar,
    pub config: ServerConfig,
}

impl ServerContext {
    /// Create the listening socket (`SO_REUSEADDR`, backlog 64) and the
    /// (not-yet-started) pipeline.
    pub fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let addr: SocketAddr = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), config.port);
        let socket = Socket::new(Domain::IPV4, Type::STREAM, None).map_err(ServerError::Socket)?;
        socket.set_reuse_address(true).map_err(ServerError::Socket)?;
        socket.bind(&addr.into()).map_err(ServerError::Bind)?;
        socket.listen(LISTEN_BACKLOG).map_err(ServerError::Listen)?;
        let listener: TcpListener = socket.into();

        info!(port = config.port, workers = config.workers, "bound listening socket");

        Ok(Self {
            listener,
            pipeline: Pipeline::new(config.queue_capacity),
            leader_lock: Mutex::new(LeaderState::default()),
            leader_cv: Condvar::new(),
            config,
        })
    }

    /// True once `SHUTDOWN` has flipped the shared flag.
    pub fn is_shutting_down(&self) -> bool {
        self.leader_lock.lock().unwrap().shutdown
    }

    /// Flip the shutdown flag, unblock the listening socket's pending
    /// `accept`, and wake every LF worker waiting on the leader condvar.
    pub fn initiate_shutdown(&self) {
        {
            let mut state = self.leader_lock.lock().unwrap();
            if state.shutdown {
                return;
            }
            state.shutdown = true;
        }
        info!("shutdown initiated");
        // std's TcpListener has no shutdown(fd, RDWR) equivalent; a
        // self-connect is the standard way to force a blocked accept() to
        // return so the leader worker can observe the shutdown flag.
        if let Ok(local_addr) = self.listener.local_addr() {
            let loopback = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), local_addr.port());
            let _ = std::net::TcpStream::connect(loopback);
        }
        self.leader_cv.notify_all();
    }
}
