//! Server configuration: the handful of knobs §4.10/§6 name explicitly.
//!
//! This is a plain struct, not a `clap`-derived one — the `cli` binary owns
//! argument parsing and builds a `ServerConfig` from it, the way the
//! teacher keeps its `OrchestratorConfig` free of any CLI concerns.

/// Tunables for one server run. No environment variables are read (§6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub workers: usize,
    pub queue_capacity: usize,
    pub default_seed: i64,
    pub default_wmin: i64,
    pub default_wmax: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 9090,
            workers: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1).max(4),
            queue_capacity: 64,
            default_seed: 42,
            default_wmin: 1,
            default_wmax: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_is_9090() {
        assert_eq!(ServerConfig::default().port, 9090);
    }

    #[test]
    fn default_worker_count_is_at_least_four() {
        assert!(ServerConfig::default().workers >= 4);
    }
}
