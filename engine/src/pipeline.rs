//! The staged pipeline: one bounded queue and one worker thread per
//! algorithm stage, plus an aggregator stage that writes the final response.
//!
//! Routing table (kind -> stages visited, in order):
//!
//! | [`AlgKind`]       | stages                                      |
//! |--------------------|---------------------------------------------|
//! | `Preview`          | aggregator only (no kernel runs)             |
//! | `SingleMaxFlow`     | max-flow -> aggregator                      |
//! | `SingleScc`         | scc -> aggregator                           |
//! | `SingleMst`         | mst -> aggregator                           |
//! | `SingleCliques`     | cliques -> aggregator                       |
//! | `All`               | max-flow -> scc -> mst -> cliques -> aggregator |
//!
//! `All` jobs visit every kernel stage sequentially and in a fixed order;
//! nothing here parallelizes the four kernels against each other. That
//! keeps a single job's accounting (which fields have been filled in)
//! trivial, at the cost of one job never using more than one worker thread
//! at a time. See `DESIGN.md` for the reasoning.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::job::{AlgKind, AlgOutcome, Job};
use crate::protocol::{format_all, serialize_preview, write_response};
use crate::queue::BlockingQueue;
use crate::registry;

/// The five stage queues, each bounded to the configured capacity.
pub struct Pipeline {
    q_max_flow: Arc<BlockingQueue<Job>>,
    q_scc: Arc<BlockingQueue<Job>>,
    q_mst: Arc<BlockingQueue<Job>>,
    q_cliques: Arc<BlockingQueue<Job>>,
    q_agg: Arc<BlockingQueue<Job>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    running: AtomicBool,
}

impl Pipeline {
    /// Build the five queues (not yet running any worker threads).
    pub fn new(queue_capacity: usize) -> Self {
        let cap = Some(queue_capacity);
        Self {
            q_max_flow: Arc::new(BlockingQueue::new(cap)),
            q_scc: Arc::new(BlockingQueue::new(cap)),
            q_mst: Arc::new(BlockingQueue::new(cap)),
            q_cliques: Arc::new(BlockingQueue::new(cap)),
            q_agg: Arc::new(BlockingQueue::new(cap)),
            handles: Mutex::new(Vec::new()),
            running: AtomicBool::new(false),
        }
    }

    /// Spawn one worker thread per stage. Idempotent: calling `start` twice
    /// while already running is a no-op.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("starting pipeline stages");

        let mut handles = self.handles.lock().unwrap();
        handles.push(spawn_stage("max_flow", Arc::clone(&self.q_max_flow), Arc::clone(&self.q_scc), run_max_flow_stage));
        handles.push(spawn_stage("scc", Arc::clone(&self.q_scc), Arc::clone(&self.q_mst), run_scc_stage));
        handles.push(spawn_stage("mst", Arc::clone(&self.q_mst), Arc::clone(&self.q_cliques), run_mst_stage));
        handles.push(spawn_stage("cliques", Arc::clone(&self.q_cliques), Arc::clone(&self.q_agg), run_cliques_stage));
        handles.push(spawn_aggregator(Arc::clone(&self.q_agg)));
    }

    /// Close every queue (waking any blocked worker) and join all stage
    /// threads. Idempotent.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        info!("stopping pipeline stages");
        self.q_max_flow.close();
        self.q_scc.close();
        self.q_mst.close();
        self.q_cliques.close();
        self.q_agg.close();
        for handle in self.handles.lock().unwrap().drain(..) {
            let _ = handle.join();
        }
    }

    /// Enqueue a freshly-built job onto whichever stage its [`AlgKind`]
    /// enters first.
    pub fn submit(&self, job: Job) {
        let entry = match job.kind {
            AlgKind::Preview => &self.q_agg,
            AlgKind::All | AlgKind::SingleMaxFlow => &self.q_max_flow,
            AlgKind::SingleScc => &self.q_scc,
            AlgKind::SingleMst => &self.q_mst,
            AlgKind::SingleCliques => &self.q_cliques,
        };
        if entry.push(job).is_err() {
            warn!("dropped job: pipeline queue closed");
        }
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        Pipeline::stop(self);
    }
}

fn spawn_stage(
    name: &'static str,
    inbox: Arc<BlockingQueue<Job>>,
    outbox: Arc<BlockingQueue<Job>>,
    run: fn(&mut Job),
) -> JoinHandle<()> {
    thread::Builder::new()
        .name(format!("stage-{name}"))
        .spawn(move || {
            while let Some(mut job) = inbox.pop() {
                run(&mut job);
                debug!(stage = name, "job processed");
                if outbox.push(job).is_err() {
                    warn!(stage = name, "downstream queue closed, job dropped");
                }
            }
        })
        .expect("failed to spawn pipeline stage thread")
}

fn should_run(job: &Job, single: AlgKind) -> bool {
    job.kind == AlgKind::All || job.kind == single
}

fn run_max_flow_stage(job: &mut Job) {
    if !should_run(job, AlgKind::SingleMaxFlow) {
        return;
    }
    job.result_max_flow = Some(registry::run_max_flow(&job.graph, job.directed, &job.params));
}

fn run_scc_stage(job: &mut Job) {
    if !should_run(job, AlgKind::SingleScc) {
        return;
    }
    job.result_scc = Some(registry::run_scc(&job.graph, job.directed));
}

fn run_mst_stage(job: &mut Job) {
    if !should_run(job, AlgKind::SingleMst) {
        return;
    }
    job.result_mst = Some(registry::run_mst(&job.graph, job.directed));
}

fn run_cliques_stage(job: &mut Job) {
    if !should_run(job, AlgKind::SingleCliques) {
        return;
    }
    job.result_cliques = Some(registry::run_cliques(&job.graph, job.directed, &job.params));
}

fn spawn_aggregator(inbox: Arc<BlockingQueue<Job>>) -> JoinHandle<()> {
    thread::Builder::new()
        .name("stage-aggregator".to_string())
        .spawn(move || {
            while let Some(mut job) = inbox.pop() {
                let (ok, body) = match job.kind {
                    AlgKind::Preview => (true, serialize_preview(&job.graph, job.directed)),
                    AlgKind::All => (true, format_all(&job)),
                    AlgKind::SingleMaxFlow => outcome_body(job.result_max_flow.take()),
                    AlgKind::SingleScc => outcome_body(job.result_scc.take()),
                    AlgKind::SingleMst => outcome_body(job.result_mst.take()),
                    AlgKind::SingleCliques => outcome_body(job.result_cliques.take()),
                };
                if let Err(e) = write_response(&mut job.responder, ok, &body) {
                    warn!(error = %e, "failed to write response to client");
                }
                let _ = job.responder.flush();
            }
        })
        .expect("failed to spawn aggregator thread")
}

fn outcome_body(outcome: Option<AlgOutcome>) -> (bool, String) {
    match outcome {
        Some(AlgOutcome::Value(v)) => (true, format!("RESULT {v}")),
        Some(AlgOutcome::Error(e)) => (false, e),
        None => (false, "Error: stage never ran".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use std::collections::HashMap;
    use std::io::{BufRead, BufReader};
    use std::net::{TcpListener, TcpStream};

    fn loopback_pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).unwrap();
        let (server, _) = listener.accept().unwrap();
        (client, server)
    }

    fn read_full_response(mut stream: TcpStream) -> String {
        let mut reader = BufReader::new(&mut stream);
        let mut out = String::new();
        loop {
            let mut line = String::new();
            let n = reader.read_line(&mut line).unwrap();
            if n == 0 {
                break;
            }
            let done = line.trim_end() == "END";
            out.push_str(&line);
            if done {
                break;
            }
        }
        out
    }

    fn square_with_diagonal() -> Graph {
        let mut g = Graph::new(4, false);
        g.add_edge(0, 1, 2).unwrap();
        g.add_edge(1, 2, 3).unwrap();
        g.add_edge(2, 3, 3).unwrap();
        g.add_edge(3, 0, 5).unwrap();
        g.add_edge(0, 2, 6).unwrap();
        g
    }

    #[test]
    fn single_mst_job_is_aggregated_to_result_line() {
        let (client, server) = loopback_pair();
        drop(client);
        let pipeline = Pipeline::new(8);
        pipeline.start();
        let job = Job::new(server.try_clone().unwrap(), AlgKind::SingleMst, false, square_with_diagonal(), HashMap::new());
        pipeline.submit(job);

        let response = read_full_response(server);
        assert_eq!(response, "OK\nRESULT 8\nEND\n");
        pipeline.stop();
    }

    #[test]
    fn all_job_emits_four_result_lines() {
        let (client, server) = loopback_pair();
        drop(client);
        let pipeline = Pipeline::new(8);
        pipeline.start();
        let job = Job::new(server.try_clone().unwrap(), AlgKind::All, false, square_with_diagonal(), HashMap::new());
        pipeline.submit(job);

        let response = read_full_response(server);
        assert!(response.starts_with("OK\n"));
        assert!(response.contains("RESULT MAX_FLOW=Error: cannot run MAX_FLOW on undirected graph"));
        assert!(response.contains("RESULT MST_WEIGHT=8"));
        assert!(response.ends_with("END\n"));
        pipeline.stop();
    }

    #[test]
    fn preview_job_skips_every_kernel_stage() {
        let (client, server) = loopback_pair();
        drop(client);
        let pipeline = Pipeline::new(8);
        pipeline.start();
        let job = Job::new(server.try_clone().unwrap(), AlgKind::Preview, false, square_with_diagonal(), HashMap::new());
        pipeline.submit(job);

        let response = read_full_response(server);
        assert!(response.starts_with("OK\nGRAPH 4 5\n"));
        pipeline.stop();
    }

    #[test]
    fn stop_is_idempotent_and_closes_all_queues() {
        let pipeline = Pipeline::new(4);
        pipeline.start();
        pipeline.stop();
        pipeline.stop();
        assert!(pipeline.q_agg.is_closed());
    }
}
