//! Per-connection request loop (§4.8): read one frame, validate it, build a
//! [`Job`], and hand it to the pipeline. The aggregator — not this loop —
//! writes the eventual response for a submitted job; this loop only writes
//! immediate `OK BYE` / `ERR` replies for control frames and malformed
//! requests.

use std::io::BufReader;
use std::net::TcpStream;
use std::sync::Arc;

use tracing::warn;

use crate::error::ProtocolError;
use crate::graph::Graph;
use crate::job::{Job, ParamKey};
use crate::protocol::{self, ControlFrame, ParsedRequest, RawFrame};
use crate::random_graph;
use crate::server::context::ServerContext;

/// Drive one accepted connection to completion (peer close, `EXIT`, or
/// `SHUTDOWN`).
pub fn handle(ctx: &Arc<ServerContext>, stream: TcpStream) {
    let mut reader = match stream.try_clone() {
        Ok(s) => BufReader::new(s),
        Err(e) => {
            warn!(error = %e, "failed to clone connection for reading");
            return;
        }
    };
    let mut writer = stream;

    loop {
        match protocol::read_frame(&mut reader) {
            Ok(Some(RawFrame::Exit)) => {
                let _ = protocol::write_response(&mut writer, true, "BYE");
                return;
            }
            Ok(Some(RawFrame::Shutdown)) => {
                let _ = protocol::write_response(&mut writer, true, "BYE");
                ctx.initiate_shutdown();
                return;
            }
            Ok(Some(RawFrame::Lines(lines))) => {
                let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
                handle_request(ctx, &mut writer, &refs);
            }
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "connection read error");
                return;
            }
        }
    }
}

fn handle_request(ctx: &Arc<ServerContext>, writer: &mut TcpStream, lines: &[&str]) {
    let control = match protocol::parse_frame(lines) {
        Ok(c) => c,
        Err(e) => {
            let _ = protocol::write_response(writer, false, &e.to_string());
            return;
        }
    };
    let request = match control {
        ControlFrame::Request(r) => r,
        ControlFrame::Exit | ControlFrame::Shutdown => return,
    };

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| build_and_submit(ctx, &mut *writer, request)));
    if let Err(payload) = outcome {
        let _ = protocol::write_response(writer, false, &format!("Exception: {}", panic_message(&payload)));
    }
}

fn build_and_submit(ctx: &Arc<ServerContext>, writer: &mut TcpStream, request: ParsedRequest) {
    let kind = match protocol::alg_kind(&request.alg) {
        Ok(k) => k,
        Err(e) => {
            let _ = protocol::write_response(writer, false, &e.to_string());
            return;
        }
    };

    let Some(v) = request.v.filter(|v| *v >= 1) else {
        let _ = protocol::write_response(writer, false, &ProtocolError::MissingOrInvalidV.to_string());
        return;
    };
    if request.e < 0 {
        let _ = protocol::write_response(writer, false, &ProtocolError::MissingOrInvalidE.to_string());
        return;
    }
    if let (Some(&src), Some(&sink)) = (request.params.get(&ParamKey::Src), request.params.get(&ParamKey::Sink)) {
        if src == sink {
            let _ = protocol::write_response(writer, false, &ProtocolError::SinkEqualsSrc.to_string());
            return;
        }
    }

    let vertices = v as usize;
    let graph = if request.random {
        let max_edges = if request.directed {
            vertices.saturating_mul(vertices.saturating_sub(1))
        } else {
            vertices.saturating_mul(vertices.saturating_sub(1)) / 2
        };
        let edges = (request.e as usize).min(max_edges);
        let seed = request.seed.unwrap_or(ctx.config.default_seed);
        let wmin = request.wmin.unwrap_or(ctx.config.default_wmin);
        let wmax = request.wmax.unwrap_or(ctx.config.default_wmax);
        random_graph::generate(vertices, edges, seed, request.directed, wmin, wmax)
    } else {
        match build_explicit_graph(vertices, request.directed, v, &request) {
            Ok(g) => g,
            Err(diagnostic) => {
                let _ = protocol::write_response(writer, false, &diagnostic);
                return;
            }
        }
    };

    let responder = match writer.try_clone() {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "failed to clone responder stream, dropping job");
            return;
        }
    };

    ctx.pipeline.submit(Job::new(responder, kind, request.directed, graph, request.params));
}

fn build_explicit_graph(vertices: usize, directed: bool, v: i64, request: &ParsedRequest) -> Result<Graph, String> {
    let mut graph = Graph::new(vertices, directed);
    for edge in &request.edges {
        if edge.u < 0 || edge.u >= v || edge.v < 0 || edge.v >= v {
            return Err(ProtocolError::EdgeOutOfRange(edge.u, edge.v).to_string());
        }
        if edge.w < 1 {
            return Err(ProtocolError::InvalidWeight(edge.w).to_string());
        }
        graph.add_edge(edge.u, edge.v, edge.w).map_err(|e| e.to_string())?;
    }
    Ok(graph)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
