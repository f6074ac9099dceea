//! Protocol codec: parser for inbound request frames, serializer for
//! outbound frames, plus the I/O glue that reads a frame off a socket and
//! writes a response back onto one.

pub mod codec;

use std::io::{self, BufRead, Write};

use crate::graph::Graph;
use crate::job::{AlgOutcome, Job};

pub use codec::{alg_kind, parse_frame, ControlFrame, EdgeSpec, ParsedRequest};

/// The three shapes a frame read off the wire can take.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFrame {
    /// Body lines up to (not including) the `END` line.
    Lines(Vec<String>),
    Exit,
    Shutdown,
}

/// Read one frame from `reader`. `Ok(None)` means the peer closed the
/// connection before sending a complete frame.
pub fn read_frame<R: BufRead>(reader: &mut R) -> io::Result<Option<RawFrame>> {
    let mut lines = Vec::new();
    loop {
        let mut raw = String::new();
        let n = reader.read_line(&mut raw)?;
        if n == 0 {
            return if lines.is_empty() { Ok(None) } else { Ok(Some(RawFrame::Lines(lines))) };
        }
        let trimmed = raw.trim_end_matches(['\n', '\r']).to_string();
        if lines.is_empty() && trimmed == "EXIT" {
            return Ok(Some(RawFrame::Exit));
        }
        if lines.is_empty() && trimmed == "SHUTDOWN" {
            return Ok(Some(RawFrame::Shutdown));
        }
        if trimmed == "END" {
            return Ok(Some(RawFrame::Lines(lines)));
        }
        lines.push(trimmed);
    }
}

/// Write a complete `OK`/`ERR` response frame.
pub fn write_response<W: Write>(writer: &mut W, ok: bool, body: &str) -> io::Result<()> {
    let header = if ok { "OK\n" } else { "ERR\n" };
    write!(writer, "{header}{body}\nEND\n")?;
    writer.flush()
}

/// `PREVIEW` body: `GRAPH V E` followed by one `EDGE u v w` per edge. For
/// undirected graphs each edge is emitted once with `u < v`.
pub fn serialize_preview(graph: &Graph, directed: bool) -> String {
    let n = graph.vertices();
    let cap = graph.capacity_matrix();
    let mut edge_lines = Vec::new();

    if directed {
        for u in 0..n {
            for v in 0..n {
                if cap[u][v] > 0 {
                    edge_lines.push(format!("EDGE {u} {v} {}", cap[u][v]));
                }
            }
        }
    } else {
        for u in 0..n {
            for v in (u + 1)..n {
                let w = if cap[u][v] > 0 { cap[u][v] } else { cap[v][u] };
                if w > 0 {
                    edge_lines.push(format!("EDGE {u} {v} {w}"));
                }
            }
        }
    }

    let mut body = format!("GRAPH {n} {}", edge_lines.len());
    for line in edge_lines {
        body.push('\n');
        body.push_str(&line);
    }
    body
}

/// `ALL` body: four `RESULT <NAME>=<r>` lines in the documented order.
pub fn format_all(job: &Job) -> String {
    fn field(name: &str, outcome: &Option<AlgOutcome>) -> String {
        let value = outcome.as_ref().map(|o| o.to_string()).unwrap_or_default();
        format!("RESULT {name}={value}")
    }
    [
        field("MAX_FLOW", &job.result_max_flow),
        field("SCC_COUNT", &job.result_scc),
        field("MST_WEIGHT", &job.result_mst),
        field("CLIQUES", &job.result_cliques),
    ]
    .join("\n")
}
