//! Pure parsing and serialization for the line protocol — no I/O.
//!
//! Inbound frames are ASCII lines terminated by LF (tolerant of a trailing
//! CR), delimited by a line `END`, or by the single line `EXIT` or
//! `SHUTDOWN`. See spec §4.7 for the full directive table.

use std::collections::HashMap;

use crate::error::ProtocolError;
use crate::job::{AlgKind, ParamKey};

/// One explicit `EDGE u v [w]` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSpec {
    pub u: i64,
    pub v: i64,
    pub w: i64,
}

/// A fully parsed, but not yet validated or built, request frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub alg: String,
    pub directed: bool,
    pub v: Option<i64>,
    pub e: i64,
    pub random: bool,
    pub seed: Option<i64>,
    pub wmin: Option<i64>,
    pub wmax: Option<i64>,
    pub edges: Vec<EdgeSpec>,
    pub params: HashMap<ParamKey, i64>,
}

/// The three things a complete frame can turn out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFrame {
    Exit,
    Shutdown,
    Request(ParsedRequest),
}

/// Parse the body lines of one frame (everything before `END`, exclusive).
/// `EXIT` and `SHUTDOWN` are recognized as single-line frames by the caller
/// before this is invoked (see `crate::protocol::read_frame`), but are
/// accepted here too for direct unit testing.
pub fn parse_frame(lines: &[&str]) -> Result<ControlFrame, ProtocolError> {
    if lines.len() == 1 && lines[0] == "EXIT" {
        return Ok(ControlFrame::Exit);
    }
    if lines.len() == 1 && lines[0] == "SHUTDOWN" {
        return Ok(ControlFrame::Shutdown);
    }

    let mut alg = String::new();
    let mut v: Option<i64> = None;
    let mut e: i64 = 0;
    let mut directed = 0i64;
    let mut random = 0i64;
    let mut seed: Option<i64> = None;
    let mut wmin: Option<i64> = None;
    let mut wmax: Option<i64> = None;
    let mut edges = Vec::new();
    let mut params = HashMap::new();

    for raw in lines {
        let line = raw.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        if line == "END" {
            break;
        }
        if let Some(rest) = line.strip_prefix("ALG ") {
            alg = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("DIRECTED ") {
            directed = parse_int(rest)?;
        } else if let Some(rest) = line.strip_prefix("V ") {
            v = Some(parse_int(rest)?);
        } else if let Some(rest) = line.strip_prefix("E ") {
            e = parse_int(rest)?;
        } else if let Some(rest) = line.strip_prefix("RANDOM ") {
            random = parse_int(rest)?;
        } else if let Some(rest) = line.strip_prefix("SEED ") {
            seed = Some(parse_int(rest)?);
        } else if let Some(rest) = line.strip_prefix("WMIN ") {
            wmin = Some(parse_int(rest)?);
        } else if let Some(rest) = line.strip_prefix("WMAX ") {
            wmax = Some(parse_int(rest)?);
        } else if let Some(rest) = line.strip_prefix("EDGE ") {
            edges.push(parse_edge(rest)?);
        } else if let Some(rest) = line.strip_prefix("PARAM ") {
            let (key, val) = parse_param(rest)?;
            params.insert(key, val);
        } else {
            return Err(ProtocolError::UnknownDirective(line.to_string()));
        }
    }

    Ok(ControlFrame::Request(ParsedRequest {
        alg,
        directed: directed != 0,
        v,
        e,
        random: random != 0,
        seed,
        wmin,
        wmax,
        edges,
        params,
    }))
}

fn parse_int(s: &str) -> Result<i64, ProtocolError> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| ProtocolError::MalformedOperand(s.to_string()))
}

fn parse_edge(rest: &str) -> Result<EdgeSpec, ProtocolError> {
    let mut it = rest.split_whitespace();
    let u = it
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| ProtocolError::MalformedOperand(format!("EDGE {rest}")))?;
    let v = it
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| ProtocolError::MalformedOperand(format!("EDGE {rest}")))?;
    let w = match it.next() {
        Some(t) => t.parse().map_err(|_| ProtocolError::MalformedOperand(format!("EDGE {rest}")))?,
        None => 1,
    };
    Ok(EdgeSpec { u, v, w })
}

fn parse_param(rest: &str) -> Result<(ParamKey, i64), ProtocolError> {
    let mut it = rest.split_whitespace();
    let key = it.next().ok_or_else(|| ProtocolError::MalformedOperand(format!("PARAM {rest}")))?;
    let val: i64 = it
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| ProtocolError::MalformedOperand(format!("PARAM {rest}")))?;
    let key = match key {
        "SRC" => ParamKey::Src,
        "SINK" => ParamKey::Sink,
        "K" => ParamKey::K,
        _ => return Err(ProtocolError::UnknownDirective(format!("PARAM {rest}"))),
    };
    Ok((key, val))
}

/// Map an `ALG` identifier to the pipeline kind the connection handler
/// should enqueue it as.
pub fn alg_kind(alg: &str) -> Result<AlgKind, ProtocolError> {
    match alg {
        "PREVIEW" => Ok(AlgKind::Preview),
        "ALL" => Ok(AlgKind::All),
        "MAX_FLOW" => Ok(AlgKind::SingleMaxFlow),
        "SCC" => Ok(AlgKind::SingleScc),
        "MST" => Ok(AlgKind::SingleMst),
        "CLIQUES" => Ok(AlgKind::SingleCliques),
        _ => Err(ProtocolError::UnsupportedAlgorithm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn parses_mst_request() {
        let text = "ALG MST\nDIRECTED 0\nV 4\nE 5\nEDGE 0 1 2\nEDGE 1 2 3\nEDGE 2 3 3\nEDGE 3 0 5\nEDGE 0 2 6\nEND";
        let frame = parse_frame(&lines(text)).unwrap();
        match frame {
            ControlFrame::Request(req) => {
                assert_eq!(req.alg, "MST");
                assert_eq!(req.v, Some(4));
                assert_eq!(req.edges.len(), 5);
                assert!(!req.directed);
            }
            _ => panic!("expected a request"),
        }
    }

    #[test]
    fn edge_defaults_weight_to_one() {
        let frame = parse_frame(&lines("ALG PREVIEW\nV 2\nEDGE 0 1\nEND")).unwrap();
        match frame {
            ControlFrame::Request(req) => assert_eq!(req.edges[0].w, 1),
            _ => panic!("expected a request"),
        }
    }

    #[test]
    fn param_line_sets_src_sink_k() {
        let frame = parse_frame(&lines("ALG MAX_FLOW\nV 2\nPARAM SRC 0\nPARAM SINK 1\nEND")).unwrap();
        match frame {
            ControlFrame::Request(req) => {
                assert_eq!(req.params.get(&ParamKey::Src), Some(&0));
                assert_eq!(req.params.get(&ParamKey::Sink), Some(&1));
            }
            _ => panic!("expected a request"),
        }
    }

    #[test]
    fn unknown_directive_is_an_error() {
        let err = parse_frame(&lines("FOO 1\nEND")).unwrap_err();
        assert_eq!(err, ProtocolError::UnknownDirective("FOO 1".to_string()));
    }

    #[test]
    fn non_numeric_operand_is_malformed_not_unknown() {
        let err = parse_frame(&lines("ALG MST\nV abc\nEND")).unwrap_err();
        assert_eq!(err, ProtocolError::MalformedOperand("abc".to_string()));
    }

    #[test]
    fn seed_and_weight_bounds_default_to_none_when_omitted() {
        let frame = parse_frame(&lines("ALG PREVIEW\nRANDOM 1\nV 4\nE 3\nEND")).unwrap();
        match frame {
            ControlFrame::Request(req) => {
                assert_eq!(req.seed, None);
                assert_eq!(req.wmin, None);
                assert_eq!(req.wmax, None);
            }
            _ => panic!("expected a request"),
        }
    }

    #[test]
    fn explicit_seed_and_weight_bounds_are_parsed() {
        let frame = parse_frame(&lines("ALG PREVIEW\nRANDOM 1\nV 4\nE 3\nSEED 7\nWMIN 2\nWMAX 9\nEND")).unwrap();
        match frame {
            ControlFrame::Request(req) => {
                assert_eq!(req.seed, Some(7));
                assert_eq!(req.wmin, Some(2));
                assert_eq!(req.wmax, Some(9));
            }
            _ => panic!("expected a request"),
        }
    }

    #[test]
    fn exit_and_shutdown_are_recognized() {
        assert_eq!(parse_frame(&["EXIT"]).unwrap(), ControlFrame::Exit);
        assert_eq!(parse_frame(&["SHUTDOWN"]).unwrap(), ControlFrame::Shutdown);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let frame = parse_frame(&lines("ALG PREVIEW\n\nV 2\n\nEND")).unwrap();
        match frame {
            ControlFrame::Request(req) => assert_eq!(req.v, Some(2)),
            _ => panic!("expected a request"),
        }
    }
}
