//! Readers for the files CFinder writes.
//!
//! Every file starts with a fixed header block of [`HEADER_LINES`] lines,
//! optionally followed by one blank line. The remaining lines are handed to
//! one of four shape-specific parsers, chosen by the caller's [`FileKind`].

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{CFinderError, Result};
use crate::model::{
    Bucket, CommunityEdges, CommunityEdgesTable, DistributionTable, Edge, EdgeTable, FileKind,
    MemberRow, MemberTable, Metric, Shape, Table, Value,
};

pub const HEADER_LINES: usize = 6;

/// Reads the file at `path` and parses it as `kind`.
pub fn parse_file(path: &Path, kind: FileKind) -> Result<Table> {
    let text = fs::read_to_string(path).map_err(|e| CFinderError::io(path, e))?;
    let table = parse_str(path, &text, kind)?;
    debug!(path = %path.display(), ?kind, "parsed output file");
    Ok(table)
}

/// Parses already-read file contents. `path` is used only in error messages.
pub fn parse_str(path: &Path, text: &str, kind: FileKind) -> Result<Table> {
    let lines = data_lines(path, text)?;
    Ok(match kind.shape() {
        Shape::MemberList => Table::Members(parse_members(path, &lines, kind)?),
        Shape::WeightedGraph => Table::Edges(parse_graph(path, &lines)?),
        Shape::Distribution => {
            let FileKind::Distribution(metric) = kind else {
                return Err(CFinderError::format(path, "distribution shape without a metric"));
            };
            Table::Distribution(parse_distribution(path, &lines, metric)?)
        }
        Shape::CommunityEdges => Table::CommunityEdges(parse_community_edges(path, &lines)?),
    })
}

/// Drops the header block (and one trailing blank line), then every blank line.
pub fn data_lines<'a>(path: &Path, text: &'a str) -> Result<Vec<&'a str>> {
    let mut lines = text.lines();
    for seen in 0..HEADER_LINES {
        if lines.next().is_none() {
            return Err(CFinderError::format(
                path,
                format!("expected {HEADER_LINES} header lines, found {seen}"),
            ));
        }
    }
    let mut lines = lines.peekable();
    if lines.peek().is_some_and(|line| line.trim().is_empty()) {
        lines.next();
    }
    Ok(lines.filter(|line| !line.trim().is_empty()).collect())
}

fn parse_id(path: &Path, token: &str) -> Result<u32> {
    token
        .trim()
        .parse()
        .map_err(|_| CFinderError::format(path, format!("invalid index {token:?}")))
}

/// `<id>: <member> <member> ... ` lines. A bare `<id>:` is a row without members.
pub fn parse_members(path: &Path, lines: &[&str], kind: FileKind) -> Result<MemberTable> {
    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(lines.len());
    for line in lines {
        let (id, members) = line
            .split_once(':')
            .ok_or_else(|| CFinderError::format(path, format!("missing \":\" in line {line:?}")))?;
        let id = parse_id(path, id)?;
        if !seen.insert(id) {
            return Err(CFinderError::format(path, format!("duplicate index {id}")));
        }
        rows.push(MemberRow {
            id,
            members: members.split_whitespace().map(Value::coerce).collect(),
        });
    }
    Ok(MemberTable { kind, rows })
}

/// `source target [weight]` lines. The token count of the first line fixes
/// the shape for the whole file; missing weights are `1`.
pub fn parse_graph(path: &Path, lines: &[&str]) -> Result<Option<EdgeTable>> {
    let Some(first) = lines.first() else {
        return Ok(None);
    };
    let width = first.split_whitespace().count();
    if width != 2 && width != 3 {
        return Err(CFinderError::format(
            path,
            format!("expected 2 or 3 tokens per edge, found {width}"),
        ));
    }

    let mut rows = Vec::with_capacity(lines.len());
    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != width {
            return Err(CFinderError::format(
                path,
                format!("edge line {line:?} does not have {width} tokens"),
            ));
        }
        let weight = match tokens.get(2) {
            Some(w) => Value::coerce_decimal(w),
            None => Value::Int(1),
        };
        rows.push(Edge {
            source: Value::coerce(tokens[0]),
            target: Value::coerce(tokens[1]),
            weight,
        });
    }
    Ok(Some(EdgeTable { rows }))
}

/// `<value> <count>` lines. The last line is a boundary entry and is dropped.
pub fn parse_distribution(path: &Path, lines: &[&str], metric: Metric) -> Result<DistributionTable> {
    let body = match lines.split_last() {
        Some((_, body)) => body,
        None => &[],
    };

    let mut rows = Vec::with_capacity(body.len());
    for line in body {
        let mut tokens = line.split_whitespace();
        let (Some(value), Some(count), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(CFinderError::format(
                path,
                format!("expected \"<{}> <count>\", found {line:?}", metric.name()),
            ));
        };
        let parse = |t: &str| {
            t.parse::<i64>()
                .map_err(|_| CFinderError::format(path, format!("non-integer token {t:?}")))
        };
        rows.push(Bucket {
            value: parse(value)?,
            count: parse(count)?,
        });
    }
    Ok(DistributionTable { metric, rows })
}

/// Sections of `<id>:` followed by the edge lines of that community.
pub fn parse_community_edges(path: &Path, lines: &[&str]) -> Result<CommunityEdgesTable> {
    let mut seen = HashSet::new();
    let mut rows: Vec<CommunityEdges> = Vec::new();
    for line in lines {
        let trimmed = line.trim();
        if let Some(id) = trimmed.strip_suffix(':') {
            let community = parse_id(path, id)?;
            if !seen.insert(community) {
                return Err(CFinderError::format(path, format!("duplicate index {community}")));
            }
            rows.push(CommunityEdges {
                community,
                edges: Vec::new(),
            });
            continue;
        }

        let current = rows.last_mut().ok_or_else(|| {
            CFinderError::format(path, format!("edge line {line:?} before any community header"))
        })?;
        current
            .edges
            .push(trimmed.split_whitespace().map(Value::coerce).collect());
    }
    Ok(CommunityEdgesTable { rows })
}
