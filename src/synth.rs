//! Random weighted edge lists for trying CFinder without real data.

use std::path::Path;

use rand::seq::index;
use rand::{Rng, thread_rng};
use rayon::prelude::*;
use tracing::info;

use crate::error::{CFinderError, Result};
use crate::export::write_edge_list;
use crate::model::{Edge, Value};

/// Name of vertex `i`. Indices are unique, so names are too.
pub fn vertex_name(i: usize) -> String {
    format!("v{i}")
}

/// `num_edges` random edges over vertices `v0..v{num_vertices}`, never
/// looping on one vertex, with weights in `1..=20`.
pub fn random_edges(num_vertices: usize, num_edges: usize) -> Vec<Edge> {
    if num_vertices < 2 {
        return Vec::new();
    }
    (0..num_edges)
        .into_par_iter()
        .map_init(thread_rng, |rng, _| {
            let ends = index::sample(rng, num_vertices, 2);
            Edge {
                source: Value::Text(vertex_name(ends.index(0))),
                target: Value::Text(vertex_name(ends.index(1))),
                weight: Value::Int(rng.gen_range(1..=20)),
            }
        })
        .collect()
}

/// Generates a random edge list and writes it to `path` in CFinder's input format.
pub fn generate_edge_list(num_vertices: usize, num_edges: usize, path: &Path) -> Result<usize> {
    if num_vertices < 2 {
        return Err(CFinderError::Configuration(format!(
            "need at least two vertices to generate edges, got {num_vertices}"
        )));
    }
    let edges = random_edges(num_vertices, num_edges);
    write_edge_list(&edges, path)?;
    info!(
        path = %path.display(),
        vertices = num_vertices,
        edges = edges.len(),
        "wrote synthetic edge list"
    );
    Ok(edges.len())
}
