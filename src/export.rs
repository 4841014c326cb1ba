use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use csv::WriterBuilder;
use petgraph::Graph;
use petgraph::dot::{Config, Dot};
use tracing::info;

use crate::error::{CFinderError, Result};
use crate::model::{Edge, EdgeTable, MemberTable, Tabular, Value};
use crate::results::CFinderResults;

/// Writes `table` as CSV with a header row.
pub fn write_table_csv(table: &impl Tabular, path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(table.columns())?;
    for record in table.records() {
        writer.write_record(record)?;
    }
    writer.flush().map_err(|e| CFinderError::io(path, e))?;
    Ok(())
}

/// Writes every table of `results` under `dir`, per-k tables in `k=<N>/`.
pub fn export_results(results: &CFinderResults, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| CFinderError::io(dir, e))?;
    write_table_csv(&results.cliques, &dir.join("cliques.csv"))?;
    if let Some(graph) = &results.graph {
        write_table_csv(graph, &dir.join("graph.csv"))?;
    }

    for (k, tables) in &results.by_k {
        let k_dir = dir.join(format!("k={k}"));
        fs::create_dir_all(&k_dir).map_err(|e| CFinderError::io(&k_dir, e))?;
        write_table_csv(&tables.communities, &k_dir.join("communities.csv"))?;
        write_table_csv(&tables.communities_cliques, &k_dir.join("communities_cliques.csv"))?;
        write_table_csv(&tables.communities_links, &k_dir.join("communities_links.csv"))?;
        if let Some(graph) = &tables.communities_graph {
            write_table_csv(graph, &k_dir.join("graph_of_communities.csv"))?;
        }
        for metric in crate::model::Metric::ALL {
            let file = format!("{}_distribution.csv", metric.name());
            write_table_csv(tables.distribution(metric), &k_dir.join(file))?;
        }
    }
    info!(dir = %dir.display(), "exported CFinder tables");
    Ok(())
}

/// Writes edges as space-separated `source target weight` lines, the input
/// format CFinder reads.
pub fn write_edge_list(edges: &[Edge], path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_path(path)?;
    for edge in edges {
        writer.write_record([
            edge.source.to_string(),
            edge.target.to_string(),
            edge.weight.to_string(),
        ])?;
    }
    writer.flush().map_err(|e| CFinderError::io(path, e))?;
    Ok(())
}

/// Builds a petgraph graph from an edge table, one node per distinct vertex.
pub fn to_petgraph(table: &EdgeTable) -> Graph<Value, Value> {
    let mut graph = Graph::new();
    let mut node_indices = HashMap::new();
    for edge in &table.rows {
        let source = *node_indices
            .entry(edge.source.clone())
            .or_insert_with(|| graph.add_node(edge.source.clone()));
        let target = *node_indices
            .entry(edge.target.clone())
            .or_insert_with(|| graph.add_node(edge.target.clone()));
        graph.add_edge(source, target, edge.weight.clone());
    }
    graph
}

/// Writes `graph` as a DOT file with each vertex filled by a hue for the
/// first community containing it.
pub fn save_graph_dot(graph: &EdgeTable, communities: &MemberTable, path: &Path) -> Result<()> {
    let mut vertex_community: HashMap<&Value, u32> = HashMap::new();
    for row in &communities.rows {
        for member in &row.members {
            vertex_community.entry(member).or_insert(row.id);
        }
    }

    let graph = to_petgraph(graph);
    let node_attrs = |_, (_, vertex): (_, &Value)| match vertex_community.get(vertex) {
        Some(community) => {
            let hue = (community % 6) * 60;
            format!(
                "label=\"{}\", style=filled, fillcolor=\"{:.3} 0.5 0.7\"",
                vertex,
                hue as f32 / 360.0
            )
        }
        None => format!("label=\"{vertex}\""),
    };
    let dot = Dot::with_attr_getters(
        &graph,
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, edge| format!("label=\"{}\"", edge.weight()),
        &node_attrs,
    );

    fs::write(path, format!("{dot:?}")).map_err(|e| CFinderError::io(path, e))
}

/// Renders a DOT file to PNG with Graphviz.
pub fn render_dot(dot_file: &Path, output_image: &Path) -> Result<()> {
    let args = vec![
        "-Tpng".to_string(),
        dot_file.display().to_string(),
        "-o".to_string(),
        output_image.display().to_string(),
    ];
    let status = Command::new("dot").args(&args).status();
    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(CFinderError::ExternalTool {
            code: status.code(),
            args,
        }),
        Err(_) => Err(CFinderError::ExternalTool { code: None, args }),
    }
}
