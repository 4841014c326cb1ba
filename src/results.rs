use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CFinderError, Result};
use crate::locate::find_k_dirs;
use crate::model::{
    CommunityEdgesTable, DistributionTable, EdgeTable, FileKind, MemberTable, Metric, Table,
};
use crate::parse::parse_file;

/// Tables read from one `k=<N>` directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KResults {
    pub communities: MemberTable,
    pub communities_cliques: MemberTable,
    pub communities_links: CommunityEdgesTable,
    pub communities_graph: Option<EdgeTable>,
    pub degree_distribution: DistributionTable,
    pub membership_distribution: DistributionTable,
    pub overlap_distribution: DistributionTable,
    pub size_distribution: DistributionTable,
}

impl KResults {
    pub fn distribution(&self, metric: Metric) -> &DistributionTable {
        match metric {
            Metric::Degree => &self.degree_distribution,
            Metric::Membership => &self.membership_distribution,
            Metric::Overlap => &self.overlap_distribution,
            Metric::Size => &self.size_distribution,
        }
    }
}

/// Everything parsed from one CFinder output directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CFinderResults {
    pub cliques: MemberTable,
    pub graph: Option<EdgeTable>,
    pub by_k: BTreeMap<u32, KResults>,
}

impl CFinderResults {
    pub fn k(&self, k: u32) -> Option<&KResults> {
        self.by_k.get(&k)
    }
}

fn members(dir: &Path, kind: FileKind, directed: bool) -> Result<MemberTable> {
    let path = dir.join(kind.file_name(directed));
    match parse_file(&path, kind)? {
        Table::Members(table) => Ok(table),
        _ => Err(CFinderError::format(path, "expected a member list")),
    }
}

fn edges(dir: &Path, kind: FileKind, directed: bool) -> Result<Option<EdgeTable>> {
    let path = dir.join(kind.file_name(directed));
    match parse_file(&path, kind)? {
        Table::Edges(table) => Ok(table),
        _ => Err(CFinderError::format(path, "expected an edge list")),
    }
}

fn distribution(dir: &Path, metric: Metric, directed: bool) -> Result<DistributionTable> {
    let kind = FileKind::Distribution(metric);
    let path = dir.join(kind.file_name(directed));
    match parse_file(&path, kind)? {
        Table::Distribution(table) => Ok(table),
        _ => Err(CFinderError::format(path, "expected a distribution")),
    }
}

fn community_edges(dir: &Path, directed: bool) -> Result<CommunityEdgesTable> {
    let kind = FileKind::CommunitiesLinks;
    let path = dir.join(kind.file_name(directed));
    match parse_file(&path, kind)? {
        Table::CommunityEdges(table) => Ok(table),
        _ => Err(CFinderError::format(path, "expected community edge sections")),
    }
}

/// Parses the eight per-k files of `dir`.
pub fn load_k(dir: &Path, directed: bool) -> Result<KResults> {
    Ok(KResults {
        communities: members(dir, FileKind::Communities, directed)?,
        communities_cliques: members(dir, FileKind::CommunitiesCliques, directed)?,
        communities_links: community_edges(dir, directed)?,
        communities_graph: edges(dir, FileKind::GraphOfCommunities, directed)?,
        degree_distribution: distribution(dir, Metric::Degree, directed)?,
        membership_distribution: distribution(dir, Metric::Membership, directed)?,
        overlap_distribution: distribution(dir, Metric::Overlap, directed)?,
        size_distribution: distribution(dir, Metric::Size, directed)?,
    })
}

/// Parses a whole CFinder output tree. Any missing or malformed file fails
/// the entire load.
pub fn load(root: &Path, directed: bool) -> Result<CFinderResults> {
    let k_dirs = find_k_dirs(root)?;

    let cliques = members(root, FileKind::Cliques, false)?;
    let graph = edges(root, FileKind::Graph, false)?;

    let mut by_k = BTreeMap::new();
    for dir in k_dirs {
        debug!(k = dir.k, path = %dir.path.display(), "loading k-clique communities");
        by_k.insert(dir.k, load_k(&dir.path, directed)?);
    }

    info!(
        root = %root.display(),
        cliques = cliques.rows.len(),
        ks = ?by_k.keys().collect::<Vec<_>>(),
        "loaded CFinder output"
    );
    Ok(CFinderResults { cliques, graph, by_k })
}
