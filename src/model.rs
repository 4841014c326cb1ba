use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

use serde::Serialize;

use crate::error::{CFinderError, Result};

/// A token from a CFinder output file after type coercion.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Purely numeric tokens become integers, everything else stays text.
    ///
    /// Vertex, clique and community tokens go through this rule only. CFinder
    /// never writes decimal members, so a token such as `1.5` is kept as a
    /// vertex name. Decimal coercion is reserved for link weights, see
    /// [`Value::coerce_decimal`].
    pub fn coerce(token: &str) -> Self {
        match token.parse::<i64>() {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Text(token.to_string()),
        }
    }

    /// Like [`Value::coerce`], but also accepts finite decimal numbers. Used
    /// for link weights, which may be real-valued. `inf` and `nan` stay text.
    pub fn coerce_decimal(token: &str) -> Self {
        if let Ok(i) = token.parse::<i64>() {
            return Value::Int(i);
        }
        match token.parse::<f64>() {
            Ok(f) if f.is_finite() => Value::Float(f),
            _ => Value::Text(token.to_string()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Int(_) => 0,
            Value::Float(_) => 1,
            Value::Text(_) => 2,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Int(i) => i.hash(state),
            Value::Float(x) => x.to_bits().hash(state),
            Value::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// The statistic a distribution file is a histogram of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Degree,
    Membership,
    Overlap,
    Size,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Degree,
        Metric::Membership,
        Metric::Overlap,
        Metric::Size,
    ];

    /// Column name of the metric, also the leading component of its file name.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Degree => "degree",
            Metric::Membership => "membership",
            Metric::Overlap => "overlap",
            Metric::Size => "size",
        }
    }
}

/// How the lines of a file are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    MemberList,
    WeightedGraph,
    Distribution,
    CommunityEdges,
}

/// Every file CFinder writes that this crate knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileKind {
    Cliques,
    Graph,
    Communities,
    CommunitiesCliques,
    CommunitiesLinks,
    GraphOfCommunities,
    Distribution(Metric),
}

pub const DIRECTED_PREFIX: &str = "directed_";

impl FileKind {
    /// The eight files found in every `k=<N>` directory.
    pub const PER_K: [FileKind; 8] = [
        FileKind::Communities,
        FileKind::CommunitiesCliques,
        FileKind::CommunitiesLinks,
        FileKind::GraphOfCommunities,
        FileKind::Distribution(Metric::Degree),
        FileKind::Distribution(Metric::Membership),
        FileKind::Distribution(Metric::Overlap),
        FileKind::Distribution(Metric::Size),
    ];

    fn base_name(self) -> &'static str {
        match self {
            FileKind::Cliques => "cliques",
            FileKind::Graph => "graph",
            FileKind::Communities => "communities",
            FileKind::CommunitiesCliques => "communities_cliques",
            FileKind::CommunitiesLinks => "communities_links",
            FileKind::GraphOfCommunities => "graph_of_communities",
            FileKind::Distribution(Metric::Degree) => "degree_distribution",
            FileKind::Distribution(Metric::Membership) => "membership_distribution",
            FileKind::Distribution(Metric::Overlap) => "overlap_distribution",
            FileKind::Distribution(Metric::Size) => "size_distribution",
        }
    }

    /// Canonical file name, with the `directed_` prefix used in directed mode.
    pub fn file_name(self, directed: bool) -> String {
        if directed {
            format!("{DIRECTED_PREFIX}{}", self.base_name())
        } else {
            self.base_name().to_string()
        }
    }

    /// Resolves a file name (optionally `directed_`-prefixed) to its kind.
    pub fn from_file_name(name: &str) -> Result<FileKind> {
        let base = name.strip_prefix(DIRECTED_PREFIX).unwrap_or(name);
        [FileKind::Cliques, FileKind::Graph]
            .into_iter()
            .chain(FileKind::PER_K)
            .find(|kind| kind.base_name() == base)
            .ok_or_else(|| CFinderError::format(name, "unrecognised CFinder output file name"))
    }

    /// Resolves the kind of the file at `path` from its final component.
    pub fn from_path(path: &Path) -> Result<FileKind> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CFinderError::format(path, "path has no file name"))?;
        FileKind::from_file_name(name)
    }

    pub fn shape(self) -> Shape {
        match self {
            FileKind::Cliques | FileKind::Communities | FileKind::CommunitiesCliques => {
                Shape::MemberList
            }
            FileKind::Graph | FileKind::GraphOfCommunities => Shape::WeightedGraph,
            FileKind::CommunitiesLinks => Shape::CommunityEdges,
            FileKind::Distribution(_) => Shape::Distribution,
        }
    }

    /// Column names of the table this file parses into.
    pub fn columns(self) -> Vec<&'static str> {
        match self {
            FileKind::Cliques => vec!["clique", "vertices"],
            FileKind::Communities => vec!["community", "vertices"],
            FileKind::CommunitiesCliques => vec!["community", "cliques"],
            FileKind::CommunitiesLinks => vec!["community", "edges"],
            FileKind::Graph | FileKind::GraphOfCommunities => vec!["source", "target", "weight"],
            FileKind::Distribution(metric) => vec![metric.name(), "count"],
        }
    }
}

/// Anything that can be laid out as named columns of string cells.
pub trait Tabular {
    fn columns(&self) -> Vec<String>;
    fn records(&self) -> Vec<Vec<String>>;

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn join_values(values: &[Value]) -> String {
    values
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberRow {
    pub id: u32,
    pub members: Vec<Value>,
}

/// Rows of a cliques, communities or communities_cliques file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberTable {
    pub kind: FileKind,
    pub rows: Vec<MemberRow>,
}

impl MemberTable {
    pub fn get(&self, id: u32) -> Option<&MemberRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Member tuples with each tuple sorted, in row order.
    pub fn sorted_members(&self) -> Vec<Vec<Value>> {
        self.rows
            .iter()
            .map(|row| {
                let mut members = row.members.clone();
                members.sort();
                members
            })
            .collect()
    }
}

impl Tabular for MemberTable {
    fn columns(&self) -> Vec<String> {
        self.kind.columns().iter().map(|c| c.to_string()).collect()
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| vec![row.id.to_string(), join_values(&row.members)])
            .collect()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: Value,
    pub target: Value,
    pub weight: Value,
}

impl Edge {
    pub fn new(source: impl Into<Value>, target: impl Into<Value>, weight: impl Into<Value>) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
            weight: weight.into(),
        }
    }
}

/// Rows of the `graph` or `graph_of_communities` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeTable {
    pub rows: Vec<Edge>,
}

impl Tabular for EdgeTable {
    fn columns(&self) -> Vec<String> {
        vec!["source".into(), "target".into(), "weight".into()]
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|e| vec![e.source.to_string(), e.target.to_string(), e.weight.to_string()])
            .collect()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub value: i64,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionTable {
    pub metric: Metric,
    pub rows: Vec<Bucket>,
}

impl DistributionTable {
    /// `(value, count)` pairs in file order.
    pub fn pairs(&self) -> Vec<(i64, i64)> {
        self.rows.iter().map(|b| (b.value, b.count)).collect()
    }
}

impl Tabular for DistributionTable {
    fn columns(&self) -> Vec<String> {
        vec![self.metric.name().into(), "count".into()]
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|b| vec![b.value.to_string(), b.count.to_string()])
            .collect()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityEdges {
    pub community: u32,
    pub edges: Vec<Vec<Value>>,
}

/// Rows of the `communities_links` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityEdgesTable {
    pub rows: Vec<CommunityEdges>,
}

impl Tabular for CommunityEdgesTable {
    fn columns(&self) -> Vec<String> {
        vec!["community".into(), "edges".into()]
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let edges = row
                    .edges
                    .iter()
                    .map(|edge| join_values(edge))
                    .collect::<Vec<_>>()
                    .join(";");
                vec![row.community.to_string(), edges]
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// A parsed file, tagged by shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Table {
    Members(MemberTable),
    Edges(Option<EdgeTable>),
    Distribution(DistributionTable),
    CommunityEdges(CommunityEdgesTable),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_keeps_names_as_text() {
        assert_eq!(Value::coerce("42"), Value::Int(42));
        assert_eq!(Value::coerce("a"), Value::Text("a".into()));
        assert_eq!(Value::coerce("1.5"), Value::Text("1.5".into()));
        assert_eq!(Value::coerce_decimal("1.5"), Value::Float(1.5));
        assert_eq!(Value::coerce_decimal("3"), Value::Int(3));
    }

    #[test]
    fn non_finite_weights_stay_text() {
        for token in ["inf", "-inf", "infinity", "NaN"] {
            assert_eq!(Value::coerce_decimal(token), Value::Text(token.into()));
        }
        assert_eq!(Value::coerce_decimal("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn values_order_by_variant_then_content() {
        let mut values = vec![
            Value::from("b"),
            Value::Float(0.5),
            Value::Int(7),
            Value::from("a"),
            Value::Int(2),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Int(2),
                Value::Int(7),
                Value::Float(0.5),
                Value::from("a"),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn sorted_members_sorts_within_rows() {
        let table = MemberTable {
            kind: FileKind::Cliques,
            rows: vec![MemberRow {
                id: 0,
                members: vec![Value::Int(9), Value::Int(2), Value::Int(5)],
            }],
        };
        assert_eq!(
            table.sorted_members(),
            vec![vec![Value::Int(2), Value::Int(5), Value::Int(9)]]
        );
        assert_eq!(table.rows[0].members[0].as_int(), Some(9));
    }

    #[test]
    fn file_names_round_trip_through_kind() {
        for kind in FileKind::PER_K {
            assert_eq!(FileKind::from_file_name(&kind.file_name(false)).unwrap(), kind);
            assert_eq!(FileKind::from_file_name(&kind.file_name(true)).unwrap(), kind);
        }
        assert_eq!(FileKind::from_file_name("cliques").unwrap(), FileKind::Cliques);
    }

    #[test]
    fn unknown_file_name_is_rejected() {
        let err = FileKind::from_file_name("directed_histogram").unwrap_err();
        assert!(matches!(err, CFinderError::Format { .. }));
    }

    #[test]
    fn distribution_column_comes_from_metric() {
        let kind = FileKind::Distribution(Metric::Membership);
        assert_eq!(kind.columns(), vec!["membership", "count"]);
        assert_eq!(kind.file_name(true), "directed_membership_distribution");
    }
}
