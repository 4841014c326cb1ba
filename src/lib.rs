//! Run the CFinder clique-percolation tool and read back its output.
//!
//! CFinder writes its results as a directory of small text files: the
//! maximal cliques and input graph at the top level, and one `k=<N>`
//! directory per clique size holding communities, their cliques and links,
//! the graph of communities and four distributions. [`load`] turns such a
//! directory into [`CFinderResults`]; [`CFinder::find`] runs the tool first.

pub mod cfinder;
pub mod combinatorics;
pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod locate;
pub mod logging;
pub mod model;
pub mod parse;
pub mod results;
pub mod runner;
pub mod synth;

pub use cfinder::CFinder;
pub use command::{FindOptions, build_args};
pub use config::ToolConfig;
pub use error::{CFinderError, Result};
pub use locate::{KDir, find_k_dirs};
pub use model::{
    Bucket, CommunityEdges, CommunityEdgesTable, DistributionTable, Edge, EdgeTable, FileKind,
    MemberRow, MemberTable, Metric, Table, Tabular, Value,
};
pub use parse::parse_file;
pub use results::{CFinderResults, KResults, load};
pub use runner::{ProcessRunner, ToolRunner};
