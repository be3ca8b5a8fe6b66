//! Compact, array-backed rooted trees read from and written to NEWICK.
//!
//! A [Tree] stores its nodes in parallel columns addressed by a dense
//! [NodeId]; the root is always [ROOT_NODE] and every parent precedes its
//! children. Parsing and printing use explicit stacks, so arbitrarily deep
//! trees are safe.
//!
//! ```
//! use compact_newick::{DistanceMode, Tree, distances};
//! use std::collections::HashMap;
//!
//! let mut tree: Tree = "(A:1,(B:2,C:3)D:4);".parse()?;
//! assert_eq!(distances(&tree, DistanceMode::Root)?, vec![0.0, 1.0, 4.0, 6.0, 7.0]);
//!
//! let mapping = HashMap::from([("B".to_string(), "X".to_string())]);
//! tree.replace_labels(&mapping, true)?;
//! assert_eq!(tree.to_newick(), "(A:1,(X:2,C:3)D:4);");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod parsers;
mod phylo;

#[cfg(feature = "cli")]
pub mod cli;

pub use parsers::TreeParseError;
pub use parsers::newick::options::ParseOptions;
pub use parsers::newick::parse_newick;
pub use parsers::newick::write_newick;
pub use phylo::DistanceMode;
pub use phylo::NodeId;
pub use phylo::NodeSelection;
pub use phylo::ROOT_NODE;
pub use phylo::Tree;
pub use phylo::TreeError;
pub use phylo::TreeFloat;
pub use phylo::distances;
pub use phylo::parent_distances;
pub use phylo::root_distances;
