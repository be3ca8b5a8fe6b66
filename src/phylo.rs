mod distance;
mod tree;

pub type TreeFloat = f64;

pub use distance::{
    DistanceMode, NodeSelection, distances, parent_distances, root_distances,
};
pub use tree::{NodeId, ROOT_NODE, Tree, TreeError};
