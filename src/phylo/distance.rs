use super::TreeFloat;
use super::tree::{NodeId, ROOT_NODE, Tree, TreeError};
use std::fmt::Display;
use std::str::FromStr;

/// How `ct_distance` measures the distance of each node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMode {
    /// Sum of branch lengths from the root.
    #[default]
    Root,
    /// Length of the branch to the parent.
    Parent,
    /// Distance through the lowest common ancestor of given nodes.
    Lca,
    /// Pairwise distance matrix.
    Matrix,
}

impl Display for DistanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DistanceMode::Root => "Root",
                DistanceMode::Parent => "Parent",
                DistanceMode::Lca => "LCA",
                DistanceMode::Matrix => "Matrix",
            }
        )
    }
}

/// Parses a mode from the first letter of `s`, so "r", "root" and "rt"
/// all select [DistanceMode::Root].
impl FromStr for DistanceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next() {
            Some('r') => Ok(DistanceMode::Root),
            Some('p') => Ok(DistanceMode::Parent),
            Some('l') => Ok(DistanceMode::Lca),
            Some('m') => Ok(DistanceMode::Matrix),
            _ => Err(format!("Invalid mode: {s}")),
        }
    }
}

/// Which nodes `ct_distance` reports.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NodeSelection {
    /// Labeled leaves.
    #[default]
    Default,
    /// Labeled nodes, leaves and internal.
    Labeled,
    All,
    /// Internal nodes, labeled or not.
    Inner,
    /// Leaves, labeled or not.
    Full,
}

/// Parses a selection from the first letter of `s`. The word "leaves"
/// names the default selection of labeled leaves.
impl FromStr for NodeSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "leaves" {
            return Ok(NodeSelection::Default);
        }
        match s.chars().next() {
            Some('d') => Ok(NodeSelection::Default),
            Some('l') => Ok(NodeSelection::Labeled),
            Some('a') => Ok(NodeSelection::All),
            Some('i') => Ok(NodeSelection::Inner),
            Some('f') => Ok(NodeSelection::Full),
            _ => Err(format!("Invalid selection: {s}")),
        }
    }
}

impl NodeSelection {
    pub fn include_leaves(&self) -> bool {
        !matches!(self, NodeSelection::Inner)
    }

    pub fn include_internal(&self) -> bool {
        !matches!(self, NodeSelection::Default | NodeSelection::Full)
    }

    pub fn include_unlabeled(&self) -> bool {
        matches!(
            self,
            NodeSelection::All | NodeSelection::Inner | NodeSelection::Full
        )
    }

    /// Whether applying this selection requires labels to be loaded.
    pub fn needs_labels(&self) -> bool {
        !self.include_unlabeled()
    }

    pub fn includes(
        &self,
        tree: &Tree,
        node_id: NodeId,
    ) -> Result<bool, TreeError> {
        let kind_ok = if tree.is_leaf(node_id)? {
            self.include_leaves()
        } else {
            self.include_internal()
        };
        if !kind_ok {
            return Ok(false);
        }
        if self.include_unlabeled() {
            return Ok(true);
        }
        if !tree.has_labels() {
            return Err(TreeError::NotLoaded("labels"));
        }
        Ok(!tree.label(node_id)?.is_empty())
    }

    /// Ids of the selected nodes, in id order.
    pub fn select(&self, tree: &Tree) -> Result<Vec<NodeId>, TreeError> {
        let mut selected = Vec::new();
        for node_id in tree.node_ids() {
            if self.includes(tree, node_id)? {
                selected.push(node_id);
            }
        }
        Ok(selected)
    }
}

/// Distance of every node from the root, indexed by node id.
///
/// One forward pass; relies on parents having smaller ids than children.
pub fn root_distances(tree: &Tree) -> Result<Vec<TreeFloat>, TreeError> {
    let mut distances: Vec<TreeFloat> = vec![0.0; tree.node_count()];
    for node_id in ROOT_NODE + 1..tree.node_count() {
        let parent_id = tree.parent_id(node_id)?;
        distances[node_id] =
            distances[parent_id] + tree.branch_length(node_id)?;
    }
    Ok(distances)
}

/// Length of the branch to the parent of every node, indexed by node id.
pub fn parent_distances(tree: &Tree) -> Result<Vec<TreeFloat>, TreeError> {
    tree.node_ids().map(|node_id| tree.branch_length(node_id)).collect()
}

pub fn distances(
    tree: &Tree,
    mode: DistanceMode,
) -> Result<Vec<TreeFloat>, TreeError> {
    match mode {
        DistanceMode::Root => root_distances(tree),
        DistanceMode::Parent => parent_distances(tree),
        DistanceMode::Lca | DistanceMode::Matrix => {
            Err(TreeError::Unimplemented(mode))
        }
    }
}
