use super::TreeFloat;
use super::distance::DistanceMode;
use crate::parsers::newick::tokenizer::BYTE_ORDER_MARK;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{Display, Write};
use std::hash::BuildHasher;
use std::ops::Range;
use thiserror::Error;

/// Index of a node in a [Tree]; dense and zero-based.
pub type NodeId = usize;

/// The root of every [Tree].
pub const ROOT_NODE: NodeId = 0;

/// Parent of the root; never handed out as a valid id.
pub(crate) const NO_PARENT: NodeId = usize::MAX;

/// A rooted tree parsed from one NEWICK statement.
///
/// Nodes live in parallel columns indexed by [NodeId] (arena pattern).
/// Ids are assigned in pre-order during parsing, so every parent's id is
/// smaller than the ids of its children and a single forward scan over
/// `1..node_count()` always sees a parent before its children.
///
/// The label and branch-length columns are only allocated when they were
/// requested at construction (see
/// [ParseOptions](crate::ParseOptions)).
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    parent_ids: Vec<NodeId>,
    child_ids: Vec<Vec<NodeId>>,
    branch_lengths: Vec<Option<TreeFloat>>,
    labels: Vec<String>,
    has_labels: bool,
    has_branch_lengths: bool,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeError {
    #[error("Invalid node: {0}.")]
    InvalidNode(NodeId),
    #[error("Tree was built without {0}.")]
    NotLoaded(&'static str),
    #[error("{0} mode is not yet implemented.")]
    Unimplemented(DistanceMode),
}

#[derive(Clone, Copy)]
enum Visit {
    Down(NodeId),
    Up(NodeId),
    Separator,
}

impl Tree {
    // =========================================================================
    // Construction (used by the NEWICK builder)
    // =========================================================================

    /// Creates a tree holding only the root.
    pub(crate) fn with_root(load_labels: bool, load_lengths: bool) -> Self {
        let mut tree = Self {
            parent_ids: Vec::new(),
            child_ids: Vec::new(),
            branch_lengths: Vec::new(),
            labels: Vec::new(),
            has_labels: load_labels,
            has_branch_lengths: load_lengths,
        };
        tree.push_node(NO_PARENT);
        tree
    }

    fn push_node(&mut self, parent_id: NodeId) -> NodeId {
        let node_id = self.parent_ids.len();
        self.parent_ids.push(parent_id);
        self.child_ids.push(Vec::new());
        if self.has_labels {
            self.labels.push(String::new());
        }
        if self.has_branch_lengths {
            self.branch_lengths.push(None);
        }
        node_id
    }

    /// Appends a new last child to `parent_id` and returns its id.
    pub(crate) fn add_child(&mut self, parent_id: NodeId) -> NodeId {
        let node_id = self.push_node(parent_id);
        self.child_ids[parent_id].push(node_id);
        node_id
    }

    /// Stores a label; silently dropped when labels are not loaded.
    pub(crate) fn set_label(&mut self, node_id: NodeId, label: Cow<'_, str>) {
        if let Some(slot) = self.labels.get_mut(node_id) {
            *slot = label.into_owned();
        }
    }

    /// Stores a branch length; dropped for the root and when lengths are
    /// not loaded.
    pub(crate) fn set_branch_length(
        &mut self,
        node_id: NodeId,
        branch_length: TreeFloat,
    ) {
        if node_id == ROOT_NODE {
            return;
        }
        if let Some(slot) = self.branch_lengths.get_mut(node_id) {
            *slot = Some(branch_length);
        }
    }

    // =========================================================================
    // Tree Properties
    // =========================================================================

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.parent_ids.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.child_ids.iter().filter(|c| c.is_empty()).count()
    }

    pub fn node_ids(&self) -> Range<NodeId> {
        ROOT_NODE..self.node_count()
    }

    /// Whether labels were loaded at construction.
    pub fn has_labels(&self) -> bool {
        self.has_labels
    }

    /// Whether branch lengths were loaded at construction.
    pub fn has_branch_lengths(&self) -> bool {
        self.has_branch_lengths
    }

    // =========================================================================
    // Node Access
    // =========================================================================

    fn check(&self, node_id: NodeId) -> Result<NodeId, TreeError> {
        if node_id < self.node_count() {
            Ok(node_id)
        } else {
            Err(TreeError::InvalidNode(node_id))
        }
    }

    /// Returns the parent of `node_id`.
    ///
    /// The root has no parent; asking for it is an [TreeError::InvalidNode].
    pub fn parent_id(&self, node_id: NodeId) -> Result<NodeId, TreeError> {
        match self.parent_ids.get(node_id) {
            Some(&parent_id) if parent_id != NO_PARENT => Ok(parent_id),
            _ => Err(TreeError::InvalidNode(node_id)),
        }
    }

    pub fn child_ids(&self, node_id: NodeId) -> Result<&[NodeId], TreeError> {
        Ok(&self.child_ids[self.check(node_id)?])
    }

    pub fn is_leaf(&self, node_id: NodeId) -> Result<bool, TreeError> {
        Ok(self.child_ids[self.check(node_id)?].is_empty())
    }

    /// Length of the branch leading to `node_id`; `0.0` for the root and
    /// for branches without a length.
    pub fn branch_length(
        &self,
        node_id: NodeId,
    ) -> Result<TreeFloat, TreeError> {
        let node_id = self.check(node_id)?;
        Ok(self.branch_lengths.get(node_id).copied().flatten().unwrap_or(0.0))
    }

    /// Whether the NEWICK text gave `node_id` a branch length.
    pub fn has_branch_length(
        &self,
        node_id: NodeId,
    ) -> Result<bool, TreeError> {
        let node_id = self.check(node_id)?;
        Ok(matches!(self.branch_lengths.get(node_id), Some(Some(_))))
    }

    /// Label of `node_id`; empty if unlabeled or labels were not loaded.
    pub fn label(&self, node_id: NodeId) -> Result<&str, TreeError> {
        let node_id = self.check(node_id)?;
        Ok(self.labels.get(node_id).map_or("", String::as_str))
    }

    /// All labels, index-aligned with node ids.
    pub fn labels(&self) -> Result<&[String], TreeError> {
        if self.has_labels {
            Ok(&self.labels)
        } else {
            Err(TreeError::NotLoaded("labels"))
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replaces every label found among the keys of `mapping` with the
    /// mapped value. Internal nodes are skipped unless `include_internal`.
    ///
    /// Returns the number of relabeled nodes.
    pub fn replace_labels<S: BuildHasher>(
        &mut self,
        mapping: &HashMap<String, String, S>,
        include_internal: bool,
    ) -> Result<usize, TreeError> {
        if !self.has_labels {
            return Err(TreeError::NotLoaded("labels"));
        }

        let mut replaced: usize = 0;
        for (label, children) in self.labels.iter_mut().zip(&self.child_ids) {
            if !include_internal && !children.is_empty() {
                continue;
            }
            if let Some(new_label) = mapping.get(label.as_str()) {
                label.clone_from(new_label);
                replaced += 1;
            }
        }

        tracing::debug!(replaced, include_internal, "replaced labels");
        Ok(replaced)
    }

    // =========================================================================
    // NEWICK Output
    // =========================================================================

    /// Writes this tree as a NEWICK statement.
    pub fn print_newick<W: std::io::Write>(
        &self,
        writer: &mut W,
    ) -> std::io::Result<()> {
        write!(writer, "{self}")
    }

    pub fn to_newick(&self) -> String {
        self.to_string()
    }

    fn write_node(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        node_id: NodeId,
    ) -> std::fmt::Result {
        if let Some(label) = self.labels.get(node_id) {
            write_label(f, label)?;
        }
        if let Some(Some(branch_length)) = self.branch_lengths.get(node_id) {
            write!(f, ":{branch_length}")?;
        }
        Ok(())
    }
}

/// A leading byte-order mark is only readable back inside quotes.
fn needs_quotes(label: &str) -> bool {
    label.starts_with(BYTE_ORDER_MARK)
        || label.chars().any(|c| {
            matches!(c, '(' | ')' | '[' | ']' | '\'' | '"' | ',' | ':' | ';')
                || c.is_whitespace()
        })
}

fn write_label(f: &mut std::fmt::Formatter<'_>, label: &str) -> std::fmt::Result {
    if label.is_empty() {
        Ok(())
    } else if needs_quotes(label) {
        write!(f, "'{}'", label.replace('\'', "''"))
    } else {
        f.write_str(label)
    }
}

/// NEWICK text of the tree, produced without recursion.
impl Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut stack: Vec<Visit> = vec![Visit::Down(ROOT_NODE)];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Down(node_id) => {
                    let children = &self.child_ids[node_id];
                    if children.is_empty() {
                        self.write_node(f, node_id)?;
                        continue;
                    }
                    f.write_char('(')?;
                    stack.push(Visit::Up(node_id));
                    for (idx, &child_id) in children.iter().enumerate().rev()
                    {
                        stack.push(Visit::Down(child_id));
                        if idx > 0 {
                            stack.push(Visit::Separator);
                        }
                    }
                }
                Visit::Up(node_id) => {
                    f.write_char(')')?;
                    self.write_node(f, node_id)?;
                }
                Visit::Separator => f.write_char(',')?,
            }
        }
        f.write_char(';')
    }
}
