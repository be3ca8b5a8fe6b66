pub(crate) mod options;
pub(crate) mod tokenizer;

use crate::TreeParseError;

use super::super::phylo::NodeId;
use super::super::phylo::ROOT_NODE;
use super::super::phylo::Tree;
use options::ParseOptions;
use tokenizer::Token;
use tokenizer::Tokenizer;

use std::str::FromStr;

/// The node that receives the next label or branch length.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    node_id: NodeId,
    closed: bool,
    has_label: bool,
    has_length: bool,
}

impl Cursor {
    fn opened(node_id: NodeId) -> Self {
        Self { node_id, closed: false, has_label: false, has_length: false }
    }

    fn closed(node_id: NodeId) -> Self {
        Self { closed: true, ..Self::opened(node_id) }
    }

    /// Only a node with nothing attached yet may gain children.
    fn accepts_children(&self) -> bool {
        !self.closed && !self.has_label && !self.has_length
    }
}

fn unexpected(position: usize, token: &Token<'_>) -> TreeParseError {
    TreeParseError::UnexpectedToken { position, token: token.to_string() }
}

/// Builds a [Tree] from a single NEWICK statement in one forward pass.
///
/// Nesting is tracked with an explicit stack of open internal nodes, so
/// the depth of the input does not touch the call stack. Nodes are
/// numbered in the order their first token appears (pre-order).
fn build_tree(
    s: &str,
    options: &ParseOptions,
) -> Result<Tree, TreeParseError> {
    let mut tree = Tree::with_root(options.load_labels, options.load_lengths);
    let mut open_node_ids: Vec<NodeId> = Vec::new();
    let mut cursor = Cursor::opened(ROOT_NODE);
    let mut end_position: Option<usize> = None;

    for item in Tokenizer::new(s, options) {
        let (position, token) = match (item, end_position) {
            (Ok((position, _)), Some(_)) => {
                return Err(TreeParseError::TrailingContent { position });
            }
            (Err(err), Some(end)) => {
                return Err(TreeParseError::TrailingContent {
                    position: err.position().unwrap_or(end + 1),
                });
            }
            (item, None) => item?,
        };

        match token {
            Token::Open => {
                if !cursor.accepts_children() {
                    return Err(unexpected(position, &token));
                }
                open_node_ids.push(cursor.node_id);
                cursor = Cursor::opened(tree.add_child(cursor.node_id));
            }
            Token::Comma => {
                let Some(&parent_id) = open_node_ids.last() else {
                    return Err(TreeParseError::UnbalancedParentheses {
                        position,
                    });
                };
                cursor = Cursor::opened(tree.add_child(parent_id));
            }
            Token::Close => {
                let Some(parent_id) = open_node_ids.pop() else {
                    return Err(TreeParseError::UnbalancedParentheses {
                        position,
                    });
                };
                cursor = Cursor::closed(parent_id);
            }
            Token::Label(label) => {
                if cursor.has_label || cursor.has_length {
                    return Err(unexpected(position, &Token::Label(label)));
                }
                cursor.has_label = true;
                tree.set_label(cursor.node_id, label);
            }
            Token::Length(branch_length) => {
                if cursor.has_length {
                    return Err(unexpected(position, &token));
                }
                cursor.has_length = true;
                tree.set_branch_length(cursor.node_id, branch_length);
            }
            Token::End => {
                if !open_node_ids.is_empty() {
                    return Err(TreeParseError::UnbalancedParentheses {
                        position,
                    });
                }
                end_position = Some(position);
            }
        }
    }

    if end_position.is_none() {
        if !open_node_ids.is_empty() {
            return Err(TreeParseError::UnbalancedParentheses {
                position: s.len(),
            });
        }
        return Err(TreeParseError::MissingTerminator);
    }

    tracing::debug!(
        node_count = tree.node_count(),
        load_labels = options.load_labels,
        load_lengths = options.load_lengths,
        "parsed NEWICK statement"
    );

    Ok(tree)
}

impl Tree {
    /// Parses one NEWICK statement (terminated by `;`).
    ///
    /// Either the whole statement is read or an error is returned; no
    /// partially built tree escapes.
    ///
    /// ```
    /// use compact_newick::{ParseOptions, Tree};
    ///
    /// let tree = Tree::from_newick("(A:1,(B:2,C:3)D:4);", &ParseOptions::default())?;
    /// assert_eq!(tree.node_count(), 5);
    /// assert_eq!(tree.label(2)?, "D");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_newick(
        s: &str,
        options: &ParseOptions,
    ) -> Result<Tree, TreeParseError> {
        build_tree(s, options)
    }
}

impl FromStr for Tree {
    type Err = TreeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        build_tree(s, &ParseOptions::default())
    }
}

/// Parses every non-blank line of `s` as its own NEWICK statement.
pub fn parse_newick(
    s: &str,
    options: &ParseOptions,
) -> Result<Vec<Tree>, TreeParseError> {
    s.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| build_tree(line, options))
        .collect()
}

/// Converts multiple [Tree] objects to NEWICK formatted strings.
///
/// Trees are separated by newlines. Returns empty string if input is empty.
pub fn write_newick(trees: &[Tree]) -> String {
    trees.iter().map(Tree::to_newick).collect::<Vec<String>>().join("\n")
}
