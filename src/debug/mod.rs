//! Diagnostics behind the `debugging` feature: SVG snapshots of the map and
//! a text rendering of the search structure.

pub(crate) mod env;
pub mod svg;

use text_trees::TreeNode;

use crate::{dag::SearchDag, idx::Idx, node::Node};

/// The search structure as a printable tree. Shared leaves appear once per
/// parent.
pub fn search_tree(dag: &SearchDag) -> TreeNode<String> {
    build(dag, dag.root())
}

fn build(dag: &SearchDag, qi: Idx<Node>) -> TreeNode<String> {
    let label = format!("[{}] {}", qi, dag.node(qi));
    match dag.node(qi) {
        Node::Branch(left, right, _) => {
            TreeNode::with_child_nodes(label, vec![build(dag, *left), build(dag, *right)].into_iter())
        }
        Node::Leaf(_) => label.into(),
    }
}
