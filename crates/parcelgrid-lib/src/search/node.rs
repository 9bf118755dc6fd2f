//! Search-tree nodes stored in an arena and addressed by index.
//!
//! Parent links are indices into the arena, so a whole tree is dropped in one
//! go when the search that built it returns.

use super::SearchResult;

pub(crate) type NodeId = usize;

#[derive(Debug, Clone)]
pub(crate) struct Node<S, A> {
    pub state: S,
    pub parent: Option<NodeId>,
    pub action: Option<A>,
    pub depth: usize,
    pub path_cost: f64,
}

#[derive(Debug)]
pub(crate) struct NodeArena<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S: PartialEq, A: Copy> NodeArena<S, A> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn root(&mut self, state: S) -> NodeId {
        self.push(Node {
            state,
            parent: None,
            action: None,
            depth: 0,
            path_cost: 0.0,
        })
    }

    pub fn child(&mut self, parent: NodeId, state: S, action: A, step_cost: f64) -> NodeId {
        let (depth, path_cost) = {
            let parent = &self.nodes[parent];
            (parent.depth + 1, parent.path_cost + step_cost)
        };
        self.push(Node {
            state,
            parent: Some(parent),
            action: Some(action),
            depth,
            path_cost,
        })
    }

    pub fn get(&self, id: NodeId) -> &Node<S, A> {
        &self.nodes[id]
    }

    /// Whether `state` appears on the root-to-`id` chain, `id` included.
    pub fn chain_contains(&self, id: NodeId, state: &S) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id];
            if node.state == *state {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// Actions along the root-to-`id` chain, root first.
    pub fn actions_to(&self, id: NodeId) -> Vec<A> {
        let mut actions = Vec::with_capacity(self.nodes[id].depth);
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id];
            if let Some(action) = node.action {
                actions.push(action);
            }
            current = node.parent;
        }
        actions.reverse();
        actions
    }

    /// Package the goal node `id` as a search result.
    pub fn solution(&self, id: NodeId, nodes_expanded: usize) -> SearchResult<A> {
        SearchResult {
            actions: self.actions_to(id),
            cost: self.nodes[id].path_cost,
            nodes_expanded,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, node: Node<S, A>) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}
