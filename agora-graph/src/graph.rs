//! Core graph data structure.
//!
//! The SocialGraph wraps petgraph as an arena of user nodes. Each node keeps
//! its accepted connections and pending requests in ordered queues of
//! handles, so ordering survives independently of petgraph's edge storage.

use crate::edge::{Edge, EdgeKind, GraphEdge};
use crate::error::{GraphError, Result};
use agora_core::{OrderedQueue, User};
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::{EdgeFiltered, EdgeRef};
use serde::Serialize;
use tracing::{debug, warn};

/// Stable handle for a user node. Nodes are never removed, so a handle
/// stays valid for the life of the graph.
pub type NodeId = NodeIndex;

/// A vertex: the user it represents plus its adjacency.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub(crate) user: User,
    pub(crate) connections: OrderedQueue<NodeId>,
    pub(crate) pending_requests: OrderedQueue<NodeId>,
}

impl GraphNode {
    fn new(user: User) -> Self {
        Self {
            user,
            connections: OrderedQueue::new(),
            pending_requests: OrderedQueue::new(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Accepted connections, in the order they were made.
    pub fn connections(&self) -> &OrderedQueue<NodeId> {
        &self.connections
    }

    /// Requests waiting on this user, oldest first.
    pub fn pending_requests(&self) -> &OrderedQueue<NodeId> {
        &self.pending_requests
    }
}

/// A user that shares connections with someone they're not connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub node: NodeId,
    pub name: String,
    pub mutual: usize,
}

/// The social graph.
///
/// Name lookup here is a linear scan of the registry, and connection tests
/// and mutual counts scan the connection queues. The `NameTree` is the
/// logarithmic path for lookups by name.
#[derive(Debug, Default)]
pub struct SocialGraph {
    /// Registry of all nodes, in insertion order.
    pub(crate) graph: DiGraph<GraphNode, Edge>,
}

impl SocialGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
        }
    }

    /// Adds a user to the registry and returns its handle.
    pub fn add_user(&mut self, user: User) -> NodeId {
        debug!("Adding user node: {}", user.name);
        self.graph.add_node(GraphNode::new(user))
    }

    /// Gets a node by handle.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.graph.node_weight(id)
    }

    pub fn user(&self, id: NodeId) -> Option<&User> {
        self.node(id).map(|node| &node.user)
    }

    pub(crate) fn user_mut(&mut self, id: NodeId) -> Result<&mut User> {
        self.node_mut_checked(id).map(|node| &mut node.user)
    }

    /// Like [`SocialGraph::node`], but a missing node is a reported error.
    pub(crate) fn node_checked(&self, id: NodeId) -> Result<&GraphNode> {
        self.graph.node_weight(id).ok_or_else(|| {
            warn!("Operation on unknown node {:?}", id);
            GraphError::UnknownNode(id)
        })
    }

    pub(crate) fn node_mut_checked(&mut self, id: NodeId) -> Result<&mut GraphNode> {
        self.graph.node_weight_mut(id).ok_or_else(|| {
            warn!("Operation on unknown node {:?}", id);
            GraphError::UnknownNode(id)
        })
    }

    /// Finds a user by exact name with a linear scan of the registry.
    pub fn find_user(&self, name: &str) -> Option<NodeId> {
        self.graph
            .node_indices()
            .find(|&idx| self.graph[idx].user.name == name)
    }

    /// True if `b` is among `a`'s accepted connections.
    pub fn is_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.node(a)
            .map(|node| node.connections.contains(&b))
            .unwrap_or(false)
    }

    /// Counts entries common to both connection queues.
    ///
    /// Every pair of equal entries counts, so a duplicated connection
    /// inflates the result. Unknown nodes have no connections.
    pub fn count_mutual_connections(&self, a: NodeId, b: NodeId) -> usize {
        let (Some(first), Some(second)) = (self.node(a), self.node(b)) else {
            return 0;
        };

        first
            .connections
            .iter()
            .map(|conn| second.connections.iter().filter(|other| *other == conn).count())
            .sum()
    }

    /// Suggests users who share at least one connection with `id`.
    ///
    /// Skips `id` itself and anyone it's already connected to. Results come
    /// in registry order.
    pub fn suggest_mutual_friends(&self, id: NodeId) -> Result<Vec<Suggestion>> {
        self.node_checked(id)?;

        let suggestions = self
            .graph
            .node_indices()
            .filter(|&other| other != id && !self.is_connected(id, other))
            .filter_map(|other| {
                let mutual = self.count_mutual_connections(id, other);
                (mutual > 0).then(|| Suggestion {
                    node: other,
                    name: self.graph[other].user.name.clone(),
                    mutual,
                })
            })
            .collect();

        Ok(suggestions)
    }

    /// Accepted connections of a node, in the order they were made.
    pub fn connections(&self, id: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.node_checked(id)?.connections.iter().copied().collect())
    }

    /// Pending requests of a node, oldest first.
    pub fn pending_requests(&self, id: NodeId) -> Result<Vec<NodeId>> {
        Ok(self
            .node_checked(id)?
            .pending_requests
            .iter()
            .copied()
            .collect())
    }

    /// Maps handles to usernames, skipping unknown handles.
    pub fn names(&self, ids: &[NodeId]) -> Vec<&str> {
        ids.iter()
            .filter_map(|&id| self.user(id))
            .map(|user| user.name.as_str())
            .collect()
    }

    /// Finds the fewest-hop chain of accepted connections between two users.
    ///
    /// Pending requests are not followed. Returns `Ok(None)` when the users
    /// are in different components.
    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<Option<Vec<NodeId>>> {
        self.node_checked(from)?;
        self.node_checked(to)?;

        let connected = EdgeFiltered::from_fn(&self.graph, |edge: EdgeReference<'_, Edge>| {
            edge.weight().kind == EdgeKind::Connected
        });

        let path = petgraph::algo::astar(
            &connected,
            from,
            |finish| finish == to,
            |_| 1usize, // every hop costs the same
            |_| 0,
        )
        .map(|(_, path)| path);

        Ok(path)
    }

    /// Returns the number of users.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns all edges with usernames for export.
    pub fn export_edges(&self) -> Vec<GraphEdge> {
        self.graph
            .edge_references()
            .filter_map(|edge_ref| {
                let source = self.user(edge_ref.source())?.name.clone();
                let target = self.user(edge_ref.target())?.name.clone();
                Some(GraphEdge {
                    source,
                    target,
                    kind: edge_ref.weight().kind,
                })
            })
            .collect()
    }
}

/// Graph statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub users: usize,
    /// Accepted pairings; each is stored as two directed edges.
    pub connections: usize,
    pub pending_requests: usize,
}

impl SocialGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        let count = |kind: EdgeKind| {
            self.graph
                .edge_weights()
                .filter(|edge| edge.kind == kind)
                .count()
        };

        GraphStats {
            users: self.node_count(),
            connections: count(EdgeKind::Connected) / 2,
            pending_requests: count(EdgeKind::Requested),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_user(name: &str) -> User {
        User::new(name, "Secret12!", "Favourite colour?", "blue", "Porto")
    }

    /// Builds a graph with one node per name and accepts `a -> b` for each pair.
    pub(crate) fn graph_with(names: &[&str], links: &[(usize, usize)]) -> (SocialGraph, Vec<NodeId>) {
        let mut graph = SocialGraph::new();
        let ids: Vec<_> = names.iter().map(|n| graph.add_user(make_user(n))).collect();
        for &(from, to) in links {
            graph.send_follow_request(ids[from], ids[to]).unwrap();
            graph.accept_follow_request(ids[to], 1).unwrap();
        }
        (graph, ids)
    }

    #[test]
    fn test_empty_graph() {
        let graph = SocialGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.find_user("anyone"), None);
    }

    #[test]
    fn test_find_user_linear_scan() {
        let (graph, ids) = graph_with(&["amy", "bob", "cat"], &[]);
        assert_eq!(graph.find_user("bob"), Some(ids[1]));
        assert_eq!(graph.find_user("Bob"), None);
    }

    #[test]
    fn test_unknown_node_is_reported() {
        let mut graph = SocialGraph::new();
        let stranger = NodeId::new(7);
        assert_eq!(graph.bfs(stranger), Err(GraphError::UnknownNode(stranger)));
        assert_eq!(
            graph.suggest_mutual_friends(stranger),
            Err(GraphError::UnknownNode(stranger))
        );

        let amy = graph.add_user(make_user("amy"));
        assert!(!graph.is_connected(stranger, amy));
        assert_eq!(graph.count_mutual_connections(stranger, amy), 0);
    }

    #[test]
    fn test_mutual_connections_disjoint() {
        // amy-cat, bob-dan
        let (graph, ids) = graph_with(&["amy", "bob", "cat", "dan"], &[(0, 2), (1, 3)]);
        assert_eq!(graph.count_mutual_connections(ids[0], ids[1]), 0);
    }

    #[test]
    fn test_mutual_connections_shared() {
        // amy and bob both connected to cat and dan
        let (graph, ids) = graph_with(
            &["amy", "bob", "cat", "dan"],
            &[(0, 2), (0, 3), (1, 2), (1, 3)],
        );
        assert_eq!(graph.count_mutual_connections(ids[0], ids[1]), 2);
    }

    #[test]
    fn test_mutual_connections_count_duplicates() {
        // amy connected to cat twice, bob once
        let (graph, ids) = graph_with(&["amy", "bob", "cat"], &[(0, 2), (0, 2), (1, 2)]);
        assert_eq!(graph.count_mutual_connections(ids[0], ids[1]), 2);
        assert_eq!(graph.count_mutual_connections(ids[1], ids[0]), 2);
    }

    #[test]
    fn test_suggest_mutual_friends() {
        // amy-cat, bob-cat, dan-cat, amy-dan
        let (graph, ids) = graph_with(
            &["amy", "bob", "cat", "dan", "eve"],
            &[(0, 2), (1, 2), (3, 2), (0, 3)],
        );

        let suggestions = graph.suggest_mutual_friends(ids[0]).unwrap();
        assert_eq!(
            suggestions,
            vec![Suggestion {
                node: ids[1],
                name: "bob".to_string(),
                mutual: 1,
            }]
        );
    }

    #[test]
    fn test_queries_do_not_drain() {
        let (graph, ids) = graph_with(&["amy", "bob", "cat"], &[(0, 1), (0, 2)]);

        for _ in 0..3 {
            assert!(graph.is_connected(ids[0], ids[1]));
            assert_eq!(graph.count_mutual_connections(ids[1], ids[2]), 1);
            assert_eq!(graph.bfs(ids[0]).unwrap().len(), 3);
        }
        assert_eq!(graph.connections(ids[0]).unwrap(), vec![ids[1], ids[2]]);
    }

    #[test]
    fn test_shortest_path_follows_connections_only() {
        // amy-bob, bob-cat; dan has only a pending request to amy
        let (mut graph, ids) = graph_with(&["amy", "bob", "cat", "dan"], &[(0, 1), (1, 2)]);
        graph.send_follow_request(ids[3], ids[0]).unwrap();

        let path = graph.shortest_path(ids[0], ids[2]).unwrap().unwrap();
        assert_eq!(graph.names(&path), vec!["amy", "bob", "cat"]);

        assert_eq!(graph.shortest_path(ids[3], ids[0]).unwrap(), None);
    }

    #[test]
    fn test_stats_and_export() {
        let (mut graph, ids) = graph_with(&["amy", "bob", "cat"], &[(0, 1)]);
        graph.send_follow_request(ids[2], ids[0]).unwrap();

        assert_eq!(
            graph.stats(),
            GraphStats {
                users: 3,
                connections: 1,
                pending_requests: 1,
            }
        );

        let edges = graph.export_edges();
        assert_eq!(edges.len(), 3);
        assert!(edges
            .iter()
            .any(|e| e.source == "cat" && e.target == "amy" && e.kind == EdgeKind::Requested));
    }
}
