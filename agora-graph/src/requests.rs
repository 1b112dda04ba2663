//! Follow-request workflow.
//!
//! A request sits in the target's pending queue until the target accepts it
//! by 1-based position. Acceptance turns it into a connection on both sides
//! at once. There is no reject path; an unaccepted request simply stays.

use crate::edge::{Edge, EdgeKind};
use crate::error::{GraphError, Result};
use crate::graph::{NodeId, SocialGraph};
use petgraph::visit::EdgeRef;
use tracing::{debug, warn};

impl SocialGraph {
    /// Queues `requester` on `target`'s pending requests and notifies the target.
    ///
    /// Repeated requests are queued again; each one has to be accepted on
    /// its own.
    pub fn send_follow_request(&mut self, requester: NodeId, target: NodeId) -> Result<()> {
        let requester_name = self.node_checked(requester)?.user.name.clone();
        self.node_checked(target)?;

        if requester == target {
            warn!("{} tried to follow themselves", requester_name);
            return Err(GraphError::SelfRequest);
        }

        let node = self.node_mut_checked(target)?;
        node.pending_requests.enqueue(requester);
        node.user
            .notify(format!("Follow request from {}", requester_name));

        self.graph
            .add_edge(requester, target, Edge::new(EdgeKind::Requested));

        debug!("Follow request {:?} -> {:?} queued", requester, target);
        Ok(())
    }

    /// Accepts the pending request at 1-based `ordinal` and returns the requester.
    ///
    /// The chosen entry leaves the queue and every other entry keeps its
    /// place. Both users gain the other as a connection, the requester is
    /// logged as a follower of the target, the target as followed by the
    /// requester, and the requester is notified.
    ///
    /// An ordinal with no entry behind it changes nothing and returns
    /// [`GraphError::OrdinalOutOfRange`].
    pub fn accept_follow_request(&mut self, target: NodeId, ordinal: usize) -> Result<NodeId> {
        let node = self.node_checked(target)?;
        let pending = node.pending_requests.size();

        let index = ordinal.checked_sub(1).filter(|&index| index < pending);
        let Some(index) = index else {
            warn!(
                "{} has no pending request at position {}",
                node.user.name, ordinal
            );
            return Err(GraphError::OrdinalOutOfRange { ordinal, pending });
        };

        let requester = {
            let node = self.node_mut_checked(target)?;
            let Some(requester) = node.pending_requests.remove_at(index) else {
                return Err(GraphError::OrdinalOutOfRange { ordinal, pending });
            };
            requester
        };

        // Everything below is infallible: both nodes exist, so the pairing
        // is made on both sides or not at all.
        let target_name = self.graph[target].user.name.clone();
        let requester_name = self.graph[requester].user.name.clone();

        {
            let node = &mut self.graph[target];
            node.connections.enqueue(requester);
            node.user.followers.enqueue(requester_name.clone());
        }
        {
            let node = &mut self.graph[requester];
            node.connections.enqueue(target);
            node.user.following.enqueue(target_name.clone());
            node.user
                .notify(format!("Follow request accepted by {}", target_name));
        }

        let request_edge = self
            .graph
            .edges_connecting(requester, target)
            .find(|edge| edge.weight().kind == EdgeKind::Requested)
            .map(|edge| edge.id());
        if let Some(edge) = request_edge {
            self.graph.remove_edge(edge);
        }
        self.graph
            .add_edge(target, requester, Edge::new(EdgeKind::Connected));
        self.graph
            .add_edge(requester, target, Edge::new(EdgeKind::Connected));

        debug!("{} accepted follow request from {}", target_name, requester_name);
        Ok(requester)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{graph_with, make_user};

    fn notifications(graph: &SocialGraph, id: NodeId) -> Vec<String> {
        graph
            .user(id)
            .unwrap()
            .notifications
            .iter()
            .map(|n| n.content.clone())
            .collect()
    }

    #[test]
    fn test_send_queues_and_notifies() {
        let (mut graph, ids) = graph_with(&["amy", "bob"], &[]);
        graph.send_follow_request(ids[0], ids[1]).unwrap();

        assert_eq!(graph.pending_requests(ids[1]).unwrap(), vec![ids[0]]);
        assert_eq!(notifications(&graph, ids[1]), vec!["Follow request from amy"]);
        assert!(graph.pending_requests(ids[0]).unwrap().is_empty());
    }

    #[test]
    fn test_accept_connects_both_ways() {
        let (mut graph, ids) = graph_with(&["amy", "bob"], &[]);
        graph.send_follow_request(ids[0], ids[1]).unwrap();

        let requester = graph.accept_follow_request(ids[1], 1).unwrap();
        assert_eq!(requester, ids[0]);

        assert!(graph.is_connected(ids[0], ids[1]));
        assert!(graph.is_connected(ids[1], ids[0]));
        assert!(graph.pending_requests(ids[1]).unwrap().is_empty());

        let bob = graph.user(ids[1]).unwrap();
        assert_eq!(bob.followers.iter().collect::<Vec<_>>(), vec!["amy"]);
        let amy = graph.user(ids[0]).unwrap();
        assert_eq!(amy.following.iter().collect::<Vec<_>>(), vec!["bob"]);
        assert_eq!(
            notifications(&graph, ids[0]),
            vec!["Follow request accepted by bob"]
        );
    }

    #[test]
    fn test_accept_middle_ordinal_keeps_order() {
        let (mut graph, ids) = graph_with(&["target", "x", "y", "z"], &[]);
        for &requester in &ids[1..] {
            graph.send_follow_request(requester, ids[0]).unwrap();
        }

        let accepted = graph.accept_follow_request(ids[0], 2).unwrap();
        assert_eq!(accepted, ids[2]);
        assert!(graph.is_connected(ids[0], ids[2]));

        let remaining = graph.pending_requests(ids[0]).unwrap();
        assert_eq!(graph.names(&remaining), vec!["x", "z"]);
    }

    #[test]
    fn test_out_of_range_ordinal_changes_nothing() {
        let (mut graph, ids) = graph_with(&["amy", "bob"], &[]);
        graph.send_follow_request(ids[0], ids[1]).unwrap();

        for ordinal in [0, 2, 99] {
            assert_eq!(
                graph.accept_follow_request(ids[1], ordinal),
                Err(GraphError::OrdinalOutOfRange {
                    ordinal,
                    pending: 1,
                })
            );
        }

        assert_eq!(graph.pending_requests(ids[1]).unwrap(), vec![ids[0]]);
        assert!(!graph.is_connected(ids[1], ids[0]));
        assert!(graph.user(ids[1]).unwrap().followers.is_empty());
    }

    #[test]
    fn test_unaccepted_request_never_connects() {
        let (mut graph, ids) = graph_with(&["amy", "bob"], &[]);
        graph.send_follow_request(ids[0], ids[1]).unwrap();
        graph.send_follow_request(ids[0], ids[1]).unwrap();

        assert!(!graph.is_connected(ids[0], ids[1]));
        assert!(!graph.is_connected(ids[1], ids[0]));
        assert!(graph.user(ids[0]).unwrap().following.is_empty());
        assert!(graph.user(ids[1]).unwrap().followers.is_empty());
        assert_eq!(graph.pending_requests(ids[1]).unwrap().len(), 2);
    }

    #[test]
    fn test_self_request_rejected() {
        let mut graph = SocialGraph::new();
        let amy = graph.add_user(make_user("amy"));

        assert_eq!(
            graph.send_follow_request(amy, amy),
            Err(GraphError::SelfRequest)
        );
        assert!(graph.pending_requests(amy).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_nodes_rejected() {
        let mut graph = SocialGraph::new();
        let amy = graph.add_user(make_user("amy"));
        let ghost = NodeId::new(5);

        assert_eq!(
            graph.send_follow_request(ghost, amy),
            Err(GraphError::UnknownNode(ghost))
        );
        assert_eq!(
            graph.send_follow_request(amy, ghost),
            Err(GraphError::UnknownNode(ghost))
        );
        assert_eq!(
            graph.accept_follow_request(ghost, 1),
            Err(GraphError::UnknownNode(ghost))
        );
        assert!(notifications(&graph, amy).is_empty());
    }

    #[test]
    fn test_request_edge_swapped_for_connection() {
        let (mut graph, ids) = graph_with(&["amy", "bob"], &[]);
        graph.send_follow_request(ids[0], ids[1]).unwrap();
        assert_eq!(graph.stats().pending_requests, 1);

        graph.accept_follow_request(ids[1], 1).unwrap();
        let stats = graph.stats();
        assert_eq!(stats.pending_requests, 0);
        assert_eq!(stats.connections, 1);
    }
}
