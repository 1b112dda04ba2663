//! Breadth-first and depth-first walks over accepted connections.
//!
//! Both walks visit neighbours in the order the connections were made and
//! keep the visited set as an ordered list. Membership is a linear scan,
//! which makes a full walk O(n²) in the number of users reached; the visit
//! order is what callers rely on.

use crate::error::Result;
use crate::graph::{NodeId, SocialGraph};
use agora_core::OrderedQueue;

impl SocialGraph {
    /// Breadth-first traversal from `start`, returning handles in visit order.
    pub fn bfs(&self, start: NodeId) -> Result<Vec<NodeId>> {
        self.node_checked(start)?;

        let mut order = Vec::new();
        let mut queue = OrderedQueue::new();
        let mut visited = OrderedQueue::new();

        queue.enqueue(start);
        visited.enqueue(start);

        while let Ok(current) = queue.dequeue() {
            order.push(current);

            let Some(node) = self.node(current) else {
                continue;
            };
            for &neighbor in node.connections.iter() {
                if !visited.contains(&neighbor) {
                    queue.enqueue(neighbor);
                    visited.enqueue(neighbor);
                }
            }
        }

        Ok(order)
    }

    /// Recursive depth-first traversal from `start`.
    ///
    /// Recursion depth grows with the longest unvisited chain, so a very
    /// long path of connections can exhaust the stack.
    pub fn dfs(&self, start: NodeId) -> Result<Vec<NodeId>> {
        self.node_checked(start)?;

        let mut visited = OrderedQueue::new();
        self.dfs_visit(start, &mut visited);

        Ok(visited.iter().copied().collect())
    }

    fn dfs_visit(&self, current: NodeId, visited: &mut OrderedQueue<NodeId>) {
        visited.enqueue(current);

        let Some(node) = self.node(current) else {
            return;
        };
        for &neighbor in node.connections.iter() {
            if !visited.contains(&neighbor) {
                self.dfs_visit(neighbor, visited);
            }
        }
    }
}
