//! The social network facade.
//!
//! `SocialNetwork` is what a front end talks to. It owns the graph (which
//! owns every user) and the name tree (which only holds handles), keeps the
//! two in step on signup, and exposes every query as an ordered, read-only
//! result for the caller to render.

use crate::config::NetworkConfig;
use crate::error::{GraphError, Result};
use crate::graph::{NodeId, SocialGraph, Suggestion};
use crate::name_index::NameTree;
use agora_core::{Message, Notification, Post, Timestamp, User};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Result of [`SocialNetwork::login_with_attempts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn(NodeId),
    /// Every allowed attempt failed; the caller may offer recovery.
    LockedOut { recovery_question: String },
}

/// Posts of one followed user, newest first.
#[derive(Debug, Serialize)]
pub struct TimelineEntry<'a> {
    pub author: &'a str,
    pub posts: Vec<&'a Post>,
}

#[derive(Debug, Default)]
pub struct SocialNetwork {
    graph: SocialGraph,
    directory: NameTree<NodeId>,
    config: NetworkConfig,
}

impl SocialNetwork {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            graph: SocialGraph::new(),
            directory: NameTree::new(),
            config,
        }
    }

    pub fn graph(&self) -> &SocialGraph {
        &self.graph
    }

    pub fn directory(&self) -> &NameTree<NodeId> {
        &self.directory
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    fn user(&self, id: NodeId) -> Result<&User> {
        self.graph.node_checked(id).map(|node| node.user())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accounts
    // ─────────────────────────────────────────────────────────────────────

    /// Registers a new user in both the graph and the name tree.
    pub fn signup(
        &mut self,
        name: &str,
        password: &str,
        recovery_question: &str,
        recovery_answer: &str,
        city: &str,
    ) -> Result<NodeId> {
        if name.trim().is_empty() {
            return Err(GraphError::InvalidName);
        }
        if self.directory.contains_key(name) {
            warn!("Signup refused, user '{}' already exists", name);
            return Err(GraphError::DuplicateName(name.to_string()));
        }
        self.config.password.validate(password)?;

        let user = User::new(name, password, recovery_question, recovery_answer, city);
        let id = self.graph.add_user(user);
        self.directory.insert(name, id)?;

        info!("User '{}' signed up", name);
        Ok(id)
    }

    /// Single password check. Success refreshes the user's last login.
    pub fn login(&mut self, name: &str, password: &str) -> Result<NodeId> {
        let id = self
            .graph
            .find_user(name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))?;

        let user = self.graph.user_mut(id)?;
        if !user.check_password(password) {
            warn!("Failed login for '{}'", name);
            return Err(GraphError::InvalidCredentials);
        }

        user.record_login(Timestamp::now());
        debug!("'{}' logged in", name);
        Ok(id)
    }

    /// Tries passwords in order, up to `max_login_attempts` of them.
    ///
    /// Running out of attempts (or of passwords) yields
    /// [`LoginOutcome::LockedOut`] with the user's recovery question.
    pub fn login_with_attempts<'a, I>(&mut self, name: &str, attempts: I) -> Result<LoginOutcome>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let limit = self.config.max_login_attempts as usize;
        for password in attempts.into_iter().take(limit) {
            match self.login(name, password) {
                Ok(id) => return Ok(LoginOutcome::LoggedIn(id)),
                Err(GraphError::InvalidCredentials) => continue,
                Err(err) => return Err(err),
            }
        }

        let id = self
            .graph
            .find_user(name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))?;
        Ok(LoginOutcome::LockedOut {
            recovery_question: self.user(id)?.recovery_question.clone(),
        })
    }

    pub fn recovery_question(&self, id: NodeId) -> Result<&str> {
        Ok(self.user(id)?.recovery_question.as_str())
    }

    /// Resets the password after checking the recovery answer.
    pub fn recover_password(&mut self, id: NodeId, answer: &str, new_password: &str) -> Result<()> {
        if !self.user(id)?.check_recovery_answer(answer) {
            warn!("Wrong recovery answer for {:?}", id);
            return Err(GraphError::InvalidRecoveryAnswer);
        }
        self.reset_password(id, new_password)
    }

    /// Replaces a password, subject to the password policy.
    pub fn reset_password(&mut self, id: NodeId, new_password: &str) -> Result<()> {
        self.user(id)?;
        self.config.password.validate(new_password)?;
        self.graph.user_mut(id)?.set_password(new_password);
        info!("Password reset for {:?}", id);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Activity
    // ─────────────────────────────────────────────────────────────────────

    pub fn create_post(&mut self, author: NodeId, content: &str) -> Result<()> {
        self.graph.user_mut(author)?.create_post(content);
        Ok(())
    }

    /// Delivers a message and notifies the recipient.
    pub fn send_message(&mut self, from: NodeId, to: NodeId, content: &str) -> Result<()> {
        let sender = self.user(from)?.name.clone();
        self.graph.user_mut(to)?.receive_message(&sender, content);
        debug!("Message from {} delivered to {:?}", sender, to);
        Ok(())
    }

    pub fn send_follow_request(&mut self, requester: NodeId, target: NodeId) -> Result<()> {
        self.graph.send_follow_request(requester, target)
    }

    pub fn accept_follow_request(&mut self, target: NodeId, ordinal: usize) -> Result<NodeId> {
        self.graph.accept_follow_request(target, ordinal)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    /// Usernames of followers, in acceptance order.
    pub fn followers(&self, id: NodeId) -> Result<Vec<&str>> {
        Ok(self.user(id)?.followers.iter().map(String::as_str).collect())
    }

    /// Usernames this user follows, in acceptance order.
    pub fn following(&self, id: NodeId) -> Result<Vec<&str>> {
        Ok(self.user(id)?.following.iter().map(String::as_str).collect())
    }

    /// Posts of everyone this user follows.
    ///
    /// One entry per followed user in follow order, each with that user's
    /// posts newest first.
    pub fn timeline(&self, id: NodeId) -> Result<Vec<TimelineEntry<'_>>> {
        let user = self.user(id)?;
        let entries = user
            .following
            .iter()
            .filter_map(|name| {
                let followed = self.directory.get(name).and_then(|&f| self.graph.user(f))?;
                Some(TimelineEntry {
                    author: followed.name.as_str(),
                    posts: followed.posts.iter().collect(),
                })
            })
            .collect();
        Ok(entries)
    }

    /// The user's own posts, newest first.
    pub fn newsfeed(&self, id: NodeId) -> Result<Vec<&Post>> {
        Ok(self.user(id)?.posts.iter().collect())
    }

    /// Notifications, oldest first.
    pub fn notifications(&self, id: NodeId) -> Result<Vec<&Notification>> {
        Ok(self.user(id)?.notifications.iter().collect())
    }

    /// Received messages, newest first.
    pub fn messages(&self, id: NodeId) -> Result<Vec<&Message>> {
        Ok(self.user(id)?.messages.iter().collect())
    }

    /// Usernames of accepted connections.
    pub fn connections(&self, id: NodeId) -> Result<Vec<&str>> {
        let ids = self.graph.connections(id)?;
        Ok(self.graph.names(&ids))
    }

    /// Usernames with a pending request, in ordinal order.
    pub fn pending_requests(&self, id: NodeId) -> Result<Vec<&str>> {
        let ids = self.graph.pending_requests(id)?;
        Ok(self.graph.names(&ids))
    }

    /// Looks a user up through the name tree.
    pub fn search_user(&self, name: &str) -> Option<&User> {
        self.directory.get(name).and_then(|&id| self.graph.user(id))
    }

    /// Handle for a username, via the name tree.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.directory.get(name).copied()
    }

    /// Every user, sorted by name.
    pub fn all_users(&self) -> Vec<&User> {
        self.directory
            .in_order()
            .into_iter()
            .filter_map(|(_, &id)| self.graph.user(id))
            .collect()
    }

    pub fn profile_info(&self, id: NodeId) -> Result<String> {
        Ok(self.user(id)?.profile_info())
    }

    pub fn suggest_mutual_friends(&self, id: NodeId) -> Result<Vec<Suggestion>> {
        self.graph.suggest_mutual_friends(id)
    }

    /// Breadth-first visit order as usernames.
    pub fn bfs(&self, start: NodeId) -> Result<Vec<&str>> {
        let order = self.graph.bfs(start)?;
        Ok(self.graph.names(&order))
    }

    /// Depth-first visit order as usernames.
    pub fn dfs(&self, start: NodeId) -> Result<Vec<&str>> {
        let order = self.graph.dfs(start)?;
        Ok(self.graph.names(&order))
    }

    /// Fewest-hop chain of connections as usernames.
    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<Option<Vec<&str>>> {
        Ok(self
            .graph
            .shortest_path(from, to)?
            .map(|path| self.graph.names(&path)))
    }
}
