//! User profiles and the records they accumulate.
//!
//! A [`User`] is created once at signup and never removed. Its logs only
//! grow: posts and messages are stacks (newest first when read),
//! notifications and the follower/following lists are queues (oldest first).

use crate::queue::OrderedQueue;
use crate::stack::OrderedStack;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A post written by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub content: String,
    pub author: String,
    pub timestamp: Timestamp,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Post by {}: {}\nTime: {}",
            self.author, self.content, self.timestamp
        )
    }
}

/// A direct message received by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub content: String,
    /// Carried for rendering; nothing marks a message as read.
    pub is_read: bool,
    pub timestamp: Timestamp,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}{}", self.sender, self.content, read_marker(self.is_read))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub content: String,
    pub is_read: bool,
    pub timestamp: Timestamp,
}

impl Notification {
    /// Creates an unread notification stamped with the current time.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_read: false,
            timestamp: Timestamp::now(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.content, read_marker(self.is_read))
    }
}

fn read_marker(is_read: bool) -> &'static str {
    if is_read {
        " (Read)"
    } else {
        " (Unread)"
    }
}

/// A user profile.
///
/// `followers` and `following` hold usernames, which are unique and never
/// change, rather than references to other profiles. Credentials are left
/// out of the serialized form.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub name: String,
    #[serde(skip_serializing)]
    password: String,
    pub recovery_question: String,
    #[serde(skip_serializing)]
    recovery_answer: String,
    pub city: String,
    pub last_login: Timestamp,

    pub posts: OrderedStack<Post>,
    pub messages: OrderedStack<Message>,
    pub notifications: OrderedQueue<Notification>,
    pub followers: OrderedQueue<String>,
    pub following: OrderedQueue<String>,
}

impl User {
    /// Creates a profile with empty logs. `last_login` starts at creation time.
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        recovery_question: impl Into<String>,
        recovery_answer: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            recovery_question: recovery_question.into(),
            recovery_answer: recovery_answer.into(),
            city: city.into(),
            last_login: Timestamp::now(),
            posts: OrderedStack::new(),
            messages: OrderedStack::new(),
            notifications: OrderedQueue::new(),
            followers: OrderedQueue::new(),
            following: OrderedQueue::new(),
        }
    }

    /// Plain string comparison; there is no hashing.
    pub fn check_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    pub fn check_recovery_answer(&self, candidate: &str) -> bool {
        self.recovery_answer == candidate
    }

    /// Replaces the password. Policy checks belong to the caller.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn record_login(&mut self, at: Timestamp) {
        self.last_login = at;
    }

    /// Pushes a new post authored by this user.
    pub fn create_post(&mut self, content: impl Into<String>) {
        self.posts.push(Post {
            content: content.into(),
            author: self.name.clone(),
            timestamp: Timestamp::now(),
        });
    }

    /// Stores an incoming message and queues a notification about it.
    pub fn receive_message(&mut self, sender: &str, content: impl Into<String>) {
        self.messages.push(Message {
            sender: sender.to_string(),
            content: content.into(),
            is_read: false,
            timestamp: Timestamp::now(),
        });
        self.notify(format!("New message from {}", sender));
    }

    pub fn notify(&mut self, content: impl Into<String>) {
        self.notifications.enqueue(Notification::new(content));
    }

    /// Summary used by search results and the full user listing.
    pub fn profile_info(&self) -> String {
        format!(
            "Username: {}\nCity: {}\nLast Login: {}",
            self.name, self.city, self.last_login
        )
    }
}
