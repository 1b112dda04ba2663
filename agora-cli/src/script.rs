//! Replayable scripts of network operations.
//!
//! A script is a JSON array of steps tagged by `op`. Users are referred to
//! by name and resolved through the name tree at each step, so a step can
//! only touch users signed up earlier in the script.
//!
//! ```json
//! [
//!   { "op": "signup", "name": "amy", "password": "Secret12!" },
//!   { "op": "signup", "name": "bob", "password": "Secret12!" },
//!   { "op": "follow", "from": "amy", "to": "bob" },
//!   { "op": "accept", "user": "bob", "ordinal": 1 },
//!   { "op": "show", "user": "bob", "view": "followers" }
//! ]
//! ```

use agora_graph::{GraphError, LoginOutcome, NodeId, SocialNetwork};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Cannot read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid script: {0}")]
    Json(#[from] serde_json::Error),
}

/// One operation in a script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Signup {
        name: String,
        password: String,
        #[serde(default)]
        question: String,
        #[serde(default)]
        answer: String,
        #[serde(default)]
        city: String,
    },
    Login {
        name: String,
        password: String,
    },
    /// Several passwords tried in a row, as an interactive prompt would.
    LoginAttempts {
        name: String,
        passwords: Vec<String>,
    },
    Recover {
        name: String,
        answer: String,
        new_password: String,
    },
    Post {
        user: String,
        content: String,
    },
    Message {
        from: String,
        to: String,
        content: String,
    },
    Follow {
        from: String,
        to: String,
    },
    Accept {
        user: String,
        ordinal: usize,
    },
    Show {
        user: String,
        view: View,
    },
    Search {
        name: String,
    },
    ListUsers,
    Suggest {
        user: String,
    },
    Bfs {
        user: String,
    },
    Dfs {
        user: String,
    },
    Path {
        from: String,
        to: String,
    },
    Stats,
}

/// Per-user listings for the `show` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Profile,
    Followers,
    Following,
    Timeline,
    Newsfeed,
    Notifications,
    Messages,
    Connections,
    Pending,
}

impl Step {
    /// Short operation name for reports.
    pub fn op(&self) -> &'static str {
        match self {
            Step::Signup { .. } => "signup",
            Step::Login { .. } => "login",
            Step::LoginAttempts { .. } => "login_attempts",
            Step::Recover { .. } => "recover",
            Step::Post { .. } => "post",
            Step::Message { .. } => "message",
            Step::Follow { .. } => "follow",
            Step::Accept { .. } => "accept",
            Step::Show { .. } => "show",
            Step::Search { .. } => "search",
            Step::ListUsers => "list_users",
            Step::Suggest { .. } => "suggest",
            Step::Bfs { .. } => "bfs",
            Step::Dfs { .. } => "dfs",
            Step::Path { .. } => "path",
            Step::Stats => "stats",
        }
    }
}

/// Rendered result of a successful step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub summary: String,
    pub lines: Vec<String>,
}

impl Rendered {
    fn summary(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            lines: Vec::new(),
        }
    }

    fn listing(summary: impl Into<String>, lines: Vec<String>, empty: &str) -> Self {
        let lines = if lines.is_empty() {
            vec![empty.to_string()]
        } else {
            lines
        };
        Self {
            summary: summary.into(),
            lines,
        }
    }
}

/// Outcome of one step, in script order.
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub op: &'static str,
    #[serde(flatten)]
    pub result: StepResult,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StepResult {
    Ok(Rendered),
    Err { error: String },
}

/// Parses a script file.
pub fn load(path: &Path) -> Result<Vec<Step>, ScriptError> {
    parse(&fs::read_to_string(path)?)
}

pub fn parse(raw: &str) -> Result<Vec<Step>, ScriptError> {
    Ok(serde_json::from_str(raw)?)
}

/// Runs every step. A failing step is recorded and the replay carries on.
pub fn replay(network: &mut SocialNetwork, steps: &[Step]) -> Vec<StepReport> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let result = match execute(network, step) {
                Ok(rendered) => StepResult::Ok(rendered),
                Err(err) => {
                    tracing::debug!("Step {} ({}) failed: {}", index + 1, step.op(), err);
                    StepResult::Err {
                        error: err.to_string(),
                    }
                }
            };
            StepReport {
                step: index + 1,
                op: step.op(),
                result,
            }
        })
        .collect()
}

fn resolve(network: &SocialNetwork, name: &str) -> Result<NodeId, GraphError> {
    network
        .lookup(name)
        .ok_or_else(|| GraphError::NotFound(name.to_string()))
}

fn numbered<I, T>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect()
}

fn execute(network: &mut SocialNetwork, step: &Step) -> Result<Rendered, GraphError> {
    let rendered = match step {
        Step::Signup {
            name,
            password,
            question,
            answer,
            city,
        } => {
            network.signup(name, password, question, answer, city)?;
            Rendered::summary(format!("Signed up {}", name))
        }
        Step::Login { name, password } => {
            network.login(name, password)?;
            Rendered::summary(format!("{} logged in", name))
        }
        Step::LoginAttempts { name, passwords } => {
            match network.login_with_attempts(name, passwords.iter().map(String::as_str))? {
                LoginOutcome::LoggedIn(_) => Rendered::summary(format!("{} logged in", name)),
                LoginOutcome::LockedOut { recovery_question } => Rendered {
                    summary: format!("{} ran out of attempts", name),
                    lines: vec![format!("Security question: {}", recovery_question)],
                },
            }
        }
        Step::Recover {
            name,
            answer,
            new_password,
        } => {
            let id = resolve(network, name)?;
            network.recover_password(id, answer, new_password)?;
            Rendered::summary(format!("Password reset for {}", name))
        }
        Step::Post { user, content } => {
            let id = resolve(network, user)?;
            network.create_post(id, content)?;
            Rendered::summary(format!("{} posted", user))
        }
        Step::Message { from, to, content } => {
            let sender = resolve(network, from)?;
            let recipient = resolve(network, to)?;
            network.send_message(sender, recipient, content)?;
            Rendered::summary(format!("Message sent from {} to {}", from, to))
        }
        Step::Follow { from, to } => {
            let requester = resolve(network, from)?;
            let target = resolve(network, to)?;
            network.send_follow_request(requester, target)?;
            Rendered::summary(format!("Follow request sent from {} to {}", from, to))
        }
        Step::Accept { user, ordinal } => {
            let id = resolve(network, user)?;
            let requester = network.accept_follow_request(id, *ordinal)?;
            let requester_name = network
                .graph()
                .user(requester)
                .map(|u| u.name.clone())
                .unwrap_or_default();
            Rendered::summary(format!("{} accepted {}", user, requester_name))
        }
        Step::Show { user, view } => show(network, user, *view)?,
        Step::Search { name } => match network.search_user(name) {
            Some(found) => Rendered {
                summary: "User found".to_string(),
                lines: found.profile_info().lines().map(str::to_string).collect(),
            },
            None => Rendered::summary("User not found"),
        },
        Step::ListUsers => {
            let lines = network
                .all_users()
                .iter()
                .map(|user| user.profile_info().replace('\n', " | "))
                .collect();
            Rendered::listing("User list", lines, "No users.")
        }
        Step::Suggest { user } => {
            let id = resolve(network, user)?;
            let lines = network
                .suggest_mutual_friends(id)?
                .into_iter()
                .map(|s| format!("{} (Mutual Connections: {})", s.name, s.mutual))
                .collect();
            Rendered::listing(
                format!("Mutual friend suggestions for {}", user),
                lines,
                "No suggestions.",
            )
        }
        Step::Bfs { user } => {
            let id = resolve(network, user)?;
            Rendered::summary(format!("BFS Traversal: {}", network.bfs(id)?.join(" ")))
        }
        Step::Dfs { user } => {
            let id = resolve(network, user)?;
            Rendered::summary(format!("DFS Traversal: {}", network.dfs(id)?.join(" ")))
        }
        Step::Path { from, to } => {
            let start = resolve(network, from)?;
            let goal = resolve(network, to)?;
            match network.shortest_path(start, goal)? {
                Some(path) => Rendered::summary(format!("Path: {}", path.join(" -> "))),
                None => Rendered::summary(format!("No path from {} to {}", from, to)),
            }
        }
        Step::Stats => {
            let stats = network.graph().stats();
            Rendered {
                summary: "Network statistics".to_string(),
                lines: vec![
                    format!("Users: {}", stats.users),
                    format!("Connections: {}", stats.connections),
                    format!("Pending requests: {}", stats.pending_requests),
                    format!("Name tree depth: {}", network.directory().depth()),
                    format!(
                        "Password minimum length: {}",
                        network.config().password.min_length
                    ),
                    format!(
                        "Login attempts allowed: {}",
                        network.config().max_login_attempts
                    ),
                ],
            }
        }
    };
    Ok(rendered)
}

fn show(network: &SocialNetwork, user: &str, view: View) -> Result<Rendered, GraphError> {
    let id = resolve(network, user)?;

    let rendered = match view {
        View::Profile => Rendered {
            summary: format!("Profile of {}", user),
            lines: network
                .profile_info(id)?
                .lines()
                .map(str::to_string)
                .collect(),
        },
        View::Followers => Rendered::listing(
            "--- Followers ---",
            numbered(network.followers(id)?),
            "No followers yet.",
        ),
        View::Following => Rendered::listing(
            "--- Following ---",
            numbered(network.following(id)?),
            "Not following anyone yet.",
        ),
        View::Timeline => {
            let mut lines = Vec::new();
            for entry in network.timeline(id)? {
                lines.push(format!("Posts by {}:", entry.author));
                if entry.posts.is_empty() {
                    lines.push("No posts yet.".to_string());
                }
                lines.extend(entry.posts.iter().map(|post| post.to_string()));
            }
            Rendered::listing(
                "--- Timeline ---",
                lines,
                "Follow some users to see their posts!",
            )
        }
        View::Newsfeed => Rendered::listing(
            "--- Your Posts ---",
            network
                .newsfeed(id)?
                .iter()
                .map(|post| post.to_string())
                .collect(),
            "No posts yet.",
        ),
        View::Notifications => Rendered::listing(
            "--- Notifications ---",
            numbered(network.notifications(id)?),
            "No notifications.",
        ),
        View::Messages => Rendered::listing(
            "--- Messages ---",
            numbered(network.messages(id)?),
            "No messages.",
        ),
        View::Connections => Rendered::listing(
            format!("Connections for {}:", user),
            numbered(network.connections(id)?),
            "No connections.",
        ),
        View::Pending => Rendered::listing(
            format!("Pending Follow Requests for {}:", user),
            numbered(network.pending_requests(id)?),
            "No pending requests.",
        ),
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_graph::NetworkConfig;

    const SCRIPT: &str = r#"[
        { "op": "signup", "name": "amy", "password": "Secret12!", "city": "Porto" },
        { "op": "signup", "name": "bob", "password": "Secret12!" },
        { "op": "signup", "name": "cat", "password": "Secret12!" },
        { "op": "follow", "from": "amy", "to": "cat" },
        { "op": "follow", "from": "bob", "to": "cat" },
        { "op": "accept", "user": "cat", "ordinal": 2 },
        { "op": "show", "user": "cat", "view": "pending" },
        { "op": "accept", "user": "cat", "ordinal": 5 },
        { "op": "bfs", "user": "cat" },
        { "op": "list_users" }
    ]"#;

    fn ok(report: &StepReport) -> &Rendered {
        match &report.result {
            StepResult::Ok(rendered) => rendered,
            StepResult::Err { error } => panic!("step {} failed: {}", report.step, error),
        }
    }

    #[test]
    fn test_parse_steps() {
        let steps = parse(SCRIPT).unwrap();
        assert_eq!(steps.len(), 10);
        assert_eq!(
            steps[5],
            Step::Accept {
                user: "cat".to_string(),
                ordinal: 2
            }
        );
        assert_eq!(steps[9], Step::ListUsers);
        assert!(matches!(&steps[1], Step::Signup { city, .. } if city.is_empty()));
    }

    #[test]
    fn test_parse_rejects_unknown_op() {
        assert!(parse(r#"[{ "op": "delete_user", "name": "amy" }]"#).is_err());
    }

    #[test]
    fn test_replay_continues_after_failure() {
        let steps = parse(SCRIPT).unwrap();
        let mut network = SocialNetwork::default();
        let reports = replay(&mut network, &steps);

        assert_eq!(reports.len(), steps.len());
        assert_eq!(ok(&reports[5]).summary, "cat accepted bob");
        assert_eq!(ok(&reports[6]).lines, vec!["1. amy"]);

        match &reports[7].result {
            StepResult::Err { error } => assert!(error.contains("position 5")),
            StepResult::Ok(_) => panic!("out-of-range accept should fail"),
        }

        assert_eq!(ok(&reports[8]).summary, "BFS Traversal: cat bob");
        assert_eq!(ok(&reports[9]).lines.len(), 3);
    }

    #[test]
    fn test_unknown_user_reported() {
        let steps = parse(r#"[{ "op": "show", "user": "ghost", "view": "followers" }]"#).unwrap();
        let reports = replay(&mut SocialNetwork::default(), &steps);
        match &reports[0].result {
            StepResult::Err { error } => assert_eq!(error, "User not found: ghost"),
            StepResult::Ok(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_empty_listing_placeholder() {
        let steps = parse(
            r#"[
                { "op": "signup", "name": "amy", "password": "Secret12!" },
                { "op": "show", "user": "amy", "view": "timeline" }
            ]"#,
        )
        .unwrap();
        let reports = replay(&mut SocialNetwork::default(), &steps);
        assert_eq!(
            ok(&reports[1]).lines,
            vec!["Follow some users to see their posts!"]
        );
    }

    #[test]
    fn test_stats_reports_active_config() {
        let mut config = NetworkConfig::default();
        config.password.min_length = 12;
        config.max_login_attempts = 5;
        let mut network = SocialNetwork::new(config);

        let steps = parse(r#"[{ "op": "stats" }]"#).unwrap();
        let reports = replay(&mut network, &steps);
        let lines = &ok(&reports[0]).lines;
        assert_eq!(lines[0], "Users: 0");
        assert!(lines.contains(&"Password minimum length: 12".to_string()));
        assert!(lines.contains(&"Login attempts allowed: 5".to_string()));
    }

    #[test]
    fn test_demo_script() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/network.json");
        let steps = load(&path).unwrap();
        let reports = replay(&mut SocialNetwork::default(), &steps);

        let failed: Vec<_> = reports
            .iter()
            .filter(|r| matches!(r.result, StepResult::Err { .. }))
            .map(|r| r.op)
            .collect();
        assert_eq!(failed, vec!["signup", "accept"]);

        let summaries: Vec<_> = reports
            .iter()
            .filter_map(|r| match &r.result {
                StepResult::Ok(rendered) => Some(rendered.summary.as_str()),
                StepResult::Err { .. } => None,
            })
            .collect();
        assert!(summaries.contains(&"BFS Traversal: amy cat bob dan"));
        assert!(summaries.contains(&"Path: amy -> cat -> bob -> dan"));
    }

    #[test]
    fn test_report_json_shape() {
        let report = StepReport {
            step: 1,
            op: "stats",
            result: StepResult::Err {
                error: "boom".to_string(),
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["step"], 1);
        assert_eq!(json["error"], "boom");
    }
}
