use std::collections::HashMap;

use crate::models::{Client, Project};
use crate::reconcile::normalize::{client_key, label_key, ClientKey};

/// How strictly ledger records are matched to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisambiguationMode {
    /// The client owns exactly one project: every record for the client belongs to it.
    Single,
    /// The client owns several projects: records must name the project in their title.
    Multi,
}

/// A project together with its client key and disambiguation mode.
#[derive(Debug, Clone)]
pub struct Assignment<'a> {
    pub project: &'a Project,
    pub key: ClientKey,
    pub mode: DisambiguationMode,
}

#[derive(Debug, Default)]
pub struct ClientGroups<'a> {
    by_key: HashMap<ClientKey, Vec<&'a Project>>,
    assignments: Vec<Assignment<'a>>,
}

impl<'a> ClientGroups<'a> {
    pub fn contains_key(&self, key: &ClientKey) -> bool {
        !key.is_empty() && self.by_key.contains_key(key)
    }

    /// Assignments in input order.
    pub fn assignments(&self) -> &[Assignment<'a>] {
        &self.assignments
    }

    pub fn client_count(&self) -> usize {
        self.by_key.len()
    }
}

/// Group projects by the name segment of their client label.
pub fn group(projects: &[Project]) -> ClientGroups<'_> {
    group_with_clients(&[], projects)
}

/// Like [`group`], but a project with a blank client label falls back to the
/// display name of the client it references.
pub fn group_with_clients<'a>(clients: &[Client], projects: &'a [Project]) -> ClientGroups<'a> {
    let client_names: HashMap<&str, &str> = clients
        .iter()
        .map(|c| (c.id.as_str(), c.display_name.as_str()))
        .collect();

    let keys: Vec<ClientKey> = projects
        .iter()
        .map(|project| {
            let key = label_key(&project.client_display_label);
            if !key.is_empty() {
                return key;
            }
            client_names
                .get(project.client_id.as_str())
                .map(|name| client_key(name))
                .unwrap_or_default()
        })
        .collect();

    let mut by_key: HashMap<ClientKey, Vec<&'a Project>> = HashMap::new();
    for (project, key) in projects.iter().zip(&keys) {
        by_key.entry(key.clone()).or_default().push(project);
    }

    let assignments = projects
        .iter()
        .zip(keys)
        .map(|(project, key)| {
            let mode = if by_key.get(&key).map_or(0, Vec::len) > 1 {
                DisambiguationMode::Multi
            } else {
                DisambiguationMode::Single
            };
            Assignment { project, key, mode }
        })
        .collect();

    ClientGroups {
        by_key,
        assignments,
    }
}
