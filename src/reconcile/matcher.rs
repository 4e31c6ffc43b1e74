use crate::models::Project;
use crate::reconcile::group::DisambiguationMode;
use crate::reconcile::normalize::normalize;

/// Decides whether a record already filtered to a project's client belongs to
/// that project, based on the record's title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Every record of the client belongs to the project.
    Any,
    /// The normalized title must contain the normalized project name.
    TitleContains(String),
}

impl Matcher {
    pub fn for_project(project: &Project, mode: DisambiguationMode) -> Self {
        match mode {
            DisambiguationMode::Single => Matcher::Any,
            DisambiguationMode::Multi => Matcher::TitleContains(normalize(&project.display_name)),
        }
    }

    pub fn accepts(&self, title: &str) -> bool {
        match self {
            Matcher::Any => true,
            // An unnamed project would otherwise claim every title.
            Matcher::TitleContains(name) if name.is_empty() => false,
            Matcher::TitleContains(name) => normalize(title).contains(name.as_str()),
        }
    }
}
