use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ModelError;
use super::interview::Interview;
use super::question::Question;
use crate::form::FormValues;

/// A survey project grouping interviews and the questions asked in them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub interviews: Vec<Interview>,
    pub questions: Vec<Question>,
}

impl Project {
    /// Creates an empty project.
    ///
    /// Generates `id` as `"{slug}-{YYYYMMDD-HHMMSS}"`.
    pub fn new(name: String, description: Option<String>) -> Result<Self, ModelError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ModelError::MissingField("project name"));
        }
        let now = Utc::now();
        let id = format!("{}-{}", slugify(&name), now.format("%Y%m%d-%H%M%S"));
        Ok(Self {
            id,
            name,
            description: description.filter(|d| !d.trim().is_empty()),
            created_at: now,
            interviews: Vec::new(),
            questions: Vec::new(),
        })
    }

    /// Builds a project from the `name` and `description` fields.
    pub fn from_values(values: &FormValues) -> Result<Self, ModelError> {
        Self::new(
            values.get("name").to_string(),
            values.non_empty("description").map(str::to_string),
        )
    }

    pub fn add_interview(&mut self, interview: Interview) {
        self.interviews.push(interview);
    }

    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }
}

/// Lowercases `name` and collapses every run of non-alphanumerics into `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("project");
    }
    slug
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn new_trims_name_and_generates_id() {
        let project = Project::new("  Pilot Study ".into(), None).unwrap();
        assert_eq!(project.name, "Pilot Study");
        assert!(project.id.starts_with("pilot-study-"));
        assert!(project.interviews.is_empty());
        assert!(project.questions.is_empty());
    }

    #[test]
    fn new_rejects_blank_name() {
        assert_eq!(
            Project::new("   ".into(), None),
            Err(ModelError::MissingField("project name"))
        );
    }

    #[test]
    fn blank_description_becomes_none() {
        let project = Project::new("A".into(), Some("  ".into())).unwrap();
        assert_eq!(project.description, None);
    }

    #[test]
    fn from_values_reads_fields() {
        let values: FormValues = [("name", "Onboarding"), ("description", "Q3 cohort")]
            .into_iter()
            .collect();
        let project = Project::from_values(&values).unwrap();
        assert_eq!(project.name, "Onboarding");
        assert_eq!(project.description.as_deref(), Some("Q3 cohort"));
    }

    mod slugs {
        use super::*;

        #[test]
        fn collapses_separators() {
            assert_eq!(slugify("Hello,  World!"), "hello-world");
        }

        #[test]
        fn falls_back_when_nothing_survives() {
            assert_eq!(slugify("!!!"), "project");
        }

        #[quickcheck]
        fn slug_is_path_safe(name: String) -> bool {
            let slug = slugify(&name);
            !slug.is_empty()
                && !slug.starts_with('-')
                && !slug.ends_with('-')
                && !slug.contains("--")
                && slug
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        }
    }
}
