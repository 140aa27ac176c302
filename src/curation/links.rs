//! Built-in curator: deterministic search links

use super::{normalize_subject, CurationError, Curator};
use crate::storage::{ResourceKind, ResourceLink};
use async_trait::async_trait;

struct LinkTemplate {
    kind: ResourceKind,
    title: &'static str,
    url: &'static str,
    description: &'static str,
}

// `{q}` is replaced with the URL-encoded query
const TEMPLATES: &[LinkTemplate] = &[
    LinkTemplate {
        kind: ResourceKind::Documentation,
        title: "Official documentation",
        url: "https://duckduckgo.com/?q={q}+official+documentation",
        description: "Reference material and guides straight from the source",
    },
    LinkTemplate {
        kind: ResourceKind::Video,
        title: "Video lectures",
        url: "https://www.youtube.com/results?search_query={q}+lecture",
        description: "Recorded lectures and walkthroughs",
    },
    LinkTemplate {
        kind: ResourceKind::Course,
        title: "Online courses",
        url: "https://www.coursera.org/search?query={q}",
        description: "Structured courses with exercises",
    },
    LinkTemplate {
        kind: ResourceKind::Practice,
        title: "Practice problems",
        url: "https://duckduckgo.com/?q={q}+practice+problems",
        description: "Exercises to test your understanding",
    },
    LinkTemplate {
        kind: ResourceKind::Community,
        title: "Community Q&A",
        url: "https://stackoverflow.com/search?q={q}",
        description: "Questions and answers from other learners",
    },
];

/// Builds one search link per resource kind
#[derive(Debug, Clone, Default)]
pub struct LinkCurator;

impl LinkCurator {
    pub fn new() -> Self {
        Self
    }

    pub fn links_for(&self, subject: &str) -> Vec<ResourceLink> {
        let query = urlencoding::encode(subject);
        TEMPLATES
            .iter()
            .map(|t| ResourceLink {
                title: format!("{}: {}", subject, t.title),
                url: t.url.replace("{q}", &query),
                kind: t.kind,
                description: t.description.to_string(),
            })
            .collect()
    }
}

#[async_trait]
impl Curator for LinkCurator {
    fn name(&self) -> &str {
        "links"
    }

    async fn curate(&self, subject: &str) -> Result<Vec<ResourceLink>, CurationError> {
        let subject = normalize_subject(subject)?;
        tracing::debug!(subject = %subject, "Curating search links");
        Ok(self.links_for(&subject))
    }
}
