//! Support and research resources

use serde::Serialize;

/// Kind of organisation behind a resource
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ResourceType {
    Organization,
    Information,
    Support,
    Research,
    Hotline,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Organization => write!(f, "Organization"),
            ResourceType::Information => write!(f, "Information"),
            ResourceType::Support => write!(f, "Support"),
            ResourceType::Research => write!(f, "Research"),
            ResourceType::Hotline => write!(f, "Hotline"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Resource {
    pub id: u32,
    pub title: &'static str,
    pub resource_type: ResourceType,
    pub description: &'static str,
    pub url: &'static str,
    pub tags: &'static [&'static str],
}

impl Resource {
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.trim().to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }
}

static RESOURCES: &[Resource] = &[
    Resource {
        id: 1,
        title: "National Organization for Rare Disorders (NORD)",
        resource_type: ResourceType::Organization,
        description: "A patient advocacy organization dedicated to individuals with rare \
                      diseases and the organizations that serve them.",
        url: "https://rarediseases.org/",
        tags: &["Support", "Research", "Advocacy"],
    },
    Resource {
        id: 2,
        title: "Genetic and Rare Diseases Information Center",
        resource_type: ResourceType::Information,
        description: "Provides reliable, accessible information about rare and genetic \
                      diseases to patients, families, and healthcare providers.",
        url: "https://rarediseases.info.nih.gov/",
        tags: &["Information", "Research", "Government"],
    },
    Resource {
        id: 3,
        title: "Global Genes",
        resource_type: ResourceType::Support,
        description: "A rare disease patient advocacy organization that connects, empowers, \
                      and inspires the global rare disease community.",
        url: "https://globalgenes.org/",
        tags: &["Support", "Community", "Education"],
    },
    Resource {
        id: 4,
        title: "Rare Disease Clinical Research Network",
        resource_type: ResourceType::Research,
        description: "A network of research centers focused on advancing medical research on \
                      rare diseases.",
        url: "https://www.rarediseasesnetwork.org/",
        tags: &["Research", "Clinical Trials", "Medical"],
    },
];

pub fn resources() -> &'static [Resource] {
    RESOURCES
}

/// Resources carrying a tag (case-insensitive)
pub fn resources_tagged(tag: &str) -> Vec<&'static Resource> {
    RESOURCES.iter().filter(|r| r.has_tag(tag)).collect()
}
