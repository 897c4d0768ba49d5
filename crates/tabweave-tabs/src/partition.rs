//! Content partitioning
//!
//! Walks the container's direct children and cuts them into sections, one
//! per heading of the delimiting level. Headings nested deeper in the content
//! never start a section.

use tabweave_dom::{Document, NodeId};

pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// A heading and the nodes that follow it up to the next heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: NodeId,
    pub content: Vec<NodeId>,
}

/// Delimiting heading tag, taken from the container's first element child.
/// `None` means the container does not qualify for a tab interface.
pub fn heading_tag(doc: &Document, container: NodeId) -> Option<&'static str> {
    let first = doc.first_element_child(container)?;
    let name = doc.tag_name(first)?;
    HEADING_TAGS.iter().copied().find(|tag| *tag == name)
}

/// Split the container's children on `tag`. Nodes ahead of the first
/// heading belong to no section.
pub fn partition(doc: &Document, container: NodeId, tag: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    for &child in doc.children(container) {
        if doc.tag_name(child) == Some(tag) {
            sections.push(Section {
                heading: child,
                content: Vec::new(),
            });
        } else if let Some(current) = sections.last_mut() {
            current.content.push(child);
        }
    }
    sections
}
