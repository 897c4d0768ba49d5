//! HTML fragment import
//!
//! Parsing is delegated to `scraper` (html5ever); the resulting tree is
//! copied into the arena. Doctypes and processing instructions are dropped.

use scraper::{ElementRef, Html, Node as HtmlNode};

use crate::document::Document;
use crate::node::NodeId;

impl Document {
    /// Build a document whose root holds the parsed fragment
    pub fn parse_fragment(html: &str) -> Self {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append_html(root, html);
        doc
    }

    /// Parse `html` as body content and append the result to `parent`.
    /// Returns the top-level nodes that were appended.
    pub fn append_html(&mut self, parent: NodeId, html: &str) -> Vec<NodeId> {
        let fragment = Html::parse_fragment(html);
        let mut appended = Vec::new();
        // parse_fragment wraps the content in a synthetic <html> element
        let wrapper = fragment.root_element();
        for child in wrapper.children() {
            if let Some(id) = self.import(child.value(), ElementRef::wrap(child)) {
                if self.append_child(parent, id).is_ok() {
                    appended.push(id);
                }
            }
        }
        tracing::trace!(parent = %parent, nodes = appended.len(), "Imported HTML fragment");
        appended
    }

    fn import(&mut self, node: &HtmlNode, element: Option<ElementRef<'_>>) -> Option<NodeId> {
        match node {
            HtmlNode::Text(text) => Some(self.create_text(text)),
            HtmlNode::Comment(comment) => Some(self.create_comment(comment)),
            HtmlNode::Element(data) => {
                let id = self.create_element(data.name());
                for (name, value) in data.attrs() {
                    // Freshly created element, cannot fail
                    let _ = self.set_attr(id, name, value);
                }
                if let Some(element) = element {
                    for child in element.children() {
                        if let Some(child_id) = self.import(child.value(), ElementRef::wrap(child)) {
                            let _ = self.append_child(id, child_id);
                        }
                    }
                }
                Some(id)
            }
            _ => None,
        }
    }
}
