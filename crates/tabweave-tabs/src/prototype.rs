//! Element templates for tabs, tab panels and the tab list

use tabweave_dom::{Document, NodeId};

use crate::config::Config;
use crate::Result;

/// Element kind plus its fixed classes and attributes. Never mutated after
/// construction; every use stamps out a new element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTemplate {
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
}

impl ElementTemplate {
    fn new(tag: &str, classes: &[&str], attrs: &[(&str, &str)]) -> Self {
        Self {
            tag: tag.to_string(),
            classes: classes
                .iter()
                .filter(|c| !c.is_empty())
                .map(|c| c.to_string())
                .collect(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Create a detached element from this template
    pub fn instantiate(&self, doc: &mut Document) -> Result<NodeId> {
        let el = doc.create_element(&self.tag);
        if !self.classes.is_empty() {
            doc.set_attr(el, "class", &self.classes.join(" "))?;
        }
        for (name, value) in &self.attrs {
            doc.set_attr(el, name, value)?;
        }
        Ok(el)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototypes {
    pub tab: ElementTemplate,
    pub tabpanel: ElementTemplate,
    pub tablist: ElementTemplate,
}

impl Prototypes {
    pub fn build(config: &Config) -> Self {
        Self {
            tabpanel: ElementTemplate::new(
                &config.tabpanel_el,
                &[
                    config.tabpanel_class.as_str(),
                    config.tabpanel_hidden_class.as_str(),
                ],
                &[
                    ("aria-hidden", "true"),
                    ("hidden", "hidden"),
                    ("role", "tabpanel"),
                    ("tabindex", "-1"),
                ],
            ),
            tab: ElementTemplate::new(
                &config.tab_el,
                &[config.tab_class.as_str()],
                &[("role", "tab"), ("aria-selected", "false"), ("tabindex", "-1")],
            ),
            tablist: ElementTemplate::new(
                &config.tablist_el,
                &[config.tablist_class.as_str()],
                &[("role", "tablist")],
            ),
        }
    }
}
