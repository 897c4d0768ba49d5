//! Tab and tab panel assembly

use tabweave_dom::{Document, NodeId};

use crate::config::Config;
use crate::partition::Section;
use crate::prototype::Prototypes;
use crate::{Result, THUMBNAIL_ATTR, TITLE_ATTR};

/// One tab, its panel and the heading the pair was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabEntry {
    pub heading: NodeId,
    pub tab: NodeId,
    pub tabpanel: NodeId,
    /// The heading was hidden during assembly and must be restored on teardown
    pub heading_hidden: bool,
}

pub(crate) struct Assembly {
    /// Not yet inserted into the container
    pub tablist: NodeId,
    pub entries: Vec<TabEntry>,
}

pub(crate) fn assemble(
    doc: &mut Document,
    container: NodeId,
    container_id: &str,
    sections: Vec<Section>,
    prototypes: &Prototypes,
    config: &Config,
) -> Result<Assembly> {
    let tablist = prototypes.tablist.instantiate(doc)?;
    let mut entries = Vec::with_capacity(sections.len());

    for (i, section) in sections.into_iter().enumerate() {
        let tabpanel_id = format!("{}-{}-tabpanel", container_id, i);
        let tab_id = format!("{}-{}-tab", container_id, i);

        let tabpanel = prototypes.tabpanel.instantiate(doc)?;
        doc.set_attr(tabpanel, "id", &tabpanel_id)?;
        doc.set_attr(tabpanel, "aria-labelledby", &tab_id)?;
        doc.append_child(tabpanel, section.heading)?;
        for node in section.content {
            doc.append_child(tabpanel, node)?;
        }
        doc.append_child(container, tabpanel)?;

        let tab = prototypes.tab.instantiate(doc)?;
        doc.set_attr(tab, "id", &tab_id)?;
        doc.set_attr(tab, "aria-controls", &tabpanel_id)?;
        doc.set_attr(tab, "aria-describedby", &tabpanel_id)?;
        doc.append_child(tablist, tab)?;

        let has_title = write_label(doc, tab, section.heading, config)?;

        let heading_hidden = config.hide_headers && !has_title;
        if heading_hidden {
            doc.set_attr(section.heading, "hidden", "hidden")?;
            doc.add_class(section.heading, &config.heading_hidden_class)?;
        }

        if i == 0 {
            doc.set_attr(container, "aria-activedescendant", &tabpanel_id)?;
            show(doc, tab, tabpanel, config)?;
        }

        entries.push(TabEntry {
            heading: section.heading,
            tab,
            tabpanel,
            heading_hidden,
        });
    }

    Ok(Assembly { tablist, entries })
}

/// Fill the tab with its label. Returns true if the heading supplied an
/// alternate title.
fn write_label(doc: &mut Document, tab: NodeId, heading: NodeId, config: &Config) -> Result<bool> {
    let title = doc
        .attr(heading, TITLE_ATTR)
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string);
    let thumbnail = doc
        .attr(heading, THUMBNAIL_ATTR)
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string);

    match &title {
        Some(title) => {
            let text = doc.create_text(title);
            doc.append_child(tab, text)?;
        }
        None => {
            for child in doc.children(heading).to_vec() {
                let copy = doc.deep_clone(child)?;
                doc.append_child(tab, copy)?;
            }
        }
    }

    if let Some(src) = thumbnail {
        let gap = doc.create_text(" ");
        doc.append_child(tab, gap)?;
        let img = doc.create_element("img");
        doc.add_class(img, &config.tab_thumbnail_class)?;
        doc.set_attr(img, "src", &src)?;
        doc.set_attr(img, "alt", "")?;
        doc.append_child(tab, img)?;
    }

    Ok(title.is_some())
}

pub(crate) fn show(doc: &mut Document, tab: NodeId, tabpanel: NodeId, config: &Config) -> Result<()> {
    doc.add_class(tab, &config.tab_active_class)?;
    doc.set_attr(tab, "aria-selected", "true")?;
    doc.set_attr(tab, "tabindex", "0")?;

    doc.remove_class(tabpanel, &config.tabpanel_hidden_class)?;
    doc.set_attr(tabpanel, "aria-hidden", "false")?;
    doc.remove_attr(tabpanel, "hidden")?;
    Ok(())
}

pub(crate) fn hide(doc: &mut Document, tab: NodeId, tabpanel: NodeId, config: &Config) -> Result<()> {
    doc.remove_class(tab, &config.tab_active_class)?;
    doc.set_attr(tab, "aria-selected", "false")?;
    doc.set_attr(tab, "tabindex", "-1")?;

    doc.add_class(tabpanel, &config.tabpanel_hidden_class)?;
    doc.set_attr(tabpanel, "aria-hidden", "true")?;
    doc.set_attr(tabpanel, "hidden", "hidden")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::partition;

    fn build(html: &str, config: &Config) -> (Document, NodeId, Assembly) {
        let mut doc = Document::parse_fragment(html);
        let container = doc.get_element_by_id("c").unwrap();
        let sections = partition(&doc, container, "h2");
        let prototypes = Prototypes::build(config);
        let assembly = assemble(&mut doc, container, "c", sections, &prototypes, config).unwrap();
        (doc, container, assembly)
    }

    #[test]
    fn test_ids_and_cross_references() {
        let (doc, container, assembly) = build(
            r#"<div id="c"><h2>A</h2><p>1</p><h2>B</h2><p>2</p></div>"#,
            &Config::default(),
        );
        assert_eq!(assembly.entries.len(), 2);
        let second = assembly.entries[1];
        assert_eq!(doc.attr(second.tab, "id"), Some("c-1-tab"));
        assert_eq!(doc.attr(second.tabpanel, "id"), Some("c-1-tabpanel"));
        assert_eq!(doc.attr(second.tabpanel, "aria-labelledby"), Some("c-1-tab"));
        assert_eq!(doc.attr(second.tab, "aria-controls"), Some("c-1-tabpanel"));
        assert_eq!(doc.attr(second.tab, "aria-describedby"), Some("c-1-tabpanel"));
        assert_eq!(
            doc.attr(container, "aria-activedescendant"),
            Some("c-0-tabpanel")
        );
        // Panels hold their heading and content, in order
        assert_eq!(doc.children(container), &[assembly.entries[0].tabpanel, second.tabpanel]);
        assert_eq!(doc.text_content(second.tabpanel), "B2");
        // The tab list is built but not inserted yet
        assert_eq!(doc.parent(assembly.tablist), None);
    }

    #[test]
    fn test_first_pair_selected() {
        let config = Config::default();
        let (doc, _, assembly) = build(
            r#"<div id="c"><h2>A</h2><p>1</p><h2>B</h2><p>2</p></div>"#,
            &config,
        );
        let [first, second] = [assembly.entries[0], assembly.entries[1]];
        assert_eq!(doc.attr(first.tab, "aria-selected"), Some("true"));
        assert_eq!(doc.attr(first.tab, "tabindex"), Some("0"));
        assert!(doc.has_class(first.tab, &config.tab_active_class));
        assert!(!doc.has_attr(first.tabpanel, "hidden"));
        assert_eq!(doc.attr(first.tabpanel, "aria-hidden"), Some("false"));

        assert_eq!(doc.attr(second.tab, "aria-selected"), Some("false"));
        assert_eq!(doc.attr(second.tab, "tabindex"), Some("-1"));
        assert!(doc.has_attr(second.tabpanel, "hidden"));
        assert!(doc.has_class(second.tabpanel, &config.tabpanel_hidden_class));
    }

    #[test]
    fn test_labels_and_heading_hiding() {
        let config = Config::default();
        let (doc, _, assembly) = build(
            r#"<div id="c"><h2>Plain <em>one</em></h2><h2 data-tab-title="Short">A long title</h2></div>"#,
            &config,
        );
        let [plain, titled] = [assembly.entries[0], assembly.entries[1]];
        assert_eq!(doc.inner_html(plain.tab), "Plain <em>one</em>");
        assert!(plain.heading_hidden);
        assert!(doc.has_attr(plain.heading, "hidden"));
        assert!(doc.has_class(plain.heading, &config.heading_hidden_class));

        assert_eq!(doc.inner_html(titled.tab), "Short");
        assert!(!titled.heading_hidden);
        assert!(!doc.has_attr(titled.heading, "hidden"));
    }

    #[test]
    fn test_headers_kept_when_not_hiding() {
        let config = Config {
            hide_headers: false,
            ..Config::default()
        };
        let (doc, _, assembly) = build(r#"<div id="c"><h2>A</h2></div>"#, &config);
        assert!(!assembly.entries[0].heading_hidden);
        assert!(!doc.has_attr(assembly.entries[0].heading, "hidden"));
    }

    #[test]
    fn test_thumbnail() {
        let (doc, _, assembly) = build(
            r#"<div id="c"><h2 data-tab-title="Pic" data-tab-thumbnail="t.png">A</h2></div>"#,
            &Config::default(),
        );
        assert_eq!(
            doc.inner_html(assembly.entries[0].tab),
            r#"Pic <img class="TabInterface-tab-thumbnail" src="t.png" alt="">"#
        );
    }
}
