//! Document arena
//!
//! All structural mutation goes through [`Document`]. Every node except the
//! root starts detached and is attached with one of the insertion methods.

use crate::error::DomError;
use crate::node::{ElementData, Node, NodeData, NodeId};
use crate::Result;

pub struct Document {
    /// `None` marks a slot freed by [`Document::remove`]
    nodes: Vec<Option<Node>>,
    /// Freed slots, reused before the arena grows
    free: Vec<NodeId>,
    root: NodeId,
    /// Element currently holding focus
    focused: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::new(NodeData::Document))],
            free: Vec::new(),
            root: NodeId(0),
            focused: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Number of arena slots, live or free
    pub fn allocated(&self) -> usize {
        self.nodes.len()
    }

    fn get(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(DomError::NodeNotFound(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(DomError::NodeNotFound(id))
    }

    fn element(&self, id: NodeId) -> Result<&ElementData> {
        self.get(id)?.as_element().ok_or(DomError::NotAnElement(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        match &mut self.get_mut(id)?.data {
            NodeData::Element(el) => Ok(el),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = Some(Node::new(data));
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(Node::new(data)));
        id
    }

    // === Creation ===

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(name)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    /// Copy a node and its whole subtree. The copy is detached.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId> {
        let data = self.get(id)?.data.clone();
        let copy = self.push(data);
        let children = self.get(id)?.children.clone();
        for child in children {
            let child_copy = self.deep_clone(child)?;
            self.attach(copy, child_copy, None)?;
        }
        Ok(copy)
    }

    // === Tree structure ===

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |c| self.is_element(*c))
    }

    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.element_children(id).next()
    }

    /// Pre-order walk of everything below `id`, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// True if `node` is `ancestor` or lies below it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Nearest inclusive ancestor matching `pred`
    pub fn closest<F>(&self, node: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        let mut current = Some(node);
        while let Some(id) = current {
            if pred(self, id) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Position of `id` among its parent's children
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, at: Option<usize>) -> Result<()> {
        if !self.get(parent)?.is_container() || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        self.detach(child)?;
        let node = self.get_mut(parent)?;
        match at {
            Some(index) if index < node.children.len() => node.children.insert(index, child),
            _ => node.children.push(child),
        }
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.attach(parent, child, None)
    }

    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.attach(parent, child, Some(0))
    }

    /// Insert `child` into `reference`'s parent, directly before `reference`
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) -> Result<()> {
        let parent = self
            .parent(reference)
            .ok_or(DomError::HierarchyRequest {
                parent: reference,
                child,
            })?;
        if child == reference {
            return Ok(());
        }
        // Detach first so the reference index is computed on the final list
        self.detach(child)?;
        let at = self.index_in_parent(reference);
        self.attach(parent, child, at)
    }

    /// Remove a node from its parent. The subtree stays intact.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let Some(parent) = self.get(id)?.parent else {
            return Ok(());
        };
        self.get_mut(parent)?.children.retain(|c| *c != id);
        self.get_mut(id)?.parent = None;
        if let Some(focused) = self.focused {
            if self.contains(id, focused) {
                self.focused = None;
            }
        }
        Ok(())
    }

    /// Replace an element with its children
    pub fn unwrap(&mut self, id: NodeId) -> Result<()> {
        let children = self.get(id)?.children.clone();
        for child in children {
            self.insert_before(id, child)?;
        }
        self.detach(id)
    }

    /// Detach `id` and free it together with its subtree. The slots are
    /// handed out again by later creations, so `id` must not be used after.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(DomError::HierarchyRequest {
                parent: id,
                child: id,
            });
        }
        self.detach(id)?;
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for node in doomed {
            self.nodes[node.index()] = None;
            self.free.push(node);
        }
        Ok(())
    }

    // === Elements and attributes ===

    pub fn is_element(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_element)
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.node(id)
            .and_then(Node::as_element)
            .map(|el| el.name.as_str())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)
            .and_then(Node::as_element)
            .and_then(|el| el.attr(name))
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<()> {
        self.element_mut(id)?.remove_attr(name);
        Ok(())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id)
            .and_then(Node::as_element)
            .is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        let el = self.element_mut(id)?;
        if class.is_empty() || el.has_class(class) {
            return Ok(());
        }
        let joined = match el.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        el.set_attr("class", &joined);
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        let el = self.element_mut(id)?;
        if !el.has_class(class) {
            return Ok(());
        }
        let remaining = el
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if remaining.is_empty() {
            el.remove_attr("class");
        } else {
            el.set_attr("class", &remaining);
        }
        Ok(())
    }

    /// Find an attached element by its `id` attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.attr(*n, "id") == Some(id))
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(NodeData::Text(text)) = self.node(id).map(Node::data) {
            out.push_str(text);
        }
        for node in self.descendants(id) {
            if let Some(NodeData::Text(text)) = self.node(node).map(Node::data) {
                out.push_str(text);
            }
        }
        out
    }

    // === Focus ===

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn focus(&mut self, id: NodeId) -> Result<()> {
        self.element(id)?;
        self.focused = Some(id);
        Ok(())
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(doc: &mut Document) -> (NodeId, NodeId, NodeId) {
        let ol = doc.create_element("ol");
        let a = doc.create_element("li");
        let b = doc.create_element("li");
        let root = doc.root();
        doc.append_child(root, ol).unwrap();
        doc.append_child(ol, a).unwrap();
        doc.append_child(ol, b).unwrap();
        (ol, a, b)
    }

    #[test]
    fn test_insertion_order() {
        let mut doc = Document::new();
        let (ol, a, b) = list(&mut doc);
        let c = doc.create_element("li");
        doc.prepend_child(ol, c).unwrap();
        assert_eq!(doc.children(ol), &[c, a, b]);

        doc.insert_before(a, b).unwrap();
        assert_eq!(doc.children(ol), &[c, b, a]);
        assert_eq!(doc.index_in_parent(a), Some(2));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut doc = Document::new();
        let (ol, a, _) = list(&mut doc);
        assert_eq!(
            doc.append_child(a, ol),
            Err(DomError::HierarchyRequest { parent: a, child: ol })
        );
        let text = doc.create_text("x");
        assert!(doc.append_child(text, a).is_err());
    }

    #[test]
    fn test_unwrap_moves_children_in_place() {
        let mut doc = Document::new();
        let root = doc.root();
        let wrapper = doc.create_element("section");
        let before = doc.create_element("p");
        let after = doc.create_element("p");
        doc.append_child(root, before).unwrap();
        doc.append_child(root, wrapper).unwrap();
        doc.append_child(root, after).unwrap();
        let x = doc.create_element("h2");
        let y = doc.create_text("body");
        doc.append_child(wrapper, x).unwrap();
        doc.append_child(wrapper, y).unwrap();

        doc.unwrap(wrapper).unwrap();
        assert_eq!(doc.children(root), &[before, x, y, after]);
        assert_eq!(doc.parent(wrapper), None);
    }

    #[test]
    fn test_deep_clone_is_detached_copy() {
        let mut doc = Document::new();
        let (ol, a, _) = list(&mut doc);
        doc.set_attr(a, "role", "tab").unwrap();
        let copy = doc.deep_clone(ol).unwrap();
        assert_eq!(doc.parent(copy), None);
        assert_eq!(doc.children(copy).len(), 2);
        let first = doc.children(copy)[0];
        assert_ne!(first, a);
        assert_eq!(doc.attr(first, "role"), Some("tab"));
    }

    #[test]
    fn test_remove_frees_slots_for_reuse() {
        let mut doc = Document::new();
        let (ol, a, b) = list(&mut doc);
        doc.focus(a).unwrap();
        let slots = doc.allocated();

        doc.remove(ol).unwrap();
        assert!(doc.children(doc.root()).is_empty());
        assert_eq!(doc.focused(), None);
        assert!(doc.node(b).is_none());
        assert_eq!(doc.set_attr(a, "x", "y"), Err(DomError::NodeNotFound(a)));

        for _ in 0..3 {
            doc.create_element("li");
        }
        assert_eq!(doc.allocated(), slots);
        let root = doc.root();
        assert!(doc.remove(root).is_err());
    }

    #[test]
    fn test_classes() {
        let mut doc = Document::new();
        let el = doc.create_element("div");
        doc.add_class(el, "one").unwrap();
        doc.add_class(el, "two").unwrap();
        doc.add_class(el, "one").unwrap();
        assert_eq!(doc.attr(el, "class"), Some("one two"));
        doc.remove_class(el, "one").unwrap();
        assert_eq!(doc.attr(el, "class"), Some("two"));
        doc.remove_class(el, "two").unwrap();
        assert!(!doc.has_attr(el, "class"));
    }

    #[test]
    fn test_detach_clears_focus_inside_subtree() {
        let mut doc = Document::new();
        let (ol, a, _) = list(&mut doc);
        doc.focus(a).unwrap();
        assert_eq!(doc.focused(), Some(a));
        doc.detach(ol).unwrap();
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn test_stale_handle() {
        let mut doc = Document::new();
        let missing = NodeId(99);
        assert_eq!(
            doc.set_attr(missing, "id", "x"),
            Err(DomError::NodeNotFound(missing))
        );
        let text = doc.create_text("t");
        assert_eq!(doc.focus(text), Err(DomError::NotAnElement(text)));
    }
}
