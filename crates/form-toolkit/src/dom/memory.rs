//! In-memory document tree
//!
//! Arena-backed implementation of [`ElementFactory`] and [`EventSource`].
//! Nodes live as long as the document; detached nodes simply lose their
//! parent link. Listeners hold weak handles, so dropping the last owning
//! handle frees the tree together with its listeners.
//! Besides the trait surface it exposes `set_value`, `dispatch_submit`,
//! `dispatch_input` and `to_html` so tests can drive and inspect a form.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::{ElementFactory, EventSource, InputEvent, InputListener, SubmitEvent, SubmitListener};
use crate::error::DomError;
use crate::snapshot::FormSnapshot;

/// Handle to a node inside a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    value: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Default)]
struct Arena {
    nodes: Vec<NodeData>,
    submit_listeners: HashMap<NodeId, Vec<SubmitListener>>,
    input_listeners: HashMap<NodeId, Vec<InputListener>>,
}

impl Arena {
    fn get(&self, id: NodeId) -> Result<&NodeData, DomError> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode)
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        self.nodes.get_mut(id.0).ok_or(DomError::UnknownNode)
    }

    fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        if let Some(parent) = self.get(id)?.parent {
            self.get_mut(parent)?.children.retain(|child| *child != id);
            self.get_mut(id)?.parent = None;
        }
        Ok(())
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id.0).and_then(|n| n.parent);
        }
        false
    }

    fn insert(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> Result<(), DomError> {
        self.get(parent)?;
        self.get(child)?;

        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest(
                "a node cannot be inserted into itself or its descendants".to_string(),
            ));
        }

        if let Some(reference) = reference {
            if self.get(reference)?.parent != Some(parent) {
                return Err(DomError::NotAChild);
            }
            if reference == child {
                return Ok(());
            }
        }

        self.detach(child)?;

        let siblings = &mut self.get_mut(parent)?.children;
        let index = reference
            .and_then(|r| siblings.iter().position(|c| *c == r))
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn text(&self, id: NodeId) -> String {
        let Ok(node) = self.get(id) else {
            return String::new();
        };
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&self.text(*child));
        }
        text
    }

    fn value(&self, id: NodeId) -> String {
        let Ok(node) = self.get(id) else {
            return String::new();
        };
        if let Some(ref value) = node.value {
            return value.clone();
        }

        match node.tag.as_str() {
            // An untouched select reports its first option
            "select" => node
                .children
                .iter()
                .filter_map(|c| self.nodes.get(c.0))
                .find(|n| n.tag == "option")
                .map(|option| {
                    option
                        .attribute("value")
                        .map(str::to_string)
                        .unwrap_or_else(|| option.text.clone())
                })
                .unwrap_or_default(),
            "textarea" => self.text(id),
            _ => node.attribute("value").unwrap_or_default().to_string(),
        }
    }

    fn descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let Ok(node) = self.get(id) {
            for child in &node.children {
                out.push(*child);
                self.descendants(*child, out);
            }
        }
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Ok(node) = self.get(id) else {
            return;
        };

        out.push('<');
        out.push_str(&node.tag);
        for (key, value) in &node.attributes {
            out.push_str(&format!(r#" {}="{}""#, key, escape_html(value)));
        }
        out.push('>');

        if is_void_element(&node.tag) {
            return;
        }

        out.push_str(&escape_html(&node.text));
        for child in &node.children {
            self.write_html(*child, out);
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }
}

fn is_void_element(tag: &str) -> bool {
    matches!(tag, "input" | "br" | "hr" | "img" | "meta" | "link")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[derive(Clone)]
enum Link {
    Owner(Rc<RefCell<Arena>>),
    Listener(Weak<RefCell<Arena>>),
}

/// Arena-backed document shared by every clone of the handle
#[derive(Clone)]
pub struct MemoryDocument {
    link: Link,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self {
            link: Link::Owner(Rc::default()),
        }
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    // A listener handle outliving its document sees an empty tree
    fn arena(&self) -> Rc<RefCell<Arena>> {
        match &self.link {
            Link::Owner(arena) => arena.clone(),
            Link::Listener(arena) => arena.upgrade().unwrap_or_default(),
        }
    }

    /// Number of nodes ever created in this document
    pub fn node_count(&self) -> usize {
        self.arena().borrow().nodes.len()
    }

    /// Sets the live value of a control without firing listeners
    pub fn set_value(&self, node: NodeId, value: &str) -> Result<(), DomError> {
        self.arena().borrow_mut().get_mut(node)?.value = Some(value.to_string());
        Ok(())
    }

    /// Fires a submit event at `form`; returns whether a listener
    /// prevented the default action
    pub fn dispatch_submit(&self, form: NodeId) -> Result<bool, DomError> {
        let mut listeners = {
            let shared = self.arena();
            let mut arena = shared.borrow_mut();
            arena.get(form)?;
            arena.submit_listeners.remove(&form).unwrap_or_default()
        };

        let event = SubmitEvent::new();
        for listener in listeners.iter_mut() {
            listener(&event);
        }

        // Keep listeners registered while the dispatch was running
        let shared = self.arena();
        let mut arena = shared.borrow_mut();
        let slot = arena.submit_listeners.entry(form).or_default();
        let added = std::mem::take(slot);
        *slot = listeners;
        slot.extend(added);

        Ok(event.default_prevented())
    }

    /// Sets the value of `input` and fires its input listeners, the way a
    /// user edit would
    pub fn dispatch_input(&self, input: NodeId, value: &str) -> Result<(), DomError> {
        let mut listeners = {
            let shared = self.arena();
            let mut arena = shared.borrow_mut();
            arena.get_mut(input)?.value = Some(value.to_string());
            arena.input_listeners.remove(&input).unwrap_or_default()
        };

        let event = InputEvent::new(value);
        for listener in listeners.iter_mut() {
            listener(&event);
        }

        let shared = self.arena();
        let mut arena = shared.borrow_mut();
        let slot = arena.input_listeners.entry(input).or_default();
        let added = std::mem::take(slot);
        *slot = listeners;
        slot.extend(added);

        Ok(())
    }

    /// Serializes `node` and its subtree as HTML
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.arena().borrow().write_html(node, &mut out);
        out
    }
}

impl ElementFactory for MemoryDocument {
    type Node = NodeId;

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomError::Platform(format!("invalid tag name {:?}", tag)));
        }
        let shared = self.arena();
        let mut arena = shared.borrow_mut();
        let id = NodeId(arena.nodes.len());
        arena.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        });
        Ok(id)
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let shared = self.arena();
        let mut arena = shared.borrow_mut();
        let data = arena.get_mut(*node)?;
        match data.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => data.attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let shared = self.arena();
        let arena = shared.borrow();
        arena.get(*node).ok()?.attribute(name).map(str::to_string)
    }

    fn tag_name(&self, node: &NodeId) -> String {
        let shared = self.arena();
        let arena = shared.borrow();
        arena.get(*node).map(|n| n.tag.clone()).unwrap_or_default()
    }

    fn set_text_content(&self, node: &NodeId, text: &str) {
        let shared = self.arena();
        let mut arena = shared.borrow_mut();
        let children = match arena.get_mut(*node) {
            Ok(data) => {
                data.text = text.to_string();
                std::mem::take(&mut data.children)
            }
            Err(_) => return,
        };
        for child in children {
            if let Ok(data) = arena.get_mut(child) {
                data.parent = None;
            }
        }
    }

    fn text_content(&self, node: &NodeId) -> String {
        self.arena().borrow().text(*node)
    }

    fn value(&self, node: &NodeId) -> String {
        self.arena().borrow().value(*node)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        self.arena().borrow_mut().insert(*parent, *child, None)
    }

    fn insert_before(&self, parent: &NodeId, child: &NodeId, reference: Option<&NodeId>) -> Result<(), DomError> {
        self.arena().borrow_mut().insert(*parent, *child, reference.copied())
    }

    fn remove_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        let shared = self.arena();
        let mut arena = shared.borrow_mut();
        arena.get(*parent)?;
        if arena.get(*child)?.parent != Some(*parent) {
            return Err(DomError::NotAChild);
        }
        arena.detach(*child)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.arena().borrow().get(*node).ok()?.parent
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let shared = self.arena();
        let arena = shared.borrow();
        let parent = arena.get(*node).ok()?.parent?;
        let siblings = &arena.get(parent).ok()?.children;
        let index = siblings.iter().position(|c| c == node)?;
        siblings.get(index + 1).copied()
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        let shared = self.arena();
        let arena = shared.borrow();
        arena.get(*node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn form_data(&self, form: &NodeId) -> Result<FormSnapshot, DomError> {
        let shared = self.arena();
        let arena = shared.borrow();
        arena.get(*form)?;

        let mut ids = Vec::new();
        arena.descendants(*form, &mut ids);

        let mut entries = Vec::new();
        for id in ids {
            let node = arena.get(id)?;
            if !matches!(node.tag.as_str(), "input" | "select" | "textarea") {
                continue;
            }
            let Some(name) = node.attribute("name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if node.attribute("disabled").is_some() {
                continue;
            }

            if node.tag == "input" {
                let kind = node.attribute("type").unwrap_or("text").to_ascii_lowercase();
                match kind.as_str() {
                    "submit" | "button" | "reset" | "image" | "file" => continue,
                    "checkbox" | "radio" => {
                        if node.attribute("checked").is_some() {
                            let value = node.attribute("value").unwrap_or("on");
                            entries.push((name.to_string(), value.to_string()));
                        }
                        continue;
                    }
                    _ => {}
                }
            }

            entries.push((name.to_string(), arena.value(id)));
        }

        Ok(entries.into_iter().collect())
    }
}

impl EventSource for MemoryDocument {
    fn add_submit_listener(&self, form: &NodeId, listener: SubmitListener) -> Result<(), DomError> {
        let shared = self.arena();
        let mut arena = shared.borrow_mut();
        arena.get(*form)?;
        arena.submit_listeners.entry(*form).or_default().push(listener);
        Ok(())
    }

    fn add_input_listener(&self, input: &NodeId, listener: InputListener) -> Result<(), DomError> {
        let shared = self.arena();
        let mut arena = shared.borrow_mut();
        arena.get(*input)?;
        arena.input_listeners.entry(*input).or_default().push(listener);
        Ok(())
    }

    fn listener_handle(&self) -> Self {
        let arena = match &self.link {
            Link::Owner(arena) => Rc::downgrade(arena),
            Link::Listener(arena) => arena.clone(),
        };
        Self {
            link: Link::Listener(arena),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn element(doc: &MemoryDocument, tag: &str) -> NodeId {
        doc.create_element(tag).unwrap()
    }

    #[test]
    fn test_append_and_serialize() {
        let doc = MemoryDocument::new();
        let div = element(&doc, "DIV");
        let span = element(&doc, "span");
        doc.set_attribute(&div, "id", "root").unwrap();
        doc.set_text_content(&span, "a < b");
        doc.append_child(&div, &span).unwrap();

        assert_eq!(doc.node_count(), 2);
        assert_eq!(doc.to_html(div), r#"<div id="root"><span>a &lt; b</span></div>"#);
        assert_eq!(doc.parent(&span), Some(div));
        assert_eq!(doc.text_content(&div), "a < b");
    }

    #[test]
    fn test_append_moves_existing_child() {
        let doc = MemoryDocument::new();
        let a = element(&doc, "div");
        let b = element(&doc, "div");
        let child = element(&doc, "p");

        doc.append_child(&a, &child).unwrap();
        doc.append_child(&b, &child).unwrap();

        assert!(doc.children(&a).is_empty());
        assert_eq!(doc.children(&b), vec![child]);
    }

    #[test]
    fn test_cannot_insert_into_descendant() {
        let doc = MemoryDocument::new();
        let outer = element(&doc, "div");
        let inner = element(&doc, "div");
        doc.append_child(&outer, &inner).unwrap();

        assert!(matches!(
            doc.append_child(&inner, &outer),
            Err(DomError::HierarchyRequest(_))
        ));
        assert!(matches!(
            doc.append_child(&outer, &outer),
            Err(DomError::HierarchyRequest(_))
        ));
    }

    #[test]
    fn test_remove_non_child_fails() {
        let doc = MemoryDocument::new();
        let parent = element(&doc, "form");
        let stray = element(&doc, "input");

        assert_eq!(doc.remove_child(&parent, &stray), Err(DomError::NotAChild));
    }

    #[test]
    fn test_insert_after_and_siblings() {
        let doc = MemoryDocument::new();
        let form = element(&doc, "form");
        let first = element(&doc, "input");
        let last = element(&doc, "input");
        let middle = element(&doc, "span");
        doc.append_child(&form, &first).unwrap();
        doc.append_child(&form, &last).unwrap();

        doc.insert_after(&first, &middle).unwrap();

        assert_eq!(doc.children(&form), vec![first, middle, last]);
        assert_eq!(doc.next_sibling(&first), Some(middle));
        assert_eq!(doc.next_sibling(&last), None);
    }

    #[test]
    fn test_insert_after_detached_fails() {
        let doc = MemoryDocument::new();
        let lone = element(&doc, "input");
        let span = element(&doc, "span");
        assert_eq!(doc.insert_after(&lone, &span), Err(DomError::Detached));
    }

    #[test]
    fn test_unknown_node() {
        let doc = MemoryDocument::new();
        let other = MemoryDocument::new();
        let own = element(&doc, "div");
        let _ = element(&other, "div");
        let far = element(&other, "div");

        assert_eq!(doc.append_child(&own, &far), Err(DomError::UnknownNode));
    }

    #[test]
    fn test_select_value_defaults_to_first_option() {
        let doc = MemoryDocument::new();
        let select = element(&doc, "select");
        let first = element(&doc, "option");
        let second = element(&doc, "option");
        doc.set_attribute(&first, "value", "us").unwrap();
        doc.set_attribute(&second, "value", "ca").unwrap();
        doc.append_child(&select, &first).unwrap();
        doc.append_child(&select, &second).unwrap();

        assert_eq!(doc.value(&select), "us");
        doc.set_value(select, "ca").unwrap();
        assert_eq!(doc.value(&select), "ca");
    }

    #[test]
    fn test_form_data_skips_unsuccessful_controls() {
        let doc = MemoryDocument::new();
        let form = element(&doc, "form");
        let add = |tag: &str, attrs: &[(&str, &str)]| {
            let node = element(&doc, tag);
            for (k, v) in attrs {
                doc.set_attribute(&node, k, v).unwrap();
            }
            doc.append_child(&form, &node).unwrap();
            node
        };

        let name = add("input", &[("type", "text"), ("name", "name")]);
        add("input", &[("type", "text")]);
        add("input", &[("type", "submit"), ("name", "go")]);
        add("input", &[("type", "checkbox"), ("name", "news")]);
        add("input", &[("type", "checkbox"), ("name", "terms"), ("checked", "")]);
        add("input", &[("name", "off"), ("disabled", "")]);
        let notes = add("textarea", &[("name", "notes")]);
        doc.set_value(name, "Ada").unwrap();
        doc.set_value(notes, "hi").unwrap();

        let snapshot = doc.form_data(&form).unwrap();
        let entries: Vec<(&str, &str)> = snapshot.iter().collect();
        assert_eq!(entries, vec![("name", "Ada"), ("terms", "on"), ("notes", "hi")]);
    }

    #[test]
    fn test_listener_may_register_during_dispatch() {
        let doc = MemoryDocument::new();
        let form = element(&doc, "form");
        let calls = Rc::new(RefCell::new(0));

        let inner_doc = doc.listener_handle();
        let inner_calls = calls.clone();
        doc.add_submit_listener(
            &form,
            Box::new(move |event| {
                event.prevent_default();
                *inner_calls.borrow_mut() += 1;
                let nested_calls = inner_calls.clone();
                inner_doc
                    .add_submit_listener(&form, Box::new(move |_| *nested_calls.borrow_mut() += 10))
                    .unwrap();
            }),
        )
        .unwrap();

        assert!(doc.dispatch_submit(form).unwrap());
        assert_eq!(*calls.borrow(), 1);
        doc.dispatch_submit(form).unwrap();
        assert_eq!(*calls.borrow(), 12);
    }

    fn owned_arena(doc: &MemoryDocument) -> Weak<RefCell<Arena>> {
        match &doc.link {
            Link::Owner(arena) => Rc::downgrade(arena),
            Link::Listener(arena) => arena.clone(),
        }
    }

    #[test]
    fn test_listeners_do_not_keep_document_alive() {
        let doc = MemoryDocument::new();
        let form = element(&doc, "form");
        let input = element(&doc, "input");
        doc.set_attribute(&input, "name", "email").unwrap();
        doc.append_child(&form, &input).unwrap();

        let annotations = crate::annotation::Annotations::new(doc.clone());
        crate::events::handle_submit(&doc, &form, |_| {}).unwrap();
        crate::events::add_real_time_validation(&annotations, &input, |v| !v.is_empty(), "Required").unwrap();

        doc.dispatch_input(input, "").unwrap();
        assert_eq!(annotations.message(&input).as_deref(), Some("Required"));
        assert!(doc.dispatch_submit(form).unwrap());

        let weak = owned_arena(&doc);
        drop(annotations);
        drop(doc);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_listener_handle_sees_same_tree() {
        let doc = MemoryDocument::new();
        let form = element(&doc, "form");
        let handle = doc.listener_handle();
        let input = element(&handle, "input");
        handle.append_child(&form, &input).unwrap();

        assert_eq!(doc.children(&form), vec![input]);
        assert_eq!(doc.node_count(), 2);

        drop(doc);
        assert_eq!(handle.node_count(), 0);
        assert!(handle.children(&form).is_empty());
    }
}
