//! Document tree capabilities
//!
//! The toolkit never touches a global document. Every operation receives a
//! handle implementing [`ElementFactory`] (node creation and tree mutation)
//! and, for event wiring, [`EventSource`] (listener registration).
//!
//! - **`MemoryDocument`**: arena-backed tree used by tests and headless callers
//! - **`WebDocument`** (in `form-toolkit-wasm`): wrapper over `web_sys::Document`
//!
//! Handles are cheap to clone and share the same underlying tree.

use std::cell::Cell;
use std::fmt;

use crate::error::DomError;
use crate::snapshot::FormSnapshot;

pub mod memory;

pub use memory::{MemoryDocument, NodeId};

/// Node creation, attribute access and tree mutation
pub trait ElementFactory: Clone + 'static {
    /// Handle to an element in the tree
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    fn create_element(&self, tag: &str) -> Result<Self::Node, DomError>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<(), DomError>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Lower-case tag name
    fn tag_name(&self, node: &Self::Node) -> String;

    /// Replaces all children of `node` with a single text run
    fn set_text_content(&self, node: &Self::Node, text: &str);

    fn text_content(&self, node: &Self::Node) -> String;

    /// Current value of an input, select or textarea
    fn value(&self, node: &Self::Node) -> String;

    /// Appends `child` as the last child of `parent`, moving it if it is
    /// already attached elsewhere
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    /// Inserts `child` before `reference`, or at the end when `reference`
    /// is `None`
    fn insert_before(
        &self,
        parent: &Self::Node,
        child: &Self::Node,
        reference: Option<&Self::Node>,
    ) -> Result<(), DomError>;

    /// Detaches `child`; fails with [`DomError::NotAChild`] when `child` is
    /// not currently a child of `parent`
    fn remove_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Next element sibling
    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Captures the successful controls of `form`
    fn form_data(&self, form: &Self::Node) -> Result<FormSnapshot, DomError>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool {
        self.attribute(node, "class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Inserts `child` directly after `reference` under the same parent
    fn insert_after(&self, reference: &Self::Node, child: &Self::Node) -> Result<(), DomError> {
        let parent = self.parent(reference).ok_or(DomError::Detached)?;
        let next = self.next_sibling(reference);
        self.insert_before(&parent, child, next.as_ref())
    }
}

pub type SubmitListener = Box<dyn FnMut(&SubmitEvent)>;
pub type InputListener = Box<dyn FnMut(&InputEvent)>;

/// Listener registration
///
/// Listeners live as long as the node they are attached to; there is no
/// unregister operation.
pub trait EventSource: ElementFactory {
    fn add_submit_listener(&self, form: &Self::Node, listener: SubmitListener) -> Result<(), DomError>;

    fn add_input_listener(&self, input: &Self::Node, listener: InputListener) -> Result<(), DomError>;

    /// Handle for listeners to capture
    ///
    /// Must not own the tree: listeners are stored inside it.
    fn listener_handle(&self) -> Self {
        self.clone()
    }
}

/// Submit event handed to listeners
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: Cell<bool>,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the platform's navigation / reload on submit
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Value-change event handed to listeners
#[derive(Debug, Clone)]
pub struct InputEvent {
    value: String,
}

impl InputEvent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Field value after the change
    pub fn value(&self) -> &str {
        &self.value
    }
}
