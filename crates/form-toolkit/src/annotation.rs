// File: crates/form-toolkit/src/annotation.rs
// Purpose: Single validation message per field, placed right after the field

use crate::config::AnnotationConfig;
use crate::dom::ElementFactory;
use crate::error::DomError;

/// Manages the error annotation attached to each field
///
/// A field owns at most one annotation: the element immediately following
/// it whose tag and class match the configuration. Every operation finds
/// that element first, so repeated calls never stack annotations.
#[derive(Clone)]
pub struct Annotations<D: ElementFactory> {
    dom: D,
    config: AnnotationConfig,
}

impl<D: ElementFactory> Annotations<D> {
    pub fn new(dom: D) -> Self {
        Self::with_config(dom, AnnotationConfig::default())
    }

    pub fn with_config(dom: D, config: AnnotationConfig) -> Self {
        Self { dom, config }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn config(&self) -> &AnnotationConfig {
        &self.config
    }

    /// The annotation currently attached to `field`
    pub fn get(&self, field: &D::Node) -> Option<D::Node> {
        let next = self.dom.next_sibling(field)?;
        let is_annotation = self.dom.tag_name(&next).eq_ignore_ascii_case(&self.config.tag)
            && self.dom.has_class(&next, &self.config.class);
        is_annotation.then_some(next)
    }

    /// Text of the annotation attached to `field`
    pub fn message(&self, field: &D::Node) -> Option<String> {
        self.get(field).map(|node| self.dom.text_content(&node))
    }

    /// Shows `message` next to `field`, reusing the existing annotation
    ///
    /// An empty message blanks the text but keeps the element.
    pub fn set(&self, field: &D::Node, message: &str) -> Result<D::Node, DomError> {
        if let Some(existing) = self.get(field) {
            self.dom.set_text_content(&existing, message);
            return Ok(existing);
        }

        let annotation = self.dom.create_element(&self.config.tag)?;
        self.dom.set_attribute(&annotation, "class", &self.config.class)?;
        self.dom.set_text_content(&annotation, message);
        self.dom.insert_after(field, &annotation)?;
        tracing::debug!(message, "created error annotation");
        Ok(annotation)
    }

    /// Same as [`set`](Self::set)
    pub fn show(&self, field: &D::Node, message: &str) -> Result<D::Node, DomError> {
        self.set(field, message)
    }

    /// Blanks the annotation text if one exists; never creates one
    pub fn blank(&self, field: &D::Node) {
        if let Some(existing) = self.get(field) {
            self.dom.set_text_content(&existing, "");
        }
    }

    /// Removes the annotation; returns whether one was present
    pub fn clear(&self, field: &D::Node) -> Result<bool, DomError> {
        let Some(existing) = self.get(field) else {
            return Ok(false);
        };
        let parent = self.dom.parent(&existing).ok_or(DomError::Detached)?;
        self.dom.remove_child(&parent, &existing)?;
        Ok(true)
    }
}
