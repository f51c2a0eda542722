//! `web_sys::Document` implementation of the toolkit's tree capabilities

use form_toolkit::dom::{InputListener, SubmitListener};
use form_toolkit::{DomError, ElementFactory, EventSource, FormSnapshot, InputEvent, SubmitEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

pub(crate) fn js_error(err: JsValue) -> DomError {
    DomError::Platform(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Handle to the page's document
#[derive(Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The document of the current window
    pub fn global() -> Result<Self, DomError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or_else(|| DomError::Platform("no global document".to_string()))
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl ElementFactory for WebDocument {
    type Node = Element;

    fn create_element(&self, tag: &str) -> Result<Element, DomError> {
        self.document.create_element(tag).map_err(js_error)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) -> Result<(), DomError> {
        node.set_attribute(name, value).map_err(js_error)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn set_text_content(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(textarea) = node.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else {
            node.get_attribute("value").unwrap_or_default()
        }
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent.append_child(child).map(|_| ()).map_err(js_error)
    }

    fn insert_before(&self, parent: &Element, child: &Element, reference: Option<&Element>) -> Result<(), DomError> {
        let reference: Option<&web_sys::Node> = reference.map(|r| r.as_ref());
        parent.insert_before(child, reference).map(|_| ()).map_err(js_error)
    }

    fn remove_child(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        if child.parent_element().as_ref() != Some(parent) {
            return Err(DomError::NotAChild);
        }
        parent.remove_child(child).map(|_| ()).map_err(js_error)
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn next_sibling(&self, node: &Element) -> Option<Element> {
        node.next_element_sibling()
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let collection = node.children();
        (0..collection.length()).filter_map(|i| collection.item(i)).collect()
    }

    fn form_data(&self, form: &Element) -> Result<FormSnapshot, DomError> {
        let form = form
            .dyn_ref::<HtmlFormElement>()
            .ok_or_else(|| DomError::Platform("element is not a <form>".to_string()))?;
        let data = web_sys::FormData::new_with_form(form).map_err(js_error)?;

        let entries = js_sys::try_iter(&data)
            .map_err(js_error)?
            .ok_or_else(|| DomError::Platform("FormData is not iterable".to_string()))?;

        let mut pairs = Vec::new();
        for entry in entries {
            let entry = js_sys::Array::from(&entry.map_err(js_error)?);
            // File entries have no string value; FetchClient::post_form_element
            // posts them
            if let (Some(name), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
                pairs.push((name, value));
            }
        }
        Ok(pairs.into_iter().collect())
    }
}

impl EventSource for WebDocument {
    fn add_submit_listener(&self, form: &Element, mut listener: SubmitListener) -> Result<(), DomError> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let submit = SubmitEvent::new();
            listener(&submit);
            if submit.default_prevented() {
                event.prevent_default();
            }
        });
        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        // Listener lives as long as the page
        closure.forget();
        Ok(())
    }

    fn add_input_listener(&self, input: &Element, mut listener: InputListener) -> Result<(), DomError> {
        let document = self.clone();
        let target = input.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let event = InputEvent::new(document.value(&target));
            listener(&event);
        });
        input
            .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        closure.forget();
        Ok(())
    }
}
