//! The global presentation hook the active theme is reflected onto.
//!
//! In a browser this is an attribute on `<html>`; CSS blocks scoped to
//! `[data-theme="..."]` take effect once it is set. [`DocumentRoot`] is the
//! in-memory stand-in used by hosts that render markup server-side and by
//! tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// A single root node carrying named attributes.
pub trait PresentationSurface {
    /// Sets `name` to `value` on the root node.
    fn set_attribute(&self, name: &str, value: &str);

    /// Reads the current value of `name`, if set.
    fn attribute(&self, name: &str) -> Option<String>;
}

impl<S: PresentationSurface + ?Sized> PresentationSurface for Rc<S> {
    fn set_attribute(&self, name: &str, value: &str) {
        (**self).set_attribute(name, value)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        (**self).attribute(name)
    }
}

impl<S: PresentationSurface + ?Sized> PresentationSurface for Box<S> {
    fn set_attribute(&self, name: &str, value: &str) {
        (**self).set_attribute(name, value)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        (**self).attribute(name)
    }
}

/// In-memory root node.
///
/// Clones share the same attributes, so a host can keep one handle while the
/// store owns another. Every call to `set_attribute` is counted, which lets
/// callers verify how often the surface was touched.
#[derive(Debug, Clone, Default)]
pub struct DocumentRoot {
    attributes: Rc<RefCell<BTreeMap<String, String>>>,
    writes: Rc<Cell<usize>>,
}

impl DocumentRoot {
    /// Creates a root node with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attribute writes performed so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Renders the attributes as they would appear on the `<html>` tag.
    ///
    /// ```rust
    /// use evolution_theme_core::{DocumentRoot, PresentationSurface};
    ///
    /// let root = DocumentRoot::new();
    /// root.set_attribute("data-theme", "dark");
    /// assert_eq!(root.open_tag(), r#"<html data-theme="dark">"#);
    /// ```
    pub fn open_tag(&self) -> String {
        let mut tag = String::from("<html");
        for (name, value) in self.attributes.borrow().iter() {
            let value = value.replace('&', "&amp;").replace('"', "&quot;");
            tag.push_str(&format!(" {}=\"{}\"", name, value));
        }
        tag.push('>');
        tag
    }
}

impl PresentationSurface for DocumentRoot {
    fn set_attribute(&self, name: &str, value: &str) {
        self.writes.set(self.writes.get() + 1);
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }
}
