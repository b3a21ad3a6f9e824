//! The navigation bar.
//!
//! [`ThemeNavBar`] renders, in order: the brand title, the link list and an
//! embedded [`ThemeSelector`]. It holds no theme state; the active theme is
//! read from the [`ThemeStore`] passed to [`ThemeNavBar::render`].
//!
//! Links are pre-rendered one by one, either through a caller-supplied
//! [`LinkRenderer`] or the `link.html` template, and handed to `navbar.html`
//! as safe markup:
//!
//! | Field | Value |
//! |-------|-------|
//! | `class` | `etn-navbar` plus extra classes |
//! | `style` | inline CSS text, or absent |
//! | `title` | brand text, used when there is no title link |
//! | `brand_link` | rendered title link, or undefined |
//! | `links` | rendered `<a>` markup, one per link |
//! | `selector` | rendered theme selector |
//!
//! Click handling is separate from rendering. A host forwards a click to
//! [`ThemeNavBar::click`]; a link with a handler runs it and reports
//! [`Navigation::Handled`], so the host suppresses default navigation.

use std::fmt;
use std::rc::Rc;

use evolution_theme_core::ThemeStore;
use minijinja::{context, Value};
use serde::Serialize;

use crate::attrs::{class_list, InlineStyle};
use crate::engine::{MarkupEngine, LINK_TEMPLATE, NAVBAR_TEMPLATE};
use crate::error::RenderError;
use crate::selector::{ThemeOptions, ThemeSelector};

/// Base class of the `<nav>` element.
pub const NAVBAR_CLASS: &str = "etn-navbar";
/// Class of the brand element.
pub const BRAND_CLASS: &str = "etn-navbar-brand";
/// Class of each link in the list.
pub const LINK_CLASS: &str = "etn-navbar-link";

const DEFAULT_TITLE: &str = "My App";

/// Click handler attached to a [`NavLink`].
pub type ClickHandler = Rc<dyn Fn()>;

/// Custom link markup. Used for the title link and every list link.
pub type LinkRenderer = Rc<dyn Fn(&LinkParts) -> String>;

/// One entry of the navbar's link list.
#[derive(Clone)]
pub struct NavLink {
    label: String,
    href: String,
    on_click: Option<ClickHandler>,
}

impl NavLink {
    /// Creates a link that navigates to `href`.
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            on_click: None,
        }
    }

    /// Attaches a click handler, which replaces default navigation.
    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_click = Some(Rc::new(handler));
        self
    }

    /// The link text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The link target.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Returns true if a click handler is attached.
    pub fn has_handler(&self) -> bool {
        self.on_click.is_some()
    }
}

impl fmt::Debug for NavLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavLink")
            .field("label", &self.label)
            .field("href", &self.href)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

/// What a link renderer receives for each link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkParts {
    pub href: String,
    pub content: String,
    pub class: String,
}

/// Which navbar element was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// The brand title.
    Title,
    /// The link at this position in the list.
    Link(usize),
}

/// Outcome of a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Navigate to the link's target.
    Follow(String),
    /// A handler ran; default navigation is suppressed.
    Handled,
}

#[derive(Serialize)]
struct LinkView<'a> {
    href: &'a str,
    class: &'a str,
    content: &'a str,
    handler: Option<usize>,
}

/// A navigation bar with an embedded theme selector.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use evolution_theme_core::ThemeStore;
/// use evolution_theme_render::{LinkTarget, MarkupEngine, NavLink, Navigation, ThemeNavBar};
///
/// let store = ThemeStore::builder().build().unwrap();
/// let engine = MarkupEngine::new().unwrap();
///
/// let clicks = Rc::new(Cell::new(0));
/// let counter = clicks.clone();
/// let navbar = ThemeNavBar::new()
///     .title("Docs")
///     .links(vec![
///         NavLink::new("Home", "#home").on_click(move || counter.set(counter.get() + 1)),
///         NavLink::new("Guide", "#guide"),
///     ]);
///
/// let html = navbar.render(&store, &engine).unwrap();
/// assert!(html.contains(r#"<span class="etn-navbar-brand">Docs</span>"#));
///
/// assert_eq!(navbar.click(LinkTarget::Link(0)), Some(Navigation::Handled));
/// assert_eq!(clicks.get(), 1);
/// assert_eq!(
///     navbar.click(LinkTarget::Link(1)),
///     Some(Navigation::Follow("#guide".to_string()))
/// );
/// ```
#[derive(Clone)]
pub struct ThemeNavBar {
    title: String,
    title_href: Option<String>,
    links: Vec<NavLink>,
    link_renderer: Option<LinkRenderer>,
    themes: Option<ThemeOptions>,
    class_name: Option<String>,
    style: InlineStyle,
}

impl Default for ThemeNavBar {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            title_href: None,
            links: vec![
                NavLink::new("Home", "#"),
                NavLink::new("About", "#"),
                NavLink::new("Docs", "#"),
            ],
            link_renderer: None,
            themes: None,
            class_name: None,
            style: InlineStyle::default(),
        }
    }
}

impl ThemeNavBar {
    /// Creates a navbar titled "My App" with Home, About and Docs links.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the brand text.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Turns the title into a link to `href`.
    pub fn title_href(mut self, href: impl Into<String>) -> Self {
        self.title_href = Some(href.into());
        self
    }

    /// Replaces the link list.
    pub fn links(mut self, links: Vec<NavLink>) -> Self {
        self.links = links;
        self
    }

    /// Appends one link.
    pub fn link(mut self, link: NavLink) -> Self {
        self.links.push(link);
        self
    }

    /// Renders the title link and every list link with `renderer`.
    ///
    /// The returned markup is inserted as is, without escaping.
    pub fn link_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&LinkParts) -> String + 'static,
    {
        self.link_renderer = Some(Rc::new(renderer));
        self
    }

    /// Options forwarded to the embedded selector.
    pub fn themes(mut self, themes: ThemeOptions) -> Self {
        self.themes = Some(themes);
        self
    }

    /// Adds classes next to `etn-navbar`.
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets inline styles on the `<nav>`.
    pub fn style(mut self, style: InlineStyle) -> Self {
        self.style = style;
        self
    }

    /// The link list, in render order.
    pub fn nav_links(&self) -> &[NavLink] {
        &self.links
    }

    /// Builds the embedded selector.
    pub fn selector(&self) -> ThemeSelector {
        match &self.themes {
            Some(themes) => ThemeSelector::new().themes(themes.clone()),
            None => ThemeSelector::new(),
        }
    }

    /// Renders the `<nav>` markup.
    pub fn render(&self, store: &ThemeStore, engine: &MarkupEngine) -> Result<String, RenderError> {
        let brand_link = match &self.title_href {
            Some(href) => {
                let parts = LinkParts {
                    href: href.clone(),
                    content: self.title.clone(),
                    class: BRAND_CLASS.to_string(),
                };
                Value::from_safe_string(self.render_link(engine, &parts, None)?)
            }
            None => Value::UNDEFINED,
        };

        let links = self
            .links
            .iter()
            .enumerate()
            .map(|(index, link)| {
                let parts = LinkParts {
                    href: link.href.clone(),
                    content: link.label.clone(),
                    class: LINK_CLASS.to_string(),
                };
                let handler = link.has_handler().then_some(index);
                self.render_link(engine, &parts, handler)
                    .map(Value::from_safe_string)
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        let selector = self.selector().render(store, engine)?;

        engine.render_value(
            NAVBAR_TEMPLATE,
            context! {
                class => class_list(NAVBAR_CLASS, self.class_name.as_deref()),
                style => self.style.attribute_value(),
                title => &self.title,
                brand_link => brand_link,
                links => links,
                selector => Value::from_safe_string(selector),
            },
        )
    }

    fn render_link(
        &self,
        engine: &MarkupEngine,
        parts: &LinkParts,
        handler: Option<usize>,
    ) -> Result<String, RenderError> {
        if let Some(renderer) = &self.link_renderer {
            return Ok(renderer(parts));
        }
        engine.render_named(
            LINK_TEMPLATE,
            &LinkView {
                href: &parts.href,
                class: &parts.class,
                content: &parts.content,
                handler,
            },
        )
    }

    /// Dispatches a click on `target`.
    ///
    /// A link with a handler runs it exactly once and yields
    /// [`Navigation::Handled`]. Otherwise the link's target is followed.
    /// Returns `None` for a title without a link or an index past the end
    /// of the list.
    pub fn click(&self, target: LinkTarget) -> Option<Navigation> {
        match target {
            LinkTarget::Title => self.title_href.clone().map(Navigation::Follow),
            LinkTarget::Link(index) => {
                let link = self.links.get(index)?;
                match &link.on_click {
                    Some(handler) => {
                        tracing::debug!(link = %link.label, "navbar click handled");
                        handler();
                        Some(Navigation::Handled)
                    }
                    None => Some(Navigation::Follow(link.href.clone())),
                }
            }
        }
    }
}

impl fmt::Debug for ThemeNavBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeNavBar")
            .field("title", &self.title)
            .field("title_href", &self.title_href)
            .field("links", &self.links)
            .field("link_renderer", &self.link_renderer.is_some())
            .field("themes", &self.themes)
            .field("class_name", &self.class_name)
            .field("style", &self.style)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn store() -> ThemeStore {
        ThemeStore::builder().default_theme("dark").build().unwrap()
    }

    fn engine() -> MarkupEngine {
        MarkupEngine::new().unwrap()
    }

    #[test]
    fn test_defaults() {
        let navbar = ThemeNavBar::new();
        let labels: Vec<&str> = navbar.nav_links().iter().map(NavLink::label).collect();
        assert_eq!(labels, vec!["Home", "About", "Docs"]);
        assert!(navbar.nav_links().iter().all(|link| link.href() == "#"));

        let html = navbar.render(&store(), &engine()).unwrap();
        assert!(html.starts_with(r#"<nav class="etn-navbar">"#));
        assert!(html.contains(r#"<span class="etn-navbar-brand">My App</span>"#));
        assert!(html.contains(r##"<li><a href="#" class="etn-navbar-link">Home</a></li>"##));
    }

    #[test]
    fn test_render_order() {
        let html = ThemeNavBar::new()
            .title("Brand")
            .links(vec![NavLink::new("First", "#1"), NavLink::new("Second", "#2")])
            .render(&store(), &engine())
            .unwrap();

        let brand = html.find("Brand").unwrap();
        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        let selector = html.find("<select").unwrap();
        assert!(brand < first && first < second && second < selector);
        assert_eq!(html.matches("<select").count(), 1);
        assert!(html.trim_end().ends_with("</nav>"));
    }

    #[test]
    fn test_title_link() {
        let html = ThemeNavBar::new()
            .title_href("#top")
            .render(&store(), &engine())
            .unwrap();
        assert!(html.contains(r##"<a href="#top" class="etn-navbar-brand">My App</a>"##));
        assert!(!html.contains("<span"));
    }

    #[test]
    fn test_handler_marker() {
        let html = ThemeNavBar::new()
            .links(vec![
                NavLink::new("Plain", "#plain"),
                NavLink::new("Action", "#action").on_click(|| {}),
            ])
            .render(&store(), &engine())
            .unwrap();
        assert!(html.contains(r##"<a href="#plain" class="etn-navbar-link">Plain</a>"##));
        assert!(html.contains(
            r##"<a href="#action" class="etn-navbar-link" data-etn-link="1">Action</a>"##
        ));
    }

    #[test]
    fn test_custom_renderer_for_title_and_links() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let html = ThemeNavBar::new()
            .title_href("#top")
            .links(vec![NavLink::new("Home", "#home")])
            .link_renderer(move |parts: &LinkParts| {
                log.borrow_mut().push(parts.clone());
                format!("<x-link to=\"{}\">{}</x-link>", parts.href, parts.content)
            })
            .render(&store(), &engine())
            .unwrap();

        assert!(html.contains(r##"<x-link to="#top">My App</x-link>"##));
        assert!(html.contains(r##"<li><x-link to="#home">Home</x-link></li>"##));
        assert_eq!(
            *seen.borrow(),
            vec![
                LinkParts {
                    href: "#top".into(),
                    content: "My App".into(),
                    class: BRAND_CLASS.into(),
                },
                LinkParts {
                    href: "#home".into(),
                    content: "Home".into(),
                    class: LINK_CLASS.into(),
                },
            ]
        );
    }

    #[test]
    fn test_forwards_themes_to_selector() {
        let themes = ThemeOptions::from_pairs([("Dark", "dark"), ("Ocean", "ocean")]).unwrap();
        let html = ThemeNavBar::new()
            .themes(themes)
            .render(&store(), &engine())
            .unwrap();
        assert!(html.contains(r#"<option value="dark" selected>Dark</option>"#));
        assert!(html.contains(r#"<option value="ocean">Ocean</option>"#));
        assert!(!html.contains("Forest"));
    }

    #[test]
    fn test_class_and_style() {
        let html = ThemeNavBar::new()
            .class_name("sticky")
            .style(InlineStyle::new().set("position", "sticky"))
            .render(&store(), &engine())
            .unwrap();
        assert!(html.starts_with(r#"<nav class="etn-navbar sticky" style="position: sticky">"#));
    }

    #[test]
    fn test_escapes_title_and_labels() {
        let html = ThemeNavBar::new()
            .title("A & B")
            .links(vec![NavLink::new("<b>", "#")])
            .render(&store(), &engine())
            .unwrap();
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_click_runs_handler_once() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let navbar = ThemeNavBar::new().links(vec![
            NavLink::new("Home", "/").on_click(move || counter.set(counter.get() + 1))
        ]);

        assert_eq!(navbar.click(LinkTarget::Link(0)), Some(Navigation::Handled));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_click_without_handler_follows() {
        let navbar = ThemeNavBar::new().links(vec![NavLink::new("Home", "/")]);
        assert_eq!(
            navbar.click(LinkTarget::Link(0)),
            Some(Navigation::Follow("/".to_string()))
        );
    }

    #[test]
    fn test_click_missing_targets() {
        let navbar = ThemeNavBar::new();
        assert_eq!(navbar.click(LinkTarget::Title), None);
        assert_eq!(navbar.click(LinkTarget::Link(3)), None);

        let linked = navbar.title_href("#top");
        assert_eq!(
            linked.click(LinkTarget::Title),
            Some(Navigation::Follow("#top".to_string()))
        );
    }

    #[test]
    fn test_render_does_not_invoke_handlers() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        ThemeNavBar::new()
            .links(vec![NavLink::new("Home", "#").on_click(move || counter.set(counter.get() + 1))])
            .render(&store(), &engine())
            .unwrap();
        assert_eq!(count.get(), 0);
    }
}
