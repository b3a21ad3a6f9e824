//! Class and inline-style overrides shared by the components.

/// Joins a component's base class with caller-supplied extra classes.
///
/// ```rust
/// use evolution_theme_render::class_list;
///
/// assert_eq!(class_list("etn-navbar", None), "etn-navbar");
/// assert_eq!(class_list("etn-navbar", Some("sticky dark")), "etn-navbar sticky dark");
/// assert_eq!(class_list("etn-navbar", Some("")), "etn-navbar");
/// ```
pub fn class_list(base: &str, extra: Option<&str>) -> String {
    match extra.map(str::trim) {
        Some(extra) if !extra.is_empty() => format!("{} {}", base, extra),
        _ => base.to_string(),
    }
}

/// Ordered inline CSS declarations for a component's root element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Creates an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing an earlier value in place.
    pub fn set(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        let property = property.into();
        let value = value.into();
        match self
            .declarations
            .iter_mut()
            .find(|(existing, _)| *existing == property)
        {
            Some(slot) => slot.1 = value,
            None => self.declarations.push((property, value)),
        }
        self
    }

    /// Returns true if no declarations are set.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Renders the declarations as a `style` attribute value.
    pub fn to_css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub(crate) fn attribute_value(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_css_text())
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InlineStyle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(InlineStyle::new(), |style, (property, value)| style.set(property, value))
    }
}
