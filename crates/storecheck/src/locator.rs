//! Element locators.
//!
//! A [`Locator`] is a (strategy, selector) pair. It is stateless and cheap to
//! build at each call site; resolving it is the driver's job.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy used to interpret a selector string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum By {
    /// CSS class name. Compound names joined with `.` are allowed.
    ClassName,
    /// Raw CSS selector
    Css,
    /// `name` attribute
    Name,
    /// `id` attribute
    Id,
}

impl By {
    fn label(self) -> &'static str {
        match self {
            Self::ClassName => "class",
            Self::Css => "css",
            Self::Name => "name",
            Self::Id => "id",
        }
    }
}

/// Identifies zero or more elements on the page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    /// Lookup strategy
    pub by: By,
    /// Selector interpreted according to `by`
    pub selector: String,
}

impl Locator {
    /// Create a locator from a strategy and selector
    #[must_use]
    pub fn new(by: By, selector: impl Into<String>) -> Self {
        Self {
            by,
            selector: selector.into(),
        }
    }

    /// Locate by class name
    #[must_use]
    pub fn class_name(selector: impl Into<String>) -> Self {
        Self::new(By::ClassName, selector)
    }

    /// Locate by CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(By::Css, selector)
    }

    /// Locate by `name` attribute
    #[must_use]
    pub fn name(selector: impl Into<String>) -> Self {
        Self::new(By::Name, selector)
    }

    /// Locate by `id` attribute
    #[must_use]
    pub fn id(selector: impl Into<String>) -> Self {
        Self::new(By::Id, selector)
    }

    /// Equivalent CSS query for `document.querySelectorAll`
    #[must_use]
    pub fn to_css(&self) -> String {
        match self.by {
            By::ClassName => format!(".{}", self.selector.trim_start_matches('.')),
            By::Css => self.selector.clone(),
            By::Name => format!("[name=\"{}\"]", escape_attr(&self.selector)),
            By::Id => format!("[id=\"{}\"]", escape_attr(&self.selector)),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.by.label(), self.selector)
    }
}

fn escape_attr(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_to_css() {
        assert_eq!(
            Locator::class_name("search-page").to_css(),
            ".search-page"
        );
    }

    #[test]
    fn test_compound_class_name_to_css() {
        let active = Locator::class_name("header-bottom__link.nuxt-link-exact-active");
        assert_eq!(active.to_css(), ".header-bottom__link.nuxt-link-exact-active");
    }

    #[test]
    fn test_css_passthrough() {
        let sel = "button.header-controls__btn[aria-label='Меню профиля']";
        assert_eq!(Locator::css(sel).to_css(), sel);
    }

    #[test]
    fn test_name_and_id_escape_quotes() {
        assert_eq!(Locator::name("search").to_css(), "[name=\"search\"]");
        assert_eq!(Locator::id("a\"b").to_css(), "[id=\"a\\\"b\"]");
    }

    #[test]
    fn test_display() {
        assert_eq!(Locator::id("tid-input").to_string(), "id=tid-input");
    }
}
