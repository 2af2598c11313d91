//! Locator registry primitives.
//!
//! Every page and component declares its element map as `const` [`Locator`]
//! items, so a missing or renamed entry is a compile error rather than a
//! runtime key lookup failure. A locator is a (strategy, selector) pair and
//! knows how to render itself as a JavaScript query expression scoped to an
//! arbitrary root, which is the only form the browser boundary consumes.

use std::borrow::Cow;
use std::fmt;

/// How a selector string is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// CSS selector (e.g. `button.pay`)
    Css,
    /// XPath expression; prefix with `.` to resolve relative to the scope
    XPath,
    /// Exact trimmed text of an anchor element
    LinkText,
    /// Single class name
    ClassName,
    /// Tag name
    TagName,
}

impl Strategy {
    /// Short name used in error messages and logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::XPath => "xpath",
            Self::LinkText => "link-text",
            Self::ClassName => "class",
            Self::TagName => "tag",
        }
    }
}

/// A (strategy, selector) pair naming one semantic element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    /// Selection strategy
    pub strategy: Strategy,
    /// Selector string
    pub selector: Cow<'static, str>,
}

impl Locator {
    /// CSS locator, usable in `const` position
    #[must_use]
    pub const fn css(selector: &'static str) -> Self {
        Self {
            strategy: Strategy::Css,
            selector: Cow::Borrowed(selector),
        }
    }

    /// XPath locator, usable in `const` position
    #[must_use]
    pub const fn xpath(selector: &'static str) -> Self {
        Self {
            strategy: Strategy::XPath,
            selector: Cow::Borrowed(selector),
        }
    }

    /// Link-text locator, usable in `const` position
    #[must_use]
    pub const fn link_text(selector: &'static str) -> Self {
        Self {
            strategy: Strategy::LinkText,
            selector: Cow::Borrowed(selector),
        }
    }

    /// Class-name locator, usable in `const` position
    #[must_use]
    pub const fn class_name(selector: &'static str) -> Self {
        Self {
            strategy: Strategy::ClassName,
            selector: Cow::Borrowed(selector),
        }
    }

    /// Tag-name locator, usable in `const` position
    #[must_use]
    pub const fn tag_name(selector: &'static str) -> Self {
        Self {
            strategy: Strategy::TagName,
            selector: Cow::Borrowed(selector),
        }
    }

    /// CSS locator built at runtime (index-parametrized selectors)
    #[must_use]
    pub fn css_owned(selector: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Css,
            selector: Cow::Owned(selector.into()),
        }
    }

    /// XPath locator built at runtime
    #[must_use]
    pub fn xpath_owned(selector: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::XPath,
            selector: Cow::Owned(selector.into()),
        }
    }

    /// Link-text locator built at runtime (base-URL-dependent link texts)
    #[must_use]
    pub fn link_text_owned(selector: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::LinkText,
            selector: Cow::Owned(selector.into()),
        }
    }

    /// Selector rewritten as a CSS string where the strategy permits it
    fn as_css(&self) -> Option<String> {
        match self.strategy {
            Strategy::Css => Some(self.selector.to_string()),
            Strategy::ClassName => Some(format!(".{}", self.selector)),
            Strategy::TagName => Some(self.selector.to_string()),
            Strategy::XPath | Strategy::LinkText => None,
        }
    }

    /// Render a JavaScript expression evaluating to the first match under
    /// `scope` (an expression such as `document` or an element reference),
    /// or `null` when nothing matches.
    #[must_use]
    pub fn to_query(&self, scope: &str) -> String {
        if let Some(css) = self.as_css() {
            return format!("{scope}.querySelector({css:?})");
        }
        match self.strategy {
            Strategy::XPath => {
                let s = &*self.selector;
                format!(
                    "document.evaluate({s:?}, {scope}, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
                )
            }
            Strategy::LinkText => {
                let s = &*self.selector;
                format!(
                    "(Array.from({scope}.querySelectorAll('a')).find(a => a.textContent.trim() === {s:?}) ?? null)"
                )
            }
            // as_css covered the rest
            Strategy::Css | Strategy::ClassName | Strategy::TagName => unreachable!(),
        }
    }

    /// Render a JavaScript expression evaluating to an array of all matches
    /// under `scope`, in document order.
    #[must_use]
    pub fn to_query_all(&self, scope: &str) -> String {
        if let Some(css) = self.as_css() {
            return format!("Array.from({scope}.querySelectorAll({css:?}))");
        }
        match self.strategy {
            Strategy::XPath => {
                let s = &*self.selector;
                format!(
                    "(() => {{ const r = document.evaluate({s:?}, {scope}, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); return out; }})()"
                )
            }
            Strategy::LinkText => {
                let s = &*self.selector;
                format!(
                    "Array.from({scope}.querySelectorAll('a')).filter(a => a.textContent.trim() === {s:?})"
                )
            }
            Strategy::Css | Strategy::ClassName | Strategy::TagName => unreachable!(),
        }
    }

}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.strategy.as_str(), self.selector)
    }
}
