//! Computed-style reads and the text parsers hanging off them.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::driver::{Driver, ElementId};
use crate::result::CafeteraResult;

static HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"height\s*:\s*([\d.]+)%").unwrap());

static RGBA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rgba?\((\d+),\s*(\d+),\s*(\d+)").unwrap());

/// Read several computed CSS properties (camelCase names) for one element.
pub async fn get_styles(
    driver: &dyn Driver,
    element: ElementId,
    properties: &[&str],
) -> CafeteraResult<BTreeMap<String, String>> {
    let mut styles = BTreeMap::new();
    for property in properties {
        let value = driver.computed_style(element, property).await?;
        styles.insert((*property).to_string(), value);
    }
    debug!(?styles, "computed styles retrieved");
    Ok(styles)
}

/// Extract the numeric height percentage from an inline `style` string,
/// `0.0` when no height is declared.
#[must_use]
pub fn parse_height_percent(style: &str) -> f64 {
    HEIGHT_RE
        .captures(style)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Normalize `rgba(r, g, b, a)` to `rgb(r, g, b)` so color expectations
/// compare exactly regardless of how the browser reports alpha.
#[must_use]
pub fn normalize_color(color: &str) -> String {
    RGBA_RE.captures(color).map_or_else(
        || color.trim().to_string(),
        |caps| format!("rgb({}, {}, {})", &caps[1], &caps[2], &caps[3]),
    )
}
