//! FILENAME: core/engine/src/style.rs
//! PURPOSE: Resolved style values and the merge rule used to combine them.
//! CONTEXT: Every style source (zebra striping, row rules, column base style,
//! conditional cell rules) is an immutable patch. Patches are applied in order
//! with `merge`: a later patch overwrites a property only when it sets it.

use parser::{ColumnDirective, FontWeight, StylePayload};
use serde::{Deserialize, Serialize};

/// The visual properties a rule can set on a cell or row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
}

impl StyleProperties {
    pub fn new() -> Self {
        StyleProperties::default()
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.background_color.is_none() && self.font_weight.is_none()
    }

    /// Create a style with a specific background color.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Create a style with a specific text color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Create a style with bold text.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.font_weight = Some(if bold { FontWeight::Bold } else { FontWeight::Normal });
        self
    }

    /// Per-property last-wins merge: properties set in `later` replace ours.
    pub fn merge(&self, later: &StyleProperties) -> StyleProperties {
        StyleProperties {
            color: later.color.clone().or_else(|| self.color.clone()),
            background_color: later
                .background_color
                .clone()
                .or_else(|| self.background_color.clone()),
            font_weight: later.font_weight.or(self.font_weight),
        }
    }

    /// CSS declarations in a fixed order.
    pub fn css_declarations(&self) -> Vec<String> {
        let mut styles = Vec::new();
        if let Some(bg) = &self.background_color {
            styles.push(format!("background-color: {}", bg));
        }
        if let Some(color) = &self.color {
            styles.push(format!("color: {}", color));
        }
        if let Some(weight) = self.font_weight {
            styles.push(format!("font-weight: {}", weight.as_css()));
        }
        styles
    }

    /// Convert to an inline CSS string, e.g. "background-color: #ff0000".
    pub fn to_css(&self) -> String {
        self.css_declarations().join("; ")
    }
}

impl From<&StylePayload> for StyleProperties {
    fn from(payload: &StylePayload) -> Self {
        StyleProperties {
            color: payload.color.clone(),
            background_color: payload.background_color.clone(),
            font_weight: payload.font_weight,
        }
    }
}

/// Applies patches in order, starting from an empty style.
pub fn apply_patches<'a, I>(patches: I) -> StyleProperties
where
    I: IntoIterator<Item = &'a StyleProperties>,
{
    patches
        .into_iter()
        .fold(StyleProperties::new(), |acc, patch| acc.merge(patch))
}

/// Layout declarations for a column (alignment and width).
pub fn column_layout_css(directive: &ColumnDirective) -> Vec<String> {
    let mut styles = Vec::new();
    if let Some(align) = directive.align {
        styles.push(format!("text-align: {}", align.as_css()));
    }
    if let Some(width) = &directive.width {
        styles.push(format!("width: {}", width));
        styles.push(format!("min-width: {}", width));
    }
    styles
}

/// Joins declaration groups into one inline style attribute value.
pub fn join_css<I, S>(groups: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<[String]>,
{
    let mut all: Vec<String> = Vec::new();
    for group in groups {
        all.extend(group.as_ref().iter().cloned());
    }
    all.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_last_wins_per_property() {
        let first = StyleProperties::new().with_color("red").with_background("#eee");
        let second = StyleProperties::new().with_color("green");

        let merged = first.merge(&second);
        assert_eq!(merged.color.as_deref(), Some("green"));
        assert_eq!(merged.background_color.as_deref(), Some("#eee"));
    }

    #[test]
    fn test_apply_patches_in_order() {
        let patches = [
            StyleProperties::new().with_bold(true),
            StyleProperties::new().with_color("blue"),
            StyleProperties::new().with_bold(false),
        ];
        let style = apply_patches(&patches);
        assert_eq!(style.font_weight, Some(FontWeight::Normal));
        assert_eq!(style.color.as_deref(), Some("blue"));
    }

    #[test]
    fn test_css_output() {
        let style = StyleProperties::new()
            .with_color("#333")
            .with_background("#ff0000")
            .with_bold(true);
        assert_eq!(style.to_css(), "background-color: #ff0000; color: #333; font-weight: bold");
        assert_eq!(StyleProperties::new().to_css(), "");
    }

    #[test]
    fn test_column_layout_css() {
        let mut directive = ColumnDirective::new("a");
        directive.align = Some(parser::Align::Right);
        directive.width = Some("80px".to_string());
        assert_eq!(
            column_layout_css(&directive),
            vec!["text-align: right", "width: 80px", "min-width: 80px"]
        );
    }
}
