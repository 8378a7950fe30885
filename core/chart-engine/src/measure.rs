//! FILENAME: core/chart-engine/src/measure.rs
//! PURPOSE: Text measurement hook used by the pie label layout.
//! CONTEXT: Left-side labels are right-aligned against the pie, so their width
//! must be known before placement. Hosts with real font metrics plug in their
//! own measurer.

/// Returns `(width, height)` of a text run in canvas units.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// Average glyph width of ~0.6em, height of 1em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = 0.6 * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, f64) -> (f64, f64),
{
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        self(text, font_size)
    }
}
