//! Single-line text fitting.
//!
//! Fitting is two-phase: [`WordDisplay::set_text`] records the new text at the
//! base font size, and [`WordDisplay::settle`] runs once the surface knows its
//! width. Measuring before the layout settles would read a stale width.

use log::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const MIN_FONT_SIZE: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitResult {
    /// Ideal shrink ratio, in (0, 1]
    pub scale: f64,
    /// Font size to apply, floored so the text never re-overflows
    pub font_size: u16,
    pub fits: bool,
}

impl FitResult {
    fn unchanged(base_font_size: u16) -> Self {
        Self {
            scale: 1.0,
            font_size: base_font_size,
            fits: true,
        }
    }

    /// No usable width yet; treated as fitting until the next measurement pass
    pub fn unmeasured(base_font_size: u16) -> Self {
        Self::unchanged(base_font_size)
    }
}

/// Compute the font size that keeps `text` on one line inside
/// `container_width`. `natural_width` must be measured at `base_font_size`.
pub fn fit(
    text: &str,
    container_width: f64,
    natural_width: f64,
    base_font_size: u16,
    safety_padding: f64,
) -> FitResult {
    let base_font_size = base_font_size.max(MIN_FONT_SIZE);

    if text.is_empty() || container_width <= 0.0 || natural_width <= 0.0 {
        return FitResult::unmeasured(base_font_size);
    }

    if natural_width + safety_padding <= container_width {
        return FitResult::unchanged(base_font_size);
    }

    let base = f64::from(base_font_size);
    let available = container_width - safety_padding;
    if available <= 0.0 {
        return FitResult {
            scale: f64::from(MIN_FONT_SIZE) / base,
            font_size: MIN_FONT_SIZE,
            fits: false,
        };
    }

    let scale = available / natural_width;
    // base * available / natural, not base * scale: the latter can land a hair under an integer
    let floored = (base * available / natural_width).floor();
    let font_size = (floored as u16).max(MIN_FONT_SIZE);
    let shrunk_width = natural_width * f64::from(font_size) / base;

    FitResult {
        scale,
        font_size,
        fits: shrunk_width + safety_padding <= container_width,
    }
}

/// Measurement provider of the render surface
pub trait TextMeasure {
    /// Width of `text` laid out on a single line at `font_size`
    fn natural_width(&self, text: &str, font_size: u16) -> f64;
}

/// Terminal measurement: a font size is the glyph pitch in columns. The width
/// is that of the [`spaced`] rendering, which leaves no air after the last glyph.
#[derive(Clone, Copy, Debug, Default)]
pub struct CellMeasure;

impl TextMeasure for CellMeasure {
    fn natural_width(&self, text: &str, font_size: u16) -> f64 {
        spaced(text, font_size).width() as f64
    }
}

/// Lay `text` out at glyph pitch `pitch`: every visible glyph is followed by
/// `pitch - 1` columns of air per column it occupies. Zero-width marks stay
/// glued to their base glyph and the last glyph gets no trailing air.
pub fn spaced(text: &str, pitch: u16) -> String {
    let gap = usize::from(pitch.max(1) - 1);
    let mut out = String::with_capacity(text.len() * (gap + 1));
    let mut pending_gap = 0;

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if w > 0 {
            out.extend(std::iter::repeat(' ').take(pending_gap));
            pending_gap = w * gap;
        }
        out.push(c);
    }
    out
}

/// Text currently on display together with its pending/applied fit
#[derive(Clone, Debug)]
pub struct WordDisplay {
    text: String,
    base_font_size: u16,
    safety_padding: f64,
    font_size: u16,
    last_fit: Option<FitResult>,
    pending: bool,
}

impl WordDisplay {
    pub fn new(base_font_size: u16, safety_padding: f64) -> Self {
        let base_font_size = base_font_size.max(MIN_FONT_SIZE);
        Self {
            text: String::new(),
            base_font_size,
            safety_padding: safety_padding.max(0.0),
            font_size: base_font_size,
            last_fit: None,
            pending: false,
        }
    }

    /// Phase one: swap the text in at the base size and wait for layout
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.font_size = self.base_font_size;
        self.last_fit = None;
        self.pending = true;
    }

    /// The container changed size; refit on the next settle
    pub fn invalidate(&mut self) {
        if !self.text.is_empty() {
            self.font_size = self.base_font_size;
            self.pending = true;
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.font_size = self.base_font_size;
        self.last_fit = None;
        self.pending = false;
    }

    /// Phase two: measure at the base size and apply the fitted size.
    ///
    /// Returns the new fit when a measurement was pending, `None` otherwise.
    /// A zero-width container leaves the measurement pending.
    pub fn settle<M: TextMeasure>(
        &mut self,
        container_width: f64,
        measure: &M,
    ) -> Option<FitResult> {
        if !self.pending {
            return None;
        }

        self.font_size = self.base_font_size;
        let natural = measure.natural_width(&self.text, self.base_font_size);
        let mut result = fit(
            &self.text,
            container_width,
            natural,
            self.base_font_size,
            self.safety_padding,
        );
        if result.font_size < self.base_font_size {
            self.confirm_shrink(&mut result, container_width, measure);
        }

        self.font_size = result.font_size;
        self.last_fit = Some(result);
        self.pending = container_width <= 0.0;

        debug!(
            "fit: text={:?} container={} natural={} -> size={} scale={:.3} fits={}",
            self.text, container_width, natural, result.font_size, result.scale, result.fits
        );
        Some(result)
    }

    /// Re-measure at the shrunk size. A measure that is not proportional to
    /// the font size can still overflow there; step down until it fits.
    fn confirm_shrink<M: TextMeasure>(
        &self,
        result: &mut FitResult,
        container_width: f64,
        measure: &M,
    ) {
        let fits_at = |size: u16| {
            measure.natural_width(&self.text, size) + self.safety_padding <= container_width
        };
        while result.font_size > MIN_FONT_SIZE && !fits_at(result.font_size) {
            result.font_size -= 1;
        }
        result.fits = fits_at(result.font_size);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn base_font_size(&self) -> u16 {
        self.base_font_size
    }

    pub fn last_fit(&self) -> Option<FitResult> {
        self.last_fit
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
