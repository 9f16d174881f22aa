use crate::error::{SketchError, SketchResult};

pub const DEFAULT_STROKE_COLOR: &str = "#000";
pub const DEFAULT_STROKE_WIDTH: u32 = 5;
/// Widest stroke accepted. Far past any usable brush, and well inside what the
/// rasterizer can still stroke.
pub const MAX_STROKE_WIDTH: u32 = 1000;

/// A color as the user typed it, plus the RGBA value it resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeColor {
    spec: String,
    rgba: [u8; 4],
}

impl StrokeColor {
    /// Accepts any CSS color string (`"#f00"`, `"red"`, `"rgb(0 0 255)"`, ...)
    pub fn parse(spec: &str) -> SketchResult<Self> {
        let color = csscolorparser::parse(spec)
            .map_err(|_| SketchError::InvalidColor(spec.to_owned()))?;
        Ok(Self {
            spec: spec.to_owned(),
            rgba: color.to_rgba8(),
        })
    }

    /// The string exactly as it was supplied
    pub fn as_str(&self) -> &str {
        &self.spec
    }

    pub fn rgba(&self) -> [u8; 4] {
        self.rgba
    }
}

impl Default for StrokeColor {
    fn default() -> Self {
        Self {
            spec: DEFAULT_STROKE_COLOR.to_owned(),
            rgba: [0, 0, 0, 255],
        }
    }
}

/// Immutable snapshot of the current stroke color and width.
///
/// Controls never mutate a snapshot in place: each change produces a new value
/// which the session stores and hands to the renderer explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingParams {
    stroke_color: StrokeColor,
    stroke_width: u32,
}

impl Default for DrawingParams {
    fn default() -> Self {
        Self {
            stroke_color: StrokeColor::default(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl DrawingParams {
    pub fn new(stroke_color: StrokeColor, stroke_width: u32) -> SketchResult<Self> {
        if stroke_width == 0 || stroke_width > MAX_STROKE_WIDTH {
            return Err(SketchError::InvalidWidth(stroke_width.to_string()));
        }
        Ok(Self {
            stroke_color,
            stroke_width,
        })
    }

    pub fn stroke_color(&self) -> &StrokeColor {
        &self.stroke_color
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    /// New snapshot with the color replaced; the width is carried over.
    pub fn with_color(&self, spec: &str) -> SketchResult<Self> {
        Ok(Self {
            stroke_color: StrokeColor::parse(spec)?,
            stroke_width: self.stroke_width,
        })
    }

    /// New snapshot with the width parsed from the width control's text.
    pub fn with_width_input(&self, input: &str) -> SketchResult<Self> {
        Ok(Self {
            stroke_color: self.stroke_color.clone(),
            stroke_width: parse_width(input)?,
        })
    }
}

/// Reads the leading integer of `input`.
///
/// Leading whitespace and a `+` sign are skipped, anything after the digits is
/// ignored, so `"12.7"` gives 12 and `"8px"` gives 8. Input without leading
/// digits, negative numbers, zero and anything above [`MAX_STROKE_WIDTH`] are
/// rejected; the caller keeps its previous width in that case.
pub fn parse_width(input: &str) -> SketchResult<u32> {
    let invalid = || SketchError::InvalidWidth(input.to_owned());

    let trimmed = input.trim_start();
    let unsigned = match trimmed.strip_prefix('-') {
        Some(_) => return Err(invalid()),
        None => trimmed.strip_prefix('+').unwrap_or(trimmed),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    match unsigned[..end].parse::<u32>() {
        Ok(width) if (1..=MAX_STROKE_WIDTH).contains(&width) => Ok(width),
        _ => Err(invalid()),
    }
}
