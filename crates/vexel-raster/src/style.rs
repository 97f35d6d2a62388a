//! Pen, brush and font state
//!
//! Context-wide drawing state passed down to surface primitives.

/// Color (RGBA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Winding convention deciding which regions of a self-intersecting
/// polygon are inside for fill purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Odd-even (alternate) rule
    #[default]
    EvenOdd,
    /// Non-zero winding rule
    NonZero,
}

/// Pen line style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenStyle {
    #[default]
    Solid,
    /// Draws nothing; used to suppress outlines during fill emulation
    Transparent,
}

/// Stroke state: color, width, style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f32,
    pub style: PenStyle,
}

impl Default for Pen {
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

impl Pen {
    pub const fn solid(color: Color, width: f32) -> Self {
        Self { color, width, style: PenStyle::Solid }
    }

    /// Zero-width transparent pen
    pub const fn invisible() -> Self {
        Self { color: Color::TRANSPARENT, width: 0.0, style: PenStyle::Transparent }
    }

    pub fn is_visible(&self) -> bool {
        self.style != PenStyle::Transparent && self.width > 0.0 && self.color.a > 0
    }
}

/// Fill state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brush {
    Solid(Color),
    /// Fills nothing; used to suppress fills during stroke emulation
    Transparent,
}

impl Default for Brush {
    fn default() -> Self {
        Brush::Solid(Color::WHITE)
    }
}

impl Brush {
    pub const fn solid(color: Color) -> Self {
        Brush::Solid(color)
    }

    /// Zero-area brush
    pub const fn invisible() -> Self {
        Brush::Transparent
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Brush::Solid(c) => c.a > 0,
            Brush::Transparent => false,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Brush::Solid(c) => *c,
            Brush::Transparent => Color::TRANSPARENT,
        }
    }
}

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Text state. Glyph shaping and family selection are delegated to the
/// active backend; size, weight and color are all the core carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
}

impl Default for Font {
    fn default() -> Self {
        Self { size: 12.0, weight: FontWeight::Normal, color: Color::BLACK }
    }
}

impl Font {
    pub fn new(size: f32) -> Self {
        Self { size, ..Self::default() }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub fn with_weight(self, weight: FontWeight) -> Self {
        Self { weight, ..self }
    }
}
