use crate::foundation::error::{SplashError, SplashResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Stable index of a drawable shape inside its illustration (document order).
pub struct ShapeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Frame index used when a host samples the splash at a fixed rate.
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rational frame rate.
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Validate and build a frame rate.
    pub fn new(num: u32, den: u32) -> SplashResult<Self> {
        if den == 0 {
            return Err(SplashError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SplashError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Start time of `frame` in seconds.
    pub fn frames_to_secs(self, frame: FrameIndex) -> f64 {
        (frame.0 as f64) * self.frame_duration_secs()
    }

    /// Number of whole frames needed to cover `secs`.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64()).ceil().max(0.0) as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Axis-aligned box in illustration coordinates.
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl BoundingBox {
    /// Box from origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal center.
    pub fn cx(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    pub fn cy(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// `true` when every component is finite and both extents are non-negative.
    pub fn is_well_formed(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Convert to a `kurbo` rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Convert from a `kurbo` rectangle (normalized first).
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Coordinate space of the illustration.
pub struct ViewBox {
    /// Width in user units.
    pub width: f64,
    /// Height in user units.
    pub height: f64,
}

impl ViewBox {
    /// Validate and build a view box.
    pub fn new(width: f64, height: f64) -> SplashResult<Self> {
        let vb = Self { width, height };
        vb.validate()?;
        Ok(vb)
    }

    /// Both extents must be finite and > 0.
    pub fn validate(&self) -> SplashResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(SplashError::validation("view_box.width must be finite and > 0"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(SplashError::validation(
                "view_box.height must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// `true` when `bbox` lies entirely outside the box on either axis.
    ///
    /// A box touching an edge counts as inside.
    pub fn excludes(&self, bbox: &BoundingBox) -> bool {
        bbox.x > self.width
            || bbox.y > self.height
            || bbox.x + bbox.width < 0.0
            || bbox.y + bbox.height < 0.0
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            width: 633.33,
            height: 588.0,
        }
    }
}

/// Straight-alpha RGBA8 color, serialized as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (straight, not premultiplied).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha scaled by `factor` in `[0, 1]`.
    pub fn faded(self, factor: f64) -> Self {
        let a = (f64::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8;
        self.with_alpha(a)
    }

    /// `true` when the RGB channels match, ignoring alpha.
    pub fn same_rgb(self, other: Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    pub fn parse_hex(s: &str) -> SplashResult<Self> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| SplashError::validation(format!("color '{s}' must start with '#'")))?;

        let channel = |i: usize, len: usize| -> SplashResult<u8> {
            let part = hex
                .get(i..i + len)
                .ok_or_else(|| SplashError::validation(format!("color '{s}' is truncated")))?;
            let v = u8::from_str_radix(part, 16)
                .map_err(|_| SplashError::validation(format!("color '{s}' is not hex")))?;
            Ok(if len == 1 { v * 17 } else { v })
        };

        match hex.len() {
            3 => Ok(Self::rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            6 => Ok(Self::rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            8 => Ok(Self {
                r: channel(0, 2)?,
                g: channel(2, 2)?,
                b: channel(4, 2)?,
                a: channel(6, 2)?,
            }),
            _ => Err(SplashError::validation(format!(
                "color '{s}' must have 3, 6 or 8 hex digits"
            ))),
        }
    }

    /// Lowercase hex form; alpha is only written when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = SplashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_hex()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Translate + uniform scale around an anchor, the only transform the dock step animates.
pub struct Transform2D {
    /// Translation applied after scaling.
    pub translate: Vec2,
    /// Uniform scale factor, default 1.
    pub scale: f64,
    /// Scale pivot in page space.
    pub anchor: Point,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
            anchor: Point::ORIGIN,
        }
    }
}

impl Transform2D {
    /// Resolve into an affine matrix.
    pub fn to_affine(self) -> Affine {
        let anchor = self.anchor.to_vec2();
        // T(translate) * T(anchor) * S(scale) * T(-anchor)
        Affine::translate(self.translate)
            * Affine::translate(anchor)
            * Affine::scale(self.scale)
            * Affine::translate(-anchor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
