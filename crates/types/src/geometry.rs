use crate::error::InvalidValue;
use serde::{Deserialize, Serialize};

/// Where the generated code image is drawn, in PDF user space (points, origin
/// bottom-left of the page).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlacementRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// A square placement, which is what scannable codes want.
    pub fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, size, size)
    }

    pub fn is_square(&self) -> bool {
        (self.width - self.height).abs() < f32::EPSILON
    }

    /// Every component must be finite and non-negative.
    pub fn validate(&self) -> Result<(), InvalidValue> {
        for (field, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidValue::Placement { field, value });
            }
        }
        Ok(())
    }

    /// Whether the rectangle lies entirely inside `page`.
    pub fn fits_within(&self, page: impl Into<PageBox>) -> bool {
        let page = page.into();
        page.llx <= self.x
            && page.lly <= self.y
            && self.x + self.width <= page.urx
            && self.y + self.height <= page.ury
    }

    /// The rectangle as a PDF `[llx lly urx ury]` quadruple.
    pub fn to_pdf_rect(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// ISO A4 in points.
    pub const A4: PageSize = PageSize {
        width: 595.2756,
        height: 841.8898,
    };

    /// US Letter in points.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// A page's visible region (its MediaBox) in default user space.
///
/// The origin is usually, but not always, `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageBox {
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

impl PageBox {
    pub fn new(llx: f32, lly: f32, urx: f32, ury: f32) -> Self {
        Self { llx, lly, urx, ury }
    }

    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }

    pub fn size(&self) -> PageSize {
        PageSize::new(self.width(), self.height())
    }

    pub fn to_pdf_rect(&self) -> [f32; 4] {
        [self.llx, self.lly, self.urx, self.ury]
    }
}

impl From<PageSize> for PageBox {
    fn from(size: PageSize) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }
}
