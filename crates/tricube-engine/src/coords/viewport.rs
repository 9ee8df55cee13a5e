/// Viewport rectangle in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a whole client area of `width` x `height`.
    ///
    /// A zero height is clamped to one.
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        let height = if height == 0 { 1 } else { height };
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clamps the rectangle to a render target of `width` x `height`.
    ///
    /// Returns `None` when nothing of the viewport is left on the target.
    pub fn clamped_to(self, width: u32, height: u32) -> Option<Self> {
        if self.x >= width || self.y >= height {
            return None;
        }

        let clamped = Self::new(
            self.x,
            self.y,
            self.width.min(width - self.x),
            self.height.min(height - self.y),
        );

        if clamped.is_empty() { None } else { Some(clamped) }
    }
}
