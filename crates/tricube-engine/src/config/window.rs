/// Window setup parameters.
///
/// Immutable once handed to setup; a fullscreen request that cannot be
/// honored is downgraded on the live state, never on the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    /// Drawable width in physical pixels.
    pub width: u32,
    /// Drawable height in physical pixels.
    pub height: u32,
    /// Color depth in bits per pixel.
    pub bits: u8,
    pub fullscreen: bool,
}

impl WindowConfig {
    pub fn new(title: impl Into<String>, width: u32, height: u32, bits: u8, fullscreen: bool) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            bits,
            fullscreen,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("tricube", 800, 600, 32, false)
    }
}
