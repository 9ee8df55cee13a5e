//! Pixel format negotiation.
//!
//! The request is phrased the way a classic framebuffer descriptor is
//! (color bits, depth bits, stencil bits, double buffering); selection maps it
//! onto the wgpu formats a surface actually supports.

/// Depth buffer bits requested by the scene.
pub const DEPTH_BITS: u8 = 16;

/// Stencil bits requested by the scene.
pub const STENCIL_BITS: u8 = 8;

/// Framebuffer properties requested for the drawing surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelFormatRequest {
    pub color_bits: u8,
    pub double_buffered: bool,
    pub depth_bits: u8,
    pub stencil_bits: u8,
}

impl PixelFormatRequest {
    /// Double-buffered request with a 16-bit depth buffer and 8-bit stencil.
    pub const fn new(color_bits: u8) -> Self {
        Self {
            color_bits,
            double_buffered: true,
            depth_bits: DEPTH_BITS,
            stencil_bits: STENCIL_BITS,
        }
    }

    /// Bits per color channel implied by `color_bits`.
    ///
    /// 16-bit color is RGB565 and asks for 5 bits. Other depths divisible by
    /// three are RGB without alpha (24 -> 8, 30 -> 10, 48 -> 16); depths
    /// divisible by four carry alpha (32 -> 8, 64 -> 16); the rest round up
    /// over three channels. Zero and anything above 64 are not representable.
    pub fn channel_bits(&self) -> Option<u8> {
        match self.color_bits {
            0 => None,
            b if b > 64 => None,
            16 => Some(5),
            b if b % 3 == 0 => Some(b / 3),
            b if b % 4 == 0 => Some(b / 4),
            b => Some(b.div_ceil(3)),
        }
    }
}

/// Concrete surface format chosen for a request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelFormat {
    pub color: wgpu::TextureFormat,
    pub depth_stencil: wgpu::TextureFormat,
    pub present_mode: wgpu::PresentMode,
}

/// Surface-side facts the selection works from.
#[derive(Debug, Clone, Copy)]
pub struct FormatSupport<'a> {
    pub formats: &'a [wgpu::TextureFormat],
    pub present_modes: &'a [wgpu::PresentMode],
    /// Whether `Depth32FloatStencil8` may be used.
    pub depth32_stencil8: bool,
}

/// Chooses the best matching pixel format.
///
/// Color: the supported format with the fewest bits per channel that still
/// covers the request; ties go to sRGB when `prefer_srgb` is set, otherwise
/// to the linear variant, then to surface order.
///
/// Depth/stencil: the smallest wgpu format covering the requested bits.
///
/// Present mode: `double_buffered_mode` for double-buffered requests when
/// supported (falling back to FIFO, which every surface supports), otherwise
/// `Immediate` when supported.
pub fn choose_pixel_format(
    support: FormatSupport<'_>,
    request: &PixelFormatRequest,
    prefer_srgb: bool,
    double_buffered_mode: wgpu::PresentMode,
) -> Result<PixelFormat, String> {
    let channel_bits = request
        .channel_bits()
        .ok_or_else(|| format!("{}-bit color is not representable", request.color_bits))?;

    let color = choose_color_format(support.formats, channel_bits, prefer_srgb).ok_or_else(|| {
        format!(
            "no surface format offers {channel_bits} bits per channel ({} supported)",
            support.formats.len()
        )
    })?;

    let depth_stencil = choose_depth_stencil_format(
        request.depth_bits,
        request.stencil_bits,
        support.depth32_stencil8,
    )
    .ok_or_else(|| {
        format!(
            "no depth format offers {} depth bits with {} stencil bits",
            request.depth_bits, request.stencil_bits
        )
    })?;

    let present_mode = choose_present_mode(
        support.present_modes,
        request.double_buffered,
        double_buffered_mode,
    );

    Ok(PixelFormat {
        color,
        depth_stencil,
        present_mode,
    })
}

/// Bits per channel and sRGB-ness of the color formats a surface may offer.
fn color_format_traits(format: wgpu::TextureFormat) -> Option<(u8, bool)> {
    use wgpu::TextureFormat as F;
    match format {
        F::Bgra8Unorm | F::Rgba8Unorm => Some((8, false)),
        F::Bgra8UnormSrgb | F::Rgba8UnormSrgb => Some((8, true)),
        F::Rgb10a2Unorm => Some((10, false)),
        F::Rgba16Float => Some((16, false)),
        _ => None,
    }
}

fn choose_color_format(
    formats: &[wgpu::TextureFormat],
    channel_bits: u8,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .enumerate()
        .filter_map(|(order, &format)| {
            let (bits, srgb) = color_format_traits(format)?;
            (bits >= channel_bits).then_some((bits, srgb != prefer_srgb, order, format))
        })
        .min_by_key(|&(bits, srgb_mismatch, order, _)| (bits, srgb_mismatch, order))
        .map(|(.., format)| format)
}

fn choose_depth_stencil_format(
    depth_bits: u8,
    stencil_bits: u8,
    depth32_stencil8: bool,
) -> Option<wgpu::TextureFormat> {
    use wgpu::TextureFormat as F;
    match (depth_bits, stencil_bits) {
        (0..=16, 0) => Some(F::Depth16Unorm),
        (17..=24, 0) => Some(F::Depth24Plus),
        (25..=32, 0) => Some(F::Depth32Float),
        (0..=24, 1..=8) => Some(F::Depth24PlusStencil8),
        (25..=32, 1..=8) if depth32_stencil8 => Some(F::Depth32FloatStencil8),
        _ => None,
    }
}

fn choose_present_mode(
    supported: &[wgpu::PresentMode],
    double_buffered: bool,
    double_buffered_mode: wgpu::PresentMode,
) -> wgpu::PresentMode {
    let wanted = if double_buffered {
        double_buffered_mode
    } else {
        wgpu::PresentMode::Immediate
    };

    if supported.contains(&wanted) {
        wanted
    } else {
        wgpu::PresentMode::Fifo
    }
}

/// Picks the requested alpha mode when supported, otherwise the surface's first.
pub fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{PresentMode, TextureFormat as F};

    const DESKTOP: [F; 4] = [F::Bgra8UnormSrgb, F::Bgra8Unorm, F::Rgba16Float, F::Rgb10a2Unorm];
    const MODES: [PresentMode; 3] = [PresentMode::Fifo, PresentMode::Mailbox, PresentMode::Immediate];

    fn support(formats: &[F]) -> FormatSupport<'_> {
        FormatSupport {
            formats,
            present_modes: &MODES,
            depth32_stencil8: false,
        }
    }

    #[test]
    fn channel_bits_from_color_depth() {
        assert_eq!(PixelFormatRequest::new(32).channel_bits(), Some(8));
        assert_eq!(PixelFormatRequest::new(24).channel_bits(), Some(8));
        assert_eq!(PixelFormatRequest::new(16).channel_bits(), Some(5));
        assert_eq!(PixelFormatRequest::new(15).channel_bits(), Some(5));
        assert_eq!(PixelFormatRequest::new(30).channel_bits(), Some(10));
        assert_eq!(PixelFormatRequest::new(48).channel_bits(), Some(16));
        assert_eq!(PixelFormatRequest::new(64).channel_bits(), Some(16));
        assert_eq!(PixelFormatRequest::new(0).channel_bits(), None);
        assert_eq!(PixelFormatRequest::new(96).channel_bits(), None);
    }

    #[test]
    fn thirty_two_bits_picks_linear_eight_bit_format() {
        let format =
            choose_pixel_format(support(&DESKTOP), &PixelFormatRequest::new(32), false, PresentMode::Fifo)
                .unwrap();
        assert_eq!(format.color, F::Bgra8Unorm);
    }

    #[test]
    fn classic_depths_pick_eight_bit_channels() {
        for bits in [16, 24] {
            let format =
                choose_pixel_format(support(&DESKTOP), &PixelFormatRequest::new(bits), false, PresentMode::Fifo)
                    .unwrap();
            assert_eq!(format.color, F::Bgra8Unorm, "{bits}-bit color");
        }
    }

    #[test]
    fn srgb_preference_breaks_ties() {
        let format =
            choose_pixel_format(support(&DESKTOP), &PixelFormatRequest::new(32), true, PresentMode::Fifo)
                .unwrap();
        assert_eq!(format.color, F::Bgra8UnormSrgb);
    }

    #[test]
    fn deeper_color_picks_wider_channels() {
        let ten = choose_pixel_format(support(&DESKTOP), &PixelFormatRequest::new(30), false, PresentMode::Fifo)
            .unwrap();
        assert_eq!(ten.color, F::Rgb10a2Unorm);

        let sixteen =
            choose_pixel_format(support(&DESKTOP), &PixelFormatRequest::new(64), false, PresentMode::Fifo)
                .unwrap();
        assert_eq!(sixteen.color, F::Rgba16Float);
    }

    #[test]
    fn unsatisfiable_color_depth_fails() {
        let err = choose_pixel_format(
            support(&[F::Bgra8Unorm]),
            &PixelFormatRequest::new(64),
            false,
            PresentMode::Fifo,
        )
        .unwrap_err();
        assert!(err.contains("16 bits per channel"), "{err}");
    }

    #[test]
    fn unknown_surface_formats_are_ignored() {
        assert!(
            choose_pixel_format(support(&[F::R8Unorm]), &PixelFormatRequest::new(32), false, PresentMode::Fifo)
                .is_err()
        );
    }

    #[test]
    fn sixteen_bit_depth_with_stencil_uses_depth24_stencil8() {
        let format =
            choose_pixel_format(support(&DESKTOP), &PixelFormatRequest::new(32), false, PresentMode::Fifo)
                .unwrap();
        assert_eq!(format.depth_stencil, F::Depth24PlusStencil8);
    }

    #[test]
    fn depth_without_stencil() {
        assert_eq!(choose_depth_stencil_format(16, 0, false), Some(F::Depth16Unorm));
        assert_eq!(choose_depth_stencil_format(24, 0, false), Some(F::Depth24Plus));
        assert_eq!(choose_depth_stencil_format(32, 0, false), Some(F::Depth32Float));
    }

    #[test]
    fn deep_depth_with_stencil_needs_feature() {
        assert_eq!(choose_depth_stencil_format(32, 8, false), None);
        assert_eq!(choose_depth_stencil_format(32, 8, true), Some(F::Depth32FloatStencil8));
        assert_eq!(choose_depth_stencil_format(16, 16, true), None);
    }

    #[test]
    fn double_buffering_uses_requested_mode() {
        let format = choose_pixel_format(
            support(&DESKTOP),
            &PixelFormatRequest::new(32),
            false,
            PresentMode::Mailbox,
        )
        .unwrap();
        assert_eq!(format.present_mode, PresentMode::Mailbox);
    }

    #[test]
    fn unsupported_present_mode_falls_back_to_fifo() {
        let only_fifo = [PresentMode::Fifo];
        let support = FormatSupport {
            formats: &DESKTOP,
            present_modes: &only_fifo,
            depth32_stencil8: false,
        };
        let mut request = PixelFormatRequest::new(32);
        request.double_buffered = false;

        let format = choose_pixel_format(support, &request, false, PresentMode::Fifo).unwrap();
        assert_eq!(format.present_mode, PresentMode::Fifo);
    }

    #[test]
    fn alpha_mode_falls_back_to_first_supported() {
        use wgpu::CompositeAlphaMode as A;
        assert_eq!(choose_alpha_mode(&[A::Opaque], Some(A::PreMultiplied)), A::Opaque);
        assert_eq!(choose_alpha_mode(&[A::Opaque, A::PreMultiplied], Some(A::PreMultiplied)), A::PreMultiplied);
        assert_eq!(choose_alpha_mode(&[], None), A::Auto);
    }
}
