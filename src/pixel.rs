//! # Pixel Types
//!
//! Cell types carried by [`Grid`](crate::grid::Grid) at each pipeline stage:
//!
//! | Stage | Cell type | Range |
//! |-------|-----------|-------|
//! | Decoded | [`Rgb`] | each channel in `[0.0, 1.0]` |
//! | Grayscale | `f64` | `[0.0, 1.0]` |
//! | Quantized | `u8` | `[0, n-1]`, 0 = darkest |
//! | Stippled | [`Binary`] | black or white |

/// Normalized RGB color, each channel in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Normalize 8-bit channels by dividing by 255.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }
}

/// A 1-bit output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binary {
    Black,
    White,
}

impl Binary {
    #[inline]
    pub fn is_black(self) -> bool {
        self == Binary::Black
    }

    /// The opposite color.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Binary::Black => Binary::White,
            Binary::White => Binary::Black,
        }
    }

    /// Normalized RGB equivalent: black is (0,0,0), white is (1,1,1).
    #[inline]
    pub fn to_rgb(self) -> Rgb {
        match self {
            Binary::Black => Rgb::BLACK,
            Binary::White => Rgb::WHITE,
        }
    }

    /// 8-bit RGB channels.
    #[inline]
    pub fn to_rgb8(self) -> [u8; 3] {
        match self {
            Binary::Black => [0, 0, 0],
            Binary::White => [255, 255, 255],
        }
    }
}
