//! Status strip frame, palette and WS2812 encoding.
//!
//! The strip is driven by a PWM peripheral replaying one duty word per
//! data bit. [`encode`] turns a frame into that word sequence so the
//! board layer only has to start the sequence.

use smart_leds::RGB8;

use crate::channel::Category;
use crate::config::LED_COUNT;

/// Pixel colour when nothing drives it.
pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Colours of one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryColors {
    pub selected: RGB8,
    pub idle: RGB8,
}

/// Category-keyed palette, indexed by [`Category::index`].
pub const PALETTE: [CategoryColors; Category::COUNT] = [
    // Location
    CategoryColors {
        selected: RGB8 { r: 0, g: 255, b: 0 },
        idle: RGB8 { r: 0, g: 0, b: 48 },
    },
    // Height
    CategoryColors {
        selected: RGB8 { r: 255, g: 160, b: 0 },
        idle: RGB8 { r: 32, g: 0, b: 32 },
    },
    // Toggle (hopper)
    CategoryColors {
        selected: RGB8 { r: 255, g: 0, b: 0 },
        idle: RGB8 { r: 24, g: 24, b: 24 },
    },
];

/// Colour of a channel of `category`.
pub fn color(category: Category, selected: bool) -> RGB8 {
    let colors = &PALETTE[category.index()];
    if selected {
        colors.selected
    } else {
        colors.idle
    }
}

/// One colour per pixel of the strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedFrame {
    pixels: [RGB8; LED_COUNT],
}

impl LedFrame {
    /// All pixels off.
    pub const fn dark() -> Self {
        Self {
            pixels: [OFF; LED_COUNT],
        }
    }

    /// Set one pixel. Pixels past the strip are ignored.
    pub fn set(&mut self, pixel: usize, color: RGB8) {
        if let Some(slot) = self.pixels.get_mut(pixel) {
            *slot = color;
        }
    }

    pub fn get(&self, pixel: usize) -> Option<RGB8> {
        self.pixels.get(pixel).copied()
    }

    pub fn pixels(&self) -> &[RGB8; LED_COUNT] {
        &self.pixels
    }
}

impl Default for LedFrame {
    fn default() -> Self {
        Self::dark()
    }
}

// WS2812 timing at a 16 MHz PWM clock with a 20-tick (1.25 µs) period.
// Bit 15 selects the inverted polarity so the line idles low.

/// PWM counter top, one data bit per period.
pub const PWM_MAX_DUTY: u16 = 20;
/// High time for a `1` bit (~0.8 µs).
pub const T1H: u16 = 0x8000 | 13;
/// High time for a `0` bit (~0.4 µs).
pub const T0H: u16 = 0x8000 | 7;
/// Line held low, used for the latch/reset gap.
pub const RES: u16 = 0x8000;

/// Low periods appended after the data (≥ 50 µs reset).
pub const RESET_WORDS: usize = 48;

/// Words in one encoded frame.
pub const PWM_WORDS: usize = LED_COUNT * 24 + RESET_WORDS;

/// Encode `frame` for the strip, scaled by `brightness` (0-255).
///
/// Pixels go out in GRB byte order, most significant bit first.
pub fn encode(frame: &LedFrame, brightness: u8, words: &mut [u16; PWM_WORDS]) {
    let scaled = smart_leds::brightness(frame.pixels.iter().copied(), brightness);
    let mut cursor = 0;
    for pixel in scaled {
        for byte in [pixel.g, pixel.r, pixel.b] {
            for bit in (0..8).rev() {
                words[cursor] = if byte & (1 << bit) != 0 { T1H } else { T0H };
                cursor += 1;
            }
        }
    }
    words[cursor..].fill(RES);
}
