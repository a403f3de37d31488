//! Fixed-size bitmap fonts.

use std::{
    path::Path,
    sync::Arc,
};
use anyhow::*;
use image::{
    DynamicImage,
    RgbaImage,
};
use vek::*;


/// Side length of a glyph cell, in pixels.
pub const GLYPH_SIZE: i32 = 8;

/// Number of glyph cells per row of the atlas.
const CELLS_PER_ROW: u32 = 16;

const FIRST_GLYPH: u32 = ' ' as u32;
const LAST_GLYPH: u32 = '~' as u32;


/// Monospace bitmap font backed by a glyph atlas.
///
/// The atlas is a grid of 8x8 cells, 16 per row, indexed by character code,
/// so that printable ASCII (space through tilde) starts at the third row.
/// Characters outside that range render as a space.
///
/// A font without an atlas still has metrics, and is useful wherever text only
/// needs to be measured or recorded.
#[derive(Debug, Clone, Default)]
pub struct Font {
    atlas: Option<Arc<RgbaImage>>,
}

impl Font {
    /// Font with metrics but no glyph images.
    pub fn blank() -> Self {
        Font { atlas: None }
    }

    pub fn from_image(image: DynamicImage) -> Self {
        let atlas = image.to_rgba8();
        debug!(w = atlas.width(), h = atlas.height(), "loaded font atlas");
        Font { atlas: Some(Arc::new(atlas)) }
    }

    /// Load a font atlas from an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("unable to load font atlas {}", path.display()))?;
        Ok(Self::from_image(image))
    }

    pub fn glyph_size(&self) -> i32 {
        GLYPH_SIZE
    }

    pub fn atlas(&self) -> Option<&RgbaImage> {
        self.atlas.as_deref()
    }

    /// Pixel size of `text` when drawn on a single line.
    pub fn measure(&self, text: &str) -> Extent2<i32> {
        Extent2::new(text.chars().count() as i32 * GLYPH_SIZE, GLYPH_SIZE)
    }

    /// Region of the atlas holding the glyph for `c`.
    pub fn glyph_rect(&self, c: char) -> Rect<i32, i32> {
        let mut code = c as u32;
        if !(FIRST_GLYPH..=LAST_GLYPH).contains(&code) {
            code = FIRST_GLYPH;
        }
        Rect::new(
            ((code % CELLS_PER_ROW) as i32) * GLYPH_SIZE,
            ((code / CELLS_PER_ROW) as i32) * GLYPH_SIZE,
            GLYPH_SIZE,
            GLYPH_SIZE,
        )
    }
}


#[test]
fn glyph_rect_indexes_ascii_grid() {
    let font = Font::blank();
    assert_eq!(font.glyph_rect(' '), Rect::new(0, 16, 8, 8));
    assert_eq!(font.glyph_rect('A'), Rect::new(8, 32, 8, 8));
    assert_eq!(font.glyph_rect('~'), Rect::new(112, 56, 8, 8));
}

#[test]
fn unknown_glyph_falls_back_to_space() {
    let font = Font::blank();
    assert_eq!(font.glyph_rect('\n'), font.glyph_rect(' '));
    assert_eq!(font.glyph_rect('é'), font.glyph_rect(' '));
}

#[test]
fn measure_counts_chars() {
    let font = Font::blank();
    assert_eq!(font.measure("OK"), Extent2::new(16, 8));
    assert_eq!(font.measure(""), Extent2::new(0, 8));
}
