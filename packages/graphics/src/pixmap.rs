//! Software rasterizer surface.

use crate::{
    surface::{
        DrawSurface,
        TargetId,
    },
    font::Font,
};
use std::path::Path;
use anyhow::*;
use image::RgbaImage;
use slab::Slab;
use vek::*;


const CLEAR_COLOR: [u8; 4] = [0, 0, 0, 0xff];


/// Drawing surface which rasterizes into in-memory RGBA images.
///
/// Offscreen targets are separate images, composited onto the screen (or
/// onto another target) with alpha blending.
#[derive(Debug)]
pub struct Pixmap {
    screen: RgbaImage,
    targets: Slab<RgbaImage>,
    current_target: Option<usize>,
    color: Rgb<u8>,
    clip_stack: Vec<Rect<i32, i32>>,
}

impl Pixmap {
    pub fn new(w: u32, h: u32) -> Self {
        Pixmap {
            screen: RgbaImage::from_pixel(w, h, image::Rgba(CLEAR_COLOR)),
            targets: Slab::new(),
            current_target: None,
            color: Rgb::new(0xff, 0xff, 0xff),
            clip_stack: Vec::new(),
        }
    }

    pub fn screen(&self) -> &RgbaImage {
        &self.screen
    }

    pub fn target(&self, target: TargetId) -> Option<&RgbaImage> {
        self.targets.get(target.0 as usize)
    }

    /// Write the screen to an image file, format chosen by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.screen.save(path)
            .with_context(|| format!("unable to save screen to {}", path.display()))?;
        info!(path = %path.display(), "saved screen");
        Ok(())
    }

    fn canvas(&mut self) -> &mut RgbaImage {
        match self.current_target {
            Some(idx) => &mut self.targets[idx],
            None => &mut self.screen,
        }
    }

    /// Region of the current canvas drawing may touch.
    fn drawable_area(&mut self) -> Rect<i32, i32> {
        let canvas = self.canvas();
        let bounds = Rect::new(0, 0, canvas.width() as i32, canvas.height() as i32);
        match self.clip_stack.last() {
            Some(&clip) => intersection(bounds, clip),
            None => bounds,
        }
    }

    fn fill(&mut self, rect: Rect<i32, i32>) {
        let area = intersection(self.drawable_area(), rect);
        let pixel = image::Rgba([self.color.r, self.color.g, self.color.b, 0xff]);
        let canvas = self.canvas();
        for y in area.y..area.y + area.h {
            for x in area.x..area.x + area.w {
                canvas.put_pixel(x as u32, y as u32, pixel);
            }
        }
    }

    /// Alpha-blend `src_rect` of `src` onto the current canvas at `dst`.
    fn blend(&mut self, src: &RgbaImage, src_rect: Rect<i32, i32>, dst: Vec2<i32>) {
        let area = intersection(
            self.drawable_area(),
            Rect::new(dst.x, dst.y, src_rect.w, src_rect.h),
        );
        let canvas = self.canvas();
        for y in area.y..area.y + area.h {
            for x in area.x..area.x + area.w {
                let sx = src_rect.x + x - dst.x;
                let sy = src_rect.y + y - dst.y;
                if sx < 0 || sy < 0 || sx >= src.width() as i32 || sy >= src.height() as i32 {
                    continue;
                }
                let s = src.get_pixel(sx as u32, sy as u32).0;
                let d = canvas.get_pixel_mut(x as u32, y as u32);
                d.0 = blend_pixel(s, d.0);
            }
        }
    }
}

fn intersection(a: Rect<i32, i32>, b: Rect<i32, i32>) -> Rect<i32, i32> {
    let x0 = a.x.max(b.x);
    let y0 = a.y.max(b.y);
    let x1 = (a.x + a.w).min(b.x + b.w);
    let y1 = (a.y + a.h).min(b.y + b.h);
    Rect::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
}

fn blend_pixel(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let a = src[3] as u32;
    match a {
        0 => dst,
        0xff => src,
        _ => {
            let mut out = [0; 4];
            for i in 0..3 {
                out[i] = ((src[i] as u32 * a + dst[i] as u32 * (0xff - a)) / 0xff) as u8;
            }
            out[3] = (a + dst[3] as u32 * (0xff - a) / 0xff).min(0xff) as u8;
            out
        }
    }
}

impl DrawSurface for Pixmap {
    fn set_color(&mut self, color: Rgb<u8>) {
        self.color = color;
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.fill(Rect::new(x, y, w, h));
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.fill(Rect::new(x, y, w, 1));
        self.fill(Rect::new(x, y + h - 1, w, 1));
        self.fill(Rect::new(x, y, 1, h));
        self.fill(Rect::new(x + w - 1, y, 1, h));
    }

    fn draw_h_line(&mut self, x1: i32, x2: i32, y: i32) {
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        self.fill(Rect::new(x1, y, x2 - x1 + 1, 1));
    }

    fn begin_clip(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let clip = Rect::new(x, y, w.max(0), h.max(0));
        let clip = match self.clip_stack.last() {
            Some(&outer) => intersection(outer, clip),
            None => clip,
        };
        self.clip_stack.push(clip);
    }

    fn end_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            warn!("end_clip without matching begin_clip");
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, font: &Font, text: &str) {
        let atlas = match font.atlas() {
            Some(atlas) => atlas,
            None => return,
        };
        let glyph_size = font.glyph_size();
        for (i, c) in text.chars().enumerate() {
            let dst = Vec2::new(x + i as i32 * glyph_size, y);
            self.blend(atlas, font.glyph_rect(c), dst);
        }
    }

    fn create_target(&mut self, w: i32, h: i32) -> TargetId {
        let image = RgbaImage::new(w.max(0) as u32, h.max(0) as u32);
        let idx = self.targets.insert(image);
        trace!(idx, w, h, "created offscreen target");
        TargetId(idx as u32)
    }

    fn destroy_target(&mut self, target: TargetId) {
        let idx = target.0 as usize;
        if self.current_target == Some(idx) {
            self.current_target = None;
        }
        if self.targets.contains(idx) {
            self.targets.remove(idx);
        }
    }

    fn begin_target(&mut self, target: TargetId) {
        let idx = target.0 as usize;
        if self.targets.contains(idx) {
            self.current_target = Some(idx);
        } else {
            warn!(idx, "begin_target with unknown target");
        }
    }

    fn end_target(&mut self) {
        self.current_target = None;
    }

    fn clear(&mut self) {
        let pixel = image::Rgba(CLEAR_COLOR);
        for p in self.canvas().pixels_mut() {
            *p = pixel;
        }
    }

    fn draw_target(&mut self, target: TargetId, x: i32, y: i32) {
        let idx = target.0 as usize;
        if self.current_target == Some(idx) || !self.targets.contains(idx) {
            return;
        }
        // take the source out so it can be read while the canvas is borrowed
        let src = std::mem::replace(&mut self.targets[idx], RgbaImage::new(0, 0));
        let src_rect = Rect::new(0, 0, src.width() as i32, src.height() as i32);
        self.blend(&src, src_rect, Vec2::new(x, y));
        self.targets[idx] = src;
    }
}


#[cfg(test)]
fn px(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
    pixmap.screen().get_pixel(x, y).0
}

#[test]
fn fill_rect_respects_clip() {
    let mut pixmap = Pixmap::new(8, 8);
    pixmap.set_color(Rgb::new(10, 20, 30));
    pixmap.begin_clip(2, 2, 2, 2);
    pixmap.fill_rect(0, 0, 8, 8);
    pixmap.end_clip();

    assert_eq!(px(&pixmap, 2, 2), [10, 20, 30, 0xff]);
    assert_eq!(px(&pixmap, 3, 3), [10, 20, 30, 0xff]);
    assert_eq!(px(&pixmap, 4, 4), CLEAR_COLOR);
    assert_eq!(px(&pixmap, 1, 1), CLEAR_COLOR);
}

#[test]
fn nested_clips_intersect() {
    let mut pixmap = Pixmap::new(8, 8);
    pixmap.set_color(Rgb::new(0xff, 0, 0));
    pixmap.begin_clip(0, 0, 4, 4);
    pixmap.begin_clip(2, 2, 6, 6);
    pixmap.fill_rect(0, 0, 8, 8);
    pixmap.end_clip();
    pixmap.end_clip();

    assert_eq!(px(&pixmap, 3, 3), [0xff, 0, 0, 0xff]);
    assert_eq!(px(&pixmap, 5, 5), CLEAR_COLOR);
    assert_eq!(px(&pixmap, 1, 1), CLEAR_COLOR);
}

#[test]
fn outline_and_hline() {
    let mut pixmap = Pixmap::new(8, 8);
    pixmap.set_color(Rgb::new(0, 0xff, 0));
    pixmap.draw_rect(1, 1, 4, 4);
    pixmap.draw_h_line(6, 1, 7);

    assert_eq!(px(&pixmap, 1, 1), [0, 0xff, 0, 0xff]);
    assert_eq!(px(&pixmap, 4, 4), [0, 0xff, 0, 0xff]);
    assert_eq!(px(&pixmap, 2, 2), CLEAR_COLOR);
    assert_eq!(px(&pixmap, 1, 7), [0, 0xff, 0, 0xff]);
    assert_eq!(px(&pixmap, 6, 7), [0, 0xff, 0, 0xff]);
    assert_eq!(px(&pixmap, 0, 7), CLEAR_COLOR);
}

#[test]
fn offscreen_target_composites_onto_screen() {
    let mut pixmap = Pixmap::new(8, 8);
    let target = pixmap.create_target(4, 4);
    pixmap.begin_target(target);
    pixmap.clear();
    pixmap.set_color(Rgb::new(0, 0, 0xff));
    pixmap.fill_rect(0, 0, 2, 2);
    pixmap.end_target();

    // the screen is untouched until the target is composited
    assert_eq!(px(&pixmap, 0, 0), CLEAR_COLOR);

    pixmap.draw_target(target, 4, 4);
    assert_eq!(px(&pixmap, 4, 4), [0, 0, 0xff, 0xff]);
    assert_eq!(px(&pixmap, 6, 6), CLEAR_COLOR);
    assert_eq!(px(&pixmap, 0, 0), CLEAR_COLOR);
}

#[test]
fn text_blits_glyph_cells() {
    let mut atlas = RgbaImage::new(128, 64);
    // paint the top-left pixel of the 'A' cell
    atlas.put_pixel(8, 32, image::Rgba([0xff, 0xff, 0xff, 0xff]));
    let font = Font::from_image(image::DynamicImage::ImageRgba8(atlas));

    let mut pixmap = Pixmap::new(32, 8);
    pixmap.draw_text(0, 0, &font, "AA");

    assert_eq!(px(&pixmap, 0, 0), [0xff, 0xff, 0xff, 0xff]);
    assert_eq!(px(&pixmap, 8, 0), [0xff, 0xff, 0xff, 0xff]);
    assert_eq!(px(&pixmap, 1, 0), CLEAR_COLOR);
}
