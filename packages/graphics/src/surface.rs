//! The drawing surface contract.

use crate::font::Font;
use vek::*;


/// Handle to an offscreen render target owned by a surface.
///
/// Only meaningful to the surface which created it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

/// Something 2D primitives can be drawn onto.
///
/// All coordinates are integer pixels. Rectangles are given as top-left
/// corner plus width and height, and cover `x..x + w` by `y..y + h`.
///
/// Drawing goes to the screen unless redirected with `begin_target`. Clip
/// regions nest; `end_clip` restores whichever clip was in effect before the
/// matching `begin_clip`.
pub trait DrawSurface {
    /// Set the color used by subsequent primitive draws.
    fn set_color(&mut self, color: Rgb<u8>);

    /// Fill a rectangle with the current color.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Draw the one pixel outline of a rectangle with the current color.
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Draw a horizontal line from `x1` to `x2` inclusive.
    fn draw_h_line(&mut self, x1: i32, x2: i32, y: i32);

    fn begin_clip(&mut self, x: i32, y: i32, w: i32, h: i32);

    fn end_clip(&mut self);

    /// Blit a run of glyphs from `font`, left to right, starting at `x, y`.
    fn draw_text(&mut self, x: i32, y: i32, font: &Font, text: &str);

    /// Allocate an offscreen target of the given size.
    fn create_target(&mut self, w: i32, h: i32) -> TargetId;

    /// Release an offscreen target. Unknown ids are ignored.
    fn destroy_target(&mut self, target: TargetId);

    /// Redirect all drawing to `target` until `end_target`.
    fn begin_target(&mut self, target: TargetId);

    fn end_target(&mut self);

    /// Clear whatever is currently being drawn to.
    fn clear(&mut self);

    /// Composite an offscreen target onto whatever is currently being drawn to.
    fn draw_target(&mut self, target: TargetId, x: i32, y: i32);
}
