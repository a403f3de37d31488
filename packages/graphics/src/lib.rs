//! Drawing surfaces for the 2D frontend.
//!
//! The GUI and the rest of the engine only ever talk to a `DrawSurface`. Two
//! implementations live here: `FrameContent`, which records draw calls, and
//! `Pixmap`, which rasterizes them in software.

#[macro_use]
extern crate tracing;

pub mod surface;
pub mod font;
pub mod frame_content;
pub mod pixmap;


pub use crate::{
    surface::{
        DrawSurface,
        TargetId,
    },
    font::Font,
    frame_content::{
        FrameContent,
        DrawCall,
    },
    pixmap::Pixmap,
};
