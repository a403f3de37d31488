//! The interactive leaf widgets.

pub mod button;
pub mod checkbox;
pub mod slider;
