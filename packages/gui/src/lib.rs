//! Retained-layout immediate-mode GUI toolkit.
//!
//! Widgets live in a single arena owned by the `Gui`. Each frame the host
//! samples an `InputSnapshot`, hands it to `Gui::update`, which recomputes
//! dirty layouts and runs each widget's interaction state machine, then calls
//! `Gui::render`, which repaints an offscreen target only if something
//! changed and composites it onto the screen every time.

#[macro_use]
extern crate tracing;

pub mod input;
pub mod invalidation;
pub mod geometry;
pub mod error;
pub mod observers;
pub mod widget;
pub mod container;
pub mod layout;
pub mod widgets;
pub mod tree;
pub mod theme;
pub mod settings;
pub mod root;
pub mod tween;


pub use crate::{
    input::{
        InputSnapshot,
        MouseButton,
        UiMouseState,
    },
    error::AddWidgetError,
    widget::{
        Widget,
        WidgetBase,
        WidgetId,
    },
    container::Container,
    layout::{
        Orientation,
        StackLayout,
    },
    widgets::{
        button::Button,
        checkbox::CheckBox,
        slider::Slider,
    },
    tree::WidgetTree,
    theme::{
        Theme,
        DefaultTheme,
        ThemeColors,
    },
    settings::GuiSettings,
    root::Gui,
    tween::{
        Tweener,
        Tween,
        WidgetProperty,
        Easing,
        Repeat,
    },
};
