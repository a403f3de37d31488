//! Errors from building the widget tree.

use crate::widget::WidgetId;
use std::fmt::{
    self,
    Formatter,
    Display,
};


/// Possible errors when trying to add a widget to a container.
///
/// On any of these, the tree is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddWidgetError {
    /// The container already has a child registered under this identifier.
    DuplicateId {
        id: String,
    },
    /// The parent handle names a widget which cannot hold children.
    NotAContainer(WidgetId),
    /// The parent handle does not name a live widget.
    NoSuchWidget(WidgetId),
}

impl Display for AddWidgetError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            AddWidgetError::DuplicateId { id } =>
                write!(f, "duplicate widget identifier {:?}", id),
            AddWidgetError::NotAContainer(parent) =>
                write!(f, "widget {} is not a container", parent.index()),
            AddWidgetError::NoSuchWidget(parent) =>
                write!(f, "no widget with handle {}", parent.index()),
        }
    }
}

impl std::error::Error for AddWidgetError {}
