//! The shared "needs repaint" flag.

use std::{
    cell::Cell,
    rc::Rc,
};


/// Handle to the GUI's invalidation flag.
///
/// The `Gui` owns the flag; every widget holds a clone of the handle and
/// raises the flag whenever its geometry or visible state changes. Only
/// `Gui::render` lowers it.
#[derive(Debug, Clone)]
pub struct Invalidation(Rc<Cell<bool>>);

impl Invalidation {
    /// A new flag, initially raised so the first render paints.
    pub fn new() -> Self {
        Invalidation(Rc::new(Cell::new(true)))
    }

    pub fn invalidate(&self) {
        self.0.set(true);
    }

    pub fn is_invalidated(&self) -> bool {
        self.0.get()
    }

    /// Lower the flag, returning whether it was raised.
    pub(crate) fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl Default for Invalidation {
    fn default() -> Self {
        Self::new()
    }
}


#[test]
fn clones_share_one_flag() {
    let flag = Invalidation::new();
    let handle = flag.clone();
    assert!(flag.take());
    assert!(!handle.is_invalidated());
    handle.invalidate();
    assert!(flag.is_invalidated());
}
