//! Subscriber lists for widget events.

use std::fmt::{
    self,
    Formatter,
    Debug,
};


/// Zero or more callbacks, invoked synchronously and in subscription order.
pub struct Observers<T> {
    callbacks: Vec<Box<dyn FnMut(T)>>,
}

impl<T: Copy> Observers<T> {
    pub fn new() -> Self {
        Observers {
            callbacks: Vec::new(),
        }
    }

    pub fn subscribe<F: FnMut(T) + 'static>(&mut self, f: F) {
        self.callbacks.push(Box::new(f));
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub(crate) fn notify(&mut self, arg: T) {
        for callback in &mut self.callbacks {
            callback(arg);
        }
    }
}

impl<T: Copy> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for Observers<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Observers({})", self.callbacks.len())
    }
}


#[test]
fn notifies_in_subscription_order() {
    use std::{
        cell::RefCell,
        rc::Rc,
    };

    let log = Rc::new(RefCell::new(Vec::new()));
    let mut observers = Observers::new();
    let log_a = Rc::clone(&log);
    observers.subscribe(move |v: i32| log_a.borrow_mut().push(("a", v)));
    let log_b = Rc::clone(&log);
    observers.subscribe(move |v: i32| log_b.borrow_mut().push(("b", v)));

    observers.notify(3);
    assert_eq!(*log.borrow(), vec![("a", 3), ("b", 3)]);
    assert_eq!(format!("{:?}", observers), "Observers(2)");
}
