//! Change Notification
//!
//! Single-threaded value cell that tells subscribers about every change.
//! Sessions keep their state here and the UI mirrors it into its store.

use std::cell::RefCell;

type Listener<T> = Box<dyn Fn(&T)>;

pub struct Watched<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<Listener<T>>>,
}

impl<T: Clone> Watched<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.notify();
    }

    /// Mutate in place, then notify
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.borrow_mut());
        self.notify();
    }

    /// Register a listener. It is called once right away with the current value.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) {
        listener(&self.value.borrow());
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn notify(&self) {
        // Listeners get a snapshot so they may read the cell again
        let snapshot = self.get();
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }
}
