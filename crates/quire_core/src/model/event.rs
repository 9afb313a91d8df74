//! Per-container observer registration.
//!
//! # Responsibility
//! - Hold the subscriber callbacks a document container notifies on change.
//! - Keep subscription handles stable so callers can unlisten later.
//!
//! # Invariants
//! - Dispatch order is registration order.
//! - Dispatch happens after the mutation it describes has been applied.
//! - Callbacks must not register or remove listeners on the same list
//!   while a dispatch is running.

use std::cell::{Cell, RefCell};

/// Handle returned by [`Listeners::listen`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Ordered list of subscriber callbacks for one event type.
///
/// Single-threaded by design; interior mutability lets a container emit
/// through a shared borrow while its own fields stay borrowed.
pub struct Listeners<E> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, Box<dyn FnMut(&E)>)>>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Registers a callback; it receives every event emitted afterwards.
    pub fn listen(&self, callback: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.entries.borrow_mut().push((id, Box::new(callback)));
        id
    }

    /// Removes one subscription. Returns whether the handle was known.
    pub fn unlisten(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Broadcasts one event to every subscriber, in registration order.
    pub fn emit(&self, event: &E) {
        for (_, callback) in self.entries.borrow_mut().iter_mut() {
            callback(event);
        }
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Listeners;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_reaches_listeners_in_registration_order() {
        let listeners = Listeners::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        listeners.listen(move |value: &u32| first.borrow_mut().push(("first", *value)));
        let second = Rc::clone(&seen);
        listeners.listen(move |value: &u32| second.borrow_mut().push(("second", *value)));

        listeners.emit(&7);
        assert_eq!(&*seen.borrow(), &[("first", 7), ("second", 7)]);
    }

    #[test]
    fn unlisten_stops_delivery() {
        let listeners = Listeners::new();
        let seen = Rc::new(RefCell::new(0u32));

        let sink = Rc::clone(&seen);
        let id = listeners.listen(move |value: &u32| *sink.borrow_mut() += value);

        listeners.emit(&1);
        assert!(listeners.unlisten(id));
        assert!(!listeners.unlisten(id));
        listeners.emit(&1);

        assert_eq!(*seen.borrow(), 1);
    }
}
