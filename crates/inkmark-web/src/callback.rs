//! Handing asynchronous callbacks to shared state.

use std::cell::RefCell;
use std::rc::Weak;

/// A callback waiting for mutable access to `T`.
pub type Deferred<T> = Box<dyn FnOnce(&mut T)>;

/// Result of [`try_deliver`].
pub enum Delivery<T> {
    Delivered,
    /// The target has been dropped; the callback was discarded.
    Gone,
    /// The target is borrowed (e.g. during a blocking `window.prompt`).
    /// The callback is handed back so it can be queued again.
    Busy(Deferred<T>),
}

/// Run `callback` against `target` if it is alive and not borrowed.
pub fn try_deliver<T>(target: &Weak<RefCell<T>>, callback: Deferred<T>) -> Delivery<T> {
    let Some(target) = target.upgrade() else {
        return Delivery::Gone;
    };
    match target.try_borrow_mut() {
        Ok(mut value) => {
            callback(&mut value);
            Delivery::Delivered
        }
        Err(_) => Delivery::Busy(callback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_delivered() {
        let shared = Rc::new(RefCell::new(0));
        let result = try_deliver(&Rc::downgrade(&shared), Box::new(|n: &mut i32| *n += 1));
        assert!(matches!(result, Delivery::Delivered));
        assert_eq!(*shared.borrow(), 1);
    }

    #[test]
    fn test_busy_hands_callback_back() {
        let shared = Rc::new(RefCell::new(0));
        let weak = Rc::downgrade(&shared);

        let pending = {
            let _guard = shared.borrow_mut();
            match try_deliver(&weak, Box::new(|n: &mut i32| *n = 7)) {
                Delivery::Busy(callback) => callback,
                _ => panic!("expected the callback back while borrowed"),
            }
        };
        assert_eq!(*shared.borrow(), 0);

        // Retried once the borrow is released, the update still lands.
        assert!(matches!(try_deliver(&weak, pending), Delivery::Delivered));
        assert_eq!(*shared.borrow(), 7);
    }

    #[test]
    fn test_gone() {
        let shared = Rc::new(RefCell::new(0));
        let weak = Rc::downgrade(&shared);
        drop(shared);
        assert!(matches!(try_deliver(&weak, Box::new(|n: &mut i32| *n += 1)), Delivery::Gone));
    }
}
