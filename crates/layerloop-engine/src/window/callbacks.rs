use crate::input::KeyEvent;

/// Framebuffer-resize handler: receives the GPU context and the new size.
pub type ResizeCallback<C> = Box<dyn FnMut(&mut C, u32, u32)>;

/// Keyboard handler.
pub type KeyCallback = Box<dyn FnMut(&KeyEvent)>;

/// One callback slot per event type.
///
/// Registration overwrites the slot; there is no dispatch list.
pub struct Callbacks<C> {
    resize: Option<ResizeCallback<C>>,
    key: Option<KeyCallback>,
}

impl<C> Default for Callbacks<C> {
    fn default() -> Self {
        Self {
            resize: None,
            key: None,
        }
    }
}

impl<C> Callbacks<C> {
    /// Stores `callback`, dropping any previous resize handler.
    pub fn set_resize(&mut self, callback: ResizeCallback<C>) {
        if self.resize.replace(callback).is_some() {
            log::trace!("resize callback replaced");
        }
    }

    /// Stores `callback`, dropping any previous key handler.
    pub fn set_key(&mut self, callback: KeyCallback) {
        if self.key.replace(callback).is_some() {
            log::trace!("key callback replaced");
        }
    }

    #[inline]
    pub fn has_resize(&self) -> bool {
        self.resize.is_some()
    }

    #[inline]
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Runs the resize handler, if any. Returns whether one ran.
    pub fn dispatch_resize(&mut self, ctx: &mut C, width: u32, height: u32) -> bool {
        match self.resize.as_mut() {
            Some(cb) => {
                cb(ctx, width, height);
                true
            }
            None => false,
        }
    }

    /// Runs the key handler, if any. Returns whether one ran.
    pub fn dispatch_key(&mut self, event: &KeyEvent) -> bool {
        match self.key.as_mut() {
            Some(cb) => {
                cb(event);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::input::{Key, KeyState};

    #[test]
    fn empty_slots_dispatch_nothing() {
        let mut cbs: Callbacks<Vec<(u32, u32)>> = Callbacks::default();
        let mut ctx = Vec::new();
        assert!(!cbs.dispatch_resize(&mut ctx, 1, 1));
        assert!(!cbs.dispatch_key(&KeyEvent::new(Key::A, KeyState::Pressed)));
        assert!(ctx.is_empty());
    }

    #[test]
    fn resize_callback_receives_context_and_size() {
        let mut cbs: Callbacks<Vec<(u32, u32)>> = Callbacks::default();
        cbs.set_resize(Box::new(|ctx, w, h| ctx.push((w, h))));
        assert!(cbs.has_resize());
        assert!(!cbs.has_key());

        let mut ctx = Vec::new();
        assert!(cbs.dispatch_resize(&mut ctx, 800, 600));
        assert_eq!(ctx, [(800, 600)]);
    }

    #[test]
    fn second_resize_registration_replaces_first() {
        let mut cbs: Callbacks<Vec<&'static str>> = Callbacks::default();
        cbs.set_resize(Box::new(|ctx, _, _| ctx.push("first")));
        cbs.set_resize(Box::new(|ctx, _, _| ctx.push("second")));

        let mut ctx = Vec::new();
        cbs.dispatch_resize(&mut ctx, 1, 1);
        assert_eq!(ctx, ["second"]);
    }

    #[test]
    fn second_key_registration_replaces_first() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut cbs: Callbacks<()> = Callbacks::default();

        let s = seen.clone();
        cbs.set_key(Box::new(move |_| s.borrow_mut().push("first")));
        let s = seen.clone();
        cbs.set_key(Box::new(move |_| s.borrow_mut().push("second")));

        cbs.dispatch_key(&KeyEvent::new(Key::Space, KeyState::Pressed));
        assert_eq!(*seen.borrow(), ["second"]);
    }
}
