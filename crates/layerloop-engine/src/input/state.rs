use std::collections::HashSet;

use super::types::{Key, KeyEvent, KeyState, Modifiers};

/// Current keyboard state for a single window.
///
/// Backs `Window::is_key_down`, which the frame scheduler polls for Escape.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a key event. Returns `true` if the held-key set changed.
    pub fn apply_key(&mut self, ev: &KeyEvent) -> bool {
        self.modifiers = ev.modifiers;
        match ev.state {
            KeyState::Pressed => self.keys_down.insert(ev.key),
            KeyState::Released => self.keys_down.remove(&ev.key),
        }
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            // Releases are not delivered while unfocused; avoid stuck keys.
            self.keys_down.clear();
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_then_release_tracks_held_keys() {
        let mut s = InputState::default();
        assert!(s.apply_key(&KeyEvent::new(Key::Escape, KeyState::Pressed)));
        assert!(s.key_down(Key::Escape));

        // Repeat press does not change the set.
        assert!(!s.apply_key(&KeyEvent::new(Key::Escape, KeyState::Pressed)));

        assert!(s.apply_key(&KeyEvent::new(Key::Escape, KeyState::Released)));
        assert!(!s.key_down(Key::Escape));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut s = InputState::default();
        s.set_focused(true);
        s.apply_key(&KeyEvent::new(Key::A, KeyState::Pressed));
        s.set_focused(false);
        assert!(!s.key_down(Key::A));
        assert!(!s.focused);
    }

    #[test]
    fn key_event_updates_modifiers() {
        let mut s = InputState::default();
        let mut ev = KeyEvent::new(Key::S, KeyState::Pressed);
        ev.modifiers.ctrl = true;
        s.apply_key(&ev);
        assert!(s.modifiers.any());
    }
}
