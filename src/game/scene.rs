//! Scene trait

use super::input::{KeyboardInput, TouchInput};

/// Something the game loop can attach, advance and detach.
///
/// Input is opt-in: a scene that wants keyboard or touch events returns its
/// collector from the matching slot, and the loop fills it before `update`.
pub trait Scene {
    fn on_attach(&mut self) {}

    fn on_detach(&mut self) {}

    /// Advance by `dt_ms` milliseconds of wall time
    fn update(&mut self, dt_ms: f32);

    fn keyboard_input(&mut self) -> Option<&mut KeyboardInput> {
        None
    }

    fn touch_input(&mut self) -> Option<&mut TouchInput> {
        None
    }
}

impl<S: Scene + ?Sized> Scene for Box<S> {
    fn on_attach(&mut self) {
        (**self).on_attach()
    }

    fn on_detach(&mut self) {
        (**self).on_detach()
    }

    fn update(&mut self, dt_ms: f32) {
        (**self).update(dt_ms)
    }

    fn keyboard_input(&mut self) -> Option<&mut KeyboardInput> {
        (**self).keyboard_input()
    }

    fn touch_input(&mut self) -> Option<&mut TouchInput> {
        (**self).touch_input()
    }
}
