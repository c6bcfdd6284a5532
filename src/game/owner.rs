//! The game owner: the single active scene and its frame step

use super::input::FrameInput;
use super::scene::Scene;

/// Owns the active scene and feeds it one frame at a time
pub struct Game<S: Scene> {
    scene: S,
    attached: bool,
}

impl<S: Scene> Game<S> {
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            attached: false,
        }
    }

    pub fn attach(&mut self) {
        if !self.attached {
            self.scene.on_attach();
            self.attached = true;
        }
    }

    pub fn detach(&mut self) {
        if self.attached {
            self.scene.on_detach();
            self.attached = false;
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Route this frame's input to the scene's collectors, then advance it.
    ///
    /// Keyboard keys stay collected while held and new presses are appended;
    /// touches are replaced every frame.
    pub fn frame(&mut self, input: &FrameInput, dt_ms: f32) {
        if let Some(keyboard) = self.scene.keyboard_input() {
            let mut keys = keyboard.keys().to_vec();
            keys.retain(|key| input.held_keys.contains(key));
            keys.extend_from_slice(&input.pressed_keys);
            keyboard.set_keys(keys);
        }

        if let Some(touch) = self.scene.touch_input() {
            touch.clear_touches();
            for &(x, y) in &input.touches {
                log::trace!("Touch @ {:.3} {:.3}", x, y);
                touch.add_touch(x, y);
            }
        }

        self.scene.update(dt_ms);
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn into_scene(mut self) -> S {
        self.detach();
        self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::input::{KeyboardInput, TouchInput, KEY_LEFT, KEY_SPACE};

    #[derive(Default)]
    struct Recorder {
        keyboard: KeyboardInput,
        touch: TouchInput,
        attaches: usize,
        detaches: usize,
        elapsed: f32,
        seen_keys: Vec<Vec<i32>>,
    }

    impl Scene for Recorder {
        fn on_attach(&mut self) {
            self.attaches += 1;
        }

        fn on_detach(&mut self) {
            self.detaches += 1;
        }

        fn update(&mut self, dt_ms: f32) {
            self.elapsed += dt_ms;
            self.seen_keys.push(self.keyboard.keys().to_vec());
        }

        fn keyboard_input(&mut self) -> Option<&mut KeyboardInput> {
            Some(&mut self.keyboard)
        }

        fn touch_input(&mut self) -> Option<&mut TouchInput> {
            Some(&mut self.touch)
        }
    }

    /// A scene with no input capabilities
    #[derive(Default)]
    struct Ticker {
        frames: usize,
    }

    impl Scene for Ticker {
        fn update(&mut self, _dt_ms: f32) {
            self.frames += 1;
        }
    }

    #[test]
    fn test_keys_kept_while_held() {
        let mut game = Game::new(Recorder::default());
        game.attach();

        game.frame(&FrameInput { held_keys: vec![KEY_SPACE], pressed_keys: vec![KEY_SPACE], ..Default::default() }, 16.0);
        game.frame(&FrameInput { held_keys: vec![KEY_SPACE], ..Default::default() }, 16.0);
        game.frame(&FrameInput { held_keys: vec![KEY_LEFT], pressed_keys: vec![KEY_LEFT], ..Default::default() }, 16.0);
        game.frame(&FrameInput::default(), 16.0);

        assert_eq!(
            game.scene().seen_keys,
            vec![vec![KEY_SPACE], vec![KEY_SPACE], vec![KEY_LEFT], vec![]]
        );
        assert_eq!(game.scene().elapsed, 64.0);
    }

    #[test]
    fn test_touches_replaced_each_frame() {
        let mut game = Game::new(Recorder::default());
        game.frame(&FrameInput { touches: vec![(1.0, 1.0), (2.0, 2.0)], ..Default::default() }, 16.0);
        assert_eq!(game.scene().touch.touches().len(), 2);

        game.frame(&FrameInput { touches: vec![(3.0, 3.0)], ..Default::default() }, 16.0);
        assert_eq!(game.scene().touch.touches(), &[(3.0, 3.0)]);
    }

    #[test]
    fn test_scene_without_input_still_updates() {
        let mut game = Game::new(Ticker::default());
        game.frame(&FrameInput { pressed_keys: vec![KEY_SPACE], ..Default::default() }, 16.0);
        assert_eq!(game.scene().frames, 1);
    }

    #[test]
    fn test_attach_and_detach_once() {
        let mut game = Game::new(Recorder::default());
        game.attach();
        game.attach();
        assert!(game.is_attached());
        game.detach();
        game.detach();

        let scene = game.into_scene();
        assert_eq!(scene.attaches, 1);
        assert_eq!(scene.detaches, 1);
    }

    #[test]
    fn test_boxed_scene() {
        let mut game: Game<Box<dyn Scene>> = Game::new(Box::new(Ticker::default()));
        game.attach();
        game.frame(&FrameInput::default(), 16.0);
        assert!(game.is_attached());
    }
}
