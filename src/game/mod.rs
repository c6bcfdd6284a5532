//! Headless game layer built on the automaton
//!
//! Rendering and platform input polling live outside this crate; a platform
//! loop fills a [`FrameInput`] each frame and hands it to a [`Game`].

pub mod arkanoid;
pub mod clock;
pub mod input;
pub mod owner;
pub mod scene;

pub use arkanoid::{ArkanoidScene, Ball};
pub use clock::CellClock;
pub use input::{FrameInput, KeyboardInput, TouchInput, KEY_LEFT, KEY_RIGHT, KEY_SPACE};
pub use owner::Game;
pub use scene::Scene;
