//! The platformer gate shown before the portfolio
//!
//! Simulation (`input`, `physics`, `collectible`, `session`) is plain data that
//! never draws; `render` and `page` sit on top of it.

mod camera;
mod collectible;
mod input;
mod level;
mod page;
mod physics;
mod render;
mod session;
mod settings;
mod timer;

pub use level::{load_level, LevelDef};
pub use page::{GamePage, GamePageAction};
pub use settings::GameSettings;
pub use timer::TimerQueue;
