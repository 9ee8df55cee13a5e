//! Application core.
//!
//! `state` is the pure event dispatch (`AppState` + `Event` -> `Action`);
//! `app` is the controller that owns the scene and window resources and
//! applies the actions. Neither depends on winit's event loop.

mod app;
mod state;

pub use app::{Application, FrameOutcome};
pub use state::{Action, AppState, ESCAPE, Event, Phase, SystemCommand, dispatch};
