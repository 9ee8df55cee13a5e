use crate::scene::ProjectionMode;

/// Character delivered for the escape key.
pub const ESCAPE: char = '\u{1b}';

/// Run phase of the application.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Running,
    /// A quit signal has been enqueued; no further frames are rendered.
    Closing,
}

/// System commands the application may want to veto.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SystemCommand {
    ScreenSaver,
    MonitorPower,
    Other,
}

/// Platform-neutral window event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    /// Window restored/maximized (`minimized == false`) or minimized/hidden.
    Activate { minimized: bool },
    /// Keyboard focus gained or lost.
    Focus(bool),
    SystemCommand(SystemCommand),
    Close,
    /// New client-area size in physical pixels.
    Resize { width: u32, height: u32 },
    /// Character input.
    Char(char),
    Other,
}

/// What the platform adapter has to do after an event was dispatched.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Event consumed, nothing to do.
    None,
    /// Event not handled here; leave it to default platform handling.
    Default,
    Resize { width: u32, height: u32 },
    UpdateProjection(ProjectionMode),
    /// Enqueue the quit signal.
    Quit,
}

/// Process-wide application flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Window is not minimized; frames are rendered only while active.
    pub active: bool,
    pub focused: bool,
    /// Display mode is currently altered.
    pub fullscreen: bool,
    /// Projection selected by the user; reapplied on every resize.
    pub projection: ProjectionMode,
    pub phase: Phase,
}

impl AppState {
    pub const fn new(projection: ProjectionMode) -> Self {
        Self {
            active: true,
            focused: false,
            fullscreen: false,
            projection,
            phase: Phase::Running,
        }
    }

    /// Whether the loop should render a frame when idle.
    #[inline]
    pub fn should_render(&self) -> bool {
        self.active && self.phase == Phase::Running
    }

    #[inline]
    pub fn is_closing(&self) -> bool {
        self.phase == Phase::Closing
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ProjectionMode::default())
    }
}

/// Applies one event to the state.
///
/// Pure: the caller carries out the returned [`Action`].
pub fn dispatch(state: AppState, event: Event) -> (AppState, Action) {
    let mut next = state;

    let action = match event {
        Event::Activate { minimized } => {
            next.active = !minimized;
            Action::None
        }

        Event::Focus(focused) => {
            next.focused = focused;
            Action::None
        }

        Event::SystemCommand(SystemCommand::ScreenSaver | SystemCommand::MonitorPower) if state.focused => {
            Action::None
        }
        Event::SystemCommand(_) => Action::Default,

        Event::Close => request_quit(&mut next),

        Event::Resize { width, height } => Action::Resize { width, height },

        Event::Char(' ') => {
            next.projection = ProjectionMode::Perspective;
            Action::UpdateProjection(ProjectionMode::Perspective)
        }
        Event::Char(ESCAPE) => request_quit(&mut next),
        Event::Char(_) => Action::Default,

        Event::Other => Action::Default,
    };

    (next, action)
}

/// Moves to `Closing`; only the first request enqueues a quit.
fn request_quit(state: &mut AppState) -> Action {
    match state.phase {
        Phase::Running => {
            state.phase = Phase::Closing;
            Action::Quit
        }
        Phase::Closing => Action::None,
    }
}
