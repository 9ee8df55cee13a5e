use std::io::{self, BufRead, Write};

use super::backend::DisplayModeRequest;

/// Binary choice offered when the requested fullscreen mode is unavailable.
pub trait FallbackPrompt {
    /// Returns `true` to continue in windowed mode, `false` to abort setup.
    fn offer_windowed(&mut self, request: &DisplayModeRequest) -> bool;
}

impl<F> FallbackPrompt for F
where
    F: FnMut(&DisplayModeRequest) -> bool,
{
    fn offer_windowed(&mut self, request: &DisplayModeRequest) -> bool {
        self(request)
    }
}

/// Fallback policy selected by configuration.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FullscreenFallback {
    /// Ask on the controlling terminal.
    #[default]
    Ask,
    /// Continue in windowed mode without asking.
    Windowed,
    /// Abort setup without asking.
    Abort,
}

impl FallbackPrompt for FullscreenFallback {
    fn offer_windowed(&mut self, request: &DisplayModeRequest) -> bool {
        match self {
            Self::Windowed => true,
            Self::Abort => false,
            Self::Ask => {
                let stdin = io::stdin();
                let stderr = io::stderr();
                ask_windowed(request, &mut stdin.lock(), &mut stderr.lock())
            }
        }
    }
}

/// Asks the yes/no question on `output` and reads the answer from `input`.
///
/// Anything but an explicit yes, including a closed input, declines.
pub fn ask_windowed(request: &DisplayModeRequest, input: &mut impl BufRead, output: &mut impl Write) -> bool {
    let asked = write!(
        output,
        "Cannot run in fullscreen mode at {}x{} with {}-bit color. Try windowed mode instead? [y/N] ",
        request.width, request.height, request.bits
    )
    .and_then(|()| output.flush());

    if let Err(e) = asked {
        log::warn!("unable to prompt for windowed fallback: {e}");
        return false;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            log::warn!("unable to read windowed fallback answer: {e}");
            false
        }
    }
}
