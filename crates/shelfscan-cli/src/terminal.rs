//! Terminal stand-ins for the phone platform
//!
//! Speech and screens go to stdout, alerts to stderr. Tests swap stdout for
//! an in-memory buffer through [`Console::buffer`].

use async_trait::async_trait;
use parking_lot::Mutex;
use shelfscan_core::{
    CameraFeed, Navigator, PermissionProvider, PermissionStatus, Route, SpeechOutput,
    UserNotifier,
};
use shelfscan_present::render_route;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

enum Sink {
    Stdout,
    Buffer(Vec<u8>),
}

/// Shared output for everything the user sees
pub(crate) struct Console {
    sink: Mutex<Sink>,
}

impl Console {
    pub(crate) fn stdout() -> Self {
        Self {
            sink: Mutex::new(Sink::Stdout),
        }
    }

    #[cfg(test)]
    pub(crate) fn buffer() -> Self {
        Self {
            sink: Mutex::new(Sink::Buffer(Vec::new())),
        }
    }

    pub(crate) fn print(&self, text: &str) {
        let mut sink = self.sink.lock();
        let result = match &mut *sink {
            Sink::Stdout => writeln!(std::io::stdout().lock(), "{text}"),
            Sink::Buffer(buf) => writeln!(buf, "{text}"),
        };
        if let Err(e) = result {
            tracing::error!("Console write failed: {}", e);
        }
    }

    #[cfg(test)]
    pub(crate) fn contents(&self) -> String {
        match &*self.sink.lock() {
            Sink::Stdout => String::new(),
            Sink::Buffer(buf) => String::from_utf8_lossy(buf).into_owned(),
        }
    }
}

/// Answers the permission prompt from a command-line flag
pub(crate) struct FlagPermission {
    granted: bool,
}

impl FlagPermission {
    pub(crate) fn new(granted: bool) -> Self {
        Self { granted }
    }
}

#[async_trait]
impl PermissionProvider for FlagPermission {
    async fn request_camera_permission(&self) -> PermissionStatus {
        if self.granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }
}

/// Prints utterances instead of speaking them
pub(crate) struct ConsoleSpeech {
    console: Arc<Console>,
    speaking: AtomicBool,
}

impl ConsoleSpeech {
    pub(crate) fn new(console: Arc<Console>) -> Self {
        Self {
            console,
            speaking: AtomicBool::new(false),
        }
    }
}

impl SpeechOutput for ConsoleSpeech {
    fn speak(&self, text: &str) {
        self.speaking.store(true, Ordering::SeqCst);
        self.console.print(&format!("🔊 {text}"));
    }

    fn stop(&self) {
        if self.speaking.swap(false, Ordering::SeqCst) {
            tracing::debug!("Speech stopped");
        }
    }
}

/// Renders pushed routes as full screens
pub(crate) struct ConsoleNavigator {
    console: Arc<Console>,
    stack: Mutex<Vec<&'static str>>,
}

impl ConsoleNavigator {
    pub(crate) fn new(console: Arc<Console>) -> Self {
        Self {
            console,
            stack: Mutex::new(vec![Route::Scanner.name()]),
        }
    }

    /// Name of the screen on top
    pub(crate) fn current(&self) -> &'static str {
        self.stack
            .lock()
            .last()
            .copied()
            .unwrap_or_else(|| Route::Scanner.name())
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!("Navigating to {}", route.name());
        self.stack.lock().push(route.name());
        if let Some(screen) = render_route(&route) {
            self.console.print(&screen);
        }
    }

    fn go_back(&self) {
        let mut stack = self.stack.lock();
        if stack.len() > 1 {
            stack.pop();
        }
    }
}

/// Alerts go to stderr, apart from the rendered screens
pub(crate) struct StderrNotifier;

impl UserNotifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }
}

/// Tracks whether decode events would currently be delivered
#[derive(Default)]
pub(crate) struct TerminalCamera {
    listening: AtomicBool,
}

impl TerminalCamera {
    #[cfg(test)]
    pub(crate) fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }
}

impl CameraFeed for TerminalCamera {
    fn set_listening(&self, listening: bool) {
        let was = self.listening.swap(listening, Ordering::SeqCst);
        if was != listening {
            tracing::debug!(listening, "Camera feed subscription changed");
        }
    }
}
