//! Terminal scan session
//!
//! Feeds terminal input into the orchestrator one line at a time and prints
//! the scanner overlay after anything that changes it.

use crate::input::{parse_line, Control, InputLine};
use crate::terminal::{Console, ConsoleNavigator};
use shelfscan_core::{DecodeEvent, Navigator, Route};
use shelfscan_present::{GardenScreen, ScannerScreen};
use shelfscan_scanner::{DecodeOutcome, ScanError, ScanOrchestrator};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

// Slack so the unlock timer fires before the next argument barcode
const UNLOCK_SLACK: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

pub(crate) struct Session {
    orchestrator: Arc<ScanOrchestrator>,
    console: Arc<Console>,
    navigator: Arc<ConsoleNavigator>,
    unlock_delay: Duration,
    json: bool,
}

impl Session {
    pub(crate) fn new(
        orchestrator: Arc<ScanOrchestrator>,
        console: Arc<Console>,
        navigator: Arc<ConsoleNavigator>,
        unlock_delay: Duration,
        json: bool,
    ) -> Self {
        Self {
            orchestrator,
            console,
            navigator,
            unlock_delay,
            json,
        }
    }

    /// Ask for the camera and show the first screen; `false` when denied
    pub(crate) async fn start(&self) -> bool {
        let granted = match self.orchestrator.activate().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("{}", e);
                false
            }
        };
        self.show_scanner();
        granted
    }

    fn show_scanner(&self) {
        let screen = ScannerScreen::from_snapshot(&self.orchestrator.snapshot());
        let text = screen.to_string();
        if !text.is_empty() {
            self.console.print(&text);
        }
    }

    async fn decode(&self, event: DecodeEvent) -> DecodeOutcome {
        let outcome = self.orchestrator.handle_decode(event).await;
        match &outcome {
            DecodeOutcome::Dropped => return outcome,
            DecodeOutcome::Analyzed(analysis) if self.json => {
                match serde_json::to_string_pretty(analysis) {
                    Ok(json) => self.console.print(&json),
                    Err(e) => tracing::error!("Could not serialize analysis: {}", e),
                }
            }
            _ => {}
        }
        self.show_scanner();
        outcome
    }

    pub(crate) async fn handle_line(&self, line: &str) -> Flow {
        match parse_line(line, self.orchestrator.barcode_types()) {
            InputLine::Blank => {}
            InputLine::Decode(event) => {
                self.decode(event).await;
            }
            InputLine::Ignored(kind) => {
                tracing::warn!("Ignoring {} barcode, not in the configured allowlist", kind);
            }
            InputLine::Invalid(message) => tracing::warn!("{}", message),
            InputLine::Control(control) => return self.control(control).await,
        }
        Flow::Continue
    }

    async fn control(&self, control: Control) -> Flow {
        match control {
            Control::Speak => {
                report(self.orchestrator.speak_again());
            }
            Control::Details => {
                report(self.orchestrator.open_details());
            }
            Control::Garden => self.orchestrator.open_garden(),
            Control::Back => {
                if self.navigator.current() == Route::ImpactGarden.name() {
                    GardenScreen::default().back(self.navigator.as_ref());
                } else {
                    self.navigator.go_back();
                }
                self.show_scanner();
            }
            Control::Reset => {
                if report(self.orchestrator.reset()) {
                    self.show_scanner();
                }
            }
            Control::Wait(duration) => {
                tokio::time::sleep(duration).await;
                tokio::task::yield_now().await;
                self.show_scanner();
            }
            Control::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Scan argument barcodes back to back, as if pressing "Scan" between them
    pub(crate) async fn run_barcodes(&self, barcodes: &[String]) {
        for raw in barcodes {
            let event = match parse_line(raw, self.orchestrator.barcode_types()) {
                InputLine::Decode(event) => event,
                other => {
                    tracing::warn!("Skipping argument '{}': {:?}", raw, other);
                    continue;
                }
            };
            match self.decode(event).await {
                DecodeOutcome::Analyzed(_) => {
                    report(self.orchestrator.reset());
                }
                DecodeOutcome::Failed => {
                    tokio::time::sleep(self.unlock_delay + UNLOCK_SLACK).await;
                }
                DecodeOutcome::Dropped => {}
            }
        }
    }

    /// Read lines until EOF or `:quit`
    pub(crate) async fn run_lines<R>(&self, reader: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if self.handle_line(&line).await == Flow::Quit {
                break;
            }
        }
        Ok(())
    }
}

fn report(result: Result<(), ScanError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("{}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{ConsoleSpeech, FlagPermission, TerminalCamera};
    use shelfscan_core::{ScanConfig, StaticProfileProvider};
    use shelfscan_scanner::{Collaborators, ScanPhase};
    use shelfscan_test_utils::{
        green_analysis, palm_oil_analysis, RecordingNotifier, ScriptedAnalysisClient,
    };

    struct Fixture {
        session: Session,
        orchestrator: Arc<ScanOrchestrator>,
        console: Arc<Console>,
        client: Arc<ScriptedAnalysisClient>,
        notifier: Arc<RecordingNotifier>,
    }

    fn fixture(client: ScriptedAnalysisClient, granted: bool, json: bool) -> Fixture {
        let console = Arc::new(Console::buffer());
        let navigator = Arc::new(ConsoleNavigator::new(console.clone()));
        let client = Arc::new(client);
        let notifier = Arc::new(RecordingNotifier::new());
        let config = ScanConfig::new();
        let unlock_delay = config.unlock_delay();
        let orchestrator = Arc::new(ScanOrchestrator::new(
            config,
            Collaborators {
                client: client.clone(),
                profiles: Arc::new(StaticProfileProvider::demo()),
                permissions: Arc::new(FlagPermission::new(granted)),
                speech: Arc::new(ConsoleSpeech::new(console.clone())),
                navigator: navigator.clone(),
                notifier: notifier.clone(),
                camera: Arc::new(TerminalCamera::default()),
            },
        ));
        Fixture {
            session: Session::new(
                orchestrator.clone(),
                console.clone(),
                navigator,
                unlock_delay,
                json,
            ),
            orchestrator,
            console,
            client,
            notifier,
        }
    }

    #[tokio::test]
    async fn denied_camera_shows_message() {
        let f = fixture(ScriptedAnalysisClient::new(), false, false);
        assert!(!f.session.start().await);
        f.session.handle_line("3017620422003").await;

        assert_eq!(f.console.contents(), "No access to camera\n");
        assert_eq!(f.client.call_count(), 0);
    }

    #[tokio::test]
    async fn scan_speak_details_reset() {
        let f = fixture(
            ScriptedAnalysisClient::succeeding(palm_oil_analysis()),
            true,
            false,
        );
        assert!(f.session.start().await);

        for line in ["3017620422003", "3017620422003", ":speak", ":details", ":back", ":reset"] {
            assert_eq!(f.session.handle_line(line).await, Flow::Continue);
        }

        let out = f.console.contents();
        assert_eq!(f.client.call_count(), 1);
        assert_eq!(out.matches("🔊 Overall status is RED").count(), 2);
        assert!(out.contains("== Hazelnut Spread =="));
        assert!(out.ends_with("Scan a Product Barcode\n[🌱 View Impact Garden]\n"));
        assert_eq!(f.orchestrator.phase(), ScanPhase::Idle);
    }

    #[tokio::test]
    async fn json_flag_prints_result() {
        let f = fixture(ScriptedAnalysisClient::succeeding(green_analysis()), true, true);
        f.session.start().await;
        f.session.handle_line("qr:oat").await;
        assert!(f.console.contents().contains("\"product_name\": \"Oat Drink\""));
    }

    #[tokio::test]
    async fn garden_and_back() {
        let f = fixture(ScriptedAnalysisClient::new(), true, false);
        f.session.start().await;
        f.session.handle_line(":garden").await;
        f.session.handle_line(":back").await;

        let out = f.console.contents();
        assert!(out.contains("Level: Eco-Warrior"));
        assert!(out.trim_end().ends_with("[🌱 View Impact Garden]"));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_then_wait_allows_rescan() {
        let f = fixture(
            ScriptedAnalysisClient::failing().then_succeed(green_analysis()),
            true,
            false,
        );
        f.session.start().await;

        f.session.handle_line("ean8:96385074").await;
        f.session.handle_line("ean8:96385074").await;
        assert_eq!(f.client.call_count(), 1);
        assert_eq!(
            f.notifier.alerts(),
            vec!["Failed to analyze product (Barcode: 96385074). Is the backend running?"]
        );

        f.session.handle_line(":wait 2100").await;
        f.session.handle_line("ean8:96385074").await;
        assert_eq!(f.client.call_count(), 2);
        assert_eq!(f.orchestrator.phase(), ScanPhase::ShowingResult);
    }

    #[tokio::test(start_paused = true)]
    async fn argument_barcodes_run_back_to_back() {
        let f = fixture(
            ScriptedAnalysisClient::succeeding(green_analysis())
                .then_fail()
                .then_succeed(palm_oil_analysis()),
            true,
            false,
        );
        f.session.start().await;

        let barcodes = ["1".to_string(), "2".to_string(), ":speak".to_string(), "3".to_string()];
        f.session.run_barcodes(&barcodes).await;

        assert_eq!(f.client.call_count(), 3);
        assert_eq!(f.notifier.alerts().len(), 1);
        assert_eq!(f.orchestrator.phase(), ScanPhase::Idle);
    }

    #[tokio::test]
    async fn quit_stops_reading() {
        let f = fixture(ScriptedAnalysisClient::succeeding(green_analysis()), true, false);
        f.session.start().await;

        let input: &[u8] = b"\n:quit\n8711327369335\n";
        f.session
            .run_lines(tokio::io::BufReader::new(input))
            .await
            .unwrap();

        assert_eq!(f.client.call_count(), 0);
    }
}
