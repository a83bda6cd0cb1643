//! Scan Orchestrator
//!
//! Owns the scanner screen's state and sequences one scan at a time:
//! - Requests camera permission once per session
//! - Locks the feed on the first decode event, dropping duplicates
//! - Dispatches the analysis call (the only suspension point)
//! - Stores and narrates the verdict, or alerts and auto-unlocks on failure
//! - Resets back to live scanning on user request

use crate::error::ScanError;
use crate::narrator::VoiceNarrator;
use crate::state_machine::{validate_transition, ScanPhase};
use parking_lot::Mutex;
use shelfscan_core::{
    AnalysisClient, BarcodeType, CameraFeed, DecodeEvent, Navigator, PermissionProvider,
    PermissionStatus, ProductAnalysis, ProfileProvider, Route, ScanConfig, SpeechOutput,
    UserNotifier,
};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Everything the orchestrator talks to
#[derive(Clone)]
pub struct Collaborators {
    pub client: Arc<dyn AnalysisClient>,
    pub profiles: Arc<dyn ProfileProvider>,
    pub permissions: Arc<dyn PermissionProvider>,
    pub speech: Arc<dyn SpeechOutput>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn UserNotifier>,
    pub camera: Arc<dyn CameraFeed>,
}

/// Outcome of one decode event
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// Feed locked, loading, or not live; nothing happened
    Dropped,
    /// Verdict stored and announced
    Analyzed(ProductAnalysis),
    /// User alerted, auto-unlock scheduled
    Failed,
}

/// Point-in-time copy of the orchestrator state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanSnapshot {
    pub phase: ScanPhase,
    pub scan_locked: bool,
    pub loading: bool,
    pub result: Option<ProductAnalysis>,
}

impl ScanSnapshot {
    /// Whether a decode event would start an analysis
    #[inline]
    #[must_use]
    pub fn accepts_scans(&self) -> bool {
        accepts_scans(self.phase, self.scan_locked, self.loading)
    }
}

fn accepts_scans(phase: ScanPhase, scan_locked: bool, loading: bool) -> bool {
    !scan_locked && !loading && validate_transition(phase, ScanPhase::Analyzing).is_ok()
}

#[derive(Debug, Default)]
struct ScanState {
    phase: ScanPhase,
    permission_requested: bool,
    scan_locked: bool,
    loading: bool,
    result: Option<ProductAnalysis>,
}

impl ScanState {
    fn transition(&mut self, to: ScanPhase) -> Result<(), ScanError> {
        validate_transition(self.phase, to)?;
        tracing::debug!("Scan phase {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }

    fn accepts_scans(&self) -> bool {
        accepts_scans(self.phase, self.scan_locked, self.loading)
    }

    fn snapshot(&self) -> ScanSnapshot {
        ScanSnapshot {
            phase: self.phase,
            scan_locked: self.scan_locked,
            loading: self.loading,
            result: self.result.clone(),
        }
    }
}

/// The scanner screen's controller
pub struct ScanOrchestrator {
    config: ScanConfig,
    client: Arc<dyn AnalysisClient>,
    profiles: Arc<dyn ProfileProvider>,
    permissions: Arc<dyn PermissionProvider>,
    narrator: VoiceNarrator,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn UserNotifier>,
    camera: Arc<dyn CameraFeed>,
    state: Arc<Mutex<ScanState>>,
}

impl ScanOrchestrator {
    /// Create orchestrator in `AwaitingPermission`
    #[must_use]
    pub fn new(config: ScanConfig, collaborators: Collaborators) -> Self {
        Self {
            config,
            client: collaborators.client,
            profiles: collaborators.profiles,
            permissions: collaborators.permissions,
            narrator: VoiceNarrator::new(collaborators.speech),
            navigator: collaborators.navigator,
            notifier: collaborators.notifier,
            camera: collaborators.camera,
            state: Arc::new(Mutex::new(ScanState::default())),
        }
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> ScanSnapshot {
        self.state.lock().snapshot()
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> ScanPhase {
        self.state.lock().phase
    }

    /// Symbologies the camera should be configured with
    #[must_use]
    pub fn barcode_types(&self) -> &[BarcodeType] {
        &self.config.barcode_types
    }

    /// The narrator, for hosts that need to silence it directly
    #[must_use]
    pub fn narrator(&self) -> &VoiceNarrator {
        &self.narrator
    }

    /// First activation: ask for camera access.
    ///
    /// The platform is asked exactly once per orchestrator; later calls
    /// report the outcome of that first request.
    ///
    /// # Errors
    /// [`ScanError::PermissionDenied`] when access was refused.
    pub async fn activate(&self) -> Result<(), ScanError> {
        {
            let mut state = self.state.lock();
            if state.permission_requested {
                return match state.phase {
                    ScanPhase::PermissionDenied => Err(ScanError::PermissionDenied),
                    _ => Ok(()),
                };
            }
            state.permission_requested = true;
        }

        let status = self.permissions.request_camera_permission().await;

        let mut state = self.state.lock();
        match status {
            PermissionStatus::Granted => {
                state.transition(ScanPhase::Idle)?;
                drop(state);
                tracing::info!("Camera permission granted");
                self.camera.set_listening(true);
                Ok(())
            }
            PermissionStatus::Denied => {
                state.transition(ScanPhase::PermissionDenied)?;
                tracing::warn!("Camera permission denied, scanning unavailable");
                Err(ScanError::PermissionDenied)
            }
        }
    }

    /// Handle one decode event from the camera.
    ///
    /// The first accepted event locks the feed; anything arriving while the
    /// lock is held or a request is loading is dropped without side effects.
    pub async fn handle_decode(&self, event: DecodeEvent) -> DecodeOutcome {
        {
            let mut state = self.state.lock();
            if !state.accepts_scans() {
                tracing::debug!(
                    data = %event.data,
                    phase = %state.phase,
                    "Dropping decode event"
                );
                return DecodeOutcome::Dropped;
            }
            state.scan_locked = true;
            state.loading = true;
            if let Err(e) = state.transition(ScanPhase::Analyzing) {
                tracing::error!("{}", e);
                state.scan_locked = false;
                state.loading = false;
                return DecodeOutcome::Dropped;
            }
        }
        self.camera.set_listening(false);

        tracing::info!(
            "Bar code with type {} and data {} has been scanned",
            event.barcode_type,
            event.data
        );

        let profile = self.profiles.current_profile();
        let outcome = self.client.analyze(&event.data, &profile).await;

        match outcome {
            Ok(analysis) => {
                {
                    let mut state = self.state.lock();
                    state.loading = false;
                    state.result = Some(analysis.clone());
                    if let Err(e) = state.transition(ScanPhase::ShowingResult) {
                        tracing::error!("{}", e);
                    }
                }
                tracing::info!(
                    "Analysis completed: {} is {}",
                    analysis.display_name(),
                    analysis.overall_status
                );
                self.narrator.announce(&analysis);
                DecodeOutcome::Analyzed(analysis)
            }
            Err(failure) => {
                {
                    let mut state = self.state.lock();
                    state.loading = false;
                    if let Err(e) = state.transition(ScanPhase::ScanFailed) {
                        tracing::error!("{}", e);
                    }
                }
                tracing::warn!("Analysis failed: {} ({})", failure, failure.reason());
                self.notifier.alert(&format!(
                    "Failed to analyze product (Barcode: {}). Is the backend running?",
                    event.data
                ));
                self.schedule_unlock(self.config.unlock_delay());
                DecodeOutcome::Failed
            }
        }
    }

    /// Clear the lock after `delay` without waiting for it.
    ///
    /// Not coordinated with manual reset: whichever runs last wins, and the
    /// end state is the same. A dropped orchestrator makes the timer a no-op.
    fn schedule_unlock(&self, delay: Duration) {
        let state: Weak<Mutex<ScanState>> = Arc::downgrade(&self.state);
        let camera = Arc::clone(&self.camera);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(state) = state.upgrade() else {
                return;
            };
            let listening = {
                let mut state = state.lock();
                state.scan_locked = false;
                if state.phase == ScanPhase::ScanFailed {
                    let _ = state.transition(ScanPhase::Idle);
                }
                state.accepts_scans()
            };
            tracing::info!("Scan lock released after failure");
            if listening {
                camera.set_listening(true);
            }
        });
    }

    /// User-triggered reset: clear lock and result, silence narration.
    ///
    /// # Errors
    /// Fails while permission is pending or denied, and while an analysis is
    /// in flight (there is no cancellation).
    pub fn reset(&self) -> Result<(), ScanError> {
        {
            let mut state = self.state.lock();
            match state.phase {
                ScanPhase::AwaitingPermission => return Err(ScanError::PermissionPending),
                ScanPhase::PermissionDenied => return Err(ScanError::PermissionDenied),
                ScanPhase::Analyzing => {
                    return Err(ScanError::IllegalTransition {
                        from: ScanPhase::Analyzing,
                        to: ScanPhase::Idle,
                    })
                }
                ScanPhase::Idle => {}
                ScanPhase::ShowingResult | ScanPhase::ScanFailed => {
                    state.transition(ScanPhase::Idle)?;
                }
            }
            state.scan_locked = false;
            state.result = None;
        }
        self.narrator.stop();
        self.camera.set_listening(true);
        tracing::info!("Scanner reset");
        Ok(())
    }

    /// Speak the stored verdict again
    ///
    /// # Errors
    /// [`ScanError::NoResult`] when nothing is stored.
    pub fn speak_again(&self) -> Result<(), ScanError> {
        let result = self.state.lock().result.clone();
        let analysis = result.ok_or(ScanError::NoResult)?;
        self.narrator.announce(&analysis);
        Ok(())
    }

    /// Hand the stored verdict to the details screen
    ///
    /// # Errors
    /// [`ScanError::NoResult`] when nothing is stored.
    pub fn open_details(&self) -> Result<(), ScanError> {
        let result = self.state.lock().result.clone();
        let product = result.ok_or(ScanError::NoResult)?;
        self.navigator.navigate(Route::ProductDetails { product });
        Ok(())
    }

    /// Show the impact garden
    pub fn open_garden(&self) {
        self.navigator.navigate(Route::ImpactGarden);
    }
}

impl std::fmt::Debug for ScanOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanOrchestrator")
            .field("config", &self.config)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}
