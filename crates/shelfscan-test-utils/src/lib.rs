//! Testing utilities for Shelfscan workspace
//!
//! Shared fixtures and recording doubles for every collaborator seam.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use shelfscan_core::{
    AgentVerdict, AnalysisClient, AnalysisFailure, CameraFeed, Navigator, PermissionProvider,
    PermissionStatus, ProductAnalysis, Route, SpeechOutput, TrafficLightStatus, UserNotifier,
    UserProfile,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

// ----------------------------------------------------------------------------
// Fixtures
// ----------------------------------------------------------------------------

pub fn green_analysis() -> ProductAnalysis {
    ProductAnalysis::new("8711327369335", "Oat Drink", 80.0, TrafficLightStatus::Green)
}

pub fn palm_oil_analysis() -> ProductAnalysis {
    ProductAnalysis::new("3017620422003", "Hazelnut Spread", 20.0, TrafficLightStatus::Red)
        .with_verdict(AgentVerdict::new(
            "PalmOilAgent",
            10.0,
            TrafficLightStatus::Red,
            "Contains palm oil",
        ))
        .with_verdict(AgentVerdict::new(
            "Bio-Shield",
            95.0,
            TrafficLightStatus::Green,
            "No allergens detected",
        ))
}

pub fn mixed_analysis() -> ProductAnalysis {
    ProductAnalysis::new("5449000000996", "Cola", 41.6, TrafficLightStatus::Yellow)
        .with_verdict(AgentVerdict::new(
            "Bio-Shield",
            30.0,
            TrafficLightStatus::Red,
            "High sugar content conflicts with Diabetes",
        ))
        .with_verdict(AgentVerdict::new(
            "Circular Guide",
            70.0,
            TrafficLightStatus::Green,
            "Aluminium can is widely recycled",
        ))
        .with_verdict(
            AgentVerdict::new(
                "Corporate Detective",
                45.0,
                TrafficLightStatus::parse("AMBER"),
                "Parent company under investigation",
            )
            .with_details(serde_json::json!({"sources": ["news"], "severity": 2})),
        )
        .with_timestamp("2024-05-01T10:15:30.123456")
}

pub fn analysis_json(analysis: &ProductAnalysis) -> serde_json::Value {
    serde_json::to_value(analysis).expect("analysis serializes")
}

// ----------------------------------------------------------------------------
// Analysis client
// ----------------------------------------------------------------------------

/// Analysis client answering from a script, recording every call
#[derive(Debug, Default)]
pub struct ScriptedAnalysisClient {
    responses: Mutex<VecDeque<Result<ProductAnalysis, AnalysisFailure>>>,
    calls: Mutex<Vec<(String, UserProfile)>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedAnalysisClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeeding(analysis: ProductAnalysis) -> Self {
        Self::new().then_succeed(analysis)
    }

    pub fn failing() -> Self {
        Self::new().then_fail()
    }

    pub fn then_succeed(self, analysis: ProductAnalysis) -> Self {
        self.responses.lock().push_back(Ok(analysis));
        self
    }

    pub fn then_fail(self) -> Self {
        self.responses
            .lock()
            .push_back(Err(AnalysisFailure::new("", "scripted failure")));
        self
    }

    /// Hold every call until the returned handle is notified
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<(String, UserProfile)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl AnalysisClient for ScriptedAnalysisClient {
    async fn analyze(
        &self,
        barcode: &str,
        profile: &UserProfile,
    ) -> Result<ProductAnalysis, AnalysisFailure> {
        self.calls.lock().push((barcode.to_string(), profile.clone()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.responses.lock().pop_front();
        match next {
            Some(Ok(analysis)) => Ok(analysis),
            Some(Err(failure)) => Err(AnalysisFailure::new(barcode, failure.reason())),
            None => Err(AnalysisFailure::new(barcode, "script exhausted")),
        }
    }
}

// ----------------------------------------------------------------------------
// Platform doubles
// ----------------------------------------------------------------------------

/// Permission provider with a fixed answer
#[derive(Debug)]
pub struct FixedPermission {
    status: PermissionStatus,
    requests: AtomicUsize,
}

impl FixedPermission {
    pub fn granted() -> Self {
        Self::new(PermissionStatus::Granted)
    }

    pub fn denied() -> Self {
        Self::new(PermissionStatus::Denied)
    }

    pub fn new(status: PermissionStatus) -> Self {
        Self {
            status,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionProvider for FixedPermission {
    async fn request_camera_permission(&self) -> PermissionStatus {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.status
    }
}

/// Speech output that remembers what it said
#[derive(Debug, Default)]
pub struct RecordingSpeech {
    spoken: Mutex<Vec<String>>,
    stops: AtomicUsize,
    speaking: Mutex<bool>,
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn is_speaking(&self) -> bool {
        *self.speaking.lock()
    }
}

impl SpeechOutput for RecordingSpeech {
    fn speak(&self, text: &str) {
        self.spoken.lock().push(text.to_string());
        *self.speaking.lock() = true;
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        *self.speaking.lock() = false;
    }
}

/// Navigator that records pushed routes
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
    backs: AtomicUsize,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }

    pub fn back_count(&self) -> usize {
        self.backs.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }

    fn go_back(&self) {
        self.backs.fetch_add(1, Ordering::SeqCst);
    }
}

/// Notifier that records alerts
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }
}

impl UserNotifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }
}

/// Camera feed that records subscription changes
#[derive(Debug, Default)]
pub struct RecordingCameraFeed {
    history: Mutex<Vec<bool>>,
}

impl RecordingCameraFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<bool> {
        self.history.lock().clone()
    }

    pub fn is_listening(&self) -> bool {
        self.history.lock().last().copied().unwrap_or(false)
    }
}

impl CameraFeed for RecordingCameraFeed {
    fn set_listening(&self, listening: bool) {
        self.history.lock().push(listening);
    }
}
