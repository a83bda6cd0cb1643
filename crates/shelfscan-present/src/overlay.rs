//! Scanner screen overlay
//!
//! Derives what the live scanner screen shows from an orchestrator snapshot.
//! Layers stack the way the camera screen draws them: loading veil, result
//! card, then the idle prompt. A locked feed with no result (right after a
//! failure) shows the bare camera.

use crate::palette::overlay_color;
use shelfscan_core::ProductAnalysis;
use shelfscan_scanner::{ScanPhase, ScanSnapshot};
use std::fmt;

pub const REQUESTING_PERMISSION: &str = "Requesting for camera permission";
pub const NO_CAMERA_ACCESS: &str = "No access to camera";
pub const ANALYZING: &str = "Analyzing...";
pub const SCAN_PROMPT: &str = "Scan a Product Barcode";
pub const GARDEN_BUTTON: &str = "🌱 View Impact Garden";

/// Buttons under a result card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    /// Open the details screen
    Details,
    /// Repeat the narration
    Speak,
    /// Reset and scan again
    Scan,
}

impl OverlayAction {
    pub const ALL: [Self; 3] = [Self::Details, Self::Speak, Self::Scan];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Details => "Details",
            Self::Speak => "📢 Speak",
            Self::Scan => "Scan",
        }
    }
}

/// Status bubble plus info card for a stored verdict
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub score: i64,
    pub status: String,
    pub color: &'static str,
    pub product_name: String,
    pub warnings: Vec<String>,
    pub actions: [OverlayAction; 3],
}

impl ResultCard {
    #[must_use]
    pub fn from_analysis(analysis: &ProductAnalysis) -> Self {
        Self {
            score: analysis.rounded_score(),
            status: analysis.overall_status.to_string(),
            color: overlay_color(&analysis.overall_status),
            product_name: analysis.display_name().to_string(),
            warnings: analysis
                .warnings()
                .map(|v| format!("⚠️ {}: {}", v.agent_name, v.reasoning))
                .collect(),
            actions: OverlayAction::ALL,
        }
    }
}

/// Layers over the live camera feed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiveOverlay {
    pub loading: bool,
    pub result: Option<ResultCard>,
    pub prompt: bool,
}

/// Everything the scanner screen can show
#[derive(Debug, Clone, PartialEq)]
pub enum ScannerScreen {
    RequestingPermission,
    NoCameraAccess,
    Live(LiveOverlay),
}

impl ScannerScreen {
    #[must_use]
    pub fn from_snapshot(snapshot: &ScanSnapshot) -> Self {
        match snapshot.phase {
            ScanPhase::AwaitingPermission => Self::RequestingPermission,
            ScanPhase::PermissionDenied => Self::NoCameraAccess,
            _ => Self::Live(LiveOverlay {
                loading: snapshot.loading,
                result: snapshot.result.as_ref().map(ResultCard::from_analysis),
                prompt: !snapshot.scan_locked && !snapshot.loading,
            }),
        }
    }
}

impl fmt::Display for ResultCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "( {} {} ) [{}]", self.score, self.status, self.color)?;
        writeln!(f, "{}", self.product_name)?;
        for warning in &self.warnings {
            writeln!(f, "  {warning}")?;
        }
        let labels: Vec<String> = self
            .actions
            .iter()
            .map(|a| format!("[{}]", a.label()))
            .collect();
        write!(f, "{}", labels.join(" "))
    }
}

impl fmt::Display for ScannerScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestingPermission => write!(f, "{REQUESTING_PERMISSION}"),
            Self::NoCameraAccess => write!(f, "{NO_CAMERA_ACCESS}"),
            Self::Live(overlay) => {
                let mut layers = Vec::new();
                if overlay.loading {
                    layers.push(ANALYZING.to_string());
                }
                if let Some(card) = &overlay.result {
                    layers.push(card.to_string());
                }
                if overlay.prompt {
                    layers.push(format!("{SCAN_PROMPT}\n[{GARDEN_BUTTON}]"));
                }
                write!(f, "{}", layers.join("\n\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shelfscan_core::{AgentVerdict, TrafficLightStatus};
    use shelfscan_test_utils::{green_analysis, mixed_analysis, palm_oil_analysis};

    fn snapshot(phase: ScanPhase, locked: bool, loading: bool) -> ScanSnapshot {
        ScanSnapshot {
            phase,
            scan_locked: locked,
            loading,
            result: None,
        }
    }

    #[test]
    fn permission_screens() {
        let pending = ScannerScreen::from_snapshot(&ScanSnapshot::default());
        assert_eq!(pending, ScannerScreen::RequestingPermission);
        assert_eq!(pending.to_string(), "Requesting for camera permission");

        let denied =
            ScannerScreen::from_snapshot(&snapshot(ScanPhase::PermissionDenied, false, false));
        assert_eq!(denied.to_string(), "No access to camera");
    }

    #[test]
    fn idle_shows_prompt_only() {
        let screen = ScannerScreen::from_snapshot(&snapshot(ScanPhase::Idle, false, false));
        assert_eq!(
            screen.to_string(),
            "Scan a Product Barcode\n[🌱 View Impact Garden]"
        );
    }

    #[test]
    fn analyzing_shows_veil_only() {
        let screen = ScannerScreen::from_snapshot(&snapshot(ScanPhase::Analyzing, true, true));
        assert_eq!(screen.to_string(), "Analyzing...");
    }

    #[test]
    fn failed_and_locked_shows_bare_camera() {
        let screen = ScannerScreen::from_snapshot(&snapshot(ScanPhase::ScanFailed, true, false));
        assert_eq!(screen, ScannerScreen::Live(LiveOverlay::default()));
        assert_eq!(screen.to_string(), "");
    }

    #[test]
    fn result_card_lists_non_green_warnings() {
        let card = ResultCard::from_analysis(&mixed_analysis());
        assert_eq!(card.score, 42);
        assert_eq!(card.status, "YELLOW");
        assert_eq!(card.color, "#FFC107");
        assert_eq!(
            card.warnings,
            vec![
                "⚠️ Bio-Shield: High sugar content conflicts with Diabetes",
                "⚠️ Corporate Detective: Parent company under investigation",
            ]
        );
    }

    #[test]
    fn result_screen_render() {
        let mut snap = snapshot(ScanPhase::ShowingResult, true, false);
        snap.result = Some(palm_oil_analysis());
        let screen = ScannerScreen::from_snapshot(&snap);
        assert_eq!(
            screen.to_string(),
            "( 20 RED ) [#F44336]\n\
             Hazelnut Spread\n  \
             ⚠️ PalmOilAgent: Contains palm oil\n\
             [Details] [📢 Speak] [Scan]"
        );
    }

    #[test]
    fn unlocked_result_also_shows_prompt() {
        let mut snap = snapshot(ScanPhase::ShowingResult, false, false);
        snap.result = Some(green_analysis());
        let ScannerScreen::Live(overlay) = ScannerScreen::from_snapshot(&snap) else {
            panic!("expected live overlay");
        };
        assert!(overlay.prompt);
        assert!(overlay.result.is_some());
    }

    #[test]
    fn unknown_status_and_missing_name_fall_back() {
        let mut analysis = ProductAnalysis::new("1", "x", 49.5, TrafficLightStatus::parse("PURPLE"))
            .with_verdict(AgentVerdict::new("Judge", 1.0, TrafficLightStatus::Green, "fine"));
        analysis.product_name = None;
        let card = ResultCard::from_analysis(&analysis);
        assert_eq!(card.color, "#9E9E9E");
        assert_eq!(card.status, "PURPLE");
        assert_eq!(card.score, 50);
        assert_eq!(card.product_name, "Unknown product");
        assert!(card.warnings.is_empty());
    }
}
