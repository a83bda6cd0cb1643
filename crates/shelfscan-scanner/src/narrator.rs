//! Voice narration of analysis results

use shelfscan_core::{ProductAnalysis, SpeechOutput};
use std::sync::Arc;

const ALL_CLEAR: &str = "This product looks good!";

/// Build the spoken summary for an analysis.
///
/// Status and rounded score first, then every non-GREEN verdict that carries
/// reasoning as "`<agent>` says: `<reasoning>`", or a reassurance when there
/// are none.
#[must_use]
pub fn compose_narration(analysis: &ProductAnalysis) -> String {
    let mut text = format!(
        "Overall status is {}. Score is {}.",
        analysis.overall_status,
        analysis.rounded_score()
    );

    let warnings: Vec<String> = analysis
        .warnings()
        .map(|v| format!("{} says: {}", v.agent_name, v.reasoning))
        .collect();

    if warnings.is_empty() {
        text.push(' ');
        text.push_str(ALL_CLEAR);
    } else {
        text.push_str(" Warnings found: ");
        text.push_str(&warnings.join(". "));
        if !text.ends_with(['.', '!', '?']) {
            text.push('.');
        }
    }
    text
}

/// Speaks analysis summaries through the platform speech output
#[derive(Clone)]
pub struct VoiceNarrator {
    speech: Arc<dyn SpeechOutput>,
}

impl VoiceNarrator {
    #[must_use]
    pub fn new(speech: Arc<dyn SpeechOutput>) -> Self {
        Self { speech }
    }

    /// Start a fresh utterance; does not wait for it to finish
    pub fn announce(&self, analysis: &ProductAnalysis) {
        let text = compose_narration(analysis);
        tracing::debug!(product = %analysis.product_id, "Announcing verdict");
        self.speech.speak(&text);
    }

    /// Cancel any utterance in progress
    pub fn stop(&self) {
        self.speech.stop();
    }
}

impl std::fmt::Debug for VoiceNarrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceNarrator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfscan_core::{AgentVerdict, MockSpeechOutput, TrafficLightStatus};
    use shelfscan_test_utils::{green_analysis, mixed_analysis, palm_oil_analysis};

    #[test]
    fn green_without_verdicts() {
        assert_eq!(
            compose_narration(&green_analysis()),
            "Overall status is GREEN. Score is 80. This product looks good!"
        );
    }

    #[test]
    fn red_lists_warnings_and_skips_green() {
        let text = compose_narration(&palm_oil_analysis());
        assert!(text.starts_with("Overall status is RED. Score is 20."));
        assert!(text.ends_with("Warnings found: PalmOilAgent says: Contains palm oil."));
        assert!(!text.contains("Bio-Shield"));
    }

    #[test]
    fn multiple_warnings_are_period_separated() {
        let text = compose_narration(&mixed_analysis());
        assert_eq!(
            text,
            "Overall status is YELLOW. Score is 42. Warnings found: \
             Bio-Shield says: High sugar content conflicts with Diabetes. \
             Corporate Detective says: Parent company under investigation."
        );
    }

    #[test]
    fn non_green_without_reasoning_is_reassuring() {
        let analysis = ProductAnalysis::new("1", "Bar", 55.5, TrafficLightStatus::Yellow)
            .with_verdict(AgentVerdict::new("Judge", 55.0, TrafficLightStatus::Yellow, ""));
        assert_eq!(
            compose_narration(&analysis),
            "Overall status is YELLOW. Score is 56. This product looks good!"
        );
    }

    #[test]
    fn reasoning_with_own_period_is_not_doubled() {
        let analysis = ProductAnalysis::new("1", "Bar", 10.0, TrafficLightStatus::Red)
            .with_verdict(AgentVerdict::new(
                "Activist",
                5.0,
                TrafficLightStatus::Red,
                "Boycott listed.",
            ));
        assert!(compose_narration(&analysis).ends_with("Activist says: Boycott listed."));
    }

    #[test]
    fn unknown_status_is_spoken_verbatim() {
        let analysis = ProductAnalysis::new("1", "Bar", 50.0, TrafficLightStatus::parse("BLUE"));
        assert!(compose_narration(&analysis).starts_with("Overall status is BLUE."));
    }

    #[test]
    fn announce_speaks_composed_text() {
        let mut speech = MockSpeechOutput::new();
        speech
            .expect_speak()
            .withf(|text| text == "Overall status is GREEN. Score is 80. This product looks good!")
            .times(2)
            .return_const(());
        let narrator = VoiceNarrator::new(Arc::new(speech));

        narrator.announce(&green_analysis());
        narrator.announce(&green_analysis());
    }

    #[test]
    fn stop_is_forwarded() {
        let mut speech = MockSpeechOutput::new();
        speech.expect_stop().times(1).return_const(());
        speech.expect_speak().never();
        VoiceNarrator::new(Arc::new(speech)).stop();
    }
}
