//! Status colors
//!
//! Two palettes: saturated colors for the scanner overlay bubble and pastel
//! tints for the details screen. Values outside the closed status set get a
//! neutral grey instead of an error.

use shelfscan_core::TrafficLightStatus;

pub const OVERLAY_GREEN: &str = "#4CAF50";
pub const OVERLAY_YELLOW: &str = "#FFC107";
pub const OVERLAY_RED: &str = "#F44336";
pub const OVERLAY_UNKNOWN: &str = "#9E9E9E";

pub const PASTEL_GREEN: &str = "#ccffcc";
pub const PASTEL_YELLOW: &str = "#ffffcc";
pub const PASTEL_RED: &str = "#ffcccc";
pub const PASTEL_UNKNOWN: &str = "#eee";

/// Bubble color on the live scanner overlay
#[must_use]
pub fn overlay_color(status: &TrafficLightStatus) -> &'static str {
    match status {
        TrafficLightStatus::Green => OVERLAY_GREEN,
        TrafficLightStatus::Yellow => OVERLAY_YELLOW,
        TrafficLightStatus::Red => OVERLAY_RED,
        TrafficLightStatus::Unknown(_) => OVERLAY_UNKNOWN,
    }
}

/// Header and card-border tint on the details screen
#[must_use]
pub fn pastel_color(status: &TrafficLightStatus) -> &'static str {
    match status {
        TrafficLightStatus::Green => PASTEL_GREEN,
        TrafficLightStatus::Yellow => PASTEL_YELLOW,
        TrafficLightStatus::Red => PASTEL_RED,
        TrafficLightStatus::Unknown(_) => PASTEL_UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn closed_set_colors() {
        assert_eq!(overlay_color(&TrafficLightStatus::Green), "#4CAF50");
        assert_eq!(overlay_color(&TrafficLightStatus::Yellow), "#FFC107");
        assert_eq!(overlay_color(&TrafficLightStatus::Red), "#F44336");
        assert_eq!(pastel_color(&TrafficLightStatus::Green), "#ccffcc");
        assert_eq!(pastel_color(&TrafficLightStatus::Yellow), "#ffffcc");
        assert_eq!(pastel_color(&TrafficLightStatus::Red), "#ffcccc");
    }

    #[test]
    fn lowercase_status_is_not_matched() {
        let status = TrafficLightStatus::parse("green");
        assert_eq!(overlay_color(&status), OVERLAY_UNKNOWN);
        assert_eq!(pastel_color(&status), PASTEL_UNKNOWN);
    }

    proptest! {
        #[test]
        fn any_status_has_a_color(raw in ".*") {
            let status = TrafficLightStatus::parse(&raw);
            let overlay = overlay_color(&status);
            let pastel = pastel_color(&status);
            if status.is_known() {
                prop_assert_ne!(overlay, OVERLAY_UNKNOWN);
                prop_assert_ne!(pastel, PASTEL_UNKNOWN);
            } else {
                prop_assert_eq!(overlay, OVERLAY_UNKNOWN);
                prop_assert_eq!(pastel, PASTEL_UNKNOWN);
            }
        }
    }
}
