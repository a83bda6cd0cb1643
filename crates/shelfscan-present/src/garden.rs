//! Impact garden screen
//!
//! Static demo numbers until impact tracking has a backing store.

use shelfscan_core::Navigator;
use std::fmt;

pub const BACK_TO_SCANNER: &str = "Back to Scanner";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactStats {
    pub level: String,
    pub trees_planted: u32,
    pub carbon_saved: String,
    pub plastic_avoided: String,
    pub achievements: Vec<Achievement>,
}

impl ImpactStats {
    #[must_use]
    pub fn demo() -> Self {
        Self {
            level: "Eco-Warrior".to_string(),
            trees_planted: 12,
            carbon_saved: "45kg".to_string(),
            plastic_avoided: "120 items".to_string(),
            achievements: vec![
                Achievement {
                    icon: "🏆",
                    title: "Palm Oil Free Streak",
                    description: "Scanned 5 products without Palm Oil.",
                },
                Achievement {
                    icon: "♻️",
                    title: "Recycling Pro",
                    description: "Checked recycling info 10 times.",
                },
            ],
        }
    }
}

/// The garden screen and its single action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GardenScreen {
    pub stats: ImpactStats,
}

impl GardenScreen {
    #[must_use]
    pub fn new(stats: ImpactStats) -> Self {
        Self { stats }
    }

    /// "Back to Scanner"
    pub fn back(&self, navigator: &dyn Navigator) {
        navigator.go_back();
    }
}

impl Default for GardenScreen {
    fn default() -> Self {
        Self::new(ImpactStats::demo())
    }
}

impl fmt::Display for GardenScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        writeln!(f, "My Impact Garden")?;
        writeln!(f, "Level: {}", stats.level)?;
        writeln!(f)?;
        writeln!(f, "🌳 {} Trees Planted", stats.trees_planted)?;
        writeln!(f, "{} CO2e Saved", stats.carbon_saved)?;
        writeln!(f, "{} Plastic Avoided", stats.plastic_avoided)?;
        writeln!(f)?;
        writeln!(f, "Recent Achievements")?;
        for a in &stats.achievements {
            writeln!(f, "{} {}: {}", a.icon, a.title, a.description)?;
        }
        writeln!(f)?;
        write!(f, "[{BACK_TO_SCANNER}]")
    }
}
