//! Core types for Shelfscan
//!
//! Defines the records exchanged with the analysis service:
//! - Traffic-light status (closed set plus an unknown fallback)
//! - Product analysis and per-agent verdicts
//! - User profile with health and value sub-records

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Traffic-light severity reported by the analysis service.
///
/// The service speaks in the closed set `RED`/`YELLOW`/`GREEN`. Anything else
/// is kept verbatim as [`TrafficLightStatus::Unknown`] so that rendering can
/// fall back to a neutral style instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrafficLightStatus {
    /// Danger or boycott
    Red,
    /// Caution
    Yellow,
    /// No concern
    Green,
    /// Value outside the closed set, raw text preserved
    Unknown(String),
}

impl TrafficLightStatus {
    /// Parse a raw status string. Total over all inputs.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "RED" => Self::Red,
            "YELLOW" => Self::Yellow,
            "GREEN" => Self::Green,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Wire representation
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Red => "RED",
            Self::Yellow => "YELLOW",
            Self::Green => "GREEN",
            Self::Unknown(raw) => raw,
        }
    }

    /// Check for the "no concern" status
    #[inline]
    #[must_use]
    pub fn is_green(&self) -> bool {
        matches!(self, Self::Green)
    }

    /// Check whether the value belongs to the closed set
    #[inline]
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Ordinal severity, `None` for unknown values
    #[inline]
    #[must_use]
    pub fn severity(&self) -> Option<u8> {
        match self {
            Self::Green => Some(0),
            Self::Yellow => Some(1),
            Self::Red => Some(2),
            Self::Unknown(_) => None,
        }
    }
}

impl fmt::Display for TrafficLightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TrafficLightStatus {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for TrafficLightStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TrafficLightStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Round to the nearest integer with halves going up, so `2.5 -> 3` and
/// `-2.5 -> -2`.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_half_up(value: f64) -> i64 {
    // `value + 0.5` itself rounds for inputs just below a half
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

fn empty_details() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// One contributing agent's assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentVerdict {
    /// Agent display name (e.g. "Bio-Shield")
    pub agent_name: String,
    /// Compatibility score
    pub score: f64,
    /// Traffic-light status
    pub status: TrafficLightStatus,
    /// Free-text explanation, may be empty
    #[serde(default)]
    pub reasoning: String,
    /// Opaque structured payload, passed through untouched
    #[serde(default = "empty_details")]
    pub details: serde_json::Value,
}

impl AgentVerdict {
    /// Create new verdict with empty details
    #[must_use]
    pub fn new(
        agent_name: impl Into<String>,
        score: f64,
        status: TrafficLightStatus,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            score,
            status,
            reasoning: reasoning.into(),
            details: empty_details(),
        }
    }

    /// With details payload
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// A verdict is a warning when it is not GREEN and explains itself
    #[inline]
    #[must_use]
    pub fn is_warning(&self) -> bool {
        !self.status.is_green() && !self.reasoning.is_empty()
    }
}

/// The service's verdict for one scanned product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAnalysis {
    /// Barcode or unique product identifier
    pub product_id: String,
    /// Product label, the service may leave it null
    #[serde(default)]
    pub product_name: Option<String>,
    /// Aggregated score
    pub overall_score: f64,
    /// Aggregated status
    pub overall_status: TrafficLightStatus,
    /// Per-agent verdicts in server order
    #[serde(default)]
    pub agent_verdicts: Vec<AgentVerdict>,
    /// ISO 8601 analysis time, when the service sends one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ProductAnalysis {
    /// Label used when the service has no product name
    pub const UNKNOWN_PRODUCT: &'static str = "Unknown product";

    /// Create new analysis without verdicts
    #[must_use]
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        overall_score: f64,
        overall_status: TrafficLightStatus,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: Some(product_name.into()),
            overall_score,
            overall_status,
            agent_verdicts: Vec::new(),
            timestamp: None,
        }
    }

    /// With verdict appended
    #[must_use]
    pub fn with_verdict(mut self, verdict: AgentVerdict) -> Self {
        self.agent_verdicts.push(verdict);
        self
    }

    /// With timestamp
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Product name or a placeholder
    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.product_name
            .as_deref()
            .unwrap_or(Self::UNKNOWN_PRODUCT)
    }

    /// Overall score rounded half-up
    #[inline]
    #[must_use]
    pub fn rounded_score(&self) -> i64 {
        round_half_up(self.overall_score)
    }

    /// Verdicts that should be surfaced as warnings, in server order
    pub fn warnings(&self) -> impl Iterator<Item = &AgentVerdict> {
        self.agent_verdicts.iter().filter(|v| v.is_warning())
    }

    /// Check numeric fields that the parser cannot reject on its own
    ///
    /// # Errors
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.overall_score.is_finite() {
            return Err("overall_score is not a finite number".to_string());
        }
        for (index, verdict) in self.agent_verdicts.iter().enumerate() {
            if !verdict.score.is_finite() {
                return Err(format!("agent_verdicts[{index}].score is not a finite number"));
            }
        }
        Ok(())
    }
}

/// Health constraints consumed by the health agents server-side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    /// Ingredients the user is allergic to
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Medical conditions
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Dietary choices
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

/// Ethical priorities, dimension name to weight
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueProfile {
    /// Weights, observed range 0.0 to 1.0 but not enforced
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

impl ValueProfile {
    /// No weights set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Requester identity with health and value preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user identifier
    pub user_id: String,
    /// Health sub-record
    #[serde(default)]
    pub health_profile: HealthProfile,
    /// Value sub-record; left off the wire when empty so the service
    /// applies its own default weights
    #[serde(default, skip_serializing_if = "ValueProfile::is_empty")]
    pub value_profile: ValueProfile,
}

impl UserProfile {
    /// Create empty profile
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            health_profile: HealthProfile::default(),
            value_profile: ValueProfile::default(),
        }
    }

    /// The demo profile shipped with the scanner
    #[must_use]
    pub fn demo() -> Self {
        Self::new("demo_user")
            .with_allergen("Peanuts")
            .with_allergen("Gluten")
            .with_condition("Diabetes")
            .with_dietary_restriction("Vegan")
            .with_weight("palm_oil", 1.0)
            .with_weight("animal_welfare", 0.8)
            .with_weight("plastic_waste", 0.5)
    }

    /// With allergen
    #[must_use]
    pub fn with_allergen(mut self, allergen: impl Into<String>) -> Self {
        self.health_profile.allergens.push(allergen.into());
        self
    }

    /// With medical condition
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.health_profile.conditions.push(condition.into());
        self
    }

    /// With age
    #[must_use]
    pub fn with_age(mut self, age: u32) -> Self {
        self.health_profile.age = Some(age);
        self
    }

    /// With dietary restriction
    #[must_use]
    pub fn with_dietary_restriction(mut self, restriction: impl Into<String>) -> Self {
        self.health_profile
            .dietary_restrictions
            .push(restriction.into());
        self
    }

    /// With value weight
    #[must_use]
    pub fn with_weight(mut self, dimension: impl Into<String>, weight: f64) -> Self {
        self.value_profile.weights.insert(dimension.into(), weight);
        self
    }
}
