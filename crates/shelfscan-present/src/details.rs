//! Product details screen
//!
//! Full breakdown of one analysis: a tinted header with name, one-decimal
//! score and status, then one card per agent verdict in the order the
//! service returned them.

use crate::palette::pastel_color;
use chrono::{DateTime, NaiveDateTime};
use shelfscan_core::{AgentVerdict, ProductAnalysis};
use std::fmt;

pub const VERDICTS_TITLE: &str = "Agent Verdicts";

/// One verdict with its border tint
#[derive(Debug, Clone, PartialEq)]
pub struct VerdictCard {
    pub verdict: AgentVerdict,
    pub border: &'static str,
}

/// The details screen for a stored analysis
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsScreen {
    pub product_name: String,
    pub score: String,
    pub status: String,
    pub header_color: &'static str,
    pub analyzed_at: Option<String>,
    pub cards: Vec<VerdictCard>,
}

impl DetailsScreen {
    #[must_use]
    pub fn new(product: &ProductAnalysis) -> Self {
        Self {
            product_name: product.display_name().to_string(),
            score: format!("Score: {}", one_decimal(product.overall_score)),
            status: product.overall_status.to_string(),
            header_color: pastel_color(&product.overall_status),
            analyzed_at: product.timestamp.as_deref().map(format_timestamp),
            cards: product
                .agent_verdicts
                .iter()
                .map(|verdict| VerdictCard {
                    verdict: verdict.clone(),
                    border: pastel_color(&verdict.status),
                })
                .collect(),
        }
    }
}

/// One decimal place with exact ties going to the larger neighbour.
///
/// `{:.1}` is correctly rounded but sends exact ties to even. A tie exists
/// only when `value * 20` is an odd integer with no rounding in the product.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn one_decimal(value: f64) -> String {
    let twenty = value * 20.0;
    let exact = value.mul_add(20.0, -twenty) == 0.0;
    if exact && twenty.fract() == 0.0 && twenty.abs() < 1e15 {
        let twentieths = twenty as i64;
        if twentieths % 2 != 0 {
            let tenths = (twentieths + 1) / 2;
            return format!("{:.1}", tenths as f64 / 10.0);
        }
    }
    format!("{value:.1}")
}

/// Human form of the service's ISO 8601 timestamp; unparseable text is shown as-is
fn format_timestamp(raw: &str) -> String {
    const SHOWN: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(SHOWN).to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format(SHOWN).to_string(),
        Err(_) => raw.to_string(),
    }
}

impl fmt::Display for VerdictCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "| {} [{}]", self.verdict.agent_name, self.border)?;
        writeln!(f, "| {}", self.verdict.reasoning)?;
        write!(f, "| Status: {}", self.verdict.status)
    }
}

impl fmt::Display for DetailsScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} == [{}]", self.product_name, self.header_color)?;
        writeln!(f, "{}", self.score)?;
        writeln!(f, "{}", self.status)?;
        if let Some(at) = &self.analyzed_at {
            writeln!(f, "Analyzed: {at}")?;
        }
        writeln!(f)?;
        write!(f, "{VERDICTS_TITLE}")?;
        for card in &self.cards {
            write!(f, "\n\n{card}")?;
        }
        Ok(())
    }
}
