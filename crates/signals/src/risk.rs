//! Escalation risk and model-upgrade signals.

use summit_core::{ChatMessage, RiskLevel};

use crate::crisis::detect_crisis;

/// Why a turn was routed to the upgrade model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeReason {
    LongContext,
    ComplexDecision,
    DeepReflection,
    StrategicPlanning,
    EscalationPrep,
}

impl UpgradeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeReason::LongContext => "long_context",
            UpgradeReason::ComplexDecision => "complex_decision",
            UpgradeReason::DeepReflection => "deep_reflection",
            UpgradeReason::StrategicPlanning => "strategic_planning",
            UpgradeReason::EscalationPrep => "escalation_prep",
        }
    }
}

const COMPLEX_LEGAL_TERMS: &[&str] = &["legal", "lawsuit", "hr investigation"];

/// Detect whether this conversation might need escalation to a human.
///
/// Crisis language is always high risk. Legal or HR entanglement is medium.
/// A long-running conversation (6+ turns of history) is low risk, a weak
/// proxy for the user circling the same topic. `None` means no signal.
pub fn detect_escalation_risk(message: &str, history: &[ChatMessage]) -> Option<RiskLevel> {
    let text = message.to_lowercase();

    if detect_crisis(message) {
        return Some(RiskLevel::High);
    }
    if COMPLEX_LEGAL_TERMS.iter().any(|t| text.contains(t)) {
        return Some(RiskLevel::Medium);
    }
    if history.len() >= 6 {
        return Some(RiskLevel::Low);
    }
    None
}

const LONG_CONTEXT_TURNS: usize = 40;

const COMPLEX_DECISION_TERMS: &[&str] = &["job offer", "multiple offers", "should i choose", "trade-off"];
const REFLECTION_TERMS: &[&str] = &["i don't know why", "self-sabotage", "pattern"];
const STRATEGIC_PLANNING_TERMS: &[&str] = &["career pivot", "5 year plan", "long-term"];

/// Decide which signals warrant routing to the upgrade model.
///
/// An empty result means the default model handles the turn.
pub fn detect_upgrade_signals(
    message: &str,
    history: &[ChatMessage],
    escalation_risk: Option<RiskLevel>,
) -> Vec<UpgradeReason> {
    let text = message.to_lowercase();
    let mut reasons = Vec::new();

    if history.len() > LONG_CONTEXT_TURNS {
        reasons.push(UpgradeReason::LongContext);
    }
    if COMPLEX_DECISION_TERMS.iter().any(|t| text.contains(t)) {
        reasons.push(UpgradeReason::ComplexDecision);
    }
    if REFLECTION_TERMS.iter().any(|t| text.contains(t)) {
        reasons.push(UpgradeReason::DeepReflection);
    }
    if STRATEGIC_PLANNING_TERMS.iter().any(|t| text.contains(t)) {
        reasons.push(UpgradeReason::StrategicPlanning);
    }
    if matches!(escalation_risk, Some(RiskLevel::Medium | RiskLevel::High)) {
        reasons.push(UpgradeReason::EscalationPrep);
    }

    reasons
}
