use serde::{Deserialize, Serialize};

use crate::errors::MahjongResult;
use crate::types::NUM_SEATS;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRule {
    /// Autonomous seats claim every kong they are offered.
    pub autonomous_always_kong: bool,
    /// Chance an autonomous seat takes an offered pong.
    pub autonomous_pong_probability: f64,
    /// Chance an autonomous seat takes its first chi option.
    pub autonomous_chi_probability: f64,
    /// Seats driven by external input rather than the autonomous policy.
    pub interactive_seats: [bool; NUM_SEATS],
}

impl Default for GameRule {
    fn default() -> Self {
        Self::default_taiwan()
    }
}

impl GameRule {
    /// One interactive seat (0) against three autonomous seats.
    pub fn default_taiwan() -> Self {
        Self {
            autonomous_always_kong: true,
            autonomous_pong_probability: 0.5,
            autonomous_chi_probability: 0.5,
            interactive_seats: [true, false, false, false],
        }
    }

    /// Four autonomous seats, for simulation.
    pub fn all_autonomous() -> Self {
        Self {
            interactive_seats: [false; NUM_SEATS],
            ..Self::default_taiwan()
        }
    }

    pub fn from_json(text: &str) -> MahjongResult<Self> {
        let mut rule: GameRule = serde_json::from_str(text)?;
        rule.autonomous_pong_probability = rule.autonomous_pong_probability.clamp(0.0, 1.0);
        rule.autonomous_chi_probability = rule.autonomous_chi_probability.clamp(0.0, 1.0);
        Ok(rule)
    }

    pub fn to_json(&self) -> MahjongResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
