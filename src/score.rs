use crate::models::RiskLevel;

pub const MAX_SCORE: i32 = 100;

/// Clamp a raw rule score into `0..=100`.
pub fn normalize(raw: i32) -> u8 {
    raw.clamp(0, MAX_SCORE) as u8
}

/// Band a normalized score: up to 30 is low, up to 60 medium, above that high.
pub fn risk_level(score: u8) -> RiskLevel {
    match score {
        0..=30 => RiskLevel::Low,
        31..=60 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}
