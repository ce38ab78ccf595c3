//! Score-to-colour mapping for wellness, performance, and fatigue badges
//!
//! Scores live on a 1-140 scale. Every mapper clamps its input, so callers
//! can hand over whatever the API returned without pre-validating it.

use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Score Domain
/// ---------------------------------------------------------------------------

pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 140.0;

/// Normalised breakpoints of the wellness gradient (raw scores ~70 and ~100).
/// Fixed business thresholds; keep them exact.
pub const WELLNESS_LOW_BREAK: f64 = 0.5;
pub const WELLNESS_MEDIUM_BREAK: f64 = 0.71;

/// Raw-score breakpoints of the fatigue tiers
pub const FATIGUE_LOW_MAX: f64 = 70.0;
pub const FATIGUE_MODERATE_MAX: f64 = 100.0;

/// ---------------------------------------------------------------------------
/// Palette
/// ---------------------------------------------------------------------------

pub const WELLNESS_GREEN: &str = "#22c55e";
pub const WELLNESS_YELLOW: &str = "#eab308";
pub const WELLNESS_LIGHT_ORANGE: &str = "#fdba74";
pub const WELLNESS_MEDIUM_ORANGE: &str = "#f97316";
pub const WELLNESS_RED: &str = "#dc2626";

pub const PERFORMANCE_BLUE: &str = "#3b82f6";
pub const PERFORMANCE_CYAN: &str = "#06b6d4";
pub const PERFORMANCE_GREEN: &str = "#22c55e";

pub const FATIGUE_BLUE: &str = "#3b82f6";
pub const FATIGUE_CYAN: &str = "#06b6d4";
pub const FATIGUE_LIGHT_CYAN: &str = "#67e8f9";

/// ---------------------------------------------------------------------------
/// RGB Parsing and Formatting
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

impl Rgb {
  /// Parse `#RRGGBB`. Channels that are missing or not hex read as 0.
  pub fn from_hex(hex: &str) -> Self {
    let digits = hex.trim().trim_start_matches('#');
    let channel = |start: usize| {
      digits
        .get(start..start + 2)
        .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        .unwrap_or(0)
    };

    Self {
      r: channel(0),
      g: channel(2),
      b: channel(4),
    }
  }

  pub fn to_hex(self) -> String {
    format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
  }
}

/// Linearly interpolate between two hex colours.
///
/// `factor` is clamped to [0, 1]; a NaN factor is treated as 0.
pub fn interpolate_color(from: &str, to: &str, factor: f64) -> String {
  let factor = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
  let a = Rgb::from_hex(from);
  let b = Rgb::from_hex(to);

  let mix = |c1: u8, c2: u8| -> u8 {
    let value = f64::from(c1) + (f64::from(c2) - f64::from(c1)) * factor;
    value.round().clamp(0.0, 255.0) as u8
  };

  Rgb {
    r: mix(a.r, b.r),
    g: mix(a.g, b.g),
    b: mix(a.b, b.b),
  }
  .to_hex()
}

/// ---------------------------------------------------------------------------
/// Score Helpers
/// ---------------------------------------------------------------------------

/// Clamp a presentation score to the 1-140 domain. NaN maps to the minimum.
pub fn clamp_score(score: f64) -> f64 {
  if score.is_nan() {
    SCORE_MIN
  } else {
    score.clamp(SCORE_MIN, SCORE_MAX)
  }
}

/// Map a score onto [0, 1]
pub fn normalize_score(score: f64) -> f64 {
  ((clamp_score(score) - SCORE_MIN) / (SCORE_MAX - SCORE_MIN)).clamp(0.0, 1.0)
}

/// ---------------------------------------------------------------------------
/// Wellness / Risk
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
  Low,
  Medium,
  High,
}

impl RiskBand {
  pub fn from_score(score: f64) -> Self {
    let n = normalize_score(score);
    if n <= WELLNESS_LOW_BREAK {
      RiskBand::Low
    } else if n <= WELLNESS_MEDIUM_BREAK {
      RiskBand::Medium
    } else {
      RiskBand::High
    }
  }
}

pub fn risk_band(score: f64) -> RiskBand {
  RiskBand::from_score(score)
}

/// Wellness colour: green → yellow (low risk), light → medium orange
/// (medium risk), medium orange → red (high risk). Higher is worse.
pub fn wellness_color(score: f64) -> String {
  let n = normalize_score(score);

  match RiskBand::from_score(score) {
    RiskBand::Low => interpolate_color(WELLNESS_GREEN, WELLNESS_YELLOW, n / WELLNESS_LOW_BREAK),
    RiskBand::Medium => interpolate_color(
      WELLNESS_LIGHT_ORANGE,
      WELLNESS_MEDIUM_ORANGE,
      (n - WELLNESS_LOW_BREAK) / (WELLNESS_MEDIUM_BREAK - WELLNESS_LOW_BREAK),
    ),
    RiskBand::High => interpolate_color(
      WELLNESS_MEDIUM_ORANGE,
      WELLNESS_RED,
      (n - WELLNESS_MEDIUM_BREAK) / (1.0 - WELLNESS_MEDIUM_BREAK),
    ),
  }
}

/// ---------------------------------------------------------------------------
/// Performance
/// ---------------------------------------------------------------------------

/// Performance colour: blue → cyan over the lower half, cyan → green above.
pub fn performance_color(score: f64) -> String {
  let n = normalize_score(score);

  if n <= 0.5 {
    interpolate_color(PERFORMANCE_BLUE, PERFORMANCE_CYAN, n * 2.0)
  } else {
    interpolate_color(PERFORMANCE_CYAN, PERFORMANCE_GREEN, (n - 0.5) * 2.0)
  }
}

/// ---------------------------------------------------------------------------
/// Fatigue
/// ---------------------------------------------------------------------------

/// Discrete fatigue classification. Deliberately not a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatigueTier {
  Low,
  Moderate,
  High,
}

impl FatigueTier {
  pub fn from_score(score: f64) -> Self {
    let score = clamp_score(score);
    match score {
      s if s <= FATIGUE_LOW_MAX => FatigueTier::Low,
      s if s <= FATIGUE_MODERATE_MAX => FatigueTier::Moderate,
      _ => FatigueTier::High,
    }
  }

  pub fn color(&self) -> &'static str {
    match self {
      FatigueTier::Low => FATIGUE_BLUE,
      FatigueTier::Moderate => FATIGUE_CYAN,
      FatigueTier::High => FATIGUE_LIGHT_CYAN,
    }
  }
}

pub fn fatigue_tier(score: f64) -> FatigueTier {
  FatigueTier::from_score(score)
}

pub fn fatigue_color(score: f64) -> String {
  FatigueTier::from_score(score).color().to_string()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  fn is_hex_color(value: &str) -> bool {
    value.len() == 7
      && value.starts_with('#')
      && value[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
  }

  #[test]
  fn test_interpolate_endpoints_are_exact() {
    assert_eq!(interpolate_color("#22c55e", "#dc2626", 0.0), "#22c55e");
    assert_eq!(interpolate_color("#22c55e", "#dc2626", 1.0), "#dc2626");
  }

  #[test]
  fn test_interpolate_identity_when_endpoints_equal() {
    for f in [-3.0, 0.0, 0.25, 0.5, 0.9, 1.0, 42.0] {
      assert_eq!(interpolate_color("#3b82f6", "#3b82f6", f), "#3b82f6");
    }
  }

  #[test]
  fn test_interpolate_midpoint_rounds_per_channel() {
    // 0x00 → 0xff at 0.5 = 127.5, rounds to 128 (0x80)
    assert_eq!(interpolate_color("#000000", "#ffffff", 0.5), "#808080");
  }

  #[test]
  fn test_interpolate_clamps_factor() {
    assert_eq!(interpolate_color("#000000", "#ffffff", -1.5), "#000000");
    assert_eq!(interpolate_color("#000000", "#ffffff", 7.0), "#ffffff");
    assert_eq!(interpolate_color("#000000", "#ffffff", f64::NAN), "#000000");
  }

  #[test]
  fn test_interpolate_accepts_uppercase_and_emits_lowercase() {
    assert_eq!(interpolate_color("#ABCDEF", "#ABCDEF", 0.3), "#abcdef");
  }

  #[test]
  fn test_malformed_hex_does_not_panic() {
    let out = interpolate_color("#zz", "nonsense", 0.5);
    assert!(is_hex_color(&out));
  }

  #[test]
  fn test_all_scores_produce_valid_hex() {
    for score in 1..=140 {
      let s = score as f64;
      assert!(is_hex_color(&wellness_color(s)), "wellness {}", s);
      assert!(is_hex_color(&performance_color(s)), "performance {}", s);
      assert!(is_hex_color(&fatigue_color(s)), "fatigue {}", s);
    }
  }

  #[test]
  fn test_wellness_endpoints() {
    assert_eq!(wellness_color(1.0), WELLNESS_GREEN);
    assert_eq!(wellness_color(140.0), WELLNESS_RED);
  }

  #[test]
  fn test_wellness_band_transitions() {
    assert_eq!(risk_band(69.0), RiskBand::Low);
    assert_eq!(risk_band(71.0), RiskBand::Medium);
    assert_ne!(wellness_color(69.0), wellness_color(71.0));

    // 0.71 of the normalised range sits just below a raw score of 100
    assert_eq!(risk_band(99.0), RiskBand::Medium);
    assert_eq!(risk_band(101.0), RiskBand::High);
    assert_ne!(wellness_color(99.0), wellness_color(101.0));
  }

  #[test]
  fn test_wellness_band_boundary_is_inclusive() {
    // n == 0.5 exactly at score 70.5 belongs to the low band
    assert_eq!(risk_band(70.5), RiskBand::Low);
    assert_eq!(wellness_color(70.5), WELLNESS_YELLOW);
  }

  #[test]
  fn test_out_of_range_scores_clamp() {
    assert_eq!(wellness_color(-50.0), wellness_color(1.0));
    assert_eq!(wellness_color(999.0), wellness_color(140.0));
    assert_eq!(performance_color(-50.0), performance_color(1.0));
    assert_eq!(performance_color(999.0), performance_color(140.0));
    assert_eq!(fatigue_color(-50.0), fatigue_color(1.0));
    assert_eq!(fatigue_color(999.0), fatigue_color(140.0));
  }

  #[test]
  fn test_nan_score_maps_to_minimum() {
    assert_eq!(wellness_color(f64::NAN), wellness_color(1.0));
    assert_eq!(performance_color(f64::NAN), performance_color(1.0));
  }

  #[test]
  fn test_performance_gradient() {
    assert_eq!(performance_color(1.0), PERFORMANCE_BLUE);
    assert_eq!(performance_color(70.5), PERFORMANCE_CYAN);
    assert_eq!(performance_color(140.0), PERFORMANCE_GREEN);
  }

  #[test]
  fn test_fatigue_boundaries() {
    assert_eq!(fatigue_color(70.0), FATIGUE_BLUE);
    assert_eq!(fatigue_color(71.0), FATIGUE_CYAN);
    assert_eq!(fatigue_color(100.0), FATIGUE_CYAN);
    assert_eq!(fatigue_color(101.0), FATIGUE_LIGHT_CYAN);
    assert_eq!(fatigue_tier(100.5), FatigueTier::High);
  }
}
