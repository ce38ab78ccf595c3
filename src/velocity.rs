//! Synthetic velocity telemetry
//!
//! Placeholder race telemetry shaped exactly like the `/velocity/{entryCode}`
//! payload, used until a live sensor feed exists. All generators take the
//! RNG as a parameter so callers decide between thread-local randomness and
//! a seeded, reproducible stream.

use rand::Rng;
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::models::{VelocityData, VelocityDataPoint, VelocityMetrics};

/// ---------------------------------------------------------------------------
/// Constants
/// ---------------------------------------------------------------------------

/// Velocity threshold reported as `targetVelocity` in metrics
pub const TARGET_VELOCITY: f64 = 40.0;
pub const VELOCITY_UNITS: &str = "mph";

// First-seconds acceleration profile
pub const FIRST_SECONDS_SAMPLES: usize = 101;
pub const SAMPLES_PER_SECOND: f64 = 10.0;
pub const ACCELERATION_RATE: f64 = 0.6;
pub const MAX_VELOCITY_MIN: f64 = 42.0;
pub const MAX_VELOCITY_MAX: f64 = 48.0;
const PERTURBATION_AMPLITUDE: f64 = 0.5;
const PERTURBATION_FREQUENCY: f64 = 2.5;

// Full-race profile
pub const FULL_RACE_SAMPLES: usize = 201;
pub const CRUISE_VELOCITY: f64 = 35.0;
pub const VELOCITY_FLOOR: f64 = 25.0;
pub const DEFAULT_DISTANCE_MULTIPLIER: f64 = 1.0;
const SECONDS_PER_DISTANCE_UNIT: f64 = 60.0;
const DURATION_JITTER: f64 = 3.0;
const MIN_RACE_DURATION: f64 = 10.0;
const ACCELERATION_PHASE_END: f64 = 0.15;
const CRUISE_PHASE_END: f64 = 0.75;
const START_RISE_RATE: f64 = 4.0;
const CRUISE_VARIATION: f64 = 0.8;
const MAX_FINISH_DELTA: f64 = 3.0;
const MOVING_AVERAGE_RADIUS: usize = 2;

/// ---------------------------------------------------------------------------
/// Smoothing
/// ---------------------------------------------------------------------------

/// One pass of 0.25/0.5/0.25 smoothing over interior points
fn smooth_weighted(values: &[f64]) -> Vec<f64> {
  let mut out = values.to_vec();
  for i in 1..values.len().saturating_sub(1) {
    out[i] = 0.25 * values[i - 1] + 0.5 * values[i] + 0.25 * values[i + 1];
  }
  out
}

/// One pass of a centered moving average over interior points.
/// The first and last `radius` points are left as they are.
fn moving_average(values: &[f64], radius: usize) -> Vec<f64> {
  let mut out = values.to_vec();
  let window = (2 * radius + 1) as f64;
  for i in radius..values.len().saturating_sub(radius) {
    let sum: f64 = values[i - radius..=i + radius].iter().sum();
    out[i] = sum / window;
  }
  out
}

/// ---------------------------------------------------------------------------
/// First-Seconds Acceleration Profile
/// ---------------------------------------------------------------------------

/// Acceleration curve for the first ten seconds of a race.
///
/// `v(t) = max * (1 - e^(-k t))` with a small sinusoidal wobble that decays
/// under the same envelope, so the curve approaches but never reaches `max`
/// and stays monotone for any realistic `max`. `acceleration` is the backward
/// difference of the smoothed velocity.
pub fn acceleration_curve(max_velocity: f64, phase: f64) -> Vec<VelocityDataPoint> {
  let raw: Vec<f64> = (0..FIRST_SECONDS_SAMPLES)
    .map(|i| {
      if i == 0 {
        return 0.0;
      }
      let t = i as f64 / SAMPLES_PER_SECOND;
      let envelope = (-ACCELERATION_RATE * t).exp();
      let base = max_velocity * (1.0 - envelope);
      let wobble = PERTURBATION_AMPLITUDE * (PERTURBATION_FREQUENCY * t + phase).sin() * envelope;
      (base + wobble).max(0.0)
    })
    .collect();

  let smoothed = smooth_weighted(&raw);

  smoothed
    .iter()
    .enumerate()
    .map(|(i, &velocity)| VelocityDataPoint {
      time: i as f64 / SAMPLES_PER_SECOND,
      velocity,
      acceleration: (i > 0).then(|| (velocity - smoothed[i - 1]) * SAMPLES_PER_SECOND),
    })
    .collect()
}

/// Random first-seconds profile with a top speed in [42, 48)
pub fn generate_first_seconds<R: Rng + ?Sized>(rng: &mut R) -> Vec<VelocityDataPoint> {
  let max_velocity = rng.gen_range(MAX_VELOCITY_MIN..MAX_VELOCITY_MAX);
  let phase = rng.gen_range(0.0..TAU);
  acceleration_curve(max_velocity, phase)
}

/// ---------------------------------------------------------------------------
/// Full-Race Profile
/// ---------------------------------------------------------------------------

/// Leading numeric token of a distance string ("6f", "1.5 miles").
/// Anything unparseable, non-finite, or non-positive falls back to 1.0.
pub fn parse_distance_multiplier(distance: &str) -> f64 {
  let token: String = distance
    .trim_start()
    .chars()
    .take_while(|c| c.is_ascii_digit() || *c == '.')
    .collect();

  match token.parse::<f64>() {
    Ok(value) if value.is_finite() && value > 0.0 => value,
    _ => DEFAULT_DISTANCE_MULTIPLIER,
  }
}

/// Velocity at a fraction of the race, before flooring and smoothing
fn race_velocity(fraction: f64, cruise_phase: f64, finish_delta: f64) -> f64 {
  if fraction < ACCELERATION_PHASE_END {
    let local = fraction / ACCELERATION_PHASE_END;
    CRUISE_VELOCITY * (1.0 - (-START_RISE_RATE * local).exp())
  } else if fraction < CRUISE_PHASE_END {
    CRUISE_VELOCITY + CRUISE_VARIATION * (fraction * 4.0 * TAU + cruise_phase).sin()
  } else {
    let local = (fraction - CRUISE_PHASE_END) / (1.0 - CRUISE_PHASE_END);
    CRUISE_VELOCITY + finish_delta * (local * FRAC_PI_2).sin()
  }
}

/// Full-race velocity profile. Phase boundaries are fractions of the
/// generated duration, so they scale with any distance.
pub fn generate_full_race<R: Rng + ?Sized>(distance: &str, rng: &mut R) -> Vec<VelocityDataPoint> {
  let multiplier = parse_distance_multiplier(distance);
  let jitter = rng.gen_range(-DURATION_JITTER..=DURATION_JITTER);
  let duration = (multiplier * SECONDS_PER_DISTANCE_UNIT + jitter).max(MIN_RACE_DURATION);
  let cruise_phase = rng.gen_range(0.0..TAU);
  let finish_delta = rng.gen_range(-MAX_FINISH_DELTA..=MAX_FINISH_DELTA);

  let last = (FULL_RACE_SAMPLES - 1) as f64;
  let raw: Vec<f64> = (0..FULL_RACE_SAMPLES)
    .map(|i| race_velocity(i as f64 / last, cruise_phase, finish_delta).max(VELOCITY_FLOOR))
    .collect();

  let smoothed = moving_average(
    &moving_average(&raw, MOVING_AVERAGE_RADIUS),
    MOVING_AVERAGE_RADIUS,
  );

  smoothed
    .into_iter()
    .enumerate()
    .map(|(i, velocity)| VelocityDataPoint {
      time: duration * (i as f64 / last),
      velocity,
      acceleration: None,
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Metrics
/// ---------------------------------------------------------------------------

/// Aggregate metrics over a velocity sequence
pub fn compute_metrics(points: &[VelocityDataPoint], target_velocity: f64) -> VelocityMetrics {
  let peak = points
    .iter()
    .fold(None::<&VelocityDataPoint>, |best, p| match best {
      Some(b) if b.velocity >= p.velocity => Some(b),
      _ => Some(p),
    });

  let at_target = points.iter().find(|p| p.velocity >= target_velocity);

  VelocityMetrics {
    max_velocity: peak.map(|p| p.velocity).unwrap_or(0.0),
    time_to_peak: peak.map(|p| p.time).unwrap_or(0.0),
    time_to_target: at_target.map(|p| p.time),
    velocity_at_target: at_target.map(|p| p.velocity),
    target_velocity,
    total_duration: points.last().map(|p| p.time).unwrap_or(0.0),
  }
}

/// Complete synthetic velocity payload for one entry.
/// Metrics describe the first-seconds acceleration profile.
pub fn mock_velocity_data<R: Rng + ?Sized>(
  entry_code: &str,
  distance: &str,
  rng: &mut R,
) -> VelocityData {
  let first_10_seconds = generate_first_seconds(rng);
  let full_race = generate_full_race(distance, rng);
  let metrics = compute_metrics(&first_10_seconds, TARGET_VELOCITY);

  VelocityData {
    entry_code: entry_code.to_string(),
    full_race,
    first_10_seconds,
    metrics,
    units: Some(VELOCITY_UNITS.to_string()),
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
