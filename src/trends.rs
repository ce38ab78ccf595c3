//! Seeded synthetic race/breeze history
//!
//! Produces a believable event history for a horse before the backend has
//! real data for it. Output is a pure function of the horse identifier and
//! the reference date: the identifier is hashed into the seed of a ChaCha8
//! stream, so the same horse always gets the same history.

use chrono::{Duration, NaiveDate, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::color::clamp_score;
use crate::models::{EventType, HistoryMeta, HistoryResponse, SpeedDataPoint, TrendsEvent};
use crate::velocity::generate_full_race;

/// ---------------------------------------------------------------------------
/// Constants
/// ---------------------------------------------------------------------------

/// Wellness above this raises a welfare alert (start of the high-risk band)
pub const WELFARE_ALERT_THRESHOLD: f64 = 100.0;

/// A breeze closer than this to any race is dropped
pub const RACE_EXCLUSION_DAYS: i64 = 3;

const BREEZE_SPACING_MIN: i64 = 5;
const BREEZE_SPACING_MAX: i64 = 9;
const DRIFT_CARRY: f64 = 0.6;
const DRIFT_STEP: f64 = 3.0;
const DRIFT_LIMIT: f64 = 8.0;
const FURLONG_MILES: f64 = 0.125;

const BREEZE_LOCATIONS: [&str; 4] = ["Santa Anita", "San Luis Rey Downs", "Los Alamitos", "Del Mar"];
const BREEZE_DISTANCES: [&str; 3] = ["3f", "4f", "5f"];

/// Hand-specified race around which breezes are generated
struct AnchorRace {
  days_ago: i64,
  location: &'static str,
  distance: &'static str,
  performance_score: f64,
  wellness_score: f64,
}

/// Newest first
const ANCHOR_RACES: [AnchorRace; 5] = [
  AnchorRace { days_ago: 12, location: "Santa Anita", distance: "6f", performance_score: 96.0, wellness_score: 64.0 },
  AnchorRace { days_ago: 41, location: "Del Mar", distance: "6.5f", performance_score: 91.0, wellness_score: 72.0 },
  AnchorRace { days_ago: 76, location: "Santa Anita", distance: "7f", performance_score: 87.0, wellness_score: 104.0 },
  AnchorRace { days_ago: 118, location: "Los Alamitos", distance: "6f", performance_score: 84.0, wellness_score: 81.0 },
  AnchorRace { days_ago: 160, location: "Golden Gate", distance: "5.5f", performance_score: 79.0, wellness_score: 58.0 },
];

/// ---------------------------------------------------------------------------
/// Seeding
/// ---------------------------------------------------------------------------

/// Stable 64-bit FNV-1a hash of an identifier
pub fn history_seed(id: &str) -> u64 {
  const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
  const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

  id.bytes()
    .fold(FNV_OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME))
}

/// Deterministic RNG for an identifier
pub fn seeded_rng(id: &str) -> ChaCha8Rng {
  ChaCha8Rng::seed_from_u64(history_seed(id))
}

/// ---------------------------------------------------------------------------
/// Generation
/// ---------------------------------------------------------------------------

fn lerp(a: f64, b: f64, t: f64) -> f64 {
  a + (b - a) * t
}

fn near_race(days_ago: i64) -> bool {
  ANCHOR_RACES
    .iter()
    .any(|race| (race.days_ago - days_ago).abs() <= RACE_EXCLUSION_DAYS)
}

/// Furlong split speeds for a breeze, in mph
fn breeze_splits<R: Rng + ?Sized>(distance: &str, rng: &mut R) -> Vec<SpeedDataPoint> {
  let furlongs = crate::velocity::parse_distance_multiplier(distance).round().max(1.0) as usize;
  let mut elapsed = 0.0;

  (0..furlongs)
    .map(|_| {
      let split = rng.gen_range(11.6..13.2);
      elapsed += split;
      SpeedDataPoint {
        time: elapsed,
        speed: FURLONG_MILES / (split / 3600.0),
      }
    })
    .collect()
}

/// Synthetic history for `id` as of `today`, newest first
pub fn generate_trends_history_on(id: &str, today: NaiveDate) -> Vec<TrendsEvent> {
  let mut rng = seeded_rng(id);
  let mut events = Vec::new();

  for (n, race) in ANCHOR_RACES.iter().enumerate() {
    let wellness_score = clamp_score(race.wellness_score);
    events.push(TrendsEvent {
      id: format!("{}-race-{}", id, n + 1),
      date: today - Duration::days(race.days_ago),
      event_type: EventType::Race,
      location: race.location.to_string(),
      distance: race.distance.to_string(),
      performance_score: clamp_score(race.performance_score),
      wellness_score,
      welfare_alert: wellness_score > WELFARE_ALERT_THRESHOLD,
      velocity_data: Some(generate_full_race(race.distance, &mut rng)),
      speed_data: None,
    });
  }

  // Fill each gap oldest to newest: (older anchor, newer anchor).
  // The newest anchor pairs with itself to extend up to today.
  let mut segments: Vec<(&AnchorRace, &AnchorRace, i64)> = ANCHOR_RACES
    .windows(2)
    .map(|pair| (&pair[1], &pair[0], pair[0].days_ago))
    .collect();
  segments.reverse();
  segments.push((&ANCHOR_RACES[0], &ANCHOR_RACES[0], 0));

  let mut breeze_count = 0;
  let mut performance_drift = 0.0;
  let mut wellness_drift = 0.0;

  for (older, newer, end_days_ago) in segments {
    let span = (older.days_ago - end_days_ago).max(1) as f64;
    let mut cursor = older.days_ago - rng.gen_range(BREEZE_SPACING_MIN..=BREEZE_SPACING_MAX);

    while cursor > end_days_ago {
      // Drift is drawn even for excluded slots to keep the stream aligned
      performance_drift = (performance_drift * DRIFT_CARRY + rng.gen_range(-DRIFT_STEP..=DRIFT_STEP))
        .clamp(-DRIFT_LIMIT, DRIFT_LIMIT);
      wellness_drift = (wellness_drift * DRIFT_CARRY + rng.gen_range(-DRIFT_STEP..=DRIFT_STEP))
        .clamp(-DRIFT_LIMIT, DRIFT_LIMIT);
      let location = BREEZE_LOCATIONS[rng.gen_range(0..BREEZE_LOCATIONS.len())];
      let distance = BREEZE_DISTANCES[rng.gen_range(0..BREEZE_DISTANCES.len())];
      let speed_data = breeze_splits(distance, &mut rng);

      if !near_race(cursor) {
        let t = (older.days_ago - cursor) as f64 / span;
        let performance_score = clamp_score(
          lerp(older.performance_score, newer.performance_score, t) + performance_drift,
        )
        .round();
        let wellness_score =
          clamp_score(lerp(older.wellness_score, newer.wellness_score, t) + wellness_drift).round();

        breeze_count += 1;
        events.push(TrendsEvent {
          id: format!("{}-breeze-{}", id, breeze_count),
          date: today - Duration::days(cursor),
          event_type: EventType::Breeze,
          location: location.to_string(),
          distance: distance.to_string(),
          performance_score,
          wellness_score,
          welfare_alert: wellness_score > WELFARE_ALERT_THRESHOLD,
          velocity_data: None,
          speed_data: Some(speed_data),
        });
      }

      cursor -= rng.gen_range(BREEZE_SPACING_MIN..=BREEZE_SPACING_MAX);
    }
  }

  events.sort_by(|a, b| b.date.cmp(&a.date));
  events
}

/// Synthetic history as of the current UTC date
pub fn generate_trends_history(id: &str) -> Vec<TrendsEvent> {
  generate_trends_history_on(id, Utc::now().date_naive())
}

/// History payload shaped like `/horses/{id}/history?days=N`.
/// A window reaching past the earliest representable date keeps everything.
pub fn synthetic_history(id: &str, days: u32, today: NaiveDate) -> HistoryResponse {
  let cutoff = today
    .checked_sub_signed(Duration::days(i64::from(days)))
    .unwrap_or(NaiveDate::MIN);
  let events: Vec<TrendsEvent> = generate_trends_history_on(id, today)
    .into_iter()
    .filter(|event| event.date >= cutoff)
    .collect();

  HistoryResponse {
    meta: HistoryMeta {
      horse_name: id.to_string(),
      total: events.len(),
    },
    events,
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
