//! Flight lesson pricing. Rates and Hobbs time are normal samples clamped
//! to realistic bands, so every quote differs a little.

use serde::{Deserialize, Serialize};

use crate::rng::{rounded_normal, RandomSource};
use crate::simulation::state::TrainingPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightKind {
    Dual,
    Solo,
    CrossCountryDual,
    NightDual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightQuote {
    pub kind: FlightKind,
    pub aircraft_rate: f64,
    pub cfi_rate: f64,
    /// Hobbs time, rounded to a tenth of an hour as logged.
    pub hobbs: f64,
    /// Hours the instructor bills for; zero for solo.
    pub lesson_hours: f64,
    pub aircraft: f64,
    pub cfi: f64,
    pub fuel: f64,
    pub total: f64,
}

impl FlightQuote {
    fn new(
        kind: FlightKind,
        aircraft_rate: f64,
        cfi_rate: f64,
        hobbs: f64,
        lesson_hours: f64,
        fuel: f64,
    ) -> Self {
        let aircraft = (aircraft_rate * hobbs).round();
        let cfi = (cfi_rate * lesson_hours).round();
        Self {
            kind,
            aircraft_rate,
            cfi_rate,
            hobbs,
            lesson_hours,
            aircraft,
            cfi,
            fuel,
            total: aircraft + cfi + fuel,
        }
    }

    /// Total with the fuel surcharge applied, as charged.
    pub fn charged(&self, fuel_price_increased: bool) -> f64 {
        if fuel_price_increased {
            (self.total * FUEL_SURCHARGE).round()
        } else {
            self.total
        }
    }
}

pub const FUEL_SURCHARGE: f64 = 1.15;

fn hobbs(rng: &mut dyn RandomSource, mean: f64, std_dev: f64, min: f64, max: f64) -> f64 {
    let sample = rng.normal(mean, std_dev).clamp(min, max);
    (sample * 10.0).round() / 10.0
}

/// Standard dual lesson: a two hour block, three hours once cross-country
/// training starts.
pub fn dual_lesson(phase: TrainingPhase, rng: &mut dyn RandomSource) -> FlightQuote {
    let aircraft_rate = rounded_normal(rng, 165.0, 15.0, 120.0, 200.0);
    let cfi_rate = rounded_normal(rng, 85.0, 12.0, 60.0, 110.0);
    let (time, lesson_hours) = if phase == TrainingPhase::CrossCountry {
        (hobbs(rng, 2.0, 0.3, 1.5, 2.5), 3.0)
    } else {
        (hobbs(rng, 1.2, 0.3, 0.7, 1.8), 2.0)
    };
    FlightQuote::new(FlightKind::Dual, aircraft_rate, cfi_rate, time, lesson_hours, 0.0)
}

pub fn solo_flight(rng: &mut dyn RandomSource) -> FlightQuote {
    let aircraft_rate = rounded_normal(rng, 165.0, 15.0, 120.0, 200.0);
    let time = hobbs(rng, 1.2, 0.2, 1.0, 1.5);
    FlightQuote::new(FlightKind::Solo, aircraft_rate, 0.0, time, 0.0, 0.0)
}

/// Cross-country dual; the instructor bills Hobbs time and fuel runs higher.
pub fn cross_country_dual(rng: &mut dyn RandomSource) -> FlightQuote {
    let aircraft_rate = rounded_normal(rng, 165.0, 15.0, 120.0, 200.0);
    let time = hobbs(rng, 3.5, 0.5, 3.0, 4.0);
    let cfi_rate = rounded_normal(rng, 55.0, 10.0, 40.0, 75.0);
    let fuel = (15.0 + rng.next_f64() * 10.0).round();
    FlightQuote::new(FlightKind::CrossCountryDual, aircraft_rate, cfi_rate, time, time, fuel)
}

pub fn night_dual(rng: &mut dyn RandomSource) -> FlightQuote {
    let aircraft_rate = rounded_normal(rng, 170.0, 15.0, 125.0, 205.0);
    let time = hobbs(rng, 2.2, 0.3, 2.0, 2.5);
    let cfi_rate = rounded_normal(rng, 60.0, 10.0, 45.0, 80.0);
    let fuel = (10.0 + rng.next_f64() * 5.0).round();
    FlightQuote::new(FlightKind::NightDual, aircraft_rate, cfi_rate, time, time, fuel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRandom, SeededRandom};

    #[test]
    fn centered_draws_give_mean_prices() {
        // u2 = 0.25 zeroes the Box-Muller cosine term.
        let mut rng = ScriptedRandom::new(vec![0.5, 0.25]);
        let quote = dual_lesson(TrainingPhase::PreSolo, &mut rng);
        assert_eq!(quote.aircraft_rate, 165.0);
        assert_eq!(quote.cfi_rate, 85.0);
        assert_eq!(quote.hobbs, 1.2);
        assert_eq!(quote.aircraft, 198.0);
        assert_eq!(quote.cfi, 170.0);
        assert_eq!(quote.total, 368.0);
    }

    #[test]
    fn cross_country_phase_books_a_longer_block() {
        let mut rng = ScriptedRandom::new(vec![0.5, 0.25]);
        let quote = dual_lesson(TrainingPhase::CrossCountry, &mut rng);
        assert_eq!(quote.lesson_hours, 3.0);
        assert_eq!(quote.hobbs, 2.0);
    }

    #[test]
    fn quotes_stay_in_band() {
        let mut rng = SeededRandom::new(99);
        for _ in 0..500 {
            let solo = solo_flight(&mut rng);
            assert!((1.0..=1.5).contains(&solo.hobbs));
            assert_eq!(solo.cfi, 0.0);

            let xc = cross_country_dual(&mut rng);
            assert!((3.0..=4.0).contains(&xc.hobbs));
            assert!((15.0..=25.0).contains(&xc.fuel));

            let night = night_dual(&mut rng);
            assert!((125.0..=205.0).contains(&night.aircraft_rate));
            assert!((2.0..=2.5).contains(&night.hobbs));
        }
    }

    #[test]
    fn fuel_surcharge_rounds() {
        let mut rng = ScriptedRandom::new(vec![0.5, 0.25]);
        let quote = dual_lesson(TrainingPhase::PreSolo, &mut rng);
        assert_eq!(quote.charged(false), 368.0);
        assert_eq!(quote.charged(true), 423.0);
    }
}
