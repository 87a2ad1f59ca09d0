use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherKind {
    Clear,
    Marginal,
    Ifr,
    Storms,
}

/// Weekly cycle, indexed by `(day - 1) % 7`.
const WEATHER_CYCLE: [WeatherKind; 7] = [
    WeatherKind::Clear,
    WeatherKind::Clear,
    WeatherKind::Marginal,
    WeatherKind::Clear,
    WeatherKind::Ifr,
    WeatherKind::Clear,
    WeatherKind::Storms,
];

impl WeatherKind {
    pub fn for_day(day: u32) -> Self {
        let idx = (day.max(1) - 1) as usize % WEATHER_CYCLE.len();
        WEATHER_CYCLE[idx]
    }

    /// Student pilots only fly in clear VFR.
    pub fn is_flyable(self) -> bool {
        matches!(self, WeatherKind::Clear)
    }

    pub fn name(self) -> &'static str {
        match self {
            WeatherKind::Clear => "Clear skies",
            WeatherKind::Marginal => "Marginal VFR",
            WeatherKind::Ifr => "IFR conditions",
            WeatherKind::Storms => "Thunderstorms",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeatherKind::Clear => "clear",
            WeatherKind::Marginal => "marginal",
            WeatherKind::Ifr => "ifr",
            WeatherKind::Storms => "storms",
        }
    }
}

impl FromStr for WeatherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clear" => Ok(WeatherKind::Clear),
            "marginal" => Ok(WeatherKind::Marginal),
            "ifr" => Ok(WeatherKind::Ifr),
            "storms" => Ok(WeatherKind::Storms),
            _ => Err(s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_repeats_weekly() {
        assert_eq!(WeatherKind::for_day(1), WeatherKind::Clear);
        assert_eq!(WeatherKind::for_day(3), WeatherKind::Marginal);
        assert_eq!(WeatherKind::for_day(7), WeatherKind::Storms);
        assert_eq!(WeatherKind::for_day(8), WeatherKind::Clear);
        assert!(!WeatherKind::for_day(5).is_flyable());
    }
}
