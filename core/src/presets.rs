use crate::{BlindLevel, PrizePosition, ValidationError, timer};
use std::str::FromStr;

/// Small/big blinds per level for each stock ladder.
const TURBO: [(u64, u64); 10] = [
    (25, 50), (50, 100), (75, 150), (100, 200), (150, 300),
    (200, 400), (300, 600), (500, 1000), (750, 1500), (1000, 2000),
];
const NORMAL: [(u64, u64); 10] = [
    (25, 50), (50, 100), (75, 150), (100, 200), (150, 300),
    (200, 400), (300, 600), (400, 800), (500, 1000), (600, 1200),
];
const DEEP: [(u64, u64); 10] = [
    (25, 50), (50, 100), (75, 150), (100, 200), (125, 250),
    (150, 300), (200, 400), (250, 500), (300, 600), (400, 800),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlindPreset {
    Turbo,
    #[default]
    Normal,
    Deep,
}

impl BlindPreset {
    pub const ALL: [BlindPreset; 3] = [BlindPreset::Turbo, BlindPreset::Normal, BlindPreset::Deep];

    pub fn label(&self) -> &'static str {
        match self {
            BlindPreset::Turbo => "Turbo (10 min)",
            BlindPreset::Normal => "Normal (15 min)",
            BlindPreset::Deep => "Deep (20 min)",
        }
    }

    pub fn minutes_per_level(&self) -> u32 {
        match self {
            BlindPreset::Turbo => 10,
            BlindPreset::Normal => 15,
            BlindPreset::Deep => 20,
        }
    }

    pub fn levels(&self) -> Vec<BlindLevel> {
        let table = match self {
            BlindPreset::Turbo => &TURBO,
            BlindPreset::Normal => &NORMAL,
            BlindPreset::Deep => &DEEP,
        };
        let duration = self.minutes_per_level();
        let mut levels: Vec<BlindLevel> = table
            .iter()
            .map(|&(small_blind, big_blind)| BlindLevel {
                level: 0,
                small_blind,
                big_blind,
                ante: None,
                duration,
            })
            .collect();
        timer::renumber_levels(&mut levels);
        levels
    }

    pub fn next(self) -> Self {
        match self {
            BlindPreset::Turbo => BlindPreset::Normal,
            BlindPreset::Normal => BlindPreset::Deep,
            BlindPreset::Deep => BlindPreset::Turbo,
        }
    }
}

impl FromStr for BlindPreset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "turbo" => Ok(BlindPreset::Turbo),
            "normal" => Ok(BlindPreset::Normal),
            "deep" => Ok(BlindPreset::Deep),
            other => Err(ValidationError::Parse(format!("unknown blind preset '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrizePreset {
    WinnerTakesAll,
    SeventyThirty,
    #[default]
    FiftyThirtyTwenty,
    FortyTwentyFiveTwentyFifteen,
}

impl PrizePreset {
    pub const ALL: [PrizePreset; 4] = [
        PrizePreset::WinnerTakesAll,
        PrizePreset::SeventyThirty,
        PrizePreset::FiftyThirtyTwenty,
        PrizePreset::FortyTwentyFiveTwentyFifteen,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PrizePreset::WinnerTakesAll => "Winner takes all",
            PrizePreset::SeventyThirty => "70% / 30%",
            PrizePreset::FiftyThirtyTwenty => "50% / 30% / 20%",
            PrizePreset::FortyTwentyFiveTwentyFifteen => "40% / 25% / 20% / 15%",
        }
    }

    fn shares(&self) -> &'static [f64] {
        match self {
            PrizePreset::WinnerTakesAll => &[100.0],
            PrizePreset::SeventyThirty => &[70.0, 30.0],
            PrizePreset::FiftyThirtyTwenty => &[50.0, 30.0, 20.0],
            PrizePreset::FortyTwentyFiveTwentyFifteen => &[40.0, 25.0, 20.0, 15.0],
        }
    }

    pub fn positions(&self) -> Vec<PrizePosition> {
        self.shares()
            .iter()
            .zip(1u32..)
            .map(|(&percentage, position)| PrizePosition { position, percentage })
            .collect()
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// Parse a JSON array of levels (`smallBlind`, `bigBlind`, optional `ante`,
/// `duration` in minutes). `level` may be omitted; numbering is reassigned.
pub fn parse_blind_levels(json: &str) -> Result<Vec<BlindLevel>, ValidationError> {
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct RawLevel {
        small_blind: u64,
        big_blind: u64,
        #[serde(default)]
        ante: Option<u64>,
        duration: u32,
    }

    let raw: Vec<RawLevel> =
        serde_json::from_str(json).map_err(|e| ValidationError::Ladder(e.to_string()))?;
    if raw.is_empty() {
        return Err(ValidationError::Ladder("no levels defined".into()));
    }

    let mut levels = Vec::with_capacity(raw.len());
    for (index, r) in raw.into_iter().enumerate() {
        let level = BlindLevel::new(r.small_blind, r.big_blind, r.ante, r.duration)
            .map_err(|e| ValidationError::Ladder(format!("level {}: {e}", index + 1)))?;
        levels.push(level);
    }
    timer::renumber_levels(&mut levels);
    Ok(levels)
}
