//! Stage Controller
//!
//! Pure step functions over the decline attempt count:
//! - stage (1..=6): accept and decline target size tiers
//! - decline level (0..=15): when the decline target disappears
//! - mood: mascot expression
//! - hint text under the buttons

use serde::{Deserialize, Serialize};

use crate::constants::{
    ATTEMPTS_PER_STAGE, DECLINE_LEVEL_CAP, DECLINE_VISIBLE_MAX, MAX_STAGE, MOOD_EXCITED_AT,
    MOOD_PLEADING_AT,
};
use crate::geometry::Size;

/// stage = min(attempts / 2 + 1, MAX_STAGE)
pub fn derive_stage(attempts: u32) -> u32 {
    (attempts / ATTEMPTS_PER_STAGE + 1).min(MAX_STAGE)
}

/// level = min(attempts, DECLINE_LEVEL_CAP)
pub fn derive_decline_level(attempts: u32) -> u32 {
    attempts.min(DECLINE_LEVEL_CAP)
}

pub fn is_decline_visible(level: u32) -> bool {
    level <= DECLINE_VISIBLE_MAX
}

/// Mascot mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Pleading,
    Excited,
}

/// Face glyphs the mascot wears for a mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Expression {
    pub eyes: &'static str,
    pub mouth: &'static str,
    pub blush: bool,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Pleading => "pleading",
            Mood::Excited => "excited",
        }
    }

    pub fn expression(&self) -> Expression {
        match self {
            Mood::Happy => Expression {
                eyes: "◠‿◠",
                mouth: "ᴥ",
                blush: true,
            },
            Mood::Sad => Expression {
                eyes: "◕︵◕",
                mouth: "︿",
                blush: false,
            },
            Mood::Excited => Expression {
                eyes: "★‿★",
                mouth: "▽",
                blush: true,
            },
            Mood::Pleading => Expression {
                eyes: "◕‸◕",
                mouth: "ω",
                blush: true,
            },
        }
    }
}

pub fn derive_mood(attempts: u32, success: bool) -> Mood {
    if success {
        return Mood::Excited;
    }
    match attempts {
        0 => Mood::Happy,
        n if n < MOOD_PLEADING_AT => Mood::Sad,
        n if n < MOOD_EXCITED_AT => Mood::Pleading,
        // the Yes button is taking over by now
        _ => Mood::Excited,
    }
}

/// Line shown under the buttons once the user keeps declining
pub fn hint_text(attempts: u32) -> Option<&'static str> {
    match attempts {
        0..=5 => None,
        6..=9 => Some("The Yes button is looking pretty nice... 👀"),
        _ => Some("Just click Yes already! 💖"),
    }
}

/// How the decline target looks at a given level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclineAppearance {
    pub size: Size,
    pub font_size_rem: f32,
    pub label: &'static str,
    pub opacity: f32,
    /// Label jitters side to side
    pub shaking: bool,
    /// Seconds the move animation takes
    pub transition_secs: f32,
}

/// `None` once `level` passes the visible maximum. Size, label and motion
/// follow `stage`, clamped to `MAX_STAGE`.
pub fn decline_appearance(stage: u32, level: u32) -> Option<DeclineAppearance> {
    if !is_decline_visible(level) {
        return None;
    }
    let stage = stage.min(MAX_STAGE);

    let (width, height, font_size_rem, label) = decline_tier(stage);
    let transition_secs = match stage {
        0..=4 => 0.3,
        5..=8 => 0.2,
        _ => 0.15,
    };

    Some(DeclineAppearance {
        size: Size::new(width, height),
        font_size_rem,
        label,
        opacity: if stage > 10 { 0.7 } else { 1.0 },
        shaking: stage >= 6,
        transition_secs,
    })
}

fn decline_tier(stage: u32) -> (f32, f32, f32, &'static str) {
    match stage {
        0..=4 => (120.0, 48.0, 1.0, "No 😢"),
        5..=6 => (110.0, 44.0, 0.95, "Still no? 🥺"),
        7..=8 => (100.0, 42.0, 0.9, "Are you sure? 😰"),
        9..=10 => (90.0, 38.0, 0.85, "Please no! 😭"),
        11..=12 => (80.0, 34.0, 0.8, "Really?! 💔"),
        _ => (70.0, 30.0, 0.75, "😱"),
    }
}

/// How the primary accept target looks at a given stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptAppearance {
    pub size: Size,
    pub font_size_rem: f32,
    pub label: &'static str,
    pub pulsing: bool,
    pub glowing: bool,
}

const ACCEPT_TIERS: [(f32, f32, f32, &str); 6] = [
    (140.0, 52.0, 1.125, "Yes! 💗"),
    (170.0, 58.0, 1.25, "Yes! 💗"),
    (210.0, 68.0, 1.4, "Yes! 💕"),
    (260.0, 80.0, 1.6, "Say Yes! 💖"),
    (320.0, 95.0, 1.8, "Just say Yes! 💝"),
    (380.0, 110.0, 2.0, "You know you want to! 💖"),
];

pub fn accept_appearance(stage: u32) -> AcceptAppearance {
    let idx = (stage as usize).min(ACCEPT_TIERS.len() - 1);
    let (width, height, font_size_rem, label) = ACCEPT_TIERS[idx];
    AcceptAppearance {
        size: Size::new(width, height),
        font_size_rem,
        label,
        pulsing: stage >= 4,
        glowing: stage >= 3,
    }
}
