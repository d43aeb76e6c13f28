//! Centralized tuning constants for the proposal core.
//!
//! `ProposalConfig::default()` is built from these values. Appearance tables
//! (label text, font sizes) stay in `stage` as their single source of truth.

// =====================================================
// Stage progression
// =====================================================

/// Highest stage reachable: stage = min(attempts / 2 + 1, MAX_STAGE)
pub const MAX_STAGE: u32 = 6;

/// Attempts per stage step
pub const ATTEMPTS_PER_STAGE: u32 = 2;

/// Cap for the decline level that drives decline size and disappearance
pub const DECLINE_LEVEL_CAP: u32 = 15;

/// Highest decline level at which the decline target is still rendered
pub const DECLINE_VISIBLE_MAX: u32 = 14;

/// Mood switches from Sad to Pleading at this many attempts
pub const MOOD_PLEADING_AT: u32 = 5;

/// Mood switches from Pleading to Excited at this many attempts
pub const MOOD_EXCITED_AT: u32 = 10;

// =====================================================
// Placement
// =====================================================

/// Padding added around the accept target to form the exclusion zone (px)
pub const EXCLUSION_PADDING: f32 = 50.0;

/// Distance kept from every container edge (px)
pub const EDGE_BUFFER: f32 = 20.0;

/// Decline target never goes below this fraction of the container height
pub const MAX_Y_FRACTION: f32 = 0.65;

/// Random samples tried before falling back to the deterministic edge spot
pub const PLACEMENT_ATTEMPT_BUDGET: u32 = 100;

/// Decline target position before the first placement
pub const INITIAL_DECLINE_X: f32 = 200.0;
pub const INITIAL_DECLINE_Y: f32 = 180.0;

// =====================================================
// Spawned accept targets
// =====================================================

/// Spawning starts once attempts exceed this value
pub const SPAWN_THRESHOLD: u32 = 8;

/// Upper bound on targets added by a single decline attempt
pub const MAX_SPAWN_PER_ATTEMPT: u32 = 3;

/// Maximum number of spawned targets retained (oldest evicted first)
pub const SPAWN_CAP: usize = 12;

/// Spawned target width = SPAWN_MIN_WIDTH + u * SPAWN_WIDTH_JITTER
pub const SPAWN_MIN_WIDTH: f32 = 120.0;
pub const SPAWN_WIDTH_JITTER: f32 = 60.0;

/// Spawned target height = SPAWN_MIN_HEIGHT + u * SPAWN_HEIGHT_JITTER
pub const SPAWN_MIN_HEIGHT: f32 = 45.0;
pub const SPAWN_HEIGHT_JITTER: f32 = 20.0;

// =====================================================
// Layout fallbacks (before the page has measured itself)
// =====================================================

pub const FALLBACK_CONTAINER_WIDTH: f32 = 500.0;
pub const FALLBACK_CONTAINER_HEIGHT: f32 = 400.0;
pub const FALLBACK_ACCEPT_X: f32 = 150.0;
pub const FALLBACK_ACCEPT_Y: f32 = 280.0;
pub const FALLBACK_ACCEPT_WIDTH: f32 = 140.0;
pub const FALLBACK_ACCEPT_HEIGHT: f32 = 52.0;

// =====================================================
// Success / sharing
// =====================================================

/// How long the celebration flag stays raised after acceptance (seconds)
pub const CELEBRATION_SECS: f32 = 7.0;

/// Recipient names are cut to this many characters after filtering
pub const MAX_NAME_LEN: usize = 20;

/// Name shown when the page parameter is missing or filters to nothing
pub const DEFAULT_RECIPIENT_NAME: &str = "My Love";

/// Largest photo accepted for upload (10 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
