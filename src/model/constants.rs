// Initial ratings by tier
pub const TOP_TIER_BASE: f64 = 1500.0;
pub const MID_TIER_BASE: f64 = 1200.0;
pub const BOTTOM_TIER_BASE: f64 = 900.0;
pub const PRIOR_STRENGTH: f64 = 0.15;
pub const PRIOR_WEIGHTS: [f64; 2] = [0.70, 0.30];
// Week at which the dynamic prior strength reaches zero
pub const PRIOR_FADE_WEEKS: u32 = 15;
pub const PRIOR_FADE_START: f64 = 0.2;

// Rating exchange
pub const K_FACTOR: f64 = 40.0;
pub const POSTSEASON_K_MULTIPLIER: f64 = 0.65;
pub const ELO_SCALE: f64 = 400.0;
pub const RATING_CEILING: f64 = 1850.0;
pub const HFA: f64 = 65.0;
pub const HFA_POSTSEASON: f64 = 20.0;
pub const HFA_NEUTRAL: f64 = 0.0;
pub const UPSET_GAP: f64 = 150.0;
pub const UPSET_MULTIPLIER: f64 = 1.18;
pub const CROSS_TIER_UPSET_MULTIPLIER: f64 = 1.12;
pub const UPSET_MULTIPLIER_CAP: f64 = 1.25;

// Matchup weights
pub const WEIGHT_TOP_TOP: f64 = 1.0;
pub const WEIGHT_TOP_MID: f64 = 0.8;
pub const WEIGHT_MID_MID: f64 = 0.65;
pub const WEIGHT_MAJOR_BOTTOM: f64 = 0.2;
pub const WEIGHT_BOTTOM_BOTTOM: f64 = 0.1;

// Conference quality
pub const CQ_TOP_HALF_WEIGHT: f64 = 0.70;
pub const CQ_FULL_AVERAGE_WEIGHT: f64 = 0.30;
pub const OOC_WEIGHT_TOP: f64 = 1.0;
pub const OOC_WEIGHT_MID: f64 = 0.5;
pub const OOC_WEIGHT_BOTTOM: f64 = 0.1;
pub const OOC_MULTIPLIER_FLOOR: f64 = 0.8;
pub const OOC_MULTIPLIER_CEILING: f64 = 1.2;
pub const CHAOS_STD_DEV_THRESHOLD: f64 = 160.0;
pub const CHAOS_TAX_MULTIPLIER: f64 = 0.90;

// Resume
pub const RESUME_BASE: f64 = 1000.0;
pub const RESUME_WIN_SCALE: f64 = 1000.0;
pub const HOME_WIN_WEIGHT: f64 = 1.0;
pub const ROAD_WIN_WEIGHT: f64 = 1.1;
pub const SOV_THRESHOLD_TOP: f64 = 1200.0;
pub const SOV_THRESHOLD_OTHER: f64 = 1050.0;
pub const SOV_MULTIPLIER_TOP: f64 = 0.35;
pub const SOV_MULTIPLIER_OTHER: f64 = 0.35;
pub const SOS_BASELINE_TOP: f64 = 1420.0;
pub const SOS_BASELINE_OTHER: f64 = 1300.0;
pub const SOS_DEFAULT_AVERAGE: f64 = 1500.0;
pub const SOS_LOG_SCALE: f64 = 80.0;
pub const SOS_PENALTY_MULTIPLIER: f64 = 0.5;
pub const QUALITY_WIN_PERCENTILE: f64 = 75.0;
pub const QUALITY_LOSS_PERCENTILE: f64 = 80.0;
pub const BAD_LOSS_PERCENTILE: f64 = 25.0;
pub const QUALITY_WIN_MULTIPLIER: f64 = 0.35;
pub const QUALITY_LOSS_MULTIPLIER: f64 = 0.10;
pub const BAD_LOSS_MULTIPLIER: f64 = 0.25;
// Thresholds used when there are no ratings to take percentiles of
pub const FALLBACK_QUALITY_WIN_THRESHOLD: f64 = 1600.0;
pub const FALLBACK_QUALITY_LOSS_THRESHOLD: f64 = 1650.0;
pub const FALLBACK_BAD_LOSS_THRESHOLD: f64 = 1100.0;
pub const CROSS_TIER_WIN_BONUS: f64 = 60.0;
pub const LOSS_PENALTY_BASE: f64 = 150.0;
pub const LOSS_PENALTY_EXPONENT: f64 = 1.1;
pub const UNDEFEATED_MULTIPLIER: f64 = 1.05;
pub const ONE_LOSS_MULTIPLIER: f64 = 1.02;
pub const PERFECTION_MIN_GAMES: u32 = 12;
pub const CHAMPIONSHIP_WIN_BONUS: f64 = 100.0;
pub const CHAMPIONSHIP_LOSS_BONUS: f64 = 50.0;

// Final score
pub const RATING_WEIGHT: f64 = 0.65;
pub const CONFERENCE_WEIGHT: f64 = 0.08;
pub const RESUME_WEIGHT: f64 = 0.27;
pub const NORMALIZED_MAX: f64 = 100.0;

// Convergence
pub const PASSES: usize = 2;
pub const REFERENCE_WEIGHT: f64 = 1.0;
