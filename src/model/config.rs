use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{RankingError, Result},
    model::{constants::*, structures::conference_class::ConferenceClass}
};

/// Initial ratings per tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TierBases {
    pub top: f64,
    pub mid: f64,
    pub bottom: f64
}

impl Default for TierBases {
    fn default() -> Self {
        Self {
            top: TOP_TIER_BASE,
            mid: MID_TIER_BASE,
            bottom: BOTTOM_TIER_BASE
        }
    }
}

impl TierBases {
    pub fn for_class(&self, class: ConferenceClass) -> f64 {
        match class {
            ConferenceClass::Top => self.top,
            ConferenceClass::Mid => self.mid,
            ConferenceClass::Bottom => self.bottom
        }
    }
}

/// Scaling of the rating exchange by the tiers of the two teams
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchupWeights {
    pub top_vs_top: f64,
    pub top_vs_mid: f64,
    pub mid_vs_mid: f64,
    pub major_vs_bottom: f64,
    pub bottom_vs_bottom: f64
}

impl Default for MatchupWeights {
    fn default() -> Self {
        Self {
            top_vs_top: WEIGHT_TOP_TOP,
            top_vs_mid: WEIGHT_TOP_MID,
            mid_vs_mid: WEIGHT_MID_MID,
            major_vs_bottom: WEIGHT_MAJOR_BOTTOM,
            bottom_vs_bottom: WEIGHT_BOTTOM_BOTTOM
        }
    }
}

impl MatchupWeights {
    pub fn weight(&self, a: ConferenceClass, b: ConferenceClass) -> f64 {
        use ConferenceClass::*;

        match (a, b) {
            (Top, Top) => self.top_vs_top,
            (Top, Mid) | (Mid, Top) => self.top_vs_mid,
            (Mid, Mid) => self.mid_vs_mid,
            (Bottom, Bottom) => self.bottom_vs_bottom,
            _ => self.major_vs_bottom
        }
    }
}

/// Home-field advantage in rating points, applied to the expectation only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HomeField {
    pub regular: f64,
    pub postseason: f64,
    pub neutral: f64
}

impl Default for HomeField {
    fn default() -> Self {
        Self {
            regular: HFA,
            postseason: HFA_POSTSEASON,
            neutral: HFA_NEUTRAL
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UpsetConfig {
    /// Loser must out-rate the winner by more than this for the upset bonus
    pub rating_gap: f64,
    pub multiplier: f64,
    /// Applied when a mid-tier team beats a top-tier team
    pub cross_tier_multiplier: f64,
    /// Upper bound of the combined multiplier
    pub cap: f64
}

impl Default for UpsetConfig {
    fn default() -> Self {
        Self {
            rating_gap: UPSET_GAP,
            multiplier: UPSET_MULTIPLIER,
            cross_tier_multiplier: CROSS_TIER_UPSET_MULTIPLIER,
            cap: UPSET_MULTIPLIER_CAP
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConferenceConfig {
    pub top_half_weight: f64,
    pub full_average_weight: f64,
    /// Weights of inter-conference games by opponent class
    pub opponent_weight_top: f64,
    pub opponent_weight_mid: f64,
    pub opponent_weight_bottom: f64,
    pub multiplier_floor: f64,
    pub multiplier_ceiling: f64,
    pub chaos_std_dev_threshold: f64,
    pub chaos_tax_multiplier: f64
}

impl Default for ConferenceConfig {
    fn default() -> Self {
        Self {
            top_half_weight: CQ_TOP_HALF_WEIGHT,
            full_average_weight: CQ_FULL_AVERAGE_WEIGHT,
            opponent_weight_top: OOC_WEIGHT_TOP,
            opponent_weight_mid: OOC_WEIGHT_MID,
            opponent_weight_bottom: OOC_WEIGHT_BOTTOM,
            multiplier_floor: OOC_MULTIPLIER_FLOOR,
            multiplier_ceiling: OOC_MULTIPLIER_CEILING,
            chaos_std_dev_threshold: CHAOS_STD_DEV_THRESHOLD,
            chaos_tax_multiplier: CHAOS_TAX_MULTIPLIER
        }
    }
}

impl ConferenceConfig {
    pub fn opponent_weight(&self, class: ConferenceClass) -> f64 {
        match class {
            ConferenceClass::Top => self.opponent_weight_top,
            ConferenceClass::Mid => self.opponent_weight_mid,
            ConferenceClass::Bottom => self.opponent_weight_bottom
        }
    }
}

/// A value that differs between top-tier teams and everyone else
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TierValue {
    pub top: f64,
    pub other: f64
}

impl TierValue {
    pub fn for_class(&self, class: ConferenceClass) -> f64 {
        match class {
            ConferenceClass::Top => self.top,
            _ => self.other
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResumeConfig {
    pub base: f64,
    pub win_scale: f64,
    pub home_win_weight: f64,
    pub road_win_weight: f64,
    pub sov_threshold: TierValue,
    pub sov_multiplier: TierValue,
    pub sos_baseline: TierValue,
    /// Average opponent rating assumed for a team without games
    pub sos_default_average: f64,
    pub sos_log_scale: f64,
    pub sos_penalty_multiplier: f64,
    pub quality_win_percentile: f64,
    pub quality_loss_percentile: f64,
    pub bad_loss_percentile: f64,
    pub quality_win_multiplier: f64,
    pub quality_loss_multiplier: f64,
    pub bad_loss_multiplier: f64,
    pub fallback_quality_win_threshold: f64,
    pub fallback_quality_loss_threshold: f64,
    pub fallback_bad_loss_threshold: f64,
    pub cross_tier_win_bonus: f64,
    pub loss_penalty_base: f64,
    pub loss_penalty_exponent: f64,
    pub undefeated_multiplier: f64,
    pub one_loss_multiplier: f64,
    pub perfection_min_games: u32,
    pub championship_win_bonus: f64,
    pub championship_loss_bonus: f64
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            base: RESUME_BASE,
            win_scale: RESUME_WIN_SCALE,
            home_win_weight: HOME_WIN_WEIGHT,
            road_win_weight: ROAD_WIN_WEIGHT,
            sov_threshold: TierValue {
                top: SOV_THRESHOLD_TOP,
                other: SOV_THRESHOLD_OTHER
            },
            sov_multiplier: TierValue {
                top: SOV_MULTIPLIER_TOP,
                other: SOV_MULTIPLIER_OTHER
            },
            sos_baseline: TierValue {
                top: SOS_BASELINE_TOP,
                other: SOS_BASELINE_OTHER
            },
            sos_default_average: SOS_DEFAULT_AVERAGE,
            sos_log_scale: SOS_LOG_SCALE,
            sos_penalty_multiplier: SOS_PENALTY_MULTIPLIER,
            quality_win_percentile: QUALITY_WIN_PERCENTILE,
            quality_loss_percentile: QUALITY_LOSS_PERCENTILE,
            bad_loss_percentile: BAD_LOSS_PERCENTILE,
            quality_win_multiplier: QUALITY_WIN_MULTIPLIER,
            quality_loss_multiplier: QUALITY_LOSS_MULTIPLIER,
            bad_loss_multiplier: BAD_LOSS_MULTIPLIER,
            fallback_quality_win_threshold: FALLBACK_QUALITY_WIN_THRESHOLD,
            fallback_quality_loss_threshold: FALLBACK_QUALITY_LOSS_THRESHOLD,
            fallback_bad_loss_threshold: FALLBACK_BAD_LOSS_THRESHOLD,
            cross_tier_win_bonus: CROSS_TIER_WIN_BONUS,
            loss_penalty_base: LOSS_PENALTY_BASE,
            loss_penalty_exponent: LOSS_PENALTY_EXPONENT,
            undefeated_multiplier: UNDEFEATED_MULTIPLIER,
            one_loss_multiplier: ONE_LOSS_MULTIPLIER,
            perfection_min_games: PERFECTION_MIN_GAMES,
            championship_win_bonus: CHAMPIONSHIP_WIN_BONUS,
            championship_loss_bonus: CHAMPIONSHIP_LOSS_BONUS
        }
    }
}

/// Component weights of the final score; must sum to 1
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FinalWeights {
    pub rating: f64,
    pub conference: f64,
    pub resume: f64
}

impl Default for FinalWeights {
    fn default() -> Self {
        Self {
            rating: RATING_WEIGHT,
            conference: CONFERENCE_WEIGHT,
            resume: RESUME_WEIGHT
        }
    }
}

/// Every tunable of the ranking model. Missing keys in a config file take the
/// defaults from [`crate::model::constants`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RankingConfig {
    pub tier_bases: TierBases,
    /// Share of the historical prior in a team's initial rating. `None` when the
    /// config leaves it out, which callers may fill in with a season-dependent value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prior_strength: Option<f64>,
    /// Weights of previous seasons, most recent first
    pub prior_weights: Vec<f64>,
    pub k_factor: f64,
    pub postseason_k_multiplier: f64,
    pub rating_ceiling: f64,
    pub home_field: HomeField,
    pub matchup_weights: MatchupWeights,
    pub upsets: UpsetConfig,
    pub conference: ConferenceConfig,
    pub resume: ResumeConfig,
    pub final_weights: FinalWeights,
    pub passes: usize,
    /// Share of the previous pass's rating in the expected-score strength
    pub reference_weight: f64
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            tier_bases: TierBases::default(),
            prior_strength: None,
            prior_weights: PRIOR_WEIGHTS.to_vec(),
            k_factor: K_FACTOR,
            postseason_k_multiplier: POSTSEASON_K_MULTIPLIER,
            rating_ceiling: RATING_CEILING,
            home_field: HomeField::default(),
            matchup_weights: MatchupWeights::default(),
            upsets: UpsetConfig::default(),
            conference: ConferenceConfig::default(),
            resume: ResumeConfig::default(),
            final_weights: FinalWeights::default(),
            passes: PASSES,
            reference_weight: REFERENCE_WEIGHT
        }
    }
}

impl RankingConfig {
    /// Loads a JSON config file and validates it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| RankingError::Io {
            path: path.to_path_buf(),
            source
        })?;

        let config: RankingConfig = serde_json::from_str(&contents)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let weights = &self.final_weights;
        if [weights.rating, weights.conference, weights.resume]
            .iter()
            .any(|w| *w < 0.0)
        {
            return Err(invalid("final weights must not be negative"));
        }

        let total = weights.rating + weights.conference + weights.resume;
        if (total - 1.0).abs() > 1e-6 {
            return Err(invalid(format!("final weights must sum to 1, got {total}")));
        }

        if let Some(strength) = self.prior_strength {
            if !(0.0..=1.0).contains(&strength) {
                return Err(invalid(format!("prior_strength must be within [0, 1], got {strength}")));
            }
        }

        if !(0.0..=1.0).contains(&self.reference_weight) {
            return Err(invalid(format!(
                "reference_weight must be within [0, 1], got {}",
                self.reference_weight
            )));
        }

        if self.passes == 0 {
            return Err(invalid("at least one pass is required"));
        }

        if self.k_factor <= 0.0 {
            return Err(invalid(format!("k_factor must be positive, got {}", self.k_factor)));
        }

        let resume = &self.resume;
        for p in [
            resume.quality_win_percentile,
            resume.quality_loss_percentile,
            resume.bad_loss_percentile
        ] {
            if !(0.0..=100.0).contains(&p) {
                return Err(invalid(format!("percentiles must be within [0, 100], got {p}")));
            }
        }

        Ok(())
    }

    /// The configured prior strength, or the default when none was set.
    pub fn prior_strength(&self) -> f64 {
        self.prior_strength.unwrap_or(PRIOR_STRENGTH)
    }

    /// Fills in [`dynamic_prior_strength`] for `through_week` when no prior
    /// strength was configured.
    pub fn or_dynamic_prior_strength(mut self, through_week: Option<u32>) -> Self {
        if self.prior_strength.is_none() {
            self.prior_strength = Some(dynamic_prior_strength(through_week));
        }

        self
    }

    /// `(1 - s) * tier_base + s * prior`, or the tier base alone without a prior.
    pub fn initial_rating(&self, class: ConferenceClass, prior: Option<f64>) -> f64 {
        let base = self.tier_bases.for_class(class);

        match prior {
            Some(p) => {
                let strength = self.prior_strength();
                (1.0 - strength) * base + strength * p
            }
            None => base
        }
    }
}

/// Prior strength that fades linearly to zero over the regular season. A full
/// season (no week given) counts as the last week.
pub fn dynamic_prior_strength(through_week: Option<u32>) -> f64 {
    let week = through_week.unwrap_or(PRIOR_FADE_WEEKS).min(PRIOR_FADE_WEEKS);

    (PRIOR_FADE_START * (1.0 - week as f64 / PRIOR_FADE_WEEKS as f64)).max(0.0)
}

fn invalid(message: impl Into<String>) -> RankingError {
    RankingError::InvalidConfig(message.into())
}
