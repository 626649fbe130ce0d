use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Competitive tier of a conference.
///
/// `Top` covers the power conferences (and independents competing at that level),
/// `Mid` the remaining major-division conferences and `Bottom` everything else,
/// including teams whose conference is unknown.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Display)]
#[serde(rename_all = "snake_case")]
pub enum ConferenceClass {
    #[serde(alias = "Power 4")]
    #[strum(serialize = "Power 4")]
    Top,
    #[serde(alias = "Group of 5")]
    #[strum(serialize = "Group of 5")]
    Mid,
    #[default]
    #[serde(alias = "FCS")]
    #[strum(serialize = "FCS")]
    Bottom
}

impl ConferenceClass {
    /// Top and Mid make up the major division.
    pub fn is_major(self) -> bool {
        matches!(self, ConferenceClass::Top | ConferenceClass::Mid)
    }
}

impl TryFrom<&str> for ConferenceClass {
    type Error = ();

    fn try_from(v: &str) -> Result<Self, Self::Error> {
        match v {
            "top" | "Power 4" => Ok(ConferenceClass::Top),
            "mid" | "Group of 5" => Ok(ConferenceClass::Mid),
            "bottom" | "FCS" => Ok(ConferenceClass::Bottom),
            _ => Err(())
        }
    }
}
