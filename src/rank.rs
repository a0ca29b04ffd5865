/// Skill bands reported by the profile and leaderboard endpoints as 0-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTier {
    Unknown,
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    SpecOps,
    EliteOps,
}

impl RankTier {
    pub fn from_index(value: u32) -> Option<Self> {
        match value {
            0 => Some(RankTier::Unknown),
            1 => Some(RankTier::Iron),
            2 => Some(RankTier::Bronze),
            3 => Some(RankTier::Silver),
            4 => Some(RankTier::Gold),
            5 => Some(RankTier::Platinum),
            6 => Some(RankTier::Diamond),
            7 => Some(RankTier::Master),
            8 => Some(RankTier::SpecOps),
            9 => Some(RankTier::EliteOps),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RankTier::Unknown => "Unknown",
            RankTier::Iron => "Iron",
            RankTier::Bronze => "Bronze",
            RankTier::Silver => "Silver",
            RankTier::Gold => "Gold",
            RankTier::Platinum => "Platinum",
            RankTier::Diamond => "Diamond",
            RankTier::Master => "Master",
            RankTier::SpecOps => "Spec Ops",
            RankTier::EliteOps => "Elite Ops",
        }
    }
}

/// Display label for a raw tier integer. The server occasionally reports
/// values outside 0-9; those have no label rather than being an error.
pub fn rank_label(value: u32) -> &'static str {
    RankTier::from_index(value)
        .map(RankTier::label)
        .unwrap_or("")
}
