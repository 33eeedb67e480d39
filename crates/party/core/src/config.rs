/// Tunable constants of the party scoring function.
///
/// Every field has a `DEFAULT_*` counterpart; a TOML file only needs to list
/// the values that differ.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringWeights {
    pub rarity_ssr: i32,
    pub rarity_sr: i32,
    pub rarity_r: i32,
    pub rarity_unset: i32,
    /// Bonus for matching the boss weakness element.
    pub weakness_match: i32,
    /// Bonus for being strong against the enemy element.
    pub advantage: i32,
    /// Penalty (subtracted) for being weak against the enemy element.
    pub disadvantage: i32,
    /// Bonus for a role favoured by the current mode.
    pub role_bonus: i32,
    /// Bonus for user-pinned focus members.
    pub focus: i32,
    /// Number of members in a party.
    pub party_size: usize,
}

impl ScoringWeights {
    pub const DEFAULT_RARITY_SSR: i32 = 30;
    pub const DEFAULT_RARITY_SR: i32 = 18;
    pub const DEFAULT_RARITY_R: i32 = 10;
    pub const DEFAULT_RARITY_UNSET: i32 = 0;
    pub const DEFAULT_WEAKNESS_MATCH: i32 = 25;
    pub const DEFAULT_ADVANTAGE: i32 = 20;
    pub const DEFAULT_DISADVANTAGE: i32 = 10;
    pub const DEFAULT_ROLE_BONUS: i32 = 6;
    pub const DEFAULT_FOCUS: i32 = 18;
    pub const DEFAULT_PARTY_SIZE: usize = 4;

    pub const fn new() -> Self {
        Self {
            rarity_ssr: Self::DEFAULT_RARITY_SSR,
            rarity_sr: Self::DEFAULT_RARITY_SR,
            rarity_r: Self::DEFAULT_RARITY_R,
            rarity_unset: Self::DEFAULT_RARITY_UNSET,
            weakness_match: Self::DEFAULT_WEAKNESS_MATCH,
            advantage: Self::DEFAULT_ADVANTAGE,
            disadvantage: Self::DEFAULT_DISADVANTAGE,
            role_bonus: Self::DEFAULT_ROLE_BONUS,
            focus: Self::DEFAULT_FOCUS,
            party_size: Self::DEFAULT_PARTY_SIZE,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::new()
    }
}
