//! Offline rune (gear) recommendations.
//!
//! Character documents are scanned for skill texts. Percentage coefficients
//! give the stat a character scales with, keyword rules give its
//! [`Archetype`], and the archetype picks rune sets, main stats and substat
//! priorities from the [`RuneCatalog`].

pub mod archetype;
pub mod catalog;
pub mod recommend;
pub mod report;
pub mod text;

pub use archetype::Archetype;
pub use catalog::{RuneCatalog, RuneSet};
pub use recommend::{BuildSets, GearBuild, GearRecommendation, GearRecommender, SetChoice};
pub use report::{GearLoader, GearReport, GeneratedFrom, deep_merge};
pub use text::{ScalingStat, StatWeights, TextPatterns};
