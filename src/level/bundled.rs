//! The thirty levels that ship with the game, compiled in.
use super::{LevelError, LevelGrid, LevelId, LevelSource};
use crate::types::Difficulty;

const EASY: [&str; 10] = [
    include_str!("../../data/levels/level1_0.txt"),
    include_str!("../../data/levels/level1_1.txt"),
    include_str!("../../data/levels/level1_2.txt"),
    include_str!("../../data/levels/level1_3.txt"),
    include_str!("../../data/levels/level1_4.txt"),
    include_str!("../../data/levels/level1_5.txt"),
    include_str!("../../data/levels/level1_6.txt"),
    include_str!("../../data/levels/level1_7.txt"),
    include_str!("../../data/levels/level1_8.txt"),
    include_str!("../../data/levels/level1_9.txt"),
];

const NORMAL: [&str; 10] = [
    include_str!("../../data/levels/level2_0.txt"),
    include_str!("../../data/levels/level2_1.txt"),
    include_str!("../../data/levels/level2_2.txt"),
    include_str!("../../data/levels/level2_3.txt"),
    include_str!("../../data/levels/level2_4.txt"),
    include_str!("../../data/levels/level2_5.txt"),
    include_str!("../../data/levels/level2_6.txt"),
    include_str!("../../data/levels/level2_7.txt"),
    include_str!("../../data/levels/level2_8.txt"),
    include_str!("../../data/levels/level2_9.txt"),
];

const HARD: [&str; 10] = [
    include_str!("../../data/levels/level3_0.txt"),
    include_str!("../../data/levels/level3_1.txt"),
    include_str!("../../data/levels/level3_2.txt"),
    include_str!("../../data/levels/level3_3.txt"),
    include_str!("../../data/levels/level3_4.txt"),
    include_str!("../../data/levels/level3_5.txt"),
    include_str!("../../data/levels/level3_6.txt"),
    include_str!("../../data/levels/level3_7.txt"),
    include_str!("../../data/levels/level3_8.txt"),
    include_str!("../../data/levels/level3_9.txt"),
];

/// Levels embedded in the binary, so the game runs without a data directory
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledLevels;

impl BundledLevels {
    /// the raw text of a bundled level
    pub fn text(id: LevelId) -> &'static str {
        let tier = match id.difficulty() {
            Difficulty::Easy => &EASY,
            Difficulty::Normal => &NORMAL,
            Difficulty::Hard => &HARD,
        };
        tier[id.index() as usize]
    }
}

impl LevelSource for BundledLevels {
    fn load(&self, id: LevelId) -> Result<LevelGrid, LevelError> {
        LevelGrid::parse(Self::text(id))
    }
}
