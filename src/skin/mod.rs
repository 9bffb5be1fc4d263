//! Cosmetic choices: which sprite sheet, floor, apple and wall images to use.
use serde::{Deserialize, Serialize};

/// snake sprite sheets, drawn with [`crate::layout::SnakeSprite::sheet_frame`]
pub const SNAKE_SHEETS: &[&str] = &["sprites_sheet_1.png", "sprites_sheet_2.png"];
#[allow(missing_docs)]
pub const FLOOR_TILES: &[&str] = &["tile1.jpg", "tile2.jpg", "tile3.jpg"];
#[allow(missing_docs)]
pub const APPLES: &[&str] = &["apple1.png", "apple2.png"];
#[allow(missing_docs)]
pub const WALLS: &[&str] = &["wall1.jpg", "wall2.jpg"];

/// The four things a player can restyle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinSlot {
    #[allow(missing_docs)]
    SnakeSheet,
    #[allow(missing_docs)]
    Floor,
    #[allow(missing_docs)]
    Apple,
    #[allow(missing_docs)]
    Wall,
}

impl SkinSlot {
    #[allow(missing_docs)]
    pub fn all() -> [SkinSlot; 4] {
        [SkinSlot::SnakeSheet, SkinSlot::Floor, SkinSlot::Apple, SkinSlot::Wall]
    }

    /// the asset names this slot chooses between
    pub fn options(self) -> &'static [&'static str] {
        match self {
            SkinSlot::SnakeSheet => SNAKE_SHEETS,
            SkinSlot::Floor => FLOOR_TILES,
            SkinSlot::Apple => APPLES,
            SkinSlot::Wall => WALLS,
        }
    }
}

/// Selected option per slot. Indices are kept in range by every method here;
/// an out of range index read from a config file is wrapped on use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Skin {
    #[allow(missing_docs)]
    pub snake_sheet: usize,
    #[allow(missing_docs)]
    pub floor: usize,
    #[allow(missing_docs)]
    pub apple: usize,
    #[allow(missing_docs)]
    pub wall: usize,
}

impl Skin {
    fn index_mut(&mut self, slot: SkinSlot) -> &mut usize {
        match slot {
            SkinSlot::SnakeSheet => &mut self.snake_sheet,
            SkinSlot::Floor => &mut self.floor,
            SkinSlot::Apple => &mut self.apple,
            SkinSlot::Wall => &mut self.wall,
        }
    }

    /// the option index selected for a slot
    pub fn index(&self, slot: SkinSlot) -> usize {
        let raw = match slot {
            SkinSlot::SnakeSheet => self.snake_sheet,
            SkinSlot::Floor => self.floor,
            SkinSlot::Apple => self.apple,
            SkinSlot::Wall => self.wall,
        };
        raw % slot.options().len()
    }

    /// the asset file name selected for a slot
    pub fn asset(&self, slot: SkinSlot) -> &'static str {
        slot.options()[self.index(slot)]
    }

    /// moves a slot to its next option, wrapping after the last
    pub fn next(&mut self, slot: SkinSlot) {
        let len = slot.options().len();
        let current = self.index(slot);
        *self.index_mut(slot) = (current + 1) % len;
    }

    /// moves a slot to its previous option, wrapping before the first
    pub fn previous(&mut self, slot: SkinSlot) {
        let len = slot.options().len();
        let current = self.index(slot);
        *self.index_mut(slot) = (current + len - 1) % len;
    }

    /// back to the first option everywhere
    pub fn reset(&mut self) {
        *self = Skin::default();
    }
}
