//! Navigation between the screens around a game.
//!
//! [`AppState`] is the only place that remembers which screen is showing and
//! whether the menu track is already looping. The shell feeds it decoded
//! [`MenuInput`]s and acts on the returned [`MenuResponse`].
use tracing::debug;

use crate::level::LevelId;
use crate::skin::{Skin, SkinSlot};
use crate::types::{Difficulty, SoundCue};

/// the buttons of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainMenuItem {
    #[allow(missing_docs)]
    Play,
    #[allow(missing_docs)]
    Stats,
    #[allow(missing_docs)]
    Settings,
}

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    #[allow(missing_docs)]
    MainMenu,
    #[allow(missing_docs)]
    DifficultySelect,
    /// browsing the ten levels of one difficulty, with a preview of `level`
    LevelSelect(LevelId),
    /// the best score table
    Stats,
    /// the cosmetics screen
    Settings,
    /// a game session is running
    Playing(LevelId),
}

/// what the settings screen can do to the skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsInput {
    #[allow(missing_docs)]
    Previous(SkinSlot),
    #[allow(missing_docs)]
    Next(SkinSlot),
    /// every slot back to its first option
    Reset,
}

/// A decoded press on one of the menu screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuInput {
    #[allow(missing_docs)]
    ChooseItem(MainMenuItem),
    #[allow(missing_docs)]
    ChooseDifficulty(Difficulty),
    #[allow(missing_docs)]
    PreviousLevel,
    #[allow(missing_docs)]
    NextLevel,
    /// start the level being previewed
    Confirm,
    /// back to the main menu, or quit from the main menu itself
    Escape,
    #[allow(missing_docs)]
    Settings(SettingsInput),
}

/// What the shell has to do after a menu input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuEvent {
    /// nothing beyond redrawing
    None,
    /// open a game session on this level
    StartLevel(LevelId),
    /// close the window
    Quit,
}

/// the event of a menu input plus the sounds to play for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuResponse {
    #[allow(missing_docs)]
    pub event: MenuEvent,
    #[allow(missing_docs)]
    pub cues: Vec<SoundCue>,
}

impl MenuResponse {
    fn ignored() -> Self {
        MenuResponse {
            event: MenuEvent::None,
            cues: Vec::new(),
        }
    }

    fn click() -> Self {
        MenuResponse {
            event: MenuEvent::None,
            cues: vec![SoundCue::Click],
        }
    }
}

/// Application level state that outlives any single game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    screen: Screen,
    menu_music_playing: bool,
    skin: Skin,
}

impl AppState {
    /// Starts on the main menu. Call [`AppState::enter_menu`] once the audio
    /// device is ready to get the menu track going.
    pub fn new(skin: Skin) -> Self {
        AppState {
            screen: Screen::MainMenu,
            menu_music_playing: false,
            skin,
        }
    }

    #[allow(missing_docs)]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[allow(missing_docs)]
    pub fn menu_music_playing(&self) -> bool {
        self.menu_music_playing
    }

    #[allow(missing_docs)]
    pub fn skin(&self) -> &Skin {
        &self.skin
    }

    /// the level previewed on the level select screen
    pub fn selected_level(&self) -> Option<LevelId> {
        match self.screen {
            Screen::LevelSelect(id) => Some(id),
            _ => None,
        }
    }

    /// Shows the main menu, starting the menu track unless it is already on
    pub fn enter_menu(&mut self) -> Vec<SoundCue> {
        self.screen = Screen::MainMenu;
        if self.menu_music_playing {
            Vec::new()
        } else {
            self.menu_music_playing = true;
            vec![SoundCue::MenuMusic]
        }
    }

    /// Called when a game session asks to go back to the menu
    pub fn leave_game(&mut self) -> Vec<SoundCue> {
        let mut cues = vec![SoundCue::StopMusic];
        cues.extend(self.enter_menu());
        cues
    }

    /// Applies one input to the current screen. Inputs that make no sense on
    /// the current screen are ignored.
    pub fn handle(&mut self, input: MenuInput) -> MenuResponse {
        match (self.screen, input) {
            (Screen::Playing(_), _) => MenuResponse::ignored(),
            (Screen::MainMenu, MenuInput::Escape) => MenuResponse {
                event: MenuEvent::Quit,
                cues: Vec::new(),
            },
            (_, MenuInput::Escape) => {
                self.screen = Screen::MainMenu;
                MenuResponse::ignored()
            }
            (Screen::MainMenu, MenuInput::ChooseItem(item)) => {
                self.screen = match item {
                    MainMenuItem::Play => Screen::DifficultySelect,
                    MainMenuItem::Stats => Screen::Stats,
                    MainMenuItem::Settings => Screen::Settings,
                };
                MenuResponse::click()
            }
            (Screen::DifficultySelect, MenuInput::ChooseDifficulty(difficulty)) => {
                self.screen = Screen::LevelSelect(LevelId::first(difficulty));
                MenuResponse::click()
            }
            (Screen::LevelSelect(id), MenuInput::PreviousLevel) => {
                self.screen = Screen::LevelSelect(id.previous());
                MenuResponse::click()
            }
            (Screen::LevelSelect(id), MenuInput::NextLevel) => {
                self.screen = Screen::LevelSelect(id.next());
                MenuResponse::click()
            }
            (Screen::LevelSelect(id), MenuInput::Confirm) => {
                debug!(level = %id, "starting level");
                self.screen = Screen::Playing(id);
                self.menu_music_playing = false;
                MenuResponse {
                    event: MenuEvent::StartLevel(id),
                    cues: vec![SoundCue::Click, SoundCue::GameMusic],
                }
            }
            (Screen::Settings, MenuInput::Settings(change)) => {
                match change {
                    SettingsInput::Previous(slot) => self.skin.previous(slot),
                    SettingsInput::Next(slot) => self.skin.next(slot),
                    SettingsInput::Reset => self.skin.reset(),
                }
                MenuResponse::click()
            }
            _ => MenuResponse::ignored(),
        }
    }
}
