/// SessionState: everything one run of the novel knows about.
///
/// ## Ownership
///
/// The main loop owns the only `SessionState` and lends it `&mut` to
/// `step::step()` for each action, then `&` to the renderer. Nothing else
/// holds a reference between frames.
///
/// ## Layers
///
///   - story state: `view`, `characters`, `puzzle`
///   - UI state:    gallery/pad cursors and the status line
///
/// Story state only changes through `step()`. UI state is cosmetic and
/// never feeds back into story state except through the cursor actions.

use crate::domain::character::{CharacterId, CharacterRegistry};
use crate::domain::puzzle::{SequencePuzzle, PAD_DIGITS};
use crate::domain::view::View;

/// The character the puzzle reward goes to.
pub const REWARD_CHARACTER: CharacterId = CharacterId(1);

pub struct SessionState {
    // ── Story ──
    pub view: View,
    pub characters: CharacterRegistry,
    pub puzzle: SequencePuzzle,

    // ── Gallery ──
    /// Roster index of the focused card.
    pub gallery_cursor: usize,

    // ── Puzzle pad ──
    /// Index into `PAD_DIGITS` of the focused button.
    pub pad_cursor: usize,

    // ── UI ──
    pub message: String,
    pub should_quit: bool,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState {
            view: View::Home,
            characters: CharacterRegistry::seeded(),
            puzzle: SequencePuzzle::default(),
            gallery_cursor: 0,
            pad_cursor: 0,
            message: String::new(),
            should_quit: false,
        }
    }

    pub fn set_message(&mut self, msg: &str) {
        self.message = msg.to_string();
    }

    pub fn clear_message(&mut self) {
        self.message.clear();
    }

    /// Id of the focused gallery card, if the roster is non-empty.
    pub fn focused_character(&self) -> Option<CharacterId> {
        self.characters.at(self.gallery_cursor).map(|c| c.id)
    }

    pub fn focused_digit(&self) -> u8 {
        PAD_DIGITS[self.pad_cursor.min(PAD_DIGITS.len() - 1)]
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new()
    }
}
