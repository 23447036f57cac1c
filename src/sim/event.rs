/// Events emitted by a session step.
/// The presentation layer consumes these for sound and logging.

use crate::domain::character::CharacterId;
use crate::domain::view::View;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    ViewChanged { from: View, to: View },
    FriendshipRaised { id: CharacterId, from: u8, to: u8 },
    FriendshipMaxed { id: CharacterId },
    UnknownCharacter { id: CharacterId },
    DigitAccepted { value: u8 },
    PuzzleSolved,
    PuzzleMismatch,
    InputRejected { value: u8 },
    PuzzleReset,
    RewardClaimed { id: CharacterId },
    CursorMoved,
    QuitRequested,
}
