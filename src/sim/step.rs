/// The step function: applies one user action to the session.
///
/// Every mutation of story state goes through here. One call handles
/// exactly one discrete input; it finishes before the next is read.
///
/// Processing order:
///   1. Apply the action (view / registry / puzzle / cursor)
///   2. Collect events
///   3. Update the status line from the events
///
/// Guards the screens draw as disabled buttons (pad locked
/// when solved, interact locked at max friendship, reward hidden until
/// solved) are enforced here too, so every input path behaves the same.

use tracing::{debug, info, warn};

use crate::domain::character::{CharacterId, FriendshipOutcome};
use crate::domain::puzzle::{SubmitOutcome, PAD_DIGITS};
use crate::domain::view::View;
use super::event::SessionEvent;
use super::world::{SessionState, REWARD_CHARACTER};

/// One discrete user intent, already decoded from keyboard or gamepad.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    SetView(View),
    IncreaseFriendship(CharacterId),
    Submit(u8),
    ResetPuzzle,
    ClaimReward,
    GalleryPrev,
    GalleryNext,
    GalleryInteract,
    PadPrev,
    PadNext,
    PadPress,
    Quit,
}

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(state: &mut SessionState, action: Action) -> Vec<SessionEvent> {
    let mut events: Vec<SessionEvent> = Vec::new();
    apply(state, action, &mut events);
    update_message(state, &events);
    events
}

fn apply(state: &mut SessionState, action: Action, events: &mut Vec<SessionEvent>) {
    match action {
        Action::SetView(target) => set_view(state, target, events),
        Action::IncreaseFriendship(id) => increase_friendship(state, id, events),
        Action::Submit(value) => submit(state, value, events),
        Action::ResetPuzzle => reset_puzzle(state, events),
        Action::ClaimReward => claim_reward(state, events),
        Action::GalleryPrev => move_gallery_cursor(state, -1, events),
        Action::GalleryNext => move_gallery_cursor(state, 1, events),
        Action::GalleryInteract => gallery_interact(state, events),
        Action::PadPrev => move_pad_cursor(state, -1, events),
        Action::PadNext => move_pad_cursor(state, 1, events),
        Action::PadPress => {
            let digit = state.focused_digit();
            submit(state, digit, events);
        }
        Action::Quit => {
            state.should_quit = true;
            events.push(SessionEvent::QuitRequested);
        }
    }
}

// ══════════════════════════════════════════════════════════════
// View
// ══════════════════════════════════════════════════════════════

fn set_view(state: &mut SessionState, target: View, events: &mut Vec<SessionEvent>) {
    let from = state.view;
    state.view = target;
    if from != target {
        debug!(from = from.name(), to = target.name(), "view changed");
        events.push(SessionEvent::ViewChanged { from, to: target });
    }
}

// ══════════════════════════════════════════════════════════════
// Friendship
// ══════════════════════════════════════════════════════════════

fn increase_friendship(state: &mut SessionState, id: CharacterId, events: &mut Vec<SessionEvent>) {
    match state.characters.increase_friendship(id) {
        FriendshipOutcome::Raised { from, to } => {
            info!(character = id.0, from, to, "friendship raised");
            events.push(SessionEvent::FriendshipRaised { id, from, to });
        }
        FriendshipOutcome::AtCeiling => {
            debug!(character = id.0, "friendship already at max");
            events.push(SessionEvent::FriendshipMaxed { id });
        }
        FriendshipOutcome::UnknownCharacter => {
            warn!(character = id.0, "friendship increase for unknown character ignored");
            events.push(SessionEvent::UnknownCharacter { id });
        }
    }
}

fn gallery_interact(state: &mut SessionState, events: &mut Vec<SessionEvent>) {
    let Some(id) = state.focused_character() else {
        return;
    };
    let maxed = state.characters.get(id).is_some_and(|c| c.is_max_friendship());
    if maxed {
        events.push(SessionEvent::FriendshipMaxed { id });
        return;
    }
    apply(state, Action::IncreaseFriendship(id), events);
}

fn claim_reward(state: &mut SessionState, events: &mut Vec<SessionEvent>) {
    if !state.puzzle.completed() {
        debug!("reward claim ignored: puzzle not solved");
        return;
    }
    events.push(SessionEvent::RewardClaimed { id: REWARD_CHARACTER });
    increase_friendship(state, REWARD_CHARACTER, events);
}

// ══════════════════════════════════════════════════════════════
// Puzzle
// ══════════════════════════════════════════════════════════════

fn submit(state: &mut SessionState, value: u8, events: &mut Vec<SessionEvent>) {
    let outcome = state.puzzle.submit(value);
    if outcome.was_appended() {
        events.push(SessionEvent::DigitAccepted { value });
    }
    match outcome {
        SubmitOutcome::Accepted => {}
        SubmitOutcome::Solved => {
            info!(input = ?state.puzzle.input(), "puzzle solved");
            events.push(SessionEvent::PuzzleSolved);
        }
        SubmitOutcome::Mismatch => {
            info!(input = ?state.puzzle.input(), "puzzle answer does not match");
            events.push(SessionEvent::PuzzleMismatch);
        }
        SubmitOutcome::BufferFull | SubmitOutcome::AlreadySolved => {
            debug!(value, ?outcome, "puzzle input rejected");
            events.push(SessionEvent::InputRejected { value });
        }
    }
}

fn reset_puzzle(state: &mut SessionState, events: &mut Vec<SessionEvent>) {
    state.puzzle.reset();
    debug!("puzzle reset");
    events.push(SessionEvent::PuzzleReset);
}

// ══════════════════════════════════════════════════════════════
// Cursors (wrap around)
// ══════════════════════════════════════════════════════════════

fn wrap(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 { return 0; }
    (cursor as isize + delta).rem_euclid(len as isize) as usize
}

fn move_gallery_cursor(state: &mut SessionState, delta: isize, events: &mut Vec<SessionEvent>) {
    let len = state.characters.len();
    let next = wrap(state.gallery_cursor, delta, len);
    if next != state.gallery_cursor {
        state.gallery_cursor = next;
        events.push(SessionEvent::CursorMoved);
    }
}

fn move_pad_cursor(state: &mut SessionState, delta: isize, events: &mut Vec<SessionEvent>) {
    if state.puzzle.completed() { return; }
    let next = wrap(state.pad_cursor, delta, PAD_DIGITS.len());
    if next != state.pad_cursor {
        state.pad_cursor = next;
        events.push(SessionEvent::CursorMoved);
    }
}

// ══════════════════════════════════════════════════════════════
// Status line
// ══════════════════════════════════════════════════════════════

fn update_message(state: &mut SessionState, events: &[SessionEvent]) {
    for event in events {
        match event {
            SessionEvent::ViewChanged { .. } => state.clear_message(),
            SessionEvent::FriendshipRaised { id, to, .. } => {
                let name = state.characters.get(*id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                state.set_message(&format!("{}: дружба {}%", name, to));
            }
            SessionEvent::FriendshipMaxed { id } => {
                let name = state.characters.get(*id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                state.set_message(&format!("{}: дружба уже максимальная", name));
            }
            SessionEvent::PuzzleMismatch => {
                state.set_message("Неверный код. Нажмите R для сброса");
            }
            SessionEvent::PuzzleReset => state.clear_message(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::character::CharacterRegistry;

    fn friendship(state: &SessionState, id: u32) -> u8 {
        state.characters.get(CharacterId(id)).map(|c| c.friendship()).unwrap()
    }

    fn run(state: &mut SessionState, actions: &[Action]) -> Vec<SessionEvent> {
        actions.iter().flat_map(|&a| step(state, a)).collect()
    }

    // ── View ──

    #[test]
    fn view_switch_leaves_puzzle_untouched() {
        let mut s = SessionState::new();
        run(&mut s, &[Action::SetView(View::Puzzle), Action::Submit(1), Action::Submit(2)]);
        let puzzle_before = s.puzzle.clone();

        run(&mut s, &[Action::SetView(View::Home)]);
        assert_eq!(s.view, View::Home);
        assert_eq!(s.puzzle, puzzle_before);
    }

    #[test]
    fn view_puzzle_then_home() {
        let mut s = SessionState::new();
        let ev = run(&mut s, &[Action::SetView(View::Puzzle), Action::SetView(View::Home)]);
        assert_eq!(s.view, View::Home);
        assert_eq!(ev, vec![
            SessionEvent::ViewChanged { from: View::Home, to: View::Puzzle },
            SessionEvent::ViewChanged { from: View::Puzzle, to: View::Home },
        ]);
        assert!(s.puzzle.input().is_empty());
    }

    #[test]
    fn same_view_emits_nothing() {
        let mut s = SessionState::new();
        assert!(step(&mut s, Action::SetView(View::Home)).is_empty());
    }

    // ── Friendship ──

    #[test]
    fn increase_unknown_id_is_silent_noop() {
        let mut s = SessionState::new();
        let before: Vec<u8> = s.characters.iter().map(|c| c.friendship()).collect();
        let ev = step(&mut s, Action::IncreaseFriendship(CharacterId(99)));
        assert_eq!(ev, vec![SessionEvent::UnknownCharacter { id: CharacterId(99) }]);
        let after: Vec<u8> = s.characters.iter().map(|c| c.friendship()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn gallery_interact_raises_focused_card() {
        let mut s = SessionState::new();
        run(&mut s, &[Action::SetView(View::Gallery), Action::GalleryNext, Action::GalleryInteract]);
        assert_eq!(friendship(&s, 2), 70);
        assert_eq!(friendship(&s, 1), 75);
        assert_eq!(s.message, "Киберкот: дружба 70%");
    }

    #[test]
    fn gallery_interact_locked_at_max() {
        let mut s = SessionState::new();
        // Зара: 75 → 85 → 95 → 100
        run(&mut s, &[Action::GalleryInteract; 3]);
        assert_eq!(friendship(&s, 1), 100);
        let ev = step(&mut s, Action::GalleryInteract);
        assert_eq!(ev, vec![SessionEvent::FriendshipMaxed { id: CharacterId(1) }]);
        assert_eq!(friendship(&s, 1), 100);
    }

    #[test]
    fn gallery_interact_on_empty_roster_is_noop() {
        let mut s = SessionState::new();
        s.characters = CharacterRegistry::new(vec![]);
        assert_eq!(s.focused_character(), None);
        assert!(step(&mut s, Action::GalleryInteract).is_empty());
        assert!(step(&mut s, Action::GalleryNext).is_empty());
        assert!(s.characters.is_empty());
    }

    #[test]
    fn gallery_cursor_wraps() {
        let mut s = SessionState::new();
        step(&mut s, Action::GalleryPrev);
        assert_eq!(s.gallery_cursor, 2);
        step(&mut s, Action::GalleryNext);
        assert_eq!(s.gallery_cursor, 0);
        assert_eq!(s.focused_character(), Some(CharacterId(1)));
    }

    // ── Puzzle ──

    #[test]
    fn solving_emits_events_in_order() {
        let mut s = SessionState::new();
        let ev = run(&mut s, &[
            Action::Submit(1), Action::Submit(2), Action::Submit(3), Action::Submit(4),
        ]);
        assert_eq!(ev.last(), Some(&SessionEvent::PuzzleSolved));
        assert_eq!(
            ev.iter().filter(|e| matches!(e, SessionEvent::DigitAccepted { .. })).count(),
            4
        );
        assert!(s.puzzle.completed());
    }

    #[test]
    fn wrong_answer_then_more_input_is_rejected() {
        let mut s = SessionState::new();
        let ev = run(&mut s, &[
            Action::Submit(1), Action::Submit(2), Action::Submit(3), Action::Submit(5),
        ]);
        assert!(ev.contains(&SessionEvent::PuzzleMismatch));
        assert!(!s.puzzle.completed());
        assert_eq!(s.puzzle.input(), &[1u8, 2, 3, 5]);

        let ev = step(&mut s, Action::Submit(4));
        assert_eq!(ev, vec![SessionEvent::InputRejected { value: 4 }]);
        assert_eq!(s.puzzle.input().len(), 4);
    }

    #[test]
    fn pad_press_submits_focused_digit() {
        let mut s = SessionState::new();
        run(&mut s, &[Action::PadNext, Action::PadNext, Action::PadPress]);
        assert_eq!(s.puzzle.input(), &[3u8]);
        run(&mut s, &[Action::PadPrev, Action::PadPrev, Action::PadPrev, Action::PadPress]);
        assert_eq!(s.puzzle.input(), &[3u8, 4]);
    }

    #[test]
    fn reset_restores_active_state() {
        let mut s = SessionState::new();
        run(&mut s, &[
            Action::Submit(1), Action::Submit(2), Action::Submit(3), Action::Submit(4),
            Action::ResetPuzzle,
        ]);
        assert!(s.puzzle.input().is_empty());
        assert!(!s.puzzle.completed());
        assert_eq!(s.puzzle.sequence(), &[1u8, 2, 3, 4]);
    }

    // ── Reward ──

    #[test]
    fn reward_requires_solved_puzzle() {
        let mut s = SessionState::new();
        let ev = step(&mut s, Action::ClaimReward);
        assert!(ev.is_empty());
        assert_eq!(friendship(&s, 1), 75);
    }

    #[test]
    fn reward_raises_first_character() {
        let mut s = SessionState::new();
        run(&mut s, &[
            Action::SetView(View::Puzzle),
            Action::Submit(1), Action::Submit(2), Action::Submit(3), Action::Submit(4),
        ]);
        let ev = step(&mut s, Action::ClaimReward);
        assert_eq!(ev, vec![
            SessionEvent::RewardClaimed { id: REWARD_CHARACTER },
            SessionEvent::FriendshipRaised { id: REWARD_CHARACTER, from: 75, to: 85 },
        ]);
        assert_eq!(friendship(&s, 1), 85);
        assert_eq!(friendship(&s, 2), 60);
    }

    #[test]
    fn reward_is_repeatable_but_capped() {
        let mut s = SessionState::new();
        run(&mut s, &[Action::Submit(1), Action::Submit(2), Action::Submit(3), Action::Submit(4)]);
        run(&mut s, &[Action::ClaimReward; 10]);
        assert_eq!(friendship(&s, 1), 100);
    }

    #[test]
    fn quit_sets_flag() {
        let mut s = SessionState::new();
        assert_eq!(step(&mut s, Action::Quit), vec![SessionEvent::QuitRequested]);
        assert!(s.should_quit);
    }
}
