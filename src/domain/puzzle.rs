/// Sequence puzzle: repeat a fixed code, one digit at a time.
///
/// ## State Machine
///
/// ┌────────┬─────────────────────────────┬───────────────────┐
/// │ State  │ Event                       │ Next              │
/// ├────────┼─────────────────────────────┼───────────────────┤
/// │ Active │ submit, buffer not full     │ Active / Solved   │
/// │ Active │ submit, buffer full (wrong) │ Active (rejected) │
/// │ Solved │ submit                      │ Solved (rejected) │
/// │ any    │ reset                       │ Active            │
/// └────────┴─────────────────────────────┴───────────────────┘
///
/// `completed()` is derived from `(input, sequence)` on every call.
/// There is no stored flag to drift out of sync.

pub const TARGET_SEQUENCE: [u8; 4] = [1, 2, 3, 4];

/// Digits offered on the input pad.
pub const PAD_DIGITS: [u8; 4] = [1, 2, 3, 4];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubmitOutcome {
    /// Appended; more digits needed.
    Accepted,
    /// Appended; the buffer now matches the sequence.
    Solved,
    /// Appended; the buffer is full but does not match.
    Mismatch,
    /// Buffer already holds a full-length wrong answer. Nothing appended.
    BufferFull,
    /// Puzzle is solved. Nothing appended until reset.
    AlreadySolved,
}

impl SubmitOutcome {
    pub fn was_appended(self) -> bool {
        matches!(self, SubmitOutcome::Accepted | SubmitOutcome::Solved | SubmitOutcome::Mismatch)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequencePuzzle {
    sequence: Vec<u8>,
    input: Vec<u8>,
}

impl SequencePuzzle {
    pub fn new(sequence: &[u8]) -> Self {
        SequencePuzzle {
            sequence: sequence.to_vec(),
            input: Vec::with_capacity(sequence.len()),
        }
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    /// True iff the input equals the sequence, element by element.
    pub fn completed(&self) -> bool {
        self.input == self.sequence
    }

    pub fn is_full(&self) -> bool {
        self.input.len() >= self.sequence.len()
    }

    pub fn submit(&mut self, value: u8) -> SubmitOutcome {
        if self.completed() {
            return SubmitOutcome::AlreadySolved;
        }
        if self.is_full() {
            return SubmitOutcome::BufferFull;
        }
        self.input.push(value);
        if self.completed() {
            SubmitOutcome::Solved
        } else if self.is_full() {
            SubmitOutcome::Mismatch
        } else {
            SubmitOutcome::Accepted
        }
    }

    pub fn reset(&mut self) {
        self.input.clear();
    }
}

impl Default for SequencePuzzle {
    fn default() -> Self {
        SequencePuzzle::new(&TARGET_SEQUENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(p: &mut SequencePuzzle, digits: &[u8]) -> Vec<SubmitOutcome> {
        digits.iter().map(|&d| p.submit(d)).collect()
    }

    #[test]
    fn correct_sequence_solves() {
        let mut p = SequencePuzzle::default();
        let out = feed(&mut p, &[1, 2, 3, 4]);
        assert_eq!(out, vec![
            SubmitOutcome::Accepted,
            SubmitOutcome::Accepted,
            SubmitOutcome::Accepted,
            SubmitOutcome::Solved,
        ]);
        assert!(p.completed());
        assert_eq!(p.input(), &[1u8, 2, 3, 4]);
    }

    #[test]
    fn wrong_last_digit_is_not_completed() {
        let mut p = SequencePuzzle::default();
        let out = feed(&mut p, &[1, 2, 3, 5]);
        assert_eq!(out[3], SubmitOutcome::Mismatch);
        assert!(!p.completed());
        assert_eq!(p.input(), &[1u8, 2, 3, 5]);
    }

    #[test]
    fn partial_prefix_is_not_completed() {
        let mut p = SequencePuzzle::default();
        feed(&mut p, &[1, 2, 3]);
        assert!(!p.completed());
    }

    #[test]
    fn input_never_exceeds_sequence_length() {
        let mut p = SequencePuzzle::default();
        feed(&mut p, &[4, 4, 4, 4]);
        assert_eq!(p.submit(1), SubmitOutcome::BufferFull);
        assert_eq!(p.submit(2), SubmitOutcome::BufferFull);
        assert_eq!(p.input().len(), p.sequence().len());
        assert_eq!(p.input(), &[4u8, 4, 4, 4]);
    }

    #[test]
    fn submit_rejected_once_solved() {
        let mut p = SequencePuzzle::default();
        feed(&mut p, &[1, 2, 3, 4]);
        assert_eq!(p.submit(1), SubmitOutcome::AlreadySolved);
        assert!(p.completed());
        assert_eq!(p.input().len(), 4);
    }

    #[test]
    fn reset_clears_input_keeps_sequence() {
        let mut p = SequencePuzzle::default();
        feed(&mut p, &[1, 2, 3, 4]);
        p.reset();
        assert!(p.input().is_empty());
        assert!(!p.completed());
        assert_eq!(p.sequence(), &TARGET_SEQUENCE);

        // Playable again after reset
        assert_eq!(p.submit(1), SubmitOutcome::Accepted);
    }

    #[test]
    fn reset_after_wrong_answer_allows_retry() {
        let mut p = SequencePuzzle::default();
        feed(&mut p, &[2, 1, 3, 4]);
        p.reset();
        let out = feed(&mut p, &[1, 2, 3, 4]);
        assert_eq!(out.last(), Some(&SubmitOutcome::Solved));
    }

    #[test]
    fn outcome_append_flag() {
        assert!(SubmitOutcome::Accepted.was_appended());
        assert!(SubmitOutcome::Mismatch.was_appended());
        assert!(!SubmitOutcome::BufferFull.was_appended());
        assert!(!SubmitOutcome::AlreadySolved.was_appended());
    }
}
