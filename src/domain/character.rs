/// Characters and the friendship registry.
///
/// The registry is an ordered roster keyed by `CharacterId`. Roster order
/// is the gallery order; ids are only used for lookup.
///
/// Friendship is the only mutable field. It moves in one direction, in
/// fixed steps, and never passes `FRIENDSHIP_MAX`.

use std::fmt;

pub const FRIENDSHIP_MAX: u8 = 100;
pub const FRIENDSHIP_STEP: u8 = 10;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub description: String,
    /// Display glyph. May be a multi-codepoint emoji (ZWJ sequence).
    pub avatar: String,
    pub traits: Vec<String>,
    friendship: u8,
}

impl Character {
    pub fn new(
        id: CharacterId,
        name: &str,
        description: &str,
        avatar: &str,
        traits: &[&str],
        friendship: u8,
    ) -> Self {
        Character {
            id,
            name: name.to_string(),
            description: description.to_string(),
            avatar: avatar.to_string(),
            traits: traits.iter().map(|t| t.to_string()).collect(),
            friendship: friendship.min(FRIENDSHIP_MAX),
        }
    }

    pub fn friendship(&self) -> u8 {
        self.friendship
    }

    pub fn is_max_friendship(&self) -> bool {
        self.friendship >= FRIENDSHIP_MAX
    }
}

/// Result of `increase_friendship`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FriendshipOutcome {
    Raised { from: u8, to: u8 },
    /// Already at the ceiling; nothing changed.
    AtCeiling,
    /// No character with that id; nothing changed.
    UnknownCharacter,
}

#[derive(Clone, Debug, Default)]
pub struct CharacterRegistry {
    roster: Vec<Character>,
}

impl CharacterRegistry {
    pub fn new(roster: Vec<Character>) -> Self {
        CharacterRegistry { roster }
    }

    /// The fixed cast every session starts with.
    pub fn seeded() -> Self {
        CharacterRegistry::new(vec![
            Character::new(
                CharacterId(1),
                "Зара",
                "Хакер и исследователь виртуальных миров",
                "🦾",
                &["Смелая", "Умная", "Загадочная"],
                75,
            ),
            Character::new(
                CharacterId(2),
                "Киберкот",
                "ИИ-компаньон с кошачьими повадками",
                "🐱",
                &["Игривый", "Хитрый", "Верный"],
                60,
            ),
            Character::new(
                CharacterId(3),
                "Нео",
                "Программист-rebel против системы",
                "👨\u{200d}💻",
                &["Серьезный", "Принципиальный", "Мудрый"],
                40,
            ),
        ])
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.roster.iter().find(|c| c.id == id)
    }

    /// Character at a roster position (gallery order).
    pub fn at(&self, index: usize) -> Option<&Character> {
        self.roster.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.roster.iter()
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Raise friendship by one step, clamped to `FRIENDSHIP_MAX`.
    /// Unknown ids leave the registry untouched.
    pub fn increase_friendship(&mut self, id: CharacterId) -> FriendshipOutcome {
        let Some(ch) = self.roster.iter_mut().find(|c| c.id == id) else {
            return FriendshipOutcome::UnknownCharacter;
        };
        if ch.friendship >= FRIENDSHIP_MAX {
            return FriendshipOutcome::AtCeiling;
        }
        let from = ch.friendship;
        ch.friendship = from.saturating_add(FRIENDSHIP_STEP).min(FRIENDSHIP_MAX);
        FriendshipOutcome::Raised { from, to: ch.friendship }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(friendship: u8) -> CharacterRegistry {
        CharacterRegistry::new(vec![Character::new(
            CharacterId(1), "A", "a", "@", &["x"], friendship,
        )])
    }

    fn friendship_of(reg: &CharacterRegistry, id: u32) -> u8 {
        reg.get(CharacterId(id)).map(|c| c.friendship()).unwrap()
    }

    #[test]
    fn seeded_roster_order_and_values() {
        let reg = CharacterRegistry::seeded();
        let ids: Vec<u32> = reg.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(friendship_of(&reg, 1), 75);
        assert_eq!(friendship_of(&reg, 2), 60);
        assert_eq!(friendship_of(&reg, 3), 40);
        assert_eq!(reg.at(0).map(|c| c.name.as_str()), Some("Зара"));
        assert_eq!(reg.at(2).map(|c| c.traits.len()), Some(3));
    }

    #[test]
    fn increase_adds_one_step() {
        let mut reg = single(40);
        assert_eq!(
            reg.increase_friendship(CharacterId(1)),
            FriendshipOutcome::Raised { from: 40, to: 50 }
        );
        assert_eq!(friendship_of(&reg, 1), 50);
    }

    #[test]
    fn increase_clamps_at_max() {
        let mut reg = single(95);
        assert_eq!(
            reg.increase_friendship(CharacterId(1)),
            FriendshipOutcome::Raised { from: 95, to: 100 }
        );
        assert_eq!(friendship_of(&reg, 1), 100);
    }

    #[test]
    fn increase_is_idempotent_at_ceiling() {
        let mut reg = single(100);
        for _ in 0..3 {
            assert_eq!(reg.increase_friendship(CharacterId(1)), FriendshipOutcome::AtCeiling);
        }
        assert_eq!(friendship_of(&reg, 1), 100);
    }

    #[test]
    fn unknown_id_leaves_state_unchanged() {
        let mut reg = CharacterRegistry::seeded();
        let before: Vec<u8> = reg.iter().map(|c| c.friendship()).collect();
        assert_eq!(
            reg.increase_friendship(CharacterId(42)),
            FriendshipOutcome::UnknownCharacter
        );
        let after: Vec<u8> = reg.iter().map(|c| c.friendship()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn friendship_is_monotonic_and_bounded() {
        let mut reg = CharacterRegistry::seeded();
        for _ in 0..20 {
            for id in 1..=3 {
                let prev = friendship_of(&reg, id);
                reg.increase_friendship(CharacterId(id));
                let now = friendship_of(&reg, id);
                assert!(now >= prev);
                assert!(now <= FRIENDSHIP_MAX);
            }
        }
        assert!(reg.iter().all(|c| c.is_max_friendship()));
    }

    #[test]
    fn constructor_clamps_seed_value() {
        let reg = single(250);
        assert_eq!(friendship_of(&reg, 1), FRIENDSHIP_MAX);
    }
}
