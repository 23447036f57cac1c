/// Screens. Exactly one is active; there is no history stack.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum View {
    #[default]
    Home,
    Gallery,
    Puzzle,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Gallery => "gallery",
            View::Puzzle => "puzzle",
        }
    }
}
