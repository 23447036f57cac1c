/// Symbolic icon names → terminal glyphs.
///
/// All glyphs are single-column so they can sit inside button labels
/// without shifting the layout.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Icon {
    Play,
    Users,
    ArrowLeft,
    Heart,
    CheckCircle,
    RotateCcw,
    Gift,
}

impl Icon {
    #[cfg(test)]
    pub const ALL: [Icon; 7] = [
        Icon::Play,
        Icon::Users,
        Icon::ArrowLeft,
        Icon::Heart,
        Icon::CheckCircle,
        Icon::RotateCcw,
        Icon::Gift,
    ];

    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Play => "▶",
            Icon::Users => "☻",
            Icon::ArrowLeft => "←",
            Icon::Heart => "♥",
            Icon::CheckCircle => "✔",
            Icon::RotateCcw => "↺",
            Icon::Gift => "✚",
        }
    }

    /// `"<glyph> <label>"`, the way buttons are drawn.
    pub fn label(self, text: &str) -> String {
        format!("{} {}", self.glyph(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_is_one_char() {
        for icon in Icon::ALL {
            assert_eq!(icon.glyph().chars().count(), 1, "{icon:?}");
        }
    }

    #[test]
    fn label_prefixes_glyph() {
        assert_eq!(Icon::Heart.label("Взаимодействовать"), "♥ Взаимодействовать");
    }
}
