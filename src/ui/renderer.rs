/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Each screen is a pure function of `SessionState`: nothing here
/// mutates story state.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::character::{Character, FRIENDSHIP_STEP};
use crate::domain::puzzle::PAD_DIGITS;
use crate::domain::view::View;
use crate::sim::world::SessionState;
use crate::ui::icons::Icon;

// ── Palette ──

const BASE_BG: Color = Color::Rgb { r: 18, g: 14, b: 32 };
const LIGHT: Color = Color::Rgb { r: 230, g: 225, b: 245 };
const LIGHT_DIM: Color = Color::Rgb { r: 160, g: 150, b: 185 };
const PURPLE: Color = Color::Rgb { r: 110, g: 60, b: 170 };
const PINK: Color = Color::Rgb { r: 240, g: 60, b: 150 };
const EMERALD: Color = Color::Rgb { r: 40, g: 200, b: 130 };
const DISABLED: Color = Color::Rgb { r: 70, g: 65, b: 85 };
const BADGE_BG: Color = Color::Rgb { r: 50, g: 32, b: 78 };
const STATUS_BG: Color = Color::Rgb { r: 200, g: 60, b: 140 };

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: [u8; 16],  // up to 16 bytes (supports ZWJ emoji sequences)
    ch_len: u8,
    fg: Color,
    bg: Color,
    wide: bool,    // true = this char occupies 2 terminal columns
    cont: bool,    // true = continuation of previous wide char (skip render)
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: [b' ', 0,0,0, 0,0,0,0, 0,0,0,0, 0,0,0,0],
        ch_len: 1,
        fg: LIGHT,
        bg: BASE_BG,
        wide: false,
        cont: false,
    };

    const WIDE_CONT: Cell = Cell {
        ch: [0; 16],
        ch_len: 0,
        fg: LIGHT,
        bg: BASE_BG,
        wide: false,
        cont: true,
    };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell {
        ch: [b'?', 0,0,0, 0,0,0,0, 0,0,0,0, 0,0,0,0],
        ch_len: 1,
        fg: Color::Magenta,
        bg: Color::Magenta,
        wide: false,
        cont: false,
    };

    /// Normalize bg: Color::Reset → BASE_BG so that every cell gets an
    /// explicit background color (never terminal-default).
    #[inline]
    fn norm_bg(bg: Color) -> Color {
        match bg {
            Color::Reset => BASE_BG,
            other => other,
        }
    }

    fn from_char(c: char, fg: Color, bg: Color) -> Self {
        let mut cell = Self::BLANK;
        let len = c.encode_utf8(&mut cell.ch).len() as u8;
        cell.ch_len = len;
        cell.fg = fg;
        cell.bg = Self::norm_bg(bg);
        cell
    }

    /// Create a wide cell from a multi-codepoint string (e.g. ZWJ emoji).
    /// Truncates on a char boundary if the glyph exceeds 16 bytes.
    fn from_str_wide(s: &str, fg: Color, bg: Color) -> Self {
        let mut cell = Self::BLANK;
        let mut len = 0;
        for ch in s.chars() {
            let n = ch.len_utf8();
            if len + n > cell.ch.len() { break; }
            ch.encode_utf8(&mut cell.ch[len..len + n]);
            len += n;
        }
        cell.ch_len = len as u8;
        cell.fg = fg;
        cell.bg = Self::norm_bg(bg);
        cell.wide = true;
        cell
    }

    fn as_str(&self) -> &str {
        std::str::from_utf8(&self.ch[..self.ch_len as usize]).unwrap_or("?")
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    /// Returns the column after the last char written.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) -> usize {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width { break; }
            self.set(cx, y, Cell::from_char(ch, fg, bg));
            cx += 1;
        }
        cx
    }

    /// Write a 2-column glyph at (x, y).
    fn put_wide(&mut self, x: usize, y: usize, glyph: &str, fg: Color, bg: Color) {
        if x + 1 >= self.width { return; }
        self.set(x, y, Cell::from_str_wide(glyph, fg, bg));
        let mut cont = Cell::WIDE_CONT;
        cont.bg = Cell::norm_bg(bg);
        self.set(x + 1, y, cont);
    }

    fn fill_row(&mut self, x: usize, y: usize, w: usize, bg: Color) {
        for cx in x..(x + w).min(self.width) {
            self.set(cx, y, Cell::from_char(' ', LIGHT, bg));
        }
    }

    fn draw_box(&mut self, x: usize, y: usize, w: usize, h: usize, fg: Color) {
        if w < 2 || h < 2 { return; }
        let right = x + w - 1;
        let bottom = y + h - 1;
        for cx in x + 1..right {
            self.set(cx, y, Cell::from_char('─', fg, Color::Reset));
            self.set(cx, bottom, Cell::from_char('─', fg, Color::Reset));
        }
        for cy in y + 1..bottom {
            self.set(x, cy, Cell::from_char('│', fg, Color::Reset));
            self.set(right, cy, Cell::from_char('│', fg, Color::Reset));
        }
        self.set(x, y, Cell::from_char('╭', fg, Color::Reset));
        self.set(right, y, Cell::from_char('╮', fg, Color::Reset));
        self.set(x, bottom, Cell::from_char('╰', fg, Color::Reset));
        self.set(right, bottom, Cell::from_char('╯', fg, Color::Reset));
    }
}

// ── Layout helpers (pure) ──

/// Greedy word wrap by char count. Words longer than `width` are split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 { return vec![]; }
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let wlen = word.len();
        if wlen == 0 { continue; }
        let need = if line_len == 0 { wlen } else { line_len + 1 + wlen };
        if need > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word);
        line_len += wlen;
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// `█` for the filled share of `width`, `░` for the rest.
fn progress_bar(value: u8, width: usize) -> String {
    let filled = (value.min(100) as usize * width + 50) / 100;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}

/// Pack trait badges (` label `, one space apart) into rows of `width`.
fn layout_badges(traits: &[String], width: usize) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut used = 0;
    for t in traits {
        let badge = format!(" {} ", t);
        let len = badge.chars().count();
        let need = if row.is_empty() { len } else { used + 1 + len };
        if need > width && !row.is_empty() {
            rows.push(std::mem::take(&mut row));
            used = 0;
        }
        used = if row.is_empty() { len } else { used + 1 + len };
        row.push(badge);
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// How many gallery cards fit side by side.
fn card_columns(term_w: usize, cards: usize) -> usize {
    const MIN_CARD_W: usize = 28;
    const GAP: usize = 2;
    if cards == 0 { return 1; }
    let fit = (term_w.saturating_sub(4) + GAP) / (MIN_CARD_W + GAP);
    fit.clamp(1, cards)
}

fn join_digits(digits: &[u8]) -> String {
    digits.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(" → ")
}

fn centered(total: usize, len: usize) -> usize {
    total.saturating_sub(len) / 2
}

// ── Renderer ──

const HEADER_ROW: usize = 1;
const CONTENT_ROW: usize = 4;
const CARD_DESC_LINES: usize = 3;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_view: Option<View>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_view: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        self.invalidate();

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Force a full repaint on the next frame.
    pub fn invalidate(&mut self) {
        self.back.cells.fill(Cell::INVALID);
    }

    pub fn render(&mut self, state: &SessionState, pad_connected: bool) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.invalidate();
            queue!(self.writer, SetBackgroundColor(BASE_BG), Clear(ClearType::All))?;
        }

        // View change → clear for clean transition
        if self.last_view != Some(state.view) {
            self.invalidate();
            queue!(self.writer, SetBackgroundColor(BASE_BG), Clear(ClearType::All))?;
            self.last_view = Some(state.view);
        }

        self.front.clear();

        match state.view {
            View::Home => self.compose_home(),
            View::Gallery => self.compose_gallery(state),
            View::Puzzle => self.compose_puzzle(state),
        }
        self.compose_status(state);
        self.compose_help(state.view, pad_connected);

        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = LIGHT;
        let mut last_bg = BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer,
            SetForegroundColor(LIGHT),
            SetBackgroundColor(BASE_BG),
        )?;

        for y in 0..self.front.height {
            let mut x = 0;
            while x < self.front.width {
                let cell = self.front.get(x, y);
                let prev = self.back.get(x, y);

                // Skip continuation cells (right half of wide emoji)
                if cell.cont {
                    if cell != prev { need_move = true; }
                    x += 1;
                    continue;
                }

                // For wide cells, also check if the continuation changed
                let cont_changed = cell.wide
                    && x + 1 < self.front.width
                    && self.front.get(x + 1, y) != self.back.get(x + 1, y);

                if cell == prev && !cont_changed {
                    need_move = true;
                    x += 1;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.as_str()))?;

                if cell.wide {
                    // Wide char printed: cursor advanced 2 columns
                    last_x = x + 1;
                    x += 2;
                    // Terminals disagree on ZWJ widths; re-sync the cursor.
                    need_move = true;
                } else {
                    last_x = x;
                    x += 1;
                }
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_home(&mut self) {
        let w = self.front.width;
        let top = self.front.height.saturating_sub(12) / 2;

        let title = "ViRuS";
        let tx = centered(w, title.chars().count() + 1);
        let after = self.front.put_str(tx, top, title, LIGHT, Color::Reset);
        self.front.put_str(after, top, "_", PINK, Color::Reset);

        let subtitle = "Интерактивная визуальная новелла";
        self.front.put_str(centered(w, subtitle.chars().count()), top + 2, subtitle, LIGHT_DIM, Color::Reset);

        let play = format!("  {}  [Enter]  ", Icon::Play.label("Играть"));
        let chars = format!("  {}  [C]  ", Icon::Users.label("Персонажи"));
        let play_len = play.chars().count();
        let chars_len = chars.chars().count();

        if w >= play_len + chars_len + 4 {
            let x0 = centered(w, play_len + chars_len + 4);
            self.front.put_str(x0, top + 5, &play, Color::White, PINK);
            self.front.put_str(x0 + play_len + 4, top + 5, &chars, LIGHT, BADGE_BG);
        } else {
            self.front.put_str(centered(w, play_len), top + 5, &play, Color::White, PINK);
            self.front.put_str(centered(w, chars_len), top + 7, &chars, LIGHT, BADGE_BG);
        }

        let quit = "Q  Выход";
        self.front.put_str(centered(w, quit.chars().count()), top + 10, quit, LIGHT_DIM, Color::Reset);
    }

    fn compose_header(&mut self, title: &str) {
        let back = Icon::ArrowLeft.label("Назад");
        let after = self.front.put_str(2, HEADER_ROW, &back, LIGHT_DIM, Color::Reset);
        self.front.put_str(after + 4, HEADER_ROW, title, LIGHT, Color::Reset);
    }

    fn compose_gallery(&mut self, state: &SessionState) {
        self.compose_header("Галерея персонажей");
        if state.characters.is_empty() { return; }

        let n = state.characters.len();
        let cols = card_columns(self.front.width, n);
        let gap = 2;
        let card_w = (self.front.width.saturating_sub(4 + gap * (cols - 1)) / cols).min(40);

        let mut row_y = CONTENT_ROW;
        let mut row_h = 0;
        for (i, ch) in state.characters.iter().enumerate() {
            let col = i % cols;
            if col == 0 && i > 0 {
                row_y += row_h + 1;
                row_h = 0;
            }
            let x = 2 + col * (card_w + gap);
            let focused = i == state.gallery_cursor;
            let h = self.compose_card(ch, x, row_y, card_w, focused);
            row_h = row_h.max(h);
        }
    }

    /// Draw one character card. Returns its height.
    fn compose_card(&mut self, ch: &Character, x: usize, y: usize, w: usize, focused: bool) -> usize {
        let inner_x = x + 2;
        let inner_w = w.saturating_sub(4);
        let mut cy = y + 1;

        // Avatar + name
        self.front.put_wide(x + centered(w, 2), cy, &ch.avatar, LIGHT, Color::Reset);
        cy += 2;
        let name_fg = if focused { PINK } else { LIGHT };
        self.front.put_str(x + centered(w, ch.name.chars().count()), cy, &ch.name, name_fg, Color::Reset);
        cy += 1;

        // Description (fixed height so cards line up)
        let desc = wrap_text(&ch.description, inner_w);
        for line in desc.iter().take(CARD_DESC_LINES) {
            self.front.put_str(x + centered(w, line.chars().count()), cy, line, LIGHT_DIM, Color::Reset);
            cy += 1;
        }
        cy += CARD_DESC_LINES.saturating_sub(desc.len()) + 1;

        // Friendship meter
        let pct = format!("{}%", ch.friendship());
        self.front.put_str(inner_x, cy, "Дружба", LIGHT_DIM, Color::Reset);
        self.front.put_str(inner_x + inner_w.saturating_sub(pct.chars().count()), cy, &pct, PINK, Color::Reset);
        cy += 1;
        self.front.put_str(inner_x, cy, &progress_bar(ch.friendship(), inner_w), PINK, Color::Reset);
        cy += 2;

        // Trait badges
        for badges in layout_badges(&ch.traits, inner_w) {
            let mut bx = inner_x;
            for badge in badges {
                bx = self.front.put_str(bx, cy, &badge, LIGHT, BADGE_BG) + 1;
            }
            cy += 1;
        }
        cy += 1;

        // Interact button (disabled at max)
        let label = Icon::Heart.label("Взаимодействовать");
        let (fg, bg) = if ch.is_max_friendship() {
            (LIGHT_DIM, DISABLED)
        } else if focused {
            (Color::White, EMERALD)
        } else {
            (LIGHT, Color::Rgb { r: 25, g: 90, b: 65 })
        };
        self.front.fill_row(inner_x, cy, inner_w, bg);
        self.front.put_str(inner_x + centered(inner_w, label.chars().count()), cy, &label, fg, bg);
        cy += 2;

        let h = cy - y;
        let border = if focused { PINK } else { PURPLE };
        self.front.draw_box(x, y, w, h, border);
        h
    }

    fn compose_puzzle(&mut self, state: &SessionState) {
        self.compose_header("Головоломка");

        let puzzle = &state.puzzle;
        let solved = puzzle.completed();
        let w = self.front.width.saturating_sub(4).min(64);
        let x = 2;
        let inner_x = x + 2;
        let mut cy = CONTENT_ROW + 1;

        self.front.put_str(inner_x, cy, "Взломай код последовательности", LIGHT, Color::Reset);
        cy += 1;
        let prompt = format!("Повтори последовательность: {}", join_digits(puzzle.sequence()));
        self.front.put_str(inner_x, cy, &prompt, LIGHT_DIM, Color::Reset);
        cy += 2;

        // Pad
        let btn_w = 7;
        for (i, digit) in PAD_DIGITS.iter().enumerate() {
            let bx = inner_x + i * (btn_w + 2);
            let bg = if solved {
                DISABLED
            } else if i == state.pad_cursor {
                PINK
            } else {
                PURPLE
            };
            let fg = if solved { LIGHT_DIM } else { Color::White };
            for r in 0..3 {
                self.front.fill_row(bx, cy + r, btn_w, bg);
            }
            self.front.put_str(bx + btn_w / 2, cy + 1, &digit.to_string(), fg, bg);
        }
        cy += 4;

        let input = join_digits(puzzle.input());
        let after = self.front.put_str(inner_x, cy, "Ваш ввод: ", LIGHT, Color::Reset);
        self.front.put_str(after, cy, &input, LIGHT, Color::Reset);
        cy += 2;

        if solved {
            let msg = format!(
                "{} Головоломка решена! +{} очков дружбы с Зарой",
                Icon::CheckCircle.glyph(), FRIENDSHIP_STEP,
            );
            self.front.put_str(inner_x, cy, &msg, EMERALD, Color::Reset);
        }
        cy += 2;

        let reset = format!(" {} [R] ", Icon::RotateCcw.label("Сброс"));
        let after = self.front.put_str(inner_x, cy, &reset, LIGHT, BADGE_BG);
        if solved {
            let reward = format!(" {} [G] ", Icon::Gift.label("Получить награду"));
            self.front.put_str(after + 2, cy, &reward, Color::White, EMERALD);
        }
        cy += 2;

        self.front.draw_box(x, CONTENT_ROW, w, cy - CONTENT_ROW, PURPLE);
    }

    fn compose_status(&mut self, state: &SessionState) {
        if state.message.is_empty() { return; }
        let row = self.front.height.saturating_sub(3);
        if row <= CONTENT_ROW { return; }
        let msg = format!(" ◈ {} ", state.message);
        self.front.fill_row(0, row, self.front.width, STATUS_BG);
        self.front.put_str(0, row, &msg, Color::White, STATUS_BG);
    }

    fn compose_help(&mut self, view: View, pad_connected: bool) {
        let row = self.front.height.saturating_sub(1);
        let help = match view {
            View::Home => " Enter/P: Играть   C: Персонажи   Q/Esc: Выход",
            View::Gallery => " ←→: Выбор   Enter/Space: Взаимодействовать   Esc: Назад",
            View::Puzzle => " 1-4: Ввод   ←→ Enter: Кнопки   R: Сброс   G: Награда   Esc: Назад",
        };
        let after = self.front.put_str(0, row, help, DISABLED, Color::Reset);
        if pad_connected {
            self.front.put_str(after + 3, row, "[pad]", LIGHT_DIM, Color::Reset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words() {
        let lines = wrap_text("Хакер и исследователь виртуальных миров", 17);
        assert_eq!(lines, vec!["Хакер и", "исследователь", "виртуальных миров"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 17));
    }

    #[test]
    fn wrap_splits_long_words() {
        let lines = wrap_text("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn wrap_edge_cases() {
        assert!(wrap_text("", 10).is_empty());
        assert!(wrap_text("abc", 0).is_empty());
        assert_eq!(wrap_text("one two", 7), vec!["one two"]);
    }

    #[test]
    fn progress_bar_proportions() {
        assert_eq!(progress_bar(0, 10), "░░░░░░░░░░");
        assert_eq!(progress_bar(100, 10), "██████████");
        assert_eq!(progress_bar(75, 4), "███░");
        assert_eq!(progress_bar(40, 10).chars().count(), 10);
    }

    #[test]
    fn badges_wrap_to_width() {
        let traits: Vec<String> = ["Серьезный", "Принципиальный", "Мудрый"]
            .iter().map(|s| s.to_string()).collect();
        let rows = layout_badges(&traits, 26);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![" Серьезный ".to_string()]);
        assert_eq!(rows[1], vec![" Принципиальный ".to_string(), " Мудрый ".to_string()]);

        let wide = layout_badges(&traits, 80);
        assert_eq!(wide.len(), 1);
    }

    #[test]
    fn card_columns_fit_terminal() {
        assert_eq!(card_columns(80, 3), 2);
        assert_eq!(card_columns(120, 3), 3);
        assert_eq!(card_columns(20, 3), 1);
        assert_eq!(card_columns(200, 3), 3);
    }

    #[test]
    fn digits_join_with_arrows() {
        assert_eq!(join_digits(&[1, 2, 3, 4]), "1 → 2 → 3 → 4");
        assert_eq!(join_digits(&[]), "");
    }

    #[test]
    fn wide_cell_keeps_zwj_sequence() {
        let cell = Cell::from_str_wide("👨\u{200d}💻", LIGHT, Color::Reset);
        assert_eq!(cell.as_str(), "👨\u{200d}💻");
        assert!(cell.wide);
        assert_eq!(cell.bg, BASE_BG);
    }

    #[test]
    fn frame_buffer_wide_glyph_marks_continuation() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_wide(1, 0, "🐱", LIGHT, Color::Reset);
        assert!(fb.get(1, 0).wide);
        assert!(fb.get(2, 0).cont);
        // No room at the right edge
        fb.put_wide(3, 0, "🐱", LIGHT, Color::Reset);
        assert_eq!(fb.get(3, 0).as_str(), " ");
    }
}
