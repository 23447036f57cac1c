/// Gamepad input using gilrs.
///
/// Button mapping is loaded from config.toml via `load_button_config()`.
/// Default mapping:
///   D-pad / Left Stick    →  Navigate (cards, pad buttons)
///   A / Start             →  Confirm
///   B / Select            →  Back (Quit on the home screen)
///   X                     →  Reset puzzle
///   Y                     →  Claim reward
///
/// Without the `gamepad` feature this compiles to a tracker that never
/// reports a press.

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::view::View;
use crate::sim::step::Action;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.5;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,      // LeftTrigger
    R1,      // RightTrigger
    Start,
    Select,
}

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South     => Some(Btn::A),
            Button::East      => Some(Btn::B),
            Button::West      => Some(Btn::X),
            Button::North     => Some(Btn::Y),
            Button::LeftTrigger  => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start     => Some(Btn::Start),
            Button::Select    => Some(Btn::Select),
            _ => None,
        }
    }
}

/// What a press means, before the current view gives it an action.
#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PadInput {
    Left,
    Right,
    Confirm,
    Cancel,
    Reset,
    Reward,
}

/// Action-to-button mapping (loaded from config).
#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
#[derive(Clone, Debug, PartialEq)]
struct ActionMap {
    confirm: Vec<Btn>,
    cancel: Vec<Btn>,
    reset: Vec<Btn>,
    reward: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            confirm: vec![Btn::A, Btn::Start],
            cancel:  vec![Btn::B, Btn::Select],
            reset:   vec![Btn::X],
            reward:  vec![Btn::Y],
        }
    }
}

impl ActionMap {
    /// Logical inputs bound to a button. One button may carry several.
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn inputs_for(&self, btn: Btn) -> Vec<PadInput> {
        let mut out = Vec::new();
        if self.confirm.contains(&btn) { out.push(PadInput::Confirm); }
        if self.cancel.contains(&btn) { out.push(PadInput::Cancel); }
        if self.reset.contains(&btn) { out.push(PadInput::Reset); }
        if self.reward.contains(&btn) { out.push(PadInput::Reward); }
        out
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    /// Logical presses collected during the most recent `update()`.
    pub presses: Vec<PadInput>,

    // Last stick direction, for edge detection
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_left: bool,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_right: bool,

    action_map: ActionMap,

    pub connected: bool,
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = {
            match Gilrs::new() {
                Ok(g) => {
                    let has_pad = g.gamepads().next().is_some();
                    (Some(g), has_pad)
                }
                Err(e) => {
                    tracing::debug!(error = %e, "gamepad support unavailable");
                    (None, false)
                }
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            presses: Vec::with_capacity(4),
            stick_left: false,
            stick_right: false,
            action_map: ActionMap::default(),
            connected,
        }
    }

    /// Load button mapping from config. Empty or unrecognized lists keep
    /// the default binding for that action.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        self.action_map = action_map_from(cfg);
    }

    pub fn update(&mut self) {
        self.presses.clear();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    self.on_button(btn);
                }
                EventType::AxisChanged(Axis::LeftStickX, value, _) => {
                    self.connected = true;
                    self.on_stick_x(value);
                }
                EventType::Connected => {
                    self.connected = true;
                    tracing::info!("gamepad connected");
                }
                EventType::Disconnected => {
                    self.connected = false;
                    self.stick_left = false;
                    self.stick_right = false;
                    tracing::info!("gamepad disconnected");
                }
                _ => {}
            }
        }
    }

    #[cfg(feature = "gamepad")]
    fn on_button(&mut self, gilrs_btn: Button) {
        // D-pad handled separately (not in Btn enum)
        match gilrs_btn {
            Button::DPadLeft | Button::DPadUp => { self.presses.push(PadInput::Left); return; }
            Button::DPadRight | Button::DPadDown => { self.presses.push(PadInput::Right); return; }
            _ => {}
        }

        if let Some(btn) = Btn::from_gilrs(gilrs_btn) {
            let inputs = self.action_map.inputs_for(btn);
            self.presses.extend(inputs);
        }
    }

    /// Edge-trigger the stick: one press per push past the deadzone.
    #[cfg(feature = "gamepad")]
    fn on_stick_x(&mut self, value: f32) {
        let left = value < -STICK_DEADZONE;
        let right = value > STICK_DEADZONE;
        if left && !self.stick_left { self.presses.push(PadInput::Left); }
        if right && !self.stick_right { self.presses.push(PadInput::Right); }
        self.stick_left = left;
        self.stick_right = right;
    }
}

fn action_map_from(cfg: &GamepadConfig) -> ActionMap {
    fn parse_list(names: &[String]) -> Vec<Btn> {
        names.iter().filter_map(|s| Btn::from_name(s)).collect()
    }
    let mut map = ActionMap::default();
    let cf = parse_list(&cfg.confirm);
    if !cf.is_empty() { map.confirm = cf; }
    let ca = parse_list(&cfg.cancel);
    if !ca.is_empty() { map.cancel = ca; }
    let rs = parse_list(&cfg.reset);
    if !rs.is_empty() { map.reset = rs; }
    let rw = parse_list(&cfg.reward);
    if !rw.is_empty() { map.reward = rw; }
    map
}

/// Decode one logical pad input for the given view.
pub fn map_pad(view: View, input: PadInput) -> Option<Action> {
    match (view, input) {
        (View::Home, PadInput::Confirm) => Some(Action::SetView(View::Puzzle)),
        (View::Home, PadInput::Right) => Some(Action::SetView(View::Gallery)),
        (View::Home, PadInput::Cancel) => Some(Action::Quit),

        (View::Gallery, PadInput::Left) => Some(Action::GalleryPrev),
        (View::Gallery, PadInput::Right) => Some(Action::GalleryNext),
        (View::Gallery, PadInput::Confirm) => Some(Action::GalleryInteract),
        (View::Gallery, PadInput::Cancel) => Some(Action::SetView(View::Home)),

        (View::Puzzle, PadInput::Left) => Some(Action::PadPrev),
        (View::Puzzle, PadInput::Right) => Some(Action::PadNext),
        (View::Puzzle, PadInput::Confirm) => Some(Action::PadPress),
        (View::Puzzle, PadInput::Reset) => Some(Action::ResetPuzzle),
        (View::Puzzle, PadInput::Reward) => Some(Action::ClaimReward),
        (View::Puzzle, PadInput::Cancel) => Some(Action::SetView(View::Home)),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(confirm: &[&str], reward: &[&str]) -> GamepadConfig {
        GamepadConfig {
            confirm: confirm.iter().map(|s| s.to_string()).collect(),
            cancel: vec![],
            reset: vec!["west".into()],
            reward: reward.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn config_names_are_case_insensitive() {
        let map = action_map_from(&cfg(&["start"], &["rb"]));
        assert_eq!(map.confirm, vec![Btn::Start]);
        assert_eq!(map.reward, vec![Btn::R1]);
        assert_eq!(map.reset, vec![Btn::X]);
    }

    #[test]
    fn unknown_or_empty_names_keep_defaults() {
        let map = action_map_from(&cfg(&["Turbo"], &[]));
        let defaults = ActionMap::default();
        assert_eq!(map.confirm, defaults.confirm);
        assert_eq!(map.cancel, defaults.cancel);
        assert_eq!(map.reward, defaults.reward);
    }

    #[test]
    fn shared_button_yields_both_inputs() {
        let map = action_map_from(&cfg(&["A"], &["A"]));
        assert_eq!(map.inputs_for(Btn::A), vec![PadInput::Confirm, PadInput::Reward]);
        assert!(map.inputs_for(Btn::L1).is_empty());
    }

    #[test]
    fn pad_inputs_per_view() {
        assert_eq!(map_pad(View::Home, PadInput::Confirm), Some(Action::SetView(View::Puzzle)));
        assert_eq!(map_pad(View::Gallery, PadInput::Confirm), Some(Action::GalleryInteract));
        assert_eq!(map_pad(View::Puzzle, PadInput::Reward), Some(Action::ClaimReward));
        assert_eq!(map_pad(View::Gallery, PadInput::Reward), None);
        assert_eq!(map_pad(View::Home, PadInput::Reset), None);
    }
}
