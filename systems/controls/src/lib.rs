#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure controls system that translates per-frame device input into commands.

use std::time::Duration;

use glam::Vec2;
use station_siege_core::{Command, Event, GamePhase, PlayerControls, UpgradeKind};

/// Degrees of rotation applied per unit of mouse movement by default.
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.15;

/// Logical keyboard key reported by an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character key; letters are matched case-insensitively.
    Char(char),
    /// The space bar.
    Space,
    /// Any key the game does not bind, identified by its raw code.
    Other(u32),
}

/// Mouse buttons reported by an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; fires the weapon.
    Left,
    /// Secondary button; toggles the camera.
    Right,
    /// Middle button; unbound.
    Middle,
}

/// Viewpoint presented by renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CameraMode {
    /// Camera placed at the player's eyes.
    #[default]
    FirstPerson,
    /// Camera orbiting behind the player.
    ThirdPerson,
}

impl CameraMode {
    fn toggled(self) -> Self {
        match self {
            Self::FirstPerson => Self::ThirdPerson,
            Self::ThirdPerson => Self::FirstPerson,
        }
    }
}

/// Already-debounced input facts describing a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Keys held down during the frame.
    pub held: Vec<Key>,
    /// Keys that went down during the frame.
    pub pressed: Vec<Key>,
    /// Mouse movement since the previous frame, in pixels.
    pub mouse_delta: Vec2,
    /// Mouse buttons that went down during the frame.
    pub clicks: Vec<MouseButton>,
}

impl FrameInput {
    fn holds(&self, wanted: char) -> bool {
        self.held.iter().any(|key| is_char(*key, wanted))
    }
}

fn is_char(key: Key, wanted: char) -> bool {
    matches!(key, Key::Char(c) if c.to_ascii_lowercase() == wanted)
}

/// Configuration parameters required to construct the controls system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    mouse_sensitivity: f32,
}

impl Config {
    /// Creates a new configuration using the provided mouse sensitivity.
    #[must_use]
    pub const fn new(mouse_sensitivity: f32) -> Self {
        Self { mouse_sensitivity }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MOUSE_SENSITIVITY)
    }
}

/// Controls system that gates input on the phase it observes through events.
#[derive(Debug)]
pub struct Controls {
    mouse_sensitivity: f32,
    phase: GamePhase,
    camera: CameraMode,
}

impl Controls {
    /// Creates a new controls system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            mouse_sensitivity: config.mouse_sensitivity,
            phase: GamePhase::Playing,
            camera: CameraMode::default(),
        }
    }

    /// Phase the system last observed.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Active camera viewpoint.
    #[must_use]
    pub fn camera_mode(&self) -> CameraMode {
        self.camera
    }

    /// Consumes world events and frame input to emit commands.
    ///
    /// The frame always ends with a [`Command::Tick`]; the world ignores it
    /// outside active play.
    pub fn handle(
        &mut self,
        events: &[Event],
        input: &FrameInput,
        dt: Duration,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::PhaseChanged { to, .. } = event {
                self.phase = *to;
            }
        }

        match self.phase {
            GamePhase::Playing => self.handle_play(input, out),
            GamePhase::LevelComplete => {
                if input.pressed.contains(&Key::Space) {
                    out.push(Command::ContinueToUpgrades);
                }
            }
            GamePhase::Upgrading => {
                if input.pressed.contains(&Key::Space) {
                    out.push(Command::SkipUpgrade);
                } else if let Some(upgrade) = input.pressed.iter().find_map(|key| match key {
                    Key::Char(c) => c
                        .to_digit(10)
                        .and_then(|digit| u8::try_from(digit).ok())
                        .and_then(UpgradeKind::from_choice),
                    _ => None,
                }) {
                    out.push(Command::PurchaseUpgrade { upgrade });
                }
            }
            GamePhase::GameOver => {
                if input.pressed.iter().any(|key| is_char(*key, 'r')) {
                    out.push(Command::RestartGame);
                }
            }
        }

        out.push(Command::Tick {
            dt,
            controls: self.player_controls(input),
        });
    }

    fn handle_play(&mut self, input: &FrameInput, out: &mut Vec<Command>) {
        if input.mouse_delta != Vec2::ZERO {
            out.push(Command::Aim {
                yaw_delta: -input.mouse_delta.x * self.mouse_sensitivity,
                pitch_delta: -input.mouse_delta.y * self.mouse_sensitivity,
            });
        }

        for button in &input.clicks {
            match button {
                MouseButton::Left => out.push(Command::FireWeapon),
                MouseButton::Right => {
                    self.camera = self.camera.toggled();
                    log::debug!("camera switched to {:?}", self.camera);
                }
                MouseButton::Middle => {}
            }
        }
    }

    fn player_controls(&self, input: &FrameInput) -> PlayerControls {
        let axis = |positive: char, negative: char| {
            i8::from(input.holds(positive)) - i8::from(input.holds(negative))
        };
        PlayerControls::new(axis('w', 's'), axis('d', 'a'), input.holds('r'))
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_keys_cancel_out() {
        let controls = Controls::default();
        let input = FrameInput {
            held: vec![Key::Char('W'), Key::Char('s'), Key::Char('a'), Key::Char('r')],
            ..FrameInput::default()
        };

        let state = controls.player_controls(&input);

        assert_eq!(state, PlayerControls::new(0, -1, true));
    }

    #[test]
    fn camera_toggles_back_and_forth() {
        assert_eq!(CameraMode::FirstPerson.toggled(), CameraMode::ThirdPerson);
        assert_eq!(CameraMode::ThirdPerson.toggled(), CameraMode::FirstPerson);
    }
}
