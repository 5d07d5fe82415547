// SPDX-License-Identifier: MPL-2.0
//! Raw input to lightbox [`Action`]s.
//!
//! Keyboard, wheel, pointer and touch events arrive here unfiltered while
//! the lightbox is open. [`GestureInput`] remembers just enough (cursor,
//! button state, where a finger went down) to turn them into actions.

use super::controller::{Action, Direction};
use crate::config::LightboxConfig;
use iced::keyboard::{self, key::Named, Key};
use iced::mouse::{self, ScrollDelta};
use iced::touch::{self, Finger};
use iced::{Event, Point};
use std::time::{Duration, Instant};

/// Pixel deltas per wheel line, matching common trackpad drivers.
const PIXELS_PER_LINE: f32 = 120.0;

#[derive(Debug, Clone, Copy)]
struct TouchStart {
    finger: Finger,
    position: Point,
    at: Instant,
}

#[derive(Debug, Clone)]
pub struct GestureInput {
    swipe_threshold: f32,
    swipe_max_duration: Duration,
    touch: Option<TouchStart>,
    cursor: Point,
    pointer_down: bool,
}

impl Default for GestureInput {
    fn default() -> Self {
        Self::from_config(&LightboxConfig::default())
    }
}

impl GestureInput {
    #[must_use]
    pub fn new(swipe_threshold: f32, swipe_max_duration: Duration) -> Self {
        Self {
            swipe_threshold,
            swipe_max_duration,
            touch: None,
            cursor: Point::ORIGIN,
            pointer_down: false,
        }
    }

    #[must_use]
    pub fn from_config(config: &LightboxConfig) -> Self {
        Self::new(
            config.swipe_threshold_px,
            Duration::from_millis(config.swipe_max_duration_ms),
        )
    }

    /// Forgets in-flight pointer and touch state, e.g. when the lightbox closes.
    pub fn reset(&mut self) {
        self.touch = None;
        self.pointer_down = false;
    }

    /// Translates one event observed at `now`.
    pub fn translate(&mut self, event: &Event, now: Instant) -> Option<Action> {
        match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                key_action(key, *modifiers)
            }
            Event::Mouse(mouse_event) => self.mouse(mouse_event),
            Event::Touch(touch_event) => self.touch(touch_event, now),
            _ => None,
        }
    }

    fn mouse(&mut self, event: &mouse::Event) -> Option<Action> {
        match event {
            mouse::Event::CursorMoved { position } => {
                self.cursor = *position;
                self.pointer_down.then_some(Action::DragMove(*position))
            }
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                self.pointer_down = true;
                Some(Action::DragStart(self.cursor))
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) if self.pointer_down => {
                self.pointer_down = false;
                Some(Action::DragEnd)
            }
            mouse::Event::CursorLeft if self.pointer_down => {
                self.pointer_down = false;
                Some(Action::DragEnd)
            }
            mouse::Event::WheelScrolled { delta } => {
                let steps = match delta {
                    ScrollDelta::Lines { y, .. } => *y,
                    ScrollDelta::Pixels { y, .. } => *y / PIXELS_PER_LINE,
                };
                (steps != 0.0).then_some(Action::Wheel(steps))
            }
            _ => None,
        }
    }

    fn touch(&mut self, event: &touch::Event, now: Instant) -> Option<Action> {
        match event {
            touch::Event::FingerPressed { id, position } => {
                // Only single-finger swipes navigate.
                self.touch = match self.touch {
                    None => Some(TouchStart {
                        finger: *id,
                        position: *position,
                        at: now,
                    }),
                    Some(_) => None,
                };
                None
            }
            touch::Event::FingerLifted { id, position } => {
                let start = self.touch.take().filter(|start| start.finger == *id)?;
                swipe_direction(
                    start.position,
                    *position,
                    now.saturating_duration_since(start.at),
                    self.swipe_threshold,
                    self.swipe_max_duration,
                )
                .map(Action::Navigate)
            }
            touch::Event::FingerLost { id, .. } => {
                if self.touch.is_some_and(|start| start.finger == *id) {
                    self.touch = None;
                }
                None
            }
            touch::Event::FingerMoved { .. } => None,
        }
    }
}

fn key_action(key: &Key, modifiers: keyboard::Modifiers) -> Option<Action> {
    match key {
        Key::Named(Named::Escape) => Some(Action::Close),
        Key::Named(Named::ArrowRight) => Some(Action::Navigate(Direction::Forward)),
        Key::Named(Named::ArrowLeft) => Some(Action::Navigate(Direction::Backward)),
        Key::Named(Named::F11) => Some(Action::ToggleFullscreen),
        Key::Named(Named::PageDown) => Some(Action::NextPage),
        Key::Named(Named::PageUp) => Some(Action::PreviousPage),
        Key::Character(c) if !modifiers.command() && !modifiers.alt() => match c.as_str() {
            "+" | "=" => Some(Action::ZoomIn),
            "-" => Some(Action::ZoomOut),
            "0" => Some(Action::ResetZoom),
            "r" | "R" => Some(Action::Rotate),
            "f" | "F" => Some(Action::ToggleFullscreen),
            _ => None,
        },
        _ => None,
    }
}

/// Direction of a completed touch swipe, if it qualifies as one.
///
/// A swipe must travel more than `threshold` horizontally, move more
/// horizontally than vertically, and finish within `max_duration`. Moving
/// the finger left advances.
#[must_use]
pub fn swipe_direction(
    start: Point,
    end: Point,
    elapsed: Duration,
    threshold: f32,
    max_duration: Duration,
) -> Option<Direction> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if elapsed > max_duration || dx.abs() <= threshold || dx.abs() <= dy.abs() {
        return None;
    }
    Some(if dx < 0.0 {
        Direction::Forward
    } else {
        Direction::Backward
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::key::{Code, Physical};
    use iced::keyboard::Location;

    fn key_press(key: Key) -> Event {
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: key.clone(),
            modified_key: key,
            physical_key: Physical::Code(Code::KeyA),
            location: Location::Standard,
            modifiers: keyboard::Modifiers::empty(),
            text: None,
            repeat: false,
        })
    }

    fn finger(id: u64, position: Point, lifted: bool) -> Event {
        let id = Finger(id);
        Event::Touch(if lifted {
            touch::Event::FingerLifted { id, position }
        } else {
            touch::Event::FingerPressed { id, position }
        })
    }

    #[test]
    fn keys_map_to_actions() {
        let mut input = GestureInput::default();
        let now = Instant::now();
        let cases = [
            (Key::Named(Named::Escape), Action::Close),
            (Key::Named(Named::ArrowRight), Action::Navigate(Direction::Forward)),
            (Key::Named(Named::ArrowLeft), Action::Navigate(Direction::Backward)),
            (Key::Character("+".into()), Action::ZoomIn),
            (Key::Character("-".into()), Action::ZoomOut),
            (Key::Character("0".into()), Action::ResetZoom),
            (Key::Character("r".into()), Action::Rotate),
        ];
        for (key, expected) in cases {
            assert_eq!(input.translate(&key_press(key), now), Some(expected));
        }
        assert_eq!(
            input.translate(&key_press(Key::Character("q".into())), now),
            None
        );
    }

    #[test]
    fn wheel_pixels_are_scaled_to_lines() {
        let mut input = GestureInput::default();
        let event = Event::Mouse(mouse::Event::WheelScrolled {
            delta: ScrollDelta::Pixels { x: 0.0, y: -240.0 },
        });
        assert_eq!(
            input.translate(&event, Instant::now()),
            Some(Action::Wheel(-2.0))
        );
    }

    #[test]
    fn pointer_press_move_release_drags() {
        let mut input = GestureInput::default();
        let now = Instant::now();
        let moved = |x| {
            Event::Mouse(mouse::Event::CursorMoved {
                position: Point::new(x, 5.0),
            })
        };

        assert_eq!(input.translate(&moved(10.0), now), None);
        assert_eq!(
            input.translate(
                &Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)),
                now
            ),
            Some(Action::DragStart(Point::new(10.0, 5.0)))
        );
        assert_eq!(
            input.translate(&moved(30.0), now),
            Some(Action::DragMove(Point::new(30.0, 5.0)))
        );
        assert_eq!(
            input.translate(
                &Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
                now
            ),
            Some(Action::DragEnd)
        );
        assert_eq!(input.translate(&moved(50.0), now), None);
    }

    #[test]
    fn leftward_swipe_advances() {
        let mut input = GestureInput::default();
        let start = Instant::now();
        input.translate(&finger(1, Point::new(300.0, 100.0), false), start);
        let action = input.translate(
            &finger(1, Point::new(200.0, 110.0), true),
            start + Duration::from_millis(200),
        );
        assert_eq!(action, Some(Action::Navigate(Direction::Forward)));
    }

    #[test]
    fn slow_or_short_swipes_are_ignored() {
        let max = Duration::from_millis(600);
        let origin = Point::new(0.0, 0.0);
        assert_eq!(
            swipe_direction(origin, Point::new(40.0, 0.0), Duration::ZERO, 50.0, max),
            None
        );
        assert_eq!(
            swipe_direction(origin, Point::new(80.0, 0.0), Duration::from_secs(1), 50.0, max),
            None
        );
        assert_eq!(
            swipe_direction(origin, Point::new(80.0, 120.0), Duration::ZERO, 50.0, max),
            None
        );
        assert_eq!(
            swipe_direction(origin, Point::new(80.0, 10.0), Duration::ZERO, 50.0, max),
            Some(Direction::Backward)
        );
    }

    #[test]
    fn second_finger_cancels_swipe() {
        let mut input = GestureInput::default();
        let now = Instant::now();
        input.translate(&finger(1, Point::new(300.0, 0.0), false), now);
        input.translate(&finger(2, Point::new(310.0, 0.0), false), now);
        assert_eq!(
            input.translate(&finger(1, Point::new(100.0, 0.0), true), now),
            None
        );
    }
}
