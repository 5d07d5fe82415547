// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window size changes always reach the app. Input reaches the lightbox
//! only while it is open: wheel and touch events are routed even when a
//! scrollable captured them (the asset sits in one), everything else only
//! when no widget handled it. The open lightbox captures every mouse press,
//! so a press on the asset arrives through its view instead.

use super::Message;
use iced::{event, mouse, time, touch, window, Subscription};
use std::time::Duration;

/// Interval of the notification auto-dismiss tick.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

pub fn create_event_subscription(lightbox_open: bool) -> Subscription<Message> {
    if lightbox_open {
        event::listen_with(|event, status, window_id| {
            if let Some(message) = window_message(&event, window_id) {
                return Some(message);
            }
            let always = matches!(
                event,
                event::Event::Mouse(mouse::Event::WheelScrolled { .. })
                    | event::Event::Touch(
                        touch::Event::FingerPressed { .. }
                            | touch::Event::FingerLifted { .. }
                            | touch::Event::FingerLost { .. }
                    )
            );
            if always || status == event::Status::Ignored {
                Some(Message::RawEvent {
                    window: window_id,
                    event,
                })
            } else {
                None
            }
        })
    } else {
        event::listen_with(|event, _status, window_id| window_message(&event, window_id))
    }
}

fn window_message(event: &event::Event, window_id: window::Id) -> Option<Message> {
    match event {
        event::Event::Window(window::Event::Opened { size, .. })
        | event::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            window: window_id,
            size: *size,
        }),
        _ => None,
    }
}

/// Ticks while toasts are on screen so they can expire.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
