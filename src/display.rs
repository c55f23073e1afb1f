//! Timed on-screen spell messages.
//!
//! Only the bookkeeping lives here: which messages are live at a given time
//! and where their label box goes. Drawing is left to the host.

use crate::spellbook::SpellEffect;
use gesture_core::Point2;

/// A queued message and when it was shown.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMessage {
    pub text: String,
    /// Normalized screen position, (0,0) bottom-left.
    pub position: Point2,
    pub font_size: u32,
    pub shown_at: f64,
    pub lifetime_secs: f32,
}

impl DisplayMessage {
    pub fn expires_at(&self) -> f64 {
        self.shown_at + f64::from(self.lifetime_secs)
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now > self.expires_at()
    }
}

/// Label rectangle in GUI pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LabelRect {
    /// Center a `text_size` label on the message's screen position.
    ///
    /// Message positions have Y pointing up; GUI rectangles have Y pointing
    /// down, so Y is flipped.
    pub fn layout(message: &DisplayMessage, screen: Point2, text_size: Point2) -> Self {
        Self {
            x: message.position.x * screen.x - text_size.x / 2.0,
            y: (1.0 - message.position.y) * screen.y - text_size.y / 2.0,
            width: text_size.x,
            height: text_size.y,
        }
    }
}

/// Messages currently on screen.
#[derive(Debug, Clone, Default)]
pub struct MessageBoard {
    messages: Vec<DisplayMessage>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the effect's message starting at `now`.
    pub fn show(&mut self, effect: &SpellEffect, now: f64) {
        self.messages.push(DisplayMessage {
            text: effect.message.clone(),
            position: effect.screen_position,
            font_size: effect.font_size,
            shown_at: now,
            lifetime_secs: effect.lifetime_secs,
        });
    }

    /// Drop expired messages. Returns how many were removed.
    pub fn expire(&mut self, now: f64) -> usize {
        let before = self.messages.len();
        self.messages.retain(|m| !m.is_expired(now));
        before - self.messages.len()
    }

    /// Messages still live at `now`, oldest first.
    pub fn active(&self, now: f64) -> impl Iterator<Item = &DisplayMessage> {
        self.messages.iter().filter(move |m| !m.is_expired(now))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
