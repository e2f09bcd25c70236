//! Local-only chatroom
//!
//! Messages live in memory for the lifetime of the page and are never sent
//! anywhere. Timestamps are unix seconds and shown as UTC wall-clock time.

use macroquad::prelude::*;
use macroquad::logging::info;
use crate::ui::{
    chars_per_line, draw_rounded_rect, draw_wrapped, line_height, text_button, wrap_text, Rect, TextInput, UiContext,
    ACCENT_ALT, ACCENT_COLOR, PANEL_BG, PANEL_BORDER, TEXT_COLOR, TEXT_DIM,
};
use super::ScrollView;

pub const SYSTEM_USER: &str = "System";
const MAX_NAME_LEN: usize = 24;
const MAX_MESSAGE_LEN: usize = 280;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub username: String,
    pub message: String,
    /// Unix seconds
    pub timestamp: f64,
}

impl ChatMessage {
    pub fn new(username: &str, message: &str, timestamp: f64) -> Self {
        Self {
            username: username.to_string(),
            message: message.to_string(),
            timestamp,
        }
    }
}

/// Messages shown before anyone joins
pub fn seed_messages(now: f64) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(SYSTEM_USER, "Welcome to the global chatroom!", now),
        ChatMessage::new("John", "Hey everyone! 👋", now - 300.0),
        ChatMessage::new("Sarah", "Nice portfolio Ihsan!", now - 240.0),
        ChatMessage::new("Dev123", "The 3D game is awesome!", now - 180.0),
    ]
}

/// `hh:mm:ss AM/PM` for a unix timestamp (UTC)
pub fn format_clock(unix_secs: f64) -> String {
    let secs = if unix_secs.is_finite() { unix_secs.floor() as i64 } else { 0 };
    let of_day = secs.rem_euclid(86_400);
    let (h, m, s) = (of_day / 3600, of_day % 3600 / 60, of_day % 60);
    let suffix = if h < 12 { "AM" } else { "PM" };
    let h12 = if h % 12 == 0 { 12 } else { h % 12 };
    format!("{:02}:{:02}:{:02} {}", h12, m, s, suffix)
}

pub struct ChatroomPage {
    username: Option<String>,
    messages: Vec<ChatMessage>,
    name_input: TextInput,
    message_input: TextInput,
    scroll: ScrollView,
    /// Scroll to the newest message on the next draw
    stick_to_bottom: bool,
}

impl ChatroomPage {
    pub fn new(now: f64) -> Self {
        Self {
            username: None,
            messages: seed_messages(now),
            name_input: TextInput::new(MAX_NAME_LEN),
            message_input: TextInput::new(MAX_MESSAGE_LEN),
            scroll: ScrollView::default(),
            stick_to_bottom: true,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Join under `name`. Blank names are rejected and nothing changes.
    pub fn join(&mut self, name: &str, now: f64) -> bool {
        let name = name.trim();
        if name.is_empty() || self.username.is_some() {
            return false;
        }
        self.messages.push(ChatMessage::new(SYSTEM_USER, &format!("{} has joined the chat!", name), now));
        self.username = Some(name.to_string());
        self.stick_to_bottom = true;
        info!("Chat joined as {}", name);
        true
    }

    /// Append a message from the joined user; blank text is ignored
    pub fn send(&mut self, text: &str, now: f64) -> bool {
        let Some(username) = self.username.as_deref() else {
            return false;
        };
        if text.trim().is_empty() {
            return false;
        }
        self.messages.push(ChatMessage::new(username, text, now));
        self.stick_to_bottom = true;
        true
    }

    pub fn is_own(&self, message: &ChatMessage) -> bool {
        self.username.as_deref() == Some(message.username.as_str())
    }

    pub fn draw(&mut self, ctx: &mut UiContext, rect: Rect, now: f64) {
        if self.username.is_none() {
            self.draw_join(ctx, rect, now);
        } else {
            self.draw_room(ctx, rect, now);
        }
    }

    fn draw_join(&mut self, ctx: &mut UiContext, rect: Rect, now: f64) {
        let card = Rect::new(rect.center_x() - 200.0, rect.y + 80.0, 400.0, 200.0);
        draw_rounded_rect(card.x, card.y, card.w, card.h, 8.0, PANEL_BG);
        draw_rectangle_lines(card.x, card.y, card.w, card.h, 1.0, ACCENT_COLOR);

        let title = "Enter the Global Chat";
        let dims = measure_text(title, None, 26, 1.0);
        draw_text(title, card.center_x() - dims.width * 0.5, card.y + 50.0, 26.0, TEXT_COLOR);

        let field = Rect::new(card.x + 30.0, card.y + 76.0, card.w - 60.0, 36.0);
        let entered = self.name_input.draw(ctx, field, "Enter your username", 16.0);
        let button = Rect::new(card.center_x() - 60.0, card.y + 132.0, 120.0, 36.0);
        let clicked = text_button(ctx, button, "Join Chat", 16.0);

        if entered || clicked {
            let name = self.name_input.text.clone();
            if self.join(&name, now) {
                self.message_input.focused = true;
            }
        }
    }

    fn draw_room(&mut self, ctx: &mut UiContext, rect: Rect, now: f64) {
        let room = rect.pad(20.0);
        draw_rounded_rect(room.x, room.y, room.w, room.h, 8.0, PANEL_BG);
        draw_rectangle_lines(room.x, room.y, room.w, room.h, 1.0, PANEL_BORDER);

        // Header
        draw_text("Global Chatroom", room.x + 20.0, room.y + 34.0, 24.0, TEXT_COLOR);
        let status = format!("{} messages - You are {}", self.messages.len(), self.username.as_deref().unwrap_or_default());
        draw_text(&status, room.x + 20.0, room.y + 58.0, 15.0, TEXT_DIM);

        // Message list
        let list = Rect::new(room.x + 12.0, room.y + 72.0, room.w - 24.0, room.h - 72.0 - 64.0);
        let font_size = 16.0;
        let line_h = line_height(font_size);
        let max_chars = chars_per_line(list.w - 40.0, font_size);

        let heights: Vec<f32> = self
            .messages
            .iter()
            .map(|m| 30.0 + wrap_text(&m.message, max_chars).len().max(1) as f32 * line_h + 12.0)
            .collect();
        let content_h: f32 = heights.iter().sum();

        if self.stick_to_bottom {
            self.scroll.offset = (content_h - list.h).max(0.0);
            self.stick_to_bottom = false;
        }
        self.scroll.handle(ctx, list, content_h);

        let mut y = list.y - self.scroll.offset;
        for (msg, h) in self.messages.iter().zip(&heights) {
            if y + h >= list.y && y <= list.bottom() {
                let own = self.is_own(msg);
                let bubble = Rect::new(list.x + 8.0, y + 4.0, list.w - 16.0, h - 8.0);
                let bg = if own {
                    Color::new(ACCENT_COLOR.r, ACCENT_COLOR.g, ACCENT_COLOR.b, 0.35)
                } else {
                    Color::new(1.0, 1.0, 1.0, 0.04)
                };
                draw_rounded_rect(bubble.x, bubble.y, bubble.w, bubble.h, 6.0, bg);

                let name_color = if msg.username == SYSTEM_USER { ACCENT_ALT } else { TEXT_COLOR };
                draw_text(&msg.username, bubble.x + 12.0, bubble.y + 20.0, 16.0, name_color);
                let stamp = format_clock(msg.timestamp);
                let dims = measure_text(&stamp, None, 13, 1.0);
                draw_text(&stamp, bubble.right() - dims.width - 12.0, bubble.y + 20.0, 13.0, TEXT_DIM);
                draw_wrapped(&msg.message, bubble.x + 12.0, bubble.y + 42.0, bubble.w - 24.0, font_size, TEXT_COLOR);
            }
            y += h;
        }

        // Cover overflow above and below the list
        draw_rectangle(room.x + 1.0, room.y + 62.0, room.w - 2.0, list.y - room.y - 62.0, PANEL_BG);
        draw_rectangle(room.x + 1.0, list.bottom(), room.w - 2.0, room.bottom() - list.bottom() - 1.0, PANEL_BG);
        draw_text(&status, room.x + 20.0, room.y + 58.0, 15.0, TEXT_DIM);

        // Composer
        let field = Rect::new(room.x + 20.0, room.bottom() - 52.0, room.w - 40.0 - 100.0, 36.0);
        let entered = self.message_input.draw(ctx, field, "Type your message...", 16.0);
        let button = Rect::new(field.right() + 12.0, field.y, 88.0, 36.0);
        let clicked = text_button(ctx, button, "Send", 16.0);

        if entered || clicked {
            let text = self.message_input.text.clone();
            if self.send(&text, now) {
                self.message_input.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1_700_000_000.0;

    #[test]
    fn test_seeded_history() {
        let page = ChatroomPage::new(NOW);
        let names: Vec<_> = page.messages().iter().map(|m| m.username.as_str()).collect();
        assert_eq!(names, vec!["System", "John", "Sarah", "Dev123"]);
        assert_eq!(page.messages()[1].timestamp, NOW - 300.0);
        assert!(page.username().is_none());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut page = ChatroomPage::new(NOW);
        assert!(!page.join("   ", NOW));
        assert!(page.username().is_none());
        assert_eq!(page.messages().len(), 4);
    }

    #[test]
    fn test_join_announces_trimmed_name() {
        let mut page = ChatroomPage::new(NOW);
        assert!(page.join("  ihsan ", NOW));
        assert_eq!(page.username(), Some("ihsan"));
        let last = page.messages().last().unwrap();
        assert_eq!(last.username, SYSTEM_USER);
        assert_eq!(last.message, "ihsan has joined the chat!");
    }

    #[test]
    fn test_send_requires_join_and_text() {
        let mut page = ChatroomPage::new(NOW);
        assert!(!page.send("hello", NOW));

        page.join("ihsan", NOW);
        assert!(!page.send(" \t ", NOW + 1.0));
        assert!(page.send("hello there", NOW + 2.0));

        let last = page.messages().last().unwrap();
        assert_eq!(last, &ChatMessage::new("ihsan", "hello there", NOW + 2.0));
        assert!(page.is_own(last));
        assert!(!page.is_own(&page.messages()[1]));
    }

    #[test]
    fn test_clock_format() {
        assert_eq!(format_clock(0.0), "12:00:00 AM");
        assert_eq!(format_clock(13.0 * 3600.0 + 5.0 * 60.0 + 9.0), "01:05:09 PM");
        assert_eq!(format_clock(12.0 * 3600.0), "12:00:00 PM");
        assert_eq!(format_clock(86_400.0 + 11.0 * 3600.0 + 59.0 * 60.0 + 59.9), "11:59:59 AM");
    }
}
