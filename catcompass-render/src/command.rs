//! Draw descriptors
//!
//! Coordinates are face-local (origin at the display centre, y down).
//! A frame is built once and never mutated after `render` returns.

use catcompass_core::{Color, Rect, Vec2};
use heapless::{String, Vec};

/// Maximum commands in one frame
pub const MAX_COMMANDS: usize = 128;

/// Maximum characters in a text command
pub const TEXT_LEN: usize = 24;

/// Text sizes, mapped to fonts by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// Readouts and bezel letters
    Small,
    Medium,
    /// Secret overlay
    Large,
}

impl TextSize {
    /// Line height in pixels
    pub fn line_height(self) -> f32 {
        match self {
            TextSize::Small => 10.0,
            TextSize::Medium => 13.0,
            TextSize::Large => 20.0,
        }
    }
}

/// Sprites drawn from primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Magnetic-north symbol and pursuer
    Cat,
    /// True-north symbol
    Paw,
    /// Evader
    Mouse,
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: u8,
    },
    /// Circle outline
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        width: u8,
    },
    /// Circle outline drawn as dashes of `dash` px with equal gaps
    DashedCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        width: u8,
        dash: f32,
    },
    /// Filled circle
    Disc {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Filled triangle
    Triangle { points: [Vec2; 3], color: Color },
    /// Text centred on `center`
    Text {
        center: Vec2,
        text: String<TEXT_LEN>,
        color: Color,
        size: TextSize,
    },
    /// Sprite fitting a `size` x `size` box centred on `center`
    Glyph {
        center: Vec2,
        glyph: Glyph,
        size: f32,
        color: Color,
    },
}

impl DrawCommand {
    /// Text command, truncated to `TEXT_LEN` bytes on a char boundary
    pub fn text(center: Vec2, text: &str, color: Color, size: TextSize) -> Self {
        let mut s = String::new();
        for ch in text.chars() {
            if s.push(ch).is_err() {
                break;
            }
        }
        DrawCommand::Text {
            center,
            text: s,
            color,
            size,
        }
    }
}

/// Draw commands for one frame plus the hit-test region for the next touches
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    /// Mode symbol bounds with touch padding; `None` while gestures are off
    pub hot_region: Option<Rect>,
    commands: Vec<DrawCommand, MAX_COMMANDS>,
    dropped: u16,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: Color::BLACK,
            hot_region: None,
            commands: Vec::new(),
            dropped: 0,
        }
    }

    /// Frame for a face that has no viewport yet
    pub fn empty() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Append a command; a full frame drops it and counts the loss
    pub fn push(&mut self, command: DrawCommand) {
        if self.commands.push(command).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands lost to the capacity limit
    pub fn dropped(&self) -> u16 {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Screen position of the face-local origin
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_truncates_on_char_boundary() {
        let cmd = DrawCommand::text(Vec2::ZERO, "BRG 123°M and much more text", Color::WHITE, TextSize::Small);
        match cmd {
            DrawCommand::Text { text, .. } => {
                assert!(text.len() <= TEXT_LEN);
                assert!(text.starts_with("BRG 123°M"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_frame_counts_dropped() {
        let mut frame = Frame::new(240.0, 240.0);
        for _ in 0..MAX_COMMANDS + 3 {
            frame.push(DrawCommand::Disc {
                center: Vec2::ZERO,
                radius: 1.0,
                color: Color::WHITE,
            });
        }
        assert_eq!(frame.commands().len(), MAX_COMMANDS);
        assert_eq!(frame.dropped(), 3);
        assert_eq!(frame.origin(), Vec2::new(120.0, 120.0));
    }
}
