//! Text format flags.
//!
//! Formats on a text node form a set: toggling the same flag twice restores
//! the original state, and applying a flag that is already present is a no-op.

use bitflags::bitflags;

bitflags! {
    /// Inline formatting applied to a [`crate::TextNode`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, serde::Serialize, serde::Deserialize)]
    pub struct TextFormat: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const CODE = 1 << 2;
        const UNDERLINE = 1 << 3;
        const STRIKETHROUGH = 1 << 4;
    }
}
