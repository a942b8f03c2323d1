//! Token colors and identities.
//!
//! A token is a colored circle identified by a stable string id. Its color
//! decides what may be stacked on top of it.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The three token colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
}

/// All colors in declaration order.
pub const ALL_COLORS: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

impl Color {
    /// Returns the display name used on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Blue => "Blue",
        }
    }

    /// Parses a color from its display name, ignoring case.
    pub fn from_name(name: &str) -> Option<Color> {
        ALL_COLORS
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Returns true if a token of color `above` may rest directly on a token
    /// of this color.
    ///
    /// Red supports nothing, Blue supports only Red, Green supports anything.
    pub const fn supports(self, above: Color) -> bool {
        match self {
            Color::Red => false,
            Color::Blue => matches!(above, Color::Red),
            Color::Green => true,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Stable token identifier, e.g. `c1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(id: impl Into<String>) -> Self {
        TokenId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenId {
    fn from(id: &str) -> Self {
        TokenId(id.to_string())
    }
}

impl Borrow<str> for TokenId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub color: Color,
}
