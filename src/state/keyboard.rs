//! Keyboard Module - Decoded key events
//!
//! Keys arrive already decoded by the input collaborator. A key is identified
//! by its name (`"ENTER"`, `"CTRL_C"`, `"a"`), optional aliases, and the
//! codepoint it would insert when printable.
//!
//! # Example
//!
//! ```
//! use spark_widgets::state::{keys, KeyEvent};
//!
//! let enter = KeyEvent::named(keys::ENTER).with_aliases([keys::RETURN]);
//! assert!(enter.is(keys::RETURN));
//!
//! let h = KeyEvent::char('h');
//! assert_eq!(h.printable(), Some('h'));
//! ```

/// Well-known key names.
pub mod keys {
    pub const CTRL_C: &str = "CTRL_C";
    pub const ESCAPE: &str = "ESCAPE";
    pub const ENTER: &str = "ENTER";
    pub const RETURN: &str = "RETURN";
    pub const BACKSPACE: &str = "BACKSPACE";
    pub const DELETE: &str = "DELETE";
    pub const TAB: &str = "TAB";
    pub const UP: &str = "UP";
    pub const DOWN: &str = "DOWN";
    pub const LEFT: &str = "LEFT";
    pub const RIGHT: &str = "RIGHT";
    pub const HOME: &str = "HOME";
    pub const END: &str = "END";
    pub const PAGE_UP: &str = "PAGE_UP";
    pub const PAGE_DOWN: &str = "PAGE_DOWN";
}

bitflags::bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CTRL = 1 << 0;
        const ALT = 1 << 1;
        const SHIFT = 1 << 2;
        const META = 1 << 3;
    }
}

/// A decoded keystroke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Canonical key name.
    pub name: String,
    /// Alternative names this key also answers to.
    pub aliases: Vec<String>,
    /// Unicode codepoint for keys that produce a character.
    pub codepoint: Option<u32>,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A named key with no codepoint.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            codepoint: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// A character key; its name is the character itself.
    pub fn char(c: char) -> Self {
        Self {
            name: c.to_string(),
            aliases: Vec::new(),
            codepoint: Some(c as u32),
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn with_codepoint(mut self, codepoint: u32) -> Self {
        self.codepoint = Some(codepoint);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// True if `name` is this key's name or one of its aliases.
    pub fn is(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }

    /// True if any of `names` matches.
    pub fn is_any<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| self.is(n.as_ref()))
    }

    /// The character this key inserts, if it is printable.
    pub fn printable(&self) -> Option<char> {
        self.codepoint
            .and_then(char::from_u32)
            .filter(|c| !c.is_control())
    }
}
