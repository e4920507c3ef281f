//! Modifier keys and modifier-state combinations

use std::fmt;

/// A single modifier key tracked by layouts.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Shift = 0,
    Fn = 1,
    Ctrl = 2,
    Alt = 3,
    Meta = 4,
}

impl Modifier {
    pub const ALL: [Modifier; 5] = [
        Modifier::Shift,
        Modifier::Fn,
        Modifier::Ctrl,
        Modifier::Alt,
        Modifier::Meta,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Shift => "shift",
            Modifier::Fn => "fn",
            Modifier::Ctrl => "ctrl",
            Modifier::Alt => "alt",
            Modifier::Meta => "meta",
        }
    }

    /// Stable code used in compiled packs.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Modifier> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The combination of modifiers active when a key is pressed.
///
/// A layout declares the states it supports and must map every key for each
/// of them. The empty state renders as `base`; combinations render in fixed
/// modifier order (`shift&fn`), matching the layout source syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ModifierState(u8);

impl ModifierState {
    /// No modifier held down.
    pub const EMPTY: ModifierState = ModifierState(0);

    const VALID_MASK: u8 = 0b0001_1111;

    pub fn new(modifiers: &[Modifier]) -> Self {
        let mut state = Self::EMPTY;
        for m in modifiers {
            state = state.with(*m);
        }
        state
    }

    #[must_use]
    pub fn with(self, modifier: Modifier) -> Self {
        ModifierState(self.0 | modifier.bit())
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Active modifiers in fixed declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(|m| self.contains(*m))
    }

    /// Raw bitset, used by the pack encoding.
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Rebuild a state from its pack encoding. Unknown bits are rejected so
    /// a pack produced by a newer vocabulary fails loudly instead of
    /// aliasing onto a different state.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::VALID_MASK == 0 {
            Some(ModifierState(bits))
        } else {
            None
        }
    }
}

impl From<Modifier> for ModifierState {
    fn from(modifier: Modifier) -> Self {
        ModifierState::EMPTY.with(modifier)
    }
}

impl fmt::Display for ModifierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("base");
        }
        for (i, m) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}
