use std::fmt;

use crate::drawers::DRAWER_COUNT;

/// A prisoner number, and the value written on the slip inside a drawer.
/// Always in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(u8);

impl Label {
    pub const MIN: Label = Label(1);
    pub const MAX: Label = Label(DRAWER_COUNT as u8);

    pub fn new(value: usize) -> Result<Self, LabelError> {
        if (1..=DRAWER_COUNT).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(LabelError::OutOfRange(value))
        }
    }

    /// Label whose drawer sits at zero-based `index`.
    pub fn from_drawer_index(index: usize) -> Result<Self, LabelError> {
        Self::new(index.saturating_add(1))
    }

    pub const fn get(self) -> usize {
        self.0 as usize
    }

    pub const fn drawer_index(self) -> usize {
        self.0 as usize - 1
    }

    /// Every label in ascending order, i.e. the prisoners in the order they enter.
    pub fn all() -> impl Iterator<Item = Label> {
        (Self::MIN.0..=Self::MAX.0).map(Label)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelError {
    OutOfRange(usize),
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(value) => {
                write!(f, "label {value} is outside 1..={DRAWER_COUNT}")
            }
        }
    }
}

impl std::error::Error for LabelError {}
