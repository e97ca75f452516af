//! Typed dispatch vocabulary
//!
//! Parameters that select behavior (rather than counts) get small enums
//! so dispatch targets do not re-derive their meaning from raw numbers.
//! Unknown selector values are preserved rather than rejected; whether
//! they mean anything is the target's call.

/// How a line feed moves the cursor column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFeedType {
    /// Obey the line feed/new line mode (LF, FF, VT).
    DependsOnMode,
    /// Always return to column 1 (NEL).
    WithReturn,
    /// Never move the column (IND).
    WithoutReturn,
}

/// The region selector shared by ED/EL and their selective variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseType {
    /// From the cursor to the end of the display/line.
    ToEnd,
    /// From the beginning of the display/line to the cursor.
    FromBeginning,
    /// The whole display/line.
    All,
    /// The scrollback buffer (xterm extension to ED).
    Scrollback,
    Other(u16),
}

impl From<u16> for EraseType {
    fn from(value: u16) -> Self {
        match value {
            0 => EraseType::ToEnd,
            1 => EraseType::FromBeginning,
            2 => EraseType::All,
            3 => EraseType::Scrollback,
            other => EraseType::Other(other),
        }
    }
}

/// A mode number, tagged with how it was introduced: `CSI Pm h` sets an
/// ANSI standard mode, `CSI ? Pm h` a DEC private mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    AnsiStandard(u16),
    DecPrivate(u16),
}

/// A status request, tagged the same way as [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    AnsiStandard(u16),
    DecPrivate(u16),
}

/// Line renditions selected by DECSWL/DECDWL/DECDHL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRendition {
    SingleWidth,
    DoubleWidth,
    DoubleHeightTop,
    DoubleHeightBottom,
}

/// Whether a charset designator names a 94- or 96-character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetSize {
    Size94,
    Size96,
}
