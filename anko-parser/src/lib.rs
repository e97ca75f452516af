//! VT/xterm escape sequence state machine.
//!
//! This crate implements the parsing half of a terminal: a deterministic
//! state machine that consumes a stream of wide characters and drives an
//! [`Engine`] through well-defined actions (print runs, C0 executes, ESC /
//! CSI / OSC / DCS / SS3 / VT52 dispatches).
//!
//! The parser is designed to:
//! - Handle arbitrary chunk boundaries (streaming)
//! - Be deterministic and never crash on malformed input
//! - Preserve sequences it could not dispatch so an embedder can forward
//!   them verbatim to an attached terminal
//!
//! References:
//! - ECMA-48: https://ecma-international.org/wp-content/uploads/ECMA-48_5th_edition_june_1991.pdf
//! - A parser for DEC's ANSI-compatible video terminals: https://vt100.net/emu/dec_ansi_parser
//! - XTerm Control Sequences: https://invisible-island.net/xterm/ctlseqs/ctlseqs.pdf

mod engine;
mod machine;
mod params;
mod scan;
mod utf8;
pub mod vtid;

pub use engine::{Engine, StringHandler};
pub use machine::{Parser, ParserMode};
pub use params::{Params, VtParameter, MAX_PARAMETER_COUNT, MAX_PARAMETER_VALUE, MAX_SUBPARAMETER_COUNT};
pub use scan::find_actionable;
pub use utf8::{trim_partial_utf8, ReadError, Utf8Reader};
pub use vtid::{VtId, VtIdBuilder};
