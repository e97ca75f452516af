//! The state-machine / engine seam
//!
//! The parser knows nothing about terminal semantics; every decoded
//! action is handed to an [`Engine`]. The output engine in `anko-engine`
//! turns these into typed dispatch calls; tests plug in recorders.

use crate::params::Params;
use crate::vtid::VtId;

/// Consumes the characters of a DCS data string one at a time. Returning
/// `false` aborts the string (the parser ignores the remainder). The
/// handler is invoked with ESC (0x1B) to signal end of data.
pub type StringHandler = Box<dyn FnMut(char) -> bool>;

/// Receiver for parser actions.
///
/// Dispatch methods return `true` when the sequence was handled. A
/// `false` return from a sequence dispatch makes the parser forward the
/// raw sequence to the pass-through sink, if the engine reports one via
/// [`Engine::has_pass_through`].
pub trait Engine {
    /// A C0 control encountered in the ground state (or inside a
    /// sequence, where C0 controls execute without aborting it).
    fn execute(&mut self, ch: char) -> bool;

    /// A C0 control encountered immediately after ESC. Input engines
    /// treat this as Alt+key; everything else executes it normally.
    fn execute_from_escape(&mut self, ch: char) -> bool {
        self.execute(ch)
    }

    /// A single printable character.
    fn print(&mut self, ch: char) -> bool;

    /// A contiguous run of printable characters.
    fn print_string(&mut self, chars: &[char]) -> bool;

    /// Forward raw characters to the attached terminal. Only called when
    /// [`Engine::has_pass_through`] is true.
    fn pass_through_string(&mut self, chars: &[char]) -> bool;

    /// A simple escape sequence (`ESC` + optional intermediates + final).
    fn esc_dispatch(&mut self, id: VtId) -> bool;

    /// A VT52 escape sequence (parser in non-ANSI mode).
    fn vt52_esc_dispatch(&mut self, id: VtId, params: &Params) -> bool;

    /// A control sequence (`CSI ...`).
    fn csi_dispatch(&mut self, id: VtId, params: &Params) -> bool;

    /// An operating system command, terminated by BEL or ST.
    fn osc_dispatch(&mut self, code: u16, payload: &str) -> bool;

    /// An `SS3` sequence (input engines only; the output engine rejects).
    fn ss3_dispatch(&mut self, ch: char, params: &Params) -> bool;

    /// A device control string header. Returning a handler accepts the
    /// data string; `None` sends the parser to the DCS ignore state.
    fn dcs_dispatch(&mut self, id: VtId, params: &Params) -> Option<StringHandler>;

    /// The parser cleared its per-sequence state (start of a sequence).
    fn clear(&mut self) {}

    /// Whether a pass-through sink is attached. Gates the flush the
    /// parser performs when a dispatch fails.
    fn has_pass_through(&self) -> bool {
        false
    }

    /// Whether this engine consumes terminal *input* (keystrokes) rather
    /// than output. Input engines get SS3 parsing and the end-of-input
    /// force dispatch instead of the partial-sequence cache.
    fn is_input(&self) -> bool {
        false
    }
}
