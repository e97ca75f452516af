//! The VT state machine
//!
//! Implements the parser state machine for DEC/ANSI/XTerm escape
//! sequences, following the model described at
//! https://vt100.net/emu/dec_ansi_parser with the usual modern
//! extensions: sub-parameters (`:`), SS3 for input engines, VT52 mode,
//! OSC termination by BEL as well as ST, and C1 controls aliased to
//! their ESC-prefixed forms when the parser mode allows them.
//!
//! Two behaviors make the machine streaming-safe:
//! - In output mode a sequence left unfinished at the end of a chunk is
//!   cached, so an unrecognized sequence that straddles chunks can still
//!   be forwarded verbatim to an attached terminal.
//! - In input mode the unfinished tail is force-dispatched instead:
//!   keystrokes arrive one write at a time, and `ESC [` sitting in the
//!   CsiEntry state would otherwise swallow the next key.

use bitflags::bitflags;

use crate::engine::{Engine, StringHandler};
use crate::params::Params;
use crate::scan::find_actionable;
use crate::vtid::VtIdBuilder;

const ESC: char = '\u{1b}';
const CAN: char = '\u{18}';
const SUB: char = '\u{1a}';
const BEL: char = '\u{07}';
const DEL: char = '\u{7f}';

bitflags! {
    /// Toggles that change how the byte stream is interpreted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParserMode: u8 {
        /// Treat 0x80..=0x9F as C1 control codes. Off by default: some
        /// code pages map real glyphs into that range, and those must
        /// not trigger escape sequences.
        const ACCEPT_C1 = 1 << 0;
        /// As `ACCEPT_C1`, but owned by the embedder rather than the
        /// application (DECAC1 toggles `ACCEPT_C1` only).
        const ALWAYS_ACCEPT_C1 = 1 << 1;
        /// Full ANSI parsing. When off, the machine is a VT52.
        const ANSI = 1 << 2;
    }
}

impl Default for ParserMode {
    fn default() -> Self {
        ParserMode::ANSI
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    EscapeIntermediate,
    CsiEntry,
    CsiIntermediate,
    CsiIgnore,
    CsiParam,
    CsiSubParam,
    OscParam,
    OscString,
    OscTermination,
    Ss3Entry,
    Ss3Param,
    Vt52Param,
    DcsEntry,
    DcsIgnore,
    DcsIntermediate,
    DcsParam,
    DcsPassThrough,
    SosPmApcString,
}

fn is_c0(ch: char) -> bool {
    // CAN, SUB and ESC are handled before the per-state events.
    matches!(ch, '\u{00}'..='\u{17}' | '\u{19}' | '\u{1c}'..='\u{1f}')
}

fn is_intermediate(ch: char) -> bool {
    ('\u{20}'..='\u{2f}').contains(&ch)
}

fn is_private_marker(ch: char) -> bool {
    ('<'..='?').contains(&ch)
}

fn is_csi_final(ch: char) -> bool {
    ('@'..='~').contains(&ch)
}

fn is_esc_final(ch: char) -> bool {
    ('0'..='~').contains(&ch)
}

/// The escape sequence parser.
///
/// Feed it decoded wide characters with [`Parser::process_string`]; it
/// drives the [`Engine`] through print runs, C0 executes, and sequence
/// dispatches. One parser instance is owned by one producer and calls
/// are strictly sequential.
pub struct Parser<E: Engine> {
    engine: E,
    state: State,
    mode: ParserMode,
    identifier: VtIdBuilder,
    params: Params,
    osc_string: String,
    osc_param: u16,
    dcs_handler: Option<StringHandler>,
    /// Un-dispatched trailing sequence carried between calls in output
    /// mode, so it can be flushed to an attached terminal later.
    cached_sequence: Option<Vec<char>>,
    /// The current sequence's span in the string being processed.
    run_offset: usize,
    run_size: usize,
    cur_pos: usize,
    processing_last_character: bool,
    on_csi_complete: Option<Box<dyn FnOnce(&mut Parser<E>)>>,
}

impl<E: Engine> Parser<E> {
    pub fn new(engine: E) -> Self {
        let mut parser = Parser {
            engine,
            state: State::Ground,
            mode: ParserMode::default(),
            identifier: VtIdBuilder::new(),
            params: Params::new(),
            osc_string: String::new(),
            osc_param: 0,
            dcs_handler: None,
            cached_sequence: None,
            run_offset: 0,
            run_size: 0,
            cur_pos: 0,
            processing_last_character: false,
            on_csi_complete: None,
        };
        parser.action_clear();
        parser
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn set_parser_mode(&mut self, mode: ParserMode, enabled: bool) {
        self.mode.set(mode, enabled);
    }

    pub fn parser_mode(&self, mode: ParserMode) -> bool {
        self.mode.contains(mode)
    }

    /// Whether the character currently being processed is the last of
    /// the present chunk. Engines use this to batch responses.
    pub fn processing_last_character(&self) -> bool {
        self.processing_last_character
    }

    /// Register a callback to run once the current CSI sequence has been
    /// dispatched and the machine is back in the ground state. The
    /// callback may feed more input into the parser.
    pub fn on_csi_complete(&mut self, callback: impl FnOnce(&mut Parser<E>) + 'static) {
        self.on_csi_complete = Some(Box::new(callback));
    }

    /// Abandon any partial sequence and return to the ground state.
    pub fn reset(&mut self) {
        self.enter_ground();
    }

    /// Process one chunk of decoded characters.
    pub fn process_string(&mut self, chars: &[char]) {
        let len = chars.len();
        let mut i = 0;
        self.run_offset = 0;
        self.run_size = 0;

        while i < len {
            if self.state == State::Ground {
                // Fast path: emit the upcoming printable run in bulk.
                self.run_offset = i;
                self.run_size = find_actionable(&chars[i..]);
                if self.run_size != 0 {
                    self.action_print_string(chars);
                    i += self.run_size;
                    self.run_offset = i;
                    self.run_size = 0;
                    if i >= len {
                        break;
                    }
                }
            }

            // Slow path: per-character transitions until we return to
            // the ground state.
            self.cur_pos = i;
            loop {
                self.run_size += 1;
                self.processing_last_character = self.cur_pos + 1 >= len;
                self.process_character(chars, chars[self.cur_pos]);
                self.cur_pos += 1;
                if self.cur_pos >= len || self.state == State::Ground {
                    break;
                }
            }
            i = self.cur_pos;
        }

        if self.state != State::Ground {
            if self.engine.is_input() {
                self.force_dispatch_tail(chars);
            } else if !matches!(
                self.state,
                State::SosPmApcString | State::DcsPassThrough | State::DcsIgnore
            ) {
                // Cache the partial sequence in case it has to be
                // flushed to the terminal later. The string states
                // consume their data as it arrives, so there is nothing
                // to cache for them.
                let run = &chars[self.run_offset..self.run_offset + self.run_size];
                self.cached_sequence
                    .get_or_insert_with(Vec::new)
                    .extend_from_slice(run);
            }
        }
    }

    /// Input engines cannot leave a sequence pending: each keystroke is
    /// its own write, so `ESC [` sitting un-dispatched would corrupt the
    /// next key. Re-process the tail and force a dispatch on its last
    /// character.
    fn force_dispatch_tail(&mut self, chars: &[char]) {
        let run: Vec<char> = chars[self.run_offset..self.run_offset + self.run_size].to_vec();
        self.enter_ground();
        self.processing_last_character = false;

        let Some((&last, head)) = run.split_last() else {
            return;
        };
        for &ch in head {
            // Single-character views: the digit lookahead must not read
            // past the character being replayed.
            self.run_offset = 0;
            self.run_size = 1;
            self.cur_pos = 0;
            self.process_character(std::slice::from_ref(&ch), ch);
        }

        self.processing_last_character = true;
        self.run_offset = 0;
        self.run_size = 1;
        self.cur_pos = 0;
        let view = std::slice::from_ref(&last);
        match self.state {
            State::Ground => self.action_execute(view, last),
            State::Escape | State::EscapeIntermediate => self.action_esc_dispatch(view, last),
            State::CsiEntry
            | State::CsiIntermediate
            | State::CsiIgnore
            | State::CsiParam
            | State::CsiSubParam => self.action_csi_dispatch(view, last),
            State::OscParam | State::OscString | State::OscTermination => {
                self.action_osc_dispatch(view)
            }
            State::Ss3Entry | State::Ss3Param => self.action_ss3_dispatch(last),
            _ => {}
        }
        self.enter_ground();
    }

    fn process_character(&mut self, view: &[char], ch: char) {
        if ('\u{80}'..='\u{9f}').contains(&ch) {
            // C1 controls alias to ESC + (byte - 0x40), but only when C1
            // parsing was requested; otherwise they are ignored so that
            // stray high bytes cannot trigger sequences.
            if self
                .mode
                .intersects(ParserMode::ACCEPT_C1 | ParserMode::ALWAYS_ACCEPT_C1)
            {
                self.proceed(view, ESC);
                self.proceed(view, (ch as u8 - 0x40) as char);
            }
            return;
        }
        self.proceed(view, ch);
    }

    fn proceed(&mut self, view: &[char], ch: char) {
        // From-anywhere events come first.
        match ch {
            CAN | SUB => {
                self.action_interrupt();
                self.action_execute(view, ch);
                self.enter_ground();
                return;
            }
            ESC if !matches!(self.state, State::OscString | State::OscTermination) => {
                self.action_interrupt();
                self.enter_escape();
                return;
            }
            _ => {}
        }

        match self.state {
            State::Ground => self.event_ground(view, ch),
            State::Escape => self.event_escape(view, ch),
            State::EscapeIntermediate => self.event_escape_intermediate(view, ch),
            State::CsiEntry => self.event_csi_entry(view, ch),
            State::CsiIntermediate => self.event_csi_intermediate(view, ch),
            State::CsiIgnore => self.event_csi_ignore(view, ch),
            State::CsiParam => self.event_csi_param(view, ch),
            State::CsiSubParam => self.event_csi_sub_param(view, ch),
            State::OscParam => self.event_osc_param(view, ch),
            State::OscString => self.event_osc_string(view, ch),
            State::OscTermination => self.event_osc_termination(view, ch),
            State::Ss3Entry => self.event_ss3_entry(view, ch),
            State::Ss3Param => self.event_ss3_param(view, ch),
            State::Vt52Param => self.event_vt52_param(view, ch),
            State::DcsEntry => self.event_dcs_entry(view, ch),
            State::DcsIgnore => {}
            State::DcsIntermediate => self.event_dcs_intermediate(view, ch),
            State::DcsParam => self.event_dcs_param(view, ch),
            State::DcsPassThrough => self.event_dcs_pass_through(ch),
            State::SosPmApcString => {}
        }
    }

    // --- state events ---

    fn event_ground(&mut self, view: &[char], ch: char) {
        if is_c0(ch) || ch == DEL {
            self.action_execute(view, ch);
        } else {
            let _ = self.engine.print(ch);
        }
    }

    fn event_escape(&mut self, view: &[char], ch: char) {
        if is_c0(ch) {
            if self.engine.is_input() {
                self.action_execute_from_escape(view, ch);
                self.enter_ground();
            } else {
                self.action_execute(view, ch);
            }
        } else if ch == DEL {
            // ignore
        } else if is_intermediate(ch) {
            self.identifier.add_intermediate(ch);
            self.state = State::EscapeIntermediate;
        } else if self.mode.contains(ParserMode::ANSI) {
            match ch {
                '[' => self.enter_csi_entry(),
                ']' => self.enter_osc_param(),
                'P' => self.enter_dcs_entry(),
                'X' | '^' | '_' => self.state = State::SosPmApcString,
                'O' if self.engine.is_input() => self.state = State::Ss3Entry,
                c if is_esc_final(c) => {
                    self.action_esc_dispatch(view, c);
                    self.enter_ground();
                }
                _ => {}
            }
        } else if ch == 'Y' {
            self.state = State::Vt52Param;
        } else if is_esc_final(ch) {
            self.action_vt52_esc_dispatch(view, ch);
            self.enter_ground();
        }
    }

    fn event_escape_intermediate(&mut self, view: &[char], ch: char) {
        if is_c0(ch) {
            self.action_execute(view, ch);
        } else if ch == DEL {
            // ignore
        } else if is_intermediate(ch) {
            self.identifier.add_intermediate(ch);
        } else if is_esc_final(ch) {
            if self.mode.contains(ParserMode::ANSI) {
                self.action_esc_dispatch(view, ch);
            } else {
                self.action_vt52_esc_dispatch(view, ch);
            }
            self.enter_ground();
        }
    }

    fn event_csi_entry(&mut self, view: &[char], ch: char) {
        if is_c0(ch) {
            self.action_execute(view, ch);
        } else if ch == DEL {
            // ignore
        } else if ch.is_ascii_digit() {
            self.action_param_digits(view, ch);
            self.state = State::CsiParam;
        } else if ch == ';' {
            self.params.next_param();
            self.state = State::CsiParam;
        } else if ch == ':' {
            self.params.next_sub_param();
            self.state = State::CsiSubParam;
        } else if is_private_marker(ch) {
            self.identifier.add_intermediate(ch);
            self.state = State::CsiParam;
        } else if is_intermediate(ch) {
            self.identifier.add_intermediate(ch);
            self.state = State::CsiIntermediate;
        } else if is_csi_final(ch) {
            self.action_csi_dispatch(view, ch);
            self.enter_ground();
            self.execute_csi_complete_callback();
        } else {
            self.state = State::CsiIgnore;
        }
    }

    fn event_csi_param(&mut self, view: &[char], ch: char) {
        if is_c0(ch) {
            self.action_execute(view, ch);
        } else if ch == DEL {
            // ignore
        } else if ch.is_ascii_digit() {
            self.action_param_digits(view, ch);
        } else if ch == ';' {
            self.params.next_param();
        } else if ch == ':' {
            self.params.next_sub_param();
            self.state = State::CsiSubParam;
        } else if is_private_marker(ch) {
            self.state = State::CsiIgnore;
        } else if is_intermediate(ch) {
            self.identifier.add_intermediate(ch);
            self.state = State::CsiIntermediate;
        } else if is_csi_final(ch) {
            self.action_csi_dispatch(view, ch);
            self.enter_ground();
            self.execute_csi_complete_callback();
        } else {
            self.state = State::CsiIgnore;
        }
    }

    fn event_csi_sub_param(&mut self, view: &[char], ch: char) {
        if is_c0(ch) {
            self.action_execute(view, ch);
        } else if ch == DEL {
            // ignore
        } else if ch.is_ascii_digit() {
            self.params
                .accumulate_sub_digit(ch as u16 - '0' as u16);
        } else if ch == ':' {
            self.params.next_sub_param();
        } else if ch == ';' {
            self.params.next_param();
            self.state = State::CsiParam;
        } else if is_private_marker(ch) {
            self.state = State::CsiIgnore;
        } else if is_intermediate(ch) {
            self.identifier.add_intermediate(ch);
            self.state = State::CsiIntermediate;
        } else if is_csi_final(ch) {
            self.action_csi_dispatch(view, ch);
            self.enter_ground();
            self.execute_csi_complete_callback();
        } else {
            self.state = State::CsiIgnore;
        }
    }

    fn event_csi_intermediate(&mut self, view: &[char], ch: char) {
        if is_c0(ch) {
            self.action_execute(view, ch);
        } else if ch == DEL {
            // ignore
        } else if is_intermediate(ch) {
            self.identifier.add_intermediate(ch);
        } else if is_csi_final(ch) {
            self.action_csi_dispatch(view, ch);
            self.enter_ground();
            self.execute_csi_complete_callback();
        } else {
            self.state = State::CsiIgnore;
        }
    }

    fn event_csi_ignore(&mut self, view: &[char], ch: char) {
        if is_c0(ch) {
            self.action_execute(view, ch);
        } else if is_csi_final(ch) {
            self.enter_ground();
        }
    }

    fn event_osc_param(&mut self, view: &[char], ch: char) {
        if ch == BEL {
            self.action_osc_dispatch(view);
            self.enter_ground();
        } else if ch.is_ascii_digit() {
            let digit = ch as u16 - '0' as u16;
            self.osc_param = (u32::from(self.osc_param) * 10 + u32::from(digit))
                .min(u32::from(crate::params::MAX_PARAMETER_VALUE))
                as u16;
        } else if ch == ';' {
            self.state = State::OscString;
        }
        // Everything else is ignored.
    }

    fn event_osc_string(&mut self, view: &[char], ch: char) {
        if ch == BEL {
            self.action_osc_dispatch(view);
            self.enter_ground();
        } else if ch == ESC {
            self.state = State::OscTermination;
        } else if is_c0(ch) {
            // ignore
        } else {
            self.osc_string.push(ch);
        }
    }

    /// An ESC arrived inside an OSC string. An ST (`ESC \`) is the
    /// well-formed terminator; anything else still dispatches the OSC
    /// and is then processed as the start of a new escape sequence.
    fn event_osc_termination(&mut self, view: &[char], ch: char) {
        self.action_osc_dispatch(view);
        if ch == '\\' {
            self.enter_ground();
        } else {
            self.enter_escape();
            self.event_escape(view, ch);
        }
    }

    fn event_ss3_entry(&mut self, view: &[char], ch: char) {
        if is_c0(ch) {
            self.action_execute(view, ch);
        } else if ch == DEL {
            // ignore
        } else if ch.is_ascii_digit() {
            self.action_param_digits(view, ch);
            self.state = State::Ss3Param;
        } else if ch == ';' {
            self.params.next_param();
            self.state = State::Ss3Param;
        } else if is_csi_final(ch) {
            self.action_ss3_dispatch(ch);
            self.enter_ground();
        } else {
            self.state = State::CsiIgnore;
        }
    }

    fn event_ss3_param(&mut self, view: &[char], ch: char) {
        if is_c0(ch) {
            self.action_execute(view, ch);
        } else if ch == DEL {
            // ignore
        } else if ch.is_ascii_digit() {
            self.action_param_digits(view, ch);
        } else if ch == ';' {
            self.params.next_param();
        } else if is_csi_final(ch) {
            self.action_ss3_dispatch(ch);
            self.enter_ground();
        } else {
            self.state = State::CsiIgnore;
        }
    }

    fn event_vt52_param(&mut self, view: &[char], ch: char) {
        if is_c0(ch) {
            self.action_execute(view, ch);
        } else if ch == DEL {
            // ignore
        } else {
            // VT52 direct cursor addresses arrive as raw characters.
            self.params.push_value((ch as u32).min(65535) as u16);
            if self.params.len() == 2 {
                self.action_vt52_esc_dispatch(view, 'Y');
                self.enter_ground();
            }
        }
    }

    fn event_dcs_entry(&mut self, view: &[char], ch: char) {
        if is_c0(ch) || ch == DEL {
            // ignore
        } else if ch.is_ascii_digit() {
            self.action_param_digits(view, ch);
            self.state = State::DcsParam;
        } else if ch == ';' {
            self.params.next_param();
            self.state = State::DcsParam;
        } else if is_private_marker(ch) {
            self.identifier.add_intermediate(ch);
            self.state = State::DcsParam;
        } else if is_intermediate(ch) {
            self.identifier.add_intermediate(ch);
            self.state = State::DcsIntermediate;
        } else if is_csi_final(ch) {
            self.action_dcs_dispatch(ch);
        } else {
            self.state = State::DcsIgnore;
        }
    }

    fn event_dcs_param(&mut self, view: &[char], ch: char) {
        if is_c0(ch) || ch == DEL {
            // ignore
        } else if ch.is_ascii_digit() {
            self.action_param_digits(view, ch);
        } else if ch == ';' {
            self.params.next_param();
        } else if is_intermediate(ch) {
            self.identifier.add_intermediate(ch);
            self.state = State::DcsIntermediate;
        } else if is_csi_final(ch) {
            self.action_dcs_dispatch(ch);
        } else {
            self.state = State::DcsIgnore;
        }
    }

    fn event_dcs_intermediate(&mut self, _view: &[char], ch: char) {
        if is_c0(ch) || ch == DEL {
            // ignore
        } else if is_intermediate(ch) {
            self.identifier.add_intermediate(ch);
        } else if is_csi_final(ch) {
            self.action_dcs_dispatch(ch);
        } else {
            self.state = State::DcsIgnore;
        }
    }

    fn event_dcs_pass_through(&mut self, ch: char) {
        if ch == DEL {
            return;
        }
        let accepted = match self.dcs_handler.as_mut() {
            Some(handler) => handler(ch),
            None => false,
        };
        if !accepted {
            self.dcs_handler = None;
            self.state = State::DcsIgnore;
        }
    }

    // --- actions ---

    /// Accumulate a digit into the current parameter, then greedily
    /// consume any digits that follow it in the input. Purely an
    /// optimization over one transition per digit.
    fn action_param_digits(&mut self, view: &[char], ch: char) {
        self.params.accumulate_digit(ch as u16 - '0' as u16);
        let mut p = self.cur_pos + 1;
        while let Some(&c) = view.get(p) {
            if !c.is_ascii_digit() {
                break;
            }
            self.params.accumulate_digit(c as u16 - '0' as u16);
            p += 1;
        }
        self.run_size += p - 1 - self.cur_pos;
        self.cur_pos = p - 1;
    }

    fn action_execute(&mut self, view: &[char], ch: char) {
        let handled = self.engine.execute(ch);
        if !handled && self.engine.has_pass_through() {
            self.flush_to_terminal(view);
        }
    }

    fn action_execute_from_escape(&mut self, view: &[char], ch: char) {
        let handled = self.engine.execute_from_escape(ch);
        if !handled && self.engine.has_pass_through() {
            self.flush_to_terminal(view);
        }
    }

    fn action_print_string(&mut self, view: &[char]) {
        let run = &view[self.run_offset..self.run_offset + self.run_size];
        let _ = self.engine.print_string(run);
    }

    fn action_esc_dispatch(&mut self, view: &[char], ch: char) {
        let id = self.identifier.finalize(ch);
        let handled = self.engine.esc_dispatch(id);
        if !handled && self.engine.has_pass_through() {
            self.flush_to_terminal(view);
        }
    }

    fn action_vt52_esc_dispatch(&mut self, _view: &[char], ch: char) {
        let id = self.identifier.finalize(ch);
        let _ = self.engine.vt52_esc_dispatch(id, &self.params);
    }

    fn action_csi_dispatch(&mut self, view: &[char], ch: char) {
        let id = self.identifier.finalize(ch);
        let handled = self.engine.csi_dispatch(id, &self.params);
        if !handled && self.engine.has_pass_through() {
            self.flush_to_terminal(view);
        }
    }

    fn action_osc_dispatch(&mut self, view: &[char]) {
        let handled = self.engine.osc_dispatch(self.osc_param, &self.osc_string);
        if !handled && self.engine.has_pass_through() {
            self.flush_to_terminal(view);
        }
    }

    fn action_ss3_dispatch(&mut self, ch: char) {
        let _ = self.engine.ss3_dispatch(ch, &self.params);
    }

    fn action_dcs_dispatch(&mut self, ch: char) {
        let id = self.identifier.finalize(ch);
        match self.engine.dcs_dispatch(id, &self.params) {
            Some(handler) => {
                self.dcs_handler = Some(handler);
                self.state = State::DcsPassThrough;
            }
            None => self.state = State::DcsIgnore,
        }
    }

    fn action_clear(&mut self) {
        self.identifier.clear();
        self.params.clear();
        self.osc_string.clear();
        self.osc_param = 0;
        self.dcs_handler = None;
        self.engine.clear();
    }

    /// The end of a data string: CAN, SUB or ESC arrived. Only DCS needs
    /// work here; the handler is told the data ended.
    fn action_interrupt(&mut self) {
        if self.state == State::DcsPassThrough {
            if let Some(mut handler) = self.dcs_handler.take() {
                handler(ESC);
            }
        }
    }

    /// Forward the cached partial sequence and then the current run to
    /// the attached terminal. The cache is cleared even on failure so
    /// bad state cannot accumulate and leak out later.
    fn flush_to_terminal(&mut self, view: &[char]) {
        let mut success = true;
        if let Some(cached) = self.cached_sequence.take() {
            success = self.engine.pass_through_string(&cached);
        }
        if success {
            let run = &view[self.run_offset..self.run_offset + self.run_size];
            let _ = self.engine.pass_through_string(run);
        }
    }

    fn execute_csi_complete_callback(&mut self) {
        if let Some(callback) = self.on_csi_complete.take() {
            // The callback may inject another string; save the cursor of
            // the one being processed. Taking the callback first makes
            // sure it cannot run twice.
            let saved = (self.run_offset, self.run_size, self.cur_pos);
            callback(self);
            (self.run_offset, self.run_size, self.cur_pos) = saved;
        }
    }

    // --- state entry ---

    fn enter_ground(&mut self) {
        self.state = State::Ground;
        // Reaching ground means the pending sequence completed, so the
        // cache of it is no longer needed.
        self.cached_sequence = None;
    }

    fn enter_escape(&mut self) {
        self.action_clear();
        self.state = State::Escape;
    }

    fn enter_csi_entry(&mut self) {
        self.action_clear();
        self.state = State::CsiEntry;
    }

    fn enter_osc_param(&mut self) {
        self.action_clear();
        self.state = State::OscParam;
    }

    fn enter_dcs_entry(&mut self) {
        self.action_clear();
        self.state = State::DcsEntry;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vtid::VtId;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Act {
        Print(char),
        PrintString(String),
        Execute(char),
        Esc(VtId),
        Vt52(VtId, Vec<u16>),
        Csi(VtId, Vec<Option<u16>>),
        CsiSub(VtId, Vec<Vec<Option<u16>>>),
        Osc(u16, String),
        Ss3(char, Vec<Option<u16>>),
        Dcs(VtId, Vec<Option<u16>>),
        PassThrough(String),
    }

    #[derive(Default)]
    struct Recorder {
        acts: Vec<Act>,
        input: bool,
        pass_through: bool,
        /// When set, every sequence dispatch reports failure.
        fail_dispatch: bool,
        /// When set, DCS headers are accepted and the data recorded here.
        dcs_data: Option<Rc<RefCell<Vec<char>>>>,
        dcs_abort_after: Option<usize>,
    }

    fn values(params: &Params) -> Vec<Option<u16>> {
        params
            .iter()
            .map(|p| if p.is_empty() { None } else { Some(p.value()) })
            .collect()
    }

    impl Engine for Recorder {
        fn execute(&mut self, ch: char) -> bool {
            self.acts.push(Act::Execute(ch));
            !self.fail_dispatch
        }

        fn print(&mut self, ch: char) -> bool {
            self.acts.push(Act::Print(ch));
            true
        }

        fn print_string(&mut self, chars: &[char]) -> bool {
            self.acts.push(Act::PrintString(chars.iter().collect()));
            true
        }

        fn pass_through_string(&mut self, chars: &[char]) -> bool {
            self.acts.push(Act::PassThrough(chars.iter().collect()));
            true
        }

        fn esc_dispatch(&mut self, id: VtId) -> bool {
            self.acts.push(Act::Esc(id));
            !self.fail_dispatch
        }

        fn vt52_esc_dispatch(&mut self, id: VtId, params: &Params) -> bool {
            self.acts
                .push(Act::Vt52(id, params.iter().map(|p| p.value()).collect()));
            true
        }

        fn csi_dispatch(&mut self, id: VtId, params: &Params) -> bool {
            if params.has_sub_params() {
                let subs = (0..params.len())
                    .map(|i| {
                        params
                            .sub_params_for(i)
                            .iter()
                            .map(|p| if p.is_empty() { None } else { Some(p.value()) })
                            .collect()
                    })
                    .collect();
                self.acts.push(Act::CsiSub(id, subs));
            }
            self.acts.push(Act::Csi(id, values(params)));
            !self.fail_dispatch
        }

        fn osc_dispatch(&mut self, code: u16, payload: &str) -> bool {
            self.acts.push(Act::Osc(code, payload.to_string()));
            !self.fail_dispatch
        }

        fn ss3_dispatch(&mut self, ch: char, params: &Params) -> bool {
            self.acts.push(Act::Ss3(ch, values(params)));
            true
        }

        fn dcs_dispatch(&mut self, id: VtId, params: &Params) -> Option<StringHandler> {
            self.acts.push(Act::Dcs(id, values(params)));
            let data = self.dcs_data.clone()?;
            let abort_after = self.dcs_abort_after;
            Some(Box::new(move |ch| {
                data.borrow_mut().push(ch);
                abort_after.map_or(true, |limit| data.borrow().len() < limit)
            }))
        }

        fn has_pass_through(&self) -> bool {
            self.pass_through
        }

        fn is_input(&self) -> bool {
            self.input
        }
    }

    fn feed(parser: &mut Parser<Recorder>, input: &str) {
        let chars: Vec<char> = input.chars().collect();
        parser.process_string(&chars);
    }

    fn parse(input: &str) -> Vec<Act> {
        let mut parser = Parser::new(Recorder::default());
        feed(&mut parser, input);
        parser.engine.acts.clone()
    }

    #[test]
    fn test_print_run() {
        assert_eq!(parse("hello"), vec![Act::PrintString("hello".into())]);
    }

    #[test]
    fn test_c0_execute() {
        assert_eq!(
            parse("\x07\x08"),
            vec![Act::Execute('\u{07}'), Act::Execute('\u{08}')]
        );
    }

    #[test]
    fn test_csi_with_params() {
        assert_eq!(
            parse("\x1b[31;1m"),
            vec![Act::Csi(VtId::new(b"m"), vec![Some(31), Some(1)])]
        );
    }

    #[test]
    fn test_csi_empty_params() {
        assert_eq!(
            parse("\x1b[;5H"),
            vec![Act::Csi(VtId::new(b"H"), vec![None, Some(5)])]
        );
    }

    #[test]
    fn test_csi_private_marker_in_id() {
        assert_eq!(
            parse("\x1b[?1049h"),
            vec![Act::Csi(VtId::new(b"?h"), vec![Some(1049)])]
        );
    }

    #[test]
    fn test_csi_intermediate_in_id() {
        assert_eq!(
            parse("\x1b[!p"),
            vec![Act::Csi(VtId::new(b"!p"), vec![])]
        );
    }

    #[test]
    fn test_csi_param_clamped() {
        assert_eq!(
            parse("\x1b[4294967295A"),
            vec![Act::Csi(VtId::new(b"A"), vec![Some(65535)])]
        );
    }

    #[test]
    fn test_csi_sub_params() {
        assert_eq!(
            parse("\x1b[38:2::255:128:0m"),
            vec![
                Act::CsiSub(
                    VtId::new(b"m"),
                    vec![vec![Some(2), None, Some(255), Some(128), Some(0)]],
                ),
                Act::Csi(VtId::new(b"m"), vec![Some(38)]),
            ]
        );
    }

    #[test]
    fn test_esc_dispatch() {
        assert_eq!(parse("\x1b7"), vec![Act::Esc(VtId::new(b"7"))]);
        assert_eq!(parse("\x1b#8"), vec![Act::Esc(VtId::new(b"#8"))]);
    }

    #[test]
    fn test_c0_inside_csi_executes_without_abort() {
        assert_eq!(
            parse("\x1b[1\x0a2H"),
            vec![
                Act::Execute('\u{0a}'),
                Act::Csi(VtId::new(b"H"), vec![Some(12)]),
            ]
        );
    }

    #[test]
    fn test_can_aborts_sequence() {
        assert_eq!(
            parse("\x1b[12\x18A"),
            vec![Act::Execute('\u{18}'), Act::PrintString("A".into())]
        );
    }

    #[test]
    fn test_esc_restarts_sequence() {
        assert_eq!(
            parse("\x1b[12\x1b[2J"),
            vec![Act::Csi(VtId::new(b"J"), vec![Some(2)])]
        );
    }

    #[test]
    fn test_osc_bel_terminated() {
        assert_eq!(
            parse("\x1b]0;hello\x07"),
            vec![Act::Osc(0, "hello".into())]
        );
    }

    #[test]
    fn test_osc_st_terminated() {
        assert_eq!(
            parse("\x1b]2;a;b\x1b\\"),
            vec![Act::Osc(2, "a;b".into())]
        );
    }

    #[test]
    fn test_osc_c1_st_terminated() {
        let mut parser = Parser::new(Recorder::default());
        parser.set_parser_mode(ParserMode::ACCEPT_C1, true);
        feed(&mut parser, "\x1b]0;hi\u{9c}");
        assert_eq!(parser.engine.acts, vec![Act::Osc(0, "hi".into())]);
    }

    #[test]
    fn test_c1_csi() {
        let mut parser = Parser::new(Recorder::default());
        parser.set_parser_mode(ParserMode::ACCEPT_C1, true);
        feed(&mut parser, "\u{9b}31m");
        assert_eq!(
            parser.engine.acts,
            vec![Act::Csi(VtId::new(b"m"), vec![Some(31)])]
        );
    }

    #[test]
    fn test_c1_ignored_by_default() {
        assert_eq!(parse("a\u{9b}31mb"), vec![
            Act::PrintString("a".into()),
            Act::PrintString("31mb".into()),
        ]);
    }

    #[test]
    fn test_chunked_csi() {
        let mut parser = Parser::new(Recorder::default());
        feed(&mut parser, "\x1b[");
        assert!(parser.engine.acts.is_empty());
        feed(&mut parser, "2J");
        assert_eq!(
            parser.engine.acts,
            vec![Act::Csi(VtId::new(b"J"), vec![Some(2)])]
        );
        assert!(parser.cached_sequence.is_none());
    }

    #[test]
    fn test_unhandled_sequence_flushes_to_terminal() {
        let mut parser = Parser::new(Recorder {
            pass_through: true,
            fail_dispatch: true,
            ..Default::default()
        });
        feed(&mut parser, "\x1b[");
        feed(&mut parser, "25;9z");
        assert_eq!(
            parser.engine.acts,
            vec![
                Act::Csi(VtId::new(b"z"), vec![Some(25), Some(9)]),
                Act::PassThrough("\x1b[".into()),
                Act::PassThrough("25;9z".into()),
            ]
        );
        assert!(parser.cached_sequence.is_none());
    }

    #[test]
    fn test_cache_not_flushed_without_sink() {
        let mut parser = Parser::new(Recorder {
            fail_dispatch: true,
            ..Default::default()
        });
        feed(&mut parser, "\x1b[25;9z");
        assert_eq!(
            parser.engine.acts,
            vec![Act::Csi(VtId::new(b"z"), vec![Some(25), Some(9)])]
        );
    }

    #[test]
    fn test_ss3_for_input_engine() {
        let mut parser = Parser::new(Recorder {
            input: true,
            ..Default::default()
        });
        feed(&mut parser, "\x1bOP");
        assert_eq!(parser.engine.acts, vec![Act::Ss3('P', vec![])]);
    }

    #[test]
    fn test_ss3_is_esc_dispatch_for_output() {
        assert_eq!(parse("\x1bOP"), vec![
            Act::Esc(VtId::new(b"O")),
            Act::PrintString("P".into()),
        ]);
    }

    #[test]
    fn test_input_mode_force_dispatch() {
        // Alt+[ arrives as one write of `ESC [`; it must dispatch as an
        // escape sequence instead of waiting for a CSI final byte.
        let mut parser = Parser::new(Recorder {
            input: true,
            ..Default::default()
        });
        feed(&mut parser, "\x1b[");
        assert_eq!(parser.engine.acts, vec![Act::Esc(VtId::new(b"["))]);
        // And the parser is back in ground: the next key is unaffected.
        feed(&mut parser, "A");
        assert_eq!(parser.engine.acts[1..], [Act::PrintString("A".into())]);
    }

    #[test]
    fn test_input_mode_bare_escape_executes() {
        let mut parser = Parser::new(Recorder {
            input: true,
            ..Default::default()
        });
        feed(&mut parser, "\x1b");
        assert_eq!(parser.engine.acts, vec![Act::Execute('\u{1b}')]);
    }

    #[test]
    fn test_input_mode_force_csi_dispatch() {
        let mut parser = Parser::new(Recorder {
            input: true,
            ..Default::default()
        });
        feed(&mut parser, "\x1b[1;5");
        // The run is replayed and the last character dispatched as if it
        // were the final byte.
        assert_eq!(
            parser.engine.acts,
            vec![Act::Csi(VtId::new(b"5"), vec![Some(1), None])]
        );
    }

    #[test]
    fn test_vt52_esc_dispatch() {
        let mut parser = Parser::new(Recorder::default());
        parser.set_parser_mode(ParserMode::ANSI, false);
        feed(&mut parser, "\x1bA");
        assert_eq!(parser.engine.acts, vec![Act::Vt52(VtId::new(b"A"), vec![])]);
    }

    #[test]
    fn test_vt52_direct_cursor_address() {
        let mut parser = Parser::new(Recorder::default());
        parser.set_parser_mode(ParserMode::ANSI, false);
        feed(&mut parser, "\x1bY &x");
        assert_eq!(
            parser.engine.acts,
            vec![
                Act::Vt52(VtId::new(b"Y"), vec![0x20, 0x26]),
                Act::PrintString("x".into()),
            ]
        );
    }

    #[test]
    fn test_dcs_data_string() {
        let data = Rc::new(RefCell::new(Vec::new()));
        let mut parser = Parser::new(Recorder {
            dcs_data: Some(data.clone()),
            ..Default::default()
        });
        feed(&mut parser, "\x1bP1$qm\x1b\\");
        assert_eq!(
            parser.engine.acts,
            vec![
                Act::Dcs(VtId::new(b"$q"), vec![Some(1)]),
                // The trailing `\` of the ST dispatches as a plain
                // escape sequence once the data string ends.
                Act::Esc(VtId::new(b"\\")),
            ]
        );
        // The handler saw the data and then the ESC end-of-data signal.
        assert_eq!(*data.borrow(), vec!['m', '\u{1b}']);
    }

    #[test]
    fn test_dcs_handler_abort_enters_ignore() {
        let data = Rc::new(RefCell::new(Vec::new()));
        let mut parser = Parser::new(Recorder {
            dcs_data: Some(data.clone()),
            dcs_abort_after: Some(1),
            ..Default::default()
        });
        feed(&mut parser, "\x1bP$qabcdef\x1b\\xyz");
        assert_eq!(*data.borrow(), vec!['a']);
        assert_eq!(
            parser.engine.acts.last(),
            Some(&Act::PrintString("xyz".into()))
        );
    }

    #[test]
    fn test_unsupported_dcs_ignored() {
        // No handler: everything up to ST is discarded.
        assert_eq!(
            parse("\x1bPzjunk\x1b\\ok"),
            vec![Act::Dcs(VtId::new(b"z"), vec![]), Act::Esc(VtId::new(b"\\")), Act::PrintString("ok".into())]
        );
    }

    #[test]
    fn test_sos_pm_apc_discarded() {
        assert_eq!(
            parse("\x1bXsecret\x1b\\ok"),
            vec![Act::Esc(VtId::new(b"\\")), Act::PrintString("ok".into())]
        );
    }

    #[test]
    fn test_greedy_digits_match_per_char_feed() {
        let whole = parse("\x1b[123;456H");
        let mut parser = Parser::new(Recorder::default());
        for ch in "\x1b[123;456H".chars() {
            feed(&mut parser, &ch.to_string());
        }
        assert_eq!(whole, parser.engine.acts);
    }

    #[test]
    fn test_csi_complete_callback_reentrancy() {
        let mut parser = Parser::new(Recorder::default());
        parser.on_csi_complete(|p| feed(p, "\x1b[2J"));
        feed(&mut parser, "\x1b[0mtail");
        assert_eq!(
            parser.engine.acts,
            vec![
                Act::Csi(VtId::new(b"m"), vec![Some(0)]),
                Act::Csi(VtId::new(b"J"), vec![Some(2)]),
                Act::PrintString("tail".into()),
            ]
        );
        // The callback is one-shot.
        feed(&mut parser, "\x1b[1m");
        assert_eq!(
            parser.engine.acts.last(),
            Some(&Act::Csi(VtId::new(b"m"), vec![Some(1)]))
        );
    }
}
