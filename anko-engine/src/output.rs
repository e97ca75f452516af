//! The output dispatch engine
//!
//! Maps finalized sequence identifiers and parameters onto the
//! [`TermDispatch`] surface. This is where the VT grammar stops being
//! syntax and becomes semantics: C0 controls get their conventional
//! meanings, ESC/CSI/DCS identifiers are looked up in the DEC/xterm
//! tables, and OSC payloads are picked apart.
//!
//! Empty parameters default to 1 where they mean a count or distance
//! and to 0 where they select behavior.

use anko_parser::{Engine, Params, StringHandler, VtId};
use log::{debug, trace};

use crate::codes::{csi, dcs, esc, osc as osc_codes, vt52};
use crate::dispatch::TermDispatch;
use crate::osc::{parse_clipboard, parse_color_list, parse_color_table, parse_hyperlink, ClipboardOp};
use crate::types::{CharsetSize, EraseType, LineFeedType, LineRendition, Mode, Status};

const NUL: char = '\0';
const SPACE: char = ' ';

/// Sink for sequences forwarded verbatim to an attached terminal.
pub type PassThroughSink = Box<dyn FnMut(&[char]) -> bool>;

fn charset_size(value: u16) -> CharsetSize {
    if value == 1 {
        CharsetSize::Size96
    } else {
        CharsetSize::Size94
    }
}

/// Drives a [`TermDispatch`] from parser actions.
pub struct OutputEngine<D: TermDispatch> {
    dispatch: D,
    pass_through: Option<PassThroughSink>,
    /// The most recent printed graphic character, for REP. Cleared by
    /// every non-print action.
    last_printed: char,
}

impl<D: TermDispatch> OutputEngine<D> {
    pub fn new(dispatch: D) -> Self {
        OutputEngine {
            dispatch,
            pass_through: None,
            last_printed: NUL,
        }
    }

    pub fn dispatch(&self) -> &D {
        &self.dispatch
    }

    pub fn dispatch_mut(&mut self) -> &mut D {
        &mut self.dispatch
    }

    /// Attach a terminal connection. Sequences the dispatch target does
    /// not handle are forwarded to it verbatim, including the bell.
    pub fn set_pass_through(&mut self, sink: PassThroughSink) {
        self.pass_through = Some(sink);
    }

    fn clear_last_char(&mut self) {
        self.last_printed = NUL;
    }

    /// Only SGR takes sub-parameters anywhere; DECCARA and DECRARA allow
    /// them in the attribute list that starts at parameter four.
    fn can_accept_sub_params(id: VtId, params: &Params) -> bool {
        match id.raw() {
            csi::SGR_SET_GRAPHICS_RENDITION => true,
            csi::DECCARA_CHANGE_ATTRIBUTES_RECTANGULAR_AREA
            | csi::DECRARA_REVERSE_ATTRIBUTES_RECTANGULAR_AREA => {
                (0..4).all(|i| !params.has_sub_params_for(i))
            }
            _ => false,
        }
    }

    fn osc_set_default_colors(&mut self, code: u16, payload: &str) -> bool {
        let colors = parse_color_list(payload);
        let mut success = !colors.is_empty();
        if success {
            // Consecutive codes starting at this one consume successive
            // colors: `OSC 10;fg;bg;cc` sets all three. Invalid specs
            // are skipped but still use up their slot.
            let mut command = code;
            for color in colors {
                match (command, color) {
                    (osc_codes::SET_FOREGROUND_COLOR, Some(color)) => {
                        success = success && self.dispatch.set_default_foreground(color);
                    }
                    (osc_codes::SET_BACKGROUND_COLOR, Some(color)) => {
                        success = success && self.dispatch.set_default_background(color);
                    }
                    (osc_codes::SET_CURSOR_COLOR, Some(color)) => {
                        success = success && self.dispatch.set_cursor_color(Some(color));
                    }
                    (_, None) => {}
                    _ => break,
                }
                command += 1;
            }
        }
        success
    }
}

impl<D: TermDispatch> Engine for OutputEngine<D> {
    fn execute(&mut self, ch: char) -> bool {
        match ch {
            // ENQ would need the answerback feature; ignored.
            '\u{05}' => {}
            '\u{07}' => {
                self.dispatch.warning_bell();
                if self.pass_through.is_some() {
                    // The bell is forwarded to an attached terminal as
                    // well; reporting it unhandled sends it through the
                    // parser's flush path.
                    self.clear_last_char();
                    return false;
                }
            }
            '\u{08}' => {
                self.dispatch.cursor_backward(1);
            }
            '\u{09}' => {
                self.dispatch.forward_tab(1);
            }
            '\u{0a}' | '\u{0b}' | '\u{0c}' => {
                // LF, VT and FF are identical in function.
                self.dispatch.line_feed(LineFeedType::DependsOnMode);
            }
            '\u{0d}' => {
                self.dispatch.carriage_return();
            }
            '\u{0e}' => {
                self.dispatch.locking_shift(1);
            }
            '\u{0f}' => {
                self.dispatch.locking_shift(0);
            }
            '\u{1a}' => {
                // SUB cancels like CAN but also shows an error glyph,
                // conventionally the substitute form two.
                self.dispatch.print('\u{2426}');
            }
            '\u{7f}' => {
                // DEL can become a printable glyph when a 96-character
                // set is designated; the target decides.
                self.dispatch.print(ch);
            }
            _ => {
                // Applications expect unassigned controls to do nothing.
                trace!("ignored control 0x{:02x}", ch as u32);
            }
        }

        self.clear_last_char();
        true
    }

    fn print(&mut self, ch: char) -> bool {
        if ch >= SPACE {
            self.last_printed = ch;
        }
        self.dispatch.print(ch);
        true
    }

    fn print_string(&mut self, chars: &[char]) -> bool {
        let Some(&last) = chars.last() else {
            return true;
        };
        if last >= SPACE {
            self.last_printed = last;
        }
        self.dispatch.print_string(chars);
        true
    }

    fn pass_through_string(&mut self, chars: &[char]) -> bool {
        match self.pass_through.as_mut() {
            Some(sink) => sink(chars),
            // Without a terminal connection the string is simply eaten.
            None => true,
        }
    }

    fn esc_dispatch(&mut self, id: VtId) -> bool {
        let success = match id.raw() {
            // The 7-bit string terminator on its own is a no-op.
            esc::ST_STRING_TERMINATOR => true,
            esc::DECBI_BACK_INDEX => self.dispatch.back_index(),
            esc::DECSC_CURSOR_SAVE => self.dispatch.cursor_save_state(),
            esc::DECRC_CURSOR_RESTORE => self.dispatch.cursor_restore_state(),
            esc::DECFI_FORWARD_INDEX => self.dispatch.forward_index(),
            esc::DECKPAM_KEYPAD_APPLICATION_MODE => self.dispatch.set_keypad_mode(true),
            esc::DECKPNM_KEYPAD_NUMERIC_MODE => self.dispatch.set_keypad_mode(false),
            esc::NEL_NEXT_LINE => self.dispatch.line_feed(LineFeedType::WithReturn),
            esc::IND_INDEX => self.dispatch.line_feed(LineFeedType::WithoutReturn),
            esc::RI_REVERSE_LINE_FEED => self.dispatch.reverse_line_feed(),
            esc::HTS_HORIZONTAL_TAB_SET => self.dispatch.horizontal_tab_set(),
            esc::DECID_IDENTIFY_DEVICE => self.dispatch.device_attributes(),
            esc::RIS_RESET_TO_INITIAL_STATE => self.dispatch.hard_reset(),
            esc::SS2_SINGLE_SHIFT => self.dispatch.single_shift(2),
            esc::SS3_SINGLE_SHIFT => self.dispatch.single_shift(3),
            esc::LS2_LOCKING_SHIFT => self.dispatch.locking_shift(2),
            esc::LS3_LOCKING_SHIFT => self.dispatch.locking_shift(3),
            esc::LS1R_LOCKING_SHIFT => self.dispatch.locking_shift_right(1),
            esc::LS2R_LOCKING_SHIFT => self.dispatch.locking_shift_right(2),
            esc::LS3R_LOCKING_SHIFT => self.dispatch.locking_shift_right(3),
            esc::DECAC1_ACCEPT_C1_CONTROLS => self.dispatch.accept_c1_controls(true),
            esc::ACS_ANSI_LEVEL_1 => self.dispatch.announce_code_structure(1),
            esc::ACS_ANSI_LEVEL_2 => self.dispatch.announce_code_structure(2),
            esc::ACS_ANSI_LEVEL_3 => self.dispatch.announce_code_structure(3),
            esc::DECDHL_DOUBLE_HEIGHT_TOP => {
                self.dispatch.set_line_rendition(LineRendition::DoubleHeightTop)
            }
            esc::DECDHL_DOUBLE_HEIGHT_BOTTOM => self
                .dispatch
                .set_line_rendition(LineRendition::DoubleHeightBottom),
            esc::DECSWL_SINGLE_WIDTH => {
                self.dispatch.set_line_rendition(LineRendition::SingleWidth)
            }
            esc::DECDWL_DOUBLE_WIDTH => {
                self.dispatch.set_line_rendition(LineRendition::DoubleWidth)
            }
            esc::DECALN_SCREEN_ALIGNMENT => self.dispatch.screen_alignment_pattern(),
            _ => {
                // Charset designations carry the target set in the
                // identifier tail.
                let designator = id.sub_sequence(1);
                match id.first() {
                    b'%' => self.dispatch.designate_coding_system(designator),
                    b'(' => self.dispatch.designate_94_charset(0, designator),
                    b')' => self.dispatch.designate_94_charset(1, designator),
                    b'*' => self.dispatch.designate_94_charset(2, designator),
                    b'+' => self.dispatch.designate_94_charset(3, designator),
                    b'-' => self.dispatch.designate_96_charset(1, designator),
                    b'.' => self.dispatch.designate_96_charset(2, designator),
                    b'/' => self.dispatch.designate_96_charset(3, designator),
                    _ => {
                        trace!("unhandled escape sequence ESC {id}");
                        false
                    }
                }
            }
        };

        self.clear_last_char();
        success
    }

    fn vt52_esc_dispatch(&mut self, id: VtId, params: &Params) -> bool {
        let success = match id.raw() {
            vt52::CURSOR_UP => self.dispatch.cursor_up(1),
            vt52::CURSOR_DOWN => self.dispatch.cursor_down(1),
            vt52::CURSOR_RIGHT => self.dispatch.cursor_forward(1),
            vt52::CURSOR_LEFT => self.dispatch.cursor_backward(1),
            vt52::ENTER_GRAPHICS_MODE => {
                self.dispatch.designate_94_charset(0, VtId::new(b"0"))
            }
            vt52::EXIT_GRAPHICS_MODE => self.dispatch.designate_94_charset(0, VtId::new(b"B")),
            vt52::CURSOR_TO_HOME => self.dispatch.cursor_position(1, 1),
            vt52::REVERSE_LINE_FEED => self.dispatch.reverse_line_feed(),
            vt52::ERASE_TO_END_OF_SCREEN => self.dispatch.erase_in_display(EraseType::ToEnd),
            vt52::ERASE_TO_END_OF_LINE => self.dispatch.erase_in_line(EraseType::ToEnd),
            vt52::DIRECT_CURSOR_ADDRESS => {
                // Addresses arrive as raw characters, space meaning 1.
                let line = params.at(0).value().saturating_sub(SPACE as u16 - 1);
                let column = params.at(1).value().saturating_sub(SPACE as u16 - 1);
                self.dispatch.cursor_position(line, column)
            }
            vt52::IDENTIFY => self.dispatch.vt52_device_attributes(),
            vt52::ENTER_ALTERNATE_KEYPAD_MODE => self.dispatch.set_keypad_mode(true),
            vt52::EXIT_ALTERNATE_KEYPAD_MODE => self.dispatch.set_keypad_mode(false),
            vt52::EXIT_VT52_MODE => self.dispatch.set_mode(Mode::DecPrivate(2)),
            _ => {
                trace!("unhandled VT52 sequence ESC {id}");
                false
            }
        };

        self.clear_last_char();
        success
    }

    fn csi_dispatch(&mut self, id: VtId, params: &Params) -> bool {
        // Bail out if the sequence carries sub-parameters it must not.
        if params.has_sub_params() && !Self::can_accept_sub_params(id, params) {
            return false;
        }

        let success = match id.raw() {
            csi::CUU_CURSOR_UP => self.dispatch.cursor_up(params.at(0).value_or(1)),
            csi::CUD_CURSOR_DOWN => self.dispatch.cursor_down(params.at(0).value_or(1)),
            csi::CUF_CURSOR_FORWARD => self.dispatch.cursor_forward(params.at(0).value_or(1)),
            csi::CUB_CURSOR_BACKWARD => self.dispatch.cursor_backward(params.at(0).value_or(1)),
            csi::CNL_CURSOR_NEXT_LINE => self.dispatch.cursor_next_line(params.at(0).value_or(1)),
            csi::CPL_CURSOR_PREV_LINE => self.dispatch.cursor_prev_line(params.at(0).value_or(1)),
            csi::CHA_CURSOR_HORIZONTAL_ABSOLUTE | csi::HPA_HORIZONTAL_POSITION_ABSOLUTE => self
                .dispatch
                .cursor_horizontal_position_absolute(params.at(0).value_or(1)),
            csi::VPA_VERTICAL_LINE_POSITION_ABSOLUTE => self
                .dispatch
                .vertical_line_position_absolute(params.at(0).value_or(1)),
            csi::HPR_HORIZONTAL_POSITION_RELATIVE => self
                .dispatch
                .horizontal_position_relative(params.at(0).value_or(1)),
            csi::VPR_VERTICAL_POSITION_RELATIVE => self
                .dispatch
                .vertical_position_relative(params.at(0).value_or(1)),
            csi::CUP_CURSOR_POSITION | csi::HVP_HORIZONTAL_VERTICAL_POSITION => self
                .dispatch
                .cursor_position(params.at(0).value_or(1), params.at(1).value_or(1)),
            csi::DECSTBM_SET_TOP_BOTTOM_MARGINS => self
                .dispatch
                .set_top_bottom_scrolling_margins(params.at(0).value_or(0), params.at(1).value_or(0)),
            // Can also be ANSISYSSC, depending on the state of DECLRMM.
            csi::DECSLRM_SET_LEFT_RIGHT_MARGINS => self
                .dispatch
                .set_left_right_scrolling_margins(params.at(0).value_or(0), params.at(1).value_or(0)),
            csi::ICH_INSERT_CHARACTER => self.dispatch.insert_character(params.at(0).value_or(1)),
            csi::DCH_DELETE_CHARACTER => self.dispatch.delete_character(params.at(0).value_or(1)),
            csi::ED_ERASE_DISPLAY => params.for_each(|p| {
                self.dispatch
                    .erase_in_display(EraseType::from(p.value_or(0)))
            }),
            csi::DECSED_SELECTIVE_ERASE_DISPLAY => params.for_each(|p| {
                self.dispatch
                    .selective_erase_in_display(EraseType::from(p.value_or(0)))
            }),
            csi::EL_ERASE_LINE => params.for_each(|p| {
                self.dispatch.erase_in_line(EraseType::from(p.value_or(0)))
            }),
            csi::DECSEL_SELECTIVE_ERASE_LINE => params.for_each(|p| {
                self.dispatch
                    .selective_erase_in_line(EraseType::from(p.value_or(0)))
            }),
            csi::SM_SET_MODE => params.for_each(|p| {
                self.dispatch.set_mode(Mode::AnsiStandard(p.value_or(0)))
            }),
            csi::DECSET_PRIVATE_MODE_SET => params.for_each(|p| {
                self.dispatch.set_mode(Mode::DecPrivate(p.value_or(0)))
            }),
            csi::RM_RESET_MODE => params.for_each(|p| {
                self.dispatch.reset_mode(Mode::AnsiStandard(p.value_or(0)))
            }),
            csi::DECRST_PRIVATE_MODE_RESET => params.for_each(|p| {
                self.dispatch.reset_mode(Mode::DecPrivate(p.value_or(0)))
            }),
            csi::SGR_SET_GRAPHICS_RENDITION => self.dispatch.set_graphics_rendition(params),
            csi::DSR_DEVICE_STATUS_REPORT => self
                .dispatch
                .device_status_report(Status::AnsiStandard(params.at(0).value_or(0)), params.at(1)),
            csi::DSR_PRIVATE_DEVICE_STATUS_REPORT => self
                .dispatch
                .device_status_report(Status::DecPrivate(params.at(0).value_or(0)), params.at(1)),
            csi::DA_DEVICE_ATTRIBUTES => {
                params.at(0).value_or(0) == 0 && self.dispatch.device_attributes()
            }
            csi::DA2_SECONDARY_DEVICE_ATTRIBUTES => {
                params.at(0).value_or(0) == 0 && self.dispatch.secondary_device_attributes()
            }
            csi::DA3_TERTIARY_DEVICE_ATTRIBUTES => {
                params.at(0).value_or(0) == 0 && self.dispatch.tertiary_device_attributes()
            }
            csi::DECREQTPARM_REQUEST_TERMINAL_PARAMETERS => self
                .dispatch
                .request_terminal_parameters(params.at(0).value_or(0)),
            csi::SU_SCROLL_UP => self.dispatch.scroll_up(params.at(0).value_or(1)),
            csi::SD_SCROLL_DOWN => self.dispatch.scroll_down(params.at(0).value_or(1)),
            csi::NP_NEXT_PAGE => self.dispatch.next_page(params.at(0).value_or(1)),
            csi::PP_PRECEDING_PAGE => self.dispatch.preceding_page(params.at(0).value_or(1)),
            csi::ANSISYSRC_CURSOR_RESTORE => self.dispatch.cursor_restore_state(),
            csi::IL_INSERT_LINE => self.dispatch.insert_line(params.at(0).value_or(1)),
            csi::DL_DELETE_LINE => self.dispatch.delete_line(params.at(0).value_or(1)),
            csi::CHT_CURSOR_FORWARD_TAB => self.dispatch.forward_tab(params.at(0).value_or(1)),
            csi::CBT_CURSOR_BACK_TAB => self.dispatch.backwards_tab(params.at(0).value_or(1)),
            csi::TBC_TAB_CLEAR => {
                params.for_each(|p| self.dispatch.tab_clear(p.value_or(0)))
            }
            csi::DECST8C_SET_TAB_EVERY_8_COLUMNS => {
                params.for_each(|p| self.dispatch.tab_set(p))
            }
            csi::ECH_ERASE_CHARACTERS => self.dispatch.erase_characters(params.at(0).value_or(1)),
            csi::DTTERM_WINDOW_MANIPULATION => self.dispatch.window_manipulation(
                params.at(0).value_or(0),
                params.at(1),
                params.at(2),
            ),
            csi::REP_REPEAT_CHARACTER => {
                // Handled without the dispatch target: every target would
                // implement it identically in terms of PrintString.
                if self.last_printed != NUL {
                    let count = usize::from(params.at(0).value_or(1));
                    let run = vec![self.last_printed; count];
                    self.dispatch.print_string(&run);
                }
                true
            }
            csi::PPA_PAGE_POSITION_ABSOLUTE => {
                self.dispatch.page_position_absolute(params.at(0).value_or(1))
            }
            csi::PPR_PAGE_POSITION_RELATIVE => {
                self.dispatch.page_position_relative(params.at(0).value_or(1))
            }
            csi::PPB_PAGE_POSITION_BACK => {
                self.dispatch.page_position_back(params.at(0).value_or(1))
            }
            csi::DECSCUSR_SET_CURSOR_STYLE => {
                self.dispatch.set_cursor_style(params.at(0).value_or(0))
            }
            csi::DECSTR_SOFT_RESET => self.dispatch.soft_reset(),
            csi::DECSCA_SET_CHARACTER_PROTECTION_ATTRIBUTE => {
                self.dispatch.set_character_protection_attribute(params)
            }
            csi::DECRQDE_REQUEST_DISPLAYED_EXTENT => self.dispatch.request_displayed_extent(),
            csi::XT_PUSH_SGR | csi::XT_PUSH_SGR_ALIAS => {
                self.dispatch.push_graphics_rendition(params)
            }
            csi::XT_POP_SGR | csi::XT_POP_SGR_ALIAS => self.dispatch.pop_graphics_rendition(),
            csi::DECRQM_REQUEST_MODE => self
                .dispatch
                .request_mode(Mode::AnsiStandard(params.at(0).value_or(0))),
            csi::DECRQM_PRIVATE_REQUEST_MODE => self
                .dispatch
                .request_mode(Mode::DecPrivate(params.at(0).value_or(0))),
            csi::DECCARA_CHANGE_ATTRIBUTES_RECTANGULAR_AREA => {
                self.dispatch.change_attributes_rectangular_area(
                    params.at(0).value_or(1),
                    params.at(1).value_or(1),
                    params.at(2).value_or(0),
                    params.at(3).value_or(0),
                    &params.subspan(4),
                )
            }
            csi::DECRARA_REVERSE_ATTRIBUTES_RECTANGULAR_AREA => {
                self.dispatch.reverse_attributes_rectangular_area(
                    params.at(0).value_or(1),
                    params.at(1).value_or(1),
                    params.at(2).value_or(0),
                    params.at(3).value_or(0),
                    &params.subspan(4),
                )
            }
            csi::DECCRA_COPY_RECTANGULAR_AREA => self.dispatch.copy_rectangular_area(
                params.at(0).value_or(1),
                params.at(1).value_or(1),
                params.at(2).value_or(0),
                params.at(3).value_or(0),
                params.at(4).value_or(1),
                params.at(5).value_or(1),
                params.at(6).value_or(1),
                params.at(7).value_or(1),
            ),
            csi::DECRQPSR_REQUEST_PRESENTATION_STATE_REPORT => self
                .dispatch
                .request_presentation_state_report(params.at(0).value_or(0)),
            csi::DECFRA_FILL_RECTANGULAR_AREA => self.dispatch.fill_rectangular_area(
                params.at(0),
                params.at(1).value_or(1),
                params.at(2).value_or(1),
                params.at(3).value_or(0),
                params.at(4).value_or(0),
            ),
            csi::DECERA_ERASE_RECTANGULAR_AREA => self.dispatch.erase_rectangular_area(
                params.at(0).value_or(1),
                params.at(1).value_or(1),
                params.at(2).value_or(0),
                params.at(3).value_or(0),
            ),
            csi::DECSERA_SELECTIVE_ERASE_RECTANGULAR_AREA => {
                self.dispatch.selective_erase_rectangular_area(
                    params.at(0).value_or(1),
                    params.at(1).value_or(1),
                    params.at(2).value_or(0),
                    params.at(3).value_or(0),
                )
            }
            csi::DECRQUPSS_REQUEST_USER_PREFERENCE_CHARSET => {
                self.dispatch.request_user_preference_charset()
            }
            csi::DECIC_INSERT_COLUMN => self.dispatch.insert_column(params.at(0).value_or(1)),
            csi::DECDC_DELETE_COLUMN => self.dispatch.delete_column(params.at(0).value_or(1)),
            csi::DECSACE_SELECT_ATTRIBUTE_CHANGE_EXTENT => self
                .dispatch
                .select_attribute_change_extent(params.at(0).value_or(0)),
            csi::DECRQCRA_REQUEST_CHECKSUM_RECTANGULAR_AREA => {
                self.dispatch.request_checksum_rectangular_area(
                    params.at(0).value_or(0),
                    params.at(1).value_or(0),
                    params.at(2).value_or(1),
                    params.at(3).value_or(1),
                    params.at(4).value_or(0),
                    params.at(5).value_or(0),
                )
            }
            csi::DECINVM_INVOKE_MACRO => self.dispatch.invoke_macro(params.at(0).value_or(0)),
            csi::DECAC_ASSIGN_COLOR => self.dispatch.assign_color(
                params.at(0).value_or(0),
                params.at(1).value_or(0),
                params.at(2).value_or(0),
            ),
            csi::DECPS_PLAY_SOUND => self.dispatch.play_sounds(params),
            _ => {
                debug!("unhandled CSI sequence CSI {id}");
                false
            }
        };

        self.clear_last_char();
        success
    }

    fn osc_dispatch(&mut self, code: u16, payload: &str) -> bool {
        let success = match code {
            osc_codes::SET_ICON_AND_WINDOW_TITLE
            | osc_codes::SET_WINDOW_ICON
            | osc_codes::SET_WINDOW_TITLE
            | osc_codes::DECSWT_SET_WINDOW_TITLE => self.dispatch.set_window_title(payload),
            osc_codes::SET_COLOR => {
                let entries = parse_color_table(payload);
                let mut success = !entries.is_empty();
                for (index, color) in entries {
                    success = success && self.dispatch.set_color_table_entry(index, color);
                }
                success
            }
            osc_codes::SET_FOREGROUND_COLOR
            | osc_codes::SET_BACKGROUND_COLOR
            | osc_codes::SET_CURSOR_COLOR => self.osc_set_default_colors(code, payload),
            osc_codes::SET_CLIPBOARD => match parse_clipboard(payload) {
                // Clipboard queries are accepted but answered elsewhere.
                Some(ClipboardOp::Query) => true,
                Some(ClipboardOp::Set(content)) => self.dispatch.set_clipboard(&content),
                None => false,
            },
            osc_codes::RESET_CURSOR_COLOR => self.dispatch.set_cursor_color(None),
            osc_codes::HYPERLINK => match parse_hyperlink(payload) {
                Some((id, uri)) => {
                    if uri.is_empty() {
                        self.dispatch.end_hyperlink()
                    } else {
                        self.dispatch.add_hyperlink(&uri, &id)
                    }
                }
                None => false,
            },
            osc_codes::CONEMU_ACTION => self.dispatch.do_con_emu_action(payload),
            osc_codes::ITERM2_ACTION => self.dispatch.do_iterm2_action(payload),
            osc_codes::FINAL_TERM_ACTION => self.dispatch.do_final_term_action(payload),
            osc_codes::VSCODE_ACTION => self.dispatch.do_vs_code_action(payload),
            _ => {
                debug!("unhandled OSC {code}");
                false
            }
        };

        self.clear_last_char();
        success
    }

    fn ss3_dispatch(&mut self, _ch: char, _params: &Params) -> bool {
        // The output engine has no SS3 sequences.
        self.clear_last_char();
        false
    }

    fn dcs_dispatch(&mut self, id: VtId, params: &Params) -> Option<StringHandler> {
        let handler = match id.raw() {
            dcs::DECDLD_DOWNLOAD_DRCS => self.dispatch.download_drcs(
                params.at(0).value_or(1),
                params.at(1),
                params.at(2).value_or(0),
                params.at(3).value_or(0),
                params.at(4).value_or(0),
                params.at(5).value_or(0),
                params.at(6),
                charset_size(params.at(7).value_or(0)),
            ),
            dcs::DECAUPSS_ASSIGN_USER_PREFERENCE_CHARSET => self
                .dispatch
                .assign_user_preference_charset(charset_size(params.at(0).value_or(0))),
            dcs::DECDMAC_DEFINE_MACRO => self.dispatch.define_macro(
                params.at(0).value_or(0),
                params.at(1).value_or(0),
                params.at(2).value_or(0),
            ),
            dcs::DECRSTS_RESTORE_TERMINAL_STATE => self
                .dispatch
                .restore_terminal_state(params.at(0).value_or(0)),
            dcs::DECRQSS_REQUEST_SETTING => self.dispatch.request_setting(),
            dcs::DECRSPS_RESTORE_PRESENTATION_STATE => self
                .dispatch
                .restore_presentation_state(params.at(0).value_or(0)),
            _ => {
                debug!("unhandled DCS sequence DCS {id}");
                None
            }
        };

        self.clear_last_char();
        handler
    }

    fn has_pass_through(&self) -> bool {
        self.pass_through.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records the printable output and a few interesting operations.
    #[derive(Default)]
    struct Probe {
        printed: String,
        bells: usize,
        titles: Vec<String>,
        modes: Vec<Mode>,
        handled: bool,
    }

    impl TermDispatch for Probe {
        fn print(&mut self, ch: char) {
            self.printed.push(ch);
        }

        fn print_string(&mut self, chars: &[char]) {
            self.printed.extend(chars);
        }

        fn warning_bell(&mut self) -> bool {
            self.bells += 1;
            true
        }

        fn set_window_title(&mut self, title: &str) -> bool {
            self.titles.push(title.to_string());
            true
        }

        fn set_mode(&mut self, mode: Mode) -> bool {
            self.modes.push(mode);
            true
        }

        fn cursor_up(&mut self, _distance: u16) -> bool {
            self.handled
        }

        fn set_graphics_rendition(&mut self, _options: &Params) -> bool {
            true
        }
    }

    fn sgr_id() -> VtId {
        VtId::new(b"m")
    }

    #[test]
    fn test_rep_repeats_last_char() {
        let mut engine = OutputEngine::new(Probe::default());
        engine.print_string(&['Q']);
        assert!(engine.csi_dispatch(VtId::new(b"b"), &Params::from_values(&[5])));
        assert_eq!(engine.dispatch().printed, "QQQQQQ");
    }

    #[test]
    fn test_rep_without_prior_print_is_silent_success() {
        let mut engine = OutputEngine::new(Probe::default());
        assert!(engine.csi_dispatch(VtId::new(b"b"), &Params::from_values(&[5])));
        assert_eq!(engine.dispatch().printed, "");
    }

    #[test]
    fn test_dispatch_clears_last_char() {
        let mut engine = OutputEngine::new(Probe::default());
        engine.print_string(&['Q']);
        // An SGR in between clears the repeat character.
        engine.csi_dispatch(sgr_id(), &Params::from_values(&[0]));
        engine.csi_dispatch(VtId::new(b"b"), &Params::from_values(&[3]));
        assert_eq!(engine.dispatch().printed, "Q");
    }

    #[test]
    fn test_execute_clears_last_char() {
        let mut engine = OutputEngine::new(Probe::default());
        engine.print_string(&['Q']);
        engine.execute('\u{0d}');
        engine.csi_dispatch(VtId::new(b"b"), &Params::new());
        assert_eq!(engine.dispatch().printed, "Q");
    }

    #[test]
    fn test_sub_params_rejected_outside_sgr() {
        let mut engine = OutputEngine::new(Probe::default());
        engine.dispatch_mut().handled = true;
        let mut params = Params::new();
        params.accumulate_digit(1);
        params.next_sub_param();
        params.accumulate_sub_digit(2);
        // CUU must not accept sub-parameters...
        assert!(!engine.csi_dispatch(VtId::new(b"A"), &params));
        // ...while SGR does.
        assert!(engine.csi_dispatch(sgr_id(), &params));
    }

    #[test]
    fn test_sub_execute_prints_error_glyph() {
        let mut engine = OutputEngine::new(Probe::default());
        engine.execute('\u{1a}');
        assert_eq!(engine.dispatch().printed, "\u{2426}");
    }

    #[test]
    fn test_bell_without_sink() {
        let mut engine = OutputEngine::new(Probe::default());
        assert!(engine.execute('\u{07}'));
        assert_eq!(engine.dispatch().bells, 1);
    }

    #[test]
    fn test_bell_with_sink_requests_pass_through() {
        let written = Rc::new(RefCell::new(String::new()));
        let sink = written.clone();
        let mut engine = OutputEngine::new(Probe::default());
        engine.set_pass_through(Box::new(move |chars| {
            sink.borrow_mut().extend(chars);
            true
        }));
        // The bell rings and the engine reports the control unhandled so
        // the parser forwards it.
        assert!(!engine.execute('\u{07}'));
        assert_eq!(engine.dispatch().bells, 1);
    }

    #[test]
    fn test_osc_window_title_codes() {
        let mut engine = OutputEngine::new(Probe::default());
        for code in [0, 1, 2, 21] {
            assert!(engine.osc_dispatch(code, "title"));
        }
        assert_eq!(engine.dispatch().titles.len(), 4);
    }

    #[test]
    fn test_exit_vt52_mode_sets_decanm() {
        let mut engine = OutputEngine::new(Probe::default());
        assert!(engine.vt52_esc_dispatch(VtId::new(b"<"), &Params::new()));
        assert_eq!(engine.dispatch().modes, vec![Mode::DecPrivate(2)]);
    }

    #[test]
    fn test_unknown_sequences_fail() {
        let mut engine = OutputEngine::new(Probe::default());
        assert!(!engine.csi_dispatch(VtId::new(b"%z"), &Params::new()));
        assert!(!engine.esc_dispatch(VtId::new(b"q")));
        assert!(!engine.osc_dispatch(9999, ""));
        assert!(engine.dcs_dispatch(VtId::new(b"z"), &Params::new()).is_none());
        assert!(!engine.ss3_dispatch('P', &Params::new()));
    }

    #[test]
    fn test_da_requires_zero_param() {
        let mut engine = OutputEngine::new(Probe::default());
        // Probe's device_attributes is unimplemented, so a default
        // parameter still reports failure, but a nonzero parameter must
        // fail without consulting the target at all.
        assert!(!engine.csi_dispatch(VtId::new(b"c"), &Params::from_values(&[1])));
    }
}
