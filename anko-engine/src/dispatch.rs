//! The dispatch target
//!
//! [`TermDispatch`] is the semantic surface of the terminal: one method
//! per operation the output engine can decode. Implementations live
//! outside this crate (screen buffers, renderers, recorders); every
//! method defaults to "unhandled" so a target only implements the
//! capabilities it has. An unhandled sequence is a candidate for
//! pass-through to an attached terminal.

use anko_parser::{Params, StringHandler, VtId, VtParameter};

use crate::color::Rgb;
use crate::types::{CharsetSize, EraseType, LineFeedType, LineRendition, Mode, Status};

/// Terminal operations invoked by the output engine.
///
/// `bool` returns report whether the operation was handled. The two
/// print methods cannot fail: by the time text reaches the target it is
/// already plain content.
#[allow(unused_variables)]
pub trait TermDispatch {
    // --- printing ---
    fn print(&mut self, ch: char) {}
    fn print_string(&mut self, chars: &[char]) {}

    // --- cursor movement ---
    fn cursor_up(&mut self, distance: u16) -> bool {
        false
    }
    fn cursor_down(&mut self, distance: u16) -> bool {
        false
    }
    fn cursor_forward(&mut self, distance: u16) -> bool {
        false
    }
    fn cursor_backward(&mut self, distance: u16) -> bool {
        false
    }
    fn cursor_next_line(&mut self, distance: u16) -> bool {
        false
    }
    fn cursor_prev_line(&mut self, distance: u16) -> bool {
        false
    }
    fn cursor_horizontal_position_absolute(&mut self, column: u16) -> bool {
        false
    }
    fn vertical_line_position_absolute(&mut self, line: u16) -> bool {
        false
    }
    fn horizontal_position_relative(&mut self, distance: u16) -> bool {
        false
    }
    fn vertical_position_relative(&mut self, distance: u16) -> bool {
        false
    }
    fn cursor_position(&mut self, line: u16, column: u16) -> bool {
        false
    }
    fn cursor_save_state(&mut self) -> bool {
        false
    }
    fn cursor_restore_state(&mut self) -> bool {
        false
    }

    // --- editing ---
    fn insert_character(&mut self, count: u16) -> bool {
        false
    }
    fn delete_character(&mut self, count: u16) -> bool {
        false
    }
    fn scroll_up(&mut self, distance: u16) -> bool {
        false
    }
    fn scroll_down(&mut self, distance: u16) -> bool {
        false
    }
    fn insert_line(&mut self, distance: u16) -> bool {
        false
    }
    fn delete_line(&mut self, distance: u16) -> bool {
        false
    }
    fn insert_column(&mut self, distance: u16) -> bool {
        false
    }
    fn delete_column(&mut self, distance: u16) -> bool {
        false
    }
    fn erase_in_display(&mut self, erase_type: EraseType) -> bool {
        false
    }
    fn erase_in_line(&mut self, erase_type: EraseType) -> bool {
        false
    }
    fn erase_characters(&mut self, count: u16) -> bool {
        false
    }
    fn selective_erase_in_display(&mut self, erase_type: EraseType) -> bool {
        false
    }
    fn selective_erase_in_line(&mut self, erase_type: EraseType) -> bool {
        false
    }

    // --- rectangular areas ---
    fn change_attributes_rectangular_area(
        &mut self,
        top: u16,
        left: u16,
        bottom: u16,
        right: u16,
        attrs: &Params,
    ) -> bool {
        false
    }
    fn reverse_attributes_rectangular_area(
        &mut self,
        top: u16,
        left: u16,
        bottom: u16,
        right: u16,
        attrs: &Params,
    ) -> bool {
        false
    }
    #[allow(clippy::too_many_arguments)]
    fn copy_rectangular_area(
        &mut self,
        top: u16,
        left: u16,
        bottom: u16,
        right: u16,
        page: u16,
        dst_top: u16,
        dst_left: u16,
        dst_page: u16,
    ) -> bool {
        false
    }
    fn fill_rectangular_area(
        &mut self,
        ch: VtParameter,
        top: u16,
        left: u16,
        bottom: u16,
        right: u16,
    ) -> bool {
        false
    }
    fn erase_rectangular_area(&mut self, top: u16, left: u16, bottom: u16, right: u16) -> bool {
        false
    }
    fn selective_erase_rectangular_area(
        &mut self,
        top: u16,
        left: u16,
        bottom: u16,
        right: u16,
    ) -> bool {
        false
    }
    fn select_attribute_change_extent(&mut self, extent: u16) -> bool {
        false
    }
    fn request_checksum_rectangular_area(
        &mut self,
        id: u16,
        page: u16,
        top: u16,
        left: u16,
        bottom: u16,
        right: u16,
    ) -> bool {
        false
    }

    // --- modes ---
    fn set_mode(&mut self, mode: Mode) -> bool {
        false
    }
    fn reset_mode(&mut self, mode: Mode) -> bool {
        false
    }
    fn request_mode(&mut self, mode: Mode) -> bool {
        false
    }
    fn set_keypad_mode(&mut self, application_mode: bool) -> bool {
        false
    }
    fn set_ansi_mode(&mut self, ansi_mode: bool) -> bool {
        false
    }
    fn set_top_bottom_scrolling_margins(&mut self, top: u16, bottom: u16) -> bool {
        false
    }
    fn set_left_right_scrolling_margins(&mut self, left: u16, right: u16) -> bool {
        false
    }
    fn accept_c1_controls(&mut self, enabled: bool) -> bool {
        false
    }

    // --- graphics ---
    fn set_graphics_rendition(&mut self, options: &Params) -> bool {
        false
    }
    fn push_graphics_rendition(&mut self, options: &Params) -> bool {
        false
    }
    fn pop_graphics_rendition(&mut self) -> bool {
        false
    }
    fn set_line_rendition(&mut self, rendition: LineRendition) -> bool {
        false
    }
    fn set_character_protection_attribute(&mut self, options: &Params) -> bool {
        false
    }

    // --- reports ---
    fn device_status_report(&mut self, status: Status, id: VtParameter) -> bool {
        false
    }
    fn device_attributes(&mut self) -> bool {
        false
    }
    fn secondary_device_attributes(&mut self) -> bool {
        false
    }
    fn tertiary_device_attributes(&mut self) -> bool {
        false
    }
    fn vt52_device_attributes(&mut self) -> bool {
        false
    }
    fn request_terminal_parameters(&mut self, permission: u16) -> bool {
        false
    }
    fn request_displayed_extent(&mut self) -> bool {
        false
    }
    fn request_presentation_state_report(&mut self, format: u16) -> bool {
        false
    }

    // --- character sets ---
    fn designate_coding_system(&mut self, coding_system: VtId) -> bool {
        false
    }
    fn designate_94_charset(&mut self, gset: u16, charset: VtId) -> bool {
        false
    }
    fn designate_96_charset(&mut self, gset: u16, charset: VtId) -> bool {
        false
    }
    fn locking_shift(&mut self, gset: u16) -> bool {
        false
    }
    fn locking_shift_right(&mut self, gset: u16) -> bool {
        false
    }
    fn single_shift(&mut self, gset: u16) -> bool {
        false
    }
    fn announce_code_structure(&mut self, ansi_level: u16) -> bool {
        false
    }
    fn request_user_preference_charset(&mut self) -> bool {
        false
    }
    fn assign_user_preference_charset(&mut self, size: CharsetSize) -> Option<StringHandler> {
        None
    }

    // --- resets ---
    fn soft_reset(&mut self) -> bool {
        false
    }
    fn hard_reset(&mut self) -> bool {
        false
    }
    fn screen_alignment_pattern(&mut self) -> bool {
        false
    }

    // --- line control ---
    fn warning_bell(&mut self) -> bool {
        false
    }
    fn carriage_return(&mut self) -> bool {
        false
    }
    fn line_feed(&mut self, line_feed_type: LineFeedType) -> bool {
        false
    }
    fn reverse_line_feed(&mut self) -> bool {
        false
    }
    fn back_index(&mut self) -> bool {
        false
    }
    fn forward_index(&mut self) -> bool {
        false
    }

    // --- tabs and pages ---
    fn horizontal_tab_set(&mut self) -> bool {
        false
    }
    fn forward_tab(&mut self, tab_count: u16) -> bool {
        false
    }
    fn backwards_tab(&mut self, tab_count: u16) -> bool {
        false
    }
    fn tab_clear(&mut self, clear_type: u16) -> bool {
        false
    }
    fn tab_set(&mut self, set_type: VtParameter) -> bool {
        false
    }
    fn next_page(&mut self, page_count: u16) -> bool {
        false
    }
    fn preceding_page(&mut self, page_count: u16) -> bool {
        false
    }
    fn page_position_absolute(&mut self, page: u16) -> bool {
        false
    }
    fn page_position_relative(&mut self, page_count: u16) -> bool {
        false
    }
    fn page_position_back(&mut self, page_count: u16) -> bool {
        false
    }

    // --- cursor appearance ---
    fn set_cursor_style(&mut self, style: u16) -> bool {
        false
    }
    fn set_cursor_color(&mut self, color: Option<Rgb>) -> bool {
        false
    }

    // --- window, colors, clipboard, hyperlinks ---
    fn set_window_title(&mut self, title: &str) -> bool {
        false
    }
    fn set_color_table_entry(&mut self, index: usize, color: Rgb) -> bool {
        false
    }
    fn set_default_foreground(&mut self, color: Rgb) -> bool {
        false
    }
    fn set_default_background(&mut self, color: Rgb) -> bool {
        false
    }
    fn assign_color(&mut self, item: u16, fg_index: u16, bg_index: u16) -> bool {
        false
    }
    fn window_manipulation(
        &mut self,
        function: u16,
        parameter1: VtParameter,
        parameter2: VtParameter,
    ) -> bool {
        false
    }
    fn set_clipboard(&mut self, content: &str) -> bool {
        false
    }
    fn add_hyperlink(&mut self, uri: &str, params: &str) -> bool {
        false
    }
    fn end_hyperlink(&mut self) -> bool {
        false
    }
    fn do_con_emu_action(&mut self, payload: &str) -> bool {
        false
    }
    fn do_iterm2_action(&mut self, payload: &str) -> bool {
        false
    }
    fn do_final_term_action(&mut self, payload: &str) -> bool {
        false
    }
    fn do_vs_code_action(&mut self, payload: &str) -> bool {
        false
    }

    // --- strings and macros ---
    #[allow(clippy::too_many_arguments)]
    fn download_drcs(
        &mut self,
        font_number: u16,
        start_char: VtParameter,
        erase_control: u16,
        cell_matrix: u16,
        font_set: u16,
        font_usage: u16,
        cell_height: VtParameter,
        charset_size: CharsetSize,
    ) -> Option<StringHandler> {
        None
    }
    fn define_macro(
        &mut self,
        macro_id: u16,
        delete_control: u16,
        encoding: u16,
    ) -> Option<StringHandler> {
        None
    }
    fn invoke_macro(&mut self, macro_id: u16) -> bool {
        false
    }
    fn restore_terminal_state(&mut self, format: u16) -> Option<StringHandler> {
        None
    }
    fn request_setting(&mut self) -> Option<StringHandler> {
        None
    }
    fn restore_presentation_state(&mut self, format: u16) -> Option<StringHandler> {
        None
    }
    fn play_sounds(&mut self, parameters: &Params) -> bool {
        false
    }
}

/// A dispatch target that ignores everything. Useful as a base for
/// benches and for embedders that only want the pass-through behavior.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDispatch;

impl TermDispatch for NoopDispatch {}
