//! Sequence identifier constants
//!
//! Packed [`VtId`](anko_parser::VtId) values for every sequence the
//! output engine recognizes, named after the DEC/xterm mnemonics. Kept
//! as raw `u64`s so dispatch tables are plain `match` arms.

use anko_parser::vtid::pack;

pub mod esc {
    use super::pack;

    pub const DECBI_BACK_INDEX: u64 = pack(b"6");
    pub const DECSC_CURSOR_SAVE: u64 = pack(b"7");
    pub const DECRC_CURSOR_RESTORE: u64 = pack(b"8");
    pub const DECFI_FORWARD_INDEX: u64 = pack(b"9");
    pub const DECKPAM_KEYPAD_APPLICATION_MODE: u64 = pack(b"=");
    pub const DECKPNM_KEYPAD_NUMERIC_MODE: u64 = pack(b">");
    pub const IND_INDEX: u64 = pack(b"D");
    pub const NEL_NEXT_LINE: u64 = pack(b"E");
    pub const HTS_HORIZONTAL_TAB_SET: u64 = pack(b"H");
    pub const RI_REVERSE_LINE_FEED: u64 = pack(b"M");
    pub const SS2_SINGLE_SHIFT: u64 = pack(b"N");
    pub const SS3_SINGLE_SHIFT: u64 = pack(b"O");
    pub const DECID_IDENTIFY_DEVICE: u64 = pack(b"Z");
    pub const ST_STRING_TERMINATOR: u64 = pack(b"\\");
    pub const RIS_RESET_TO_INITIAL_STATE: u64 = pack(b"c");
    pub const LS2_LOCKING_SHIFT: u64 = pack(b"n");
    pub const LS3_LOCKING_SHIFT: u64 = pack(b"o");
    pub const LS1R_LOCKING_SHIFT: u64 = pack(b"~");
    pub const LS2R_LOCKING_SHIFT: u64 = pack(b"}");
    pub const LS3R_LOCKING_SHIFT: u64 = pack(b"|");
    pub const DECAC1_ACCEPT_C1_CONTROLS: u64 = pack(b" 7");
    pub const ACS_ANSI_LEVEL_1: u64 = pack(b" L");
    pub const ACS_ANSI_LEVEL_2: u64 = pack(b" M");
    pub const ACS_ANSI_LEVEL_3: u64 = pack(b" N");
    pub const DECDHL_DOUBLE_HEIGHT_TOP: u64 = pack(b"#3");
    pub const DECDHL_DOUBLE_HEIGHT_BOTTOM: u64 = pack(b"#4");
    pub const DECSWL_SINGLE_WIDTH: u64 = pack(b"#5");
    pub const DECDWL_DOUBLE_WIDTH: u64 = pack(b"#6");
    pub const DECALN_SCREEN_ALIGNMENT: u64 = pack(b"#8");
}

pub mod csi {
    use super::pack;

    pub const ICH_INSERT_CHARACTER: u64 = pack(b"@");
    pub const CUU_CURSOR_UP: u64 = pack(b"A");
    pub const CUD_CURSOR_DOWN: u64 = pack(b"B");
    pub const CUF_CURSOR_FORWARD: u64 = pack(b"C");
    pub const CUB_CURSOR_BACKWARD: u64 = pack(b"D");
    pub const CNL_CURSOR_NEXT_LINE: u64 = pack(b"E");
    pub const CPL_CURSOR_PREV_LINE: u64 = pack(b"F");
    pub const CHA_CURSOR_HORIZONTAL_ABSOLUTE: u64 = pack(b"G");
    pub const CUP_CURSOR_POSITION: u64 = pack(b"H");
    pub const CHT_CURSOR_FORWARD_TAB: u64 = pack(b"I");
    pub const ED_ERASE_DISPLAY: u64 = pack(b"J");
    pub const DECSED_SELECTIVE_ERASE_DISPLAY: u64 = pack(b"?J");
    pub const EL_ERASE_LINE: u64 = pack(b"K");
    pub const DECSEL_SELECTIVE_ERASE_LINE: u64 = pack(b"?K");
    pub const IL_INSERT_LINE: u64 = pack(b"L");
    pub const DL_DELETE_LINE: u64 = pack(b"M");
    pub const DCH_DELETE_CHARACTER: u64 = pack(b"P");
    pub const SU_SCROLL_UP: u64 = pack(b"S");
    pub const SD_SCROLL_DOWN: u64 = pack(b"T");
    pub const NP_NEXT_PAGE: u64 = pack(b"U");
    pub const PP_PRECEDING_PAGE: u64 = pack(b"V");
    pub const DECST8C_SET_TAB_EVERY_8_COLUMNS: u64 = pack(b"?W");
    pub const ECH_ERASE_CHARACTERS: u64 = pack(b"X");
    pub const CBT_CURSOR_BACK_TAB: u64 = pack(b"Z");
    pub const HPA_HORIZONTAL_POSITION_ABSOLUTE: u64 = pack(b"`");
    pub const HPR_HORIZONTAL_POSITION_RELATIVE: u64 = pack(b"a");
    pub const REP_REPEAT_CHARACTER: u64 = pack(b"b");
    pub const DA_DEVICE_ATTRIBUTES: u64 = pack(b"c");
    pub const DA2_SECONDARY_DEVICE_ATTRIBUTES: u64 = pack(b">c");
    pub const DA3_TERTIARY_DEVICE_ATTRIBUTES: u64 = pack(b"=c");
    pub const VPA_VERTICAL_LINE_POSITION_ABSOLUTE: u64 = pack(b"d");
    pub const VPR_VERTICAL_POSITION_RELATIVE: u64 = pack(b"e");
    pub const HVP_HORIZONTAL_VERTICAL_POSITION: u64 = pack(b"f");
    pub const TBC_TAB_CLEAR: u64 = pack(b"g");
    pub const SM_SET_MODE: u64 = pack(b"h");
    pub const DECSET_PRIVATE_MODE_SET: u64 = pack(b"?h");
    pub const RM_RESET_MODE: u64 = pack(b"l");
    pub const DECRST_PRIVATE_MODE_RESET: u64 = pack(b"?l");
    pub const SGR_SET_GRAPHICS_RENDITION: u64 = pack(b"m");
    pub const DSR_DEVICE_STATUS_REPORT: u64 = pack(b"n");
    pub const DSR_PRIVATE_DEVICE_STATUS_REPORT: u64 = pack(b"?n");
    pub const DECSTBM_SET_TOP_BOTTOM_MARGINS: u64 = pack(b"r");
    pub const DECSLRM_SET_LEFT_RIGHT_MARGINS: u64 = pack(b"s");
    pub const DTTERM_WINDOW_MANIPULATION: u64 = pack(b"t");
    pub const ANSISYSRC_CURSOR_RESTORE: u64 = pack(b"u");
    pub const DECREQTPARM_REQUEST_TERMINAL_PARAMETERS: u64 = pack(b"x");
    pub const PPA_PAGE_POSITION_ABSOLUTE: u64 = pack(b" P");
    pub const PPR_PAGE_POSITION_RELATIVE: u64 = pack(b" Q");
    pub const PPB_PAGE_POSITION_BACK: u64 = pack(b" R");
    pub const DECSCUSR_SET_CURSOR_STYLE: u64 = pack(b" q");
    pub const DECSTR_SOFT_RESET: u64 = pack(b"!p");
    pub const DECSCA_SET_CHARACTER_PROTECTION_ATTRIBUTE: u64 = pack(b"\"q");
    pub const DECRQDE_REQUEST_DISPLAYED_EXTENT: u64 = pack(b"\"v");
    pub const XT_PUSH_SGR_ALIAS: u64 = pack(b"#p");
    pub const XT_POP_SGR_ALIAS: u64 = pack(b"#q");
    pub const XT_PUSH_SGR: u64 = pack(b"#{");
    pub const XT_POP_SGR: u64 = pack(b"#}");
    pub const DECRQM_REQUEST_MODE: u64 = pack(b"$p");
    pub const DECRQM_PRIVATE_REQUEST_MODE: u64 = pack(b"?$p");
    pub const DECCARA_CHANGE_ATTRIBUTES_RECTANGULAR_AREA: u64 = pack(b"$r");
    pub const DECRARA_REVERSE_ATTRIBUTES_RECTANGULAR_AREA: u64 = pack(b"$t");
    pub const DECCRA_COPY_RECTANGULAR_AREA: u64 = pack(b"$v");
    pub const DECRQPSR_REQUEST_PRESENTATION_STATE_REPORT: u64 = pack(b"$w");
    pub const DECFRA_FILL_RECTANGULAR_AREA: u64 = pack(b"$x");
    pub const DECERA_ERASE_RECTANGULAR_AREA: u64 = pack(b"$z");
    pub const DECSERA_SELECTIVE_ERASE_RECTANGULAR_AREA: u64 = pack(b"${");
    pub const DECRQUPSS_REQUEST_USER_PREFERENCE_CHARSET: u64 = pack(b"&u");
    pub const DECIC_INSERT_COLUMN: u64 = pack(b"'}");
    pub const DECDC_DELETE_COLUMN: u64 = pack(b"'~");
    pub const DECSACE_SELECT_ATTRIBUTE_CHANGE_EXTENT: u64 = pack(b"*x");
    pub const DECRQCRA_REQUEST_CHECKSUM_RECTANGULAR_AREA: u64 = pack(b"*y");
    pub const DECINVM_INVOKE_MACRO: u64 = pack(b"*z");
    pub const DECAC_ASSIGN_COLOR: u64 = pack(b",|");
    pub const DECPS_PLAY_SOUND: u64 = pack(b",~");
}

pub mod dcs {
    use super::pack;

    pub const DECDLD_DOWNLOAD_DRCS: u64 = pack(b"{");
    pub const DECAUPSS_ASSIGN_USER_PREFERENCE_CHARSET: u64 = pack(b"!u");
    pub const DECDMAC_DEFINE_MACRO: u64 = pack(b"!z");
    pub const DECRSTS_RESTORE_TERMINAL_STATE: u64 = pack(b"$p");
    pub const DECRQSS_REQUEST_SETTING: u64 = pack(b"$q");
    pub const DECRSPS_RESTORE_PRESENTATION_STATE: u64 = pack(b"$t");
}

pub mod vt52 {
    use super::pack;

    pub const CURSOR_UP: u64 = pack(b"A");
    pub const CURSOR_DOWN: u64 = pack(b"B");
    pub const CURSOR_RIGHT: u64 = pack(b"C");
    pub const CURSOR_LEFT: u64 = pack(b"D");
    pub const ENTER_GRAPHICS_MODE: u64 = pack(b"F");
    pub const EXIT_GRAPHICS_MODE: u64 = pack(b"G");
    pub const CURSOR_TO_HOME: u64 = pack(b"H");
    pub const REVERSE_LINE_FEED: u64 = pack(b"I");
    pub const ERASE_TO_END_OF_SCREEN: u64 = pack(b"J");
    pub const ERASE_TO_END_OF_LINE: u64 = pack(b"K");
    pub const DIRECT_CURSOR_ADDRESS: u64 = pack(b"Y");
    pub const IDENTIFY: u64 = pack(b"Z");
    pub const ENTER_ALTERNATE_KEYPAD_MODE: u64 = pack(b"=");
    pub const EXIT_ALTERNATE_KEYPAD_MODE: u64 = pack(b">");
    pub const EXIT_VT52_MODE: u64 = pack(b"<");
}

/// OSC command numbers.
pub mod osc {
    pub const SET_ICON_AND_WINDOW_TITLE: u16 = 0;
    pub const SET_WINDOW_ICON: u16 = 1;
    pub const SET_WINDOW_TITLE: u16 = 2;
    pub const SET_COLOR: u16 = 4;
    pub const HYPERLINK: u16 = 8;
    pub const CONEMU_ACTION: u16 = 9;
    pub const SET_FOREGROUND_COLOR: u16 = 10;
    pub const SET_BACKGROUND_COLOR: u16 = 11;
    pub const SET_CURSOR_COLOR: u16 = 12;
    pub const DECSWT_SET_WINDOW_TITLE: u16 = 21;
    pub const SET_CLIPBOARD: u16 = 52;
    pub const RESET_FOREGROUND_COLOR: u16 = 110;
    pub const RESET_BACKGROUND_COLOR: u16 = 111;
    pub const RESET_CURSOR_COLOR: u16 = 112;
    pub const FINAL_TERM_ACTION: u16 = 133;
    pub const VSCODE_ACTION: u16 = 633;
    pub const ITERM2_ACTION: u16 = 1337;
}
