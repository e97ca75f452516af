//! Fuzz the reader + state machine with arbitrary bytes: must never
//! panic, whatever the chunking.

#![no_main]

use libfuzzer_sys::fuzz_target;

use anko_parser::{Engine, Params, Parser, StringHandler, VtId};

struct Swallow;

impl Engine for Swallow {
    fn execute(&mut self, _ch: char) -> bool {
        true
    }
    fn print(&mut self, _ch: char) -> bool {
        true
    }
    fn print_string(&mut self, _chars: &[char]) -> bool {
        true
    }
    fn pass_through_string(&mut self, _chars: &[char]) -> bool {
        true
    }
    fn esc_dispatch(&mut self, _id: VtId) -> bool {
        false
    }
    fn vt52_esc_dispatch(&mut self, _id: VtId, _params: &Params) -> bool {
        false
    }
    fn csi_dispatch(&mut self, _id: VtId, _params: &Params) -> bool {
        false
    }
    fn osc_dispatch(&mut self, _code: u16, _payload: &str) -> bool {
        false
    }
    fn ss3_dispatch(&mut self, _ch: char, _params: &Params) -> bool {
        false
    }
    fn dcs_dispatch(&mut self, _id: VtId, _params: &Params) -> Option<StringHandler> {
        Some(Box::new(|ch| ch != '!'))
    }
    fn has_pass_through(&self) -> bool {
        true
    }
}

fuzz_target!(|data: &[u8]| {
    let mut parser = Parser::new(Swallow);
    // First byte picks the chunking so boundary handling gets fuzzed too.
    let chunk = data.first().map_or(1, |&b| usize::from(b) + 1);
    let chars: Vec<char> = String::from_utf8_lossy(data).chars().collect();
    for piece in chars.chunks(chunk) {
        parser.process_string(piece);
    }
});
