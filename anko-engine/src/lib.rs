//! Output dispatch engine for the anko VT parser.
//!
//! `anko-parser` turns a byte stream into grammar-level actions; this
//! crate gives those actions their meaning. [`OutputEngine`] implements
//! the parser's `Engine` seam and drives a [`TermDispatch`] — the
//! capability surface a screen buffer, recorder, or renderer implements
//! to receive typed terminal operations.
//!
//! ```no_run
//! use anko_engine::{NoopDispatch, OutputEngine};
//! use anko_parser::Parser;
//!
//! let mut parser = Parser::new(OutputEngine::new(NoopDispatch));
//! let chars: Vec<char> = "\x1b[1mhello\x1b[0m".chars().collect();
//! parser.process_string(&chars);
//! ```

mod codes;
mod color;
mod dispatch;
mod osc;
mod output;
mod types;

pub use codes::{csi, dcs, esc, osc as osc_codes, vt52};
pub use color::{parse_color_spec, Rgb};
pub use dispatch::{NoopDispatch, TermDispatch};
pub use osc::{parse_clipboard, parse_color_list, parse_color_table, parse_hyperlink, ClipboardOp, MAX_URL_LENGTH};
pub use output::{OutputEngine, PassThroughSink};
pub use types::{CharsetSize, EraseType, LineFeedType, LineRendition, Mode, Status};
