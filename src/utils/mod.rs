//! Shared helpers used by the index and the command line front end.
//!
//! ## Modules
//!
//! - [`app_data`] - `~/.sol` directory and the effective [`SolConfig`]
//! - [`config_file`] - Reader for the sectioned `.solconfig` format
//! - [`lines`] - Bounded sequential line scanning
//! - [`progress`] - Spinner and bar on stderr
//! - [`tokenizer`] - Word extraction and symbol classification
//!
//! ## Key Functions
//!
//! ```
//! use sol::utils::{classify, extract_tokens};
//!
//! // Words are maximal runs of letters, digits and underscores
//! let tokens = extract_tokens("fn get_user(id: u32)");
//! assert_eq!(tokens, vec!["fn", "get_user", "id", "u32"]);
//!
//! // Every word character has its own class
//! assert_ne!(classify('z'), classify('0'));
//! ```

pub mod app_data;
pub mod config_file;
pub mod lines;
pub mod progress;
pub mod tokenizer;

pub use app_data::{HexColor, SolConfig, ensure_default_config, get_app_data_dir, get_config_path};
pub use lines::LineReader;
pub use progress::Progress;
pub use tokenizer::*;
