//! Generation backends for brandbrief.
//!
//! Each backend implements `brandbrief_core::generation::TextGenerator`:
//! one finished prompt in, generated text out.

pub mod openai;
pub mod placeholder;

pub use openai::OpenAiGenerator;
pub use placeholder::PlaceholderGenerator;
