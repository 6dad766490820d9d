//! Fixed instruction template for test case generation.
//!
//! The template text lives in `config/prompts/test_cases.md` and is compiled
//! in, so it cannot change while the process runs. It has exactly one
//! `{{input}}` placeholder.

/// The compiled-in template.
pub const PROMPT_TEMPLATE: &str = include_str!("../../config/prompts/test_cases.md");

/// Placeholder replaced by the user's description.
pub const PLACEHOLDER: &str = "{{input}}";

/// Substitute `input` into the template.
///
/// One literal substitution: placeholder-like text inside `input` is kept
/// as-is and never expanded again.
pub fn render(input: &str) -> String {
    PROMPT_TEMPLATE.replacen(PLACEHOLDER, input, 1)
}
