//! Tests for the prompt template and shipped config under config/

use std::fs;

use local_testgen::config::{Overrides, load_from};
use local_testgen::generator::prompt::{PLACEHOLDER, PROMPT_TEMPLATE, render};

#[test]
fn test_cases_prompt_file_exists() {
    let path = "config/prompts/test_cases.md";
    assert!(fs::metadata(path).is_ok(), "test_cases.md prompt file missing");
}

#[test]
fn test_cases_prompt_template_vars() {
    let text = fs::read_to_string("config/prompts/test_cases.md").unwrap();
    assert!(text.contains("{{input}}"), "test_cases.md should contain {{input}} variable");
}

#[test]
fn compiled_template_matches_file() {
    let text = fs::read_to_string("config/prompts/test_cases.md").unwrap();
    assert_eq!(text, PROMPT_TEMPLATE);
}

#[test]
fn rendered_login_prompt_keeps_schema() {
    let prompt = render("Verify successful login with valid credentials");
    assert!(prompt.contains("You are an expert QA Manual Tester."));
    assert!(prompt.contains("**Test Case ID**: [A unique identifier (e.g., TC_LOGIN_001)]"));
    assert!(prompt.contains("**Expected Results**:"));
    assert!(prompt.contains("## User Input\nVerify successful login with valid credentials"));
    assert!(!prompt.contains(PLACEHOLDER));
}

#[test]
fn default_config_loads() {
    let cfg = load_from(std::path::Path::new("config/default.toml"), &Overrides::default()).unwrap();
    assert_eq!(cfg.ollama.api_url, "http://localhost:11434/api/generate");
    assert_eq!(cfg.ollama.default_model, "llama3.2");
    assert_eq!(cfg.ollama.temperature, 0.5);
    assert_eq!(cfg.server.bind, "127.0.0.1:8000");
}
