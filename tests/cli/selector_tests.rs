// Terminal selector tests - numbered menu driven by scripted input

use lmbridge_cli::TerminalSelector;
use lmbridge_cli::commands::test::recommended;
use lmbridge_core::ModelDescriptor;
use lmbridge_core::selection::ModelSelector;
use std::io::Cursor;

fn listing() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new("qwen2.5-7b-instruct"),
        ModelDescriptor::new("llama-3.2-3b-instruct"),
        ModelDescriptor::new("mistral-7b-instruct-v0.3"),
    ]
}

fn run(input: &str) -> (Option<String>, String) {
    let mut selector = TerminalSelector::new(Cursor::new(input.to_string()), Vec::new());
    let choice = selector.select(&listing());
    let output = String::from_utf8(selector.into_output()).expect("utf8 output");
    (choice, output)
}

#[test]
fn picks_numbered_entry() {
    let (choice, output) = run("2\n");

    assert_eq!(choice.as_deref(), Some("llama-3.2-3b-instruct"));
    assert!(output.contains("  1. qwen2.5-7b-instruct"));
    assert!(output.contains("  3. mistral-7b-instruct-v0.3"));
}

#[test]
fn reprompts_after_invalid_input() {
    let (choice, output) = run("9\nabc\n3\n");

    assert_eq!(choice.as_deref(), Some("mistral-7b-instruct-v0.3"));
    assert!(output.contains("Please enter a number between 1 and 3"));
    assert!(output.contains("Please enter a valid number"));
}

#[test]
fn quit_selects_nothing() {
    let (choice, _) = run("q\n");
    assert!(choice.is_none());
}

#[test]
fn end_of_input_selects_nothing() {
    let (choice, _) = run("");
    assert!(choice.is_none());
}

#[test]
fn empty_listing_never_prompts() {
    let mut selector = TerminalSelector::new(Cursor::new("1\n".to_string()), Vec::new());

    assert!(selector.select(&[]).is_none());
    assert!(selector.into_output().is_empty());
}

#[test]
fn nothing_to_recommend_without_checks() {
    assert!(recommended(&[]).is_none());
}
