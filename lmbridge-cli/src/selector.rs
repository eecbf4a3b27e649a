use std::io::{self, BufRead, Write};

use lmbridge_core::ModelDescriptor;
use lmbridge_core::selection::ModelSelector;
use tracing::warn;

/// What one line of operator input means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based index into the listing
    Pick(usize),
    Quit,
    Invalid(String),
}

/// Interpret a 1-based menu answer against `count` entries
pub fn parse_choice(input: &str, count: usize) -> Choice {
    let input = input.trim();
    if matches!(input.to_lowercase().as_str(), "q" | "quit" | "exit") {
        return Choice::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Pick(n - 1),
        Ok(_) => Choice::Invalid(format!("Please enter a number between 1 and {count}")),
        Err(_) => Choice::Invalid("Please enter a valid number".to_string()),
    }
}

/// Numbered menu over a reader and writer; stdin/stdout in the binary
pub struct TerminalSelector<R, W> {
    input: R,
    output: W,
}

impl TerminalSelector<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, models: &[ModelDescriptor]) -> io::Result<Option<String>> {
        writeln!(self.output, "\nAvailable models:")?;
        for (index, model) in models.iter().enumerate() {
            writeln!(self.output, "  {}. {}", index + 1, model.id)?;
        }

        loop {
            write!(
                self.output,
                "\nSelect a model (1-{}) or 'q' to quit: ",
                models.len()
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match parse_choice(&line, models.len()) {
                Choice::Pick(index) => return Ok(Some(models[index].id.clone())),
                Choice::Quit => return Ok(None),
                Choice::Invalid(message) => writeln!(self.output, "{message}")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> ModelSelector for TerminalSelector<R, W> {
    fn select(&mut self, models: &[ModelDescriptor]) -> Option<String> {
        if models.is_empty() {
            return None;
        }
        match self.prompt(models) {
            Ok(choice) => choice,
            Err(error) => {
                warn!(%error, "Terminal selection failed");
                None
            }
        }
    }
}
