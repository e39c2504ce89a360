//! Operator Interaction
//!
//! Both tools talk to the curator through the [`Prompter`] trait so the
//! interactive flows can be driven from a script in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{ApolloError, Result};

/// Source of operator answers and sink for operator-facing text.
pub trait Prompter {
    /// Shows one line of text.
    fn say(&mut self, line: &str) -> Result<()>;

    /// Shows a question and blocks for a one-line answer, without the line ending.
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Asks a yes/no question; only `y` in either case counts as yes.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?;
        Ok(is_yes(&answer))
    }
}

/// Returns true for `y`/`Y`, ignoring surrounding whitespace.
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Prompter over a line reader and a writer, normally stdin and stdout.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the prompter, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).map_err(|e| ApolloError::io("Failed to write prompt", e))
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        self.say(question)?;
        self.output
            .flush()
            .map_err(|e| ApolloError::io("Failed to write prompt", e))?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .map_err(|e| ApolloError::io("Failed to read answer", e))?;

        if read == 0 {
            return Err(ApolloError::InputClosed);
        }

        Ok(answer.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// Prompter answering from a fixed list and recording everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
    questions: usize,
}

impl ScriptedPrompter {
    /// Creates a prompter that replies with `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
            questions: 0,
        }
    }

    /// Every line and question shown, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Number of questions asked.
    pub fn questions_asked(&self) -> usize {
        self.questions
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, line: &str) -> Result<()> {
        self.transcript.push(line.to_string());
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        self.transcript.push(question.to_string());
        self.questions += 1;
        self.answers.pop_front().ok_or(ApolloError::InputClosed)
    }
}
