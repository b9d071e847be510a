// ============================================================
// Layer 1 — Interactive Session
// ============================================================
// The read-eval loop over stdin/stdout:
//
//   Enter your question (or type 'exit' to quit): Who designed it?
//   Question: Who designed it?
//   Answer: gustave eiffel
//
// `exit` (any case, surrounding blanks ignored) or end of input
// ends the session. Any answering error ends it too.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::domain::traits::QuestionAnswerer;

pub const PROMPT: &str = "Enter your question (or type 'exit' to quit): ";
pub const EXIT_COMMAND: &str = "exit";

pub fn is_exit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

pub struct Session<'a, A> {
    answerer: &'a A,
}

impl<'a, A: QuestionAnswerer> Session<'a, A> {
    pub fn new(answerer: &'a A) -> Self {
        Self { answerer }
    }

    /// Run until `exit` or end of input; returns how many questions
    /// were answered.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<usize> {
        let mut answered = 0usize;
        let mut line = String::new();

        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }
            if is_exit(&line) {
                break;
            }

            let question = line.trim();
            let answer = self
                .answerer
                .answer(question)
                .with_context(|| format!("cannot answer '{question}'"))?;

            writeln!(output, "Question: {question}")?;
            writeln!(output, "Answer: {answer}\n")?;
            answered += 1;
        }

        tracing::info!("Session ended after {} question(s)", answered);
        Ok(answered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{QaError, QaResult};
    use std::cell::RefCell;

    struct Echo {
        asked: RefCell<Vec<String>>,
    }

    impl Echo {
        fn new() -> Self {
            Self { asked: RefCell::new(Vec::new()) }
        }
    }

    impl QuestionAnswerer for Echo {
        fn answer(&self, question: &str) -> QaResult<String> {
            self.asked.borrow_mut().push(question.to_string());
            Ok(format!("about {}", question.len()))
        }
    }

    struct Broken;

    impl QuestionAnswerer for Broken {
        fn answer(&self, _question: &str) -> QaResult<String> {
            Err(QaError::Inference("boom".to_string()))
        }
    }

    fn run(answerer: &impl QuestionAnswerer, input: &str) -> (Result<usize>, String) {
        let mut out = Vec::new();
        let result = Session::new(answerer).run(input.as_bytes(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_exit_sentinel_is_case_insensitive_and_trimmed() {
        assert!(is_exit("exit"));
        assert!(is_exit("  EXIT \n"));
        assert!(is_exit("Exit"));
        assert!(!is_exit("exit now"));
        assert!(!is_exit(""));
    }

    #[test]
    fn test_prints_question_and_answer_per_turn() {
        let echo = Echo::new();
        let (result, out) = run(&echo, "  Who designed it? \nexit\n");
        assert_eq!(result.unwrap(), 1);
        assert_eq!(
            out,
            format!("{PROMPT}Question: Who designed it?\nAnswer: about 16\n\n{PROMPT}")
        );
        assert_eq!(*echo.asked.borrow(), vec!["Who designed it?".to_string()]);
    }

    #[test]
    fn test_stops_at_exit_without_asking() {
        let echo = Echo::new();
        let (result, _) = run(&echo, "EXIT\nWhere?\n");
        assert_eq!(result.unwrap(), 0);
        assert!(echo.asked.borrow().is_empty());
    }

    #[test]
    fn test_end_of_input_ends_the_session() {
        let echo = Echo::new();
        let (result, out) = run(&echo, "Where?\nWhen?\n");
        assert_eq!(result.unwrap(), 2);
        assert!(out.ends_with(&format!("{PROMPT}\n")));
    }

    #[test]
    fn test_answer_errors_end_the_session() {
        let (result, out) = run(&Broken, "Where?\nWhen?\n");
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("boom"));
        assert_eq!(out, PROMPT);
    }
}
