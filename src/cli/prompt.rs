//! Timed confirmation prompt.

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// How the confirmation was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    /// No input arrived before the timeout.
    TimedOut,
    /// An empty line was entered.
    Default,
    No,
}

impl Answer {
    /// Timeout and empty input count as yes.
    pub fn proceeds(self) -> bool {
        !matches!(self, Answer::No)
    }

    /// Classify a line of input, or `None` on timeout.
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            None => Answer::TimedOut,
            Some("") => Answer::Default,
            Some(s) if s.eq_ignore_ascii_case("y") || s.eq_ignore_ascii_case("yes") => Answer::Yes,
            Some(_) => Answer::No,
        }
    }
}

/// Print `question` and wait up to `timeout` for a line on stdin.
///
/// The reader thread is left behind on timeout; it exits with the process.
pub fn confirm(question: &str, timeout: Duration) -> Answer {
    print!(
        "{} [ Y (Yes) | n (no) ]: < default: Yes, timeout: {} seconds > ",
        question,
        timeout.as_secs()
    );
    let _ = io::stdout().flush();

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_ok() {
            let _ = tx.send(line);
        }
    });

    let line = rx.recv_timeout(timeout).ok();
    let answer = Answer::from_input(line.as_deref());
    match answer {
        Answer::TimedOut => println!("\nYes (timeout)"),
        Answer::Default => println!("Yes (default)"),
        _ => {}
    }
    answer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_from_input() {
        assert_eq!(Answer::from_input(None), Answer::TimedOut);
        assert_eq!(Answer::from_input(Some("\n")), Answer::Default);
        assert_eq!(Answer::from_input(Some("Y\n")), Answer::Yes);
        assert_eq!(Answer::from_input(Some("yes")), Answer::Yes);
        assert_eq!(Answer::from_input(Some("n")), Answer::No);
        assert_eq!(Answer::from_input(Some("maybe")), Answer::No);
    }

    #[test]
    fn test_answer_proceeds() {
        assert!(Answer::TimedOut.proceeds());
        assert!(Answer::Default.proceeds());
        assert!(Answer::Yes.proceeds());
        assert!(!Answer::No.proceeds());
    }
}
