//! Interactive line source used by `Post::read_from_console`.

use crate::model::post::{PostError, PostResult};
use std::io::{self, BufRead, Stdin, Stdout, Write};

/// Prompt/answer channel for filling a post from user input.
pub trait Intake {
    /// Shows one prompt line to the user.
    fn prompt(&mut self, message: &str) -> io::Result<()>;

    /// Reads the next line without its terminator; `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Prompts and reads one required answer.
    ///
    /// # Errors
    /// - `PostError::InputClosed` when input ends before an answer arrives.
    fn ask(&mut self, message: &str) -> PostResult<String> {
        self.prompt(message)?;
        self.read_line()?.ok_or(PostError::InputClosed)
    }
}

/// `Intake` over any buffered reader and writer pair.
pub struct ConsoleIntake<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleIntake<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl ConsoleIntake<io::StdinLock<'static>, Stdout> {
    /// Intake bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Intake for ConsoleIntake<R, W> {
    fn prompt(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{message}")?;
        self.writer.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsoleIntake, Intake};
    use crate::model::post::PostError;
    use std::io::Cursor;

    #[test]
    fn ask_writes_prompt_and_strips_line_endings() {
        let mut intake = ConsoleIntake::new(Cursor::new("first\r\nsecond\n"), Vec::new());

        assert_eq!(intake.ask("Question?").unwrap(), "first");
        assert_eq!(intake.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(intake.read_line().unwrap(), None);

        let (_, written) = intake.into_inner();
        assert_eq!(String::from_utf8(written).unwrap(), "Question?\n");
    }

    #[test]
    fn ask_on_exhausted_input_reports_closed() {
        let mut intake = ConsoleIntake::new(Cursor::new(""), Vec::new());
        let err = intake.ask("Anything?").unwrap_err();
        assert!(matches!(err, PostError::InputClosed));
    }
}
