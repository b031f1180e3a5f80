use application::rag_service::RagService;
use colored::Colorize;
use dialoguer::Input;
use domain::session::{LoopState, Turn};
use shared::types::Result;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// A source of user queries, one line per turn. `None` means end of input.
pub trait QueryInput {
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// Prompts on an interactive terminal.
pub struct TerminalInput;

impl QueryInput for TerminalInput {
    fn next_line(&mut self) -> Result<Option<String>> {
        end_of_input_as_none(
            Input::new()
                .with_prompt("Enter your query")
                .allow_empty(true)
                .interact_text(),
        )
    }
}

/// Ctrl-D on the terminal surfaces as an `UnexpectedEof` I/O error; treat it
/// as the end of input rather than a failure.
fn end_of_input_as_none(
    result: std::result::Result<String, dialoguer::Error>,
) -> Result<Option<String>> {
    match result {
        Ok(line) => Ok(Some(line)),
        Err(dialoguer::Error::IO(err)) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Reads queries from any buffered reader, e.g. piped stdin.
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> QueryInput for LineInput<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Read-answer loop. A failed turn ends the session with that error.
pub struct ChatLoop<'a> {
    rag: &'a RagService,
}

impl<'a> ChatLoop<'a> {
    pub fn new(rag: &'a RagService) -> Self {
        Self { rag }
    }

    pub async fn run(&self, input: &mut dyn QueryInput, out: &mut dyn Write) -> Result<LoopState> {
        let mut state = LoopState::AwaitingInput;
        while state == LoopState::AwaitingInput {
            let turn = match input.next_line()? {
                Some(line) => Turn::parse(&line),
                None => Turn::Exit,
            };
            state = state.next(&turn);

            if let Turn::Ask(query) = turn {
                debug!(%query, "Answering");
                let answer = self.rag.query(&query).await?;
                writeln!(out, "{} {}", "Response:".green().bold(), answer)?;
                out.flush()?;
            }
        }
        Ok(state)
    }
}
