use lib::chess::{Color, Snapshot};
use lib::game::{Observer, Outcome};
use lib::notation::MoveRecord;
use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Lines, Read, Write};
use tracing::{instrument, warn};

/// A line oriented terminal the game is played on.
#[derive(Debug)]
pub struct Terminal<W: Write, R: Read> {
    writer: W,
    reader: Lines<BufReader<R>>,
}

impl<W: Write, R: Read> Terminal<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Terminal {
            writer,
            reader: BufReader::new(reader).lines(),
        }
    }

    /// Asks for the next command, returns `None` once the input is exhausted.
    #[instrument(level = "trace", skip(self), ret, err)]
    pub fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}> ", question)?;
        self.writer.flush()?;

        match self.reader.next() {
            None => Ok(None),
            Some(line) => Ok(Some(line?.trim().to_string())),
        }
    }

    /// Prints a message followed by a line break.
    #[instrument(level = "trace", skip(self, msg), err)]
    pub fn print<T: Display>(&mut self, msg: T) -> io::Result<()> {
        writeln!(self.writer, "{}", msg)
    }

    /// Flushes the internal buffers.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn notify<T: Display>(&mut self, msg: T) {
        if let Err(e) = self.print(msg) {
            warn!("failed to write to the terminal, {}", e);
        }
    }
}

impl<W: Write, R: Read> Observer for Terminal<W, R> {
    fn on_move_applied(&mut self, record: &MoveRecord, snapshot: &Snapshot) {
        self.notify(record);
        self.notify(snapshot);
    }

    fn on_check(&mut self, side: Color) {
        self.notify(format_args!("the {} king is in check", side));
    }

    fn on_game_ended(&mut self, outcome: Outcome) {
        self.notify(outcome);
    }

    fn on_message(&mut self, text: &str) {
        self.notify(text);
    }
}
