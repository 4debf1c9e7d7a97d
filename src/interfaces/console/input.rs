//! Terminal adapter for the operator input port

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use tracing::warn;

use crate::application::InputSource;

/// Reads operator input line by line, echoing prompts to the terminal.
pub struct ConsoleInput {
    reader: Mutex<Box<dyn BufRead + Send>>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleInput {
    pub fn new(reader: impl BufRead + Send + 'static, writer: impl Write + Send + 'static) -> Self {
        Self {
            reader: Mutex::new(Box::new(reader)),
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Process stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }

    fn show(&self, prompt: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("console writer poisoned"))?;
        writeln!(writer, "{prompt}")?;
        writer.flush()
    }
}

impl InputSource for ConsoleInput {
    fn next_line(&self, prompt: &str) -> Option<String> {
        if !prompt.is_empty() {
            if let Err(e) = self.show(prompt) {
                warn!(error = %e, "Failed to write prompt");
            }
        }

        let mut reader = self.reader.lock().ok()?;
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                warn!(error = %e, "Failed to read from console");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Writer whose contents stay readable after being boxed.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn lines_lose_their_terminators() {
        let input = ConsoleInput::new(io::Cursor::new("1\r\nAB-123\n"), io::sink());
        assert_eq!(input.next_line("").as_deref(), Some("1"));
        assert_eq!(input.next_line("").as_deref(), Some("AB-123"));
        assert_eq!(input.next_line(""), None);
    }

    #[test]
    fn prompts_are_echoed() {
        let out = SharedBuf::default();
        let input = ConsoleInput::new(io::Cursor::new("2\n"), out.clone());

        let class = input.read_vehicle_class();

        assert_eq!(class, Ok(crate::domain::VehicleClass::Bike));
        let echoed = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        assert_eq!(echoed, "Please select vehicle type from menu\n1 CAR\n2 BIKE\n");
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let input = ConsoleInput::new(io::Cursor::new("3"), io::sink());
        assert_eq!(input.next_line("").as_deref(), Some("3"));
        assert_eq!(input.next_line(""), None);
    }
}
