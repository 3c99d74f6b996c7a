//! Line-oriented console input.

use crossterm::style::Stylize;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// A source of text lines, asked with a prompt.
#[async_trait::async_trait]
pub trait LineSource: Send {
    /// Shows `prompt` and waits for one line. `Ok(None)` means input closed.
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>>;

    /// Shows a message about the last line (e.g. why it was rejected).
    fn notice(&mut self, message: &str);
}

/// Interactive terminal input over stdin.
///
/// Clones share one line reader, so the human player and the retry
/// confirmation never split buffered input between them.
#[derive(Clone)]
pub struct Console {
    lines: Arc<Mutex<Lines<BufReader<Stdin>>>>,
}

impl Console {
    /// Creates a console reading from stdin.
    #[instrument]
    pub fn stdin() -> Self {
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines())),
        }
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl LineSource for Console {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{}", prompt.bold());
        std::io::stdout().flush()?;

        let line = self.lines.lock().await.next_line().await?;
        debug!(closed = line.is_none(), "Read console line");
        Ok(line)
    }

    fn notice(&mut self, message: &str) {
        println!("{}", message.red());
    }
}
