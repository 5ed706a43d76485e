//! Line input for `listen`.
//!
//! rustyline blocks, so it runs on its own thread and hands lines to the
//! async loop over a channel. The thread waits for [`LineReader::ready`]
//! before showing each prompt, so command output lands above the next prompt
//! instead of after it.

use std::sync::mpsc as std_mpsc;
use std::thread;

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct LineReader {
    lines: mpsc::Receiver<String>,
    ready: std_mpsc::Sender<()>,
}

impl LineReader {
    /// Start the input thread and show the first prompt.
    pub fn spawn(prompt: String) -> Result<Self> {
        let (line_tx, lines) = mpsc::channel(1);
        let (ready, ready_rx) = std_mpsc::channel::<()>();
        let (init_tx, init_rx) = std_mpsc::channel::<Result<(), ReadlineError>>();

        thread::Builder::new()
            .name("storytime-input".to_string())
            .spawn(move || {
                let mut editor = match DefaultEditor::new() {
                    Ok(editor) => {
                        let _ = init_tx.send(Ok(()));
                        editor
                    }
                    Err(e) => {
                        let _ = init_tx.send(Err(e));
                        return;
                    }
                };

                while ready_rx.recv().is_ok() {
                    match editor.readline(&prompt) {
                        Ok(line) => {
                            if !line.trim().is_empty() {
                                if let Err(e) = editor.add_history_entry(line.as_str()) {
                                    debug!(error = %e, "History entry not recorded");
                                }
                            }
                            if line_tx.blocking_send(line).is_err() {
                                break;
                            }
                        }
                        Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                        Err(e) => {
                            warn!(error = %e, "Failed to read input");
                            break;
                        }
                    }
                }
                debug!("Input thread exiting");
            })
            .context("failed to spawn input thread")?;

        init_rx
            .recv()
            .context("input thread exited during startup")?
            .context("failed to start line editor")?;

        let reader = Self { lines, ready };
        reader.ready();
        Ok(reader)
    }

    /// Next line, or `None` once the listener pressed Ctrl-C or Ctrl-D.
    pub async fn next_line(&mut self) -> Option<String> {
        self.lines.recv().await
    }

    /// Let the input thread show the prompt again.
    pub fn ready(&self) {
        if self.ready.send(()).is_err() {
            debug!("Input thread already gone");
        }
    }
}
