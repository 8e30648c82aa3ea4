use std::io::{IsTerminal, Write};
use std::time::Instant;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner on stderr while long work runs. Does nothing when stderr is not a
/// terminal, so CI logs stay clean.
pub struct ProgressSpinner {
    started: Instant,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ProgressSpinner {
    pub fn start(message: &str) -> Self {
        let mut spinner = Self {
            started: Instant::now(),
            stop: None,
            task: None,
        };

        if !std::io::stderr().is_terminal() {
            return spinner;
        }

        let (stop_tx, mut stop_rx) = oneshot::channel();
        let message = message.to_string();
        spinner.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(tokio::time::Duration::from_millis(120));
            for frame in FRAMES.iter().cycle() {
                tokio::select! {
                    _ = interval.tick() => {
                        eprint!("\r{message} {frame} ");
                        let _ = std::io::stderr().flush();
                    }
                    _ = &mut stop_rx => break,
                }
            }
        }));
        spinner.stop = Some(stop_tx);
        spinner
    }

    pub async fn finish(self, message: &str) {
        self.end("✅", message).await;
    }

    pub async fn fail(self, message: &str) {
        self.end("❌", message).await;
    }

    async fn end(mut self, marker: &str, message: &str) {
        let Some(task) = self.task.take() else {
            return;
        };
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        let _ = task.await;
        eprintln!("\r\x1b[K{marker} {message} ({:.1}s)", self.started.elapsed().as_secs_f64());
    }
}
