//! Terminal ownership and the event loop.

use crate::app::{Action, App, TaskMessage};
use crate::ui;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use curso_content::ContentRequestor;
use curso_core::ImageSize;
use curso_error::{CursoResult, TuiError};
use curso_interface::GenerationDriver;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, sync::Arc, time::Duration};
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    task::JoinHandle,
};
use tracing::{debug, info, instrument, warn};

const TICK: Duration = Duration::from_millis(100);

type CursoTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Run the wizard until the user quits.
///
/// The terminal is restored even when the loop fails.
#[instrument(skip(requestor))]
pub async fn run<D>(requestor: Arc<ContentRequestor<D>>, image_size: ImageSize) -> CursoResult<()>
where
    D: GenerationDriver + 'static,
{
    let mut terminal = setup_terminal()?;

    info!("Terminal UI started");
    let result = EventLoop::new(requestor, image_size)
        .run(&mut terminal)
        .await;

    disable_raw_mode().map_err(|e| TuiError::new(format!("Failed to disable raw mode: {}", e)))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| TuiError::new(format!("Failed to leave alternate screen: {}", e)))?;
    terminal
        .show_cursor()
        .map_err(|e| TuiError::new(format!("Failed to show cursor: {}", e)))?;

    info!("Terminal UI stopped");
    result
}

/// Runs `restore` on drop unless disarmed.
struct SetupGuard<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> SetupGuard<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }

    fn disarm(mut self) {
        self.restore = None;
    }
}

impl<F: FnOnce()> Drop for SetupGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "Failed to disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
        warn!(error = %e, "Failed to leave alternate screen");
    }
}

/// Raw mode plus alternate screen. A failure part way leaves the terminal as it was.
fn setup_terminal() -> CursoResult<CursoTerminal> {
    enable_raw_mode().map_err(|e| TuiError::new(format!("Failed to enable raw mode: {}", e)))?;
    let guard = SetupGuard::new(restore_terminal);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| TuiError::new(format!("Failed to enter alternate screen: {}", e)))?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|e| TuiError::new(format!("Failed to create terminal: {}", e)))?;

    guard.disarm();
    Ok(terminal)
}

struct EventLoop<D> {
    app: App,
    requestor: Arc<ContentRequestor<D>>,
    tx: UnboundedSender<TaskMessage>,
    rx: UnboundedReceiver<TaskMessage>,
    step_task: Option<JoinHandle<()>>,
    image_tasks: Vec<JoinHandle<()>>,
}

impl<D: GenerationDriver + 'static> EventLoop<D> {
    fn new(requestor: Arc<ContentRequestor<D>>, image_size: ImageSize) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            app: App::new(image_size),
            requestor,
            tx,
            rx,
            step_task: None,
            image_tasks: Vec::new(),
        }
    }

    async fn run(mut self, terminal: &mut CursoTerminal) -> CursoResult<()> {
        let result = self.run_loop(terminal).await;
        self.shutdown();
        result
    }

    async fn run_loop(&mut self, terminal: &mut CursoTerminal) -> CursoResult<()> {
        loop {
            terminal
                .draw(|f| ui::draw(f, &self.app))
                .map_err(|e| TuiError::new(format!("Failed to draw: {}", e)))?;

            while let Ok(message) = self.rx.try_recv() {
                self.app.handle_message(message);
            }

            if self.app.should_quit() {
                return Ok(());
            }

            let ready = event::poll(TICK)
                .map_err(|e| TuiError::new(format!("Failed to poll events: {}", e)))?;
            if !ready {
                tokio::task::yield_now().await;
                continue;
            }

            let event =
                event::read().map_err(|e| TuiError::new(format!("Failed to read event: {}", e)))?;
            if let Event::Key(key) = event {
                if let Some(action) = self.app.handle_key(key) {
                    self.dispatch(action);
                }
            }
        }
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Request(ticket) => {
                if let Some(previous) = self.step_task.take() {
                    previous.abort();
                }
                let requestor = Arc::clone(&self.requestor);
                let tx = self.tx.clone();
                let ticket_id = *ticket.id();
                let pending = ticket.request().clone();
                debug!(ticket_id, step = pending.step_name(), "Dispatching request");

                self.step_task = Some(tokio::spawn(async move {
                    let result = requestor.fulfil(&pending).await;
                    if tx.send(TaskMessage::Step { ticket_id, result }).is_err() {
                        debug!(ticket_id, "Event loop gone before result arrived");
                    }
                }));
            }
            Action::Cancel => {
                if let Some(task) = self.step_task.take() {
                    task.abort();
                    debug!("Aborted running request");
                }
            }
            Action::Image {
                viewer_id,
                module,
                title,
                keyword,
                size,
            } => {
                let requestor = Arc::clone(&self.requestor);
                let tx = self.tx.clone();
                self.image_tasks.retain(|task| !task.is_finished());
                self.image_tasks.push(tokio::spawn(async move {
                    let uri = requestor.request_module_image(&title, &keyword, size).await;
                    if tx
                        .send(TaskMessage::Image {
                            viewer_id,
                            module,
                            uri,
                        })
                        .is_err()
                    {
                        debug!(viewer_id, module, "Event loop gone before image arrived");
                    }
                }));
            }
        }
    }

    fn shutdown(&mut self) {
        let mut aborted = 0;
        for task in self.step_task.take().into_iter().chain(self.image_tasks.drain(..)) {
            if !task.is_finished() {
                task.abort();
                aborted += 1;
            }
        }
        if aborted > 0 {
            warn!(aborted, "Abandoned in-flight requests on exit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn guarded_setup(restored: &Cell<u32>, fail: bool) -> CursoResult<()> {
        let guard = SetupGuard::new(|| restored.set(restored.get() + 1));
        if fail {
            return Err(TuiError::new("Failed to enter alternate screen: not a tty").into());
        }
        guard.disarm();
        Ok(())
    }

    #[test]
    fn test_setup_failure_restores_terminal() {
        let restored = Cell::new(0);
        assert!(guarded_setup(&restored, true).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_completed_setup_keeps_terminal() {
        let restored = Cell::new(0);
        assert!(guarded_setup(&restored, false).is_ok());
        assert_eq!(restored.get(), 0);
    }
}
