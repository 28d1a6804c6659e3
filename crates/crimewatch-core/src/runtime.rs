use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::{
    cursor, execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, rendering, or teardown.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Configuration options for a [`Program`].
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     fps: 30,
///     title: Some("crimewatch".into()),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Redraw rate cap (default: 60, clamped to 1..=120).
    pub fps: u32,
    /// Render on the alternate screen (default: true).
    pub alt_screen: bool,
    /// Terminal title to set on startup.
    pub title: Option<String>,
    /// Restore the terminal before the default panic hook runs (default: true).
    pub catch_panics: bool,
    /// Exit cleanly on Ctrl-C delivered as a signal (default: true).
    pub handle_signals: bool,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
        }
    }
}

/// Abort handles for every task spawned on behalf of a [`Command`].
///
/// A completed command task delivers its message through the program's
/// channel. When the program exits first, [`abort_all`](InFlight::abort_all)
/// cancels whatever is still running so no completion outlives the model.
#[derive(Default)]
pub(crate) struct InFlight {
    handles: Vec<AbortHandle>,
}

impl InFlight {
    pub fn spawn<Msg: Send + 'static>(
        &mut self,
        fut: futures::future::BoxFuture<'static, Msg>,
        tx: mpsc::UnboundedSender<Msg>,
    ) {
        self.handles.retain(|h| !h.is_finished());
        let handle = tokio::spawn(async move {
            let msg = fut.await;
            // Receiver gone means the program already exited.
            let _ = tx.send(msg);
        });
        self.handles.push(handle.abort_handle());
    }

    pub fn pending(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn abort_all(&mut self) -> usize {
        let pending = self.pending();
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        pending
    }
}

/// Drives a [`Model`] against the real terminal.
///
/// `Program` sets up the terminal through ratatui/crossterm, renders the
/// initial view, then loops: apply incoming messages, run the commands they
/// return, reconcile subscriptions, redraw at most `fps` times a second. It
/// stops when the model returns [`Command::quit()`] or
/// Ctrl-C arrives as a signal.
///
/// ```rust,ignore
/// let model = Program::<FeedApp>::with_options(flags, options)?.run().await?;
/// ```
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    msg_tx: mpsc::UnboundedSender<M::Message>,
    msg_rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
    in_flight: InFlight,
    options: ProgramOptions,
    needs_redraw: bool,
    should_quit: bool,
}

impl<M: Model> Program<M> {
    /// Create a program with custom options.
    ///
    /// Must be called inside a tokio runtime: the startup command is spawned
    /// immediately.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);

        let terminal = init_terminal(&options)?;
        let subscriptions = SubscriptionManager::new(msg_tx.clone());

        let mut program = Self {
            model,
            terminal,
            msg_tx,
            msg_rx,
            subscriptions,
            in_flight: InFlight::default(),
            options,
            needs_redraw: true,
            should_quit: false,
        };

        tracing::debug!(fps = program.options.fps, "program initialized");
        program.execute_command(init_cmd);
        let subs = program.model.subscriptions();
        program.subscriptions.reconcile(subs);

        Ok(program)
    }

    /// Run until quit and return the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop().await;

        let aborted = self.in_flight.abort_all();
        if aborted > 0 {
            tracing::info!(aborted, "cancelled in-flight commands on exit");
        }
        self.subscriptions.shutdown();
        self.msg_rx.close();
        restore_terminal(self.options.alt_screen)?;
        tracing::debug!("program shut down");

        result.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frame_interval = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let handle_signals = self.options.handle_signals;

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    tracing::debug!("received ctrl+c signal");
                    return Ok(());
                }

                Some(msg) = self.msg_rx.recv() => {
                    self.process_message(msg);
                    // Drain whatever else is queued so one redraw covers it.
                    while let Ok(msg) = self.msg_rx.try_recv() {
                        self.process_message(msg);
                        if self.should_quit {
                            break;
                        }
                    }
                    if self.should_quit {
                        return Ok(());
                    }
                }

                _ = frame_interval.tick() => {
                    if self.needs_redraw {
                        self.render()?;
                        self.needs_redraw = false;
                    }
                }
            }
        }
    }

    fn process_message(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute_command(cmd);

        let subs = self.model.subscriptions();
        self.subscriptions.reconcile(subs);

        self.needs_redraw = true;
    }

    fn execute_command(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = self.msg_tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => {
                self.should_quit = true;
            }
            CommandInner::Future(fut) => {
                self.in_flight.spawn(fut, self.msg_tx.clone());
                tracing::trace!(pending = self.in_flight.pending(), "spawned command task");
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd);
                }
            }
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        self.terminal.draw(|frame| self.model.view(frame))?;
        Ok(())
    }
}

fn init_terminal(
    options: &ProgramOptions,
) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal(alt_screen);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut out = stdout();
    if options.alt_screen {
        execute!(out, EnterAlternateScreen)?;
    }
    if let Some(ref title) = options.title {
        execute!(out, SetTitle(title))?;
    }
    execute!(out, cursor::Hide)?;

    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

/// Best-effort teardown: every step runs even if an earlier one fails, and
/// only the raw-mode error is reported.
fn restore_terminal(alt_screen: bool) -> Result<(), io::Error> {
    let raw = disable_raw_mode();
    let mut out = stdout();
    execute!(out, cursor::Show).ok();
    if alt_screen {
        execute!(out, LeaveAlternateScreen).ok();
    }
    raw
}
