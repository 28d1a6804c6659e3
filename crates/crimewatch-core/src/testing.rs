use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use futures::future::BoxFuture;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

/// A headless harness that drives a [`Model`] without a terminal.
///
/// Synchronous commands are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages). Async commands are not
/// spawned; they are parked until the test calls
/// [`settle`](TestProgram::settle), which lets a test observe the model
/// both before and after a fetch completes.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<FeedApp>::new(flags);
/// assert!(prog.model().state().is_loading());
/// assert_eq!(prog.pending_tasks(), 1);
///
/// prog.settle().await;
/// assert!(prog.render_string(60, 20).contains("No incidents found."));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    pending_tasks: Vec<BoxFuture<'static, M::Message>>,
    quit_requested: bool,
    tasks_issued: usize,
}

impl<M: Model> TestProgram<M> {
    /// Call [`Model::init`] and collect whatever it returned.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            pending_tasks: Vec::new(),
            quit_requested: false,
            tasks_issued: 0,
        };
        program.collect(init_cmd);
        program
    }

    /// Run one update cycle with `msg`.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Process queued synchronous messages until none are left.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Await every parked async command in issue order, feeding each result
    /// back through `update`, until no work remains.
    pub async fn settle(&mut self) {
        loop {
            self.drain_messages();
            if self.pending_tasks.is_empty() {
                break;
            }
            let tasks: Vec<_> = self.pending_tasks.drain(..).collect();
            for task in tasks {
                let msg = task.await;
                self.send(msg);
            }
        }
    }

    /// Drop parked async commands without running them, as the runtime does
    /// when the program exits before they finish.
    pub fn abandon_pending(&mut self) -> usize {
        let n = self.pending_tasks.len();
        self.pending_tasks.clear();
        n
    }

    /// Async commands that have been issued but not yet settled.
    pub fn pending_tasks(&self) -> usize {
        self.pending_tasks.len()
    }

    /// Async commands issued over the program's whole lifetime.
    pub fn tasks_issued(&self) -> usize {
        self.tasks_issued
    }

    /// Whether any update returned [`Command::quit`].
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Shared access to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Render into a ratatui [`Buffer`] of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| self.model.view(frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render and return the screen as text, one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => self.pending_messages.push(msg),
            CommandInner::Action(Action::Quit) => self.quit_requested = true,
            CommandInner::Future(fut) => {
                self.tasks_issued += 1;
                self.pending_tasks.push(fut);
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}

/// Flatten a buffer into text, rows separated by `\n`.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}
