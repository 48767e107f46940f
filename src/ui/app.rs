//! Main TUI application state and logic

use crate::console::OutputLine;
use crate::execute::{execute_report, transpile};
use crate::gallery::{ExampleProgram, EXAMPLES};
use crate::interpreter::ExecutionLimits;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Console,
    Examples,
    Transpiled,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> console -> examples -> javascript)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Console,
            FocusedPane::Console => FocusedPane::Examples,
            FocusedPane::Examples => FocusedPane::Transpiled,
            FocusedPane::Transpiled => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Transpiled,
            FocusedPane::Console => FocusedPane::Source,
            FocusedPane::Examples => FocusedPane::Console,
            FocusedPane::Transpiled => FocusedPane::Examples,
        }
    }
}

/// Outcome of the most recent run, shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotRun,
    Succeeded { steps: u64 },
    Failed,
}

/// The main application state
pub struct App {
    /// Name shown in the source pane title
    pub source_name: String,

    /// The program being edited and run
    pub source_code: String,

    /// Applied to every run
    pub limits: ExecutionLimits,

    /// Lines of the last run
    pub output: Vec<OutputLine>,

    /// 1-based line of the last fault
    pub error_line: Option<usize>,

    /// JavaScript export, or the compile error text
    pub generated: Result<String, String>,

    pub run_state: RunState,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into the gallery
    pub selected_example: usize,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub console_scroll: usize,
    pub transpiled_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app for the given source
    pub fn new(source_name: String, source_code: String, limits: ExecutionLimits) -> Self {
        let mut app = App {
            source_name,
            source_code: String::new(),
            limits,
            output: Vec::new(),
            error_line: None,
            generated: Ok(String::new()),
            run_state: RunState::NotRun,
            focused_pane: FocusedPane::Source,
            selected_example: 0,
            source_scroll: 0,
            console_scroll: 0,
            transpiled_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        };
        app.set_source(source_code);
        app
    }

    /// Create an app showing a gallery example
    pub fn with_example(example: &ExampleProgram, limits: ExecutionLimits) -> Self {
        let mut app = App::new(example.title.to_string(), example.code.to_string(), limits);
        app.selected_example = EXAMPLES
            .iter()
            .position(|e| e.id == example.id)
            .unwrap_or(0);
        app
    }

    /// Replace the source and clear the previous run
    fn set_source(&mut self, source_code: String) {
        self.generated = transpile(&source_code).map_err(|e| e.console_message());
        self.source_code = source_code;
        self.output.clear();
        self.error_line = None;
        self.run_state = RunState::NotRun;
        self.source_scroll = 0;
        self.console_scroll = 0;
        self.transpiled_scroll = 0;
    }

    /// Run the current source and capture the report
    pub fn run_program(&mut self) {
        let report = execute_report(&self.source_code, &self.limits);
        self.error_line = report.fault_location.map(|loc| loc.line);
        self.run_state = if report.succeeded() {
            RunState::Succeeded {
                steps: report.steps,
            }
        } else {
            RunState::Failed
        };
        self.status_message = match self.error_line {
            Some(line) => format!("Run failed at line {}", line),
            None => "Run complete".to_string(),
        };
        self.output = report.lines;
        // Auto-scroll console to bottom
        self.console_scroll = usize::MAX;

        // Bring the faulting line into view
        if let Some(line) = self.error_line {
            self.source_scroll = line.saturating_sub(3);
        }
    }

    /// Load the selected gallery example
    fn load_selected_example(&mut self) {
        if let Some(example) = EXAMPLES.get(self.selected_example) {
            self.source_name = example.title.to_string();
            self.set_source(example.code.to_string());
            self.status_message = format!("Loaded example '{}'", example.id);
            self.focused_pane = FocusedPane::Source;
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Console (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        // Right column: Examples (top) | JavaScript (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(columns[1]);

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_name,
            &self.source_code,
            self.error_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_console_pane(
            frame,
            left_rows[1],
            &self.output,
            self.focused_pane == FocusedPane::Console,
            &mut self.console_scroll,
        );

        super::panes::render_examples_pane(
            frame,
            right_rows[0],
            EXAMPLES,
            self.selected_example,
            self.focused_pane == FocusedPane::Examples,
        );

        super::panes::render_transpiled_pane(
            frame,
            right_rows[1],
            &self.generated,
            self.focused_pane == FocusedPane::Transpiled,
            &mut self.transpiled_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.run_state,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::F(5) => {
                self.run_program();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_sub(1);
                }
                FocusedPane::Console => {
                    self.console_scroll = self.console_scroll.saturating_sub(1);
                }
                FocusedPane::Examples => {
                    self.selected_example = self.selected_example.saturating_sub(1);
                }
                FocusedPane::Transpiled => {
                    self.transpiled_scroll = self.transpiled_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_add(1);
                }
                FocusedPane::Console => {
                    self.console_scroll = self.console_scroll.saturating_add(1);
                }
                FocusedPane::Examples => {
                    if self.selected_example + 1 < EXAMPLES.len() {
                        self.selected_example += 1;
                    }
                }
                FocusedPane::Transpiled => {
                    self.transpiled_scroll = self.transpiled_scroll.saturating_add(1);
                }
            },
            KeyCode::Enter if self.focused_pane == FocusedPane::Examples => {
                self.load_selected_example();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::OutputKind;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycles() {
        let mut pane = FocusedPane::Source;
        for _ in 0..4 {
            pane = pane.next();
        }
        assert_eq!(pane, FocusedPane::Source);
        assert_eq!(FocusedPane::Source.prev(), FocusedPane::Transpiled);
    }

    #[test]
    fn test_run_key_executes_source() {
        let mut app = App::new("demo".into(), "likh 1 + 2".into(), ExecutionLimits::default());
        press(&mut app, KeyCode::Char('r'));

        assert_eq!(app.output[0], OutputLine::output("3"));
        assert_eq!(app.output[1].kind, OutputKind::Success);
        assert!(matches!(app.run_state, RunState::Succeeded { .. }));
        assert_eq!(app.generated.as_deref(), Ok("console.log((1 + 2));"));
    }

    #[test]
    fn test_runtime_error_marks_line() {
        let mut app = App::new("demo".into(), "likh 1\nlikh x".into(), ExecutionLimits::default());
        app.run_program();
        assert_eq!(app.run_state, RunState::Failed);
        assert_eq!(app.error_line, Some(2));
    }

    #[test]
    fn test_load_example_from_gallery() {
        let mut app = App::new("demo".into(), String::new(), ExecutionLimits::default());
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Examples);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.source_code, EXAMPLES[1].code);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        assert_eq!(app.run_state, RunState::NotRun);
    }

    #[test]
    fn test_quit() {
        let mut app = App::new("demo".into(), String::new(), ExecutionLimits::default());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
