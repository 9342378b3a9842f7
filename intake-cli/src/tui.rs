use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use intake_core::{
    CompletionDisposition, DisplayState, IntakeError, LOADING_MESSAGE, Panel, ParseResult,
    SUPPORTED_ISSUERS,
};
use intake_ingest::IntakeController;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Handle;

use crate::candidate;
use crate::render::{FOOTER_HINT, FOOTER_PRIVACY, TAGLINE, TITLE};

const ACTIVITY_LINES: usize = 6;

struct Screen {
    controller: IntakeController,
    input: String,
    activity: Vec<String>,
}

impl Screen {
    fn log(&mut self, msg: impl AsRef<str>) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.activity.push(format!("{stamp} {}", msg.as_ref()));
        let overflow = self.activity.len().saturating_sub(ACTIVITY_LINES);
        self.activity.drain(..overflow);
    }

    fn submit(&mut self) {
        let raw = self.input.trim().to_string();
        self.input.clear();
        if raw.is_empty() {
            return;
        }

        let path = PathBuf::from(&raw);
        let file = match candidate::from_path(&path, None) {
            Ok(f) => f,
            Err(e) => {
                self.log(format!("cannot open {raw}: {e:#}"));
                return;
            }
        };

        let name = file.name.clone();
        match self.controller.select_file(file) {
            Ok(ticket) => self.log(format!("parsing {name} (#{})", ticket.generation())),
            Err(IntakeError::InvalidFileType { mime_type }) => {
                self.log(format!("rejected {name} ({mime_type})"))
            }
            Err(e) => self.log(format!("rejected {name}: {e}")),
        }
    }

    fn poll_completions(&mut self) {
        for (ticket, disposition) in self.controller.drain_completions() {
            match disposition {
                CompletionDisposition::Applied => {
                    self.log(format!("extraction #{} resolved", ticket.generation()))
                }
                CompletionDisposition::DiscardedStale => {
                    self.log(format!("extraction #{} superseded", ticket.generation()))
                }
            }
        }
    }
}

/// Interactive intake screen. Blocks the calling thread; extraction tasks run
/// on `handle`.
pub fn run_tui(handle: Handle, controller: IntakeController) -> Result<()> {
    let _guard = handle.enter();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut screen = Screen {
        controller,
        input: String::new(),
        activity: Vec::new(),
    };
    screen.log("type a path and press Enter; Esc quits");

    let res = screen_loop(&mut terminal, &mut screen);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn screen_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, screen: &mut Screen) -> Result<()> {
    loop {
        screen.poll_completions();
        let display = screen.controller.display();
        terminal.draw(|f| draw(f, screen, &display))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Enter => screen.submit(),
                    KeyCode::Backspace => {
                        screen.input.pop();
                    }
                    KeyCode::Char(c) => screen.input.push(c),
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, screen: &Screen, display: &DisplayState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(ACTIVITY_LINES as u16 + 2),
            Constraint::Length(2),
        ])
        .split(f.area());

    let header = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Indexed(62))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(TAGLINE, Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("Supported Card Issuers: {}", issuer_list()),
            Style::default().fg(Color::Green),
        )),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("intake {}", env!("INTAKE_BUILD_SHA"))),
    );
    f.render_widget(header, chunks[0]);

    let prompt = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            display.upload_prompt.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            display.upload_prompt.hint.clone(),
            Style::default().fg(Color::Gray),
        )),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("upload"));
    f.render_widget(prompt, chunks[1]);

    let input = Paragraph::new(screen.input.as_str())
        .block(Block::default().borders(Borders::ALL).title("path"))
        .style(Style::default().fg(Color::White));
    f.render_widget(input, chunks[2]);

    draw_panel(f, chunks[3], &display.panel);

    let activity: Vec<Line> = screen.activity.iter().map(|l| Line::raw(l.as_str())).collect();
    let activity = Paragraph::new(Text::from(activity))
        .block(Block::default().borders(Borders::ALL).title("activity"));
    f.render_widget(activity, chunks[4]);

    let footer = Paragraph::new(Text::from(vec![
        Line::raw(FOOTER_HINT),
        Line::raw(FOOTER_PRIVACY),
    ]))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Gray));
    f.render_widget(footer, chunks[5]);
}

fn draw_panel(f: &mut Frame, area: Rect, panel: &Panel) {
    let (title, lines, color) = match panel {
        Panel::Empty => ("", vec![], Color::Reset),
        Panel::Error(msg) => ("Error", vec![Line::raw(msg.as_str())], Color::Red),
        Panel::Loading => ("", vec![Line::raw(LOADING_MESSAGE)], Color::Indexed(62)),
        Panel::Result(result) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    result.issuer.as_str(),
                    issuer_style(result),
                )),
                Line::from(Span::styled(result.subheading(), Style::default().fg(Color::Gray))),
                Line::raw(""),
            ];
            for point in result.data_points() {
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", point.label()), Style::default().fg(Color::Gray)),
                    Span::raw(point.value.to_string()),
                ]));
            }
            ("Extracted Data Points", lines, Color::Reset)
        }
    };

    let widget = Paragraph::new(Text::from(lines))
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}

/// Issuers on the advisory list are highlighted; anything else is still shown.
fn issuer_style(result: &ParseResult) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match result.known_issuer() {
        Some(_) => base.fg(Color::Green),
        None => base.fg(Color::Yellow),
    }
}

fn issuer_list() -> String {
    SUPPORTED_ISSUERS
        .iter()
        .map(|i| i.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::SelectedFile;

    #[test]
    fn test_issuer_style_marks_unlisted_issuer() {
        let file = SelectedFile::new("statement.pdf", 1331, "application/pdf");
        let mut result = intake_ingest::sample_result(&file);
        assert_eq!(issuer_style(&result).fg, Some(Color::Green));

        result.issuer = "Some Credit Union".to_string();
        assert_eq!(issuer_style(&result).fg, Some(Color::Yellow));
    }
}
