//! Terminal UI implementation using ratatui
//!
//! Draws the search screen: the search box with its clear button, the history dropdown,
//! the Previous/Next buttons, the result list and a status line. Key handling lives in the
//! input subsystem; this type only renders.

use crate::error::{GiflensError, Result};
use crate::render::ui::{ColorTheme, UIRenderer, ViewState};
use ratatui::crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const CLEAR_BUTTON_WIDTH: u16 = 12;
const MAX_DROPDOWN_ROWS: u16 = 8;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme: ColorTheme::default(),
        })
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    fn draw_frame(frame: &mut Frame, view_state: &ViewState, theme: &ColorTheme) {
        let size = frame.size();

        // Search row, pagination row, results, status line
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(size);

        let search_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(CLEAR_BUTTON_WIDTH)].as_ref())
            .split(rows[0]);

        Self::render_search_box(frame, search_row[0], view_state, theme);
        Self::render_clear_button(frame, search_row[1], view_state, theme);
        Self::render_pagination(frame, rows[1], view_state, theme);
        Self::render_results(frame, rows[2], view_state, theme);
        Self::render_status(frame, rows[3], view_state, theme);

        // The dropdown overlaps the rows below the search box
        if view_state.dropdown_visible() {
            Self::render_history_dropdown(frame, search_row[0], rows[3].y, view_state, theme);
        }
    }

    fn render_search_box(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.input_border))
            .title(" Search GIFs ");
        let inner_width = usize::from(area.width.saturating_sub(2));
        let (visible, typed) = visible_tail(&view_state.term, inner_width.saturating_sub(1));
        let input = Paragraph::new(visible).block(block);
        frame.render_widget(input, area);

        // `typed` never exceeds the inner width, so it fits in a u16
        let cursor_x = area.x.saturating_add(1).saturating_add(typed as u16);
        let max_x = area.x.saturating_add(area.width.saturating_sub(2));
        frame.set_cursor(cursor_x.min(max_x), area.y.saturating_add(1));
    }

    fn render_clear_button(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let style = if view_state.term.is_empty() {
            theme.button_disabled
        } else {
            theme.button
        };
        let button = Paragraph::new(Line::from(Span::styled(" Clear ^U ", style)))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(button, area);
    }

    fn render_pagination(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let style_for = |enabled: bool| {
            if enabled {
                theme.button
            } else {
                theme.button_disabled
            }
        };

        let line = Line::from(vec![
            Span::styled(" < Previous [PgUp] ", style_for(view_state.can_prev)),
            Span::raw("  "),
            Span::styled(" Next [PgDn] > ", style_for(view_state.can_next)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_results(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let items: Vec<ListItem> = view_state
            .results
            .iter()
            .map(|item| {
                let title = if item.title.trim().is_empty() {
                    "(untitled)"
                } else {
                    item.title.as_str()
                };
                ListItem::new(vec![
                    Line::from(Span::styled(title, theme.result_title)),
                    Line::from(Span::styled(item.display_url.as_str(), theme.result_url)),
                ])
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::TOP).title(" Results "));
        frame.render_widget(list, area);
    }

    fn render_history_dropdown(
        frame: &mut Frame,
        anchor: Rect,
        bottom: u16,
        view_state: &ViewState,
        theme: &ColorTheme,
    ) {
        let top = anchor.y + anchor.height;
        let rows = (view_state.history.len() as u16).min(MAX_DROPDOWN_ROWS) + 2;
        let height = rows.min(bottom.saturating_sub(top));
        if height < 3 {
            return;
        }
        let area = Rect::new(anchor.x, top, anchor.width, height);

        let items: Vec<ListItem> = view_state
            .history
            .iter()
            .map(|term| ListItem::new(Line::from(term.as_str())))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" History (Enter: search, Del: remove) "),
            )
            .highlight_style(theme.history_selected);

        let mut state = ListState::default();
        state.select(Some(view_state.history_selected));

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view_state.format_status_line()).style(status_style);
        frame.render_widget(status, area);
    }
}

/// The longest suffix of `term` whose display width fits in `max_width`, with that width.
/// The search box scrolls so the end of the term stays visible.
fn visible_tail(term: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;
    let mut start = term.len();
    let mut buf = [0u8; 4];
    for (idx, ch) in term.char_indices().rev() {
        let ch_width = Span::raw(&*ch.encode_utf8(&mut buf)).width();
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        start = idx;
    }
    (&term[start..], width)
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;
            terminal.draw(|frame| Self::draw_frame(frame, view_state, theme))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        ratatui::crossterm::terminal::size()
            .map_err(|err| GiflensError::ui(format!("cannot read terminal size: {err}")))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
