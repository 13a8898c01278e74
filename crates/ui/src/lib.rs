//! ratatui-based UI.
//!
//! A thin adapter: it turns [`Projection`]s into widgets and key presses into
//! [`BrowserSession`] calls. No filtering or paging rules live here.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context as _;
use bookcase_application::{BookDetail, BrowserSession, Projection};
use bookcase_core::{Rgb, Theme};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::{debug, info};

mod panels;
mod text;

use panels::{SearchField, SearchPanel, SettingsPanel};
use text::{truncate, wrap_text};

const GRID_COLUMNS: usize = 3;
const CELL_HEIGHT: u16 = 4;
const EMPTY_MESSAGE: &str = "No results found. Your filters might be too narrow.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Ui {
    session: BrowserSession,
    projection: Projection,
    selected: usize,
    scroll_row: usize,
    search_panel: SearchPanel,
    settings_panel: SettingsPanel,
    detail: Option<BookDetail>,
    status: Option<String>,
}

impl Ui {
    pub fn new(session: BrowserSession) -> Self {
        let projection = session.projection();
        Self {
            session,
            projection,
            selected: 0,
            scroll_row: 0,
            search_panel: SearchPanel::default(),
            settings_panel: SettingsPanel::default(),
            detail: None,
            status: None,
        }
    }

    pub fn session(&self) -> &BrowserSession {
        &self.session
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut terminal = setup_terminal()?;
        terminal.clear().ok();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.event_loop(&mut terminal)
        }));
        let restore_result = restore_terminal(&mut terminal);

        match (result, restore_result) {
            (Ok(Ok(())), Ok(())) => Ok(()),
            (Ok(Ok(())), Err(err)) => Err(err),
            (Ok(Err(err)), _) => Err(err),
            (Err(panic), Ok(())) => Err(anyhow::anyhow!(panic_to_string(panic))),
            (Err(panic), Err(err)) => Err(anyhow::anyhow!(
                "{}\n(additionally failed to restore terminal: {err})",
                panic_to_string(panic)
            )),
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let tick_rate = Duration::from_millis(250);
        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame.area(), frame))?;
                needs_redraw = false;
            }

            if !event::poll(tick_rate)? {
                continue;
            }

            match event::read()? {
                Event::Resize(_, _) => needs_redraw = true,
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    needs_redraw = true;
                    if self.handle_key(key) == Flow::Quit {
                        info!("quit requested");
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        if self.settings_panel.open {
            self.handle_settings_panel_key(key);
        } else if self.search_panel.open {
            self.handle_search_panel_key(key);
        } else if self.detail.is_some() {
            self.handle_detail_key(key);
        } else {
            return self.handle_main_key(key);
        }
        Flow::Continue
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> Flow {
        self.status = None;
        match key.code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('/') => {
                self.search_panel.open_for(&self.session);
                debug!("search overlay opened");
            }
            KeyCode::Char('s') => {
                self.settings_panel.theme = self.session.theme();
                self.settings_panel.open = true;
                debug!("settings overlay opened");
            }
            KeyCode::Char('m') | KeyCode::Char(' ') => self.show_more(),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-(GRID_COLUMNS as isize)),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(GRID_COLUMNS as isize),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.projection.items.len().saturating_sub(1);
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_search_panel_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.search_panel.open = false,
            KeyCode::Enter => self.submit_search(),
            KeyCode::Tab | KeyCode::Down => {
                self.search_panel.focus = self.search_panel.focus.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.search_panel.focus = self.search_panel.focus.prev();
            }
            KeyCode::Left => self.search_panel.cycle(false),
            KeyCode::Right => self.search_panel.cycle(true),
            KeyCode::Backspace if self.search_panel.focus == SearchField::Title => {
                self.search_panel.title.pop();
            }
            KeyCode::Char('u')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && self.search_panel.focus == SearchField::Title =>
            {
                self.search_panel.title.clear();
            }
            KeyCode::Char(ch) if self.search_panel.focus == SearchField::Title => {
                self.search_panel.title.push(ch);
            }
            _ => {}
        }
    }

    fn handle_settings_panel_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.settings_panel.open = false,
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.settings_panel.theme = self.settings_panel.theme.toggled();
            }
            KeyCode::Char('d') => self.settings_panel.theme = Theme::Day,
            KeyCode::Char('n') => self.settings_panel.theme = Theme::Night,
            KeyCode::Enter => {
                self.session.set_theme(self.settings_panel.theme);
                self.settings_panel.open = false;
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            self.detail = None;
        }
    }

    fn submit_search(&mut self) {
        let query = self.search_panel.query();
        self.projection = self.session.submit_filter(query);
        self.selected = 0;
        self.scroll_row = 0;
        self.search_panel.open = false;
    }

    fn show_more(&mut self) {
        self.projection = self.session.show_more();
    }

    fn open_selected(&mut self) {
        let Some(item) = self.projection.items.get(self.selected) else {
            return;
        };
        match self.session.detail(&item.id) {
            Ok(detail) => self.detail = Some(detail),
            Err(err) => {
                debug!(error = %err, "selection did not resolve");
                self.status = Some(err.to_string());
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.projection.items.len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let target = self.selected as isize + delta;
        if (0..len as isize).contains(&target) {
            self.selected = target as usize;
        }
    }

    fn ensure_selected_visible(&mut self, rows_visible: usize) {
        let rows_visible = rows_visible.max(1);
        let selected_row = self.selected / GRID_COLUMNS;
        if selected_row < self.scroll_row {
            self.scroll_row = selected_row;
        } else if selected_row >= self.scroll_row + rows_visible {
            self.scroll_row = selected_row + 1 - rows_visible;
        }
    }

    fn base_style(&self) -> Style {
        let palette = self.session.theme().palette();
        Style::default()
            .fg(rgb(palette.dark))
            .bg(rgb(palette.light))
    }

    fn accent_color(&self) -> Color {
        match self.session.theme() {
            Theme::Day => Color::Blue,
            Theme::Night => Color::Yellow,
        }
    }

    fn draw(&mut self, area: Rect, frame: &mut ratatui::Frame) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(self.base_style()), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let header = Paragraph::new(Text::from(self.header_lines()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, layout[0]);

        self.draw_grid(frame, layout[1]);

        let footer = Paragraph::new(Text::from(self.footer_lines()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, layout[2]);

        if let Some(detail) = &self.detail {
            self.draw_detail(detail, area, frame);
        }
        if self.search_panel.open {
            self.draw_search_panel(area, frame);
        }
        if self.settings_panel.open {
            self.draw_settings_panel(area, frame);
        }
    }

    fn header_lines(&self) -> Vec<Line<'static>> {
        let catalogue_len = self.session.catalogue().len();
        let summary = if self.session.query().is_unrestricted() {
            format!("{} of {} books", self.projection.items.len(), catalogue_len)
        } else {
            format!(
                "{} of {} matches ({} books)",
                self.projection.items.len(),
                self.projection.total_matches,
                catalogue_len
            )
        };
        vec![
            Line::from(Span::styled(
                "Bookcase",
                Style::default()
                    .fg(self.accent_color())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(summary),
        ]
    }

    fn footer_lines(&self) -> Vec<Line<'static>> {
        let button_style = if self.projection.show_more_disabled {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(self.accent_color())
                .add_modifier(Modifier::BOLD)
        };

        let mut first = vec![Span::styled(
            format!(" {} ", self.projection.show_more_label()),
            button_style,
        )];
        if let Some(status) = &self.status {
            first.push(Span::raw("  "));
            first.push(Span::styled(status.clone(), Style::default().fg(Color::Red)));
        }

        let key = |label: &'static str| {
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD))
        };
        vec![
            Line::from(first),
            Line::from(vec![
                key("/"),
                Span::raw(" search  "),
                key("m"),
                Span::raw(" more  "),
                key("Enter"),
                Span::raw(" details  "),
                key("s"),
                Span::raw(" settings  "),
                key("q"),
                Span::raw(" quit"),
            ]),
        ]
    }

    fn draw_grid(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        if self.projection.is_empty() {
            let message = Paragraph::new(Text::from(vec![
                Line::raw(""),
                Line::raw(EMPTY_MESSAGE),
            ]))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            frame.render_widget(message, area);
            return;
        }

        let rows_visible = (area.height / CELL_HEIGHT) as usize;
        self.ensure_selected_visible(rows_visible);

        let accent = self.accent_color();
        let first = self.scroll_row * GRID_COLUMNS;
        let items = self.projection.items.iter().enumerate().skip(first);
        for (offset, (idx, item)) in items.take(rows_visible * GRID_COLUMNS).enumerate() {
            let row = (offset / GRID_COLUMNS) as u16;
            let row_area = Rect {
                x: area.x,
                y: area.y + row * CELL_HEIGHT,
                width: area.width,
                height: CELL_HEIGHT,
            };
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                .split(row_area);
            let cell = cells[offset % GRID_COLUMNS];

            let border_style = if idx == self.selected {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style);
            let width = block.inner(cell).width as usize;
            let lines = vec![
                Line::from(Span::styled(
                    truncate(&item.title, width),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    truncate(&item.author_name, width),
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ];
            frame.render_widget(Paragraph::new(Text::from(lines)).block(block), cell);
        }
    }

    fn draw_search_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .style(self.base_style())
            .borders(Borders::ALL)
            .title(Span::styled(
                "Search",
                Style::default().add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(block.clone(), popup_area);

        let inner = block.inner(popup_area);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        let panel = &self.search_panel;
        let field = |label: &'static str, value: String, which: SearchField| {
            let focused = panel.focus == which;
            let marker = if focused { "> " } else { "  " };
            let value_style = if focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(self.accent_color())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(marker),
                Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(value, value_style),
            ])
        };

        let title_value = if panel.focus == SearchField::Title {
            format!("{}_", panel.title)
        } else {
            panel.title.clone()
        };
        let lines = vec![
            field("Title:  ", title_value, SearchField::Title),
            Line::raw(""),
            field(
                "Author: ",
                format!("‹ {} ›", panel.author_label()),
                SearchField::Author,
            ),
            Line::raw(""),
            field(
                "Genre:  ",
                format!("‹ {} ›", panel.genre_label()),
                SearchField::Genre,
            ),
        ];
        frame.render_widget(Paragraph::new(Text::from(lines)), sections[0]);

        let help = Paragraph::new(Text::from(vec![Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" field  "),
            Span::styled("←/→", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" choose  "),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" search  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ])]))
        .wrap(Wrap { trim: true });
        frame.render_widget(help, sections[1]);
    }

    fn draw_settings_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(45, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .style(self.base_style())
            .borders(Borders::ALL)
            .title(Span::styled(
                "Settings",
                Style::default().add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(block.clone(), popup_area);

        let inner = block.inner(popup_area);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        let theme = self.settings_panel.theme;
        let lines = vec![Line::from(vec![
            Span::styled("Theme: ", Style::default().add_modifier(Modifier::BOLD)),
            option_chip("day", theme == Theme::Day),
            Span::raw(" "),
            option_chip("night", theme == Theme::Night),
        ])];
        frame.render_widget(Paragraph::new(Text::from(lines)), sections[0]);

        let help = Paragraph::new(Text::from(vec![Line::from(vec![
            Span::styled("←/→", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" toggle  "),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" save  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ])]))
        .wrap(Wrap { trim: true });
        frame.render_widget(help, sections[1]);
    }

    fn draw_detail(&self, detail: &BookDetail, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .style(self.base_style())
            .borders(Borders::ALL)
            .title(Span::styled(
                truncate(&detail.title, popup_area.width.saturating_sub(4) as usize),
                Style::default()
                    .fg(self.accent_color())
                    .add_modifier(Modifier::BOLD),
            ));
        let width = block.inner(popup_area).width as usize;

        let mut lines = vec![
            Line::from(Span::styled(
                detail.subtitle.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::raw(""),
        ];
        lines.extend(
            wrap_text(&detail.description, width.max(8))
                .into_iter()
                .map(Line::raw),
        );
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Cover: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(detail.image.clone()),
        ]));
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" close"),
        ]));

        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), popup_area);
    }
}

fn rgb(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    terminal::enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen).context("enter alt screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    terminal::disable_raw_mode().context("disable raw mode")?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("leave alt screen")?;
    Ok(())
}

fn panic_to_string(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: (unknown payload)".to_string()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn option_chip(label: &str, selected: bool) -> Span<'static> {
    let base = if selected {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Span::styled(label.to_string(), base)
}

#[cfg(test)]
mod tests {
    use bookcase_application::Catalogue;
    use bookcase_core::{AuthorId, Book, BookId, GenreId, LookupTable};
    use ratatui::backend::TestBackend;

    use super::*;

    fn catalogue(count: usize) -> Catalogue {
        let books = (0..count)
            .map(|n| Book {
                id: BookId::from(format!("b{n}")),
                title: if n == 4 { "Dune".to_string() } else { format!("Book {n}") },
                author: AuthorId::from(if n % 2 == 0 { "a1" } else { "a2" }),
                genres: vec![GenreId::from("g1")],
                image: format!("https://covers.example.org/b{n}.jpg"),
                description: format!("Description of book {n}."),
                published: "1990-01-01T00:00:00Z".parse().unwrap(),
            })
            .collect();
        let authors: LookupTable<AuthorId> = [
            (AuthorId::from("a1"), "Frank Herbert".to_string()),
            (AuthorId::from("a2"), "Octavia E. Butler".to_string()),
        ]
        .into_iter()
        .collect();
        let genres: LookupTable<GenreId> = [(GenreId::from("g1"), "Fiction".to_string())]
            .into_iter()
            .collect();
        Catalogue::load(books, authors, genres).unwrap()
    }

    fn ui(count: usize) -> Ui {
        Ui::new(BrowserSession::new(catalogue(count), 12, false))
    }

    fn press(ui: &mut Ui, code: KeyCode) -> Flow {
        ui.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(ui: &mut Ui, text: &str) {
        for ch in text.chars() {
            press(ui, KeyCode::Char(ch));
        }
    }

    fn render(ui: &mut Ui) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 32)).unwrap();
        terminal.draw(|frame| ui.draw(frame.area(), frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let symbols: Vec<&str> = buffer.content.iter().map(|cell| cell.symbol()).collect();
        symbols
            .chunks(width)
            .map(|row| row.concat())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn show_more_key_advances_page() {
        let mut ui = ui(25);
        assert_eq!(ui.projection.items.len(), 12);
        press(&mut ui, KeyCode::Char('m'));
        assert_eq!(ui.session().page(), 2);
        assert_eq!(ui.projection.items.len(), 24);
        press(&mut ui, KeyCode::Char(' '));
        press(&mut ui, KeyCode::Char('m'));
        assert_eq!(ui.session().page(), 3);
        assert!(ui.projection.show_more_disabled);
    }

    #[test]
    fn search_submits_and_resets_view() {
        let mut ui = ui(25);
        press(&mut ui, KeyCode::Char('m'));
        press(&mut ui, KeyCode::Char('G'));
        render(&mut ui);
        assert_eq!(ui.selected, 23);
        assert!(ui.scroll_row > 0);

        press(&mut ui, KeyCode::Char('/'));
        assert!(ui.search_panel.open);
        type_text(&mut ui, "DUNE");
        press(&mut ui, KeyCode::Enter);

        assert!(!ui.search_panel.open);
        assert_eq!(ui.session().page(), 1);
        assert_eq!(ui.selected, 0);
        assert_eq!(ui.scroll_row, 0);
        assert_eq!(ui.projection.total_matches, 1);
        assert_eq!(ui.projection.items[0].id, BookId::from("b4"));
    }

    #[test]
    fn search_dropdown_cycles_authors() {
        let mut ui = ui(10);
        press(&mut ui, KeyCode::Char('/'));
        press(&mut ui, KeyCode::Tab);
        assert_eq!(ui.search_panel.author_label(), "All Authors");
        press(&mut ui, KeyCode::Right);
        press(&mut ui, KeyCode::Right);
        assert_eq!(ui.search_panel.author_label(), "Octavia E. Butler");
        press(&mut ui, KeyCode::Enter);
        assert_eq!(ui.projection.total_matches, 5);

        press(&mut ui, KeyCode::Char('/'));
        assert_eq!(ui.search_panel.author_label(), "Octavia E. Butler");
    }

    #[test]
    fn cancelled_search_keeps_session() {
        let mut ui = ui(25);
        press(&mut ui, KeyCode::Char('m'));
        press(&mut ui, KeyCode::Char('/'));
        type_text(&mut ui, "zzz");
        press(&mut ui, KeyCode::Esc);
        assert!(!ui.search_panel.open);
        assert_eq!(ui.session().page(), 2);
        assert_eq!(ui.projection.total_matches, 25);
    }

    #[test]
    fn enter_opens_detail_for_selected_cell() {
        let mut ui = ui(6);
        press(&mut ui, KeyCode::Right);
        press(&mut ui, KeyCode::Enter);
        let detail = ui.detail.clone().unwrap();
        assert_eq!(detail.id, BookId::from("b1"));
        assert_eq!(detail.subtitle, "Octavia E. Butler (1990)");

        assert_eq!(press(&mut ui, KeyCode::Char('q')), Flow::Continue);
        assert!(ui.detail.is_none());
        assert_eq!(press(&mut ui, KeyCode::Char('q')), Flow::Quit);
    }

    #[test]
    fn option_chip_highlights_only_the_chosen_theme() {
        let chosen = option_chip("night", true);
        assert!(chosen.style.add_modifier.contains(Modifier::REVERSED));
        let other = option_chip("day", false);
        assert_eq!(other.style.fg, Some(Color::Gray));
        assert!(!other.style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn settings_apply_theme_only_on_enter() {
        let mut ui = ui(3);
        press(&mut ui, KeyCode::Char('s'));
        press(&mut ui, KeyCode::Right);
        press(&mut ui, KeyCode::Esc);
        assert_eq!(ui.session().theme(), Theme::Day);

        press(&mut ui, KeyCode::Char('s'));
        press(&mut ui, KeyCode::Char('n'));
        press(&mut ui, KeyCode::Enter);
        assert_eq!(ui.session().theme(), Theme::Night);
        assert_eq!(ui.accent_color(), Color::Yellow);
    }

    #[test]
    fn selection_stays_inside_window() {
        let mut ui = ui(4);
        press(&mut ui, KeyCode::Left);
        assert_eq!(ui.selected, 0);
        press(&mut ui, KeyCode::Down);
        assert_eq!(ui.selected, 3);
        press(&mut ui, KeyCode::Down);
        assert_eq!(ui.selected, 3);
        press(&mut ui, KeyCode::Char('g'));
        assert_eq!(ui.selected, 0);
    }

    #[test]
    fn renders_grid_and_show_more_count() {
        let mut ui = ui(25);
        let screen = render(&mut ui);
        assert!(screen.contains("Show more (13)"));
        assert!(screen.contains("12 of 25 books"));
        assert!(screen.contains("Book 0"));
        assert!(screen.contains("Frank Herbert"));
    }

    #[test]
    fn renders_empty_state() {
        let mut ui = ui(5);
        press(&mut ui, KeyCode::Char('/'));
        type_text(&mut ui, "neuromancer");
        press(&mut ui, KeyCode::Enter);
        let screen = render(&mut ui);
        assert!(screen.contains("No results found."));
        assert!(screen.contains("Show more (0)"));
    }

    #[test]
    fn scrolling_follows_selection() {
        let mut ui = ui(36);
        ui.projection = ui.session.show_more();
        press(&mut ui, KeyCode::Char('G'));
        render(&mut ui);
        assert!(ui.scroll_row > 0);
        assert!(ui.selected / GRID_COLUMNS >= ui.scroll_row);
    }
}
