//! Interactive console. Shows the pages of the signed-in role and runs
//! their actions from the keyboard.

use crate::command::context;
use crate::tui;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use evrent_client::domain::User;
use evrent_client::notify::MemoryNotifier;
use evrent_client::screens::ScreenContext;
use evrent_client::settings::Settings;
use eyre::{Context as EyreContext, Result};
use futures_util::stream::StreamExt;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::palette::tailwind::{BLUE, GRAY};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::time::{sleep, Duration};

mod list;
mod prompt;
mod view;

use list::List;
use prompt::{ConfirmKind, PromptState, SearchStep};
use view::{Route, Row, View};

const HELP: &[&str] = &[
    "j/k      di chuyển",
    "h/l      chuyển trang",
    "/        tìm kiếm",
    "f        đổi bộ lọc (tab trên quầy thuê xe)",
    "Tab      tab tiếp theo",
    "Enter    thao tác chính / xem chi tiết",
    "t        khóa/mở khóa, chuyển trạng thái sự cố",
    "v        xác minh giấy tờ",
    "d        xóa / hủy",
    "p        thu tiền mặt",
    "r        tải lại",
    "Esc      đóng",
    "C-c      thoát",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockFocus {
    Main,
    Prompt,
    Modal,
}

#[derive(Debug)]
enum QueryKind {
    Load,
    Toggle(String),
    Verify(String),
    Enter(Row),
    Confirm(ConfirmKind),
}

#[derive(Debug, Default)]
struct QueryQueue(Vec<QueryKind>);

impl QueryQueue {
    fn push(&mut self, query: QueryKind) {
        self.0.push(query);
    }

    /// Queries run in the order they were queued.
    fn pop(&mut self) -> Option<QueryKind> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.remove(0))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunningState {
    Active,
    Quit,
}

enum Event {
    KeyInput(KeyEvent),
    TerminalTick,
}

struct AppState {
    user: User,
    routes: &'static [Route],
    route: usize,
    ctx: ScreenContext,
    toasts: Arc<MemoryNotifier>,
    view: View,
    rows: List<Row>,
    prompt: PromptState,
    modal: Option<Vec<String>>,
    block_focus: BlockFocus,
    query_queue: QueryQueue,
    status: RunningState,
}

impl AppState {
    fn new(user: User, ctx: ScreenContext, toasts: Arc<MemoryNotifier>) -> Self {
        let routes = Route::for_role(user.role);
        let view = View::open(routes[0], ctx.clone());
        let mut query_queue = QueryQueue::default();
        query_queue.push(QueryKind::Load);

        Self {
            user,
            routes,
            route: 0,
            ctx,
            toasts,
            view,
            rows: List::default(),
            prompt: PromptState::Default,
            modal: None,
            block_focus: BlockFocus::Main,
            query_queue,
            status: RunningState::Active,
        }
    }

    fn running(&self) -> bool {
        self.status == RunningState::Active
    }

    fn quit(&mut self) {
        self.status = RunningState::Quit;
    }

    fn current_route(&self) -> Route {
        self.routes[self.route]
    }

    fn switch_route(&mut self, forward: bool) {
        let len = self.routes.len();
        self.route = if forward {
            (self.route + 1) % len
        } else {
            (self.route + len - 1) % len
        };
        self.view = View::open(self.current_route(), self.ctx.clone());
        self.rows.reset();
        self.prompt = PromptState::Default;
        self.query_queue.push(QueryKind::Load);
    }

    /// Recomputes the visible rows after the data or a filter changed.
    fn refresh_rows(&mut self) {
        self.rows.set_data(self.view.rows(OffsetDateTime::now_utc()));
    }

    fn open_modal(&mut self, lines: Vec<String>) {
        self.modal = Some(lines);
        self.block_focus = BlockFocus::Modal;
    }

    fn close_modal(&mut self) {
        self.modal = None;
        self.block_focus = BlockFocus::Main;
    }

    /// Shows the latest toast raised by a screen in the prompt line.
    fn show_toasts(&mut self) {
        if let Some(toast) = self.toasts.drain().pop() {
            self.prompt = PromptState::toast(&toast);
        }
    }

    fn selected_row(&self) -> Option<Row> {
        self.rows.selected().cloned()
    }

    fn handle_terminal_event(&mut self, ev: CrosstermEvent) -> Option<Event> {
        match ev {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                Some(Event::KeyInput(key))
            }
            CrosstermEvent::Resize(_, _) => Some(Event::TerminalTick),
            _ => None,
        }
    }

    fn handle_global_exit(&mut self, event: &KeyEvent) -> bool {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Char('c') if ctrl => {
                self.quit();
                true
            }
            _ => false,
        }
    }

    fn handle_key_input(&mut self, key_event: KeyEvent) {
        if self.handle_global_exit(&key_event) {
            return;
        }

        match self.block_focus {
            BlockFocus::Main => self.handle_main_key(key_event),
            BlockFocus::Prompt => self.handle_prompt_key(key_event),
            BlockFocus::Modal => {
                if matches!(key_event.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.close_modal();
                }
            }
        }
    }

    fn handle_main_key(&mut self, key_event: KeyEvent) {
        let row = self.selected_row();

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.rows.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.rows.move_up(),
            KeyCode::Char('l') | KeyCode::Right => self.switch_route(true),
            KeyCode::Char('h') | KeyCode::Left => self.switch_route(false),
            KeyCode::Char('/') => {
                self.prompt = PromptState::search(self.view.search());
                self.block_focus = BlockFocus::Prompt;
            }
            KeyCode::Char('f') | KeyCode::Tab => {
                self.view.cycle_filter();
                self.rows.reset();
                self.refresh_rows();
            }
            KeyCode::Char('r') => self.query_queue.push(QueryKind::Load),
            KeyCode::Char('?') => {
                let lines = HELP.iter().map(|x| x.to_string()).collect();
                self.open_modal(lines);
            }
            KeyCode::Esc => {
                if let PromptState::Search { .. } = self.prompt {
                    self.view.set_search("");
                    self.refresh_rows();
                }
                self.prompt = PromptState::Default;
            }
            KeyCode::Char('t') => {
                if let Some(row) = row {
                    self.query_queue.push(QueryKind::Toggle(row.id));
                }
            }
            KeyCode::Char('v') => {
                if let Some(row) = row {
                    self.query_queue.push(QueryKind::Verify(row.id));
                }
            }
            KeyCode::Enter => {
                if let Some(row) = row {
                    self.query_queue.push(QueryKind::Enter(row));
                }
            }
            KeyCode::Char('d') => {
                if let Some(kind) = row.and_then(|x| self.view.delete_request(&x)) {
                    self.prompt = PromptState::confirm(kind);
                    self.block_focus = BlockFocus::Prompt;
                }
            }
            KeyCode::Char('p') => {
                if let Some(kind) = row.and_then(|x| self.view.payment_request(&x)) {
                    self.prompt = PromptState::confirm(kind);
                    self.block_focus = BlockFocus::Prompt;
                }
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key_event: KeyEvent) {
        match &mut self.prompt {
            PromptState::Search { input, step } => match key_event.code {
                KeyCode::Char(c) => {
                    input.insert(c);
                    let value = input.as_str().to_string();
                    self.view.set_search(&value);
                    self.rows.reset();
                    self.refresh_rows();
                }
                KeyCode::Backspace => {
                    input.remove();
                    let value = input.as_str().to_string();
                    self.view.set_search(&value);
                    self.refresh_rows();
                }
                KeyCode::Enter => {
                    *step = SearchStep::Submit;
                    self.block_focus = BlockFocus::Main;
                }
                KeyCode::Esc => {
                    self.view.set_search("");
                    self.prompt = PromptState::Default;
                    self.block_focus = BlockFocus::Main;
                    self.refresh_rows();
                }
                _ => {}
            },
            PromptState::Confirm { input, kind } => match key_event.code {
                KeyCode::Char(c) => input.insert(c),
                KeyCode::Backspace => input.remove(),
                KeyCode::Enter => {
                    let answer = input.as_str().to_string();
                    let kind = kind.clone();
                    self.block_focus = BlockFocus::Main;
                    match answer.as_str() {
                        "y" => {
                            self.query_queue.push(QueryKind::Confirm(kind));
                            self.prompt = PromptState::Default;
                        }
                        "n" => self.prompt = PromptState::Default,
                        _ => self.prompt = PromptState::info("Chỉ chấp nhận 'y' hoặc 'n'"),
                    }
                }
                KeyCode::Esc => {
                    self.prompt = PromptState::Default;
                    self.block_focus = BlockFocus::Main;
                }
                _ => {}
            },
            _ => self.block_focus = BlockFocus::Main,
        }
    }

    async fn run_query(&mut self, query: QueryKind) {
        match query {
            QueryKind::Load => self.view.load().await,
            QueryKind::Toggle(id) => self.view.toggle(&id).await,
            QueryKind::Verify(id) => self.view.verify(&id).await,
            QueryKind::Confirm(kind) => self.view.confirm(kind).await,
            QueryKind::Enter(row) => {
                if let Some(lines) = self.view.enter(&row, OffsetDateTime::now_utc()).await {
                    self.open_modal(lines);
                }
            }
        }
        self.refresh_rows();
        self.show_toasts();
    }

    fn build_context(&self) -> Paragraph {
        let mut spans = vec![
            Span::styled(
                format!("{} ({})  ", self.user.full_name, self.user.role.label()),
                Style::new().fg(GRAY.c500),
            ),
        ];
        for (i, route) in self.routes.iter().enumerate() {
            let style = if i == self.route {
                Style::new().fg(BLUE.c400)
            } else {
                Style::new().fg(GRAY.c500)
            };
            spans.push(Span::styled(format!(" {} ", route.label()), style));
        }
        spans.push(Span::styled(
            format!("   {}  ({})", self.view.filter_label(), self.rows.items().len()),
            Style::new().fg(GRAY.c500),
        ));
        Paragraph::new(Line::from(spans))
    }

    fn render_rows(&mut self, frame: &mut Frame, rect: Rect) {
        let headers = self.view.headers();
        let height = rect.height.saturating_sub(1) as usize;
        self.rows.follow(height);

        let mut widths: Vec<usize> = headers.iter().map(|x| x.chars().count()).collect();
        for row in self.rows.items() {
            for (w, cell) in widths.iter_mut().zip(&row.cells) {
                *w = (*w).max(cell.chars().count()).min(40);
            }
        }
        let pad = |cells: Vec<&str>| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| {
                    let cell: String = cell.chars().take(*w).collect();
                    let fill = w.saturating_sub(cell.chars().count());
                    format!("{cell}{}", " ".repeat(fill))
                })
                .collect::<Vec<_>>()
                .join("  ")
        };

        let header_rect = Rect::new(rect.x, rect.y, rect.width, 1);
        frame.render_widget(
            Paragraph::new(pad(headers.to_vec())).style(Style::new().fg(GRAY.c500)),
            header_rect,
        );

        if self.rows.items().is_empty() {
            let rect = Rect::new(rect.x, rect.y + 1, rect.width, 1);
            frame.render_widget(
                Paragraph::new("Không có dữ liệu").style(Style::new().fg(GRAY.c500)),
                rect,
            );
            return;
        }

        let offset = self.rows.offset();
        for (i, row) in self.rows.items().iter().skip(offset).take(height).enumerate() {
            let style = if offset + i == self.rows.selected_index() {
                Style::new().bg(GRAY.c800)
            } else {
                Style::new()
            };
            let line = pad(row.cells.iter().map(String::as_str).collect());
            let item_rect = Rect::new(rect.x, rect.y + 1 + i as u16, rect.width, 1);
            frame.render_widget(Paragraph::new(line).style(style), item_rect);
        }
    }

    fn render_page(&mut self, frame: &mut Frame) {
        let layout = Layout::new(
            Direction::Vertical,
            vec![
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ],
        );
        let [context_l, summary_l, spacer_l, main_l, prompt_l] = layout.areas(frame.area());

        frame.render_widget(self.build_context(), context_l);
        frame.render_widget(
            Paragraph::new(self.view.summary()).style(Style::new().fg(GRAY.c400)),
            summary_l,
        );
        frame.render_widget(
            Paragraph::new(Line::raw("-".repeat(spacer_l.width.into())))
                .style(Style::new().fg(GRAY.c500)),
            spacer_l,
        );
        self.render_rows(frame, main_l);
        frame.render_widget(self.prompt.widget(), prompt_l);

        if self.block_focus == BlockFocus::Prompt {
            if let Some(col) = self.prompt.cursor() {
                frame.set_cursor_position(Position::new(prompt_l.x + col as u16, prompt_l.y));
            }
        }

        if let Some(lines) = &self.modal {
            let rect = build_modal_block(frame.area());
            frame.render_widget(Clear, rect);
            let content: Vec<Line> = lines.iter().map(|x| Line::raw(x.as_str())).collect();
            frame.render_widget(
                Paragraph::new(content).block(
                    Block::bordered()
                        .title(self.current_route().label())
                        .border_style(GRAY.c500),
                ),
                rect,
            );
        }
    }
}

fn build_modal_block(rect: Rect) -> Rect {
    let vertical = Layout::new(
        Direction::Vertical,
        [
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ],
    );
    let [_, main, _] = vertical.areas(rect);
    let horizontal = Layout::new(
        Direction::Horizontal,
        [
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ],
    );
    let [_, block, _] = horizontal.areas(main);
    block
}

pub async fn run(settings: &Settings) -> Result<()> {
    let toasts = Arc::new(MemoryNotifier::new());
    let mut ctx = context(settings)?;
    ctx.notifier = toasts.clone();

    // Fail before touching the terminal when the session is no longer valid.
    let user = ctx.api.me().await.wrap_err("Failed to load the signed-in user")?;

    tui::install_hooks()?;
    let mut terminal = tui::init()?;
    let mut app = AppState::new(user, ctx, toasts);
    let mut crossterm = EventStream::new();

    while app.running() {
        while let Some(query) = app.query_queue.pop() {
            app.run_query(query).await;
        }

        terminal
            .draw(|frame| app.render_page(frame))
            .wrap_err("failed to render terminal")?;

        let event = loop {
            let event = tokio::select! {
                event = crossterm.next() => match event {
                    Some(Ok(ev)) => app.handle_terminal_event(ev),
                    Some(Err(err)) => {
                        tracing::warn!("terminal event error: {err}");
                        None
                    }
                    None => {
                        app.quit();
                        Some(Event::TerminalTick)
                    }
                },
                _ = sleep(Duration::from_millis(200)) => Some(Event::TerminalTick),
            };
            if let Some(ev) = event {
                break ev;
            }
        };

        match event {
            Event::KeyInput(key) => app.handle_key_input(key),
            Event::TerminalTick => app.show_toasts(),
        }
    }

    tui::restore()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_run_in_order() {
        let mut queue = QueryQueue::default();
        queue.push(QueryKind::Load);
        queue.push(QueryKind::Toggle("u1".into()));

        assert!(matches!(queue.pop(), Some(QueryKind::Load)));
        assert!(matches!(queue.pop(), Some(QueryKind::Toggle(id)) if id == "u1"));
        assert!(queue.pop().is_none());
    }
}
