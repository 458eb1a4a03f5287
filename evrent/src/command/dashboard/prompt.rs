use evrent_client::notify::Toast;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Buffer, Widget};
use ratatui::style::palette::tailwind::{GRAY, GREEN, RED, SLATE, YELLOW};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

#[derive(Default, Debug)]
pub(super) struct InputCursor {
    source: String,
}

impl InputCursor {
    pub(super) fn insert(&mut self, c: char) {
        self.source.push(c);
    }

    pub(super) fn remove(&mut self) {
        self.source.pop();
    }

    pub(super) fn as_str(&self) -> &str {
        self.source.as_str()
    }

    pub(super) fn set(&mut self, value: &str) {
        self.source.clear();
        self.source.push_str(value);
    }

    /// Display width, used to place the terminal cursor.
    pub(super) fn width(&self) -> usize {
        self.source.chars().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SearchStep {
    Edit,
    Submit,
}

/// What a pending `y/n` question will do once answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ConfirmKind {
    DeleteVehicle(String),
    CancelReservation(String),
    Pay(String),
}

impl ConfirmKind {
    fn question(&self) -> String {
        match self {
            ConfirmKind::DeleteVehicle(id) => format!("Xóa xe {id}? (y/n)  "),
            ConfirmKind::CancelReservation(id) => format!("Hủy đặt xe {id}? (y/n)  "),
            ConfirmKind::Pay(id) => format!("Thu tiền mặt cho {id}? (y/n)  "),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum InfoKind {
    Error,
    Success,
    Normal,
}

#[derive(Debug)]
pub(super) enum PromptState {
    Default,
    Search { input: InputCursor, step: SearchStep },
    Confirm { input: InputCursor, kind: ConfirmKind },
    Info { value: String, kind: InfoKind },
}

impl PromptState {
    pub(super) fn search(value: &str) -> Self {
        let mut input = InputCursor::default();
        input.set(value);
        PromptState::Search {
            input,
            step: SearchStep::Edit,
        }
    }

    pub(super) fn confirm(kind: ConfirmKind) -> Self {
        PromptState::Confirm {
            input: InputCursor::default(),
            kind,
        }
    }

    pub(super) fn info(value: impl Into<String>) -> Self {
        PromptState::Info {
            value: value.into(),
            kind: InfoKind::Normal,
        }
    }

    pub(super) fn toast(toast: &Toast) -> Self {
        PromptState::Info {
            value: toast.line(),
            kind: if toast.is_destructive() {
                InfoKind::Error
            } else {
                InfoKind::Success
            },
        }
    }

    fn prefix(&self) -> String {
        match self {
            PromptState::Search { .. } => "Tìm kiếm: ".into(),
            PromptState::Confirm { kind, .. } => kind.question(),
            _ => String::new(),
        }
    }

    fn value(&self) -> String {
        match self {
            PromptState::Default => "Nhấn / để tìm kiếm".into(),
            PromptState::Search { input, .. } => input.as_str().into(),
            PromptState::Confirm { input, .. } => input.as_str().into(),
            PromptState::Info { value, .. } => value.clone(),
        }
    }

    fn style(&self) -> Style {
        match self {
            PromptState::Default => Style::new().fg(GRAY.c500),
            PromptState::Search { step, .. } => match step {
                SearchStep::Edit => Style::default(),
                SearchStep::Submit => Style::new().fg(YELLOW.c500),
            },
            PromptState::Info { kind, .. } => match kind {
                InfoKind::Error => Style::new().fg(RED.c500),
                InfoKind::Success => Style::new().fg(GREEN.c500),
                InfoKind::Normal => Style::default(),
            },
            PromptState::Confirm { .. } => Style::default(),
        }
    }

    /// Column of the terminal cursor while the prompt takes input.
    pub(super) fn cursor(&self) -> Option<usize> {
        match self {
            PromptState::Search {
                input,
                step: SearchStep::Edit,
            }
            | PromptState::Confirm { input, .. } => {
                Some(self.prefix().chars().count() + input.width())
            }
            _ => None,
        }
    }

    pub(super) fn widget(&self) -> PromptWidget {
        PromptWidget {
            prefix: self.prefix(),
            value: self.value(),
            style: self.style(),
        }
    }
}

pub(super) struct PromptWidget {
    prefix: String,
    value: String,
    style: Style,
}

impl Widget for PromptWidget {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let layout = Layout::new(
            Direction::Horizontal,
            [Constraint::Ratio(3, 5), Constraint::Ratio(2, 5)],
        );
        let [left_l, right_l] = layout.areas(area);

        let prompt =
            Line::from(vec![Span::raw(self.prefix), Span::raw(self.value)]).style(self.style);

        let key = Style::new().bg(SLATE.c800).fg(GRAY.c400);
        let help = Line::from(vec![
            Span::raw("   Tìm "),
            Span::styled(" / ", key),
            Span::raw("   Trang "),
            Span::styled(" h/l ", key),
            Span::raw("   Trợ giúp "),
            Span::styled(" ? ", key),
            Span::raw("   Thoát "),
            Span::styled(" C-c ", key),
        ])
        .style(Style::new().fg(GRAY.c200))
        .alignment(Alignment::Right);

        Paragraph::new(prompt).render(left_l, buf);
        Paragraph::new(help).render(right_l, buf);
    }
}
