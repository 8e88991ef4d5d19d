use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::api::models::{Campsite, Comment, Rating};
use crate::app::form::{CommentForm, Field, FormFocus, TEXT_PLACEHOLDER};
use crate::app::state::{AppState, DetailProps, DisplayMode};
use crate::ui::theme;
use crate::util::time::format_comment_date;

const TEXTAREA_ROWS: u16 = 6;

pub fn render_detail(
    f: &mut Frame,
    area: Rect,
    props: &DetailProps,
    scroll: usize,
    image_percent: u16,
) {
    match props.display_mode() {
        DisplayMode::Loading => render_loading(f, area),
        DisplayMode::Error => {
            let msg = props.err_mess.unwrap_or_default();
            let para = Paragraph::new(Line::from(Span::styled(msg, theme::ERROR)))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(theme::BORDER_UNFOCUSED),
                );
            f.render_widget(para, area);
        }
        DisplayMode::Populated => {
            if let Some(campsite) = props.campsite {
                render_populated(f, area, campsite, props.comments, scroll, image_percent);
            }
        }
        DisplayMode::Empty => render_placeholder(f, area),
    }
}

fn render_loading(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::BORDER_UNFOCUSED);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let middle = Rect {
        y: inner.y + inner.height / 2,
        height: inner.height.min(1),
        ..inner
    };
    let para = Paragraph::new("Loading...")
        .style(theme::DIM)
        .alignment(Alignment::Center);
    f.render_widget(para, middle);
}

/// An empty, untitled frame.
fn render_placeholder(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::BORDER_UNFOCUSED);
    f.render_widget(block, area);
}

fn render_populated(
    f: &mut Frame,
    area: Rect,
    campsite: &Campsite,
    comments: Option<&[Comment]>,
    scroll: usize,
    image_percent: u16,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(area);

    let breadcrumb = Line::from(vec![
        Span::styled("Directory", theme::BREADCRUMB_LINK),
        Span::styled(" / ", theme::DIM),
        Span::raw(campsite.name.as_str()),
    ]);
    f.render_widget(Paragraph::new(breadcrumb), rows[0]);
    f.render_widget(
        Paragraph::new(Span::styled(campsite.name.as_str(), theme::HEADER)),
        rows[1],
    );
    f.render_widget(
        Paragraph::new("─".repeat(rows[2].width as usize)).style(theme::DIM),
        rows[2],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(image_percent),
            Constraint::Percentage(100u16.saturating_sub(image_percent)),
        ])
        .split(rows[3]);

    render_campsite_panel(f, columns[0], campsite);

    let comment_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(columns[1]);

    match comments {
        Some(comments) => render_comment_list(f, comment_rows[0], comments, scroll),
        None => render_placeholder(f, comment_rows[0]),
    }

    f.render_widget(
        Paragraph::new(Span::styled(" [c] Submit Comment ", theme::BUTTON)),
        comment_rows[1],
    );
}

fn render_campsite_panel(f: &mut Frame, area: Rect, campsite: &Campsite) {
    let block = Block::default()
        .title(" Campsite ")
        .borders(Borders::ALL)
        .border_style(theme::BORDER_UNFOCUSED);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Image: ", theme::DIM),
            Span::styled(campsite.image.as_str(), theme::BREADCRUMB_LINK),
            Span::styled("  (i to open)", theme::DIM),
        ]),
        Line::from(""),
    ];
    lines.extend(campsite.description.lines().map(Line::from));

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(para, area);
}

fn render_comment_list(f: &mut Frame, area: Rect, comments: &[Comment], scroll: usize) {
    let block = Block::default()
        .title(format!(" Comments ({}) ", comments.len()))
        .borders(Borders::ALL)
        .border_style(theme::BORDER_FOCUSED);

    let mut lines = Vec::new();
    for comment in comments.iter().skip(scroll) {
        lines.extend(comment.text.lines().map(Line::from));
        lines.push(Line::from(Span::styled(
            format!(
                "-- {}, {}",
                comment.author,
                format_comment_date(&comment.date)
            ),
            theme::COMMENT_BYLINE,
        )));
        lines.push(Line::from(""));
    }

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(para, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn field_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme::BORDER_FOCUSED
        } else {
            theme::BORDER_UNFOCUSED
        })
}

pub fn render_comment_form(f: &mut Frame, area: Rect, form: &CommentForm) {
    if !form.is_open() {
        return;
    }

    let draft = form.draft();
    let focus = form.focus();
    let messages = draft.visible_messages(Field::Author);
    let message_rows = messages.len() as u16;

    let modal = centered(area, 60, 21 + message_rows);
    f.render_widget(Clear, modal);

    let block = Block::default()
        .title(" Submit Comment ")
        .borders(Borders::ALL)
        .border_style(theme::BORDER_FOCUSED);
    let inner = block.inner(modal);
    f.render_widget(block, modal);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(message_rows),
            Constraint::Length(1),
            Constraint::Length(TEXTAREA_ROWS + 2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    // Rating
    f.render_widget(Paragraph::new(Span::styled("Rating", theme::HEADER)), rows[0]);
    let selected = draft.effective_rating();
    let mut options = Vec::new();
    for rating in Rating::all() {
        let label = if rating == selected {
            format!("[{rating}]")
        } else {
            format!(" {rating} ")
        };
        let style = if rating == selected && focus == FormFocus::Rating {
            theme::HIGHLIGHT
        } else if rating == selected {
            theme::RATING
        } else {
            theme::DIM
        };
        options.push(Span::styled(label, style));
        options.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(options)), rows[1]);

    // Name
    f.render_widget(Paragraph::new(Span::styled("Name", theme::HEADER)), rows[3]);
    let author_block = field_block(focus == FormFocus::Author);
    let author_inner = author_block.inner(rows[4]);
    f.render_widget(
        Paragraph::new(draft.author.as_str()).block(author_block),
        rows[4],
    );
    if focus == FormFocus::Author {
        let offset = (draft.author.chars().count() as u16)
            .min(author_inner.width.saturating_sub(1));
        f.set_cursor_position(Position::new(author_inner.x + offset, author_inner.y));
    }
    let message_lines: Vec<Line> = messages
        .iter()
        .map(|m| Line::from(Span::styled(m.as_str(), theme::ERROR)))
        .collect();
    f.render_widget(Paragraph::new(message_lines), rows[5]);

    // Comments
    f.render_widget(Paragraph::new(Span::styled("Comments", theme::HEADER)), rows[6]);
    let text_block = field_block(focus == FormFocus::Text);
    let text = if draft.text.is_empty() {
        Paragraph::new(Span::styled(TEXT_PLACEHOLDER, theme::DIM))
    } else {
        let line_count = draft.text.split('\n').count() as u16;
        Paragraph::new(draft.text.as_str())
            .wrap(Wrap { trim: false })
            .scroll((line_count.saturating_sub(TEXTAREA_ROWS), 0))
    };
    f.render_widget(text.block(text_block), rows[7]);

    // Submit
    let (label, style) = if form.is_submitting() {
        (" Posting... ", theme::DIM)
    } else if focus == FormFocus::Submit {
        (" Submit ", theme::HIGHLIGHT)
    } else {
        (" Submit ", theme::BUTTON)
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("["),
            Span::styled(label, style),
            Span::raw("]"),
        ])),
        rows[9],
    );

    f.render_widget(
        Paragraph::new("Tab: next field | Ctrl-S: submit | Esc: cancel").style(theme::DIM),
        rows[10],
    );
}

pub fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let key_hints = if state.error_popup.is_some() {
        "Esc: dismiss"
    } else if state.comment_form.is_open() {
        "Tab: next | ←/→: rating | Enter: submit | Esc: cancel"
    } else {
        "j/k: scroll | c: comment | i: image | r: refresh | q: quit"
    };

    let (status, status_style) = if state.is_loading {
        ("Loading...".to_string(), theme::STATUS_BAR)
    } else if let Some(ref notice) = state.notice {
        (notice.clone(), theme::SUCCESS.bg(ratatui::style::Color::DarkGray))
    } else {
        (String::new(), theme::STATUS_BAR)
    };

    let refresh_info = state
        .last_refresh
        .as_ref()
        .map(|t| format!(" | updated {}", t.format("%H:%M")))
        .unwrap_or_default();
    let right_text = format!("Campsite #{}{}", state.campsite_id, refresh_info);

    let total_width = area.width as usize;
    let left_len = key_hints.chars().count();
    let right_len = right_text.chars().count();
    let center_width = total_width.saturating_sub(left_len + right_len + 2);

    let status_truncated = if status.chars().count() > center_width {
        let keep = center_width.saturating_sub(3);
        format!("{}...", status.chars().take(keep).collect::<String>())
    } else {
        status
    };
    let padding = center_width.saturating_sub(status_truncated.chars().count());

    let line = Line::from(vec![
        Span::styled(key_hints, theme::STATUS_BAR),
        Span::styled(" ", theme::STATUS_BAR),
        Span::styled(status_truncated, status_style),
        Span::styled(" ".repeat(padding), theme::STATUS_BAR),
        Span::styled(" ", theme::STATUS_BAR),
        Span::styled(right_text, theme::STATUS_BAR),
    ]);

    f.render_widget(Paragraph::new(line).style(theme::STATUS_BAR), area);
}

pub fn render_error_modal(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(ref msg) = state.error_popup else {
        return;
    };

    let width = (area.width / 2).max(40).min(area.width.saturating_sub(4));
    let modal_area = centered(area, width, 6);

    f.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(theme::ERROR);

    let text = vec![
        Line::from(Span::styled(msg.as_str(), theme::ERROR)),
        Line::from(""),
        Line::from(Span::styled("Press Esc to dismiss", theme::DIM)),
    ];

    let para = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(para, modal_area);
}
