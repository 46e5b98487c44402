use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::{ChatLayout, HistoryLayout, centered_rect};
use crate::history::{DELETE_PROMPT, RecordView};
use crate::models::{Role, Turn};
use crate::utils::sanitize_for_terminal;

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const DANGER: Color = Color::Rgb(239, 68, 68);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// Everything the history screen draws
pub struct HistoryRenderState<'a> {
    pub records: &'a [RecordView],
    pub selected_idx: usize,
    pub current_page: u32,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<&'a str>,
    /// Prompt of the record the delete modal asks about
    pub confirming_delete: Option<&'a str>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Everything the chat screen draws
pub struct ChatRenderState<'a> {
    pub turns: &'a [Turn],
    pub visible: bool,
    pub sending: bool,
    pub suggestions: &'a [&'a str],
    pub input: &'a str,
    pub status_message: Option<&'a StatusMessage>,
}

fn bordered(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED)).title(title)
}

pub fn render_history(frame: &mut Frame, state: &HistoryRenderState) {
    let area = frame.area();
    let layout = HistoryLayout::new(area);

    render_record_list(frame, layout.list_area, state);
    render_record_detail(frame, layout.detail_area, state.records.get(state.selected_idx));
    render_history_status(frame, layout.status_area, state);

    if let Some(prompt) = state.confirming_delete {
        render_confirm(frame, area, prompt);
    }
}

fn render_record_list(frame: &mut Frame, area: Rect, state: &HistoryRenderState) {
    let title = format!(" 🤖 AI Chat History · {} conversations ", state.records.len());

    if state.records.is_empty() {
        let text = if state.loading {
            Text::from("Loading chat history...")
        } else {
            Text::from(vec![
                Line::from(Span::styled("No chat history yet", Style::default().fg(BRIGHT))),
                Line::from(""),
                Line::from(Span::styled(
                    "Start chatting with our AI assistant to see your conversations here",
                    Style::default().fg(MUTED),
                )),
            ])
        };
        let paragraph = Paragraph::new(text).block(bordered(&title)).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state
        .records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            // First line of the prompt only
            let preview: String = sanitize_for_terminal(record.prompt.lines().next().unwrap_or(""))
                .chars()
                .take(50)
                .collect();
            let content = format!("{} | {}", record.time, preview);

            let style = if idx == state.selected_idx {
                Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };

            ListItem::new(content).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(bordered(&title)), area);
}

fn render_record_detail(frame: &mut Frame, area: Rect, record: Option<&RecordView>) {
    let content = if let Some(record) = record {
        let label = Style::default().fg(MUTED);
        let mut lines = vec![
            Line::from(vec![Span::styled("Time: ", label), Span::raw(record.time.clone())]),
            Line::from(""),
            Line::from(Span::styled("You:", label.add_modifier(Modifier::BOLD))),
        ];
        lines.extend(sanitize_for_terminal(&record.prompt).lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("AI:", label.add_modifier(Modifier::BOLD))));
        lines.extend(
            sanitize_for_terminal(&record.response).lines().map(|l| Line::from(l.to_string())),
        );

        if record.expandable {
            let hint = if record.expanded { "[Enter] Show less" } else { "[Enter] Show more" };
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(hint, Style::default().fg(ACCENT))));
        }

        Text::from(lines)
    } else {
        Text::from("No conversation selected")
    };

    let paragraph = Paragraph::new(content).block(bordered(" Conversation ")).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_history_status(frame: &mut Frame, area: Rect, state: &HistoryRenderState) {
    let (status_text, style) = if let Some(error) = state.error {
        (format!(" ⚠️ {} | r: retry | q: quit ", error), Style::default().fg(DANGER).bg(BAR_BG))
    } else if let Some(message) = state.status_message {
        status_style(message)
    } else {
        let mut parts = vec![];

        if state.loading {
            parts.push("Loading...".to_string());
        }
        if state.total_pages > 1 {
            parts.push(format!("Page {} of {}", state.current_page, state.total_pages));
            parts.push("←/→: page".to_string());
        }
        if !state.records.is_empty() {
            parts.push("Enter: expand".to_string());
            parts.push("d: delete".to_string());
            parts.push("Ctrl+Y: copy".to_string());
        }
        parts.push("r: refresh".to_string());
        parts.push("q: quit".to_string());

        (format!(" {} ", parts.join(" | ")), Style::default().fg(BRIGHT).bg(BAR_BG))
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}

fn render_confirm(frame: &mut Frame, area: Rect, prompt: &str) {
    let popup = centered_rect(area, 60, 7);
    let preview: String =
        sanitize_for_terminal(prompt.lines().next().unwrap_or("")).chars().take(50).collect();
    let text = Text::from(vec![
        Line::from(DELETE_PROMPT),
        Line::from(""),
        Line::from(Span::styled(format!("\"{}\"", preview), Style::default().fg(BRIGHT))),
        Line::from(""),
        Line::from(Span::styled("[y] Delete   [n] Cancel", Style::default().fg(MUTED))),
    ]);
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DANGER))
                .title(" Delete chat "),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn status_style(message: &StatusMessage) -> (String, Style) {
    let fg = match message.message_type {
        MessageType::Success => ACCENT,
        MessageType::Error => DANGER,
    };
    (format!(" {} ", message.text), Style::default().fg(fg).bg(BAR_BG))
}

pub fn render_chat(frame: &mut Frame, state: &ChatRenderState) {
    let suggestion_count = if state.visible { state.suggestions.len() } else { 0 };
    let layout = ChatLayout::new(frame.area(), suggestion_count);

    if state.visible {
        render_transcript(frame, layout.transcript_area, state);
        if let Some(area) = layout.suggestions_area {
            render_suggestions(frame, area, state.suggestions);
        }
        render_input(frame, layout.input_area, state);
    } else {
        let paragraph = Paragraph::new("Chat hidden. Press Tab to open the assistant.")
            .block(bordered(" 💬 Lebanon Tourism Assistant "));
        frame.render_widget(paragraph, layout.transcript_area);
    }
    render_chat_status(frame, layout.status_area, state);
}

fn transcript_lines(turns: &[Turn], sending: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for turn in turns {
        let (label, color) = match turn.role {
            Role::User => ("You: ", ACCENT),
            Role::Assistant => ("AI: ", BRIGHT),
        };
        let content = sanitize_for_terminal(&turn.content);
        let mut content_lines = content.lines();

        let first = content_lines.next().unwrap_or("").to_string();
        lines.push(Line::from(vec![
            Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(first, Style::default().fg(color)),
        ]));
        for line in content_lines {
            lines.push(Line::from(Span::styled(line.to_string(), Style::default().fg(color))));
        }
        lines.push(Line::from(""));
    }

    if sending {
        lines.push(Line::from(vec![
            Span::styled("AI: ", Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD)),
            Span::styled("• • •", Style::default().fg(MUTED)),
        ]));
    }

    lines
}

/// Rows the lines occupy once wrapped to `width` columns (approximate: by characters)
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines.iter().map(|line| line.width().max(1).div_ceil(width)).sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn render_transcript(frame: &mut Frame, area: Rect, state: &ChatRenderState) {
    let lines = transcript_lines(state.turns, state.sending);

    // Keep the latest turn in view
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    let scroll = wrapped_height(&lines, inner_width).saturating_sub(inner_height);

    let paragraph = Paragraph::new(Text::from(lines))
        .block(bordered(" 🇱🇧 Lebanon Tourism Assistant · Powered by Gemini AI "))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_suggestions(frame: &mut Frame, area: Rect, suggestions: &[&str]) {
    let mut lines = vec![Line::from(Span::styled("Try asking:", Style::default().fg(MUTED)))];
    lines.extend(
        suggestions
            .iter()
            .enumerate()
            .map(|(i, question)| Line::from(format!("[F{}] {}", i + 1, question))),
    );

    frame.render_widget(Paragraph::new(Text::from(lines)).block(bordered(" Quick questions ")), area);
}

fn render_input(frame: &mut Frame, area: Rect, state: &ChatRenderState) {
    let (text, style) = if state.sending {
        ("⏳ waiting for the assistant...".to_string(), Style::default().fg(MUTED))
    } else if state.input.is_empty() {
        ("Ask about Lebanon tourism...".to_string(), Style::default().fg(MUTED))
    } else {
        (format!("{}▏", state.input), Style::default().fg(BRIGHT))
    };

    frame.render_widget(Paragraph::new(text).style(style).block(bordered(" ➤ ")), area);
}

fn render_chat_status(frame: &mut Frame, area: Rect, state: &ChatRenderState) {
    let (status_text, style) = if let Some(message) = state.status_message {
        status_style(message)
    } else {
        let keys = if state.visible {
            " Enter: send | Tab: hide chat | Esc: quit "
        } else {
            " Tab: open chat | Esc: quit "
        };
        (keys.to_string(), Style::default().fg(BRIGHT).bg(BAR_BG))
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
