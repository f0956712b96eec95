// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Focus, titles, filters, card text, and footer helpers used by TUI
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Results,
    Scorecard,
}

fn view_key_char(view: ViewMode) -> char {
    match view {
        ViewMode::Grid => '1',
        ViewMode::List => '2',
        ViewMode::Table => '3',
    }
}

fn view_title(label: &str, key: char, tail: Option<&str>) -> String {
    let mut title = format!("─[{key}]─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn results_title_suffix(app: &App) -> String {
    let view = app.session.view();
    match view {
        ViewMode::Table => format!("— Table [{}]", app.session.raw_records().len()),
        ViewMode::Grid | ViewMode::List => {
            let total = app.cards.len();
            let visible = app.visible_cards.len();
            if visible == total {
                format!("— {} [{total}]", view.label())
            } else {
                format!("— {} [{visible}/{total} filtered]", view.label())
            }
        }
    }
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

fn footer_help_line(app: &App, toast_suffix: &str) -> Line<'static> {
    let hints: &[(&str, &str)] = if app.recording.is_some() {
        &[("v", "stop & upload")]
    } else {
        match app.focus {
            Focus::Results => &[
                ("/", "search"),
                ("v", "voice"),
                ("1/2/3", "view"),
                ("Enter", "details"),
                ("f", "filters"),
                ("s", "scorecard"),
                ("q", "quit"),
            ],
            Focus::Scorecard => &[
                ("hjkl", "move"),
                ("e", "edit"),
                ("a", "+row"),
                ("c", "+col"),
                ("d", "-col"),
                ("r", "requery"),
                ("y", "yank"),
                ("q", "quit"),
            ],
        }
    };

    let mut spans = Vec::with_capacity(hints.len() * 2 + 1);
    for (key, label) in hints {
        spans.push(Span::styled(
            (*key).to_owned(),
            Style::default().fg(FOOTER_KEY_COLOR),
        ));
        spans.push(Span::raw(format!(" {label}  ")));
    }
    if !toast_suffix.is_empty() {
        spans.push(Span::styled(
            toast_suffix.to_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn prompt_footer_line(prompt: &Prompt, toast_suffix: &str) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            prompt.label().to_owned(),
            Style::default().fg(FOOTER_KEY_COLOR),
        ),
        Span::raw(prompt.buffer.clone()),
    ];
    if !toast_suffix.is_empty() {
        spans.push(Span::raw(toast_suffix.to_owned()));
    }
    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    ))
}

/// View-level card filters; presentation only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Filters {
    date: String,
    position: String,
    hours: Option<HoursBucket>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoursBucket {
    Morning,
    Afternoon,
    Evening,
    Overnight,
}

impl HoursBucket {
    fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning (6AM-12PM)",
            Self::Afternoon => "Afternoon (12PM-6PM)",
            Self::Evening => "Evening (6PM-12AM)",
            Self::Overnight => "Overnight (12AM-6AM)",
        }
    }

    fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::Morning),
            Some(Self::Morning) => Some(Self::Afternoon),
            Some(Self::Afternoon) => Some(Self::Evening),
            Some(Self::Evening) => Some(Self::Overnight),
            Some(Self::Overnight) => None,
        }
    }

    fn contains(self, hour: u32) -> bool {
        match self {
            Self::Morning => (6..12).contains(&hour),
            Self::Afternoon => (12..18).contains(&hour),
            Self::Evening => (18..24).contains(&hour),
            Self::Overnight => hour < 6,
        }
    }
}

fn card_passes_filters(card: &PositionCard, filters: &Filters) -> bool {
    if !filters.date.is_empty() {
        let matches_date = card
            .start_date()
            .map(|date| date.starts_with(&filters.date))
            .unwrap_or(false);
        if !matches_date {
            return false;
        }
    }

    if !filters.position.is_empty() && !position_matches(&filters.position, card.name()) {
        return false;
    }

    if let Some(bucket) = filters.hours {
        let Some(hour) = card.time_in().and_then(hour_of) else {
            return false;
        };
        if !bucket.contains(hour) {
            return false;
        }
    }

    true
}

fn position_matches(needle: &str, name: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let haystack = name.to_lowercase();
    if haystack.contains(&needle) {
        return true;
    }
    rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars()) >= 75.0
}

fn hour_of(raw: &str) -> Option<u32> {
    use chrono::{NaiveDateTime, NaiveTime, Timelike};

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|stamp| stamp.time().hour())
        .ok()
        .or_else(|| {
            NaiveTime::parse_from_str(raw, "%H:%M:%S")
                .map(|time| time.hour())
                .ok()
        })
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

fn grid_card_lines(card: &PositionCard) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(truncate_text(card.description(), 60))];
    if let Some(date) = card.start_date() {
        lines.push(Line::from(format!("Date: {}", format_date(date))));
    }
    if let (Some(time_in), Some(time_out)) = (card.time_in(), card.time_out()) {
        lines.push(Line::from(format!(
            "Time: {} - {}",
            format_time(time_in),
            format_time(time_out)
        )));
    }
    lines.push(Line::from(format!("At: {}", card.location())));
    if let Some(quantity) = card.quantity() {
        lines.push(Line::from(Span::styled(
            format!("{quantity} positions available"),
            Style::default().fg(FOCUS_COLOR),
        )));
    }
    lines
}

fn list_card_lines(card: &PositionCard) -> Vec<Line<'static>> {
    let mut heading = vec![Span::styled(
        card.name().to_owned(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(quantity) = card.quantity() {
        heading.push(Span::styled(
            format!("  — {quantity} positions"),
            Style::default().fg(FOCUS_COLOR),
        ));
    }

    let schedule = match (card.start_date(), card.time_in(), card.time_out()) {
        (Some(date), Some(time_in), Some(time_out)) => format!(
            "  {} · {} - {}",
            format_date(date),
            format_time(time_in),
            format_time(time_out)
        ),
        (Some(date), _, _) => format!("  {}", format_date(date)),
        _ => "  Schedule to be confirmed".to_owned(),
    };

    vec![
        Line::from(heading),
        Line::from(schedule),
        Line::from(format!("  {}", card.location())),
    ]
}

fn detail_lines(card: &PositionCard) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(card.description().to_owned()),
        Line::from(String::new()),
    ];

    if let Some(date) = card.start_date() {
        lines.push(Line::from(format!("Date: {}", format_date(date))));
    }
    if let (Some(time_in), Some(time_out)) = (card.time_in(), card.time_out()) {
        lines.push(Line::from(format!(
            "Time: {} - {}",
            format_time(time_in),
            format_time(time_out)
        )));
    }
    lines.push(Line::from(format!("Location: {}", card.location())));
    lines.push(Line::from(format!("Attire: {}", card.attire())));
    if let Some(quantity) = card.quantity() {
        lines.push(Line::from(format!("Quantity: {quantity}")));
    }
    if let Some(complexity) = card.complexity() {
        lines.push(Line::from(format!("Complexity: {complexity}")));
    }
    lines.push(Line::from(format!("Default Rate: ${}", card.default_rate())));
    lines.push(Line::from(format!(
        "Contractor Rate: ${}",
        card.contractor_rate()
    )));

    if let Some(quantity) = card.quantity() {
        lines.push(Line::from(String::new()));
        lines.push(Line::from(format!(
            "We're looking for {quantity} {}(s) for this event. The ideal candidate has \
             previous experience in a similar role and excellent communication skills.",
            card.name().to_lowercase()
        )));
    }

    lines
}

/// Table headers come from the first record's keys, like the raw payload
/// shows them.
fn table_headers(records: &[RawRecord]) -> Vec<String> {
    records
        .first()
        .map(|record| record.keys().map(str::to_owned).collect())
        .unwrap_or_default()
}
