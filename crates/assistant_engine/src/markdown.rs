//! Markdown to terminal text.
//!
//! The analysis arrives as GFM-flavoured markdown. It is parsed into a small
//! block tree first so the layout rules (list indentation, table column
//! widths) can work on visible text, then formatted either as plain text or
//! with ANSI styles.

use pulldown_cmark::{Alignment, Event, Options, Parser, Tag};

const RULE_WIDTH: usize = 40;
const MIN_COLUMN_WIDTH: usize = 3;
const BULLET: &str = "• ";
const ANSI_RESET: &str = "\x1b[0m";

pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Styling is dropped; only layout remains.
    #[default]
    Plain,
    /// Styling is kept as ANSI escape sequences.
    Ansi,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRenderer {
    style: RenderStyle,
}

impl TerminalRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }
}

impl MarkdownRenderer for TerminalRenderer {
    fn render(&self, markdown: &str) -> String {
        render_blocks(&parse_markdown(markdown), self.style)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub link: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    None,
    Left,
    Center,
    Right,
}

impl From<&Alignment> for ColumnAlign {
    fn from(alignment: &Alignment) -> Self {
        match alignment {
            Alignment::None => ColumnAlign::None,
            Alignment::Left => ColumnAlign::Left,
            Alignment::Center => ColumnAlign::Center,
            Alignment::Right => ColumnAlign::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        spans: Vec<Span>,
    },
    Paragraph(Vec<Span>),
    /// `start` is the first ordinal for ordered lists.
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    Quote(Vec<Block>),
    Code(String),
    Table {
        alignments: Vec<ColumnAlign>,
        header: Vec<Vec<Span>>,
        rows: Vec<Vec<Vec<Span>>>,
    },
    Rule,
}

/// Extensions enabled on top of CommonMark.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

pub fn parse_markdown(markdown: &str) -> Vec<Block> {
    let mut events = Parser::new_ext(markdown, markdown_options());
    collect_blocks(&mut events)
}

/// Collects blocks until the enclosing container ends.
fn collect_blocks<'a, I>(events: &mut I) -> Vec<Block>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut blocks = Vec::new();
    // Tight list items carry inline content without a paragraph.
    let mut pending = Vec::new();

    while let Some(event) = events.next() {
        let block = match event {
            Event::End(_) => break,
            Event::Start(Tag::Paragraph) => {
                let mut spans = Vec::new();
                collect_inlines(events, SpanStyle::default(), &mut spans);
                Block::Paragraph(spans)
            }
            Event::Start(Tag::Heading { level, .. }) => {
                let mut spans = Vec::new();
                collect_inlines(events, SpanStyle::default(), &mut spans);
                Block::Heading {
                    level: level as u8,
                    spans,
                }
            }
            Event::Start(Tag::BlockQuote(_)) => Block::Quote(collect_blocks(events)),
            Event::Start(Tag::CodeBlock(_)) => Block::Code(collect_text(events)),
            Event::Start(Tag::List(start)) => Block::List {
                start,
                items: collect_items(events),
            },
            Event::Start(Tag::Table(alignments)) => collect_table(&alignments, events),
            Event::Rule => Block::Rule,
            other => {
                if let Some(Event::Start(_)) =
                    push_inline(other, events, SpanStyle::default(), &mut pending)
                {
                    // Unknown container: keep what is inside it.
                    let inner = collect_blocks(events);
                    flush_pending(&mut pending, &mut blocks);
                    blocks.extend(inner);
                }
                continue;
            }
        };
        flush_pending(&mut pending, &mut blocks);
        blocks.push(block);
    }

    flush_pending(&mut pending, &mut blocks);
    blocks
}

fn flush_pending(pending: &mut Vec<Span>, blocks: &mut Vec<Block>) {
    if !pending.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(pending)));
    }
}

/// Collects inline content until the enclosing container ends.
fn collect_inlines<'a, I>(events: &mut I, style: SpanStyle, spans: &mut Vec<Span>)
where
    I: Iterator<Item = Event<'a>>,
{
    while let Some(event) = events.next() {
        if matches!(event, Event::End(_)) {
            return;
        }
        if let Some(Event::Start(_)) = push_inline(event, events, style, spans) {
            skip_container(events);
        }
    }
}

/// Appends one inline event. Events that are not inline are handed back.
fn push_inline<'a, I>(
    event: Event<'a>,
    events: &mut I,
    style: SpanStyle,
    spans: &mut Vec<Span>,
) -> Option<Event<'a>>
where
    I: Iterator<Item = Event<'a>>,
{
    match event {
        Event::Text(text) | Event::InlineHtml(text) | Event::Html(text) => {
            push_span(spans, &text, style)
        }
        Event::Code(code) => push_span(spans, &code, SpanStyle { code: true, ..style }),
        Event::SoftBreak => push_span(spans, " ", style),
        Event::HardBreak => push_span(spans, "\n", style),
        Event::TaskListMarker(done) => {
            push_span(spans, if done { "[x] " } else { "[ ] " }, style)
        }
        Event::FootnoteReference(label) => push_span(spans, &format!("[^{label}]"), style),
        Event::Start(Tag::Emphasis) => collect_inlines(
            events,
            SpanStyle {
                emphasis: true,
                ..style
            },
            spans,
        ),
        Event::Start(Tag::Strong) => collect_inlines(
            events,
            SpanStyle {
                strong: true,
                ..style
            },
            spans,
        ),
        Event::Start(Tag::Strikethrough) => collect_inlines(
            events,
            SpanStyle {
                strikethrough: true,
                ..style
            },
            spans,
        ),
        Event::Start(Tag::Link { dest_url, .. }) => {
            let mut label = Vec::new();
            collect_inlines(events, SpanStyle { link: true, ..style }, &mut label);
            let label_text = plain_text(&label);
            for span in label {
                push_span(spans, &span.text, span.style);
            }
            if !dest_url.is_empty() && label_text != *dest_url {
                push_span(spans, &format!(" ({dest_url})"), style);
            }
        }
        Event::Start(Tag::Image { dest_url, .. }) => {
            let mut alt = Vec::new();
            collect_inlines(events, style, &mut alt);
            let alt_text = plain_text(&alt);
            let label = if alt_text.is_empty() {
                &*dest_url
            } else {
                alt_text.as_str()
            };
            push_span(spans, &format!("[image: {label}]"), style);
        }
        other => return Some(other),
    }
    None
}

fn push_span(spans: &mut Vec<Span>, text: &str, style: SpanStyle) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => spans.push(Span {
            text: text.to_string(),
            style,
        }),
    }
}

fn skip_container<'a, I>(events: &mut I)
where
    I: Iterator<Item = Event<'a>>,
{
    let mut depth = 1usize;
    for event in events.by_ref() {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
            _ => {}
        }
    }
}

fn collect_text<'a, I>(events: &mut I) -> String
where
    I: Iterator<Item = Event<'a>>,
{
    let mut text = String::new();
    for event in events.by_ref() {
        match event {
            Event::Text(chunk) => text.push_str(&chunk),
            Event::End(_) => break,
            _ => {}
        }
    }
    text
}

fn collect_items<'a, I>(events: &mut I) -> Vec<Vec<Block>>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut items = Vec::new();
    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::Item) => items.push(collect_blocks(events)),
            Event::End(_) => break,
            _ => {}
        }
    }
    items
}

fn collect_table<'a, I>(alignments: &[Alignment], events: &mut I) -> Block
where
    I: Iterator<Item = Event<'a>>,
{
    let mut header = Vec::new();
    let mut rows = Vec::new();
    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::TableHead) => header = collect_cells(events),
            Event::Start(Tag::TableRow) => rows.push(collect_cells(events)),
            Event::End(_) => break,
            _ => {}
        }
    }
    Block::Table {
        alignments: alignments.iter().map(ColumnAlign::from).collect(),
        header,
        rows,
    }
}

fn collect_cells<'a, I>(events: &mut I) -> Vec<Vec<Span>>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut cells = Vec::new();
    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::TableCell) => {
                let mut spans = Vec::new();
                collect_inlines(events, SpanStyle::default(), &mut spans);
                cells.push(spans);
            }
            Event::End(_) => break,
            _ => {}
        }
    }
    cells
}

pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|span| span.text.as_str()).collect()
}

/// Formats blocks separated by blank lines.
pub fn render_blocks(blocks: &[Block], style: RenderStyle) -> String {
    stack_blocks(blocks, style, true).join("\n")
}

fn stack_blocks(blocks: &[Block], style: RenderStyle, spaced: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        if spaced && index > 0 {
            lines.push(String::new());
        }
        lines.extend(render_block(block, style));
    }
    lines
}

fn render_block(block: &Block, style: RenderStyle) -> Vec<String> {
    match block {
        Block::Heading { level, spans } => render_heading(*level, spans, style),
        Block::Paragraph(spans) => render_spans(spans, style)
            .split('\n')
            .map(ToOwned::to_owned)
            .collect(),
        Block::List { start, items } => render_list(*start, items, style),
        Block::Quote(inner) => stack_blocks(inner, style, true)
            .into_iter()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect(),
        Block::Code(text) => {
            let code_style = SpanStyle {
                code: true,
                ..SpanStyle::default()
            };
            text.lines()
                .map(|line| format!("    {}", paint(line, code_style, style)))
                .collect()
        }
        Block::Table {
            alignments,
            header,
            rows,
        } => render_table(alignments, header, rows, style),
        Block::Rule => vec!["─".repeat(RULE_WIDTH)],
    }
}

fn render_heading(level: u8, spans: &[Span], style: RenderStyle) -> Vec<String> {
    let emphasised: Vec<Span> = spans
        .iter()
        .map(|span| Span {
            text: span.text.clone(),
            style: SpanStyle {
                strong: true,
                ..span.style
            },
        })
        .collect();
    let text = render_spans(&emphasised, style);
    let width = plain_text(spans).chars().count();
    match level {
        1 => vec![text, "=".repeat(width)],
        2 => vec![text, "-".repeat(width)],
        _ => vec![format!("{} {text}", "#".repeat(usize::from(level)))],
    }
}

fn render_list(start: Option<u64>, items: &[Vec<Block>], style: RenderStyle) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let marker = match start {
            Some(first) => format!("{}. ", first + index as u64),
            None => BULLET.to_string(),
        };
        let indent = " ".repeat(marker.chars().count());
        let item_lines = stack_blocks(item, style, false);
        if item_lines.is_empty() {
            lines.push(marker.trim_end().to_string());
            continue;
        }
        for (line_index, line) in item_lines.into_iter().enumerate() {
            if line_index == 0 {
                lines.push(format!("{marker}{line}"));
            } else if line.is_empty() {
                lines.push(line);
            } else {
                lines.push(format!("{indent}{line}"));
            }
        }
    }
    lines
}

fn render_table(
    alignments: &[ColumnAlign],
    header: &[Vec<Span>],
    rows: &[Vec<Vec<Span>>],
    style: RenderStyle,
) -> Vec<String> {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![MIN_COLUMN_WIDTH; columns];
    for row in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        for (column, cell) in row.iter().enumerate() {
            widths[column] = widths[column].max(plain_text(cell).chars().count());
        }
    }
    let align_of = |column: usize| {
        alignments
            .get(column)
            .copied()
            .unwrap_or(ColumnAlign::None)
    };

    let header_cells: Vec<Vec<Span>> = header
        .iter()
        .map(|cell| {
            cell.iter()
                .map(|span| Span {
                    text: span.text.clone(),
                    style: SpanStyle {
                        strong: true,
                        ..span.style
                    },
                })
                .collect()
        })
        .collect();

    let render_row = |cells: &[Vec<Span>]| {
        let padded: Vec<String> = (0..columns)
            .map(|column| {
                let cell = cells.get(column).map(Vec::as_slice).unwrap_or(&[]);
                let visible = plain_text(cell).chars().count();
                pad(
                    &render_spans(cell, style),
                    visible,
                    widths[column],
                    align_of(column),
                )
            })
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let separator: Vec<String> = (0..columns)
        .map(|column| {
            let width = widths[column];
            match align_of(column) {
                ColumnAlign::None => "-".repeat(width),
                ColumnAlign::Left => format!(":{}", "-".repeat(width - 1)),
                ColumnAlign::Right => format!("{}:", "-".repeat(width - 1)),
                ColumnAlign::Center => format!(":{}:", "-".repeat(width - 2)),
            }
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(&header_cells));
    lines.push(format!("| {} |", separator.join(" | ")));
    for row in rows {
        lines.push(render_row(row));
    }
    lines
}

fn pad(styled: &str, visible: usize, width: usize, align: ColumnAlign) -> String {
    let gap = width.saturating_sub(visible);
    match align {
        ColumnAlign::Right => format!("{}{styled}", " ".repeat(gap)),
        ColumnAlign::Center => {
            let left = gap / 2;
            format!("{}{styled}{}", " ".repeat(left), " ".repeat(gap - left))
        }
        ColumnAlign::None | ColumnAlign::Left => format!("{styled}{}", " ".repeat(gap)),
    }
}

fn render_spans(spans: &[Span], style: RenderStyle) -> String {
    spans
        .iter()
        .map(|span| paint(&span.text, span.style, style))
        .collect()
}

fn paint(text: &str, span_style: SpanStyle, style: RenderStyle) -> String {
    if style == RenderStyle::Plain {
        return text.to_string();
    }
    let mut codes = Vec::new();
    if span_style.strong {
        codes.push("1");
    }
    if span_style.emphasis {
        codes.push("3");
    }
    if span_style.link {
        codes.push("4");
    }
    if span_style.strikethrough {
        codes.push("9");
    }
    if span_style.code {
        codes.push("36");
    }
    if codes.is_empty() {
        text.to_string()
    } else {
        format!("\x1b[{}m{text}{ANSI_RESET}", codes.join(";"))
    }
}
