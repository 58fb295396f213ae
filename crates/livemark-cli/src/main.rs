mod render;

use std::{
    collections::HashMap,
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use livemark_config::{Config, RevealMode};
use livemark_engine::{
    ElementDetail, ElementType, LivePreview, ParseRange, ParsedElement, PreviewOptions, RevealGranularity,
    SelectionRange, Span as ByteSpan,
    parsing::rope::{LineRef, line_count, lines_with_spans},
    read_document,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use render::{BlockLine, render_block_line, render_line, render_raw};
use xi_rope::Rope;

struct App {
    path: PathBuf,
    preview: LivePreview,
    lines: Vec<LineRef>,
    /// Cursor as (line, byte column).
    cursor: (usize, usize),
    /// Selection anchor, set while shift-extending.
    anchor: Option<usize>,
    scroll: usize,
    height: usize,
    window_margin: usize,
}

impl App {
    fn new(path: PathBuf, text: &str, config: &Config) -> App {
        let options = PreviewOptions {
            cache_capacity: config.preview.cache_capacity,
            reveal: match config.preview.reveal {
                RevealMode::Element => RevealGranularity::Element,
                RevealMode::Line => RevealGranularity::Line,
            },
        };
        let preview = LivePreview::new(text, options);
        let lines = document_lines(preview.rope());
        let mut app = App {
            path,
            preview,
            lines,
            cursor: (0, 0),
            anchor: None,
            scroll: 0,
            height: 0,
            window_margin: config.preview.window_margin,
        };
        app.sync_selection();
        app
    }

    fn offset(&self, (line, col): (usize, usize)) -> usize {
        self.lines
            .get(line)
            .map_or(0, |l| l.span.start + col.min(l.content().len()))
    }

    fn head(&self) -> usize {
        self.offset(self.cursor)
    }

    fn move_cursor(&mut self, code: KeyCode, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.head());
            }
        } else {
            self.anchor = None;
        }

        let (line, col) = self.cursor;
        let text = self.lines.get(line).map_or("", |l| l.content());
        self.cursor = match code {
            KeyCode::Left | KeyCode::Char('h') => match text[..col.min(text.len())].chars().next_back() {
                Some(c) => (line, col - c.len_utf8()),
                None if line > 0 => (line - 1, self.line_len(line - 1)),
                None => (line, col),
            },
            KeyCode::Right | KeyCode::Char('l') => match text.get(col..).and_then(|t| t.chars().next()) {
                Some(c) => (line, col + c.len_utf8()),
                None if line + 1 < self.lines.len() => (line + 1, 0),
                None => (line, col),
            },
            KeyCode::Up | KeyCode::Char('k') if line > 0 => (line - 1, self.snap(line - 1, col)),
            KeyCode::Down | KeyCode::Char('j') if line + 1 < self.lines.len() => {
                (line + 1, self.snap(line + 1, col))
            }
            _ => (line, col),
        };
        self.follow_cursor();
        self.sync_selection();
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.content().len())
    }

    /// Keeps `col` on a char boundary of `line`.
    fn snap(&self, line: usize, col: usize) -> usize {
        let text = self.lines.get(line).map_or("", |l| l.content());
        let mut col = col.min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        col
    }

    fn follow_cursor(&mut self) {
        let line = self.cursor.0;
        let before = self.scroll;
        if line < self.scroll {
            self.scroll = line;
        } else if self.height > 0 && line >= self.scroll + self.height {
            self.scroll = line + 1 - self.height;
        }
        if before != self.scroll {
            self.parse_window();
        }
    }

    fn sync_selection(&mut self) {
        let head = self.head();
        let range = SelectionRange::new(self.anchor.unwrap_or(head), head);
        self.preview.update_selection(vec![range]);
    }

    fn window(&self) -> ParseRange {
        let start = self.scroll.saturating_sub(self.window_margin);
        let end = (self.scroll + self.height + self.window_margin).min(self.lines.len());
        ParseRange::Lines(start..end)
    }

    fn parse_window(&mut self) {
        let range = self.window();
        self.preview.parse(range);
    }

    fn resize(&mut self, height: usize) {
        if height != self.height {
            self.height = height;
            self.follow_cursor();
            self.parse_window();
        }
    }

    fn toggle_reveal(&mut self) {
        let next = self.preview.options().reveal.toggled();
        self.preview.set_granularity(next);
    }

    /// Elements grouped by the line they start on, plus the lines that sit
    /// inside multi-line blocks.
    fn layout(&self) -> (HashMap<usize, Vec<ParsedElement>>, HashMap<usize, BlockLine>) {
        let len = self.preview.rope().len();
        let mut by_line: HashMap<usize, Vec<ParsedElement>> = HashMap::new();
        let mut blocks = HashMap::new();
        for el in self.preview.elements() {
            let el = el.clamped(len);
            let block = match el.kind {
                ElementType::CodeBlock => Some((BlockLine::CodeMarker, BlockLine::Code)),
                ElementType::MathBlock if self.spans_lines(&el) => {
                    Some((BlockLine::MathMarker, BlockLine::Math))
                }
                _ => None,
            };
            if let Some((marker, inner)) = block {
                let first = el.line_number;
                let last = self.line_at(el.to.saturating_sub(1)).max(first);
                let closed = !matches!(el.detail, ElementDetail::CodeFence { closed: false, .. });
                for line in first..=last {
                    let kind = if line == first || (line == last && closed && last > first) {
                        marker
                    } else {
                        inner
                    };
                    blocks.insert(line, kind);
                }
                continue;
            }
            by_line.entry(el.line_number).or_default().push(el);
        }
        (by_line, blocks)
    }

    fn spans_lines(&self, el: &ParsedElement) -> bool {
        self.line_at(el.to.saturating_sub(1)) > el.line_number
    }

    fn line_at(&self, offset: usize) -> usize {
        self.lines
            .partition_point(|l| l.span.start <= offset)
            .saturating_sub(1)
    }
}

/// Lines as the viewer shows them; a trailing newline opens an empty line.
fn document_lines(rope: &Rope) -> Vec<LineRef> {
    let mut lines: Vec<LineRef> = lines_with_spans(rope).collect();
    if lines.len() < line_count(rope) {
        let end = rope.len();
        lines.push(LineRef {
            number: lines.len(),
            span: ByteSpan::new(end, end),
            text: String::new(),
        });
    }
    lines
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Document path from CLI args, falling back to the config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let path = match (args.len(), &config.default_file) {
        (2, _) => PathBuf::from(&args[1]),
        (1, Some(file)) => file.clone(),
        (1, None) => {
            eprintln!("Error: No file provided and no default_file configured");
            eprintln!("Usage: {} [file.md]", args[0]);
            eprintln!("Or set default_file in {}", config_path.display());
            process::exit(1);
        }
        _ => {
            eprintln!("Usage: {} [file.md]", args[0]);
            process::exit(1);
        }
    };

    let rope = match read_document(&path) {
        Ok(rope) => rope,
        Err(e) => {
            eprintln!("Error: Cannot open '{}': {e}", path.display());
            process::exit(1);
        }
    };
    let mut app = App::new(path, &rope.slice_to_cow(..), &config);
    log::info!("opened {} ({} lines)", app.path.display(), app.lines.len());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.preview.close();

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        let height = terminal.size()?.height.saturating_sub(3) as usize;
        app.resize(height);
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let extend = key.modifiers.contains(KeyModifiers::SHIFT);
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('r') => app.toggle_reveal(),
                KeyCode::Char('c') => app.preview.clear_cache(),
                KeyCode::Left
                | KeyCode::Right
                | KeyCode::Up
                | KeyCode::Down
                | KeyCode::Char('h')
                | KeyCode::Char('j')
                | KeyCode::Char('k')
                | KeyCode::Char('l') => app.move_cursor(key.code, extend),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let (by_line, blocks) = app.layout();
    let revealed = &app.preview.reveal().revealed_lines;
    let empty = vec![];

    let body: Vec<Line> = app
        .lines
        .iter()
        .skip(app.scroll)
        .take(app.height)
        .map(|line| {
            let text = line.content();
            let cursor = (line.number == app.cursor.0).then_some(app.cursor.1);
            if revealed.contains(&line.number) || cursor.is_some() {
                return render_raw(text, cursor);
            }
            if let Some(&kind) = blocks.get(&line.number) {
                return render_block_line(text, kind);
            }
            let elements: Vec<&ParsedElement> =
                by_line.get(&line.number).unwrap_or(&empty).iter().collect();
            render_line(text, line.span.start, &elements)
        })
        .collect();

    let title = format!(" {} ", file_name(&app.path));
    let document = Paragraph::new(body).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(document, chunks[0]);

    let stats = app.preview.cache_stats();
    let reveal = match app.preview.options().reveal {
        RevealGranularity::Element => "element",
        RevealGranularity::Line => "line",
    };
    let status = Line::from(vec![
        Span::styled(
            format!(" Ln {}, Col {} ", app.cursor.0 + 1, app.cursor.1 + 1),
            Style::default().add_modifier(Modifier::REVERSED),
        ),
        Span::raw(format!(
            " reveal:{reveal}  cache {}/{} hits {} misses {} evictions {}  ",
            stats.size, stats.max_size, stats.hits, stats.misses, stats.evictions
        )),
        Span::styled(
            "hjkl/arrows move  shift extends  r reveal  c clear cache  q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(status), chunks[1]);
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
