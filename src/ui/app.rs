//! Demo host application embedding the table

use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use serde::{Deserialize, Serialize};

use crate::app::actions::UserAction;
use crate::app::events::{AppEvent, EventHandler};
use crate::app::router::TableEvent;
use crate::config::{KeyBindings, Settings};
use crate::models::{Row, StyleConfig};
use crate::row;
use crate::ui::backend::TerminalBackend;
use crate::ui::layout::{AppLayout, DialogLayout};
use crate::ui::theme::{accent_table_style, base_table_style, Theme};
use crate::ui::widgets::statusbar::{build_status_line, StatusItem};
use crate::ui::widgets::{DataTable, DataTableBuilder, FilterBar};

/// Columns and rows the demo starts with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl TableData {
    pub fn sample() -> Self {
        let people = [
            row![1, "John Doe", "john@example.com", "Active"],
            row![2, "Jane Smith", "jane@example.com", "Inactive"],
            row![3, "Bob Wilson", "bob@example.com", "Active"],
            row![4, "Alice Brown", "alice@example.com", "Active"],
        ];
        Self {
            columns: ["ID", "Name", "Email", "Status"].map(String::from).to_vec(),
            rows: people.iter().cycle().take(people.len() * 5).cloned().collect(),
        }
    }
}

/// Main TUI application
pub struct TuiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
    keybinds: KeyBindings,
    theme: Theme,

    table: DataTable<TerminalBackend>,
    filter_bar: FilterBar,
    selected: Rc<RefCell<Option<String>>>,
    base_style: StyleConfig,
    accent_active: bool,
    next_id: i64,
    show_help: bool,
    table_body: Rect,
}

impl TuiApp {
    pub fn new(settings: &Settings, data: TableData) -> Result<Self> {
        let mut base_style = base_table_style();
        base_style.merge(&settings.style);

        let selected = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&selected);
        let next_id = data.rows.len() as i64 + 1;

        let table = DataTableBuilder::new(data.columns)
            .data(data.rows)
            .style(base_style.clone())
            .viewport(settings.viewport())
            .on_row_selected(move |row: &Row, index| {
                let cells: Vec<String> = row.cells().iter().map(|c| c.display_text()).collect();
                tracing::info!(index, record = ?cells, "selected record");
                *sink.borrow_mut() = Some(format!("#{} {}", index, cells.join(", ")));
            })
            .build(TerminalBackend::new())?;

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            event_handler: EventHandler::new(settings.tick_rate()),
            keybinds: KeyBindings::default(),
            theme: Theme::default(),
            table,
            filter_bar: FilterBar::new(),
            selected,
            base_style,
            accent_active: false,
            next_id,
            show_help: false,
            table_body: Rect::default(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            self.table.tick(Instant::now())?;
            self.sync_container()?;
            self.draw()?;

            let Some(event) = self.event_handler.next() else {
                continue;
            };
            match event {
                AppEvent::Key(key) => {
                    if self.handle_key(key)? == Some(UserAction::Quit) {
                        break;
                    }
                }
                AppEvent::Mouse(mouse) => self.handle_mouse(mouse)?,
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }
        Ok(())
    }

    /// Report the rows area to the table whenever the terminal size changes
    fn sync_container(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        let layout = AppLayout::new(Rect::new(0, 0, size.width, size.height));
        let body = TerminalBackend::body_area(table_block().inner(layout.table));
        if body != self.table_body {
            self.table_body = body;
            self.table.handle_event(
                TableEvent::ContainerResized {
                    width: u32::from(body.width),
                    height: u32::from(body.height),
                },
                Instant::now(),
            )?;
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<UserAction>> {
        if self.filter_bar.active {
            match key.code {
                KeyCode::Enter => {
                    let text = self.filter_bar.submit();
                    self.table
                        .handle_event(TableEvent::FilterSubmitted(text), Instant::now())?;
                }
                KeyCode::Esc => {
                    self.filter_bar.clear();
                    self.table.clear_filter()?;
                }
                KeyCode::Backspace => self.filter_bar.backspace(),
                KeyCode::Delete => self.filter_bar.delete(),
                KeyCode::Left => self.filter_bar.move_left(),
                KeyCode::Right => self.filter_bar.move_right(),
                KeyCode::Home => self.filter_bar.move_home(),
                KeyCode::End => self.filter_bar.move_end(),
                KeyCode::Char(c) => self.filter_bar.insert(c),
                _ => {}
            }
            return Ok(None);
        }

        if self.show_help {
            self.show_help = false;
            return Ok(None);
        }

        let Some(action) = self.keybinds.action_for(&key) else {
            return Ok(None);
        };
        self.perform(&action)?;
        Ok(Some(action))
    }

    fn perform(&mut self, action: &UserAction) -> Result<()> {
        match action {
            UserAction::OpenFilter => self.filter_bar.activate(),
            UserAction::ClearFilter | UserAction::Clear => {
                self.filter_bar.clear();
                self.table.clear_filter()?;
            }
            UserAction::SortColumn(column) => {
                if *column < self.table.columns().len() {
                    self.table.set_sort(*column)?;
                }
            }
            UserAction::Scroll(notches) => {
                self.table
                    .handle_event(TableEvent::Wheel(*notches), Instant::now())?;
            }
            UserAction::AddRow => {
                let id = self.next_id;
                self.next_id += 1;
                self.table.append_row(sample_row(id, self.table.columns().len()))?;
            }
            UserAction::SwapStyle => {
                let accent = accent_table_style();
                let partial: StyleConfig = if self.accent_active {
                    // Put back the base values for exactly the keys the accent touched
                    accent
                        .iter()
                        .filter_map(|(key, _)| {
                            self.base_style.get(key).map(|v| (key.to_string(), v.clone()))
                        })
                        .collect()
                } else {
                    accent
                };
                self.accent_active = !self.accent_active;
                self.table.set_style(&partial)?;
            }
            UserAction::Refresh => self.table.refresh()?,
            UserAction::Help => self.show_help = true,
            UserAction::Quit => {}
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        let now = Instant::now();
        let events: Vec<TableEvent> = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self
                .table
                .backend()
                .click_at(mouse.column, mouse.row)
                .into_iter()
                .collect(),
            MouseEventKind::Moved => self.table.backend_mut().pointer_moved(mouse.column, mouse.row),
            MouseEventKind::ScrollDown => vec![TableEvent::Wheel(1)],
            MouseEventKind::ScrollUp => vec![TableEvent::Wheel(-1)],
            _ => Vec::new(),
        };
        for event in events {
            self.table.handle_event(event, now)?;
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let theme = &self.theme;
        let table = &mut self.table;
        let filter_bar = &self.filter_bar;
        let show_help = self.show_help;

        let view = table.view_state();
        let sort = match view.sort_spec().column {
            Some(column) => format!(
                "{} {}",
                view.columns()[column],
                table.style().sort_glyph(view.sort_spec().ascending)
            ),
            None => "none".to_string(),
        };
        let status_items = vec![
            StatusItem::new("Rows", format!("{}/{}", view.view_len(), view.source().len())),
            StatusItem::new("Sort", sort).with_style(theme.accent()),
            StatusItem::new("Selected", self.selected.borrow().clone().unwrap_or_else(|| "-".into()))
                .with_style(theme.warning()),
            StatusItem::new("", "?=help q=quit").with_style(theme.dim()),
        ];

        self.terminal.draw(|frame| {
            let layout = AppLayout::new(frame.area());

            filter_bar.render(frame, layout.filter, theme.normal(), theme.border_focused());

            let block = table_block().border_style(theme.border());
            let inner = block.inner(layout.table);
            frame.render_widget(block, layout.table);
            table.backend_mut().draw(frame, inner);

            frame.render_widget(Paragraph::new(build_status_line(status_items, "│")), layout.status);

            if show_help {
                render_help(frame, theme);
            }
        })?;

        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

fn table_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title(" Data ")
}

/// A new record padded or cut to `columns` cells
fn sample_row(id: i64, columns: usize) -> Row {
    let template = row![id, "Chris Green", "chris@example.com", "Active"];
    template
        .cells()
        .iter()
        .cloned()
        .chain(std::iter::repeat(crate::models::CellValue::Null))
        .take(columns)
        .collect()
}

fn render_help(frame: &mut Frame, theme: &Theme) {
    let area = frame.area();
    let help_area = DialogLayout::centered(area, 52, 18).dialog;

    let help_text = [
        "",
        "  Data Table - Keyboard Shortcuts",
        "  ───────────────────────────────",
        "",
        "    /             Edit filter",
        "    Enter         Apply filter",
        "    Esc, c        Clear filter",
        "    1-9           Sort by column (again to flip)",
        "    ↑/↓, PgUp/PgDn  Scroll",
        "    a             Add row",
        "    s             Swap style",
        "    r             Rebuild table",
        "",
        "  Mouse: click header to sort, click row to select",
        "",
        "  Press any key to close",
    ];

    let help_block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.normal());

    let help_content = Paragraph::new(help_text.join("\n"))
        .block(help_block)
        .style(theme.normal());

    frame.render_widget(Clear, help_area);
    frame.render_widget(help_content, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_shape() {
        let data = TableData::sample();
        assert_eq!(data.rows.len(), 20);
        assert!(data.rows.iter().all(|r| r.len() == data.columns.len()));
    }

    #[test]
    fn test_sample_row_fits_column_count() {
        assert_eq!(sample_row(7, 4).len(), 4);
        assert_eq!(sample_row(7, 2), row![7, "Chris Green"]);
        assert_eq!(sample_row(7, 5).cells()[4], crate::models::CellValue::Null);
    }
}
