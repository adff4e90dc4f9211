//! Terminal presentation of a [`Panel`]: a title line and a card with
//! the condition icon on the left and the readings on the right.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use weather_core::{Icon, Panel};

const WINDOW_BG: Color = Color::Rgb { r: 0x1e, g: 0x1e, b: 0x2f };
const PANEL_BG: Color = Color::Rgb { r: 0x2c, g: 0x2c, b: 0x44 };
const TEXT: Color = Color::Rgb { r: 0xff, g: 0xff, b: 0xff };

/// Icon footprint: 20 columns by 10 rows of half-blocks, i.e. 20×20 samples.
const ICON_COLS: u32 = 20;
const ICON_ROWS: u32 = 10;

/// Roughly the 500 px minimum window width at typical cell sizes.
const MIN_PANEL_WIDTH: usize = 60;

const MARGIN: usize = 2;
const GAP: usize = 2;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Cell {
    fn text(ch: char, bg: Color) -> Self {
        Self { ch, fg: TEXT, bg, bold: false }
    }
}

pub type Row = Vec<Cell>;

/// Lay the panel out as rows of styled cells.
pub fn layout(panel: &Panel, icon: &Icon) -> Vec<Row> {
    let lines: Vec<String> =
        panel.fields.iter().map(|f| format!("{}: {}", f.label, f.value)).collect();

    let text_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let inner_width = (1 + ICON_COLS as usize + GAP + text_width + 1).max(MIN_PANEL_WIDTH);
    let total_width = inner_width + 2 * MARGIN;

    let mut rows = Vec::new();

    let title = panel.title();
    let mut title_row = padded_row(&centered(&title, total_width), total_width, WINDOW_BG);
    title_row.iter_mut().for_each(|c| c.bold = true);
    rows.push(title_row);
    rows.push(blank_row(total_width, WINDOW_BG));

    let icon_rows = icon_cells(icon);
    let body_height = (ICON_ROWS as usize).max(lines.len());

    rows.push(framed(blank_row(inner_width, PANEL_BG)));
    for i in 0..body_height {
        let mut inner = vec![Cell::text(' ', PANEL_BG)];
        match icon_rows.get(i) {
            Some(cells) => inner.extend_from_slice(cells),
            None => inner.extend(blank_row(ICON_COLS as usize, PANEL_BG)),
        }
        inner.extend(blank_row(GAP, PANEL_BG));
        let line = lines.get(i).map(String::as_str).unwrap_or("");
        let remaining = inner_width - inner.len();
        inner.extend(padded_row(line, remaining, PANEL_BG));
        rows.push(framed(inner));
    }
    rows.push(framed(blank_row(inner_width, PANEL_BG)));
    rows.push(blank_row(total_width, WINDOW_BG));

    rows
}

/// Write `rows` to `out`, only emitting color changes where needed.
pub fn draw<W: Write>(out: &mut W, rows: &[Row]) -> io::Result<()> {
    for row in rows {
        let mut current: Option<(Color, Color, bool)> = None;
        for cell in row {
            let style = (cell.fg, cell.bg, cell.bold);
            if current != Some(style) {
                queue!(out, SetAttribute(Attribute::Reset))?;
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                queue!(out, SetForegroundColor(cell.fg), SetBackgroundColor(cell.bg))?;
                current = Some(style);
            }
            queue!(out, Print(cell.ch))?;
        }
        queue!(out, ResetColor, SetAttribute(Attribute::Reset), Print('\n'))?;
    }
    out.flush()
}

/// Draw to stdout.
pub fn render(panel: &Panel, icon: &Icon) -> io::Result<()> {
    let rows = layout(panel, icon);
    let mut stdout = io::stdout().lock();
    draw(&mut stdout, &rows)
}

fn framed(inner: Row) -> Row {
    let mut row = blank_row(MARGIN, WINDOW_BG);
    row.extend(inner);
    row.extend(blank_row(MARGIN, WINDOW_BG));
    row
}

fn blank_row(width: usize, bg: Color) -> Row {
    vec![Cell::text(' ', bg); width]
}

fn padded_row(text: &str, width: usize, bg: Color) -> Row {
    let mut row: Row = text.chars().take(width).map(|ch| Cell::text(ch, bg)).collect();
    row.resize(width, Cell::text(' ', bg));
    row
}

fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let pad = width.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Sample the icon into half-block cells. The icon is centered in a square so
/// non-square images keep their aspect ratio; transparent areas show the panel.
fn icon_cells(icon: &Icon) -> Vec<Row> {
    let side = icon.width().max(icon.height()).max(1);
    let x0 = (side - icon.width()) / 2;
    let y0 = (side - icon.height()) / 2;
    let samples = ICON_ROWS * 2;

    let sample = |gx: u32, gy: u32| -> Color {
        let sx = (gx * side / ICON_COLS).checked_sub(x0);
        let sy = (gy * side / samples).checked_sub(y0);
        match (sx, sy) {
            (Some(x), Some(y)) => match icon.pixel(x, y) {
                Some([r, g, b, a]) if a >= 128 => Color::Rgb { r, g, b },
                _ => PANEL_BG,
            },
            _ => PANEL_BG,
        }
    };

    (0..ICON_ROWS)
        .map(|row| {
            (0..ICON_COLS)
                .map(|col| Cell {
                    ch: '▀',
                    fg: sample(col, row * 2),
                    bg: sample(col, row * 2 + 1),
                    bold: false,
                })
                .collect()
        })
        .collect()
}
