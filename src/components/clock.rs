use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Style;
use tui::widgets::Widget;

pub const GLYPH_HEIGHT: u16 = 5;

/// Block-letter rendering of a clock string such as "14:59" or "01:02:03".
/// Falls back to plain text when the area is too small.
pub struct BigClock<'a> {
    pub text: &'a str,
    pub style: Style,
}

impl Widget for BigClock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let rows = glyph_rows(self.text);
        let width = rows[0].chars().count() as u16;
        if area.height < GLYPH_HEIGHT || width > area.width {
            let w = self.text.chars().count() as u16;
            let x = area.x + area.width.saturating_sub(w) / 2;
            let y = area.y + area.height / 2;
            buf.set_stringn(x, y, self.text, area.width as usize, self.style);
            return;
        }

        let x = area.x + (area.width - width) / 2;
        let top = area.y + (area.height - GLYPH_HEIGHT) / 2;
        for (row, line) in rows.iter().enumerate() {
            buf.set_string(x, top + row as u16, line, self.style);
        }
    }
}

fn glyph(c: char) -> [&'static str; 5] {
    match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => [" █ ", "██ ", " █ ", " █ ", "███"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => [" ", "█", " ", "█", " "],
        _ => ["   "; 5],
    }
}

/// The five text rows for `text`, each glyph cell doubled horizontally.
pub fn glyph_rows(text: &str) -> [String; 5] {
    let mut rows: [String; 5] = Default::default();
    for (i, c) in text.chars().enumerate() {
        for (row, part) in rows.iter_mut().zip(glyph(c)) {
            if i > 0 {
                row.push(' ');
            }
            for cell in part.chars() {
                row.push(cell);
                row.push(cell);
            }
        }
    }
    rows
}
