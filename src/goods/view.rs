//! Card rendering for the goods grid.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Palette;
use crate::goods::pager::GoodsItem;
use crate::ui::grid::{GridCell, GridColumns};
use crate::ui::truncate_str;

/// Column spec matching the storefront grid: two columns on narrow
/// terminals, four on wide ones.
pub const GOODS_GRID: GridColumns = GridColumns {
    initial: 2,
    wide: 4,
};

/// Format a price in won with thousands separators, e.g. `29,000원`.
#[must_use]
pub fn format_won(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push('원');
    out
}

/// Last path segment of an image URL, shown in place of the image.
fn image_caption(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

impl GridCell for GoodsItem {
    fn render_cell(&self, frame: &mut Frame, area: Rect, selected: bool, palette: &Palette) {
        let border_style = if selected {
            Style::default().fg(palette.border_focused())
        } else {
            Style::default().fg(palette.border())
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(palette.border_type)
            .border_style(border_style);
        if selected {
            block = block.style(Style::default().bg(palette.selection_bg()));
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // image band (2) + name (1) + price (1) + brand (1)
        let rows = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        let width = inner.width as usize;
        let caption = truncate_str(image_caption(&self.image_url), width);
        let image = Paragraph::new(vec![
            Line::from("░".repeat(width)),
            Line::from(Span::styled(caption, Style::default().fg(palette.overlay1))),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.overlay0).bg(palette.surface0));
        frame.render_widget(image, rows[0]);

        let name_style = if selected {
            Style::default()
                .fg(palette.selection_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        frame.render_widget(
            Paragraph::new(truncate_str(&self.name, width)).style(name_style),
            rows[1],
        );

        frame.render_widget(
            Paragraph::new(format_won(self.selling_price)).style(
                Style::default()
                    .fg(palette.highlight())
                    .add_modifier(Modifier::BOLD),
            ),
            rows[2],
        );

        frame.render_widget(
            Paragraph::new(truncate_str(&self.brand, width))
                .style(Style::default().fg(palette.subtext0)),
            rows[3],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_won_with_thousands_separators() {
        assert_eq!(format_won(0), "0원");
        assert_eq!(format_won(900), "900원");
        assert_eq!(format_won(1500), "1,500원");
        assert_eq!(format_won(29000), "29,000원");
        assert_eq!(format_won(1_450_000), "1,450,000원");
    }

    #[test]
    fn image_caption_is_the_file_name() {
        assert_eq!(
            image_caption("https://img.example.com/goods/123.jpg"),
            "123.jpg"
        );
        assert_eq!(image_caption("plain"), "plain");
    }
}
