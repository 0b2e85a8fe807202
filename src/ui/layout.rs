use ratatui::layout::Rect;

/// Maximum content width in columns. Wider terminals get the content
/// centered with side margins, like the storefront's fixed-width page.
pub const MAX_CONTENT_WIDTH: u16 = 120;

/// Clamp `area` to [`MAX_CONTENT_WIDTH`], centered horizontally.
#[must_use]
pub fn content_area(area: Rect) -> Rect {
    if area.width <= MAX_CONTENT_WIDTH {
        return area;
    }
    let margin = (area.width - MAX_CONTENT_WIDTH) / 2;
    Rect::new(area.x + margin, area.y, MAX_CONTENT_WIDTH, area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_areas_are_unchanged() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(content_area(area), area);
    }

    #[test]
    fn wide_areas_are_clamped_and_centered() {
        let area = Rect::new(0, 0, 200, 24);
        let content = content_area(area);
        assert_eq!(content.width, MAX_CONTENT_WIDTH);
        assert_eq!(content.x, 40);
        assert_eq!(content.height, 24);
    }
}
