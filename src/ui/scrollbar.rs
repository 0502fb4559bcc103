//! Scrollbar widget and hit-testing
//!
//! Generic over its track rect so the JSON editor and the session tree share
//! one implementation. Units are rows/lines.

use crate::config::layout;

use super::types::Rect;

#[derive(Debug, Clone, Copy)]
pub enum ScrollbarAction {
    None,
    StartDrag { drag_offset: f32 },
    JumpTo { ratio: f32 },
}

#[derive(Debug, Clone, Copy)]
pub struct ScrollbarMetrics {
    pub track: Rect,
    pub thumb: Rect,
}

#[derive(Debug, Clone)]
pub struct ScrollbarWidget {
    pub rect: Rect,
    scale: f32,
}

impl ScrollbarWidget {
    /// A scrollbar occupying the right edge of `area`.
    pub fn for_area(area: Rect, scale: f32) -> Self {
        let width = layout::SCROLLBAR_WIDTH * scale;
        Self {
            rect: Rect {
                x: area.x + area.width - width,
                y: area.y,
                width,
                height: area.height.max(0.0),
            },
            scale,
        }
    }

    pub fn hit_test(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }

    pub fn is_scrollable(&self, total: usize, visible: usize) -> bool {
        total > visible && visible > 0
    }

    pub fn metrics(&self, total: usize, visible: usize, offset: usize) -> Option<ScrollbarMetrics> {
        if !self.is_scrollable(total, visible) {
            return None;
        }

        let track = self.rect;
        let view_ratio = visible as f32 / total as f32;
        let min_thumb = layout::MIN_SCROLLBAR_THUMB * self.scale;
        let thumb_height = (track.height * view_ratio).max(min_thumb);

        let max_scroll = total.saturating_sub(visible);
        let scroll_ratio = if max_scroll > 0 {
            offset as f32 / max_scroll as f32
        } else {
            0.0
        };

        let track_space = (track.height - thumb_height).max(0.0);
        let thumb = Rect {
            x: track.x,
            y: track.y + track_space * scroll_ratio.clamp(0.0, 1.0),
            width: track.width,
            height: thumb_height,
        };

        Some(ScrollbarMetrics { track, thumb })
    }

    pub fn on_click(
        &self,
        x: f32,
        y: f32,
        total: usize,
        visible: usize,
        offset: usize,
    ) -> ScrollbarAction {
        if !self.is_scrollable(total, visible) {
            return ScrollbarAction::None;
        }

        if let Some(metrics) = self.metrics(total, visible, offset) {
            if metrics.thumb.contains(x, y) {
                return ScrollbarAction::StartDrag {
                    drag_offset: y - metrics.thumb.y,
                };
            }
        }

        let track_height = self.rect.height.max(1.0);
        let relative_y = (y - self.rect.y).clamp(0.0, track_height);
        ScrollbarAction::JumpTo {
            ratio: (relative_y / track_height).clamp(0.0, 1.0),
        }
    }

    pub fn drag_ratio(
        &self,
        y: f32,
        total: usize,
        visible: usize,
        drag_offset: f32,
        offset: usize,
    ) -> Option<f32> {
        let metrics = self.metrics(total, visible, offset)?;
        let track_space = (self.rect.height - metrics.thumb.height).max(0.0);
        if track_space <= 0.0 {
            return Some(0.0);
        }
        let relative_y = (y - self.rect.y - drag_offset).clamp(0.0, track_space);
        Some(relative_y / track_space)
    }

    /// Converts a 0..=1 ratio back into a row offset.
    pub fn offset_for_ratio(ratio: f32, total: usize, visible: usize) -> usize {
        let max_scroll = total.saturating_sub(visible);
        (ratio.clamp(0.0, 1.0) * max_scroll as f32).round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ScrollbarWidget {
        ScrollbarWidget::for_area(
            Rect {
                x: 0.0,
                y: 0.0,
                width: 200.0,
                height: 100.0,
            },
            1.0,
        )
    }

    #[test]
    fn not_scrollable_when_everything_fits() {
        let bar = widget();
        assert!(bar.metrics(5, 10, 0).is_none());
        assert!(matches!(bar.on_click(195.0, 50.0, 5, 10, 0), ScrollbarAction::None));
    }

    #[test]
    fn thumb_tracks_offset() {
        let bar = widget();
        let top = bar.metrics(100, 10, 0).unwrap();
        let bottom = bar.metrics(100, 10, 90).unwrap();
        assert!(bottom.thumb.y > top.thumb.y);
        assert!((bottom.thumb.y + bottom.thumb.height - 100.0).abs() < 0.5);
    }

    #[test]
    fn ratio_round_trip() {
        assert_eq!(ScrollbarWidget::offset_for_ratio(0.0, 100, 10), 0);
        assert_eq!(ScrollbarWidget::offset_for_ratio(1.0, 100, 10), 90);
        assert_eq!(ScrollbarWidget::offset_for_ratio(0.5, 100, 10), 45);
    }
}
