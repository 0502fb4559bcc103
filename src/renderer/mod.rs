//! GPU-accelerated rendering with femtovg
//!
//! Strict consumer of the projected tree and the app's transient UI state;
//! no session data originates here.

mod fonts;
mod input_screen;
mod modal;
mod tree_view;

use femtovg::{Canvas, Color, FontId, Paint, Path, renderer::OpenGl};

use crate::app::{AddTabModal, Focus, JsonModal};
use crate::config::rendering;
use crate::session::CheckState;
use crate::session::project::Stats;
use crate::text_buffer::TextBuffer;
use crate::theme::Theme;
use crate::ui::{
    AddTabLayout, Button, ButtonId, ButtonRow, JsonModalLayout, Rect, TextInput, TreeRow, TreeView,
};

use input_screen::InputScreenRenderer;
use modal::ModalRenderer;
use tree_view::TreeViewRenderer;

/// Everything the input screen paints from.
pub struct InputScene<'a> {
    pub editor: &'a TextBuffer,
    pub scroll_offset: usize,
    pub error: Option<&'a str>,
    /// (fraction 0..=1, detail text) while the cosmetic load sequence runs.
    pub progress: Option<(f32, String)>,
    pub buttons: &'a ButtonRow,
    pub hovered_button: Option<ButtonId>,
    pub cursor_visible: bool,
    pub editor_area: Rect,
    pub scrollbar_hovered: bool,
    pub scrollbar_dragging: bool,
}

/// Everything the visualization screen paints from.
pub struct VisualizationScene<'a> {
    pub rows: &'a [TreeRow<'a>],
    pub tree_view: &'a TreeView,
    pub scroll_offset: usize,
    pub stats: Stats,
    pub searching: bool,
    pub no_results: bool,
    pub toolbar: &'a ButtonRow,
    pub search: &'a TextInput,
    pub search_rect: Rect,
    pub search_focused: bool,
    pub cursor_visible: bool,
    pub hovered_button: Option<ButtonId>,
    pub hovered_row: Option<usize>,
    pub notice: Option<&'a str>,
    pub modal: Option<ModalScene<'a>>,
    pub scrollbar_hovered: bool,
    pub scrollbar_dragging: bool,
}

pub enum ModalScene<'a> {
    AddTab {
        layout: AddTabLayout,
        modal: &'a AddTabModal,
        focus: Focus,
    },
    Json {
        layout: JsonModalLayout,
        modal: &'a JsonModal,
    },
}

pub struct Renderer {
    canvas: Canvas<OpenGl>,
    fonts: Vec<FontId>,
    theme: Theme,
    width: f32,
    height: f32,
    scale: f32,
}

impl Renderer {
    pub fn new(renderer: OpenGl, width: f32, height: f32, scale: f32) -> Self {
        let mut canvas = Canvas::new(renderer).expect("Failed to create canvas");
        let fonts = fonts::load_fonts(&mut canvas);
        let theme = Theme::dark();

        Self {
            canvas,
            fonts,
            theme,
            width,
            height,
            scale,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32, scale: f32) {
        self.width = width;
        self.height = height;
        self.scale = scale;
    }

    pub fn render_input(&mut self, scene: &InputScene<'_>) {
        self.begin_frame();
        {
            let mut painter = Painter {
                canvas: &mut self.canvas,
                fonts: &self.fonts,
                theme: &self.theme,
                scale: self.scale,
            };
            InputScreenRenderer::new(&mut painter, self.width, self.height).draw(scene);
        }
        self.canvas.flush();
    }

    pub fn render_visualization(&mut self, scene: &VisualizationScene<'_>) {
        self.begin_frame();
        {
            let mut painter = Painter {
                canvas: &mut self.canvas,
                fonts: &self.fonts,
                theme: &self.theme,
                scale: self.scale,
            };
            TreeViewRenderer::new(&mut painter, self.width, self.height).draw(scene);
            if let Some(modal) = &scene.modal {
                ModalRenderer::new(&mut painter, self.width, self.height).draw(modal, scene);
            }
        }
        self.canvas.flush();
    }

    fn begin_frame(&mut self) {
        // DPI 1.0 with font sizes in physical pixels, so femtovg rasterizes
        // glyphs at full resolution.
        self.canvas
            .set_size(self.width as u32, self.height as u32, 1.0);
        self.canvas.clear_rect(
            0,
            0,
            self.width as u32,
            self.height as u32,
            rgb(self.theme.bg),
        );
    }

    pub fn get_char_width(&self) -> f32 {
        let mut paint = Paint::color(Color::rgb(255, 255, 255));
        paint.set_font(&self.fonts);
        paint.set_font_size(rendering::CONTENT_FONT_SIZE * self.scale);
        if let Ok(metrics) = self.canvas.measure_text(0.0, 0.0, "M", &paint) {
            metrics.width()
        } else {
            rendering::FALLBACK_CHAR_WIDTH * self.scale
        }
    }
}

pub(crate) fn rgb(color: (f32, f32, f32)) -> Color {
    Color::rgbf(color.0, color.1, color.2)
}

/// Shared drawing vocabulary for the per-surface renderers.
pub(crate) struct Painter<'a> {
    pub canvas: &'a mut Canvas<OpenGl>,
    pub fonts: &'a [FontId],
    pub theme: &'a Theme,
    pub scale: f32,
}

impl Painter<'_> {
    /// Snap a coordinate to the pixel grid to prevent blurry text rendering.
    #[inline]
    pub fn snap(coord: f32) -> f32 {
        coord.round()
    }

    pub fn fill_rect(&mut self, rect: Rect, color: (f32, f32, f32)) {
        let mut path = Path::new();
        path.rect(rect.x, rect.y, rect.width, rect.height);
        self.canvas.fill_path(&path, &Paint::color(rgb(color)));
    }

    pub fn fill_rect_alpha(&mut self, rect: Rect, color: (f32, f32, f32), alpha: u8) {
        let mut path = Path::new();
        path.rect(rect.x, rect.y, rect.width, rect.height);
        let paint = Paint::color(Color::rgba(
            (color.0 * 255.0) as u8,
            (color.1 * 255.0) as u8,
            (color.2 * 255.0) as u8,
            alpha,
        ));
        self.canvas.fill_path(&path, &paint);
    }

    pub fn rounded_rect(&mut self, rect: Rect, radius: f32, color: (f32, f32, f32)) {
        let mut path = Path::new();
        path.rounded_rect(rect.x, rect.y, rect.width, rect.height, radius);
        self.canvas.fill_path(&path, &Paint::color(rgb(color)));
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: (f32, f32, f32), line_width: f32) {
        let mut path = Path::new();
        path.rect(rect.x, rect.y, rect.width, rect.height);
        let mut paint = Paint::color(rgb(color));
        paint.set_line_width(line_width);
        self.canvas.stroke_path(&path, &paint);
    }

    pub fn text(&mut self, x: f32, y: f32, text: &str, size: f32, color: (f32, f32, f32)) {
        let mut paint = Paint::color(rgb(color));
        paint.set_font(self.fonts);
        paint.set_font_size(size * self.scale);
        let _ = self
            .canvas
            .fill_text(Self::snap(x), Self::snap(y), text, &paint);
    }

    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let mut paint = Paint::color(Color::rgb(255, 255, 255));
        paint.set_font(self.fonts);
        paint.set_font_size(size * self.scale);
        self.canvas
            .measure_text(0.0, 0.0, text, &paint)
            .map(|metrics| metrics.width())
            .unwrap_or(0.0)
    }

    pub fn char_width(&self, size: f32) -> f32 {
        let width = self.text_width("M", size);
        if width > 0.0 {
            width
        } else {
            rendering::FALLBACK_CHAR_WIDTH * self.scale
        }
    }

    pub fn draw_button(&mut self, button: &Button, hovered: bool) {
        let bg = if button.danger {
            self.theme.button_danger
        } else if hovered {
            self.theme.button_hover
        } else {
            self.theme.button_bg
        };
        self.rounded_rect(button.rect, 4.0 * self.scale, bg);

        let text_y = button.rect.y + button.rect.height * 0.72;
        let text_x = button.rect.x + (button.rect.width - self.label_width(&button.label)) / 2.0;
        self.text(
            text_x,
            text_y,
            &button.label,
            rendering::UI_FONT_SIZE,
            self.theme.button_fg,
        );
    }

    fn label_width(&self, label: &str) -> f32 {
        self.text_width(label, rendering::UI_FONT_SIZE)
    }

    pub fn draw_button_row(&mut self, row: &ButtonRow, hovered: Option<ButtonId>) {
        for button in &row.buttons {
            self.draw_button(button, hovered == Some(button.id));
        }
    }

    /// Tri-state checkbox: filled square (checked), inner dash (partial),
    /// empty border (unchecked).
    pub fn draw_checkbox(&mut self, rect: Rect, state: CheckState) {
        match state {
            CheckState::Checked => {
                self.rounded_rect(rect, 2.0 * self.scale, self.theme.accent);
                let inset = rect.width * 0.3;
                self.fill_rect(
                    Rect {
                        x: rect.x + inset,
                        y: rect.y + inset,
                        width: rect.width - inset * 2.0,
                        height: rect.height - inset * 2.0,
                    },
                    self.theme.bg,
                );
            }
            CheckState::Partial => {
                self.stroke_rect(rect, self.theme.accent, 1.5 * self.scale);
                self.fill_rect(
                    Rect {
                        x: rect.x + rect.width * 0.2,
                        y: rect.y + rect.height * 0.42,
                        width: rect.width * 0.6,
                        height: rect.height * 0.16,
                    },
                    self.theme.accent,
                );
            }
            CheckState::Unchecked => {
                self.stroke_rect(rect, self.theme.border, 1.5 * self.scale);
            }
        }
    }

    /// Collapse chevron: right-pointing when collapsed, down when expanded.
    pub fn draw_chevron(&mut self, x: f32, y: f32, collapsed: bool) {
        let size = 8.0 * self.scale;
        let mut path = Path::new();
        if collapsed {
            path.move_to(x, y - size / 2.0);
            path.line_to(x + size * 0.7, y);
            path.line_to(x, y + size / 2.0);
        } else {
            path.move_to(x - size / 2.0, y - size * 0.35);
            path.line_to(x + size / 2.0, y - size * 0.35);
            path.line_to(x, y + size * 0.35);
        }
        path.close();
        self.canvas
            .fill_path(&path, &Paint::color(rgb(self.theme.fg_dim)));
    }

    /// Single-line input box with optional placeholder, selection, cursor.
    pub fn draw_text_input(
        &mut self,
        input: &TextInput,
        rect: Rect,
        placeholder: &str,
        focused: bool,
        cursor_visible: bool,
    ) {
        self.rounded_rect(rect, 4.0 * self.scale, self.theme.row_bg);
        let border = if focused {
            self.theme.accent
        } else {
            self.theme.border
        };
        self.stroke_rect(rect, border, 1.0 * self.scale);

        let pad = crate::config::layout::FIELD_INNER_PAD * self.scale;
        let char_width = self.char_width(rendering::CONTENT_FONT_SIZE);
        let text_x = rect.x + pad - input.scroll_offset;
        let text_y = rect.y + rect.height * 0.68;

        self.canvas.save();
        self.canvas
            .intersect_scissor(rect.x + 1.0, rect.y, rect.width - 2.0, rect.height);

        if let Some((start, end)) = input.selection_range() {
            let start_chars = input.text()[..start].chars().count() as f32;
            let end_chars = input.text()[..end].chars().count() as f32;
            self.fill_rect(
                Rect {
                    x: text_x + start_chars * char_width,
                    y: rect.y + 3.0 * self.scale,
                    width: (end_chars - start_chars) * char_width,
                    height: rect.height - 6.0 * self.scale,
                },
                self.theme.selection,
            );
        }

        if input.is_empty() && !placeholder.is_empty() {
            self.text(
                rect.x + pad,
                text_y,
                placeholder,
                rendering::CONTENT_FONT_SIZE,
                self.theme.fg_dim,
            );
        } else {
            self.text(
                text_x,
                text_y,
                input.text(),
                rendering::CONTENT_FONT_SIZE,
                self.theme.fg,
            );
        }

        if focused && cursor_visible {
            let cursor_chars = input.text()[..input.cursor()].chars().count() as f32;
            self.fill_rect(
                Rect {
                    x: text_x + cursor_chars * char_width,
                    y: rect.y + 4.0 * self.scale,
                    width: 2.0 * self.scale,
                    height: rect.height - 8.0 * self.scale,
                },
                self.theme.cursor,
            );
        }

        self.canvas.restore();
    }

    /// Scrollbar thumb for a scrollable surface; silent when not scrollable.
    pub fn draw_scrollbar(
        &mut self,
        area: Rect,
        total: usize,
        visible: usize,
        offset: usize,
        hovered: bool,
        dragging: bool,
    ) {
        let bar = crate::ui::ScrollbarWidget::for_area(area, self.scale);
        if let Some(metrics) = bar.metrics(total, visible, offset) {
            let alpha = if dragging {
                140
            } else if hovered {
                90
            } else {
                50
            };
            let mut path = Path::new();
            path.rounded_rect(
                metrics.thumb.x,
                metrics.thumb.y,
                metrics.thumb.width,
                metrics.thumb.height,
                4.0,
            );
            let color = Paint::color(Color::rgba(
                (self.theme.fg.0 * 255.0) as u8,
                (self.theme.fg.1 * 255.0) as u8,
                (self.theme.fg.2 * 255.0) as u8,
                alpha,
            ));
            self.canvas.fill_path(&path, &color);
        }
    }
}
