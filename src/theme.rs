//! Theme colors for the session viewer

pub struct Theme {
    /// Background color (RGB 0.0-1.0)
    pub bg: (f32, f32, f32),
    /// Foreground/text color
    pub fg: (f32, f32, f32),
    /// Secondary text (timestamps, stats, muted headers)
    pub fg_dim: (f32, f32, f32),
    /// Window header backgrounds, two alternating categories
    pub window_colors: [(f32, f32, f32); 2],
    /// Group header backgrounds, three cycling categories
    pub group_colors: [(f32, f32, f32); 3],
    /// Tab row background
    pub row_bg: (f32, f32, f32),
    /// Hovered row background
    pub row_hover: (f32, f32, f32),
    /// Selected tab row background
    pub row_selected: (f32, f32, f32),
    /// Search match highlight box
    pub highlight: (f32, f32, f32),
    /// General UI button background
    pub button_bg: (f32, f32, f32),
    /// General UI button hover background
    pub button_hover: (f32, f32, f32),
    /// General UI button foreground (text/icon)
    pub button_fg: (f32, f32, f32),
    /// Destructive button background (Delete Selected)
    pub button_danger: (f32, f32, f32),
    /// Border color for UI elements
    pub border: (f32, f32, f32),
    /// Accent (checkbox fill, progress bar, active field border)
    pub accent: (f32, f32, f32),
    /// Cursor color
    pub cursor: (f32, f32, f32),
    /// Text selection background
    pub selection: (f32, f32, f32),
    /// Error message text
    pub error: (f32, f32, f32),
    /// Modal backdrop alpha (0-255)
    pub backdrop_alpha: u8,
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: (0.08, 0.09, 0.11),             // Near-black blue
            fg: (0.88, 0.9, 0.93),              // Soft white
            fg_dim: (0.55, 0.58, 0.64),         // Slate
            window_colors: [
                (0.13, 0.17, 0.24),             // Deep blue
                (0.11, 0.2, 0.17),              // Deep teal
            ],
            group_colors: [
                (0.2, 0.15, 0.24),              // Violet
                (0.23, 0.18, 0.11),             // Amber-brown
                (0.12, 0.2, 0.23),              // Cyan-slate
            ],
            row_bg: (0.11, 0.12, 0.14),
            row_hover: (0.15, 0.17, 0.2),
            row_selected: (0.16, 0.23, 0.31),
            highlight: (0.55, 0.45, 0.1),       // Mustard box behind matches
            button_bg: (0.16, 0.18, 0.22),
            button_hover: (0.22, 0.25, 0.3),
            button_fg: (0.85, 0.88, 0.92),
            button_danger: (0.35, 0.14, 0.14),  // Muted red
            border: (0.22, 0.24, 0.28),
            accent: (0.3, 0.55, 0.9),           // Blue accent
            cursor: (0.9, 0.9, 0.95),
            selection: (0.2, 0.32, 0.45),
            error: (0.9, 0.4, 0.4),
            backdrop_alpha: 120,
        }
    }

    /// Light theme
    #[allow(dead_code)]
    pub fn light() -> Self {
        Self {
            bg: (0.98, 0.98, 0.98),
            fg: (0.1, 0.1, 0.1),
            fg_dim: (0.45, 0.45, 0.48),
            window_colors: [(0.88, 0.92, 0.98), (0.88, 0.96, 0.92)],
            group_colors: [(0.94, 0.9, 0.98), (0.98, 0.94, 0.86), (0.88, 0.95, 0.97)],
            row_bg: (1.0, 1.0, 1.0),
            row_hover: (0.94, 0.94, 0.95),
            row_selected: (0.85, 0.91, 0.98),
            highlight: (1.0, 0.9, 0.5),
            button_bg: (0.93, 0.93, 0.94),
            button_hover: (0.88, 0.88, 0.9),
            button_fg: (0.15, 0.15, 0.18),
            button_danger: (0.95, 0.75, 0.75),
            border: (0.82, 0.82, 0.85),
            accent: (0.2, 0.4, 0.8),
            cursor: (0.1, 0.1, 0.15),
            selection: (0.75, 0.85, 0.97),
            error: (0.75, 0.15, 0.15),
            backdrop_alpha: 90,
        }
    }

    /// Window header color for the projector's 2-way visual category (1..=2).
    pub fn window_color(&self, category: usize) -> (f32, f32, f32) {
        self.window_colors[(category + 1) % 2]
    }

    /// Group header color for the projector's 3-way visual category (1..=3).
    pub fn group_color(&self, category: usize) -> (f32, f32, f32) {
        self.group_colors[(category + 2) % 3]
    }
}
