use ratatui::style::Color;

// Backgrounds
pub const BG_DARK: Color = Color::Rgb(14, 13, 12);
pub const BG_SURFACE: Color = Color::Rgb(26, 24, 22);
pub const BG_HIGHLIGHT: Color = Color::Rgb(48, 40, 30);

// Primary accent (crude amber)
pub const AMBER: Color = Color::Rgb(245, 166, 35);

// Text
pub const TEXT: Color = Color::Rgb(225, 222, 215);
pub const TEXT_DIM: Color = Color::Rgb(150, 144, 135);
pub const TEXT_MUTED: Color = Color::Rgb(95, 90, 84);

// Semantic
pub const GREEN: Color = Color::Rgb(52, 211, 153);
pub const RED: Color = Color::Rgb(248, 113, 113);
pub const YELLOW: Color = Color::Rgb(251, 191, 36);
pub const CYAN: Color = Color::Rgb(103, 232, 249);
