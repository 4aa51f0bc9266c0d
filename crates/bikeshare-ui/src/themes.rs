use crossterm::style::{Attribute, Color, ContentStyle};
use crossterm::tty::IsTty;

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark; 7–15 are light. Absent or unparseable values count as dark.
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|val| val.split(';').next_back()?.parse::<u8>().ok())
        .map(|bg| {
            if bg <= 6 {
                BackgroundType::Dark
            } else {
                BackgroundType::Light
            }
        })
        .unwrap_or(BackgroundType::Dark)
}

fn style(fg: Color, attribute: Option<Attribute>) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = Some(fg);
    if let Some(attribute) = attribute {
        style.attributes.set(attribute);
    }
    style
}

/// Text styles for the report output. A disabled theme emits plain text.
#[derive(Debug, Clone)]
pub struct Theme {
    enabled: bool,
    pub heading: ContentStyle,
    pub label: ContentStyle,
    pub value: ContentStyle,
    pub dim: ContentStyle,
    pub warning: ContentStyle,
    pub error: ContentStyle,
    pub table_header: ContentStyle,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// No escape codes at all; used for pipes, logs and tests.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            heading: ContentStyle::new(),
            label: ContentStyle::new(),
            value: ContentStyle::new(),
            dim: ContentStyle::new(),
            warning: ContentStyle::new(),
            error: ContentStyle::new(),
            table_header: ContentStyle::new(),
        }
    }

    /// Colours tuned for a dark terminal background.
    pub fn dark() -> Self {
        Self {
            enabled: true,
            heading: style(Color::Cyan, Some(Attribute::Bold)),
            label: style(Color::Grey, None),
            value: style(Color::White, Some(Attribute::Bold)),
            dim: style(Color::DarkGrey, None),
            warning: style(Color::Yellow, None),
            error: style(Color::Red, Some(Attribute::Bold)),
            table_header: style(Color::Cyan, Some(Attribute::Underlined)),
        }
    }

    /// Colours tuned for a light terminal background.
    pub fn light() -> Self {
        Self {
            enabled: true,
            heading: style(Color::DarkBlue, Some(Attribute::Bold)),
            label: style(Color::DarkGrey, None),
            value: style(Color::Black, Some(Attribute::Bold)),
            dim: style(Color::Grey, None),
            warning: style(Color::DarkYellow, None),
            error: style(Color::DarkRed, Some(Attribute::Bold)),
            table_header: style(Color::DarkBlue, Some(Attribute::Underlined)),
        }
    }

    /// Pick a theme for stdout.
    ///
    /// Colour is off when `no_color` is set, when `NO_COLOR` is present in the
    /// environment, or when stdout is not a terminal.
    pub fn auto_detect(no_color: bool) -> Self {
        if no_color || std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_tty() {
            return Self::plain();
        }
        match detect_background() {
            BackgroundType::Dark => Self::dark(),
            BackgroundType::Light => Self::light(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Render `text` in `style`, or verbatim when the theme is disabled.
    pub fn paint(&self, style: ContentStyle, text: &str) -> String {
        if self.enabled {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
