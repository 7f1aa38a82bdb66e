//! Handle the color theme
use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};

use crate::options::ChipBoxOptions;

/// Theme defaults to Dark256
pub static DEFAULT_THEME: LazyLock<ColorTheme> = LazyLock::new(ColorTheme::dark256);

/// The color scheme of the search box
///
/// <pre>
/// Select all the states                 --> header
/// [◉ Karnataka x] [◉ Haryana x] hi|     --> chip (& thumbnail, remove) & query
/// ───────────────────────────────       --> border
///               ┌───────────────────┐
///               │ ◉ Himachal Pradesh│   --> suggestion_highlight
///               │ ◉ New Delhi       │   --> suggestion
///               └───────────────────┘
/// </pre>
#[derive(Copy, Clone, Debug, Default)]
pub struct ColorTheme {
    /// General text
    pub normal: Style,
    /// Header line
    pub header: Style,
    /// Prompt prefix
    pub prompt: Style,
    /// Query text in the input field
    pub query: Style,
    /// Placeholder shown in an empty input field
    pub placeholder: Style,
    /// Chips
    pub chip: Style,
    /// The chip pending keyboard deletion
    pub chip_highlight: Style,
    /// Remove control of a chip
    pub remove: Style,
    /// Thumbnail glyph of chips and rows
    pub thumbnail: Style,
    /// Suggestion rows
    pub suggestion: Style,
    /// The highlighted suggestion row
    pub suggestion_highlight: Style,
    /// Box and dropdown borders
    pub border: Style,
}

impl ColorTheme {
    /// Setup the theme from the options
    pub fn init_from_options(options: &ChipBoxOptions) -> ColorTheme {
        if let Some(color) = options.color.clone() {
            ColorTheme::from_options(&color)
        } else {
            // Check for NO_COLOR environment variable
            match std::env::var_os("NO_COLOR") {
                Some(no_color) if !no_color.is_empty() => ColorTheme::none(),
                _ => *DEFAULT_THEME,
            }
        }
    }

    fn none() -> Self {
        Self {
            chip_highlight: Style::default().reversed(),
            suggestion_highlight: Style::default().bold(),
            placeholder: Style::default().dim(),
            ..ColorTheme::default()
        }
    }

    fn bw() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            chip: base.chip.underlined(),
            suggestion_highlight: base.suggestion_highlight.reversed(),
            header: base.header.bold(),
            ..base
        }
    }

    fn default16() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            header: base.header.fg(Color::Cyan),
            prompt: base.prompt.fg(Color::Blue),
            chip: base.chip.fg(Color::Black).bg(Color::White),
            chip_highlight: base.chip_highlight.fg(Color::White).bg(Color::Blue),
            remove: base.remove.fg(Color::Red),
            thumbnail: base.thumbnail.fg(Color::Green),
            suggestion_highlight: base.suggestion_highlight.fg(Color::Black).bg(Color::Cyan),
            border: base.border.fg(Color::Blue),
            ..base
        }
    }

    fn dark256() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            header: base.header.fg(Color::Indexed(109)).bold(),
            prompt: base.prompt.fg(Color::Indexed(110)),
            chip: base.chip.fg(Color::Indexed(252)).bg(Color::Indexed(238)),
            chip_highlight: Style::default().fg(Color::Indexed(234)).bg(Color::Indexed(110)),
            remove: base.remove.fg(Color::Indexed(161)),
            thumbnail: base.thumbnail.fg(Color::Indexed(148)),
            suggestion: base.suggestion.bg(Color::Indexed(235)),
            suggestion_highlight: base.suggestion_highlight.fg(Color::Indexed(234)).bg(Color::Indexed(153)),
            border: base.border.fg(Color::Indexed(110)),
            ..base
        }
    }

    fn light256() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            header: base.header.fg(Color::Indexed(31)).bold(),
            prompt: base.prompt.fg(Color::Indexed(25)),
            chip: base.chip.fg(Color::Indexed(236)).bg(Color::Rgb(0xf4, 0xf4, 0xf4)),
            chip_highlight: Style::default().fg(Color::Indexed(236)).bg(Color::Rgb(0xc1, 0xe4, 0xfe)),
            remove: base.remove.fg(Color::Indexed(161)),
            thumbnail: base.thumbnail.fg(Color::Indexed(65)),
            suggestion: base.suggestion.bg(Color::Rgb(0xf4, 0xf4, 0xf4)),
            suggestion_highlight: base.suggestion_highlight.bg(Color::Rgb(0xc1, 0xe4, 0xfe)),
            border: base.border.fg(Color::Rgb(0x82, 0xb7, 0xdf)),
            ..base
        }
    }

    fn set_color(&mut self, name: &str, spec: &str) {
        let spec_parts: Vec<_> = spec.split(&['+', ':']).collect();

        // Compute color
        let raw_color = spec_parts[0];
        let new_color = if raw_color.len() == 7 && raw_color.starts_with('#') {
            // RGB Hex color
            let r = u8::from_str_radix(&raw_color[1..3], 16).unwrap_or(255);
            let g = u8::from_str_radix(&raw_color[3..5], 16).unwrap_or(255);
            let b = u8::from_str_radix(&raw_color[5..7], 16).unwrap_or(255);
            Some(Color::Rgb(r, g, b))
        } else {
            raw_color.parse::<u8>().ok().map(Color::Indexed).or_else(|| {
                debug!("Unknown color '{}'", spec_parts[0]);
                None
            })
        };

        let mut modifier = Modifier::empty();
        for part in spec_parts.iter().skip(1) {
            if matches!(*part, "x" | "regular") {
                modifier = Modifier::empty()
            } else {
                modifier |= match *part {
                    "b" | "bold" => Modifier::BOLD,
                    "u" | "underlined" => Modifier::UNDERLINED,
                    "d" | "dim" => Modifier::DIM,
                    "i" | "italic" => Modifier::ITALIC,
                    "r" | "reverse" => Modifier::REVERSED,
                    m => {
                        debug!("Unknown modifier '{m}'");
                        Modifier::empty()
                    }
                };
            }
        }
        let (component_name, layer) = if let Some(c) = name.strip_suffix("_fg").or(name.strip_suffix("-fg")) {
            (c, "fg")
        } else if let Some(c) = name.strip_suffix("_bg").or(name.strip_suffix("-bg")) {
            (c, "bg")
        } else if name == "bg" {
            ("", "bg")
        } else {
            (name, "fg")
        };

        let style = match component_name {
            "" | "normal" => &mut self.normal,
            "header" => &mut self.header,
            "prompt" => &mut self.prompt,
            "query" => &mut self.query,
            "placeholder" => &mut self.placeholder,
            "chip" => &mut self.chip,
            "chip_highlight" | "chip+" => &mut self.chip_highlight,
            "remove" => &mut self.remove,
            "thumbnail" | "image" => &mut self.thumbnail,
            "suggestion" | "row" => &mut self.suggestion,
            "suggestion_highlight" | "row+" => &mut self.suggestion_highlight,
            "border" => &mut self.border,
            other => {
                debug!("Unknown theme component '{other}'");
                return;
            }
        };
        set_style(style, layer, new_color, modifier);
    }

    fn from_options(color: &str) -> Self {
        let mut theme = *DEFAULT_THEME;
        for pair in color.split(',') {
            if let Some((name, spec)) = pair.split_once(':') {
                theme.set_color(name, spec);
            } else {
                theme = match pair {
                    "light" => ColorTheme::light256(),
                    "16" => ColorTheme::default16(),
                    "bw" => ColorTheme::bw(),
                    "none" | "empty" => ColorTheme::none(),
                    "dark" | "default" => ColorTheme::dark256(),
                    t => {
                        debug!("Unknown color theme '{t}'");
                        ColorTheme::dark256()
                    }
                };
            }
        }
        theme
    }
}

fn set_style(s: &mut Style, layer: &str, color: Option<Color>, modifier: Modifier) {
    if let Some(c) = color {
        *s = match layer {
            "fg" => s.fg(c),
            "bg" => s.bg(c),
            _ => *s,
        }
    }
    *s = s.add_modifier(modifier);
}
