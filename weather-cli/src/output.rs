use crossterm::style::{Color, Stylize};
use zipweather_core::{Line, LineKind, ThemeStyle};

struct Palette {
    title: Color,
    banner: Color,
    accent: Color,
    error: Color,
    text: Color,
    dim: Color,
}

impl Palette {
    fn for_style(style: ThemeStyle) -> Self {
        if style.dark {
            Self {
                title: Color::Cyan,
                banner: Color::White,
                accent: Color::Yellow,
                error: Color::Red,
                text: Color::Grey,
                dim: Color::DarkGrey,
            }
        } else {
            Self {
                title: Color::DarkBlue,
                banner: Color::Black,
                accent: Color::DarkMagenta,
                error: Color::DarkRed,
                text: Color::Black,
                dim: Color::DarkGrey,
            }
        }
    }
}

/// Print rendered lines, colored for the active theme.
pub fn print_lines(lines: &[Line], style: ThemeStyle) {
    let palette = Palette::for_style(style);

    for line in lines {
        let text = line.text.as_str();
        match line.kind {
            LineKind::Title => println!("{}", text.with(palette.title).bold()),
            LineKind::Banner => println!("{}", text.with(palette.banner).bold()),
            LineKind::Loading => println!("{}", text.with(palette.dim).italic()),
            LineKind::Error => println!("{}", text.with(palette.error).bold()),
            LineKind::Heading => println!("{}", text.with(palette.accent).bold()),
            LineKind::TableHeader => println!("{}", text.with(palette.text).underlined()),
            LineKind::Row => println!("{}", text.with(palette.text)),
            LineKind::Blank => println!(),
        }
    }
}
