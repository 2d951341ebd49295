use pokerclock_core::Theme;
use pokerclock_core::state::Urgency;
use tui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hue {
    /// Whole-frame foreground and background.
    Base,
    Dim,
    Border,
    Accent,
    Highlight,
    Calm,
    Warning,
    Critical,
    Good,
    Bad,
}

pub fn resolve(hue: Hue, theme: Theme) -> Style {
    match (hue, theme) {
        (Hue::Base, Theme::Light) => Style::default().fg(Color::Black).bg(Color::White),
        (Hue::Base, Theme::Dark) => Style::default().fg(Color::Gray).bg(Color::Black),
        (Hue::Dim, Theme::Light) => Style::default().fg(Color::DarkGray),
        (Hue::Dim, Theme::Dark) => Style::default().fg(Color::Indexed(244)),
        (Hue::Border, Theme::Light) => Style::default().fg(Color::Gray),
        (Hue::Border, Theme::Dark) => Style::default().fg(Color::DarkGray),
        (Hue::Accent, Theme::Light) => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        (Hue::Accent, Theme::Dark) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        (Hue::Highlight, Theme::Light) => Style::default().fg(Color::White).bg(Color::Blue),
        (Hue::Highlight, Theme::Dark) => Style::default().fg(Color::Black).bg(Color::Cyan),
        (Hue::Calm, Theme::Light) => Style::default().fg(Color::Black),
        (Hue::Calm, Theme::Dark) => Style::default().fg(Color::White),
        (Hue::Warning, Theme::Light) => Style::default().fg(Color::Rgb(202, 138, 4)),
        (Hue::Warning, Theme::Dark) => Style::default().fg(Color::Yellow),
        (Hue::Critical, _) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        (Hue::Good, Theme::Light) => Style::default().fg(Color::Rgb(22, 163, 74)),
        (Hue::Good, Theme::Dark) => Style::default().fg(Color::Green),
        (Hue::Bad, _) => Style::default().fg(Color::Red),
    }
}

pub fn urgency_hue(urgency: Urgency) -> Hue {
    match urgency {
        Urgency::Calm => Hue::Calm,
        Urgency::Warning => Hue::Warning,
        Urgency::Critical => Hue::Critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_is_red_in_both_themes() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(resolve(urgency_hue(Urgency::Critical), theme).fg, Some(Color::Red));
        }
        assert_ne!(resolve(Hue::Base, Theme::Light), resolve(Hue::Base, Theme::Dark));
    }
}
