use std::ops::Range;

use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use tui::style::{Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, MenuItem};
use crate::components::clock::{BigClock, GLYPH_HEIGHT};
use crate::components::palette::{Hue, resolve, urgency_hue};
use crate::ui::format;
use crate::ui::layout::LayoutAreas;
use pokerclock_core::cash_game::CashGameSummary;
use pokerclock_core::ledger::LedgerSummary;
use pokerclock_core::{GameMode, Theme, TournamentState, prizes};

static TABS: &[&str; 5] = &["Timer", "Players", "Prizes", "Blinds", "Cash Game"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        let theme = app.tournament().theme;
        f.render_widget(Block::default().style(resolve(Hue::Base, theme)), f.area());

        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_status(f, layout.status, app);
        }

        match app.state.active_tab {
            MenuItem::Timer => draw_timer(f, layout.main, app),
            MenuItem::Players => draw_players(f, layout.main, app),
            MenuItem::Prizes => draw_prizes(f, layout.main, app),
            MenuItem::Blinds => draw_blinds(f, layout.main, app),
            MenuItem::CashGame => draw_cash_game(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main, theme),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs, theme);
        }

        if app.state.prompt.is_some() {
            draw_prompt(f, f.area(), app);
        }
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(style: Style) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style)
}

fn themed_border<'a>(theme: Theme, title: &'a str) -> Block<'a> {
    default_border(resolve(Hue::Border, theme))
        .title(title)
        .title_style(resolve(Hue::Accent, theme))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let theme = app.tournament().theme;
    let style = resolve(Hue::Calm, theme);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Timer => 0,
        MenuItem::Players => 1,
        MenuItem::Prizes => 2,
        MenuItem::Blinds => 3,
        MenuItem::CashGame => 4,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {t}", i + 1)))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type)
                .border_style(resolve(Hue::Border, theme)),
        )
        .highlight_style(resolve(Hue::Accent, theme).add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let state = app.tournament();
    let sound = if state.sound_enabled { "♪" } else { "-" };
    let help = Paragraph::new(format!("{} {sound}  Help: ? ", state.game_mode.label()))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type)
                .border_style(resolve(Hue::Border, theme)),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let text = app.state.status.as_deref().unwrap_or("");
    f.render_widget(
        Paragraph::new(text).style(resolve(Hue::Dim, app.tournament().theme)),
        area,
    );
}

fn run_label(state: &TournamentState) -> &'static str {
    if state.is_running {
        "RUNNING"
    } else if state.is_paused {
        "PAUSED"
    } else {
        "STOPPED"
    }
}

fn draw_timer(f: &mut Frame, area: Rect, app: &App) {
    let state = app.tournament();
    let theme = state.theme;
    let block = themed_border(theme, " Tournament Clock ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, banner, clock, next, summary, legend] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(GLYPH_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let blinds = state
        .current_blind()
        .map(|b| b.label())
        .unwrap_or_else(|| "-".to_string());
    let mut header_lines = vec![Line::from(vec![
        Span::styled(
            format!("Level {} of {}", state.current_level + 1, state.blind_levels.len()),
            resolve(Hue::Accent, theme),
        ),
        Span::raw("   "),
        Span::styled(format!("Blinds {blinds}"), resolve(Hue::Calm, theme)),
    ])];
    let run_hue = if state.is_running { Hue::Good } else { Hue::Dim };
    let mut status = vec![Span::styled(run_label(state), resolve(run_hue, theme))];
    if state.game_mode == GameMode::CashGame {
        status.push(Span::styled(
            "   cash-game mode: the clock drives the session (g to switch)",
            resolve(Hue::Warning, theme),
        ));
    }
    header_lines.push(Line::from(status));
    f.render_widget(Paragraph::new(header_lines).alignment(Alignment::Center), header);

    if state.needs_attention() && state.game_mode == GameMode::Tournament {
        f.render_widget(
            Paragraph::new("ATTENTION! Blinds are about to go up")
                .style(resolve(Hue::Critical, theme).add_modifier(Modifier::RAPID_BLINK))
                .alignment(Alignment::Center),
            banner,
        );
    }

    let time = format::clock(u64::from(state.time_remaining));
    f.render_widget(
        BigClock { text: &time, style: resolve(urgency_hue(state.urgency()), theme) },
        clock,
    );

    let next_text = match state.next_blind() {
        Some(level) => format!("Next: {} ({} min)", level.label(), level.duration),
        None => "Final level".to_string(),
    };
    f.render_widget(
        Paragraph::new(next_text)
            .style(resolve(Hue::Dim, theme))
            .alignment(Alignment::Center),
        next,
    );

    let ledger = LedgerSummary::of(&state.players);
    f.render_widget(
        Paragraph::new(format!(
            "Players {}   Prize pool {}",
            ledger.players,
            format::money(state.total_prize_pool)
        ))
        .alignment(Alignment::Center),
        summary,
    );
    f.render_widget(
        Paragraph::new("space start/pause  r reset  n/→ next  p/← previous  s sound  t theme")
            .style(resolve(Hue::Dim, theme))
            .alignment(Alignment::Center),
        legend,
    );
}

/// Rows of a list that fit in `height`, keeping `selected` visible.
fn visible_rows(len: usize, selected: usize, height: usize) -> Range<usize> {
    if height == 0 || len == 0 {
        return 0..0;
    }
    let start = (selected + 1).saturating_sub(height).min(len.saturating_sub(height));
    start..len.min(start + height)
}

fn list_lines<'a>(
    rows: Vec<Line<'a>>,
    selected: usize,
    height: u16,
    theme: Theme,
) -> Vec<Line<'a>> {
    let range = visible_rows(rows.len(), selected, height as usize);
    rows.into_iter()
        .enumerate()
        .skip(range.start)
        .take(range.len())
        .map(|(i, line)| {
            if i == selected {
                line.style(resolve(Hue::Highlight, theme))
            } else {
                line
            }
        })
        .collect()
}

fn draw_players(f: &mut Frame, area: Rect, app: &App) {
    let state = app.tournament();
    let theme = state.theme;
    let block = themed_border(theme, " Players ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [prices, totals, heading, list, legend] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(format!(
            "Buy-in {}   Rebuy {}   Add-on {}",
            format::money(state.buy_in_amount),
            format::money(state.rebuy_amount),
            format::money(state.addon_amount)
        )),
        prices,
    );

    let ledger = LedgerSummary::of(&state.players);
    f.render_widget(
        Paragraph::new(format!(
            "{} players   {} buy-ins   {} rebuys   {} add-ons   Pool {}",
            ledger.players,
            ledger.buy_ins,
            ledger.rebuys,
            ledger.addons,
            format::money(state.total_prize_pool)
        ))
        .style(resolve(Hue::Accent, theme)),
        totals,
    );

    f.render_widget(
        Paragraph::new(format!(
            "  {:<20} {:>7} {:>7} {:>7} {:>10}",
            "Name", "Buy-ins", "Rebuys", "Add-ons", "Spent"
        ))
        .style(resolve(Hue::Dim, theme)),
        heading,
    );

    if state.players.is_empty() {
        f.render_widget(
            Paragraph::new("No players yet. Press a to add one.").style(resolve(Hue::Dim, theme)),
            list,
        );
    } else {
        let rows = state
            .players
            .iter()
            .map(|p| {
                Line::from(format!(
                    "  {:<20} {:>7} {:>7} {:>7} {:>10}",
                    p.name,
                    p.buy_ins,
                    p.rebuys,
                    p.addons,
                    format::money(p.total_spent)
                ))
            })
            .collect();
        f.render_widget(
            Paragraph::new(list_lines(rows, app.state.players.index, list.height, theme)),
            list,
        );
    }

    f.render_widget(
        Paragraph::new(
            "a add  b/B buy-in ±  r/R rebuy ±  o/O add-on ±  d remove  i/e/u set prices",
        )
        .style(resolve(Hue::Dim, theme)),
        legend,
    );
}

fn draw_prizes(f: &mut Frame, area: Rect, app: &App) {
    let state = app.tournament();
    let theme = state.theme;
    let block = themed_border(theme, " Prize Structure ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [pool, check, list, legend] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(format!(
            "Prize pool {}   Preset {}",
            format::money(state.total_prize_pool),
            app.state.prize_preset.label()
        ))
        .style(resolve(Hue::Accent, theme)),
        pool,
    );

    let total = prizes::total_percentage(&state.prize_structure);
    let (text, hue) = if state.prize_structure_is_valid() {
        (format!("Total {} ✓", format::percent(total)), Hue::Good)
    } else {
        (format!("Total {} (must be 100%)", format::percent(total)), Hue::Bad)
    };
    f.render_widget(Paragraph::new(text).style(resolve(hue, theme)), check);

    let rows = prizes::payouts(&state.prize_structure, state.total_prize_pool)
        .into_iter()
        .map(|p| {
            Line::from(format!(
                "  {:>3}.  {:>7}  {:>12}",
                p.position,
                format::percent(p.percentage),
                format::money(p.amount)
            ))
        })
        .collect();
    f.render_widget(
        Paragraph::new(list_lines(rows, app.state.prizes.index, list.height, theme)),
        list,
    );

    f.render_widget(
        Paragraph::new("p cycle preset  a add  d remove  +/- adjust 5%")
            .style(resolve(Hue::Dim, theme)),
        legend,
    );
}

fn draw_blinds(f: &mut Frame, area: Rect, app: &App) {
    let state = app.tournament();
    let theme = state.theme;
    let block = themed_border(theme, " Blind Levels ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [heading, list, legend] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(format!(
            "  {:>5}  {:>8}  {:>8}  {:>6}  {:>8}     preset {}",
            "Level",
            "Small",
            "Big",
            "Ante",
            "Minutes",
            app.state.blind_preset.label()
        ))
        .style(resolve(Hue::Dim, theme)),
        heading,
    );

    let rows = state
        .blind_levels
        .iter()
        .enumerate()
        .map(|(i, level)| {
            let marker = if i == state.current_level { "▶" } else { " " };
            let ante = level.ante.map_or("-".to_string(), |a| a.to_string());
            Line::from(format!(
                "{marker} {:>5}  {:>8}  {:>8}  {:>6}  {:>8}",
                level.level, level.small_blind, level.big_blind, ante, level.duration
            ))
        })
        .collect();
    f.render_widget(
        Paragraph::new(list_lines(rows, app.state.levels.index, list.height, theme)),
        list,
    );

    f.render_widget(
        Paragraph::new("Enter jump to level  a add  e edit  d remove  p cycle preset")
            .style(resolve(Hue::Dim, theme)),
        legend,
    );
}

fn draw_cash_game(f: &mut Frame, area: Rect, app: &App) {
    let state = app.tournament();
    let theme = state.theme;
    let block = themed_border(theme, " Cash Game ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [clock, status, summary, heading, list, legend] = Layout::vertical([
        Constraint::Length(GLYPH_HEIGHT + 2),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let time = format::clock(state.cash_game_time);
    f.render_widget(BigClock { text: &time, style: resolve(Hue::Calm, theme) }, clock);

    let status_line = if state.game_mode == GameMode::CashGame {
        let (text, hue) = if state.is_running {
            ("Session running", Hue::Good)
        } else if state.is_paused {
            ("Session paused", Hue::Warning)
        } else {
            ("Session stopped", Hue::Dim)
        };
        Line::styled(text, resolve(hue, theme))
    } else {
        Line::styled(
            "Tournament mode: press g to run the session clock",
            resolve(Hue::Warning, theme),
        )
    };
    f.render_widget(Paragraph::new(status_line).alignment(Alignment::Center), status);

    let totals = CashGameSummary::of(&state.cash_game_players);
    f.render_widget(
        Paragraph::new(format!(
            "{} players ({} active)   Total money {}   Entry fee {}",
            totals.players,
            totals.active,
            format::money(totals.total_money),
            format::money(state.cash_game_entry_fee)
        ))
        .style(resolve(Hue::Accent, theme))
        .alignment(Alignment::Center),
        summary,
    );

    f.render_widget(
        Paragraph::new(format!(
            "  {:<20} {:>10} {:>9} {:>6}  {}",
            "Name", "Spent", "Time", "Buys", "Status"
        ))
        .style(resolve(Hue::Dim, theme)),
        heading,
    );

    if state.cash_game_players.is_empty() {
        f.render_widget(
            Paragraph::new("No players yet. Press a to add one.").style(resolve(Hue::Dim, theme)),
            list,
        );
    } else {
        let rows = state
            .cash_game_players
            .iter()
            .map(|p| {
                let flag = if p.is_active { "active" } else { "out" };
                Line::from(format!(
                    "  {:<20} {:>10} {:>9} {:>6}  {flag}",
                    p.name,
                    format::money(p.amount_spent),
                    format::minutes(p.time_in()),
                    p.purchases.len()
                ))
            })
            .collect();
        f.render_widget(
            Paragraph::new(list_lines(rows, app.state.cash_players.index, list.height, theme)),
            list,
        );
    }

    f.render_widget(
        Paragraph::new(
            "space start/pause  r reset  a add  t/Enter in/out  +/- entry fee  $ amount  n rename  e fee  d remove",
        )
        .style(resolve(Hue::Dim, theme)),
        legend,
    );
}

fn draw_help(f: &mut Frame, area: Rect, theme: Theme) {
    let block = themed_border(theme, " Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let sections: [(&str, &[&str]); 6] = [
        ("Global", &[
            "1-5 switch tab   ? help   Esc leave help   q quit",
            "g tournament/cash mode   s sound   t theme   f full screen   \" logs",
        ]),
        ("Timer", &["space start/pause/resume   r reset   n or → next level   p or ← previous level"]),
        ("Players", &[
            "a add   j/k select   b/B r/R o/O change buy-ins, rebuys, add-ons   d remove",
            "i buy-in price   e rebuy price   u add-on price",
        ]),
        ("Prizes", &["p cycle preset   a add \"position percent\"   d remove   +/- adjust by 5%"]),
        ("Blinds", &[
            "Enter jump to level   a add \"small big [ante] minutes\"   e edit   d remove   p preset",
        ]),
        ("Cash Game", &[
            "space start/pause   r reset session   a add \"name [amount]\"   t/Enter toggle in/out",
            "+ buy another entry   - refund one entry   $ set amount   n rename   e entry fee   d remove",
        ]),
    ];

    let mut lines = Vec::new();
    for (title, rows) in sections {
        lines.push(Line::styled(title, resolve(Hue::Accent, theme)));
        for row in rows {
            lines.push(Line::from(format!("  {row}")));
        }
        lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, area: Rect, theme: Theme) {
    let widget = TuiLoggerWidget::default()
        .block(themed_border(theme, " Logs "))
        .style(resolve(Hue::Dim, theme))
        .style_error(resolve(Hue::Critical, theme))
        .style_warn(resolve(Hue::Warning, theme))
        .output_separator(' ')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false);
    f.render_widget(widget, area);
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    popup
}

fn draw_prompt(f: &mut Frame, area: Rect, app: &App) {
    let Some(prompt) = app.state.prompt.as_ref() else {
        return;
    };
    let theme = app.tournament().theme;
    let popup = popup_area(area, 60, 5);
    f.render_widget(Clear, popup);

    let title = format!(" {} ", prompt.kind.title());
    let block = default_border(resolve(Hue::Accent, theme))
        .title(title)
        .style(resolve(Hue::Base, theme));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let lines = vec![
        Line::styled(prompt.kind.hint(), resolve(Hue::Dim, theme)),
        Line::styled(format!("> {}_", prompt.input), resolve(Hue::Calm, theme)),
        Line::styled("Enter confirm   Esc cancel", resolve(Hue::Dim, theme)),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use tui::backend::TestBackend;

    #[test]
    fn visible_rows_follow_the_selection() {
        assert_eq!(visible_rows(0, 0, 5), 0..0);
        assert_eq!(visible_rows(3, 2, 5), 0..3);
        assert_eq!(visible_rows(10, 0, 4), 0..4);
        assert_eq!(visible_rows(10, 6, 4), 3..7);
        assert_eq!(visible_rows(10, 9, 4), 6..10);
        assert_eq!(visible_rows(10, 3, 0), 0..0);
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        draw(&mut terminal, app);
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn every_tab_renders() {
        let mut app = App::with_settings(AppSettings::default());
        for tab in [
            MenuItem::Timer,
            MenuItem::Players,
            MenuItem::Prizes,
            MenuItem::Blinds,
            MenuItem::CashGame,
            MenuItem::Help,
        ] {
            app.update_tab(tab);
            assert!(!screen(&mut app).trim().is_empty());
        }
    }

    #[test]
    fn timer_shows_level_and_next_blind() {
        let mut app = App::with_settings(AppSettings::default());
        let text = screen(&mut app);
        assert!(text.contains("Level 1 of 10"));
        assert!(text.contains("Next: 50/100 (15 min)"));
    }

    #[test]
    fn invalid_payouts_are_flagged() {
        let mut app = App::with_settings(AppSettings::default());
        app.update_tab(MenuItem::Prizes);
        app.adjust_selected_prize(1.0);
        assert!(screen(&mut app).contains("must be 100%"));
    }
}
