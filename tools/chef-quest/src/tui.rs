use crate::catalog::{
    Recipe, COOKING_STEPS, GALLERY_IMAGE_URLS, HERO_IMAGE_URL, LOGO_URL,
};
use crate::errors::QuestError;
use crate::fsm::QuestSession;
use crate::types::Phase;
use ratatui::backend::TestBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

const HERO_INDENT: i16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    RecipeGrid,
    Clue,
    Checkout,
    Cooking,
}

pub fn screen_for(session: &QuestSession) -> Screen {
    match session.phase {
        Phase::Selecting => Screen::RecipeGrid,
        Phase::Questing => Screen::Clue,
        Phase::Checkout => Screen::Checkout,
        Phase::Cooking => Screen::Cooking,
    }
}

#[derive(Debug, Clone)]
pub struct QuestView<'a> {
    pub session: QuestSession,
    pub catalog: &'a [Recipe],
    pub parallax_columns: i16,
    pub legend: String,
    pub status: Option<String>,
}

pub fn draw_quest(frame: &mut Frame<'_>, view: &QuestView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(8),
            Constraint::Length(4),
            Constraint::Length(6),
        ])
        .split(frame.area());

    draw_hero(frame, chunks[0], view);
    match screen_for(&view.session) {
        Screen::RecipeGrid => draw_recipe_grid(frame, chunks[1], view),
        Screen::Clue => draw_clue(frame, chunks[1], view),
        Screen::Checkout => draw_checkout(frame, chunks[1], view),
        Screen::Cooking => draw_cooking(frame, chunks[1], view),
    }
    draw_gallery(frame, chunks[2]);
    draw_footer(frame, chunks[3], view);
}

/// Renders one frame off-screen and returns it as plain text, one row per line.
pub fn render_quest(view: &QuestView<'_>, width: u16, height: u16) -> Result<String, QuestError> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).map_err(|e| QuestError::Render(e.to_string()))?;
    terminal
        .draw(|frame| draw_quest(frame, view))
        .map_err(|e| QuestError::Render(e.to_string()))?;

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    Ok(out)
}

pub fn asset_label(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

fn draw_hero(frame: &mut Frame<'_>, area: Rect, view: &QuestView<'_>) {
    let indent = " ".repeat((HERO_INDENT + view.parallax_columns).max(0) as usize);
    let mut lines = vec![
        Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(
                "Chef Quest",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  [{}]", asset_label(LOGO_URL)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(format!(
            "{indent}Explore Jungle Jim's: find wild ingredients, complete treasure hunts, cook up the adventure!"
        )),
        Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(
                "[s] Start the Quest ->",
                Style::default().fg(Color::White).bg(Color::Green),
            ),
        ]),
    ];
    if view.session.phase == Phase::Selecting {
        if let Some(recipe) = view.session.selected(view.catalog) {
            lines.push(Line::from(format!(
                "{indent}Preview: {} [{}]",
                recipe.name,
                asset_label(recipe.image)
            )));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Jungle Jim's [{}]", asset_label(HERO_IMAGE_URL)));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_recipe_grid(frame: &mut Frame<'_>, area: Rect, view: &QuestView<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    frame.render_widget(
        Paragraph::new("Choose a dish to hunt for ingredients across Jungle Jim's aisles")
            .block(Block::default().borders(Borders::ALL).title("Pick Your Recipe")),
        rows[0],
    );

    if view.catalog.is_empty() {
        return;
    }
    let constraints = view
        .catalog
        .iter()
        .map(|_| Constraint::Ratio(1, view.catalog.len() as u32))
        .collect::<Vec<_>>();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(rows[1]);

    for (idx, (recipe, card)) in view.catalog.iter().zip(cards.iter()).enumerate() {
        let selected = view.session.selected_recipe == Some(idx);
        let border = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut lines = vec![
            Line::from(Span::styled(
                recipe.name,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("{} | {}", recipe.time, recipe.difficulty.label())),
        ];
        if selected {
            lines.push(Line::from(Span::styled(
                "* selected *",
                Style::default().fg(Color::Yellow),
            )));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border)
                        .title(format!("[{}]", idx + 1)),
                ),
            *card,
        );
    }
}

fn draw_clue(frame: &mut Frame<'_>, area: Rect, view: &QuestView<'_>) {
    let Some(recipe) = view.session.selected(view.catalog) else {
        draw_missing_recipe(frame, area);
        return;
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let step = view.session.current_step;
    let clue_lines = match view.session.current_clue(view.catalog) {
        Some(clue) => vec![
            Line::from(clue.clue),
            Line::from(Span::styled(
                format!("Hint: {}", clue.hint),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
        ],
        None => vec![Line::from("No clue at this step")],
    };
    frame.render_widget(
        Paragraph::new(clue_lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(format!("Clue #{}", step + 1))),
        rows[0],
    );

    let checklist = recipe
        .ingredients
        .iter()
        .enumerate()
        .map(|(idx, ingredient)| {
            if view.session.is_collected(idx) {
                Line::from(Span::styled(
                    format!("[x] {}", ingredient.name),
                    Style::default().fg(Color::Green),
                ))
            } else {
                Line::from(Span::styled(
                    format!("[ ] {}", ingredient.name),
                    Style::default().fg(Color::DarkGray),
                ))
            }
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(checklist).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Ingredients Collected"),
        ),
        rows[1],
    );

    let advance = if view.session.is_last_clue(view.catalog) {
        "[f] Found Everything!"
    } else {
        "[f] Found It!"
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(advance, Style::default().fg(Color::White).bg(Color::Green)),
            Span::raw("   [r] Restart"),
        ])),
        rows[2],
    );
}

fn draw_checkout(frame: &mut Frame<'_>, area: Rect, view: &QuestView<'_>) {
    let Some(recipe) = view.session.selected(view.catalog) else {
        draw_missing_recipe(frame, area);
        return;
    };
    let lines = vec![
        Line::from(Span::styled(
            "Quest Complete!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("You've collected all ingredients for {}", recipe.name)),
        Line::from("Head to checkout and scan this QR code for your recipe:"),
        Line::from("  +-----------+"),
        Line::from("  |  QR CODE  |"),
        Line::from("  |  Scan for |"),
        Line::from("  |   Recipe  |"),
        Line::from("  +-----------+"),
        Line::from(Span::styled(
            "[u] QR Scanned! -> Cook It Up",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Checkout")),
        area,
    );
}

fn draw_cooking(frame: &mut Frame<'_>, area: Rect, view: &QuestView<'_>) {
    let Some(recipe) = view.session.selected(view.catalog) else {
        draw_missing_recipe(frame, area);
        return;
    };
    let mut lines = vec![
        Line::from(Span::styled(
            "Time to Cook!",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Get ready to make {}", recipe.name)),
        Line::from("Cooking Instructions:"),
    ];
    lines.extend(
        COOKING_STEPS
            .iter()
            .enumerate()
            .map(|(idx, step)| Line::from(format!("{}. {step}", idx + 1))),
    );
    lines.push(Line::from("[n] Start New Quest   [t] Talk to Sales"));
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Cooking")),
        area,
    );
}

fn draw_missing_recipe(frame: &mut Frame<'_>, area: Rect) {
    frame.render_widget(
        Paragraph::new("No recipe selected").block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_gallery(frame: &mut Frame<'_>, area: Rect) {
    let labels = GALLERY_IMAGE_URLS
        .iter()
        .enumerate()
        .map(|(idx, url)| format!("{}:{}", idx + 1, asset_label(url)))
        .collect::<Vec<_>>()
        .join("  ");
    frame.render_widget(
        Paragraph::new(labels)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Gallery from Jungle Jim's"),
            ),
        area,
    );
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, view: &QuestView<'_>) {
    let mut lines = vec![
        Line::from("POS integration | QR checkout | Gamified shopping experience"),
        Line::from(Span::styled(
            view.legend.clone(),
            Style::default().fg(Color::Cyan),
        )),
    ];
    if let Some(status) = &view.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Bring This Adventure to Your Store"),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::{asset_label, render_quest, screen_for, QuestView, Screen};
    use crate::catalog::CATALOG;
    use crate::fsm::QuestSession;
    use crate::types::Phase;

    fn view(session: QuestSession) -> QuestView<'static> {
        QuestView {
            session,
            catalog: &CATALOG,
            parallax_columns: 0,
            legend: "Keys: q quit".to_string(),
            status: None,
        }
    }

    #[test]
    fn each_phase_maps_to_one_screen() {
        let mut session = QuestSession::default();
        assert_eq!(screen_for(&session), Screen::RecipeGrid);
        session.phase = Phase::Questing;
        assert_eq!(screen_for(&session), Screen::Clue);
        session.phase = Phase::Checkout;
        assert_eq!(screen_for(&session), Screen::Checkout);
        session.phase = Phase::Cooking;
        assert_eq!(screen_for(&session), Screen::Cooking);
    }

    #[test]
    fn asset_label_is_last_path_segment() {
        assert_eq!(
            asset_label("https://example.com/a/b/Jungle-Jims-Logo.png"),
            "Jungle-Jims-Logo.png"
        );
        assert_eq!(asset_label("plain"), "plain");
    }

    #[test]
    fn inconsistent_session_renders_placeholder_instead_of_panicking() {
        let frame = render_quest(
            &view(QuestSession {
                phase: Phase::Cooking,
                selected_recipe: None,
                current_step: 0,
            }),
            100,
            32,
        )
        .expect("render");
        assert!(frame.contains("No recipe selected"));
    }

    #[test]
    fn parallax_shifts_hero_title() {
        let base = render_quest(&view(QuestSession::default()), 100, 32).expect("render");
        let mut shifted_view = view(QuestSession::default());
        shifted_view.parallax_columns = 3;
        let shifted = render_quest(&shifted_view, 100, 32).expect("render");

        let column = |frame: &str| {
            frame
                .lines()
                .find_map(|line| line.find("Chef Quest"))
                .expect("title present")
        };
        assert_eq!(column(&shifted), column(&base) + 3);
    }
}
