use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::entities::{EnemyType, GameOver, GameState};
use crate::world::World;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Smallest area the playfield is drawn in
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 12;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub world: &'a World,
    pub area: Rect,
    pub fps: u32,
    pub elapsed_time_secs: u64,
}

/// Maps a canvas point to a terminal cell inside `field`
pub fn to_cell(field: Rect, x: f32, y: f32) -> (u16, u16) {
    let col = (x / CANVAS_WIDTH * field.width as f32).floor().max(0.0) as u16;
    let row = (y / CANVAS_HEIGHT * field.height as f32).floor().max(0.0) as u16;
    (
        field.x + col.min(field.width.saturating_sub(1)),
        field.y + row.min(field.height.saturating_sub(1)),
    )
}

/// Writes `text` at (x, y), clipped to `clip`. Never panics on small terminals.
fn put(buffer: &mut Buffer, clip: Rect, x: i32, y: i32, text: &str, style: Style) {
    if y < clip.top() as i32 || y >= clip.bottom() as i32 {
        return;
    }
    let skip = (clip.left() as i32 - x).max(0) as usize;
    let start = x.max(clip.left() as i32);
    if start >= clip.right() as i32 {
        return;
    }
    let visible: String = text.chars().skip(skip).collect();
    let max_width = (clip.right() as i32 - start) as usize;
    buffer.set_stringn(start as u16, y as u16, visible, max_width, style);
}

/// Draws a multi-line sprite centered on a canvas point
fn draw_sprite(buffer: &mut Buffer, field: Rect, x: f32, y: f32, lines: &[&str], style: Style) {
    let (col, row) = to_cell(field, x, y);
    let width = lines.first().map_or(0, |l| l.chars().count()) as i32;
    let left = col as i32 - width / 2;
    let top = row as i32 - lines.len() as i32 / 2;
    for (i, line) in lines.iter().enumerate() {
        put(buffer, field, left, top + i as i32, line, style);
    }
}

fn enemy_color(enemy_type: EnemyType) -> Color {
    match enemy_type {
        EnemyType::AtAt => Color::Yellow,
        EnemyType::Fighter => Color::Red,
        EnemyType::Asteroid => Color::Gray,
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    /// The playfield: everything between the HUD line and the controls hint
    pub fn field_area(area: Rect) -> Rect {
        Rect {
            x: area.x,
            y: area.y + 1.min(area.height),
            width: area.width,
            height: area.height.saturating_sub(2),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let world = view.world;

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            frame.render_widget(Paragraph::new("Enlarge the terminal").red(), area);
            return;
        }

        let outer = Self::field_area(area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let field = block.inner(outer);
        frame.render_widget(block, outer);

        let buffer = frame.buffer_mut();

        for enemy in &world.enemies {
            let style = Style::default()
                .fg(enemy_color(enemy.enemy_type))
                .add_modifier(Modifier::BOLD);
            draw_sprite(
                buffer,
                field,
                enemy.x,
                enemy.y,
                enemy.enemy_type.get_sprite_lines(),
                style,
            );
        }

        draw_sprite(
            buffer,
            field,
            world.ship.x,
            world.ship.y,
            world.ship.get_sprite_lines(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );

        for shot in &world.shots {
            let (glyph, color) = if shot.from_player() {
                ("|", Color::LightCyan)
            } else {
                ("!", Color::Magenta)
            };
            let (col, row) = to_cell(field, shot.x, shot.y);
            put(
                buffer,
                field,
                col as i32,
                row as i32,
                glyph,
                Style::default().fg(color),
            );
        }

        // Stats overlay at the top
        let lives = "A ".repeat(world.ship.lives as usize);
        let stats = Line::from(vec![
            Span::styled("SCORE: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", world.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  LIVES: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                lives,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", world.enemies.len()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1.min(area.width),
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1.min(area.height),
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;
        let timer = Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:02}:{:02}", minutes, seconds),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(timer).right_aligned(), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[A/D/Arrows: Move] [Space: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: 1.min(area.height),
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Centers a `width` x `height` box inside `area`, shrinking it to fit
    fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = Self::centered_box(view.area, 30, 6);
        frame.render_widget(Clear, pause_area);
        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;
        let reason = view
            .world
            .outcome()
            .map_or("", |reason: GameOver| reason.get_message());

        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║        GAME OVER          ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(reason).centered().italic().white(),
            Line::from(""),
            Line::from(format!("Final score: {}", view.world.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Time survived: {:02}:{:02}", minutes, seconds))
                .centered()
                .cyan()
                .bold(),
            Line::from(""),
            Line::from("To play again press 'S'").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(world: &World, game_state: GameState, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let renderer = GameRenderer::new();
        terminal
            .draw(|frame| {
                let view = RenderView {
                    game_state,
                    world,
                    area: frame.area(),
                    fps: 60,
                    elapsed_time_secs: 75,
                };
                renderer.render(frame, &view);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn contents(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_to_cell_scales_and_clamps() {
        let field = Rect::new(0, 0, 120, 40);
        assert_eq!(to_cell(field, 0.0, 0.0), (0, 0));
        assert_eq!(to_cell(field, 600.0, 400.0), (60, 20));
        assert_eq!(to_cell(field, 5000.0, 5000.0), (119, 39));
        assert_eq!(to_cell(field, -10.0, -10.0), (0, 0));
    }

    #[test]
    fn test_hud_shows_score_and_time() {
        let mut world = World::with_seed(5);
        world.score = 350;
        let text = contents(&draw(&world, GameState::Playing, 120, 40));
        assert!(text.contains("SCORE: 350"));
        assert!(text.contains("01:15"));
    }

    #[test]
    fn test_game_over_screen() {
        let world = World::with_seed(5);
        let text = contents(&draw(&world, GameState::GameOver, 80, 24));
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final score: 0"));
    }

    #[test]
    fn test_paused_overlay() {
        let world = World::with_seed(5);
        let text = contents(&draw(&world, GameState::Paused, 80, 24));
        assert!(text.contains("PAUSED"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let world = World::with_seed(5);
        for state in [GameState::Playing, GameState::Paused, GameState::GameOver] {
            draw(&world, state, 3, 2);
            draw(&world, state, 1, 1);
        }
    }
}
