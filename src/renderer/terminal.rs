//! Terminal renderer
//!
//! Draws a [`FrameSnapshot`] with crossterm commands queued on any writer.
//! Frogs show as `[n]`, power-ups as `<Xn>` where `n` is the selection label.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Attribute, Color, Print},
    terminal,
};
use glam::Vec2;

use super::{Renderer, Viewport};
use crate::sim::{EndReason, FrameSnapshot, FrogKind, FrogView, PowerUpKind, PowerUpView};

const C_BORDER: Color = Color::DarkGreen;
const C_HUD: Color = Color::White;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_EFFECT: Color = Color::Cyan;
const C_DYING: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

fn frog_color(kind: FrogKind, pulse: f32) -> Color {
    match kind {
        FrogKind::Normal => Color::Green,
        FrogKind::Fast => Color::Red,
        FrogKind::Slow => Color::Blue,
        FrogKind::Golden if pulse >= 0.5 => Color::Yellow,
        FrogKind::Golden => Color::DarkYellow,
    }
}

fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::SlowMotion => Color::Cyan,
        PowerUpKind::DoublePoints => Color::Magenta,
        PowerUpKind::ExtraLife => Color::Red,
    }
}

fn label_char(label: Option<u8>) -> char {
    label
        .and_then(|n| char::from_digit(n as u32, 10))
        .unwrap_or('?')
}

fn frog_glyph(frog: &FrogView) -> String {
    if frog.death_progress <= 0.0 {
        format!("[{}]", label_char(frog.label))
    } else if frog.death_progress < 0.5 {
        "[*]".to_string()
    } else {
        " * ".to_string()
    }
}

fn power_up_glyph(power_up: &PowerUpView) -> String {
    format!("<{}{}>", power_up.kind.symbol(), label_char(power_up.label))
}

fn glyph_width(glyph: &str) -> u16 {
    glyph.chars().count() as u16
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    viewport: Viewport,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self { out, viewport }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Call on terminal resize
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport = Viewport::new(cols, rows, self.viewport.area);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Clicks anywhere on a drawn glyph land on that entity's centre, so
    /// small frogs stay hittable through their brackets. Topmost glyph wins:
    /// power-ups over frogs, later over earlier.
    pub fn snap_click(&self, point: Vec2, frame: &FrameSnapshot) -> Vec2 {
        let (col, row) = self.viewport.area_to_cell(point);
        let covers = |pos: Vec2, glyph: &str| {
            let width = glyph_width(glyph);
            let (x, r) = self.viewport.glyph_origin(pos, width);
            r == row && (x..x + width).contains(&col)
        };
        frame
            .power_ups
            .iter()
            .rev()
            .find(|p| covers(p.pos, &power_up_glyph(p)))
            .map(|p| p.pos)
            .or_else(|| {
                frame
                    .frogs
                    .iter()
                    .rev()
                    .find(|f| covers(f.pos, &frog_glyph(f)))
                    .map(|f| f.pos)
            })
            .unwrap_or(point)
    }

    fn draw_border(&mut self) -> std::io::Result<()> {
        let vp = self.viewport;
        let w = vp.cols.saturating_sub(2) as usize;
        let top = vp.top_border_row();
        let bottom = vp.bottom_border_row();

        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(cursor::MoveTo(0, top))?;
        self.out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;
        self.out.queue(cursor::MoveTo(0, bottom))?;
        self.out.queue(Print(format!("└{}┘", "─".repeat(w))))?;
        for row in top + 1..bottom {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(vp.cols.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    fn draw_hud(&mut self, frame: &FrameSnapshot) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(format!(
            "Score:{:>6}  Hi:{:>6}",
            frame.score, frame.high_score
        )))?;

        self.out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
        self.out
            .queue(Print(format!("  Lives:{}", frame.lives.max(0))))?;

        self.out.queue(style::SetForegroundColor(C_HUD))?;
        self.out.queue(Print(format!(
            "  Time:{:>3}s  Wave:{} (x{:.1})",
            frame.time_remaining.ceil() as i32,
            frame.wave,
            frame.multiplier
        )))?;

        let mut effects = String::new();
        if frame.double_points_remaining > 0.0 {
            effects.push_str(&format!("  [2X {:.1}s]", frame.double_points_remaining));
        }
        if frame.slow_motion_remaining > 0.0 {
            effects.push_str(&format!("  [SLOW {:.1}s]", frame.slow_motion_remaining));
        }
        if !effects.is_empty() {
            self.out.queue(style::SetForegroundColor(C_EFFECT))?;
            self.out.queue(Print(effects))?;
        }
        Ok(())
    }

    /// Print `text` centred on the cell holding `pos`
    fn draw_at(&mut self, pos: Vec2, text: &str) -> std::io::Result<()> {
        let (x, row) = self.viewport.glyph_origin(pos, glyph_width(text));
        self.out.queue(cursor::MoveTo(x, row))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn draw_frog(&mut self, frog: &FrogView) -> std::io::Result<()> {
        let color = if frog.death_progress > 0.0 {
            C_DYING
        } else {
            frog_color(frog.kind, frog.pulse)
        };
        self.out.queue(style::SetForegroundColor(color))?;
        self.draw_at(frog.pos, &frog_glyph(frog))
    }

    fn draw_power_up(&mut self, power_up: &PowerUpView) -> std::io::Result<()> {
        self.out
            .queue(style::SetForegroundColor(power_up_color(power_up.kind)))?;
        self.draw_at(power_up.pos, &power_up_glyph(power_up))
    }

    fn draw_banner(&mut self, lines: &[String]) -> std::io::Result<()> {
        let vp = self.viewport;
        let (_, inner_h) = vp.inner();
        let start = (vp.top_border_row() + 1 + inner_h / 2)
            .saturating_sub(lines.len() as u16 / 2);
        self.out.queue(style::SetAttribute(Attribute::Bold))?;
        for (i, line) in lines.iter().enumerate() {
            let x = (vp.cols / 2).saturating_sub(line.chars().count() as u16 / 2);
            self.out.queue(cursor::MoveTo(x, start + i as u16))?;
            self.out.queue(Print(line))?;
        }
        self.out.queue(style::SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn draw_overlay(&mut self, frame: &FrameSnapshot) -> std::io::Result<()> {
        let lines = match frame.end_reason {
            None => vec![
                "KILL THE FROG".to_string(),
                String::new(),
                "Press S or Enter to start".to_string(),
            ],
            Some(reason) => {
                let why = match reason {
                    EndReason::OutOfLives => "Out of lives",
                    EndReason::OutOfTime => "Time's up",
                };
                let mut lines = vec![
                    "GAME OVER".to_string(),
                    why.to_string(),
                    format!("Final score: {}", frame.score),
                ];
                if frame.new_high_score {
                    lines.push("NEW HIGH SCORE!".to_string());
                } else {
                    lines.push(format!("High Score: {}", frame.high_score));
                }
                lines.push(String::new());
                lines.push("Press S or Enter to play again".to_string());
                lines
            }
        };
        self.out.queue(style::SetForegroundColor(Color::Yellow))?;
        self.draw_banner(&lines)
    }

    fn draw_hint(&mut self) -> std::io::Result<()> {
        let row = self.viewport.bottom_border_row() + 1;
        self.out.queue(cursor::MoveTo(1, row))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out
            .queue(Print("click or press 1-9 to hit | S start | Q quit"))?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &FrameSnapshot) -> std::io::Result<()> {
        self.viewport.area = frame.area;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_border()?;
        self.draw_hud(frame)?;
        // Frogs first so power-ups win overlapping cells, matching hit order
        for frog in &frame.frogs {
            self.draw_frog(frog)?;
        }
        for power_up in &frame.power_ups {
            self.draw_power_up(power_up)?;
        }
        if !frame.is_playing {
            self.draw_overlay(frame)?;
        }
        self.draw_hint()?;

        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.viewport.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
