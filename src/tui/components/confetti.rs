//! # Confetti Overlay
//!
//! Draws a `Burst` as falling glyphs over the whole frame. Particles are
//! launched from just below the centre of the screen inside an upward cone of
//! `spread` degrees, then fall under gravity until they leave the frame or
//! their lifetime runs out.
//!
//! Randomness is injected so tests can use a seeded generator.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use rand::Rng;

use crate::services::{Burst, Rgb};
use crate::tui::component::Component;

const GLYPHS: [char; 5] = ['*', '•', '▪', '✦', '+'];
/// Cells per second squared.
const GRAVITY: f32 = 28.0;
/// Terminal cells are about twice as tall as wide.
const ASPECT: f32 = 0.5;

#[derive(Debug, Clone)]
struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    ttl: f32,
    glyph: char,
    color: Color,
}

#[derive(Debug, Default)]
pub struct ConfettiState {
    particles: Vec<Particle>,
}

impl ConfettiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Launch `burst` into a frame of size `area`.
    pub fn launch<R: Rng + ?Sized>(&mut self, burst: &Burst, area: Rect, rng: &mut R) {
        if burst.colors.is_empty() || area.is_empty() {
            return;
        }
        let origin_x = area.width as f32 / 2.0;
        let origin_y = area.height as f32 * 0.6;
        let half_spread = (burst.spread as f32 / 2.0).to_radians();

        for _ in 0..burst.particle_count {
            let angle = std::f32::consts::FRAC_PI_2 + rng.random_range(-half_spread..=half_spread);
            let speed: f32 = rng.random_range(18.0..40.0);
            let Rgb(r, g, b) = burst.colors[rng.random_range(0..burst.colors.len())];
            self.particles.push(Particle {
                x: origin_x,
                y: origin_y,
                vx: angle.cos() * speed,
                vy: -angle.sin() * speed * ASPECT,
                ttl: rng.random_range(1.2..2.4),
                glyph: GLYPHS[rng.random_range(0..GLYPHS.len())],
                color: Color::Rgb(r, g, b),
            });
        }
    }

    /// Advance the simulation by `dt` seconds, dropping spent particles.
    pub fn tick(&mut self, dt: f32, area: Rect) {
        let (width, height) = (area.width as f32, area.height as f32);
        for p in &mut self.particles {
            p.vy += GRAVITY * ASPECT * dt;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.ttl -= dt;
        }
        self.particles
            .retain(|p| p.ttl > 0.0 && p.y < height && p.x >= 0.0 && p.x < width);
    }
}

pub struct Confetti<'a> {
    state: &'a ConfettiState,
}

impl<'a> Confetti<'a> {
    pub fn new(state: &'a ConfettiState) -> Self {
        Self { state }
    }
}

impl Component for Confetti<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let buffer = frame.buffer_mut();
        for p in &self.state.particles {
            if p.x < 0.0 || p.y < 0.0 {
                continue;
            }
            let (x, y) = (area.x + p.x as u16, area.y + p.y as u16);
            if x >= area.right() || y >= area.bottom() {
                continue;
            }
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_char(p.glyph).set_style(Style::default().fg(p.color));
            }
        }
    }
}
