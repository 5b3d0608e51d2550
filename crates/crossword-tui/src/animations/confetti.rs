use crossterm::style::Color;
use rand::Rng;

/// Confetti characters
pub const CONFETTI_CHARS: &[char] = &['*', '✦', '✧', '◆', '◇', '○', '●', '■', '□', '▲', '▽'];

/// A single particle in the celebration
#[derive(Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub char: char,
    pub color: Color,
    pub lifetime: f32,
}

impl Particle {
    pub fn is_visible(&self, width: u16, height: u16) -> bool {
        self.x >= 0.0
            && self.x < width as f32
            && self.y >= 0.0
            && self.y < height as f32
            && self.lifetime > 0.0
    }
}

/// Generate a random bright color
pub fn random_bright_color() -> Color {
    let mut rng = rand::thread_rng();
    match rng.gen_range(0..7) {
        0 => Color::Red,
        1 => Color::Green,
        2 => Color::Yellow,
        3 => Color::Blue,
        4 => Color::Magenta,
        5 => Color::Cyan,
        _ => Color::White,
    }
}

/// Confetti falling from the top edge, refilled while the screen is shown
pub struct Confetti {
    particles: Vec<Particle>,
    width: u16,
    height: u16,
    pub frame: u32,
}

impl Default for Confetti {
    fn default() -> Self {
        Self::new()
    }
}

impl Confetti {
    const MAX_PARTICLES: usize = 120;

    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            width: 80,
            height: 24,
            frame: 0,
        }
    }

    pub fn reset(&mut self) {
        self.particles.clear();
        self.frame = 0;
    }

    pub fn set_bounds(&mut self, width: u16, height: u16) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn spawn(&mut self) {
        let mut rng = rand::thread_rng();
        self.particles.push(Particle {
            x: rng.gen_range(0.0..self.width as f32),
            y: 0.0,
            vx: rng.gen_range(-0.4..0.4),
            vy: rng.gen_range(0.2..0.8),
            char: CONFETTI_CHARS[rng.gen_range(0..CONFETTI_CHARS.len())],
            color: random_bright_color(),
            lifetime: rng.gen_range(40.0..120.0),
        });
    }

    pub fn update(&mut self) {
        self.frame = self.frame.wrapping_add(1);

        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vy = (p.vy + 0.02).min(1.2);
            p.lifetime -= 1.0;
        }

        let (width, height) = (self.width, self.height);
        self.particles.retain(|p| p.is_visible(width, height));

        let burst = if self.frame < 10 { 12 } else { 2 };
        for _ in 0..burst {
            if self.particles.len() >= Self::MAX_PARTICLES {
                break;
            }
            self.spawn();
        }
    }
}
