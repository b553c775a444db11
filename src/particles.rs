//! Particle field engine behind the animated section backgrounds.
//!
//! A [`ParticleField`] owns a set of drifting points on a surface of a given size.
//! Every frame the field advances positions by velocity, applies its
//! [`BoundaryPolicy`], pushes particles away from the pointer when a
//! [`Repulsion`] is configured, and can join nearby pairs with faint lines.
//! Drawing goes through the [`Surface`] trait so the same field renders into an
//! egui painter or an offscreen pixmap.

use crate::constants;
use egui::{Color32, Pos2, Vec2};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// What happens to a particle that crosses an edge of its surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Leaving through one edge re-enters at the opposite edge
    Wrap,
    /// The velocity component pointing out of the surface is inverted
    Reflect,
}

/// How the repulsion impulse scales with pointer distance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Falloff {
    /// Same impulse everywhere inside the radius
    Constant,
    /// Impulse proportional to `1 - distance / radius`
    Linear,
}

/// Pointer repulsion settings.
///
/// The impulse is added to velocity every frame the particle is inside the
/// radius. Nothing decays it again unless [`FieldConfig::damping`] is below 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Repulsion {
    /// Distance from the pointer inside which particles are pushed
    pub radius: f32,
    /// Impulse magnitude (peak magnitude for [`Falloff::Linear`])
    pub strength: f32,
    pub falloff: Falloff,
}

impl Repulsion {
    /// Returns the impulse magnitude for a particle `distance` away from the pointer.
    ///
    /// Zero at and beyond the radius.
    pub fn force_at(&self, distance: f32) -> f32 {
        if distance >= self.radius {
            return 0.0;
        }
        match self.falloff {
            Falloff::Constant => self.strength,
            Falloff::Linear => self.strength * (1.0 - distance / self.radius),
        }
    }
}

/// Where particle colors come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Palette {
    /// Random hue in `[hue_min, hue_max)` degrees at fixed saturation and lightness (0..=1)
    Hsl {
        hue_min: f32,
        hue_max: f32,
        saturation: f32,
        lightness: f32,
    },
    /// Every channel drawn uniformly at random
    RandomRgb,
    /// Uniform pick from a fixed list of colors
    Fixed(Vec<[u8; 3]>),
}

impl Palette {
    fn pick(&self, rng: &mut SmallRng) -> Color32 {
        match self {
            Palette::Hsl {
                hue_min,
                hue_max,
                saturation,
                lightness,
            } => {
                let hue = sample(rng, (*hue_min, *hue_max));
                let [r, g, b] = hsl_to_rgb(hue, *saturation, *lightness);
                Color32::from_rgb(r, g, b)
            }
            Palette::RandomRgb => Color32::from_rgb(rng.gen(), rng.gen(), rng.gen()),
            Palette::Fixed(colors) => {
                if colors.is_empty() {
                    return Color32::WHITE;
                }
                let [r, g, b] = colors[rng.gen_range(0..colors.len())];
                Color32::from_rgb(r, g, b)
            }
        }
    }
}

/// Appearance of the lines drawn between nearby particles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConnectionStyle {
    /// Pairs closer than this are connected
    pub threshold: f32,
    /// Line opacity of a pair at distance zero
    pub max_alpha: f32,
    /// Stroke width in pixels
    pub width: f32,
    pub color: [u8; 3],
}

/// Full configuration of one particle field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldConfig {
    /// Number of particles created on mount (ignored for labelled fields)
    pub particle_count: usize,
    /// Width of the symmetric range each velocity component is drawn from
    pub speed: f32,
    /// Radius range `(min, max)`; for labelled particles this is the font size
    pub radius: (f32, f32),
    /// Opacity range `(min, max)`
    pub alpha: (f32, f32),
    pub palette: Palette,
    pub boundary: BoundaryPolicy,
    pub repulsion: Option<Repulsion>,
    /// Velocity multiplier applied after repulsion every frame; 1.0 disables damping
    pub damping: f32,
    pub connections: Option<ConnectionStyle>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            speed: 0.5,
            radius: (0.5, 2.5),
            alpha: (0.5, 0.5),
            palette: Palette::RandomRgb,
            boundary: BoundaryPolicy::Reflect,
            repulsion: None,
            damping: 1.0,
            connections: None,
        }
    }
}

fn blue_hues(saturation: f32, lightness: f32) -> Palette {
    Palette::Hsl {
        hue_min: 200.0,
        hue_max: 260.0,
        saturation,
        lightness,
    }
}

impl FieldConfig {
    /// Hero background: reflecting, pointer-reactive, connected.
    pub fn hero() -> Self {
        Self {
            particle_count: constants::HERO_PARTICLE_COUNT,
            speed: 0.3,
            radius: (0.5, 2.5),
            alpha: (0.3, 0.8),
            palette: blue_hues(1.0, 0.7),
            boundary: BoundaryPolicy::Reflect,
            repulsion: Some(Repulsion {
                radius: constants::REPULSION_RADIUS,
                strength: constants::HERO_REPULSION_STRENGTH,
                falloff: Falloff::Constant,
            }),
            damping: 1.0,
            connections: Some(ConnectionStyle {
                threshold: constants::CONNECTION_THRESHOLD,
                max_alpha: constants::CONNECTION_MAX_ALPHA,
                width: constants::CONNECTION_WIDTH,
                color: [255, 255, 255],
            }),
        }
    }

    /// About background: floating skill labels pushed around by the pointer.
    pub fn about() -> Self {
        Self {
            particle_count: 0,
            speed: 0.5,
            radius: (10.0, 25.0),
            alpha: (0.7, 0.7),
            palette: blue_hues(0.7, 0.6),
            boundary: BoundaryPolicy::Reflect,
            repulsion: Some(Repulsion {
                radius: constants::REPULSION_RADIUS,
                strength: constants::ABOUT_REPULSION_STRENGTH,
                falloff: Falloff::Linear,
            }),
            damping: 1.0,
            connections: None,
        }
    }

    /// Services background: wrapping drift with connective lines, no pointer reaction.
    pub fn services() -> Self {
        Self {
            particle_count: constants::SERVICES_PARTICLE_COUNT,
            speed: 0.3,
            radius: (0.1, 2.1),
            alpha: (0.1, 0.5),
            palette: blue_hues(0.7, 0.6),
            boundary: BoundaryPolicy::Wrap,
            repulsion: None,
            damping: 1.0,
            connections: Some(ConnectionStyle {
                threshold: constants::CONNECTION_THRESHOLD,
                max_alpha: constants::CONNECTION_MAX_ALPHA,
                width: constants::CONNECTION_WIDTH,
                color: [139, 92, 246],
            }),
        }
    }

    /// Gallery background: multicolored reflecting dust.
    pub fn case_studies() -> Self {
        Self {
            particle_count: constants::CASE_STUDIES_PARTICLE_COUNT,
            speed: 0.5,
            radius: (0.5, 2.5),
            alpha: (0.5, 0.5),
            palette: Palette::RandomRgb,
            boundary: BoundaryPolicy::Reflect,
            repulsion: None,
            damping: 1.0,
            connections: None,
        }
    }
}

/// A single animated point.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Pos2,
    pub velocity: Vec2,
    /// Disc radius, or font size for labelled particles
    pub radius: f32,
    /// Opaque base color
    pub color: Color32,
    /// Opacity in `[0, 1]`
    pub alpha: f32,
    /// Text drawn instead of a disc
    pub label: Option<String>,
}

impl Particle {
    /// The base color with the particle's opacity applied.
    pub fn draw_color(&self) -> Color32 {
        with_alpha(self.color, self.alpha)
    }

    /// Space the particle covers right of and above its position.
    ///
    /// Labels are anchored at their bottom-left corner; discs have no extent.
    pub fn extent(&self) -> Vec2 {
        match &self.label {
            Some(label) => Vec2::new(
                self.radius * constants::LABEL_CHAR_WIDTH * label.chars().count() as f32,
                self.radius,
            ),
            None => Vec2::ZERO,
        }
    }
}

/// A line between two particles closer than the connection threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleLink {
    /// Index of the first particle
    pub a: usize,
    /// Index of the second particle (`b > a`)
    pub b: usize,
    /// Line opacity, higher for closer pairs
    pub alpha: f32,
}

/// Drawing target of a particle field.
///
/// Positions are in surface-local coordinates with the origin at the top-left corner.
pub trait Surface {
    /// Erases everything drawn for the previous frame.
    fn clear(&mut self);
    /// Draws a filled disc.
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);
    /// Draws a straight line segment.
    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);
    /// Draws text with its baseline starting at `anchor`.
    fn text(&mut self, anchor: Pos2, size: f32, text: &str, color: Color32);
}

/// A set of particles bound to a surface size.
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    labels: Vec<String>,
    size: Vec2,
    rng: SmallRng,
    frames: u64,
}

impl ParticleField {
    /// Creates `config.particle_count` particles spread uniformly over a surface of `size`.
    ///
    /// # Arguments
    ///
    /// * `config` - Particle appearance and physics
    /// * `size` - Width and height of the surface in pixels
    /// * `seed` - Fixed seed for reproducible fields; `None` seeds from the OS
    pub fn new(config: FieldConfig, size: Vec2, seed: Option<u64>) -> Self {
        Self::build(config, size, Vec::new(), seed)
    }

    /// Creates one text particle per label. The configured particle count is ignored.
    pub fn with_labels(config: FieldConfig, size: Vec2, labels: &[String], seed: Option<u64>) -> Self {
        Self::build(config, size, labels.to_vec(), seed)
    }

    fn build(config: FieldConfig, size: Vec2, labels: Vec<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut field = Self {
            config,
            particles: Vec::new(),
            labels,
            size: size.max(Vec2::ZERO),
            rng,
            frames: 0,
        };
        field.populate();
        field
    }

    fn populate(&mut self) {
        let count = if self.labels.is_empty() {
            self.config.particle_count
        } else {
            self.labels.len()
        };
        let mut particles = Vec::with_capacity(count);
        for i in 0..count {
            let label = self.labels.get(i).cloned();
            particles.push(self.spawn(label));
        }
        self.particles = particles;
    }

    fn spawn(&mut self, label: Option<String>) -> Particle {
        let rng = &mut self.rng;
        let velocity = Vec2::new(
            (rng.gen::<f32>() - 0.5) * self.config.speed,
            (rng.gen::<f32>() - 0.5) * self.config.speed,
        );
        let radius = sample(rng, self.config.radius);
        let alpha = sample(rng, self.config.alpha).clamp(0.0, 1.0);
        let color = self.config.palette.pick(rng);
        let mut particle = Particle {
            position: Pos2::ZERO,
            velocity,
            radius,
            color,
            alpha,
            label,
        };

        // Labels start fully inside the surface when they fit
        let extent = particle.extent();
        let free = (self.size - extent).max(Vec2::ZERO);
        particle.position = Pos2::new(
            rng.gen::<f32>() * free.x,
            extent.y.min(self.size.y) + rng.gen::<f32>() * free.y,
        );
        particle
    }

    /// Builds a fresh field with the same configuration and labels for a new surface size.
    ///
    /// The replacement is seeded from this field's generator so seeded fields stay reproducible.
    pub fn regenerated(&mut self, size: Vec2) -> Self {
        let seed = self.rng.gen::<u64>();
        Self::build(self.config.clone(), size, self.labels.clone(), Some(seed))
    }

    /// Changes the surface size while keeping every particle.
    ///
    /// Particles left outside the new bounds are brought back by the boundary policy.
    pub fn resize_in_place(&mut self, size: Vec2) {
        self.size = size.max(Vec2::ZERO);
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the particles, e.g. to place them deliberately.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Number of [`step`](Self::step) calls since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advances the simulation by one frame.
    ///
    /// For each particle: move by velocity, apply the boundary policy, then add the
    /// pointer repulsion impulse and damping to the velocity.
    ///
    /// # Arguments
    ///
    /// * `pointer` - Pointer position in surface coordinates, `None` when the pointer is elsewhere
    pub fn step(&mut self, pointer: Option<Pos2>) {
        let size = self.size;
        let boundary = self.config.boundary;
        let repulsion = self.config.repulsion;
        let damping = self.config.damping;

        for particle in &mut self.particles {
            particle.position += particle.velocity;
            apply_boundary(particle, size, boundary);
            if let (Some(pointer), Some(repulsion)) = (pointer, repulsion) {
                apply_repulsion(particle, pointer, &repulsion);
            }
            particle.velocity *= damping;
        }
        self.frames += 1;
    }

    /// Lists every unordered pair closer than the connection threshold.
    ///
    /// Empty when connections are disabled. Quadratic in the particle count.
    pub fn connections(&self) -> Vec<ParticleLink> {
        let Some(style) = self.config.connections else {
            return Vec::new();
        };
        let mut links = Vec::new();
        for a in 0..self.particles.len() {
            for b in (a + 1)..self.particles.len() {
                let distance = self.particles[a].position.distance(self.particles[b].position);
                if distance < style.threshold {
                    links.push(ParticleLink {
                        a,
                        b,
                        alpha: style.max_alpha * (1.0 - distance / style.threshold),
                    });
                }
            }
        }
        links
    }

    /// Draws the current frame: clear, every particle, then the connective lines.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();

        for particle in &self.particles {
            let color = particle.draw_color();
            match &particle.label {
                Some(label) => surface.text(particle.position, particle.radius, label, color),
                None => surface.fill_circle(particle.position, particle.radius, color),
            }
        }

        if let Some(style) = self.config.connections {
            let [r, g, b] = style.color;
            let base = Color32::from_rgb(r, g, b);
            for link in self.connections() {
                surface.line(
                    self.particles[link.a].position,
                    self.particles[link.b].position,
                    style.width,
                    with_alpha(base, link.alpha),
                );
            }
        }
    }
}

fn apply_boundary(particle: &mut Particle, size: Vec2, policy: BoundaryPolicy) {
    match policy {
        BoundaryPolicy::Wrap => {
            if particle.position.x > size.x {
                particle.position.x = 0.0;
            } else if particle.position.x < 0.0 {
                particle.position.x = size.x;
            }
            if particle.position.y > size.y {
                particle.position.y = 0.0;
            } else if particle.position.y < 0.0 {
                particle.position.y = size.y;
            }
        }
        BoundaryPolicy::Reflect => {
            // The particle's extent narrows the bounds of its anchor point.
            let extent = particle.extent();
            let max_x = (size.x - extent.x).max(0.0);
            let min_y = extent.y.min(size.y);

            // Only flip while heading outward so an overshooting particle cannot oscillate outside.
            let p = particle.position;
            let v = &mut particle.velocity;
            if (p.x < 0.0 && v.x < 0.0) || (p.x > max_x && v.x > 0.0) {
                v.x = -v.x;
            }
            if (p.y < min_y && v.y < 0.0) || (p.y > size.y && v.y > 0.0) {
                v.y = -v.y;
            }
        }
    }
}

fn apply_repulsion(particle: &mut Particle, pointer: Pos2, repulsion: &Repulsion) {
    let away = particle.position - pointer;
    let distance = away.length();
    let force = repulsion.force_at(distance);
    if force <= 0.0 {
        return;
    }
    // A particle exactly under the pointer is pushed along -x.
    let direction = if distance > 0.0 {
        away / distance
    } else {
        Vec2::new(-1.0, 0.0)
    };
    particle.velocity += direction * force;
}

fn sample(rng: &mut SmallRng, (min, max): (f32, f32)) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), a)
}

/// Converts an HSL color (hue in degrees, saturation and lightness in `0..=1`) to RGB.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [u8; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let to_u8 = |c: f32| ((c + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    [to_u8(r), to_u8(g), to_u8(b)]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records draw calls instead of rasterizing them.
    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        circles: Vec<(Pos2, f32)>,
        lines: Vec<(Pos2, Pos2, Color32)>,
        texts: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.clears += 1;
            self.circles.clear();
            self.lines.clear();
            self.texts.clear();
        }

        fn fill_circle(&mut self, center: Pos2, radius: f32, _color: Color32) {
            self.circles.push((center, radius));
        }

        fn line(&mut self, from: Pos2, to: Pos2, _width: f32, color: Color32) {
            self.lines.push((from, to, color));
        }

        fn text(&mut self, _anchor: Pos2, _size: f32, text: &str, _color: Color32) {
            self.texts.push(text.to_string());
        }
    }

    fn still_field(config: FieldConfig, size: Vec2) -> ParticleField {
        let mut field = ParticleField::new(config, size, Some(7));
        for p in field.particles_mut() {
            p.velocity = Vec2::ZERO;
        }
        field
    }

    #[test]
    fn test_initial_particles_are_inside_surface() {
        let size = Vec2::new(640.0, 360.0);
        let field = ParticleField::new(FieldConfig::hero(), size, Some(1));

        assert_eq!(field.particles().len(), constants::HERO_PARTICLE_COUNT);
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x < size.x);
            assert!(p.position.y >= 0.0 && p.position.y < size.y);
            assert!(p.velocity.x.abs() <= 0.15 && p.velocity.y.abs() <= 0.15);
            assert!(p.radius >= 0.5 && p.radius <= 2.5);
            assert!((0.0..=1.0).contains(&p.alpha));
        }
    }

    #[test]
    fn test_same_seed_gives_same_field() {
        let size = Vec2::new(300.0, 200.0);
        let a = ParticleField::new(FieldConfig::case_studies(), size, Some(42));
        let b = ParticleField::new(FieldConfig::case_studies(), size, Some(42));

        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_wrap_keeps_particles_inside_bounds() {
        let size = Vec2::new(200.0, 100.0);
        let config = FieldConfig {
            speed: 40.0,
            boundary: BoundaryPolicy::Wrap,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::new(config, size, Some(3));

        for _ in 0..500 {
            field.step(None);
            for p in field.particles() {
                assert!(p.position.x >= 0.0 && p.position.x <= size.x);
                assert!(p.position.y >= 0.0 && p.position.y <= size.y);
            }
        }
    }

    #[test]
    fn test_wrap_moves_particle_to_opposite_edge() {
        let config = FieldConfig {
            particle_count: 1,
            boundary: BoundaryPolicy::Wrap,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::new(config, Vec2::new(100.0, 100.0), Some(1));
        field.particles_mut()[0].position = Pos2::new(99.5, 50.0);
        field.particles_mut()[0].velocity = Vec2::new(1.0, 0.0);

        field.step(None);

        assert_eq!(field.particles()[0].position.x, 0.0);
        assert_eq!(field.particles()[0].velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_reflect_flips_velocity_exactly_when_crossing() {
        let size = Vec2::new(100.0, 100.0);
        let config = FieldConfig {
            particle_count: 1,
            boundary: BoundaryPolicy::Reflect,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::new(config, size, Some(1));
        field.particles_mut()[0].position = Pos2::new(99.0, 0.5);
        field.particles_mut()[0].velocity = Vec2::new(0.6, 0.2);

        // Still inside after one step: nothing flips.
        field.step(None);
        assert_eq!(field.particles()[0].velocity, Vec2::new(0.6, 0.2));

        // Crosses the right edge: only the x component flips.
        field.step(None);
        let p = &field.particles()[0];
        assert!(p.position.x > size.x);
        assert_eq!(p.velocity, Vec2::new(-0.6, 0.2));

        // Heading back in: no second flip while still outside.
        field.step(None);
        assert_eq!(field.particles()[0].velocity, Vec2::new(-0.6, 0.2));
    }

    #[test]
    fn test_reflect_overshoot_is_bounded_by_one_step() {
        let size = Vec2::new(150.0, 80.0);
        let config = FieldConfig {
            speed: 6.0,
            boundary: BoundaryPolicy::Reflect,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::new(config, size, Some(11));

        for _ in 0..1000 {
            field.step(None);
            for p in field.particles() {
                let slack = p.velocity.abs();
                assert!(p.position.x >= -slack.x && p.position.x <= size.x + slack.x);
                assert!(p.position.y >= -slack.y && p.position.y <= size.y + slack.y);
            }
        }
    }

    #[test]
    fn test_distant_pointer_leaves_velocities_unchanged() {
        let size = Vec2::new(400.0, 300.0);
        let mut with_pointer = ParticleField::new(FieldConfig::hero(), size, Some(5));
        let mut without_pointer = ParticleField::new(FieldConfig::hero(), size, Some(5));

        with_pointer.step(Some(Pos2::new(5000.0, 5000.0)));
        without_pointer.step(None);

        assert_eq!(with_pointer.particles(), without_pointer.particles());
    }

    #[test]
    fn test_repulsion_pushes_away_from_pointer() {
        let config = FieldConfig {
            particle_count: 1,
            repulsion: Some(Repulsion {
                radius: 150.0,
                strength: 0.1,
                falloff: Falloff::Constant,
            }),
            ..FieldConfig::default()
        };
        let mut field = ParticleField::new(config, Vec2::new(500.0, 500.0), Some(2));
        field.particles_mut()[0].position = Pos2::new(250.0, 250.0);
        field.particles_mut()[0].velocity = Vec2::ZERO;

        field.step(Some(Pos2::new(200.0, 250.0)));

        let v = field.particles()[0].velocity;
        assert!((v.x - 0.1).abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_repulsion_accumulates_without_damping() {
        let config = FieldConfig {
            particle_count: 1,
            boundary: BoundaryPolicy::Wrap,
            repulsion: Some(Repulsion {
                radius: 1000.0,
                strength: 0.1,
                falloff: Falloff::Constant,
            }),
            ..FieldConfig::default()
        };
        let mut field = ParticleField::new(config, Vec2::new(100.0, 100.0), Some(2));
        field.particles_mut()[0].velocity = Vec2::ZERO;

        for _ in 0..50 {
            field.step(Some(Pos2::new(-500.0, 50.0)));
        }

        assert!(field.particles()[0].velocity.length() > 4.9);
    }

    #[test]
    fn test_damping_bounds_speed() {
        let config = FieldConfig {
            particle_count: 1,
            boundary: BoundaryPolicy::Wrap,
            damping: 0.9,
            repulsion: Some(Repulsion {
                radius: 1000.0,
                strength: 0.1,
                falloff: Falloff::Constant,
            }),
            ..FieldConfig::default()
        };
        let mut field = ParticleField::new(config, Vec2::new(100.0, 100.0), Some(2));
        field.particles_mut()[0].velocity = Vec2::ZERO;

        for _ in 0..500 {
            field.step(Some(Pos2::new(-500.0, 50.0)));
        }

        // Geometric series limit 0.1 * 0.9 / (1 - 0.9) = 0.9
        assert!(field.particles()[0].velocity.length() <= 0.91);
    }

    #[test]
    fn test_linear_falloff_scales_with_distance() {
        let repulsion = Repulsion {
            radius: 150.0,
            strength: 0.5,
            falloff: Falloff::Linear,
        };

        assert!((repulsion.force_at(0.0) - 0.5).abs() < 1e-6);
        assert!((repulsion.force_at(75.0) - 0.25).abs() < 1e-6);
        assert_eq!(repulsion.force_at(150.0), 0.0);
        assert_eq!(repulsion.force_at(400.0), 0.0);
    }

    #[test]
    fn test_connections_fade_with_distance() {
        let mut field = still_field(
            FieldConfig {
                particle_count: 3,
                ..FieldConfig::hero()
            },
            Vec2::new(1000.0, 1000.0),
        );
        field.particles_mut()[0].position = Pos2::new(0.0, 0.0);
        field.particles_mut()[1].position = Pos2::new(50.0, 0.0);
        field.particles_mut()[2].position = Pos2::new(500.0, 500.0);

        let links = field.connections();

        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert!((links[0].alpha - constants::CONNECTION_MAX_ALPHA * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_connections_disabled_without_style() {
        let field = ParticleField::new(FieldConfig::case_studies(), Vec2::new(10.0, 10.0), Some(4));

        assert!(field.connections().is_empty());
    }

    #[test]
    fn test_render_clears_then_draws_particles_and_lines() {
        let mut field = still_field(
            FieldConfig {
                particle_count: 2,
                ..FieldConfig::hero()
            },
            Vec2::new(300.0, 300.0),
        );
        field.particles_mut()[0].position = Pos2::new(10.0, 10.0);
        field.particles_mut()[1].position = Pos2::new(20.0, 10.0);
        let mut surface = RecordingSurface::default();

        field.render(&mut surface);
        field.render(&mut surface);

        assert_eq!(surface.clears, 2);
        assert_eq!(surface.circles.len(), 2);
        assert_eq!(surface.lines.len(), 1);
    }

    #[test]
    fn test_labelled_field_draws_text() {
        let labels = vec!["Rust".to_string(), "WebGL".to_string()];
        let field = ParticleField::with_labels(FieldConfig::about(), Vec2::new(800.0, 600.0), &labels, Some(9));
        let mut surface = RecordingSurface::default();

        field.render(&mut surface);

        assert_eq!(field.particles().len(), 2);
        assert_eq!(surface.texts, labels);
        assert!(surface.circles.is_empty());
    }

    #[test]
    fn test_labels_spawn_inside_surface() {
        let labels: Vec<String> = ["Design Systems", "UX", "Rust"].iter().map(|l| l.to_string()).collect();
        let size = Vec2::new(600.0, 400.0);
        let field = ParticleField::with_labels(FieldConfig::about(), size, &labels, Some(21));

        for p in field.particles() {
            let extent = p.extent();
            assert!(extent.x > 0.0 && extent.y == p.radius);
            assert!(p.position.x >= 0.0 && p.position.x + extent.x <= size.x);
            assert!(p.position.y >= extent.y && p.position.y <= size.y);
        }
    }

    #[test]
    fn test_labels_reflect_at_their_own_edges() {
        let labels = vec!["Design Systems".to_string()];
        let config = FieldConfig {
            repulsion: None,
            ..FieldConfig::about()
        };
        let size = Vec2::new(400.0, 300.0);
        let mut field = ParticleField::with_labels(config, size, &labels, Some(3));
        let extent = field.particles()[0].extent();
        field.particles_mut()[0].position = Pos2::new(size.x - extent.x - 0.5, extent.y + 0.5);
        field.particles_mut()[0].velocity = Vec2::new(1.0, -1.0);

        // The label's right end crosses the right edge and its top crosses the top edge.
        field.step(None);

        let p = &field.particles()[0];
        assert!(p.position.x < size.x && p.position.y > 0.0);
        assert_eq!(p.velocity, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_regenerated_keeps_config_and_labels() {
        let labels = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let mut field = ParticleField::with_labels(FieldConfig::about(), Vec2::new(100.0, 100.0), &labels, Some(1));
        field.step(None);

        let resized = field.regenerated(Vec2::new(50.0, 40.0));

        assert_eq!(resized.size(), Vec2::new(50.0, 40.0));
        assert_eq!(resized.frames(), 0);
        assert_eq!(resized.config(), field.config());
        assert_eq!(resized.particles().len(), 3);
        for p in resized.particles() {
            assert!(p.position.x < 50.0 && p.position.y < 40.0);
        }
    }

    #[test]
    fn test_resize_in_place_keeps_particles() {
        let mut field = ParticleField::new(FieldConfig::case_studies(), Vec2::new(300.0, 600.0), Some(8));
        field.step(None);
        let before = field.particles().to_vec();

        field.resize_in_place(Vec2::new(300.0, 200.0));

        assert_eq!(field.size(), Vec2::new(300.0, 200.0));
        assert_eq!(field.particles(), before.as_slice());
        assert_eq!(field.frames(), 1);
    }

    #[test]
    fn test_zero_sized_surface_is_harmless() {
        let mut field = ParticleField::new(FieldConfig::services(), Vec2::ZERO, Some(1));
        field.step(Some(Pos2::ZERO));

        assert_eq!(field.particles().len(), constants::SERVICES_PARTICLE_COUNT);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), [255, 0, 0]);
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), [0, 255, 0]);
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), [0, 0, 255]);
        assert_eq!(hsl_to_rgb(42.0, 0.0, 1.0), [255, 255, 255]);
    }
}
