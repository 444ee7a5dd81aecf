//! Sprite: A movable, costumed actor.
//!
//! Every mutating command lands on the sprite's state at once and marks the
//! changed properties dirty. The next tick publishes one `draw_sprite` with
//! the accumulated changes, then resumes the scripts that were waiting on it.

use super::appearance::{Effect, Effects, RotationStyle};
use super::traits::{Looks, Motion, Target};
use super::{Actor, Role};
use crate::error::{StageError, StageResult};
use crate::geometry::{
    direction_towards, normalize_direction, random_direction, step_delta, Bounds, Point,
};
use crate::render::{Costume, DirtyFlags, RenderCommand, RendererProps};
use crate::scheduler::{
    continuation, ActionScheduler, GlidePlan, GlideReplacement, Interpolation, NextTick, Resolver,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A sprite handle.
pub type Sprite = Actor<SpriteState>;

/// Settings for a new sprite.
#[derive(Debug, Clone)]
pub struct SpriteConfig {
    /// Costumes in order. The first one is worn initially.
    pub costumes: Vec<Costume>,
    /// Area random targets are drawn from.
    pub bounds: Bounds,
    /// Seed for random targets. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// What happens to an unfinished glide replaced by a new one.
    pub replacement: GlideReplacement,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            costumes: vec![Costume::cat()],
            bounds: Bounds::STAGE,
            seed: None,
            replacement: GlideReplacement::default(),
        }
    }
}

/// Visual state of a sprite.
#[derive(Debug)]
pub struct SpriteState {
    position: Point,
    direction: f64,
    size: f64,
    visible: bool,
    effects: Effects,
    costumes: Vec<Costume>,
    costume: usize,
    rotation_style: RotationStyle,
    bounds: Bounds,
    rng: StdRng,
    dirty: DirtyFlags,
}

impl SpriteState {
    fn new(config: SpriteConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            position: Point::ORIGIN,
            direction: 90.0,
            size: 100.0,
            visible: true,
            effects: Effects::default(),
            costumes: config.costumes,
            costume: 0,
            rotation_style: RotationStyle::default(),
            bounds: config.bounds,
            rng,
            dirty: DirtyFlags::all(),
        }
    }

    /// Snapshot for the renderer.
    pub fn props(&self) -> RendererProps {
        RendererProps {
            position: self.position,
            direction: self.direction,
            scale: self.size,
            rotation_style: self.rotation_style,
            effects: self.effects,
            costume: self.costume,
            visible: self.visible,
        }
    }

    fn move_to(&mut self, position: Point) -> bool {
        self.position = position;
        self.dirty |= DirtyFlags::POSITION;
        true
    }

    fn turn_to(&mut self, direction: f64) -> bool {
        self.direction = normalize_direction(direction);
        self.dirty |= DirtyFlags::DIRECTION;
        true
    }

    fn resize(&mut self, size: f64) -> bool {
        self.size = size.max(0.0);
        self.dirty |= DirtyFlags::SIZE;
        true
    }

    fn set_visible(&mut self, visible: bool) -> bool {
        self.visible = visible;
        self.dirty |= DirtyFlags::VISIBILITY;
        true
    }

    fn wear(&mut self, index: usize, render: &mut Vec<RenderCommand>) -> bool {
        if self.costumes.is_empty() {
            return false;
        }
        self.costume = index % self.costumes.len();
        self.dirty |= DirtyFlags::COSTUME;
        render.push(RenderCommand::UpdateSkin(
            self.costumes[self.costume].clone(),
        ));
        true
    }

    fn current_costume(&self) -> Option<&Costume> {
        self.costumes.get(self.costume)
    }
}

impl Role for SpriteState {
    fn on_connect(&mut self, render: &mut Vec<RenderCommand>) {
        self.dirty = DirtyFlags::all();
        if let Some(costume) = self.current_costume() {
            render.push(RenderCommand::UpdateSkin(costume.clone()));
        }
    }

    fn on_disconnect(&mut self, render: &mut Vec<RenderCommand>) {
        render.push(RenderCommand::Remove);
    }

    fn on_tick(
        &mut self,
        scheduler: &mut ActionScheduler,
        render: &mut Vec<RenderCommand>,
    ) -> Vec<Resolver> {
        let gliding = scheduler.is_gliding();
        let due = scheduler.tick(Some(&mut self.position));
        if gliding {
            self.dirty |= DirtyFlags::POSITION;
        }

        if !self.dirty.is_empty() {
            render.push(RenderCommand::Draw {
                props: Box::new(self.props()),
                changed: self.dirty,
            });
            self.dirty = DirtyFlags::empty();
        }
        due
    }
}

impl Sprite {
    /// Create a detached sprite wearing the default cat costume.
    pub fn new() -> Self {
        Self::with_config(SpriteConfig::default())
    }

    /// Create a detached sprite from explicit settings.
    pub fn with_config(config: SpriteConfig) -> Self {
        let replacement = config.replacement;
        let sprite = Self::from_role(SpriteState::new(config));
        sprite.set_glide_replacement(replacement);
        sprite
    }

    /// Current position.
    pub fn position(&self) -> Point {
        self.read(|state| state.position)
    }

    /// Snapshot of what the renderer would draw.
    pub fn renderer_props(&self) -> RendererProps {
        self.read(SpriteState::props)
    }

    /// The costume being worn.
    pub fn costume(&self) -> Option<Costume> {
        self.read(|state| state.current_costume().cloned())
    }

    /// Current rotation style.
    pub fn rotation_style(&self) -> RotationStyle {
        self.read(|state| state.rotation_style)
    }

    /// Check whether a glide is in flight.
    pub fn is_gliding(&self) -> bool {
        self.with_inner(|inner| inner.scheduler.is_gliding())
    }

    /// Change what happens to unfinished glides that get replaced.
    pub fn set_glide_replacement(&self, policy: GlideReplacement) {
        self.with_inner(|inner| inner.scheduler.set_replacement(policy));
    }

    /// Set the rotation style by name. Unknown names are ignored with a
    /// warning.
    pub fn set_rotation_style_named(&self, style: &str) -> NextTick {
        match style.parse::<RotationStyle>() {
            Ok(style) => self.set_rotation_style(style),
            Err(err) => {
                tracing::warn!(actor = %self.id(), %err, "rotation style ignored");
                NextTick::ready()
            }
        }
    }

    /// Whether the render loop sees this sprite overlapping `other`.
    pub fn touching(&self, other: &Sprite) -> bool {
        let (a, b) = (self.id(), other.id());
        self.render_loop()
            .is_some_and(|render| render.touching(a, b))
    }

    /// Resolve a target to a point. Random targets draw from the sprite's
    /// bounds; the mouse reads the render loop's pointer.
    fn locate(&self, target: Target) -> Point {
        match target {
            Target::Point(point) => point,
            Target::Random => self.with_inner(|inner| {
                let state = &mut inner.role;
                state.bounds.random_point(&mut state.rng)
            }),
            Target::Mouse => self
                .render_loop()
                .map_or(Point::ORIGIN, |render| {
                    let mouse = render.mouse();
                    Point::new(mouse.x, mouse.y)
                }),
        }
    }

    fn glide_towards(&self, to: Point, seconds: f64) -> StageResult<NextTick> {
        let (wait, released) = self.with_inner(|inner| -> StageResult<_> {
            let render = inner.render().ok_or(StageError::NotConnected(inner.id))?;
            let plan = GlidePlan::new(inner.role.position, to, seconds, render.fps());
            let (resolver, wait) = continuation();

            let mut released = Vec::with_capacity(2);
            match Interpolation::arm(plan, resolver) {
                Ok(glide) => {
                    tracing::trace!(
                        actor = %inner.id,
                        total = glide.total(),
                        "glide armed"
                    );
                    released.extend(inner.scheduler.arm(glide));
                }
                Err(resolver) => {
                    released.extend(inner.scheduler.cancel());
                    inner.role.move_to(to);
                    released.push(resolver);
                }
            }
            Ok((wait, released))
        })?;

        for resolver in released {
            resolver.resolve();
        }
        Ok(wait)
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new()
    }
}

impl Motion for Sprite {
    fn move_steps(&self, steps: f64) -> NextTick {
        self.command(|state, _| {
            let (dx, dy) = step_delta(steps, state.direction);
            let to = state.position.offset(dx, dy);
            state.move_to(to)
        })
    }

    fn go_to_xy(&self, x: f64, y: f64) -> NextTick {
        self.command(|state, _| state.move_to(Point::new(x, y)))
    }

    fn go_to(&self, target: Target) -> NextTick {
        let to = self.locate(target);
        self.command(|state, _| state.move_to(to))
    }

    fn turn_right(&self, degrees: f64) -> NextTick {
        self.command(|state, _| state.turn_to(state.direction + degrees))
    }

    fn turn_left(&self, degrees: f64) -> NextTick {
        self.command(|state, _| state.turn_to(state.direction - degrees))
    }

    fn point_in_direction(&self, direction: f64) -> NextTick {
        self.command(|state, _| state.turn_to(direction))
    }

    fn point_towards(&self, target: Target) -> NextTick {
        if target == Target::Random {
            return self.command(|state, _| {
                let direction = random_direction(&mut state.rng);
                state.turn_to(direction)
            });
        }
        let to = self.locate(target);
        self.command(|state, _| state.turn_to(direction_towards(state.position, to)))
    }

    fn glide(&self, x: f64, y: f64, seconds: f64) -> StageResult<NextTick> {
        self.glide_towards(Point::new(x, y), seconds)
    }

    fn glide_to(&self, target: Target, seconds: f64) -> StageResult<NextTick> {
        // Random targets consume the rng, so check the link first.
        if !self.is_connected() {
            return Err(StageError::NotConnected(self.id()));
        }
        let to = self.locate(target);
        self.glide_towards(to, seconds)
    }

    fn set_rotation_style(&self, style: RotationStyle) -> NextTick {
        self.command(|state, _| {
            state.rotation_style = style;
            state.dirty |= DirtyFlags::ROTATION_STYLE;
            true
        })
    }

    fn change_x(&self, dx: f64) -> NextTick {
        self.command(|state, _| state.move_to(state.position.offset(dx, 0.0)))
    }

    fn set_x(&self, x: f64) -> NextTick {
        self.command(|state, _| state.move_to(Point::new(x, state.position.y)))
    }

    fn change_y(&self, dy: f64) -> NextTick {
        self.command(|state, _| state.move_to(state.position.offset(0.0, dy)))
    }

    fn set_y(&self, y: f64) -> NextTick {
        self.command(|state, _| state.move_to(Point::new(state.position.x, y)))
    }

    fn x(&self) -> f64 {
        self.read(|state| state.position.x)
    }

    fn y(&self) -> f64 {
        self.read(|state| state.position.y)
    }

    fn direction(&self) -> f64 {
        self.read(|state| state.direction)
    }
}

impl Looks for Sprite {
    fn set_costume(&self, index: usize) -> NextTick {
        self.command(|state, render| state.wear(index, render))
    }

    fn set_costume_named(&self, name: &str) -> NextTick {
        let index = self.read(|state| state.costumes.iter().position(|c| c.name == name));
        match index {
            Some(index) => self.set_costume(index),
            None => {
                let err = StageError::UnknownCostume(name.to_string());
                tracing::warn!(actor = %self.id(), %err, "costume switch ignored");
                NextTick::ready()
            }
        }
    }

    fn next_costume(&self) -> NextTick {
        self.command(|state, render| state.wear(state.costume + 1, render))
    }

    fn set_size(&self, size: f64) -> NextTick {
        self.command(|state, _| state.resize(size))
    }

    fn change_size(&self, delta: f64) -> NextTick {
        self.command(|state, _| state.resize(state.size + delta))
    }

    fn set_effect(&self, effect: &str, value: f64) -> NextTick {
        match effect.parse::<Effect>() {
            Ok(effect) => self.command(|state, _| {
                state.effects.set(effect, value);
                state.dirty |= DirtyFlags::EFFECTS;
                true
            }),
            Err(err) => {
                tracing::warn!(actor = %self.id(), %err, "set_effect ignored");
                NextTick::ready()
            }
        }
    }

    fn change_effect(&self, effect: &str, delta: f64) -> NextTick {
        match effect.parse::<Effect>() {
            Ok(effect) => self.command(|state, _| {
                state.effects.change(effect, delta);
                state.dirty |= DirtyFlags::EFFECTS;
                true
            }),
            Err(err) => {
                tracing::warn!(actor = %self.id(), %err, "change_effect ignored");
                NextTick::ready()
            }
        }
    }

    fn clear_effects(&self) -> NextTick {
        self.command(|state, _| {
            state.effects.clear();
            state.dirty |= DirtyFlags::EFFECTS;
            true
        })
    }

    fn show(&self) -> NextTick {
        self.command(|state, _| state.set_visible(true))
    }

    fn hide(&self) -> NextTick {
        self.command(|state, _| state.set_visible(false))
    }

    fn size(&self) -> f64 {
        self.read(|state| state.size)
    }

    fn costume_number(&self) -> usize {
        self.read(|state| state.costume)
    }

    fn is_visible(&self) -> bool {
        self.read(|state| state.visible)
    }

    fn effect(&self, effect: Effect) -> f64 {
        self.read(|state| state.effects.get(effect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CostumeKind, FrameLoop, MouseState};
    use crate::scheduler::test_support::{poll_once, CountingWaker};
    use std::rc::Rc;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::task::Poll;

    fn connected(fps: u32) -> (Rc<FrameLoop>, Sprite) {
        let frame_loop = Rc::new(FrameLoop::new(fps));
        let sprite = Sprite::with_config(SpriteConfig {
            seed: Some(7),
            ..SpriteConfig::default()
        });
        sprite.connect(frame_loop.clone());
        (frame_loop, sprite)
    }

    fn ticks(frame_loop: &FrameLoop, n: usize) {
        for _ in 0..n {
            frame_loop.tick();
        }
    }

    #[test]
    fn test_defaults() {
        let sprite = Sprite::new();
        assert_eq!(sprite.position(), Point::ORIGIN);
        assert_eq!(sprite.direction(), 90.0);
        assert_eq!(sprite.size(), 100.0);
        assert!(sprite.is_visible());
        assert_eq!(sprite.costume(), Some(Costume::cat()));
        assert_eq!(sprite.rotation_style(), RotationStyle::AllAround);
        assert!(sprite.screen_refresh());
    }

    #[test]
    fn test_commands_wait_one_tick() {
        let (frame_loop, sprite) = connected(30);
        let wait = sprite.move_steps(10.0);
        assert_eq!(sprite.x(), 10.0);
        assert!(!wait.is_ready());
        assert_eq!(sprite.pending_continuations(), 1);

        frame_loop.tick();
        assert!(wait.is_ready());
    }

    #[test]
    fn test_commands_without_refresh_enqueue_nothing() {
        let (_frame_loop, sprite) = connected(30);
        assert!(sprite.set_screen_refresh(false).is_ready());

        let waits = [
            sprite.go_to_xy(5.0, 5.0),
            sprite.change_x(3.0),
            sprite.set_y(-2.0),
            sprite.turn_right(45.0),
            sprite.set_size(150.0),
        ];
        assert!(waits.iter().all(NextTick::is_ready));
        assert_eq!(sprite.pending_continuations(), 0);
        assert_eq!(sprite.position(), Point::new(8.0, -2.0));
        assert_eq!(sprite.direction(), 135.0);
        assert_eq!(sprite.size(), 150.0);
    }

    #[test]
    fn test_glide_one_second_at_thirty_fps() {
        let (frame_loop, sprite) = connected(30);
        let waker = Arc::new(CountingWaker::default());
        let mut wait = sprite.glide(30.0, 0.0, 1.0).expect("connected");
        assert_eq!(poll_once(&mut wait, &waker), Poll::Pending);

        ticks(&frame_loop, 29);
        assert_eq!(sprite.position(), Point::new(29.0, 0.0));
        assert_eq!(poll_once(&mut wait, &waker), Poll::Pending);

        frame_loop.tick();
        assert_eq!(sprite.position(), Point::new(30.0, 0.0));
        assert_eq!(waker.wakes.load(Ordering::SeqCst), 1);
        assert_eq!(poll_once(&mut wait, &waker), Poll::Ready(()));
        assert!(!sprite.is_gliding());

        let drawn = frame_loop.drawn(sprite.id()).expect("drawn");
        assert_eq!(drawn.position, Point::new(30.0, 0.0));
    }

    #[test]
    fn test_glide_zero_duration_is_immediate() {
        let (_frame_loop, sprite) = connected(30);
        let wait = sprite.glide(12.0, -4.0, 0.0).expect("connected");
        assert!(wait.is_ready());
        assert_eq!(sprite.position(), Point::new(12.0, -4.0));
        assert_eq!(sprite.pending_continuations(), 0);

        assert!(sprite.glide(1.0, 1.0, -3.0).expect("connected").is_ready());
        assert_eq!(sprite.position(), Point::new(1.0, 1.0));
    }

    #[test]
    fn test_glide_requires_connection() {
        let sprite = Sprite::new();
        let err = sprite.glide(10.0, 10.0, 1.0).unwrap_err();
        assert_eq!(err, StageError::NotConnected(sprite.id()));
        assert_eq!(sprite.position(), Point::ORIGIN);
        assert!(!sprite.is_gliding());

        assert!(sprite.glide_to(Target::Random, 1.0).is_err());
        assert_eq!(sprite.position(), Point::ORIGIN);
    }

    #[test]
    fn test_replaced_glide_never_resumes() {
        let (frame_loop, sprite) = connected(30);
        let waker = Arc::new(CountingWaker::default());
        let mut first = sprite.glide(100.0, 0.0, 1.0).expect("connected");
        assert_eq!(poll_once(&mut first, &waker), Poll::Pending);
        ticks(&frame_loop, 3);

        let second = sprite.glide(0.0, 0.0, 0.5).expect("connected");
        ticks(&frame_loop, 60);
        assert!(second.is_ready());
        assert_eq!(sprite.position(), Point::ORIGIN);
        assert_eq!(poll_once(&mut first, &waker), Poll::Pending);
        assert_eq!(waker.wakes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_replaced_glide_resolve_policy() {
        let (frame_loop, sprite) = connected(30);
        sprite.set_glide_replacement(GlideReplacement::Resolve);
        let first = sprite.glide(100.0, 0.0, 1.0).expect("connected");
        frame_loop.tick();

        let second = sprite.glide(0.0, 50.0, 1.0).expect("connected");
        assert!(first.is_ready());
        assert!(!second.is_ready());
    }

    #[test]
    fn test_immediate_glide_cancels_glide_in_flight() {
        let (frame_loop, sprite) = connected(30);
        let _first = sprite.glide(100.0, 0.0, 1.0).expect("connected");
        frame_loop.tick();

        let jump = sprite.glide(-10.0, 0.0, 0.0).expect("connected");
        assert!(jump.is_ready());
        ticks(&frame_loop, 5);
        assert_eq!(sprite.position(), Point::new(-10.0, 0.0));
    }

    #[test]
    fn test_degenerate_glide_takes_full_duration() {
        let (frame_loop, sprite) = connected(30);
        let wait = sprite.glide(0.0, 0.0, 2.0).expect("connected");
        ticks(&frame_loop, 59);
        assert!(!wait.is_ready());
        assert!(sprite.is_gliding());

        frame_loop.tick();
        assert!(wait.is_ready());
        assert_eq!(sprite.position(), Point::ORIGIN);
    }

    #[test]
    fn test_glide_to_random_stays_on_stage() {
        let (frame_loop, sprite) = connected(30);
        let wait = sprite.glide_to(Target::Random, 0.2).expect("connected");
        ticks(&frame_loop, 10);
        assert!(wait.is_ready());
        let position = sprite.position();
        assert!(Bounds::STAGE.contains(position));
        assert_eq!(position.x.fract(), 0.0);
        assert_eq!(position.y.fract(), 0.0);
    }

    #[test]
    fn test_random_targets_with_negative_bounds() {
        let frame_loop = Rc::new(FrameLoop::new(30));
        let sprite = Sprite::with_config(SpriteConfig {
            bounds: Bounds {
                half_width: -240,
                half_height: 180,
            },
            seed: Some(3),
            ..SpriteConfig::default()
        });
        sprite.connect(frame_loop.clone());

        let wait = sprite.glide_to(Target::Random, 0.2).expect("connected");
        ticks(&frame_loop, 10);
        assert!(wait.is_ready());
        assert!(Bounds::STAGE.contains(sprite.position()));

        let _ = sprite.go_to(Target::Random);
        assert!(Bounds::STAGE.contains(sprite.position()));
        let _ = sprite.point_towards(Target::Random);
    }

    #[test]
    fn test_go_to_targets() {
        let (frame_loop, sprite) = connected(30);
        let _ = sprite.set_screen_refresh(false);
        frame_loop.set_mouse(MouseState {
            x: 40.0,
            y: 30.0,
            button: None,
        });
        let _ = sprite.go_to(Target::Mouse);
        assert_eq!(sprite.position(), Point::new(40.0, 30.0));

        let other = Sprite::new();
        let _ = other.go_to_xy(-7.0, 2.0);
        let _ = sprite.go_to(Target::from(&other));
        assert_eq!(sprite.position(), Point::new(-7.0, 2.0));
    }

    #[test]
    fn test_directions_normalize() {
        let (_frame_loop, sprite) = connected(30);
        let _ = sprite.set_screen_refresh(false);
        let _ = sprite.turn_right(135.0);
        assert_eq!(sprite.direction(), -135.0);
        let _ = sprite.turn_left(45.0);
        assert_eq!(sprite.direction(), 180.0);
        let _ = sprite.point_in_direction(-180.0);
        assert_eq!(sprite.direction(), 180.0);

        let _ = sprite.point_towards(Target::Point(Point::new(0.0, 10.0)));
        assert_eq!(sprite.direction(), 0.0);

        let _ = sprite.point_towards(Target::Random);
        let direction = sprite.direction();
        assert!(direction > -180.0 && direction <= 180.0);
        assert_eq!(direction.fract(), 0.0);
    }

    #[test]
    fn test_move_steps_follows_direction() {
        let (_frame_loop, sprite) = connected(30);
        let _ = sprite.set_screen_refresh(false);
        let _ = sprite.point_in_direction(0.0);
        let _ = sprite.move_steps(10.0);
        assert_eq!(sprite.position(), Point::new(0.0, 10.0));
    }

    #[test]
    fn test_costumes_wrap_and_update_skin() {
        let frame_loop = Rc::new(FrameLoop::new(30));
        let dog = Costume::new("dog", "dog.png", CostumeKind::Bitmap);
        let sprite = Sprite::with_config(SpriteConfig {
            costumes: vec![Costume::cat(), dog.clone()],
            ..SpriteConfig::default()
        });
        sprite.connect(frame_loop.clone());
        assert_eq!(frame_loop.skin(sprite.id()), Some(Costume::cat()));

        let _ = sprite.set_screen_refresh(false);
        let _ = sprite.next_costume();
        assert_eq!(sprite.costume_number(), 1);
        assert_eq!(frame_loop.skin(sprite.id()), Some(dog));
        let _ = sprite.next_costume();
        assert_eq!(sprite.costume_number(), 0);
        let _ = sprite.set_costume(5);
        assert_eq!(sprite.costume_number(), 1);
        let _ = sprite.set_costume_named("cat1");
        assert_eq!(sprite.costume_number(), 0);
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let (_frame_loop, sprite) = connected(30);
        assert!(sprite.set_costume_named("ghost").is_ready());
        assert!(sprite.set_effect("sparkle", 10.0).is_ready());
        assert!(sprite.change_effect("sparkle", 10.0).is_ready());
        assert!(sprite.set_rotation_style_named("sideways").is_ready());
        assert_eq!(sprite.pending_continuations(), 0);
        assert_eq!(sprite.costume_number(), 0);
        assert!(sprite.renderer_props().effects.is_clear());
    }

    #[test]
    fn test_effects_and_visibility() {
        let (_frame_loop, sprite) = connected(30);
        let _ = sprite.set_screen_refresh(false);
        let _ = sprite.set_effect("ghost", 150.0);
        let _ = sprite.change_effect("colour", 25.0);
        assert_eq!(sprite.effect(Effect::Ghost), 100.0);
        assert_eq!(sprite.effect(Effect::Color), 25.0);
        let _ = sprite.clear_effects();
        assert_eq!(sprite.effect(Effect::Ghost), 0.0);

        let _ = sprite.hide();
        assert!(!sprite.is_visible());
        let _ = sprite.show();
        assert!(sprite.is_visible());

        let _ = sprite.change_size(-500.0);
        assert_eq!(sprite.size(), 0.0);
        let _ = sprite.set_rotation_style_named("left-right");
        assert_eq!(sprite.rotation_style(), RotationStyle::LeftRight);
    }

    #[test]
    fn test_draws_only_when_dirty() {
        let (frame_loop, sprite) = connected(30);
        let id = sprite.id();
        frame_loop.tick();
        assert_eq!(frame_loop.drawn(id).map(|p| p.position), Some(Point::ORIGIN));

        let _ = sprite.set_screen_refresh(false);
        let _ = sprite.go_to_xy(9.0, 9.0);
        assert_eq!(frame_loop.drawn(id).map(|p| p.position), Some(Point::ORIGIN));
        frame_loop.tick();
        assert_eq!(frame_loop.drawn(id).map(|p| p.position), Some(Point::new(9.0, 9.0)));
    }

    #[test]
    fn test_disconnect_removes_sprite() {
        let (frame_loop, sprite) = connected(30);
        frame_loop.tick();
        assert!(frame_loop.drawn(sprite.id()).is_some());
        sprite.disconnect();
        assert!(frame_loop.drawn(sprite.id()).is_none());
        assert!(frame_loop.skin(sprite.id()).is_none());
    }

    #[test]
    fn test_touching() {
        let frame_loop = Rc::new(FrameLoop::new(30));
        let a = Sprite::new();
        let b = Sprite::new();
        assert!(!a.touching(&b));

        a.connect(frame_loop.clone());
        b.connect(frame_loop.clone());
        frame_loop.tick();
        assert!(a.touching(&b));

        let _ = b.set_screen_refresh(false);
        let _ = b.go_to_xy(200.0, 0.0);
        frame_loop.tick();
        assert!(!a.touching(&b));
    }
}
