//! FrameLoop: A headless render loop.
//!
//! Keeps the tick subscriptions and remembers what each hook was last told,
//! so callers can inspect the "screen" without a real renderer. Input is
//! injected with [`FrameLoop::set_key`] and [`FrameLoop::set_mouse`].

use super::{
    Backdrop, CallbackId, Costume, DirtyFlags, KeyCode, MouseState, RenderLoop, RendererProps,
    SoundRequest, TickCallback, TickSource,
};
use crate::actor::ActorId;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Collision radius of a sprite drawn at 100% size.
const DEFAULT_HIT_RADIUS: f64 = 24.0;

type Subscription = (CallbackId, Rc<RefCell<TickCallback>>);

/// Headless [`RenderLoop`] implementation.
pub struct FrameLoop {
    /// Ticks per second reported to actors.
    fps: u32,
    /// Next subscription number.
    next_id: Cell<u64>,
    /// Subscribed callbacks in subscription order.
    callbacks: RefCell<Vec<Subscription>>,
    /// Ticks fired so far.
    frame: Cell<u64>,
    /// Set while callbacks are running.
    ticking: Cell<bool>,
    /// Current backdrop.
    backdrop: RefCell<Option<Backdrop>>,
    /// Last props drawn per sprite.
    sprites: RefCell<HashMap<ActorId, RendererProps>>,
    /// Current skin per sprite.
    skins: RefCell<HashMap<ActorId, Costume>>,
    /// Sounds started and not yet collected.
    sounds: RefCell<Vec<SoundRequest>>,
    /// Keys currently held.
    keys: RefCell<HashSet<KeyCode>>,
    /// Latest mouse state.
    mouse: Cell<MouseState>,
    /// Collision radius at 100% size.
    hit_radius: f64,
}

impl FrameLoop {
    /// Create a headless loop ticking at `fps` (clamped to at least 1).
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            next_id: Cell::new(0),
            callbacks: RefCell::new(Vec::new()),
            frame: Cell::new(0),
            ticking: Cell::new(false),
            backdrop: RefCell::new(None),
            sprites: RefCell::new(HashMap::new()),
            skins: RefCell::new(HashMap::new()),
            sounds: RefCell::new(Vec::new()),
            keys: RefCell::new(HashSet::new()),
            mouse: Cell::new(MouseState::default()),
            hit_radius: DEFAULT_HIT_RADIUS,
        }
    }

    /// Set the collision radius used for sprites drawn at 100% size.
    #[must_use]
    pub fn with_hit_radius(mut self, radius: f64) -> Self {
        self.hit_radius = radius;
        self
    }

    /// Fire one tick: run every subscribed callback once, in subscription
    /// order.
    ///
    /// Callbacks removed by an earlier callback in the same tick are
    /// skipped; callbacks added during the tick first run on the next one.
    /// A re-entrant call is ignored.
    ///
    /// Returns the number of callbacks run.
    pub fn tick(&self) -> usize {
        if self.ticking.replace(true) {
            tracing::warn!(frame = self.frame.get(), "re-entrant tick ignored");
            return 0;
        }

        let snapshot: Vec<Subscription> = self.callbacks.borrow().clone();
        let mut ran = 0;
        for (id, callback) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (*callback)();
                ran += 1;
            }
        }

        self.frame.set(self.frame.get() + 1);
        self.ticking.set(false);
        tracing::trace!(frame = self.frame.get(), callbacks = ran, "tick");
        ran
    }

    /// Ticks fired so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame.get()
    }

    /// Number of subscribed callbacks.
    pub fn subscribers(&self) -> usize {
        self.callbacks.borrow().len()
    }

    /// Check whether a subscription is still live.
    pub fn is_subscribed(&self, id: CallbackId) -> bool {
        self.callbacks.borrow().iter().any(|(sub, _)| *sub == id)
    }

    /// The backdrop last set, if any.
    pub fn backdrop(&self) -> Option<Backdrop> {
        self.backdrop.borrow().clone()
    }

    /// The props last drawn for a sprite.
    pub fn drawn(&self, id: ActorId) -> Option<RendererProps> {
        self.sprites.borrow().get(&id).cloned()
    }

    /// The skin last loaded for a sprite.
    pub fn skin(&self, id: ActorId) -> Option<Costume> {
        self.skins.borrow().get(&id).cloned()
    }

    /// Collect the sounds started since the last call.
    pub fn take_sounds(&self) -> Vec<SoundRequest> {
        self.sounds.take()
    }

    /// Press or release a key.
    pub fn set_key(&self, key: KeyCode, held: bool) {
        let mut keys = self.keys.borrow_mut();
        if held {
            keys.insert(key);
        } else {
            keys.remove(&key);
        }
    }

    /// Replace the mouse state.
    pub fn set_mouse(&self, mouse: MouseState) {
        self.mouse.set(mouse);
    }

    fn radius(&self, props: &RendererProps) -> f64 {
        self.hit_radius * props.scale.max(0.0) / 100.0
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(30)
    }
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("fps", &self.fps)
            .field("frame", &self.frame.get())
            .field("subscribers", &self.subscribers())
            .field("sprites", &self.sprites.borrow().len())
            .finish_non_exhaustive()
    }
}

impl TickSource for FrameLoop {
    fn add_callback(&self, callback: TickCallback) -> CallbackId {
        let id = CallbackId::from_raw(self.next_id.get());
        self.next_id.set(id.raw() + 1);
        self.callbacks
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(callback))));
        id
    }

    fn remove_callback(&self, id: CallbackId) -> bool {
        let mut callbacks = self.callbacks.borrow_mut();
        let before = callbacks.len();
        callbacks.retain(|(sub, _)| *sub != id);
        callbacks.len() != before
    }

    fn fps(&self) -> f64 {
        f64::from(self.fps)
    }
}

impl RenderLoop for FrameLoop {
    fn set_stage(&self, backdrop: &Backdrop) {
        *self.backdrop.borrow_mut() = Some(backdrop.clone());
    }

    fn draw_sprite(&self, id: ActorId, props: &RendererProps, _changed: DirtyFlags) {
        self.sprites.borrow_mut().insert(id, props.clone());
    }

    fn update_skin(&self, id: ActorId, costume: &Costume) {
        self.skins.borrow_mut().insert(id, costume.clone());
    }

    fn remove_sprite(&self, id: ActorId) {
        self.sprites.borrow_mut().remove(&id);
        self.skins.borrow_mut().remove(&id);
    }

    fn play_sound(&self, sound: &SoundRequest) {
        self.sounds.borrow_mut().push(sound.clone());
    }

    fn touching(&self, a: ActorId, b: ActorId) -> bool {
        if a == b {
            return false;
        }
        let sprites = self.sprites.borrow();
        match (sprites.get(&a), sprites.get(&b)) {
            (Some(pa), Some(pb)) if pa.visible && pb.visible => {
                pa.position.distance(pb.position) <= self.radius(pa) + self.radius(pb)
            }
            _ => false,
        }
    }

    fn key_pressed(&self, key: KeyCode) -> bool {
        let keys = self.keys.borrow();
        match key {
            KeyCode::Any => !keys.is_empty(),
            key => keys.contains(&key),
        }
    }

    fn mouse(&self) -> MouseState {
        self.mouse.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Effects, RotationStyle};
    use crate::geometry::Point;
    use crate::render::MouseButton;

    fn props_at(x: f64, y: f64) -> RendererProps {
        RendererProps {
            position: Point::new(x, y),
            direction: 90.0,
            scale: 100.0,
            rotation_style: RotationStyle::AllAround,
            effects: Effects::default(),
            costume: 0,
            visible: true,
        }
    }

    fn counter(frame_loop: &FrameLoop) -> (CallbackId, Rc<Cell<u32>>) {
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        let id = frame_loop.add_callback(Box::new(move || seen.set(seen.get() + 1)));
        (id, hits)
    }

    #[test]
    fn test_tick_runs_each_callback_once() {
        let frame_loop = FrameLoop::new(30);
        let (_, a) = counter(&frame_loop);
        let (_, b) = counter(&frame_loop);

        assert_eq!(frame_loop.tick(), 2);
        assert_eq!(frame_loop.tick(), 2);
        assert_eq!((a.get(), b.get()), (2, 2));
        assert_eq!(frame_loop.frame(), 2);
    }

    #[test]
    fn test_callbacks_run_in_subscription_order() {
        let frame_loop = FrameLoop::new(30);
        let order = Rc::new(RefCell::new(Vec::new()));
        for n in 0..4 {
            let order = Rc::clone(&order);
            frame_loop.add_callback(Box::new(move || order.borrow_mut().push(n)));
        }
        frame_loop.tick();
        assert_eq!(*order.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_remove_callback() {
        let frame_loop = FrameLoop::new(30);
        let (id, hits) = counter(&frame_loop);
        assert!(frame_loop.remove_callback(id));
        assert!(!frame_loop.remove_callback(id));
        frame_loop.tick();
        assert_eq!(hits.get(), 0);
        assert_eq!(frame_loop.subscribers(), 0);
    }

    #[test]
    fn test_callback_added_during_tick_waits() {
        let frame_loop = Rc::new(FrameLoop::new(30));
        let late_hits = Rc::new(Cell::new(0));
        {
            let weak = Rc::downgrade(&frame_loop);
            let late_hits = Rc::clone(&late_hits);
            let mut added = false;
            frame_loop.add_callback(Box::new(move || {
                if added {
                    return;
                }
                added = true;
                if let Some(frame_loop) = weak.upgrade() {
                    let late_hits = Rc::clone(&late_hits);
                    frame_loop.add_callback(Box::new(move || late_hits.set(late_hits.get() + 1)));
                }
            }));
        }
        assert_eq!(frame_loop.tick(), 1);
        assert_eq!(late_hits.get(), 0);
        assert_eq!(frame_loop.tick(), 2);
        assert_eq!(late_hits.get(), 1);
    }

    #[test]
    fn test_fps_never_zero() {
        assert_eq!(FrameLoop::new(0).fps(), 1.0);
        assert_eq!(FrameLoop::default().fps(), 30.0);
    }

    #[test]
    fn test_records_hooks() {
        let frame_loop = FrameLoop::new(30);
        let id = ActorId::from_raw(1);
        frame_loop.set_stage(&Backdrop::new("night", "night.png", crate::render::CostumeKind::Bitmap));
        frame_loop.update_skin(id, &Costume::cat());
        frame_loop.draw_sprite(id, &props_at(1.0, 2.0), DirtyFlags::POSITION);
        frame_loop.play_sound(&SoundRequest::new("pop.wav"));

        assert_eq!(frame_loop.backdrop().map(|b| b.name), Some("night".to_string()));
        assert_eq!(frame_loop.skin(id), Some(Costume::cat()));
        assert_eq!(frame_loop.drawn(id).map(|p| p.position), Some(Point::new(1.0, 2.0)));
        assert_eq!(frame_loop.take_sounds().len(), 1);
        assert!(frame_loop.take_sounds().is_empty());

        frame_loop.remove_sprite(id);
        assert!(frame_loop.drawn(id).is_none());
    }

    #[test]
    fn test_touching_uses_scaled_radius() {
        let frame_loop = FrameLoop::new(30);
        let (a, b) = (ActorId::from_raw(1), ActorId::from_raw(2));
        frame_loop.draw_sprite(a, &props_at(0.0, 0.0), DirtyFlags::all());
        frame_loop.draw_sprite(b, &props_at(40.0, 0.0), DirtyFlags::all());
        assert!(frame_loop.touching(a, b));

        let mut far = props_at(60.0, 0.0);
        frame_loop.draw_sprite(b, &far, DirtyFlags::POSITION);
        assert!(!frame_loop.touching(a, b));

        far.scale = 200.0;
        frame_loop.draw_sprite(b, &far, DirtyFlags::SIZE);
        assert!(frame_loop.touching(a, b));

        far.visible = false;
        frame_loop.draw_sprite(b, &far, DirtyFlags::VISIBILITY);
        assert!(!frame_loop.touching(a, b));
        assert!(!frame_loop.touching(a, a));
    }

    #[test]
    fn test_input_state() {
        let frame_loop = FrameLoop::new(30);
        assert!(!frame_loop.key_pressed(KeyCode::Any));
        frame_loop.set_key(KeyCode::Space, true);
        assert!(frame_loop.key_pressed(KeyCode::Space));
        assert!(frame_loop.key_pressed(KeyCode::Any));
        assert!(!frame_loop.key_pressed(KeyCode::Up));
        frame_loop.set_key(KeyCode::Space, false);
        assert!(!frame_loop.key_pressed(KeyCode::Any));

        frame_loop.set_mouse(MouseState {
            x: 10.0,
            y: -5.0,
            button: Some(MouseButton::Left),
        });
        assert!(frame_loop.mouse().is_down());
        assert_eq!(frame_loop.mouse().x, 10.0);
    }
}
