//! Obstacles and the field that spawns, scrolls and prunes them.
//!
//! Lock order is field → bird → pipe. The field lock is taken exclusive by
//! the spawner (append only), `update` and `restart`, and shared by `touch`,
//! `snapshot` and `paint`. Each pipe has its own lock, only ever taken while
//! the field lock is already held.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};

use crate::bird::Bird;
use crate::config::GameConfig;
use crate::entity::Entity;
use crate::error::{GameError, GameResult};
use crate::render::Canvas;
use crate::snapshot::PipeSnapshot;
use crate::types::{Flip, Rect, TextureId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PipeState {
    /// `h` is the obstacle's vertical extent; `y` is unused.
    pub(crate) body: Entity,
    pub(crate) inverted: bool,
}

/// A single obstacle.
pub struct Pipe {
    state: RwLock<PipeState>,
}

impl Pipe {
    pub fn new(x: i32, height: i32, width: i32, inverted: bool) -> Self {
        Self {
            state: RwLock::new(PipeState {
                body: Entity::new(x, 0, width, height),
                inverted,
            }),
        }
    }

    /// A pipe at the right edge with random height and orientation.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Self {
        let max = config.pipe_max_height.max(config.pipe_min_height + 1);
        let height = rng.gen_range(config.pipe_min_height..max);
        Self::new(config.width, height, config.pipe_width, rng.gen_bool(0.5))
    }

    /// Scroll left by `speed`. Removal is the field's job.
    pub fn update(&self, speed: i32) {
        self.state.write().body.x -= speed;
    }

    pub fn snapshot(&self) -> PipeSnapshot {
        let s = *self.state.read();
        PipeSnapshot {
            x: s.body.x,
            height: s.body.h,
            width: s.body.w,
            inverted: s.inverted,
        }
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, PipeState> {
        self.state.read()
    }

    fn is_off_left(&self) -> bool {
        self.state.read().body.is_off_left()
    }
}

type PipeList = Arc<RwLock<Vec<Arc<Pipe>>>>;

/// Builds new pipes for the field. Shared with the spawner task.
struct PipeFactory {
    rng: Mutex<StdRng>,
    config: GameConfig,
}

impl PipeFactory {
    fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            config: config.clone(),
        }
    }

    fn make(&self) -> Pipe {
        Pipe::random(&mut *self.rng.lock(), &self.config)
    }
}

/// Handle to the background spawner task.
///
/// Dropping it closes the shutdown channel, which also stops the task.
struct Spawner {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Spawner {
    fn start(runtime: &Handle, pipes: PipeList, factory: Arc<PipeFactory>, interval: Duration) -> Self {
        let (shutdown, mut stop) = watch::channel(false);
        let handle = runtime.spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    // Ok on an explicit signal, Err once the field is gone.
                    _ = stop.changed() => break,
                    _ = ticker.tick() => {
                        let pipe = factory.make();
                        trace!(pipe = ?pipe.snapshot(), "spawned pipe");
                        pipes.write().push(Arc::new(pipe));
                    }
                }
            }
            debug!("pipe spawner stopped");
        });
        Self { shutdown, handle }
    }
}

/// The ordered collection of live pipes.
pub struct PipeField {
    pipes: PipeList,
    factory: Arc<PipeFactory>,
    texture: TextureId,
    speed: i32,
    field_height: i32,
    spawner: Option<Spawner>,
}

impl PipeField {
    /// Create a field whose spawner appends one pipe now and one per
    /// `config.spawn_interval` after that.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime; see [`PipeField::spawn_on`].
    pub fn spawn(texture: TextureId, config: &GameConfig) -> Self {
        Self::spawn_on(&Handle::current(), texture, config)
    }

    /// Like [`PipeField::spawn`], with the spawner running on `runtime`.
    pub fn spawn_on(runtime: &Handle, texture: TextureId, config: &GameConfig) -> Self {
        let mut field = Self::detached(texture, config);
        field.spawner = Some(Spawner::start(
            runtime,
            Arc::clone(&field.pipes),
            Arc::clone(&field.factory),
            config.spawn_interval,
        ));
        field
    }

    /// Create a field without a spawner. Pipes only arrive through
    /// [`PipeField::spawn_pipe`] or [`PipeField::insert`].
    pub fn detached(texture: TextureId, config: &GameConfig) -> Self {
        Self {
            pipes: Arc::new(RwLock::new(Vec::new())),
            factory: Arc::new(PipeFactory::new(config)),
            texture,
            speed: config.scroll_speed,
            field_height: config.height,
            spawner: None,
        }
    }

    /// Append one random pipe at the right edge.
    pub fn spawn_pipe(&self) {
        let pipe = self.factory.make();
        self.pipes.write().push(Arc::new(pipe));
    }

    pub fn insert(&self, pipe: Pipe) {
        self.pipes.write().push(Arc::new(pipe));
    }

    /// Scroll every pipe, then drop the ones fully past the left edge.
    pub fn update(&self) {
        let mut pipes = self.pipes.write();
        for pipe in pipes.iter() {
            pipe.update(self.speed);
        }
        pipes.retain(|pipe| !pipe.is_off_left());
    }

    /// Test the bird against every live pipe.
    pub fn touch(&self, bird: &Bird) {
        let pipes = self.pipes.read();
        for pipe in pipes.iter() {
            bird.touch(pipe);
        }
    }

    pub fn restart(&self) {
        self.pipes.write().clear();
    }

    pub fn len(&self) -> usize {
        self.pipes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.read().is_empty()
    }

    pub fn is_spawning(&self) -> bool {
        self.spawner
            .as_ref()
            .is_some_and(|spawner| !spawner.handle.is_finished())
    }

    /// Live pipes in spawn order.
    pub fn snapshot(&self) -> Vec<PipeSnapshot> {
        self.pipes.read().iter().map(|pipe| pipe.snapshot()).collect()
    }

    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C) -> GameResult<()> {
        for pipe in self.snapshot() {
            let (dst, flip) = if pipe.inverted {
                (Rect::new(pipe.x, 0, pipe.width, pipe.height), Flip::Vertical)
            } else {
                (
                    Rect::new(pipe.x, self.field_height - pipe.height, pipe.width, pipe.height),
                    Flip::None,
                )
            };
            canvas
                .draw(self.texture, None, dst, flip)
                .map_err(GameError::render("pipe"))?;
        }
        Ok(())
    }

    /// Stop the spawner and wait for it to exit.
    pub async fn shutdown(&mut self) {
        if let Some(spawner) = self.spawner.take() {
            let _ = spawner.shutdown.send(true);
            let _ = spawner.handle.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(config: &GameConfig) -> PipeField {
        PipeField::detached(TextureId(9), config)
    }

    #[test]
    fn pipe_update_moves_left() {
        let pipe = Pipe::new(800, 150, 50, false);
        pipe.update(3);
        pipe.update(3);
        assert_eq!(pipe.snapshot().x, 794);
    }

    #[test]
    fn random_pipes_respect_height_range() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut inverted = 0;
        for _ in 0..1000 {
            let pipe = Pipe::random(&mut rng, &config).snapshot();
            assert!((100..400).contains(&pipe.height), "height {}", pipe.height);
            assert_eq!(pipe.x, 800);
            assert_eq!(pipe.width, 50);
            if pipe.inverted {
                inverted += 1;
            }
        }
        // Roughly half of them hang from the top.
        assert!((350..650).contains(&inverted), "inverted {}", inverted);
    }

    #[test]
    fn seeded_fields_spawn_identical_pipes() {
        let config = GameConfig::default().with_seed(1234);
        let a = field(&config);
        let b = field(&config);
        for _ in 0..20 {
            a.spawn_pipe();
            b.spawn_pipe();
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn update_prunes_in_the_same_call() {
        let f = field(&GameConfig::default());
        f.insert(Pipe::new(-46, 150, 50, false));
        f.insert(Pipe::new(-47, 150, 50, false));
        f.update();
        // -49 + 50 > 0 survives; -50 + 50 <= 0 is gone.
        let left: Vec<i32> = f.snapshot().iter().map(|p| p.x).collect();
        assert_eq!(left, vec![-49]);
    }

    #[test]
    fn restart_clears() {
        let f = field(&GameConfig::default());
        for _ in 0..5 {
            f.spawn_pipe();
        }
        assert_eq!(f.len(), 5);
        f.restart();
        assert!(f.is_empty());
    }

    #[test]
    fn touch_checks_every_pipe() {
        let config = GameConfig::default();
        let f = field(&config);
        let bird = Bird::from_textures([TextureId(0); 4], &config);
        f.insert(Pipe::new(700, 399, 50, false));
        f.touch(&bird);
        assert!(bird.is_alive());

        f.insert(Pipe::new(75, 300, 50, false));
        f.touch(&bird);
        assert!(!bird.is_alive());
    }

    #[test]
    fn detached_field_is_not_spawning() {
        assert!(!field(&GameConfig::default()).is_spawning());
    }
}
