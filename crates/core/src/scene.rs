//! Scene: the fixed-tick simulation loop.
//!
//! The scene owns the bird and the pipe field. [`Scene::run`] drives it:
//! every iteration handles exactly one thing, either a pending input event or
//! one tick (update, collide, paint). Input wins ties.
//!
//! ```text
//! Running ──bird dead──▶ GameOver ──pause elapsed──▶ Running
//!    │                      │
//!    └────────Quit──────────┴──▶ Terminating
//! ```

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::bird::Bird;
use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::pipe::PipeField;
use crate::render::{
    Canvas, TextureLoader, BACKGROUND_TEXTURE, GAME_OVER_TEXTURE, PIPE_TEXTURE,
};
use crate::snapshot::SceneSnapshot;
use crate::types::{Flip, InputEvent, Rect, TextureId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneState {
    Running,
    /// The bird died; the indicator is up until the pause elapses.
    GameOver,
    Terminating,
}

/// What a finished session did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Paint passes issued.
    pub frames: u64,
    /// Rounds that ended in a death.
    pub rounds: u32,
}

pub struct Scene {
    config: GameConfig,
    background: TextureId,
    game_over: TextureId,
    bird: Bird,
    pipes: PipeField,
    state: SceneState,
    frames: u64,
    rounds: u32,
}

impl Scene {
    /// Load every texture and start the pipe spawner on the current tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// [`GameError::Resource`] when a texture fails to load and
    /// [`GameError::NoRuntime`] when called outside a runtime. Either way
    /// nothing has been spawned.
    pub fn new<L: TextureLoader + ?Sized>(loader: &mut L, config: &GameConfig) -> GameResult<Self> {
        let background = loader.load_texture(BACKGROUND_TEXTURE)?;
        let game_over = loader.load_texture(GAME_OVER_TEXTURE)?;
        let pipe_texture = loader.load_texture(PIPE_TEXTURE)?;
        let bird = Bird::new(loader, config)?;
        let runtime = Handle::try_current().map_err(|_| GameError::NoRuntime)?;
        let pipes = PipeField::spawn_on(&runtime, pipe_texture, config);

        info!(
            tick_ms = config.tick.as_millis() as u64,
            spawn_ms = config.spawn_interval.as_millis() as u64,
            seed = ?config.seed,
            "scene created"
        );

        Ok(Self {
            config: config.clone(),
            background,
            game_over,
            bird,
            pipes,
            state: SceneState::Running,
            frames: 0,
            rounds: 0,
        })
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &PipeField {
        &self.pipes
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            frames: self.frames,
            rounds: self.rounds,
        }
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            frames: self.frames,
            rounds: self.rounds,
            state: self.state,
            bird: self.bird.snapshot(),
            pipes: self.pipes.snapshot(),
        }
    }

    /// Apply one input event and return the resulting state.
    ///
    /// Jumps only count while running.
    pub fn handle(&mut self, event: InputEvent) -> SceneState {
        match event {
            InputEvent::Jump if self.state == SceneState::Running => self.bird.jump(),
            InputEvent::Quit => self.state = SceneState::Terminating,
            InputEvent::Jump | InputEvent::Other => {}
        }
        self.state
    }

    /// One simulation step: advance the bird and the pipes, collide, check for death.
    pub fn step(&mut self) -> SceneState {
        if self.state != SceneState::Running {
            return self.state;
        }

        self.bird.update();
        self.pipes.update();
        self.pipes.touch(&self.bird);

        if !self.bird.is_alive() {
            self.rounds += 1;
            self.state = SceneState::GameOver;
            info!(round = self.rounds, frames = self.frames, "bird died");
        }
        self.state
    }

    /// Reset the bird and the pipes for a new round.
    pub fn restart(&mut self) {
        self.bird.restart();
        self.pipes.restart();
        if self.state == SceneState::GameOver {
            self.state = SceneState::Running;
        }
        debug!(round = self.rounds + 1, "round started");
    }

    /// One paint pass: background, bird, pipes, and the game-over indicator
    /// when it is up.
    pub fn paint<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> GameResult<()> {
        let screen = Rect::new(0, 0, self.config.width, self.config.height);
        canvas.clear().map_err(GameError::render("frame"))?;
        canvas
            .draw(self.background, None, screen, Flip::None)
            .map_err(GameError::render("background"))?;
        self.bird.paint(canvas)?;
        self.pipes.paint(canvas)?;

        if self.state == SceneState::GameOver {
            let banner = Rect::new(screen.w / 4, screen.h / 3, screen.w / 2, screen.h / 3);
            canvas
                .draw(self.game_over, None, banner, Flip::None)
                .map_err(GameError::render("game-over indicator"))?;
        }

        canvas.present().map_err(GameError::render("frame"))?;
        self.frames += 1;
        Ok(())
    }

    /// Drive the scene until a quit event, a closed input channel or a paint
    /// failure. The spawner is stopped before this returns.
    pub async fn run<C: Canvas + ?Sized>(
        mut self,
        mut events: mpsc::UnboundedReceiver<InputEvent>,
        canvas: &mut C,
    ) -> GameResult<SessionSummary> {
        let mut ticker = time::interval(self.config.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let result = self.drive(&mut events, &mut ticker, canvas).await;
        self.state = SceneState::Terminating;
        self.pipes.shutdown().await;

        let summary = self.summary();
        match &result {
            Ok(()) => info!(frames = summary.frames, rounds = summary.rounds, "session ended"),
            Err(err) => error!(error = %err, frames = summary.frames, "session failed"),
        }
        result.map(|()| summary)
    }

    async fn drive<C: Canvas + ?Sized>(
        &mut self,
        events: &mut mpsc::UnboundedReceiver<InputEvent>,
        ticker: &mut Interval,
        canvas: &mut C,
    ) -> GameResult<()> {
        loop {
            match self.state {
                SceneState::Terminating => return Ok(()),
                SceneState::GameOver => {
                    self.paint(canvas)?;
                    self.pause(events).await;
                    ticker.reset();
                }
                SceneState::Running => {
                    tokio::select! {
                        biased;
                        event = events.recv() => match event {
                            Some(event) => {
                                self.handle(event);
                            }
                            None => {
                                debug!("input closed");
                                self.state = SceneState::Terminating;
                            }
                        },
                        _ = ticker.tick() => {
                            if self.step() == SceneState::Running {
                                self.paint(canvas)?;
                            }
                        }
                    }
                }
            }
        }
    }

    /// Hold the game-over indicator for the configured pause, then restart.
    /// Quit still ends the session; other input is dropped.
    async fn pause(&mut self, events: &mut mpsc::UnboundedReceiver<InputEvent>) {
        let deadline = time::sleep_until(Instant::now() + self.config.game_over_pause);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                biased;
                event = events.recv() => match event {
                    Some(InputEvent::Quit) | None => {
                        self.state = SceneState::Terminating;
                        return;
                    }
                    Some(_) => {}
                },
                _ = &mut deadline => {
                    self.restart();
                    return;
                }
            }
        }
    }
}
