/// Intent aggregation and key-to-command mapping
use std::collections::HashSet;

use glam::Vec2;

/// Horizontal movement intents, as unit directions in the body's frame:
/// x is forward/back, y is right/left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkDir {
    Front,
    Back,
    Left,
    Right,
}

impl WalkDir {
    pub fn vector(self) -> Vec2 {
        match self {
            WalkDir::Front => Vec2::new(1.0, 0.0),
            WalkDir::Back => Vec2::new(-1.0, 0.0),
            WalkDir::Right => Vec2::new(0.0, 1.0),
            WalkDir::Left => Vec2::new(0.0, -1.0),
        }
    }
}

/// Vertical movement intents, as signed scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlyDir {
    Up,
    Down,
}

impl FlyDir {
    pub fn sign(self) -> f32 {
        match self {
            FlyDir::Up => 1.0,
            FlyDir::Down => -1.0,
        }
    }
}

/// Set of currently-active movement intents, sampled once per tick by the
/// mover. Pure state container: mutated by discrete input events, no
/// per-frame logic of its own.
#[derive(Default)]
pub struct IntentState {
    walk: HashSet<WalkDir>,
    fly: HashSet<FlyDir>,
    jump: bool,
}

impl IntentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a walk direction; already-active directions are kept as-is.
    pub fn start_walk(&mut self, dir: WalkDir) {
        self.walk.insert(dir);
    }

    /// Remove a walk direction, or clear the whole set with `None`.
    /// Removing an absent direction is a no-op.
    pub fn stop_walk(&mut self, dir: Option<WalkDir>) {
        match dir {
            Some(dir) => {
                self.walk.remove(&dir);
            }
            None => self.walk.clear(),
        }
    }

    pub fn start_fly(&mut self, dir: FlyDir) {
        self.fly.insert(dir);
    }

    pub fn stop_fly(&mut self, dir: Option<FlyDir>) {
        match dir {
            Some(dir) => {
                self.fly.remove(&dir);
            }
            None => self.fly.clear(),
        }
    }

    /// Arm the jump flag. Idempotent while already armed.
    pub fn trigger_jump(&mut self) {
        self.jump = true;
    }

    /// Clear the jump flag; the mover calls this once per processed jump.
    pub fn consume_jump(&mut self) {
        self.jump = false;
    }

    pub fn jump_pending(&self) -> bool {
        self.jump
    }

    pub fn walking(&self) -> bool {
        !self.walk.is_empty()
    }

    pub fn flying(&self) -> bool {
        !self.fly.is_empty()
    }

    /// Net horizontal intent: the sum of all active walk directions.
    /// Opposite directions cancel; diagonals come out as component sums.
    pub fn walk_vector(&self) -> Vec2 {
        self.walk.iter().map(|d| d.vector()).sum()
    }

    /// Net vertical sign: 0.0 when up and down are both (or neither) held.
    pub fn fly_sign(&self) -> f32 {
        self.fly.iter().map(|d| d.sign()).sum()
    }
}

/// Discrete input commands, produced by the key bindings and routed into
/// the intent state by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartWalk(WalkDir),
    StopWalk(WalkDir),
    StartFly(FlyDir),
    StopFly(FlyDir),
    Jump,
    Quit,
}

/// Key mapping configuration. Keys are named the way the windowing layer
/// reports them ("w", " ", "Escape").
#[derive(Clone)]
pub struct KeyBindings {
    pub front: String,
    pub back: String,
    pub left: String,
    pub right: String,
    pub jump: String,
    pub fly_up: String,
    pub fly_down: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            front: "w".to_string(),
            back: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
            jump: " ".to_string(),
            fly_up: "e".to_string(),
            fly_down: "q".to_string(),
            quit: "Escape".to_string(),
        }
    }
}

impl KeyBindings {
    fn walk_dir(&self, key: &str) -> Option<WalkDir> {
        if key == self.front {
            Some(WalkDir::Front)
        } else if key == self.back {
            Some(WalkDir::Back)
        } else if key == self.left {
            Some(WalkDir::Left)
        } else if key == self.right {
            Some(WalkDir::Right)
        } else {
            None
        }
    }

    fn fly_dir(&self, key: &str) -> Option<FlyDir> {
        if key == self.fly_up {
            Some(FlyDir::Up)
        } else if key == self.fly_down {
            Some(FlyDir::Down)
        } else {
            None
        }
    }

    pub fn on_key_down(&self, key: &str) -> Option<Command> {
        if let Some(dir) = self.walk_dir(key) {
            return Some(Command::StartWalk(dir));
        }
        if let Some(dir) = self.fly_dir(key) {
            return Some(Command::StartFly(dir));
        }
        if key == self.jump {
            return Some(Command::Jump);
        }
        if key == self.quit {
            return Some(Command::Quit);
        }
        None
    }

    pub fn on_key_up(&self, key: &str) -> Option<Command> {
        if let Some(dir) = self.walk_dir(key) {
            return Some(Command::StopWalk(dir));
        }
        if let Some(dir) = self.fly_dir(key) {
            return Some(Command::StopFly(dir));
        }
        None
    }
}
