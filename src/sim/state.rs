//! Shared game state and simulation events

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::hud::PanelVisibility;

/// Life state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Alive,
    /// Input is ignored until a respawn or external reset
    Dead,
}

/// Game-over and pause flags
///
/// Written by the launch controller (game over) and the host (pause);
/// read by the HUD through [`GameFlags::panels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameFlags {
    pub game_over: bool,
    pub paused: bool,
}

impl GameFlags {
    pub fn panels(&self) -> PanelVisibility {
        PanelVisibility::project(self.game_over, self.paused)
    }
}

/// Scene change asked of the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneRequest {
    ReloadCurrent,
    Load(String),
}

/// Things that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    DragStarted { at: Vec2 },
    /// Released below the launch threshold
    DragDropped,
    Launched { impulse: Vec2 },
    Died,
    Respawned { at: Vec2 },
    SceneRequested(SceneRequest),
    /// Reached the finish trigger
    Finished,
}
