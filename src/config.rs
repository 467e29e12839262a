//! Run configuration, loaded from a JSON file. Every field has a default, so an
//! empty object (`{}`) is a valid configuration.

use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::key::Key;
use crate::count::Strategy;
use crate::error::{KeypadError, Result};
use crate::keypad::graph::MoveGraph;
use crate::keypad::layout::KeypadLayout;

/// Where the move graph comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphSource {
    /// The reference adjacency table.
    #[default]
    Table,
    /// Knight steps over the keypad layout.
    Derived,
    /// An explicit table, one neighbor list per key.
    Custom(Vec<Vec<Key>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Sequence length reported by the display, in keys visited.
    pub moves: u64,
    pub strategy: Strategy,
    pub graph: GraphSource,
    /// Target frame rate of the display loop.
    pub fps: u32,
    /// Stop after this many frames; `None` runs until closed.
    pub frames: Option<u64>,
    pub canvas: CanvasConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            moves: 2,
            strategy: Strategy::default(),
            graph: GraphSource::default(),
            fps: 60,
            frames: None,
            canvas: CanvasConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<RunConfig> {
        let config_err = |reason: String| KeypadError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let bytes = std::fs::read(path).map_err(|e| config_err(e.to_string()))?;
        let cfg: RunConfig =
            serde_json::from_slice(&bytes).map_err(|e| config_err(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.moves == 0 {
            return Err(KeypadError::InvalidArgument {
                name: "moves",
                value: 0,
                reason: "at least one move is required",
            });
        }
        if self.fps == 0 {
            return Err(KeypadError::InvalidArgument {
                name: "fps",
                value: 0,
                reason: "frame rate must be positive",
            });
        }
        Ok(())
    }

    /// The configured graph. The reference table is borrowed, never copied.
    pub fn build_graph(&self, layout: &KeypadLayout) -> Result<Cow<'static, MoveGraph>> {
        Ok(match &self.graph {
            GraphSource::Table => Cow::Borrowed(MoveGraph::standard()),
            GraphSource::Derived => Cow::Owned(MoveGraph::derive(layout)),
            GraphSource::Custom(adj) => Cow::Owned(MoveGraph::from_adjacency(adj.clone())?),
        })
    }
}
