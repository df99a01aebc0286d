//! Build pipeline state machine.
//!
//! ```text
//! Loading ──► Rendering ──► Emitting ──► Done
//!    │            │            │
//!    └────────────┴────────────┴──► Failed { at }
//! ```
//!
//! States only move forward. `Done` and `Failed` are terminal and absorb
//! every further event.

use std::fmt;

/// A working stage of the pipeline, i.e. a state that can still fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// Waiting on the data source.
    Loading,
    /// Waiting on the template engine.
    Rendering,
    /// Waiting on the document renderer.
    Emitting,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Loading => "loading",
            Self::Rendering => "rendering",
            Self::Emitting => "emitting",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Loading,
    Rendering,
    Emitting,
    Done,
    Failed { at: PipelineStage },
}

impl PipelineState {
    /// Every run starts here.
    pub const fn initial() -> Self {
        Self::Loading
    }

    /// The current stage finished successfully.
    pub fn advance(self) -> Self {
        match self {
            Self::Loading => Self::Rendering,
            Self::Rendering => Self::Emitting,
            Self::Emitting => Self::Done,
            terminal => terminal,
        }
    }

    /// The current stage failed.
    pub fn fail(self) -> Self {
        match self.stage() {
            Some(at) => Self::Failed { at },
            None => self,
        }
    }

    /// The working stage this state represents, if it is not terminal.
    pub fn stage(self) -> Option<PipelineStage> {
        match self {
            Self::Loading => Some(PipelineStage::Loading),
            Self::Rendering => Some(PipelineStage::Rendering),
            Self::Emitting => Some(PipelineStage::Emitting),
            Self::Done | Self::Failed { .. } => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.stage().is_none()
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => f.write_str("done"),
            Self::Failed { at } => write!(f, "failed while {at}"),
            active => match active.stage() {
                Some(stage) => write!(f, "{stage}"),
                None => Ok(()),
            },
        }
    }
}
