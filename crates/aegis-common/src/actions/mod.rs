use serde::{Deserialize, Serialize};

mod action_enum;
mod names;

pub use action_enum::*;

/// Window edge or corner grabbed for an interactive resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindowEdge {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    #[default]
    Se,
    Sw,
}

impl WindowEdge {
    /// Parse the short edge names used by page script; unknown names fall
    /// back to the south-east corner.
    pub fn parse(s: &str) -> Self {
        match s {
            "n" => Self::N,
            "s" => Self::S,
            "e" => Self::E,
            "w" => Self::W,
            "ne" => Self::Ne,
            "nw" => Self::Nw,
            "sw" => Self::Sw,
            _ => Self::Se,
        }
    }
}
