use serde::{Deserialize, Serialize};

/// Region value meaning "no region selected yet".
pub const UNSET_REGION: i32 = -1;
/// Region value selecting worldwide data.
pub const GLOBAL_REGION: i32 = 0;
/// Region value selecting data around a [`LocalReference`].
pub const LOCAL_REGION: i32 = -2;

/// Raster cell anchoring a local-region query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalReference {
    pub x: i32,
    pub y: i32,
}

impl LocalReference {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
