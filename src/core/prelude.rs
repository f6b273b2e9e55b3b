#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Result};
#[allow(unused_imports)]
pub use tracing::{error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    core::{
        config::*,
        coroutine::{CoroutineId, CoroutineResponse, CoroutineState, Scheduler},
        input::{InputHandler, InputSource},
        level::LevelHost,
        physics::{LayerMask, PhysicsWorld},
        render::{CosmeticState, Renderer, TextOverlay},
        update::UpdateContext,
    },
    util::{
        assert::*,
        gg_float,
        linalg::Vec2,
        log::{error_every_seconds, warn_every_seconds},
    },
};
