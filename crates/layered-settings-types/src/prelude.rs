pub use crate::error::{Error, LsResult};
pub use crate::types::{EntityId, GroupId, LayerId, SettingId};

pub use tracing::{debug, debug_span, error, info, info_span, warn};

// vim: ts=4
