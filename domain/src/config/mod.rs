//! Toolkit configuration: permission grants plus runtime context.
//!
//! ```json
//! {
//!   "actions": { "messaging": { "create": true, "read": true } },
//!   "context": { "env": "dev" }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::permission::Actions;

/// Configuration consumed by every framework adapter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    /// Grant set. `None` exposes every tool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Actions>,
    pub context: Context,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actions(mut self, actions: Actions) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }
}
