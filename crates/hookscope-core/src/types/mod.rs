pub mod config;
pub mod hook_type;
pub mod object_id;
pub mod ref_update;
pub mod scope;

pub use config::{Check, CheckConfig, HookConfig};
pub use hook_type::{HookType, ScopeKind};
pub use object_id::ObjectId;
pub use ref_update::RefUpdate;
pub use scope::{ChangeScope, CommitRange, ResolvedScope};
