//! Business logic services layer

pub mod group_service;
pub mod inheritance_service;
pub mod reconciler;
pub mod role_sync_service;

pub use group_service::{GroupMutations, GroupService};
pub use inheritance_service::TenantInheritanceResolver;
pub use reconciler::{
    CreationOutcome, GroupCreationReconciler, GroupUpdateReconciler, UpdateOutcome,
};
pub use role_sync_service::RoleSyncService;
