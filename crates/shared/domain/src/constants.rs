//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Administrator role
pub const ROLE_ADMIN: &str = "admin";

/// Project manager role
pub const ROLE_MANAGER: &str = "manager";

/// Developer role
pub const ROLE_DEVELOPER: &str = "developer";

// =============================================================================
// Task Priorities & Statuses
// =============================================================================

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";

pub const STATUS_TODO: &str = "todo";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_DONE: &str = "done";

// =============================================================================
// Identifiers & Dates
// =============================================================================

/// Maximum identifier length (fits the `VARCHAR(64)` key columns)
pub const MAX_ID_LENGTH: usize = 64;

/// The only accepted date-only layout (`YYYY-MM-DD`)
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

// =============================================================================
// Confirmation Messages
// =============================================================================

pub const USER_CREATED: &str = "user created";
pub const TASK_CREATED: &str = "task created";
pub const PROJECT_CREATED: &str = "project created";
