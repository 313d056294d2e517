//! Command handlers (create/update/delete)
//!
//! Create and update follow enrich-then-persist-with-fallback:
//! 1. If the text input is non-blank, call the enricher.
//! 2. On success, merge the structured result into the entity.
//! 3. On failure, log and keep the existing structured fields (none on create).
//! 4. Persist unconditionally.
//!
//! Updates re-enrich only when the text actually changed. Updating a
//! missing id is `Error::NotFound` for both resources; deleting one is a
//! successful no-op.

pub mod todos;
pub mod user_details;

pub use todos::{create_todo, delete_todo, update_todo, CreateTodo, UpdateTodo};
pub use user_details::{
    create_user_details, delete_user_details, update_user_details, CreateUserDetails,
    UpdateUserDetails,
};

pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
