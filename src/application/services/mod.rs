mod notes_service;
pub mod prompts;
mod upload_registry;

pub use notes_service::{NotesError, NotesService};
pub use upload_registry::UploadRegistry;
