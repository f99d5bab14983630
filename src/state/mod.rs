mod editor_state;
mod persistence;

pub use editor_state::EditorState;
pub use persistence::{
    Autosave,
    Draft,
    DraftMeta,
    DraftStore,
    PersistenceError,
    PersistenceResult,
};
