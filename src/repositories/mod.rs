pub mod note;

pub use note::NoteStore;
