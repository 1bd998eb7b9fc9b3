//! Repositories for the resource tables.
//!
//! One generic [`ResourceRepo`] serves every resource; the aliases below
//! name the concrete instances.

mod resource_repo;

pub use resource_repo::ResourceRepo;

use crate::models::book::Book;
use crate::models::news::News;
use crate::models::note::Note;

pub type BookRepo = ResourceRepo<Book>;
pub type NewsRepo = ResourceRepo<News>;
pub type NoteRepo = ResourceRepo<Note>;
