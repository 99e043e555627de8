//! Service layer providing business-oriented CRUD operations on top of models.
//! - `crud::CrudService` is the port the HTTP layer depends on.
//! - `review` implements it for reviews over a pluggable `ReviewRepository`.
//! - Storage helpers live in `storage`.

pub mod errors;
pub mod crud;
pub mod storage;
pub mod review;
