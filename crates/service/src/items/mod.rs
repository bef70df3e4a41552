//! Items module: three-layer architecture (domain, repository, service).
//!
//! `ItemService` maps the five CRUD operations onto the four repository calls.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{Item, ItemInput};
pub use repository::ItemRepository;
pub use service::ItemService;
