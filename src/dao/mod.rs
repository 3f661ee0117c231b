/// Persistence of quote games.
pub mod game_store;
/// Backend-agnostic persisted models.
pub mod models;
/// Client side of the external quote provider.
pub mod quote_source;
/// Storage error types shared by every game store.
pub mod storage;
