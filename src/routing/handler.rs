//! Route handlers.

use std::sync::Arc;

/// A registered handler: no input, returns the full response body.
pub type Handler = Arc<dyn Fn() -> String + Send + Sync>;

/// Frame a handler's body as a gallery exhibit.
///
/// Purely cosmetic; it does not mark the route as curated.
pub fn exhibit<F>(handler: F) -> impl Fn() -> String + Send + Sync + 'static
where
    F: Fn() -> String + Send + Sync + 'static,
{
    tracing::debug!("Handler framed as exhibit");
    move || format!("~ Museum of Modern Code ~\n{}\n~ Curated exhibit ~", handler())
}
