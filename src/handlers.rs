pub mod accounts;
pub mod auth;
pub mod cashier;
pub mod dashboard;
pub mod health;
pub mod products;
pub mod reports;

use crate::{middleware::i18n::Locale, models::views::ViewResponse, services::view_state::Loaded};

// Envelope {data, stale, error} a partir de uma carga de view
pub(crate) fn view_response<T, V>(
    loaded: Loaded<T>,
    locale: &Locale,
    project: impl FnOnce(&T) -> V,
) -> ViewResponse<V> {
    let data = project(&loaded.snapshot);
    match loaded.failure {
        Some(err) => ViewResponse::stale(data, err.localized(locale)),
        None => ViewResponse::fresh(data),
    }
}
