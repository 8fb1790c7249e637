#[cfg(feature = "axum")]
mod axum;

#[cfg(feature = "axum")]
pub use self::axum::Axum;
