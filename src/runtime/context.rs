//! Ambient locale for the operation currently being handled.
//!
//! Each request handler runs inside [`with_locale`] (or
//! [`sync_with_locale`]); any code it calls reads the locale back with
//! [`current_locale`] without threading it through arguments. The value
//! is task-local, so handlers running concurrently never observe each
//! other's override. Outside any scope the process-wide default applies.

use std::{
    future::Future,
    sync::{LazyLock, PoisonError, RwLock},
};

use crate::error::Error;
use crate::locale::{self, BASE_LOCALE};

tokio::task_local! {
    static CURRENT_LOCALE: String;
}

static DEFAULT_LOCALE: LazyLock<RwLock<String>> =
    LazyLock::new(|| RwLock::new(BASE_LOCALE.to_string()));

/// Locale used when no per-operation override is active.
pub fn default_locale() -> String {
    DEFAULT_LOCALE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide fallback locale.
///
/// Fails with [`Error::InvalidLocale`] when `locale` is not a recognized tag.
pub fn set_default_locale(locale: &str) -> Result<(), Error> {
    let locale = locale::validate(locale)?;
    *DEFAULT_LOCALE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = locale;
    Ok(())
}

/// Locale in effect for the calling operation.
pub fn current_locale() -> String {
    CURRENT_LOCALE
        .try_with(Clone::clone)
        .unwrap_or_else(|_| default_locale())
}

/// Run `body` with `locale` as its ambient locale.
///
/// The override is visible to everything `body` awaits or calls and ends
/// when `body` completes, however it completes.
pub fn with_locale<F>(locale: impl Into<String>, body: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    CURRENT_LOCALE.scope(locale.into(), body)
}

/// Synchronous counterpart of [`with_locale`].
pub fn sync_with_locale<F, R>(locale: impl Into<String>, body: F) -> R
where
    F: FnOnce() -> R,
{
    CURRENT_LOCALE.sync_scope(locale.into(), body)
}
