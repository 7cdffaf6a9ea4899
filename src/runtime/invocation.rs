//! Glue between the command framework and the locale context.
//!
//! The framework that dispatches commands is not part of this crate; it
//! only has to describe each request through [`Invocation`].

use std::{collections::BTreeMap, future::Future};

use crate::runtime::context::{current_locale, with_locale};
use crate::runtime::translator::Translator;

/// A request being handled: a slash command, a message command, a button.
pub trait Invocation {
    /// Locale chosen by the invoking user, if the platform reports one.
    fn locale(&self) -> Option<&str>;

    /// Preferred locale of the guild the request came from.
    fn guild_locale(&self) -> Option<&str> {
        None
    }
}

/// Which preference decides the locale of a reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocaleSource {
    /// The invoking user's client locale.
    #[default]
    User,
    /// The guild's preferred locale, for replies visible to everyone.
    Guild,
}

/// Locale to reply in, falling back to the ambient locale when the
/// invocation does not carry one.
pub fn invocation_locale<I>(invocation: &I, source: LocaleSource) -> String
where
    I: Invocation + ?Sized,
{
    let locale = match source {
        LocaleSource::User => invocation.locale(),
        LocaleSource::Guild => invocation.guild_locale(),
    };
    locale
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .unwrap_or_else(current_locale)
}

/// Run a command handler with the invoking user's locale as its ambient
/// locale.
pub fn localized<I, F>(invocation: &I, handler: F) -> impl Future<Output = F::Output>
where
    I: Invocation + ?Sized,
    F: Future,
{
    with_locale(invocation_locale(invocation, LocaleSource::User), handler)
}

/// Per-locale name and description of a command or command group, in the
/// shape command registration endpoints expect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Localizations {
    pub name: BTreeMap<String, String>,
    pub description: BTreeMap<String, String>,
}

impl Localizations {
    pub fn new(translator: &Translator, name: &str, description: &str) -> Self {
        Self {
            name: translator.resolve_all(name),
            description: translator.resolve_all(description),
        }
    }
}
