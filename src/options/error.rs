use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Error type returned by option closures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Marks an option failure that stops the remaining options from running.
///
/// Any error that is, or has in its `source()` chain, a `FailFast` escalates.
/// Callers can therefore attach context on top of it without losing the
/// escalation.
///
/// ```
/// use optparams::{apply, FailFast, Func};
///
/// let mut port = 0u16;
/// let result = apply(&mut port, [
///     Func::new(|_: &mut u16| Err(FailFast::new())),
///     Func::new(|port: &mut u16| {
///         *port = 8080;
///         Ok::<(), FailFast>(())
///     }),
/// ]);
///
/// assert!(result.unwrap_err().is_fail_fast());
/// assert_eq!(port, 0);
/// ```
#[derive(Debug, Default)]
pub struct FailFast {
    cause: Option<BoxError>,
}

impl FailFast {
    /// Creates a bare escalation marker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an escalation marker carrying the error that caused it.
    ///
    /// The cause is exposed through `source()`, so it can still be found in
    /// the aggregate returned by [`apply`](crate::apply).
    pub fn caused_by(cause: impl Into<BoxError>) -> Self {
        Self {
            cause: Some(cause.into()),
        }
    }

    /// Returns the error that caused the escalation, if any.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl fmt::Display for FailFast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "fail fast: {cause}"),
            None => f.write_str("fail fast"),
        }
    }
}

impl StdError for FailFast {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

/// Errors produced by the option constructors of this crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptionError {
    #[error("pointer to field `{field}` in receiver `{receiver}` is nil")]
    MissingField {
        field: &'static str,
        receiver: &'static str,
    },

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl OptionError {
    pub(crate) fn missing_field<T, V>() -> Self {
        Self::MissingField {
            field: std::any::type_name::<V>(),
            receiver: std::any::type_name::<T>(),
        }
    }
}

/// Ordered collection of the errors returned by the options of one
/// [`apply`](crate::apply) call.
///
/// Each error keeps its concrete type. Lookups walk every error's `source()`
/// chain and descend into nested aggregates.
#[derive(Debug, Default)]
pub struct Errors(Vec<BoxError>);

impl Errors {
    /// Number of errors in the aggregate.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no option failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the errors in the order the options returned them.
    pub fn iter(&self) -> std::slice::Iter<'_, BoxError> {
        self.0.iter()
    }

    /// Returns the first error of type `E`, searching wrapped errors too.
    pub fn find<E: StdError + 'static>(&self) -> Option<&E> {
        let mut found = None;
        self.walk(&mut |err| {
            found = err.downcast_ref::<E>();
            found.is_some()
        });
        found
    }

    /// Returns `true` if any error, or any error it wraps, equals `target`.
    pub fn contains<E: StdError + PartialEq + 'static>(&self, target: &E) -> bool {
        self.walk(&mut |err| err.downcast_ref::<E>() == Some(target))
    }

    /// Returns `true` if the sequence was stopped by a [`FailFast`].
    pub fn is_fail_fast(&self) -> bool {
        self.find::<FailFast>().is_some()
    }

    /// Appends an error, flattening nested aggregates so that joined option
    /// groups and nested `apply` calls report the same errors as their
    /// inlined options would.
    pub(crate) fn push(&mut self, err: BoxError) {
        let err = match err.downcast::<Errors>() {
            Ok(nested) => {
                self.0.extend(nested.0);
                return;
            }
            Err(err) => err,
        };

        match err.downcast::<crate::Error>() {
            Ok(nested) => match *nested {
                crate::Error::Options(nested) => self.0.extend(nested.0),
                other => self.0.push(Box::new(other)),
            },
            Err(err) => self.0.push(err),
        }
    }

    pub(crate) fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn walk<'a, F>(&'a self, visit: &mut F) -> bool
    where
        F: FnMut(&'a (dyn StdError + 'static)) -> bool,
    {
        for err in &self.0 {
            if walk_chain(&**err, visit) {
                return true;
            }
        }
        false
    }
}

/// Visits `err` and every error it wraps until `visit` returns `true`.
fn walk_chain<'a, F>(err: &'a (dyn StdError + 'static), visit: &mut F) -> bool
where
    F: FnMut(&'a (dyn StdError + 'static)) -> bool,
{
    let mut link = Some(err);
    while let Some(current) = link {
        if visit(current) {
            return true;
        }
        let nested = current
            .downcast_ref::<Errors>()
            .or_else(|| current.downcast_ref::<crate::Error>()?.errors());
        if let Some(nested) = nested {
            if nested.walk(visit) {
                return true;
            }
        }
        link = current.source();
    }
    false
}

pub(crate) fn is_fail_fast(err: &(dyn StdError + 'static)) -> bool {
    walk_chain(err, &mut |link| link.is::<FailFast>())
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl StdError for Errors {}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a BoxError;
    type IntoIter = std::slice::Iter<'a, BoxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Errors {
    type Item = BoxError;
    type IntoIter = std::vec::IntoIter<BoxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Helpers for shaping errors inside option closures.
///
/// ```
/// use optparams::{apply, Func, OptionResultExt};
///
/// let mut port = 0u16;
/// let err = apply(&mut port, [Func::new(|port: &mut u16| {
///     *port = "http".parse::<u16>().context("invalid port")?;
///     Ok::<(), optparams::BoxError>(())
/// })])
/// .unwrap_err();
///
/// assert!(err.to_string().starts_with("invalid port: "));
/// assert!(!err.is_fail_fast());
/// ```
pub trait OptionResultExt<T> {
    /// Wraps the error with a context message, keeping it as the `source()`.
    fn context(self, context: impl Into<String>) -> Result<T, BoxError>;

    /// Escalates the error so that no further options run.
    fn fail_fast(self) -> Result<T, BoxError>;
}

impl<T, E> OptionResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn context(self, context: impl Into<String>) -> Result<T, BoxError> {
        self.map_err(|source| {
            OptionError::Context {
                context: context.into(),
                source: source.into(),
            }
            .into()
        })
    }

    fn fail_fast(self) -> Result<T, BoxError> {
        self.map_err(|cause| FailFast::caused_by(cause).into())
    }
}
