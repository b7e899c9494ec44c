use std::fmt;

use super::apply::run;
use super::error::BoxError;

/// A single fallible option that configures a receiver of type `T` in place.
///
/// `'a` bounds whatever the option captures, so options and receivers may
/// borrow from the caller. Options are consumed when applied. They may mutate any part of the
/// receiver, and any mutation they make is kept even if a later option fails.
///
/// The typical usage is to accept options as the final parameter of a
/// constructor:
///
/// ```
/// use optparams::{apply, default, Func};
///
/// #[derive(Debug, Default)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// fn with_port(port: u16) -> Func<'static, Server> {
///     Func::new(move |server: &mut Server| {
///         if port == 0 {
///             return Err("port must not be zero");
///         }
///         server.port = port;
///         Ok(())
///     })
/// }
///
/// fn new_server(host: &str, opts: Vec<Func<'_, Server>>) -> optparams::Result<Server> {
///     let mut server = Server { host: host.to_owned(), ..Server::default() };
///
///     let mut opts = opts;
///     opts.push(default(|s: &mut Server| Some(&mut s.port), 8080));
///
///     apply(&mut server, opts)?;
///     Ok(server)
/// }
///
/// let server = new_server("localhost", vec![with_port(9000)])?;
/// assert_eq!(server.port, 9000);
///
/// let server = new_server("localhost", vec![])?;
/// assert_eq!(server.port, 8080);
/// # Ok::<(), optparams::Error>(())
/// ```
#[must_use = "options do nothing until they are applied"]
pub struct Func<'a, T>(Box<dyn FnOnce(&mut T) -> Result<(), BoxError> + 'a>);

impl<'a, T: 'a> Func<'a, T> {
    /// Wraps a closure as an option.
    ///
    /// The closure may return any error convertible into [`BoxError`],
    /// including [`FailFast`](crate::FailFast) to stop the remaining options.
    pub fn new<F, E>(f: F) -> Self
    where
        F: FnOnce(&mut T) -> Result<(), E> + 'a,
        E: Into<BoxError> + 'a,
    {
        Self(Box::new(move |receiver: &mut T| f(receiver).map_err(Into::into)))
    }
}

impl<T> Func<'_, T> {
    /// Invokes the option against `receiver`.
    pub fn call(self, receiver: &mut T) -> Result<(), BoxError> {
        (self.0)(receiver)
    }
}

impl<T> fmt::Debug for Func<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Func").finish_non_exhaustive()
    }
}

/// Packages a sequence of options into a single option.
///
/// Applying the joined option runs `opts` in order against the same receiver,
/// exactly as if they had been passed inline: their errors are flattened into
/// the outer aggregate, and a [`FailFast`](crate::FailFast) inside the group
/// also stops the outer sequence. An empty join succeeds without touching the
/// receiver.
pub fn join<'a, T: 'a>(opts: impl IntoIterator<Item = Func<'a, T>>) -> Func<'a, T> {
    let opts: Vec<Func<'a, T>> = opts.into_iter().collect();
    Func::new(move |receiver: &mut T| run(receiver, opts))
}
