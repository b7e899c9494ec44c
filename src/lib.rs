//! Composable, fallible option functions for configuring values in place.
//!
//! A constructor builds its value from the required arguments, appends its
//! own [`default`]s to the caller's [`Func`] options, and hands everything to
//! [`apply`]. Option errors are collected rather than returned one at a time,
//! unless an option escalates with [`FailFast`].
//!
//! ```
//! use optparams::{apply, default, FailFast, Func};
//!
//! #[derive(Debug, Default)]
//! struct Pool {
//!     name: String,
//!     size: usize,
//! }
//!
//! fn with_size(size: usize) -> Func<'static, Pool> {
//!     Func::new(move |pool: &mut Pool| {
//!         if size == 0 {
//!             return Err(FailFast::caused_by("pool size must be positive"));
//!         }
//!         pool.size = size;
//!         Ok(())
//!     })
//! }
//!
//! fn new_pool(name: &str, mut opts: Vec<Func<'_, Pool>>) -> optparams::Result<Pool> {
//!     let mut pool = Pool { name: name.to_owned(), ..Pool::default() };
//!     opts.push(default(|p: &mut Pool| Some(&mut p.size), 4));
//!     apply(&mut pool, opts)?;
//!     Ok(pool)
//! }
//!
//! assert_eq!(new_pool("db", vec![])?.size, 4);
//! assert_eq!(new_pool("db", vec![with_size(16)])?.size, 16);
//!
//! let err = new_pool("db", vec![with_size(0)]).unwrap_err();
//! assert!(err.is_fail_fast());
//! assert_eq!(err.to_string(), "fail fast: pool size must be positive");
//! # Ok::<(), optparams::Error>(())
//! ```

pub mod options;
mod error;

pub use error::{Error, Result};
pub use options::{
    apply, default, default_with, join, BoxError, Errors, FailFast, Func, OptionError,
    OptionResultExt,
};
