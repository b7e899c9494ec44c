use std::any::type_name;

use super::error::{is_fail_fast, Errors};
use super::func::Func;
use crate::Error;

/// Applies `opts` to `receiver` in order.
///
/// The receiver is anything convertible into `Option<&mut T>`: a plain
/// `&mut T`, a `&mut Option<T>`, or `None`. A missing receiver fails with
/// [`Error::NilReceiver`] before any option runs.
///
/// Errors returned by options do not stop the sequence; they are collected
/// into an [`Errors`] aggregate, in order. The first error that is or wraps a
/// [`FailFast`](crate::FailFast) is collected too, and then no further
/// options run. Mutations made by options that already ran are kept.
pub fn apply<'r, 'f, T, R>(
    receiver: R,
    opts: impl IntoIterator<Item = Func<'f, T>>,
) -> Result<(), Error>
where
    T: 'r,
    R: Into<Option<&'r mut T>>,
{
    let Some(receiver) = receiver.into() else {
        let receiver = type_name::<T>();
        tracing::warn!(receiver, "cannot apply options to a nil receiver");
        return Err(Error::NilReceiver { receiver });
    };

    run(receiver, opts).map_err(Error::from)
}

/// Runs `opts` against a receiver that is known to be present.
pub(crate) fn run<'f, T>(
    receiver: &mut T,
    opts: impl IntoIterator<Item = Func<'f, T>>,
) -> Result<(), Errors> {
    let mut errors = Errors::default();

    for (index, opt) in opts.into_iter().enumerate() {
        tracing::trace!(index, "applying option");

        let Err(err) = opt.call(receiver) else {
            continue;
        };

        let escalated = is_fail_fast(&*err);
        tracing::debug!(index, error = %err, escalated, "option failed");
        errors.push(err);

        if escalated {
            tracing::debug!(index, "fail fast, skipping remaining options");
            break;
        }
    }

    errors.into_result()
}
