use std::any::type_name;

use super::error::OptionError;
use super::func::Func;

/// Returns an option that sets a field to `value` unless it is already set.
///
/// `field` projects the receiver onto the field. The field counts as unset
/// when it equals `V::default()`, so a field explicitly set to its default
/// value is overwritten too. If `field` returns `None`, the option fails with
/// [`OptionError::MissingField`].
///
/// The projection is not checked: it may point anywhere reachable from the
/// receiver.
///
/// Constructors append their defaults after the caller's options so that the
/// caller's settings are visible when the defaults run:
///
/// ```
/// use optparams::{apply, default, Func};
///
/// #[derive(Default)]
/// struct Client {
///     endpoint: String,
///     retries: u32,
/// }
///
/// let mut client = Client::default();
/// let opts = vec![
///     Func::new(|c: &mut Client| {
///         c.endpoint = "https://example.com".into();
///         Ok::<(), optparams::BoxError>(())
///     }),
///     default(|c: &mut Client| Some(&mut c.endpoint), String::from("http://localhost")),
///     default(|c: &mut Client| Some(&mut c.retries), 3),
/// ];
///
/// apply(&mut client, opts)?;
/// assert_eq!(client.endpoint, "https://example.com");
/// assert_eq!(client.retries, 3);
/// # Ok::<(), optparams::Error>(())
/// ```
pub fn default<'a, T, V, F>(field: F, value: V) -> Func<'a, T>
where
    T: 'a,
    V: Default + PartialEq + 'a,
    F: FnOnce(&mut T) -> Option<&mut V> + 'a,
{
    default_with(field, move || value)
}

/// Like [`default`], but the value is produced by `factory`.
///
/// `factory` runs only when the field is unset, so expensive or
/// side-effecting defaults are skipped when the caller already set the field.
pub fn default_with<'a, T, V, F, D>(field: F, factory: D) -> Func<'a, T>
where
    T: 'a,
    V: Default + PartialEq + 'a,
    F: FnOnce(&mut T) -> Option<&mut V> + 'a,
    D: FnOnce() -> V + 'a,
{
    Func::new(move |receiver: &mut T| {
        let Some(slot) = field(receiver) else {
            return Err(OptionError::missing_field::<T, V>());
        };

        if *slot == V::default() {
            tracing::trace!(field = type_name::<V>(), "applying default");
            *slot = factory();
        } else {
            tracing::trace!(field = type_name::<V>(), "field already set, keeping it");
        }
        Ok(())
    })
}
