//! Option functions and the machinery that applies them.

mod apply;
mod default;
mod error;
mod func;

pub use apply::apply;
pub use default::{default, default_with};
pub use error::{BoxError, Errors, FailFast, OptionError, OptionResultExt};
pub use func::{join, Func};
