//! External collaborators around the `eth2_keystore` core: the conversion
//! pipeline, the naming-mode resolver, and the path validator (spec.md §1,
//! §4.7, §4.8, §6).

mod convert;
mod error;
mod naming;
mod validate;

pub use crate::convert::{run, Config, KdfFunction, Summary};
pub use crate::error::Error;
pub use crate::naming::NamingMode;
pub use crate::validate::{ensure_readable_dir, ensure_writable_dir_created};
