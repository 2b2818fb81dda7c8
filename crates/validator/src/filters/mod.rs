//! Built-in filter kinds
//!
//! Each kind is a plain struct over a serde options struct, implementing
//! [`Coerce`](crate::foundation::Coerce) and
//! [`Configurable`](crate::foundation::Configurable):
//!
//! - **Scalars**: [`BoolFilter`], [`IntFilter`], [`FloatFilter`]
//! - **Text**: [`StringFilter`], [`RegexpFilter`]
//! - **Formats**: [`DateFilter`], [`EmailFilter`], [`UrlFilter`], [`IpFilter`]
//! - **Sets**: [`EnumFilter`]

pub mod boolean;
pub mod date;
pub mod email;
pub mod enums;
pub mod float;
pub mod int;
pub mod ip;
pub mod regexp;
pub mod string;
pub mod url;

pub use boolean::{BoolFilter, BoolOptions};
pub use date::{DateFilter, DateFormat, DateOptions};
pub use email::{EmailFilter, EmailOptions};
pub use enums::{EnumFilter, EnumOptions};
pub use float::{FloatFilter, FloatOptions};
pub use int::{IntFilter, IntOptions};
pub use ip::{IpFilter, IpOptions};
pub use regexp::{RegexpFilter, RegexpOptions};
pub use string::{StringFilter, StringOptions};
pub use self::url::{UrlFilter, UrlOptions};
