//! Business API model types.
//!
//! Plain data-transfer records mirroring the wire format: PascalCase field
//! names, every optional field omitted when `None`. "Required" fields are
//! enforced by the server, which answers 400 with a "`{Field} not provided`"
//! message; the doc comments note them.

mod address;
mod asset;
mod lookup;
mod restaurant;
mod retail_location;
mod user;

pub use address::*;
pub use asset::*;
pub use lookup::*;
pub use restaurant::*;
pub use retail_location::*;
pub use user::*;
