//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and runs the operation against an initialized [`crate::browse::Browser`].

pub mod packs;
pub mod rolltable;
pub mod search;
pub mod sources;
pub mod spells;

pub use packs::execute as packs;
pub use rolltable::execute as rolltable;
pub use search::execute as search;
pub use sources::execute as sources;
pub use spells::execute as spells;
