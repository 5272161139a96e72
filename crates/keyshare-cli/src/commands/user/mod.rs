//! Account commands: key lookups, device management, passphrase changes.

mod devices;
mod lookup;
mod passphrase;

pub use devices::{handle_device_delete, handle_device_list};
pub use lookup::handle_lookup;
pub use passphrase::handle_change_passphrase;
