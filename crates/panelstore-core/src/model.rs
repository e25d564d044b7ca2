pub mod information;
pub mod location;
pub mod record;

pub use information::{PanelInformation, KNOWN_STATUSES};
pub use location::PanelLocation;
pub use record::{PanelRecord, PanelUpdate};
