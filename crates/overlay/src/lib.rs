pub mod artifact;
pub mod group;
pub mod state;
pub mod symbology;

pub use artifact::*;
pub use group::*;
pub use state::*;
pub use symbology::*;
