pub mod body;
pub mod clock;
pub mod collision;
pub mod config;
pub mod gravity;
pub mod projectile;
pub mod sim_loop;
pub mod state;

pub use body::*;
pub use clock::*;
pub use collision::*;
pub use config::SimConfig;
pub use gravity::*;
pub use projectile::*;
pub use sim_loop::*;
pub use state::*;
