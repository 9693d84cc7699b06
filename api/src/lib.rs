pub mod amount;
pub mod calls;
pub mod config;
pub mod consts;
pub mod dispatch;
pub mod error;
pub mod identity;
pub mod reads;
pub mod rpc;
pub mod state;
pub mod status;
pub mod timer;
pub mod tracker;

pub mod prelude {
    pub use crate::amount::*;
    pub use crate::calls::*;
    pub use crate::config::*;
    pub use crate::consts::*;
    pub use crate::dispatch::*;
    pub use crate::error::*;
    pub use crate::identity::*;
    pub use crate::reads::*;
    pub use crate::rpc::*;
    pub use crate::state::*;
    pub use crate::status::*;
    pub use crate::timer::*;
    pub use crate::tracker::*;
}
