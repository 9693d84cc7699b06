mod announcement;
mod claim_progress;
mod layout;
mod wallet_button;

pub use announcement::Announcement;
pub use claim_progress::{ClaimProgress, Figure};
pub use layout::Layout;
pub use wallet_button::WalletButton;
