use std::time::Duration;

/// Decimal places of both the legacy and the migrated token.
pub const TOKEN_DECIMALS: u8 = 18;

/// Interval between calls-status queries while a batch is in flight.
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// How long the app follows a batch before reporting it as still pending.
pub const CONFIRMATION_DEADLINE: Duration = Duration::from_secs(300);

/// Interval of the background refresh of on-chain reads.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(2000);

/// Percent-of-max shortcuts offered on the claim form.
pub const CLAIM_PRESETS: [u8; 4] = [25, 50, 75, 100];

/// Base mainnet.
pub const DEFAULT_RPC_URL: &str = "https://mainnet.base.org";
pub const DEFAULT_CHAIN_ID: u64 = 8453;

pub const NEYNAR_API_URL: &str = "https://api.neynar.com";

/// EIP-5792 request version sent with `wallet_sendCalls`.
pub const SEND_CALLS_VERSION: &str = "2.0.0";
