pub mod pool;
pub mod staking_info;
pub mod token;

// Re-export for easier access
pub use pool::{PairAddresses, PoolConfig, PoolLiveState, PoolRecord, PoolUid, PoolVersion};
pub use staking_info::StakingInfo;
pub use token::Token;
