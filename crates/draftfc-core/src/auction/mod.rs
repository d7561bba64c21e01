pub mod wheel;

pub use wheel::{AuctionError, SettleOutcome, SpinTicket, WheelAuction, WheelPhase, WheelSettings};
