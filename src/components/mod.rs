pub mod modals;
pub mod navbar;
pub mod staking_card;
pub mod staking_view;

pub use staking_view::StakingView;
