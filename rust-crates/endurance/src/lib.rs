pub mod bids;

pub mod champions;

pub mod clock;

pub mod duration;

pub mod leaderboard;

pub use bids::BidRecord;
pub use champions::{
    ChampionInterval,
    EnduranceChampionCalculator,
    EnduranceChampionResult,
    champion_intervals,
    compute_endurance_champions,
    compute_endurance_champions_at,
};
pub use clock::{
    Clock,
    FixedClock,
    SystemClock,
};

pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;
