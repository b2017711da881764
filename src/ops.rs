pub mod filter;
pub mod flat_map;
pub mod map;
pub mod observe_on;
pub mod subscribe_on;

pub use filter::FilterObserver;
pub use flat_map::FlatMapObserver;
pub use map::MapObserver;
pub use observe_on::ObserveOnObserver;
