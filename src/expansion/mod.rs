mod expansion_tracker;

pub use expansion_tracker::ExpansionTracker;
