pub mod fetch_mock;
pub mod intersection_observer_mock;
