pub mod boost;

pub use boost::BoostParameters;
