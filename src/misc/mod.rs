mod hostname;

pub use hostname::hostname;
