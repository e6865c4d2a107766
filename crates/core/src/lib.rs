pub mod annotation;
pub mod blurring;
pub mod capture;
pub mod classification;
pub mod detection;
pub mod pipeline;
pub mod shared;
pub mod statistics;
