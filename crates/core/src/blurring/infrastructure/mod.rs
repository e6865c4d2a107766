pub mod blurrer_factory;
pub mod gaussian_blurrer;
pub mod pixelate_blurrer;
mod roi;
