pub mod about_tab;
pub mod detection_tab;
pub mod options_tab;
pub mod statistics_tab;
