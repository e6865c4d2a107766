pub mod primary_button;
pub mod stat_bar;
