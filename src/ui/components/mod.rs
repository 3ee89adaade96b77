pub mod history;
pub mod leaderboard;
pub mod progress_bar;
pub mod roadmap;
pub mod stats_sidebar;
pub mod typing_area;
