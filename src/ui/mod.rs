pub mod app;
pub mod layout;
pub mod month_pane;
pub mod theme;

pub use app::App;
pub use month_pane::MonthPane;
pub use theme::Theme;
