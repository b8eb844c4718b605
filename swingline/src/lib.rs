pub mod bar;
pub mod config;
pub mod constant;
pub mod frame;
pub mod loader;
pub mod logging;
pub mod swing;
pub mod tick;
pub mod window;
mod utils;

pub use bar::PriceBar;
pub use config::SwingConfig;
pub use constant::{Const, SwingError, SwingSide};
pub use frame::swing_frame;
pub use loader::{BarLoader, TickLoader};
pub use logging::{init_debug_logging, init_logging};
pub use swing::{SwingPoint, compute_swing_points, compute_swing_points_default, swing_transitions};
pub use tick::{TickBarAggregator, TickInput, aggregate_ticks, parse_tick_line};
pub use window::{is_flat_window, is_swing_high, is_swing_low};
