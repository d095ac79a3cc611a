//! Terminal UI for the portfolio page.
//!
//! Organized along pure/effect boundaries:
//! - `state`: the App model and event types
//! - `update`: pure event handling and controller dispatch
//! - `layout`: pure row plan and visibility math
//! - `view`: pure rendering plus the click hit map
//! - `theme`: style palettes for the two page themes
//! - `run`: the only effectful module (terminal, threads, loop)

pub mod layout;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;
pub use state::App;
