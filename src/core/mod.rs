//! # Core Application Logic
//!
//! The navigation controller: state, actions and the reducer. It knows
//! nothing about any specific UI technology and performs no I/O — fetch
//! results enter as actions, fetch requests leave as effects.
//!
//! ```text
//!                 ┌─────────────────────────┐
//!                 │         CORE            │
//!                 │  (this module)          │
//!                 │                         │
//!                 │  • State (app data)     │
//!                 │  • Action (events)      │
//!                 │  • update() (reducer)   │
//!                 │                         │
//!                 │  No I/O. No UI. Pure.   │
//!                 └───────────┬─────────────┘
//!                             │ Effect
//!                             ▼
//!                 ┌─────────────────────────┐
//!                 │      TUI Adapter        │
//!                 │  spawns fetches, sends  │
//!                 │  resolutions back as    │
//!                 │  Actions                │
//!                 └─────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and the three-level `View` union
//! - [`action`]: The `Action`/`Effect` enums and the `update()` reducer
//! - [`config`]: Settings resolution (file, env, CLI)

pub mod action;
pub mod config;
pub mod state;
