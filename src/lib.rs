//!
//! ## Design
//!
//! * the tour is Warnsdorff's rule and nothing else: greedy, deterministic,
//!   no backtracking, so some start squares leave the knight stuck
//! * computing a move never waits on anything; all the waiting is playback
//! * abstract display so can plug alternatives; starting with TUI in-console
//! * input device, with trait for reading control keys
//! * pacing behind a trait too, so playback can be tested without sleeping
//! * one session record owns the board, the path and the playback settings;
//!   no globals
//!
//! Model
//!
//! ```text
//! main
//!  |-- config(start square), logging
//!  |-- renderer, input, pacer
//!  |-- session(tour(board, path), playback state)
//!  |-- playback controller(renderer, input, pacer)
//!  |    `-- play(session)       repeat until the viewer exits:
//!  |         |-- run(session)     tour.step() until complete / stuck / quit
//!  |         `-- linger(session)  hold the last frame; restart or exit
//!  `-- report(outcomes)         one per tour, once the terminal is restored
//! ```
pub mod board;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod logging;
pub mod moves;
pub mod playback;
pub mod report;
pub mod session;
pub mod timing;
pub mod tour;
