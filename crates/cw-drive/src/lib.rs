//! `cw-drive` — host-side scheduling for the curvewalk engine.
//!
//! # Frame loop
//!
//! ```text
//! advance(frame_dt):
//!   PerFrame      → one tick(frame_dt)
//!   PerFixedStep  → accumulator += frame_dt
//!                   while accumulator >= fixed_step (at most max_steps_per_frame):
//!                       tick(fixed_step)
//!                   leftover whole steps are dropped and logged
//!
//! every tick:
//!   ① on_tick_start(tick)
//!   ② engine.tick(dt, &curve, &fields)   point events go to the engine's
//!                                          own subscribers, synchronously
//!   ③ on_tick_end(tick, outcome, &engine)
//!   ④ on_sample(tick, &engine, &curve, &fields)
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cw_curve::ArcTable;
//! use cw_drive::{DriverBuilder, FieldFollower};
//!
//! let curve = ArcTable::open(&[0.0, 5.0, 12.0])?;
//! let mut driver = DriverBuilder::new(curve.clone(), curve).build()?;
//! let mut scale = FieldFollower::new("scale");
//! driver.run(120, 1.0 / 60.0, &mut scale)?;
//! ```

pub mod builder;
pub mod driver;
pub mod error;
pub mod follower;
pub mod observer;


pub use builder::{DEFAULT_FIXED_STEP, DEFAULT_MAX_STEPS_PER_FRAME, DriverBuilder};
pub use driver::Driver;
pub use error::{DriveError, DriveResult};
pub use follower::FieldFollower;
pub use observer::{DriverObserver, NoopObserver};
