// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod favorite;
pub mod user;

pub use activity::{ActivityService, NewActivity};
pub use favorite::FavoriteService;
pub use user::{NewUser, UserService};
