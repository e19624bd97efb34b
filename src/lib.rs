// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! CityBreak: browse and favorite local activities
//!
//! This crate provides the backend API for listing activities by city and
//! managing each user's ordered set of favorite activities.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{ActivityService, FavoriteService, UserService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub user_service: UserService,
    pub activity_service: ActivityService,
    pub favorite_service: FavoriteService,
}
