//! 分组权限与角色注册表同步服务
//!
//! 分组创建时补齐默认权限（优先继承主店铺的同类分组），
//! 分组权限变更时保证每个权限标识都登记在角色注册表中。

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod startup;
pub mod telemetry;
