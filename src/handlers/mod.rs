//! HTTP 处理器模块

pub mod group;
pub mod health;
pub mod role;
