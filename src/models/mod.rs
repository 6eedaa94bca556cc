//! 数据模型模块

pub mod group;
pub mod role;
pub mod shop;
