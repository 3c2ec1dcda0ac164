//! School ERP - 学校综合管理平台后端服务
//!
//! 基于 Actix Web 构建，覆盖学生档案、学费、考试成绩、准考证、
//! 图书馆、校车、证书、短信群发和体检记录等业务。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证、权限与限流中间件
//! - `models`: 数据模型定义
//! - `permissions`: 角色权限表与导航
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod permissions;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
