//! 工具函数模块

mod dns_name;

pub use dns_name::{dns_names_equal, normalize_dns_name};
