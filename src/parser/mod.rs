//! Parser module for fetched HTML pages and robots.txt files

pub mod page;
pub mod robots;

pub use page::{count_words, PageDocument};
pub use robots::{RobotsTxt, AI_CRAWLER_TOKENS};
