//! Sled-backed persistence for the rewards engine

pub mod db;

pub use db::SledStore;
