#![allow(dead_code)]

pub mod relay_server;
