pub mod calibration;
pub mod capture;
pub mod consts;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod orientation;
pub mod poller;
pub mod readout;
pub mod session;
pub mod settings;
