//! Grid-based tabletop game map for the browser.
//!
//! This crate is compiled to WebAssembly and draws a square-grid battle map
//! into an HTML canvas. Player tokens sit on grid cells; hovering one shows a
//! floating info card (name, hit points, conditions) that is never covered by
//! other tokens. The host JavaScript layer wires DOM events to the engine and
//! reacts to the returned [`map::Action`]s and [`notify::MapEvent`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser [`engine::Engine`] wrapping the testable [`map::MapCore`] |
//! | [`map`] | Token collection, grid settings, hover and gesture handling |
//! | [`token`] | Player token data and change signals |
//! | [`grid`] | Grid geometry: cells, line positions, pixel-to-cell mapping |
//! | [`scene`] | Per-frame layout, including clip regions around the card |
//! | [`card`] | Info card layout and text measurement |
//! | [`render`] | Canvas 2D painting of a laid-out scene |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing tokens by point and by area |
//! | [`notify`] | Change events and observer registration |
//! | [`config`] | Map configuration from JSON or the environment |
//! | [`geom`] | Points, rectangles and rectangle-union regions |
//! | [`color`] | RGB colors and hex parsing |
//! | [`consts`] | Shared numeric constants and token defaults |

pub mod card;
pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod grid;
pub mod hit;
pub mod input;
pub mod map;
pub mod notify;
pub mod render;
pub mod scene;
pub mod token;
