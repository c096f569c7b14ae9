/// Terminal front-end: menu input, text views, chart images and uploads.
pub mod canvas;
pub mod menu;
pub mod plot;
pub mod upload;
pub mod views;
