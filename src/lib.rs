pub mod config;
pub mod decode;
pub mod error;
pub mod listing;
pub mod photos;
pub mod scan;
pub mod thumbnails;
pub mod viewer;
pub mod render {
    pub mod backend;
    pub mod gpu;
    pub mod window;
}
