pub mod decode_page;
pub mod derive_path;
pub mod is_image;
pub mod process_images;
pub mod resolve_url;
