//! # Gatewayエンドポイント

pub mod upload;
pub mod videos;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use upload::handle_upload;
pub use videos::handle_list_videos;
